use crate::types::LoanPolicy;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Replay circulation API scripts against the inventory engine
#[derive(Parser, Debug)]
#[command(name = "circulation-engine")]
#[command(about = "Replay a circulation request script and emit one response per line", long_about = None)]
pub struct CliArgs {
    /// Input NDJSON file path containing one API request per line
    #[arg(value_name = "INPUT", help = "Path to the input request script")]
    pub input_file: PathBuf,

    /// Engine flavor to dispatch against
    #[arg(
        long = "engine",
        value_name = "ENGINE",
        default_value = "sync",
        help = "Engine flavor: 'sync' for the single-threaded engine or 'shared' for the thread-safe one"
    )]
    pub engine: EngineFlavor,

    /// Loan period override
    #[arg(
        long = "loan-period-days",
        value_name = "DAYS",
        help = "Days until a checkout is due (default: 14)"
    )]
    pub loan_period_days: Option<u32>,
}

/// Available engine flavors for script replay
#[derive(Clone, Debug, ValueEnum)]
pub enum EngineFlavor {
    /// HashMap stores behind exclusive access
    Sync,
    /// DashMap stores, shareable across tasks
    Shared,
}

impl CliArgs {
    /// Build the loan policy from CLI arguments
    ///
    /// Uses the `--loan-period-days` override when given, otherwise the
    /// default policy. A zero override falls back to the default with a
    /// warning (see [`LoanPolicy::new`]).
    pub fn to_loan_policy(&self) -> LoanPolicy {
        match self.loan_period_days {
            Some(days) => LoanPolicy::new(days),
            None => LoanPolicy::default(),
        }
    }
}
