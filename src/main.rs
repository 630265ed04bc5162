//! Circulation Engine CLI
//!
//! Command-line driver that replays a circulation API script against the
//! inventory engine.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- requests.ndjson > responses.ndjson
//! cargo run -- --engine shared requests.ndjson > responses.ndjson
//! cargo run -- --loan-period-days 7 requests.ndjson > responses.ndjson
//! ```
//!
//! The program reads one JSON request envelope per input line, dispatches
//! it against the selected engine flavor, and writes one JSON response per
//! line to stdout. Logs go to stderr so stdout stays a clean response
//! stream.
//!
//! # Exit Codes
//!
//! - 0: Success (per-request errors are responses, not failures)
//! - 1: Fatal error (file not found, unreadable input, broken output)

use circulation_engine::cli::{self, EngineFlavor};
use circulation_engine::core::{CirculationEngine, SharedCirculationEngine};
use circulation_engine::io::run_script;
use std::process;

#[tokio::main]
async fn main() {
    // stdout carries the response stream, so logging goes to stderr
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let args = cli::parse_args();
    let policy = args.to_loan_policy();
    let mut output = std::io::stdout();

    let result = match args.engine {
        EngineFlavor::Sync => {
            let mut engine = CirculationEngine::with_policy(policy);
            run_script(&args.input_file, &mut engine, &mut output).await
        }
        EngineFlavor::Shared => {
            let mut engine = SharedCirculationEngine::with_policy(policy);
            run_script(&args.input_file, &mut engine, &mut output).await
        }
    };

    if let Err(error) = result {
        tracing::error!(%error, input = %args.input_file.display(), "script replay failed");
        process::exit(1);
    }
}
