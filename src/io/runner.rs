//! Operations script runner
//!
//! This module replays a newline-delimited-JSON script of API requests
//! against an engine. One request per line, one response line out per
//! request, in order. The runner is the executable stand-in for an HTTP
//! front end: it exercises the same envelopes, dispatch and status mapping
//! a transport would.
//!
//! Blank lines are skipped. A line that fails to parse produces a 400
//! response line and the script keeps going; only I/O failure stops the
//! run.

use crate::core::traits::CirculationApi;
use crate::io::dispatch::dispatch_line;
use crate::types::InventoryError;
use std::io::Write;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Replay a request script from `input_path` against `api`
///
/// # Arguments
///
/// * `input_path` - NDJSON file with one request envelope per line
/// * `api` - The engine to dispatch against
/// * `output` - Destination for one response line per request
///
/// # Returns
///
/// * `Ok(usize)` - The number of responses written
/// * `Err(InventoryError)` - The input could not be read or a response
///   could not be written
pub async fn run_script<A, W>(
    input_path: &Path,
    api: &mut A,
    output: &mut W,
) -> Result<usize, InventoryError>
where
    A: CirculationApi,
    W: Write,
{
    let file = File::open(input_path).await?;
    let mut lines = BufReader::new(file).lines();
    let mut responses = 0;

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let response = dispatch_line(api, &line);
        let encoded = serde_json::to_string(&response)?;
        writeln!(output, "{}", encoded)?;
        responses += 1;
    }

    tracing::debug!(responses, "script replay finished");
    Ok(responses)
}
