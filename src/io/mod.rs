//! I/O module
//!
//! Handles the wire boundary of the engine.
//!
//! # Components
//!
//! - `envelope` - Request/response envelopes (`op`-tagged JSON)
//! - `dispatch` - Mapping envelopes onto any `CirculationApi`
//! - `runner` - Async NDJSON script replay, one response line per request

pub mod dispatch;
pub mod envelope;
pub mod runner;

pub use dispatch::{dispatch, dispatch_line};
pub use envelope::{ApiRequest, ApiResponse};
pub use runner::run_script;
