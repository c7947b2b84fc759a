//! The download pipeline: validate, resolve a filename, guard against
//! duplicates, probe the status, watch for the download, place the file.
//!
//! Jobs run strictly one at a time on a single browser session.

mod job;
mod run;
mod types;

pub use run::{run_all, RunOptions};
pub use types::{JobOutcome, JobRequest, RunSummary};
