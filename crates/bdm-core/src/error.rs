//! Per-job failure classification.
//!
//! Most variants fail one job and let the run continue; a lost browser
//! session is fatal because every later job would fail the same way.

use std::error::Error;
use std::fmt;
use std::time::Duration;

use crate::session::SessionError;

/// Why a single job could not produce a placed file.
#[derive(Debug)]
pub enum JobError {
    /// No completed download appeared in the watch window.
    DownloadTimeout { waited: Duration },
    /// The download directory could not be read while watching.
    DownloadDir(std::io::Error),
    /// The completed file could not be moved to its destination.
    Placement(anyhow::Error),
    /// The browser session reported an error.
    Session(SessionError),
}

impl JobError {
    /// True when the browser is gone and the whole run must stop.
    pub fn is_fatal(&self) -> bool {
        matches!(self, JobError::Session(SessionError::Disconnected { .. }))
    }
}

impl fmt::Display for JobError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobError::DownloadTimeout { waited } => {
                write!(f, "no completed download after {:.1}s", waited.as_secs_f64())
            }
            JobError::DownloadDir(e) => write!(f, "download directory: {}", e),
            JobError::Placement(e) => write!(f, "placement: {:#}", e),
            JobError::Session(e) => write!(f, "session: {}", e),
        }
    }
}

impl Error for JobError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            JobError::DownloadTimeout { .. } => None,
            JobError::DownloadDir(e) => Some(e),
            JobError::Placement(e) => Some(e.as_ref()),
            JobError::Session(e) => Some(e),
        }
    }
}

impl From<SessionError> for JobError {
    fn from(e: SessionError) -> Self {
        JobError::Session(e)
    }
}
