use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::config::BdmConfig;
use crate::session::BrowserSession;
use crate::storage::{clear_dir_files, ensure_dir, incoming_dir};

use super::job::execute_job;
use super::types::{JobOutcome, JobRequest, RunSummary};

/// Resolved paths and timings for one run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub output_dir: PathBuf,
    pub incoming_dir: PathBuf,
    pub download_timeout: Duration,
    pub poll_interval: Duration,
}

impl RunOptions {
    pub fn from_config(config: &BdmConfig) -> Self {
        Self {
            output_dir: config.output_dir.clone(),
            incoming_dir: incoming_dir(&config.output_dir, &config.incoming_subdir),
            download_timeout: config.download_timeout(),
            poll_interval: config.poll_interval(),
        }
    }

    /// Creates the output and incoming directories and clears stray files a
    /// previous run may have left in the incoming one.
    pub fn prepare_directories(&self) -> Result<()> {
        ensure_dir(&self.output_dir)?;
        ensure_dir(&self.incoming_dir)?;
        clear_dir_files(&self.incoming_dir)?;
        Ok(())
    }
}

/// Runs every request in order on one session, closing the session before
/// returning on both the normal and the fatal path.
///
/// `report` is called once per job with its index, in list order. A fatal
/// session fault aborts the remaining jobs and surfaces as `Err`.
pub async fn run_all<S, F>(
    mut session: S,
    requests: &[JobRequest],
    opts: &RunOptions,
    mut report: F,
) -> Result<RunSummary>
where
    S: BrowserSession,
    F: FnMut(usize, &JobRequest, &JobOutcome),
{
    let mut summary = RunSummary::default();

    for (index, request) in requests.iter().enumerate() {
        let outcome = match execute_job(&mut session, request, opts).await {
            Ok(outcome) => outcome,
            Err(err) if err.is_fatal() => {
                tracing::warn!(url = %request.url, error = %err, "aborting run");
                close_session(&mut session).await;
                return Err(err).context("browser session became unusable");
            }
            Err(err) => JobOutcome::Failed {
                reason: err.to_string(),
            },
        };
        summary.record(&outcome);
        tracing::info!(url = %request.url, outcome = %outcome, "job finished");
        report(index, request, &outcome);
    }

    close_session(&mut session).await;
    tracing::info!(%summary, "run finished");
    Ok(summary)
}

async fn close_session<S: BrowserSession>(session: &mut S) {
    if let Err(err) = session.close().await {
        tracing::warn!(error = %err, "browser session closed uncleanly");
    }
}
