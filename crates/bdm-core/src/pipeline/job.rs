use crate::error::JobError;
use crate::probe::{probe_status, SUCCESS_STATUS};
use crate::session::BrowserSession;
use crate::storage::place_completed;
use crate::url_model::{derive_pdf_filename, parse_valid_url};
use crate::watch::trigger_and_watch;

use super::run::RunOptions;
use super::types::{JobOutcome, JobRequest};

/// Runs one URL through the whole pipeline. `Ok` covers every deliberate
/// outcome including skips; `Err` means the job broke partway.
pub(super) async fn execute_job<S: BrowserSession>(
    session: &mut S,
    request: &JobRequest,
    opts: &RunOptions,
) -> Result<JobOutcome, JobError> {
    let url = match parse_valid_url(&request.url) {
        Some(url) => url,
        None => return Ok(JobOutcome::SkippedInvalidUrl),
    };
    let filename = match derive_pdf_filename(&url) {
        Some(name) => name,
        None => return Ok(JobOutcome::SkippedUnresolvableFilename),
    };

    let destination = opts.output_dir.join(&filename);
    if destination.is_file() {
        return Ok(JobOutcome::SkippedDuplicate { path: destination });
    }

    // Every navigation uses the parsed URL so the probe's log scan and the
    // download trigger see the exact same string.
    let status = probe_status(session, url.as_str()).await?;
    if status != Some(SUCCESS_STATUS) {
        return Ok(JobOutcome::SkippedNonSuccessStatus { status });
    }

    let downloaded = trigger_and_watch(
        session,
        &opts.incoming_dir,
        url.as_str(),
        opts.download_timeout,
        opts.poll_interval,
    )
    .await?;

    place_completed(&downloaded, &destination).map_err(JobError::Placement)?;
    tracing::debug!(url = %url, dest = %destination.display(), "job placed its file");
    Ok(JobOutcome::Success { path: destination })
}
