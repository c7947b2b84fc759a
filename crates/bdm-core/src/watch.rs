//! Download completion watcher.
//!
//! Chrome writes downloads as `*.crdownload` and renames them when finished.
//! The watcher snapshots the download directory, triggers the navigation that
//! starts the download, then polls for a new fully-written PDF.

use std::collections::HashSet;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::JobError;
use crate::session::BrowserSession;
use crate::storage::is_partial_download;
use crate::url_model::PDF_EXTENSION;

/// Names present in a directory at one point in time.
pub struct DirectorySnapshot {
    names: HashSet<OsString>,
}

impl DirectorySnapshot {
    pub fn capture(dir: &Path) -> io::Result<Self> {
        let mut names = HashSet::new();
        for entry in std::fs::read_dir(dir)? {
            names.insert(entry?.file_name());
        }
        Ok(Self { names })
    }

    pub fn contains(&self, name: &OsString) -> bool {
        self.names.contains(name)
    }
}

/// Navigates to `url` to start the download, then waits for a new completed
/// PDF to appear in `download_dir`. Returns the path of the completed file.
pub async fn trigger_and_watch<S: BrowserSession>(
    session: &mut S,
    download_dir: &Path,
    url: &str,
    timeout: Duration,
    poll_interval: Duration,
) -> Result<PathBuf, JobError> {
    let before = DirectorySnapshot::capture(download_dir).map_err(JobError::DownloadDir)?;
    session.navigate(url).await?;

    let deadline = tokio::time::Instant::now() + timeout;
    loop {
        if let Some(name) =
            completed_new_pdf(download_dir, &before).map_err(JobError::DownloadDir)?
        {
            tracing::debug!(url, file = %name.to_string_lossy(), "download completed");
            return Ok(download_dir.join(name));
        }
        if tokio::time::Instant::now() >= deadline {
            return Err(JobError::DownloadTimeout { waited: timeout });
        }
        tokio::time::sleep(poll_interval).await;
    }
}

/// A file that was not in `before`, is not an in-progress marker, and carries
/// the PDF extension (case-insensitively).
fn completed_new_pdf(dir: &Path, before: &DirectorySnapshot) -> io::Result<Option<OsString>> {
    for entry in std::fs::read_dir(dir)? {
        let name = entry?.file_name();
        if before.contains(&name) {
            continue;
        }
        let name_str = name.to_string_lossy();
        if is_partial_download(&name_str) {
            continue;
        }
        if name_str.to_lowercase().ends_with(PDF_EXTENSION) {
            return Ok(Some(name));
        }
    }
    Ok(None)
}
