//! Reads the newline-separated URL list that seeds a run.

use std::path::Path;

use anyhow::{Context, Result};

use crate::pipeline::JobRequest;

/// One request per non-blank line, surrounding whitespace trimmed, order and
/// duplicates preserved. Validation happens later, per job.
pub fn read_url_list(path: &Path) -> Result<Vec<JobRequest>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read URL list: {}", path.display()))?;
    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| JobRequest {
            url: line.to_string(),
        })
        .collect())
}
