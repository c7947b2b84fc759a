use std::fmt;
use std::path::PathBuf;

/// One line from the URL list, not yet validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRequest {
    pub url: String,
}

/// What became of one job. Skips are deliberate non-downloads; `Failed`
/// records an error the run survived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    Success { path: PathBuf },
    SkippedInvalidUrl,
    SkippedUnresolvableFilename,
    SkippedDuplicate { path: PathBuf },
    SkippedNonSuccessStatus { status: Option<u16> },
    Failed { reason: String },
}

impl fmt::Display for JobOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobOutcome::Success { path } => write!(f, "downloaded -> {}", path.display()),
            JobOutcome::SkippedInvalidUrl => write!(f, "skipped: invalid URL"),
            JobOutcome::SkippedUnresolvableFilename => {
                write!(f, "skipped: no .pdf filename in URL")
            }
            JobOutcome::SkippedDuplicate { path } => {
                write!(f, "skipped: already exists at {}", path.display())
            }
            JobOutcome::SkippedNonSuccessStatus {
                status: Some(status),
            } => write!(f, "skipped: HTTP status {}", status),
            JobOutcome::SkippedNonSuccessStatus { status: None } => {
                write!(f, "skipped: HTTP status unknown")
            }
            JobOutcome::Failed { reason } => write!(f, "failed: {}", reason),
        }
    }
}

/// Per-outcome counts for a whole run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub succeeded: usize,
    pub invalid_url: usize,
    pub unresolvable: usize,
    pub duplicate: usize,
    pub non_success_status: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn record(&mut self, outcome: &JobOutcome) {
        match outcome {
            JobOutcome::Success { .. } => self.succeeded += 1,
            JobOutcome::SkippedInvalidUrl => self.invalid_url += 1,
            JobOutcome::SkippedUnresolvableFilename => self.unresolvable += 1,
            JobOutcome::SkippedDuplicate { .. } => self.duplicate += 1,
            JobOutcome::SkippedNonSuccessStatus { .. } => self.non_success_status += 1,
            JobOutcome::Failed { .. } => self.failed += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.succeeded
            + self.invalid_url
            + self.unresolvable
            + self.duplicate
            + self.non_success_status
            + self.failed
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} job(s): {} downloaded, {} invalid, {} without .pdf name, {} already present, {} non-success status, {} failed",
            self.total(),
            self.succeeded,
            self.invalid_url,
            self.unresolvable,
            self.duplicate,
            self.non_success_status,
            self.failed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_counts_each_outcome_once() {
        let mut summary = RunSummary::default();
        summary.record(&JobOutcome::Success {
            path: PathBuf::from("a.pdf"),
        });
        summary.record(&JobOutcome::SkippedInvalidUrl);
        summary.record(&JobOutcome::SkippedUnresolvableFilename);
        summary.record(&JobOutcome::SkippedDuplicate {
            path: PathBuf::from("b.pdf"),
        });
        summary.record(&JobOutcome::SkippedNonSuccessStatus { status: Some(404) });
        summary.record(&JobOutcome::Failed {
            reason: "boom".to_string(),
        });
        assert_eq!(summary.total(), 6);
        assert_eq!(summary.succeeded, 1);
        assert_eq!(summary.failed, 1);
    }

    #[test]
    fn outcome_display_is_one_line() {
        let unknown = JobOutcome::SkippedNonSuccessStatus { status: None };
        assert_eq!(unknown.to_string(), "skipped: HTTP status unknown");
        let not_found = JobOutcome::SkippedNonSuccessStatus { status: Some(404) };
        assert_eq!(not_found.to_string(), "skipped: HTTP status 404");
    }
}
