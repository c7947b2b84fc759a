//! Driven browser session: the narrow surface the pipeline consumes.
//!
//! The orchestrator owns exactly one session per run and threads it through
//! every component call; the concrete Chrome implementation lives in [`cdp`].

mod cdp;

pub use cdp::CdpBrowserSession;

use async_trait::async_trait;

/// Neutral page navigated to between jobs to reset per-page network telemetry.
pub const BLANK_PAGE: &str = "about:blank";

/// One request/response record from the session's network event log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkEvent {
    pub method: String,
    pub url: String,
    pub status: u16,
}

/// Session-level failure.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// A navigation did not complete.
    #[error("navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },
    /// The browser went away; the session cannot be used again.
    #[error("browser session lost: {message}")]
    Disconnected { message: String },
}

/// Surface of the driven browser the pipeline consumes: navigate, read the
/// network event log, close. Implementations are not reentrant; callers must
/// not issue concurrent navigations.
#[async_trait]
pub trait BrowserSession: Send {
    /// Navigates the session's page to `url`, resetting the network log.
    async fn navigate(&mut self, url: &str) -> Result<(), SessionError>;

    /// Events captured since the last navigation began, in arrival order.
    fn network_log(&self) -> Vec<NetworkEvent>;

    /// Releases the underlying browser. Idempotent.
    async fn close(&mut self) -> Result<(), SessionError>;
}
