//! Status probe: visit a URL once and read the HTTP status the page's own
//! request for that exact URL came back with.
//!
//! The probe navigates to a blank page first so the network log only holds
//! traffic caused by the target navigation.

use crate::session::{BrowserSession, NetworkEvent, SessionError, BLANK_PAGE};

/// The only status a download attempt proceeds from.
pub const SUCCESS_STATUS: u16 = 200;

/// Navigates to `url` and returns the observed status for that exact URL,
/// or `None` when no response for it showed up in the network log.
pub async fn probe_status<S: BrowserSession>(
    session: &mut S,
    url: &str,
) -> Result<Option<u16>, SessionError> {
    session.navigate(BLANK_PAGE).await?;
    session.navigate(url).await?;
    let log = session.network_log();
    let status = scan_for_status(&log, url);
    tracing::debug!(url, ?status, events = log.len(), "probe finished");
    Ok(status)
}

/// First response whose URL matches `url` exactly wins. Redirect targets and
/// subresources have different URLs and never match.
pub(crate) fn scan_for_status(events: &[NetworkEvent], url: &str) -> Option<u16> {
    events.iter().find(|e| e.url == url).map(|e| e.status)
}
