//! Chrome session driven over the DevTools protocol.
//!
//! One browser, one page. Network events are mirrored into an in-memory log
//! that resets on every navigation, and downloads are routed into the
//! directory the completion watcher observes.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::browser::{
    SetDownloadBehaviorBehavior, SetDownloadBehaviorParams,
};
use chromiumoxide::cdp::browser_protocol::network::{
    EnableParams, EventRequestWillBeSent, EventResponseReceived, RequestId,
};
use chromiumoxide::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;

use crate::config::BrowserLaunchConfig;

use super::{BrowserSession, NetworkEvent, SessionError, BLANK_PAGE};

/// Delay after browser operations so CDP events settle before the log is read.
const SETTLE_DELAY: Duration = Duration::from_millis(300);

/// Mirror of the page's network activity since the last navigation began.
/// Responses are joined with their request's method by request id; a record
/// that cannot be joined or carries an out-of-range status is dropped.
#[derive(Default)]
struct NetworkRecorder {
    methods: HashMap<RequestId, String>,
    events: Vec<NetworkEvent>,
}

impl NetworkRecorder {
    fn reset(&mut self) {
        self.methods.clear();
        self.events.clear();
    }

    fn record_request(&mut self, request_id: &RequestId, method: &str) {
        self.methods.insert(request_id.clone(), method.to_string());
    }

    fn record_response(&mut self, request_id: &RequestId, url: &str, raw_status: i64) {
        let method = match self.methods.get(request_id) {
            Some(m) => m.clone(),
            None => return,
        };
        let status = match u16::try_from(raw_status) {
            Ok(s) => s,
            Err(_) => return,
        };
        self.events.push(NetworkEvent {
            method,
            url: url.to_string(),
            status,
        });
    }
}

/// A headless (by default) Chrome instance implementing [`BrowserSession`].
pub struct CdpBrowserSession {
    browser: Browser,
    page: Page,
    recorder: Arc<Mutex<NetworkRecorder>>,
    handler_task: JoinHandle<()>,
    listener_tasks: Vec<JoinHandle<()>>,
    nav_timeout: Duration,
    closed: bool,
}

impl CdpBrowserSession {
    /// Launches Chrome with downloads routed into `download_dir` and network
    /// telemetry enabled on a single blank page.
    ///
    /// `download_dir` must already exist; Chrome will not create it.
    pub async fn launch(
        browser_cfg: &BrowserLaunchConfig,
        download_dir: &Path,
        nav_timeout: Duration,
    ) -> Result<Self> {
        let mut builder = BrowserConfig::builder();
        builder = if browser_cfg.headless {
            builder.new_headless_mode()
        } else {
            builder.with_head()
        };
        if let Some(exe) = &browser_cfg.chrome_executable {
            builder = builder.chrome_executable(exe);
        }
        if !browser_cfg.extra_args.is_empty() {
            builder = builder.args(browser_cfg.extra_args.clone());
        }
        let config = builder
            .build()
            .map_err(|e| anyhow::anyhow!("invalid browser config: {}", e))?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .context("failed to launch browser")?;

        // Drain CDP events for the browser's lifetime; the loop ends when the
        // browser goes away.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = browser
            .new_page(BLANK_PAGE)
            .await
            .context("failed to open initial page")?;

        page.execute(EnableParams::default())
            .await
            .context("failed to enable network events")?;

        let download_behavior = SetDownloadBehaviorParams::builder()
            .behavior(SetDownloadBehaviorBehavior::Allow)
            .download_path(download_dir.to_string_lossy().to_string())
            .build()
            .map_err(|e| anyhow::anyhow!("invalid download behavior params: {}", e))?;
        browser
            .execute(download_behavior)
            .await
            .context("failed to set download directory")?;

        let recorder = Arc::new(Mutex::new(NetworkRecorder::default()));
        let mut listener_tasks = Vec::with_capacity(2);

        let mut requests = page
            .event_listener::<EventRequestWillBeSent>()
            .await
            .context("failed to subscribe to request events")?;
        let rec = Arc::clone(&recorder);
        listener_tasks.push(tokio::spawn(async move {
            while let Some(event) = requests.next().await {
                lock_recorder(&rec).record_request(&event.request_id, &event.request.method);
            }
        }));

        let mut responses = page
            .event_listener::<EventResponseReceived>()
            .await
            .context("failed to subscribe to response events")?;
        let rec = Arc::clone(&recorder);
        listener_tasks.push(tokio::spawn(async move {
            while let Some(event) = responses.next().await {
                lock_recorder(&rec).record_response(
                    &event.request_id,
                    &event.response.url,
                    event.response.status,
                );
            }
        }));

        // Give the browser a moment to settle before the first navigation.
        tokio::time::sleep(SETTLE_DELAY).await;
        tracing::debug!(download_dir = %download_dir.display(), "browser session launched");

        Ok(Self {
            browser,
            page,
            recorder,
            handler_task,
            listener_tasks,
            nav_timeout,
            closed: false,
        })
    }

    fn classify_goto_error(&self, url: &str, err: chromiumoxide::error::CdpError) -> SessionError {
        if self.handler_task.is_finished() {
            SessionError::Disconnected {
                message: err.to_string(),
            }
        } else {
            SessionError::Navigation {
                url: url.to_string(),
                message: err.to_string(),
            }
        }
    }
}

#[async_trait]
impl BrowserSession for CdpBrowserSession {
    async fn navigate(&mut self, url: &str) -> Result<(), SessionError> {
        if self.closed {
            return Err(SessionError::Disconnected {
                message: "session already closed".to_string(),
            });
        }

        lock_recorder(&self.recorder).reset();

        match tokio::time::timeout(self.nav_timeout, self.page.goto(url)).await {
            Ok(Ok(_)) => {}
            // Chrome aborts the navigation itself when it turns into a file
            // download; the download still proceeds.
            Ok(Err(e)) if e.to_string().contains("ERR_ABORTED") => {
                tracing::debug!(url, "navigation became a download");
            }
            Ok(Err(e)) => return Err(self.classify_goto_error(url, e)),
            Err(_) => {
                return Err(SessionError::Navigation {
                    url: url.to_string(),
                    message: format!("timed out after {:?}", self.nav_timeout),
                });
            }
        }

        tokio::time::sleep(SETTLE_DELAY).await;
        Ok(())
    }

    fn network_log(&self) -> Vec<NetworkEvent> {
        lock_recorder(&self.recorder).events.clone()
    }

    async fn close(&mut self) -> Result<(), SessionError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        let close_result = self.browser.close().await;
        let _ = self.browser.wait().await;
        for task in self.listener_tasks.drain(..) {
            task.abort();
        }
        self.handler_task.abort();
        tracing::debug!("browser session closed");

        close_result.map(|_| ()).map_err(|e| SessionError::Disconnected {
            message: e.to_string(),
        })
    }
}

/// Locks the recorder, recovering the data if a panic poisoned the lock.
fn lock_recorder(recorder: &Arc<Mutex<NetworkRecorder>>) -> MutexGuard<'_, NetworkRecorder> {
    recorder.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
