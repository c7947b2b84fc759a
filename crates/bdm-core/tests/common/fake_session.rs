//! A scripted in-memory browser session for pipeline tests.
//!
//! Mimics the observable behavior of the real session: the network log
//! resets on every navigation, and a "download" materializes as a file in
//! the download directory on the second visit to a URL, matching the
//! probe-then-trigger navigation order of the pipeline.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bdm_core::session::{BrowserSession, NetworkEvent, SessionError, BLANK_PAGE};

struct DroppedFile {
    name: String,
    partial: bool,
}

struct Scripted {
    status: u16,
    file: Option<DroppedFile>,
}

struct FakeState {
    download_dir: PathBuf,
    scripted: HashMap<String, Scripted>,
    visits: HashMap<String, usize>,
    navigations: Vec<String>,
    closes: usize,
    log: Vec<NetworkEvent>,
    disconnect_on: Option<String>,
}

/// Cloning shares the underlying state, so a test can keep a handle for
/// assertions after the pipeline consumes the session.
#[derive(Clone)]
pub struct FakeSession {
    state: Arc<Mutex<FakeState>>,
}

impl FakeSession {
    pub fn new(download_dir: &Path) -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeState {
                download_dir: download_dir.to_path_buf(),
                scripted: HashMap::new(),
                visits: HashMap::new(),
                navigations: Vec::new(),
                closes: 0,
                log: Vec::new(),
                disconnect_on: None,
            })),
        }
    }

    /// Visiting `url` logs a response with `status` and drops nothing.
    pub fn with_status(self, url: &str, status: u16) -> Self {
        self.state.lock().unwrap().scripted.insert(
            url.to_string(),
            Scripted { status, file: None },
        );
        self
    }

    /// Visiting `url` a second time writes `filename` into the download dir.
    pub fn with_download(self, url: &str, status: u16, filename: &str) -> Self {
        self.state.lock().unwrap().scripted.insert(
            url.to_string(),
            Scripted {
                status,
                file: Some(DroppedFile {
                    name: filename.to_string(),
                    partial: false,
                }),
            },
        );
        self
    }

    /// Like `with_download`, but the file only ever appears as an
    /// in-progress `.crdownload` that never completes.
    pub fn with_partial_download(self, url: &str, status: u16, filename: &str) -> Self {
        self.state.lock().unwrap().scripted.insert(
            url.to_string(),
            Scripted {
                status,
                file: Some(DroppedFile {
                    name: filename.to_string(),
                    partial: true,
                }),
            },
        );
        self
    }

    /// Navigating to `url` fails as a lost browser.
    pub fn with_disconnect_on(self, url: &str) -> Self {
        self.state.lock().unwrap().disconnect_on = Some(url.to_string());
        self
    }

    pub fn close_count(&self) -> usize {
        self.state.lock().unwrap().closes
    }

    pub fn navigations(&self) -> Vec<String> {
        self.state.lock().unwrap().navigations.clone()
    }

    /// Navigations to anything other than the blank page.
    pub fn target_navigations(&self) -> usize {
        self.state
            .lock()
            .unwrap()
            .navigations
            .iter()
            .filter(|url| url.as_str() != BLANK_PAGE)
            .count()
    }
}

#[async_trait]
impl BrowserSession for FakeSession {
    async fn navigate(&mut self, url: &str) -> Result<(), SessionError> {
        let mut state = self.state.lock().unwrap();
        state.navigations.push(url.to_string());
        state.log.clear();

        if url == BLANK_PAGE {
            return Ok(());
        }
        if state.disconnect_on.as_deref() == Some(url) {
            return Err(SessionError::Disconnected {
                message: "scripted disconnect".to_string(),
            });
        }

        let visit = {
            let counter = state.visits.entry(url.to_string()).or_insert(0);
            *counter += 1;
            *counter
        };
        let scripted = state.scripted.get(url).map(|s| {
            (
                s.status,
                s.file.as_ref().map(|f| (f.name.clone(), f.partial)),
            )
        });
        if let Some((status, file)) = scripted {
            state.log.push(NetworkEvent {
                method: "GET".to_string(),
                url: url.to_string(),
                status,
            });
            if visit >= 2 {
                if let Some((name, partial)) = file {
                    let filename = if partial {
                        format!("{}.crdownload", name)
                    } else {
                        name
                    };
                    std::fs::write(state.download_dir.join(filename), b"%PDF-1.4 fake").unwrap();
                }
            }
        }
        Ok(())
    }

    fn network_log(&self) -> Vec<NetworkEvent> {
        self.state.lock().unwrap().log.clone()
    }

    async fn close(&mut self) -> Result<(), SessionError> {
        self.state.lock().unwrap().closes += 1;
        Ok(())
    }
}
