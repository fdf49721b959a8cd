//! File page source.
//!
//! Polls a single page JSON file at a fixed interval and emits the page every
//! time the file changes.
//!
//! Behavior:
//! - Change detection uses a (length, mtime in milliseconds) signature; the
//!   first successful poll always emits.
//! - Empty / whitespace-only files are ignored.
//! - A file that fails to parse or validate is logged once (warn) and retried
//!   when its signature changes again.
//! - A missing file is silent until it appears.
//!
//! The task ends when the receiver side of the channel is closed.

use std::fs;
use std::time::{Duration, SystemTime};

use tokio::{
    fs as afs,
    sync::mpsc::Sender,
    task::JoinHandle,
    time::{Instant, sleep},
};
use tracing::{error, info, trace, warn};

use super::PageSource;
use crate::config::{PageConfig, load_from_str};

/// Default poll interval in milliseconds.
pub const DEFAULT_POLL_MS: u64 = 250;

/// Source that polls a single page file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: String,
    poll_ms: u64,
}

impl FileSource {
    /// Create a new `FileSource`.
    ///
    /// `poll_ms` defaults to 250ms with a 10ms minimum.
    pub fn new(path: String, poll_ms: Option<u64>) -> Self {
        Self {
            path,
            poll_ms: poll_ms.unwrap_or(DEFAULT_POLL_MS).max(10),
        }
    }

    /// Coarse signature (length, mtime millis).
    fn file_signature(meta: &fs::Metadata) -> (u64, u128) {
        let len = meta.len();
        let mtime = meta
            .modified()
            .ok()
            .and_then(|t| t.duration_since(SystemTime::UNIX_EPOCH).ok())
            .map(|d| d.as_millis())
            .unwrap_or(0);
        (len, mtime)
    }
}

impl PageSource for FileSource {
    fn name(&self) -> &'static str {
        "file"
    }

    fn start(&self, sender: Sender<PageConfig>) -> JoinHandle<()> {
        let path = self.path.clone();
        let poll_ms = self.poll_ms;

        tokio::spawn(async move {
            info!(target: "linkbio::sources", %path, poll_ms, "FileSource task started");

            let mut last_sig: Option<(u64, u128)> = None;
            let interval = Duration::from_millis(poll_ms);
            let mut next_tick = Instant::now();

            loop {
                let now = Instant::now();
                if now < next_tick {
                    sleep(next_tick - now).await;
                }
                next_tick += interval;

                if sender.is_closed() {
                    break;
                }

                let meta = match fs::metadata(&path) {
                    Ok(m) if m.is_file() => m,
                    Ok(_) => {
                        warn!(target: "linkbio::sources", %path, "Path exists but is not a regular file");
                        continue;
                    }
                    Err(_) => continue,
                };

                let sig = Self::file_signature(&meta);
                if last_sig == Some(sig) {
                    trace!(target: "linkbio::sources", %path, "File unchanged; skipping");
                    continue;
                }

                let content = match afs::read_to_string(&path).await {
                    Ok(content) => content,
                    Err(e) => {
                        warn!(target: "linkbio::sources", %path, error = %e, "Failed to read file");
                        continue;
                    }
                };
                last_sig = Some(sig);

                if content.trim().is_empty() {
                    trace!(target: "linkbio::sources", %path, "File is empty/whitespace; ignoring");
                    continue;
                }

                match load_from_str(&content) {
                    Ok(page) => {
                        if let Err(e) = sender.send(page).await {
                            error!(
                                target: "linkbio::sources",
                                %path, error = %e,
                                "Channel closed; FileSource terminating"
                            );
                            break;
                        }
                        info!(target: "linkbio::sources", %path, "Dispatched page from file");
                    }
                    Err(e) => {
                        let reason = format!("{e:#}");
                        warn!(
                            target: "linkbio::sources",
                            %path, error = %reason,
                            "Page file is invalid; waiting for the next change"
                        );
                    }
                }
            }

            info!(target: "linkbio::sources", %path, "FileSource task ended");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;
    use tokio::time::timeout;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!(
            "linkbio-{}-{}-{name}",
            std::process::id(),
            crate::utils::ids::new_id()
        ))
    }

    #[test]
    fn poll_interval_has_a_floor() {
        assert_eq!(FileSource::new("x".into(), Some(50)).poll_ms, 50);
        assert_eq!(FileSource::new("y".into(), Some(1)).poll_ms, 10);
        assert_eq!(FileSource::new("z".into(), None).poll_ms, DEFAULT_POLL_MS);
    }

    #[tokio::test]
    async fn emits_page_from_file() {
        let path = temp_path("page.json");
        fs::write(&path, r#"{"slug":"ana","title":"Ana"}"#).unwrap();

        let (tx, mut rx) = mpsc::channel::<PageConfig>(4);
        let src = FileSource::new(path.to_string_lossy().into_owned(), Some(10));
        let handle = src.start(tx);

        let page = timeout(Duration::from_secs(5), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(page.title, "Ana");

        drop(rx);
        handle.abort();
        let _ = fs::remove_file(&path);
    }

    #[tokio::test]
    async fn invalid_file_is_not_emitted() {
        let path = temp_path("bad.json");
        fs::write(&path, "{ not json").unwrap();

        let (tx, mut rx) = mpsc::channel::<PageConfig>(4);
        let handle = FileSource::new(path.to_string_lossy().into_owned(), Some(10)).start(tx);

        assert!(
            timeout(Duration::from_millis(100), rx.recv())
                .await
                .is_err()
        );

        handle.abort();
        let _ = fs::remove_file(&path);
    }
}
