/*!
Page sources (live link mode).

A source produces freshly loaded `PageConfig` values and pushes them into a
channel; the consumer re-encodes each one into a share link. This is how the
CLI keeps a share URL in sync with a page file that is being edited.

- `file.rs` -> `FileSource` (poll a single page JSON file)

Each source implementation is responsible for:
- Loading and validating pages through `config::loader`
- Pushing pages via `Sender<PageConfig>` while respecting backpressure (`send().await`)
- Logging errors and continuing (never panicking inside tasks)
- Ending cleanly when the channel closes
*/

use tokio::{sync::mpsc::Sender, task::JoinHandle};
use tracing::info;

use crate::config::PageConfig;

pub mod file;

pub use file::FileSource;

/// Trait implemented by all page sources.
pub trait PageSource: Send + Sync {
    /// Static human-readable identifier (used in logs).
    fn name(&self) -> &'static str;

    /// Start the source in the background.
    fn start(&self, sender: Sender<PageConfig>) -> JoinHandle<()>;
}

/// Spawn every source, returning their `JoinHandle`s.
pub fn spawn_all_sources(
    sources: &[Box<dyn PageSource>],
    sender: Sender<PageConfig>,
) -> Vec<JoinHandle<()>> {
    sources
        .iter()
        .map(|src| {
            info!(
                target: "linkbio::sources",
                source = %src.name(),
                "Starting source task"
            );
            src.start(sender.clone())
        })
        .collect()
}
