//! Background preview loads reported back over a channel

use super::error::PreviewError;
use super::thumbnail::{decode_preview, PreviewImage};
use super::traits::PhotoSource;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Completion of one preview load
#[derive(Debug)]
pub struct PreviewMessage {
    /// Generation the load was started for
    pub generation: u64,
    pub result: Result<PreviewImage, PreviewError>,
}

/// Spawns preview loads and collects their completions
pub struct PreviewLoader<S: PhotoSource> {
    source: Arc<S>,
    tx: mpsc::UnboundedSender<PreviewMessage>,
    rx: mpsc::UnboundedReceiver<PreviewMessage>,
    max_width: u32,
    max_height: u32,
}

impl<S: PhotoSource + 'static> PreviewLoader<S> {
    pub fn new(source: S, max_width: u32, max_height: u32) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            source: Arc::new(source),
            tx,
            rx,
            max_width,
            max_height,
        }
    }

    /// Start loading `path` on the runtime; must be called inside a tokio context
    pub fn spawn(&self, generation: u64, path: PathBuf) -> JoinHandle<()> {
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        let (max_width, max_height) = (self.max_width, self.max_height);

        tokio::spawn(async move {
            let result = load(source.as_ref(), &path, max_width, max_height).await;
            if let Err(ref e) = result {
                tracing::warn!("Preview of {} failed: {e}", path.display());
            }
            if tx.send(PreviewMessage { generation, result }).is_err() {
                tracing::debug!("Preview receiver dropped before generation {generation} finished");
            }
        })
    }

    /// Take every completion that has arrived so far without waiting
    pub fn drain(&mut self) -> Vec<PreviewMessage> {
        let mut messages = Vec::new();
        while let Ok(message) = self.rx.try_recv() {
            messages.push(message);
        }
        messages
    }

    /// Wait for the next completion
    #[cfg(test)]
    pub async fn recv(&mut self) -> Option<PreviewMessage> {
        self.rx.recv().await
    }
}

async fn load<S: PhotoSource + ?Sized>(
    source: &S,
    path: &Path,
    max_width: u32,
    max_height: u32,
) -> Result<PreviewImage, PreviewError> {
    let bytes = source.read(path).await?;
    tokio::task::spawn_blocking(move || decode_preview(&bytes, max_width, max_height))
        .await
        .map_err(|e| PreviewError::Task(e.to_string()))?
}
