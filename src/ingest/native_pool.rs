//! Background threads for image ingestion (native only)
//!
//! Every submitted file gets its own thread that reads, rescales and encodes
//! it, then posts an [`IngestEvent`] on a shared channel. The frontend drains
//! the channel between commands; events come out in completion order.

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread;
use std::time::Duration;

use super::{IngestEvent, IngestSettings, ingest_image};
use crate::error::IngestError;

/// Spawns one ingestion thread per file and collects their results.
pub struct IngestPool {
    /// Sender cloned into each worker thread
    event_tx: Sender<IngestEvent>,
    /// Receiver for finished ingestions
    event_rx: Receiver<IngestEvent>,
    /// Rescale/encode parameters handed to each worker
    settings: IngestSettings,
    /// Counter used to name worker threads
    next_id: u32,
    /// Number of submitted files whose event has not been taken yet
    pending: usize,
}

impl IngestPool {
    /// Create an empty pool.
    pub fn new(settings: IngestSettings) -> Self {
        let (event_tx, event_rx) = mpsc::channel();
        Self {
            event_tx,
            event_rx,
            settings,
            next_id: 0,
            pending: 0,
        }
    }

    /// Start ingesting `path` on a new thread.
    pub fn submit(&mut self, path: PathBuf) -> std::io::Result<()> {
        let id = self.next_id;
        self.next_id += 1;

        let tx = self.event_tx.clone();
        let settings = self.settings;
        thread::Builder::new()
            .name(format!("ingest-{}", id))
            .spawn(move || {
                let event = Self::ingest_file(path, &settings);
                if tx.send(event).is_err() {
                    log::warn!("Ingest channel closed, dropping result {}", id);
                }
            })?;

        self.pending += 1;
        log::debug!("Submitted ingest task {}", id);
        Ok(())
    }

    fn ingest_file(path: PathBuf, settings: &IngestSettings) -> IngestEvent {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let result = std::fs::read(&path)
            .map_err(|source| IngestError::Read {
                name: name.clone(),
                source,
            })
            .and_then(|data| ingest_image(&data, settings));

        IngestEvent { name, result }
    }

    /// Take one finished event without blocking.
    pub fn try_next(&mut self) -> Option<IngestEvent> {
        match self.event_rx.try_recv() {
            Ok(event) => {
                self.pending = self.pending.saturating_sub(1);
                Some(event)
            }
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Wait up to `timeout` for the next finished event.
    pub fn next_timeout(&mut self, timeout: Duration) -> Option<IngestEvent> {
        if self.pending == 0 {
            return None;
        }
        match self.event_rx.recv_timeout(timeout) {
            Ok(event) => {
                self.pending = self.pending.saturating_sub(1);
                Some(event)
            }
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Number of tasks still running or waiting to be taken.
    pub fn pending(&self) -> usize {
        self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::test_util::png_bytes;
    use crate::model::Orientation;

    const WAIT: Duration = Duration::from_secs(10);

    #[test]
    fn test_pool_ingests_every_file() {
        let dir = tempfile::tempdir().unwrap();
        let wide = dir.path().join("wide.png");
        let tall = dir.path().join("tall.png");
        std::fs::write(&wide, png_bytes(40, 20)).unwrap();
        std::fs::write(&tall, png_bytes(20, 40)).unwrap();

        let mut pool = IngestPool::new(IngestSettings::default());
        pool.submit(wide).unwrap();
        pool.submit(tall).unwrap();
        assert_eq!(pool.pending(), 2);

        let mut events = Vec::new();
        while let Some(event) = pool.next_timeout(WAIT) {
            events.push(event);
        }
        assert_eq!(pool.pending(), 0);

        // Completion order is unspecified
        events.sort_by(|a, b| a.name.cmp(&b.name));
        let orientations: Vec<_> = events
            .iter()
            .map(|e| e.result.as_ref().unwrap().orientation)
            .collect();
        assert_eq!(orientations, [Orientation::Portrait, Orientation::Landscape]);
    }

    #[test]
    fn test_missing_file_reports_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut pool = IngestPool::new(IngestSettings::default());
        pool.submit(dir.path().join("gone.jpg")).unwrap();

        let event = pool.next_timeout(WAIT).unwrap();
        assert_eq!(event.name, "gone.jpg");
        assert!(matches!(event.result, Err(IngestError::Read { .. })));
    }

    #[test]
    fn test_idle_pool_returns_nothing() {
        let mut pool = IngestPool::new(IngestSettings::default());
        assert!(pool.try_next().is_none());
        assert!(pool.next_timeout(Duration::from_millis(1)).is_none());
    }
}
