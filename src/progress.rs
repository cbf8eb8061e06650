use tokio::sync::watch;

/// Counters shown by the thumbnail regeneration overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProgressSnapshot {
    pub entries_processed: usize,
    pub total_entries_to_process: usize,
    pub is_regenerating: bool,
}

impl ProgressSnapshot {
    pub fn regeneration_progress(&self) -> f64 {
        if self.total_entries_to_process == 0 {
            return 0.0;
        }

        (self.entries_processed as f64 / self.total_entries_to_process as f64).clamp(0.0, 1.0)
    }
}

/// Publishes regeneration progress to any number of observers.
pub struct RegenerationProgress {
    tx: watch::Sender<ProgressSnapshot>,
}

impl RegenerationProgress {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(ProgressSnapshot::default());
        Self { tx }
    }

    pub fn subscribe(&self) -> watch::Receiver<ProgressSnapshot> {
        self.tx.subscribe()
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        *self.tx.borrow()
    }

    pub fn begin(&self, total_entries_to_process: usize) {
        log::info!("Regenerating thumbnails for {total_entries_to_process} entries");
        self.tx.send_replace(ProgressSnapshot {
            entries_processed: 0,
            total_entries_to_process,
            is_regenerating: true,
        });
    }

    /// Saturates at the total.
    pub fn record_processed(&self) {
        self.tx.send_if_modified(|snapshot| {
            if snapshot.entries_processed < snapshot.total_entries_to_process {
                snapshot.entries_processed += 1;
                true
            } else {
                false
            }
        });
    }

    pub fn finish(&self) {
        self.tx.send_modify(|snapshot| snapshot.is_regenerating = false);
        let snapshot = self.snapshot();
        log::info!(
            "Thumbnail regeneration finished: {}/{}",
            snapshot.entries_processed,
            snapshot.total_entries_to_process
        );
    }
}

impl Default for RegenerationProgress {
    fn default() -> Self {
        Self::new()
    }
}
