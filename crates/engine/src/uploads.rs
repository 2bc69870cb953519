//! Simulated upload pipeline.
//!
//! Files pass a per-file validation gate, get an [`UploadId`] up front, and
//! then wait in a FIFO queue. Each [`UploadQueue::tick`] advances the head of
//! the queue by [`PROGRESS_STEP`]; when it reaches 100 the upload is handed
//! back to the caller as a [`CompletedUpload`]. Nothing here owns a timer, so
//! dropping or clearing the queue cancels every in-flight upload.

use std::{collections::VecDeque, sync::Arc, time::Duration};

use indexmap::IndexMap;
use tracing::{debug, info, warn};
use visadesk_types::{
    BatchReport, CompletedUpload, FileMeta, MAX_UPLOAD_BYTES, UploadId, UploadRejection, WeekId, is_allowed_mime_type,
};
use visadesk_util::format_size;

use crate::ids::IdGenerator;

/// Percentage points added to the active upload on every tick.
pub const PROGRESS_STEP: u8 = 10;

/// Interval at which the owner is expected to call [`UploadQueue::tick`].
pub const UPLOAD_TICK: Duration = Duration::from_millis(200);

/// Checks a single file against the size limit, then the MIME allow-list.
pub fn validate_file(file: &FileMeta) -> Result<(), UploadRejection> {
    if file.size_bytes > MAX_UPLOAD_BYTES {
        let (mut size_label, mut limit_label) = (format_size(file.size_bytes), format_size(MAX_UPLOAD_BYTES));
        // Just over the limit both round to the same label.
        if size_label == limit_label {
            size_label = format!("{} bytes", file.size_bytes);
            limit_label = format!("{MAX_UPLOAD_BYTES} bytes");
        }
        return Err(UploadRejection::TooLarge {
            name: file.name.clone(),
            size_label,
            limit_label,
        });
    }
    if !is_allowed_mime_type(&file.mime_type) {
        return Err(UploadRejection::UnsupportedType {
            name: file.name.clone(),
            mime_type: file.mime_type.clone(),
        });
    }
    Ok(())
}

#[derive(Debug, Clone)]
struct PendingUpload {
    id: UploadId,
    week_id: WeekId,
    file: FileMeta,
}

/// Progress row for rendering a gauge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadProgress<'a> {
    pub id: UploadId,
    pub file_name: &'a str,
    pub percent: u8,
}

#[derive(Debug)]
pub struct UploadQueue {
    ids: Arc<IdGenerator>,
    pending: VecDeque<PendingUpload>,
    progress: IndexMap<UploadId, u8>,
}

impl UploadQueue {
    pub fn new(ids: Arc<IdGenerator>) -> Self {
        Self {
            ids,
            pending: VecDeque::new(),
            progress: IndexMap::new(),
        }
    }

    /// Validates every file and queues the accepted ones in batch order.
    ///
    /// A rejected file never blocks the rest of the batch.
    pub fn enqueue_batch(&mut self, week_id: WeekId, files: impl IntoIterator<Item = FileMeta>) -> BatchReport {
        let mut report = BatchReport::default();
        for file in files {
            match validate_file(&file) {
                Ok(()) => {
                    let id = self.ids.next_upload_id();
                    info!(upload = %id, week = %week_id, file = %file.name, "upload queued");
                    self.progress.insert(id, 0);
                    self.pending.push_back(PendingUpload { id, week_id, file });
                    report.accepted.push(id);
                }
                Err(rejection) => {
                    warn!(week = %week_id, file = rejection.file_name(), error = %rejection, "upload rejected");
                    report.rejected.push(rejection);
                }
            }
        }
        report
    }

    /// Advances the head of the queue; returns it once it reaches 100%.
    pub fn tick(&mut self) -> Option<CompletedUpload> {
        let head = self.pending.front()?;
        let percent = self.progress.entry(head.id).or_insert(0);
        *percent = percent.saturating_add(PROGRESS_STEP).min(100);
        debug!(upload = %head.id, percent = *percent, "upload progress");
        if *percent < 100 {
            return None;
        }

        let finished = self.pending.pop_front()?;
        self.progress.shift_remove(&finished.id);
        Some(CompletedUpload {
            upload_id: finished.id,
            week_id: finished.week_id,
            file: finished.file,
        })
    }

    /// Drops one upload. Returns `false` when the id is not tracked.
    pub fn cancel(&mut self, upload_id: UploadId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|upload| upload.id != upload_id);
        self.progress.shift_remove(&upload_id);
        let cancelled = self.pending.len() != before;
        if cancelled {
            info!(upload = %upload_id, "upload cancelled");
        }
        cancelled
    }

    /// Drops every upload targeting `week_id`, returning how many were removed.
    pub fn cancel_week(&mut self, week_id: WeekId) -> usize {
        let ids: Vec<UploadId> = self
            .pending
            .iter()
            .filter(|upload| upload.week_id == week_id)
            .map(|upload| upload.id)
            .collect();
        for id in &ids {
            self.progress.shift_remove(id);
        }
        self.pending.retain(|upload| upload.week_id != week_id);
        if !ids.is_empty() {
            info!(week = %week_id, count = ids.len(), "uploads cancelled for week");
        }
        ids.len()
    }

    /// Drops everything. Called when the owning view is torn down.
    pub fn cancel_all(&mut self) -> usize {
        let count = self.pending.len();
        self.pending.clear();
        self.progress.clear();
        if count > 0 {
            info!(count, "all uploads cancelled");
        }
        count
    }

    /// Percent complete for every tracked upload, in queue order.
    pub fn progress(&self) -> &IndexMap<UploadId, u8> {
        &self.progress
    }

    pub fn progress_for_week(&self, week_id: WeekId) -> Vec<UploadProgress<'_>> {
        self.pending
            .iter()
            .filter(|upload| upload.week_id == week_id)
            .map(|upload| UploadProgress {
                id: upload.id,
                file_name: &upload.file.name,
                percent: self.progress.get(&upload.id).copied().unwrap_or_default(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queue() -> UploadQueue {
        UploadQueue::new(Arc::new(IdGenerator::default()))
    }

    fn pdf(name: &str) -> FileMeta {
        FileMeta::new(name, "application/pdf", 2048)
    }

    #[test]
    fn size_limit_is_inclusive() {
        assert!(validate_file(&FileMeta::new("ok.pdf", "application/pdf", MAX_UPLOAD_BYTES)).is_ok());
        let error = validate_file(&FileMeta::new("big.pdf", "application/pdf", MAX_UPLOAD_BYTES + 1))
            .expect_err("over the limit");
        assert_eq!(
            error.to_string(),
            "File \"big.pdf\" is too large (10485761 bytes); the maximum size is 10485760 bytes"
        );
    }

    #[test]
    fn clearly_oversized_files_use_rounded_sizes() {
        let error = validate_file(&FileMeta::new("scan.png", "image/png", 12 * 1024 * 1024)).expect_err("too large");
        assert!(matches!(
            error,
            UploadRejection::TooLarge { ref size_label, ref limit_label, .. }
                if size_label == "12.0 MB" && limit_label == "10.0 MB"
        ));
    }

    #[test]
    fn size_is_checked_before_type() {
        let error = validate_file(&FileMeta::new("big.zip", "application/zip", MAX_UPLOAD_BYTES + 1))
            .expect_err("rejected");
        assert!(matches!(error, UploadRejection::TooLarge { .. }));
    }

    #[test]
    fn rejection_does_not_block_batch() {
        let mut queue = queue();
        let report = queue.enqueue_batch(
            WeekId(1),
            vec![pdf("a.pdf"), FileMeta::new("b.zip", "application/zip", 10), pdf("c.pdf")],
        );
        assert_eq!(report.accepted.len(), 2);
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].file_name(), "b.zip");
        assert_eq!(queue.progress().len(), 2);
    }

    #[test]
    fn only_head_advances() {
        let mut queue = queue();
        let report = queue.enqueue_batch(WeekId(1), vec![pdf("a.pdf"), pdf("b.pdf")]);
        queue.tick();
        queue.tick();
        let progress: Vec<u8> = queue.progress().values().copied().collect();
        assert_eq!(progress, vec![20, 0]);
        assert_eq!(queue.progress().keys().copied().collect::<Vec<_>>(), report.accepted);
    }

    #[test]
    fn completes_after_ten_ticks_in_order() {
        let mut queue = queue();
        queue.enqueue_batch(WeekId(3), vec![pdf("a.pdf"), pdf("b.pdf")]);
        let completed: Vec<CompletedUpload> = (0..20).filter_map(|_| queue.tick()).collect();
        assert_eq!(completed.len(), 2);
        assert_eq!(completed[0].file.name, "a.pdf");
        assert_eq!(completed[1].file.name, "b.pdf");
        assert!(completed.iter().all(|upload| upload.week_id == WeekId(3)));
        assert!(queue.is_idle());
        assert!(queue.progress().is_empty());
        assert_eq!(queue.tick(), None);
    }

    #[test]
    fn same_name_files_get_distinct_ids() {
        let mut queue = queue();
        let report = queue.enqueue_batch(WeekId(1), vec![pdf("same.pdf"), pdf("same.pdf")]);
        assert_ne!(report.accepted[0], report.accepted[1]);
    }

    #[test]
    fn cancel_variants() {
        let mut queue = queue();
        let first = queue.enqueue_batch(WeekId(1), vec![pdf("a.pdf"), pdf("b.pdf")]);
        queue.enqueue_batch(WeekId(2), vec![pdf("c.pdf")]);

        assert!(queue.cancel(first.accepted[0]));
        assert!(!queue.cancel(first.accepted[0]));
        assert_eq!(queue.cancel_week(WeekId(1)), 1);
        assert_eq!(queue.progress_for_week(WeekId(2)).len(), 1);
        assert_eq!(queue.cancel_all(), 1);
        assert!(queue.is_idle());
        assert!(queue.progress().is_empty());
    }

    #[test]
    fn cancelled_head_lets_next_upload_advance() {
        let mut queue = queue();
        let report = queue.enqueue_batch(WeekId(1), vec![pdf("a.pdf"), pdf("b.pdf")]);
        queue.tick();
        queue.cancel(report.accepted[0]);
        queue.tick();
        assert_eq!(queue.progress().get(&report.accepted[1]), Some(&10));
    }
}
