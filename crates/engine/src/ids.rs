//! Monotonic identifier generation.
//!
//! Every week, document and upload gets its id from a counter, so two files
//! with the same name in the same batch can never collide.

use std::sync::atomic::{AtomicU64, Ordering};

use visadesk_types::{DocumentId, UploadId, WeekId};

/// Thread-safe monotonic counter.
#[derive(Debug)]
pub struct IdGenerator {
    next: AtomicU64,
}

impl IdGenerator {
    /// Creates a generator whose first issued value is `first`.
    pub const fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }

    pub fn next_raw(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }

    pub fn next_week_id(&self) -> WeekId {
        WeekId(self.next_raw())
    }

    pub fn next_document_id(&self) -> DocumentId {
        DocumentId(self.next_raw())
    }

    pub fn next_upload_id(&self) -> UploadId {
        UploadId(self.next_raw())
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashSet, sync::Arc, thread};

    use super::*;

    #[test]
    fn issues_increasing_values() {
        let ids = IdGenerator::starting_at(10);
        assert_eq!(ids.next_week_id(), WeekId(10));
        assert_eq!(ids.next_document_id(), DocumentId(11));
        assert_eq!(ids.next_upload_id(), UploadId(12));
    }

    #[test]
    fn unique_across_threads() {
        let ids = Arc::new(IdGenerator::default());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let ids = Arc::clone(&ids);
                thread::spawn(move || (0..250).map(|_| ids.next_raw()).collect::<Vec<_>>())
            })
            .collect();
        let mut seen = HashSet::new();
        for handle in handles {
            for value in handle.join().expect("thread panicked") {
                assert!(seen.insert(value), "duplicate id {value}");
            }
        }
        assert_eq!(seen.len(), 1000);
    }
}
