use std::collections::HashSet;

use super::normalize::normalize;
use crate::kernel::time::Timestamp;

/// Set-membership key for a processed statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey {
    pub normalized: String,
    pub bucket: u64,
}

/// Suppresses the same statement arriving more than once inside one fixed
/// time bucket.
///
/// Buckets are fixed windows, not a sliding window: two copies straddling a
/// bucket boundary are both processed.
#[derive(Debug)]
pub struct Deduplicator {
    bucket_ms: u64,
    seen: HashSet<DedupKey>,
}

impl Deduplicator {
    pub fn new(bucket_ms: u64) -> Self {
        Self {
            bucket_ms,
            seen: HashSet::new(),
        }
    }

    /// Returns true, and records the key, the first time `text` shows up in
    /// the bucket containing `now`.
    pub fn should_process(&mut self, text: &str, now: Timestamp) -> bool {
        let bucket = now.bucket(self.bucket_ms);
        // Only the current and previous buckets can still collide.
        self.seen.retain(|k| k.bucket + 1 >= bucket);

        let key = DedupKey {
            normalized: normalize(text),
            bucket,
        };
        self.seen.insert(key)
    }

    pub fn reset(&mut self) {
        self.seen.clear();
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
