// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::storage::backend::{HistogramSnapshot, SampleBackend, SampleKey};
use orrery_core::telemetry::LatencySummary;
use std::sync::Mutex;

/// In-memory sample backend guarded by a single mutex.
///
/// One lock serializes every registry mutation: registration appends an
/// entry, `record` updates the summary and (while below capacity) the
/// sample sequence. Critical sections are O(1) in the number of
/// histograms and perform no I/O. The guard is scoped, so the lock is
/// released on every path through `record` — in particular on the
/// samples-full branch, where a manually paired unlock is easy to miss.
#[derive(Debug)]
pub struct InMemoryBackend {
    sample_capacity: usize,
    max_observable_ns: u64,
    entries: Mutex<Vec<SampleEntry>>,
}

#[derive(Debug)]
struct SampleEntry {
    name: String,
    summary: LatencySummary,
    samples: Vec<u64>,
}

impl InMemoryBackend {
    /// Creates a backend retaining up to `sample_capacity` raw values per
    /// histogram, with summaries bucketed up to `max_observable_ns`.
    pub fn new(sample_capacity: usize, max_observable_ns: u64) -> Self {
        Self {
            sample_capacity,
            max_observable_ns,
            entries: Mutex::new(Vec::new()),
        }
    }
}

impl SampleBackend for InMemoryBackend {
    fn register(&self, name: &str) -> SampleKey {
        let mut entries = match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        entries.push(SampleEntry {
            name: name.to_string(),
            summary: LatencySummary::new(self.max_observable_ns),
            samples: Vec::with_capacity(self.sample_capacity),
        });
        entries.len() - 1
    }

    fn record(&self, key: SampleKey, raw_ns: u64, clamped_ns: u64) {
        let mut entries = match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let Some(entry) = entries.get_mut(key) else {
            return;
        };
        entry.summary.observe(clamped_ns);
        // Strictly first-come, first-kept: once full, the summary is the
        // only record of later observations.
        if entry.samples.len() < self.sample_capacity {
            entry.samples.push(raw_ns);
        }
    }

    fn snapshot(&self) -> Vec<HistogramSnapshot> {
        let entries = match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        entries
            .iter()
            .map(|entry| HistogramSnapshot {
                name: entry.name.clone(),
                summary: entry.summary.clone(),
                samples: entry.samples.clone(),
            })
            .collect()
    }

    fn snapshot_one(&self, key: SampleKey) -> Option<HistogramSnapshot> {
        let entries = match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        entries.get(key).map(|entry| HistogramSnapshot {
            name: entry.name.clone(),
            summary: entry.summary.clone(),
            samples: entry.samples.clone(),
        })
    }

    fn histogram_count(&self) -> usize {
        match self.entries.lock() {
            Ok(guard) => guard.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    fn sample_capacity(&self) -> usize {
        self.sample_capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_register_and_record() {
        let backend = InMemoryBackend::new(1000, 1_000_000);
        let key = backend.register("testarch.web.web1");

        backend.record(key, 500, 500);
        backend.record(key, 2_000_000, 1_000_000);

        let snap = backend.snapshot_one(key).unwrap();
        assert_eq!(snap.name, "testarch.web.web1");
        assert_eq!(snap.samples, vec![500, 2_000_000]);
        assert_eq!(snap.summary.total_count(), 2);
        // The summary only ever sees clamped values.
        assert_eq!(snap.summary.max_ns(), Some(1_000_000));
    }

    #[test]
    fn test_registration_never_deduplicates() {
        let backend = InMemoryBackend::new(10, 1_000_000);
        let a = backend.register("testarch.web.web1");
        let b = backend.register("testarch.web.web1");
        assert_ne!(a, b);
        assert_eq!(backend.histogram_count(), 2);
    }

    #[test]
    fn test_samples_capped_but_summary_keeps_counting() {
        let backend = InMemoryBackend::new(3, 1_000_000);
        let key = backend.register("testarch.web.web1");

        for v in 0..10u64 {
            backend.record(key, v, v);
        }

        let snap = backend.snapshot_one(key).unwrap();
        assert_eq!(snap.samples, vec![0, 1, 2]);
        assert_eq!(snap.summary.total_count(), 10);
    }

    #[test]
    fn test_no_deadlock_once_samples_are_full() {
        // The next record after the cap is reached must still acquire and
        // release the lock; a leaked guard would hang this test.
        let backend = InMemoryBackend::new(1, 1_000_000);
        let key = backend.register("testarch.web.web1");

        backend.record(key, 1, 1); // fills the sequence exactly
        backend.record(key, 2, 2); // samples-full path
        backend.record(key, 3, 3); // and again

        assert_eq!(backend.snapshot_one(key).unwrap().summary.total_count(), 3);
        assert_eq!(backend.snapshot().len(), 1);
    }

    #[test]
    fn test_unknown_key_is_ignored() {
        let backend = InMemoryBackend::new(10, 1_000_000);
        backend.record(99, 1, 1);
        assert_eq!(backend.histogram_count(), 0);
        assert!(backend.snapshot_one(99).is_none());
    }

    #[test]
    fn test_concurrent_recording_loses_nothing() {
        let backend = Arc::new(InMemoryBackend::new(10_000, 1_000_000));
        let key = backend.register("testarch.web.web1");

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let backend = Arc::clone(&backend);
                std::thread::spawn(move || {
                    for v in 0..250u64 {
                        backend.record(key, v, v);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let snap = backend.snapshot_one(key).unwrap();
        assert_eq!(snap.summary.total_count(), 1000);
        assert_eq!(snap.samples.len(), 1000);
    }
}
