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

use orrery_core::telemetry::LatencySummary;
use std::fmt::Debug;

/// Opaque key identifying one registered histogram within a backend.
pub type SampleKey = usize;

/// Trait defining the interface for sample storage backends.
///
/// A backend owns, per histogram, the statistical summary and the bounded
/// raw-sample sequence. Registration is append-only and never deduplicates:
/// callers are responsible for not double-creating a histogram under the
/// same name.
pub trait SampleBackend: Send + Sync + Debug + 'static {
    /// Registers a new histogram and returns its key.
    fn register(&self, name: &str) -> SampleKey;

    /// Records one observation: `clamped_ns` goes into the statistical
    /// summary, `raw_ns` into the bounded sample sequence (only while the
    /// sequence is below capacity). Must hold no lock across I/O and must
    /// release any lock on every path, including the samples-full branch.
    fn record(&self, key: SampleKey, raw_ns: u64, clamped_ns: u64);

    /// Returns a consistent point-in-time snapshot of every histogram,
    /// in registration order.
    fn snapshot(&self) -> Vec<HistogramSnapshot>;

    /// Snapshots a single histogram, if the key is known.
    fn snapshot_one(&self, key: SampleKey) -> Option<HistogramSnapshot>;

    /// Number of registered histograms.
    fn histogram_count(&self) -> usize;

    /// The raw-sample capacity applied to every histogram.
    fn sample_capacity(&self) -> usize;
}

/// A point-in-time copy of one histogram's accumulated state.
#[derive(Debug, Clone)]
pub struct HistogramSnapshot {
    /// The composite histogram name.
    pub name: String,
    /// The statistical summary at snapshot time.
    pub summary: LatencySummary,
    /// The bounded raw samples retained so far, in arrival order.
    pub samples: Vec<u64>,
}
