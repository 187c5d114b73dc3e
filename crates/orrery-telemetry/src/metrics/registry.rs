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

//! Registry for latency histograms.

use crate::config::CollectorConfig;
use crate::storage::backend::{HistogramSnapshot, SampleBackend, SampleKey};
use crate::storage::memory_backend::InMemoryBackend;
use std::sync::Arc;
use std::time::Duration;

/// Central registry for latency histograms.
///
/// Shared by every concurrent reporter in the simulation: components
/// register histograms here and record observations through the returned
/// [`HistogramHandle`]s. The exporter reads the accumulated state through
/// [`snapshot`](Self::snapshot). Construct one registry at process start
/// and pass it by reference (or clone it; clones share the backend).
#[derive(Debug, Clone)]
pub struct CollectorRegistry {
    backend: Arc<dyn SampleBackend>,
    enabled: bool,
    max_observable_ns: u64,
}

impl CollectorRegistry {
    /// Creates a registry with the default in-memory backend, sized and
    /// gated by `config`.
    pub fn new(config: &CollectorConfig) -> Self {
        Self::with_backend(
            config,
            Arc::new(InMemoryBackend::new(
                config.sample_capacity,
                config.max_observable_ns,
            )),
        )
    }

    /// Creates a registry over a custom backend.
    pub fn with_backend(config: &CollectorConfig, backend: Arc<dyn SampleBackend>) -> Self {
        Self {
            backend,
            enabled: config.collect,
            max_observable_ns: config.max_observable_ns,
        }
    }

    /// Registers a new histogram under `name`.
    ///
    /// Returns an inert handle when the name is empty or collection is
    /// disabled; every operation on an inert handle is a no-op.
    pub fn register_histogram(&self, name: impl Into<String>) -> HistogramHandle {
        let name = name.into();
        if name.is_empty() || !self.enabled {
            return HistogramHandle::inert();
        }
        let key = self.backend.register(&name);
        log::trace!("Registered histogram: {name}");
        HistogramHandle {
            inner: Some(HandleInner {
                name,
                key,
                backend: self.backend.clone(),
                max_observable_ns: self.max_observable_ns,
            }),
        }
    }

    /// Whether collection is enabled for this registry.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Number of registered histograms.
    pub fn histogram_count(&self) -> usize {
        self.backend.histogram_count()
    }

    /// Takes a consistent point-in-time snapshot of every histogram.
    pub fn snapshot(&self) -> Vec<HistogramSnapshot> {
        self.backend.snapshot()
    }
}

/// Handle for recording observations into one histogram.
///
/// Cheap to clone and safe to share across threads. An inert handle (from
/// a disabled registry or an empty name) silently ignores every call, so
/// call sites need no enabled-checks of their own.
#[derive(Debug, Clone)]
pub struct HistogramHandle {
    inner: Option<HandleInner>,
}

#[derive(Debug, Clone)]
struct HandleInner {
    name: String,
    key: SampleKey,
    backend: Arc<dyn SampleBackend>,
    max_observable_ns: u64,
}

impl HistogramHandle {
    /// A handle on which every operation is a no-op.
    pub fn inert() -> Self {
        Self { inner: None }
    }

    /// Whether this handle records into a live histogram.
    pub fn is_live(&self) -> bool {
        self.inner.is_some()
    }

    /// The histogram name, if the handle is live.
    pub fn name(&self) -> Option<&str> {
        self.inner.as_ref().map(|inner| inner.name.as_str())
    }

    /// Records one latency observation.
    pub fn observe(&self, latency: Duration) {
        // u64 nanoseconds cover ~584 years of latency.
        self.observe_ns(latency.as_nanos().min(u64::MAX as u128) as u64);
    }

    /// Records one latency observation given in nanoseconds.
    ///
    /// The statistical summary sees the value clamped to the observation
    /// ceiling (extreme latencies count, at the ceiling); the bounded raw
    /// sample keeps the unclamped value.
    pub fn observe_ns(&self, latency_ns: u64) {
        let Some(inner) = &self.inner else {
            return;
        };
        let clamped = latency_ns.min(inner.max_observable_ns);
        inner.backend.record(inner.key, latency_ns, clamped);
    }

    /// Snapshots this histogram's accumulated state, if live.
    pub fn snapshot(&self) -> Option<HistogramSnapshot> {
        let inner = self.inner.as_ref()?;
        inner.backend.snapshot_one(inner.key)
    }
}
