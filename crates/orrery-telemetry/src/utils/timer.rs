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

//! Provides RAII-based timers for automatically recording latencies.

use crate::metrics::registry::HistogramHandle;
use std::time::Instant;

/// Times the duration of a scope and records it into a histogram when
/// dropped, so the measurement lands even on early returns.
pub struct ScopedLatencyTimer<'a> {
    started: Instant,
    histogram: &'a HistogramHandle,
}

impl<'a> ScopedLatencyTimer<'a> {
    /// Creates a new timer for the given histogram and starts it immediately.
    pub fn new(histogram: &'a HistogramHandle) -> Self {
        Self {
            started: Instant::now(),
            histogram,
        }
    }
}

impl Drop for ScopedLatencyTimer<'_> {
    fn drop(&mut self) {
        self.histogram.observe(self.started.elapsed());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CollectorConfig;
    use crate::metrics::registry::CollectorRegistry;

    #[test]
    fn test_timer_records_on_drop() {
        let registry = CollectorRegistry::new(&CollectorConfig::enabled());
        let handle = registry.register_histogram("testarch.web.web1");

        {
            let _timer = ScopedLatencyTimer::new(&handle);
        }

        assert_eq!(handle.snapshot().unwrap().summary.total_count(), 1);
    }

    #[test]
    fn test_timer_on_inert_handle_is_a_no_op() {
        let handle = HistogramHandle::inert();
        {
            let _timer = ScopedLatencyTimer::new(&handle);
        }
        assert!(handle.snapshot().is_none());
    }
}
