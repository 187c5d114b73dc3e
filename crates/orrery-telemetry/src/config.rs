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

//! Collector configuration.
//!
//! Constructed once at process start and injected into every component
//! that records or exports metrics. There is no process-global state; the
//! enable flag travels with the config object.

use serde::Deserialize;
use std::path::PathBuf;

/// Default cap on raw sample values retained per histogram.
pub const DEFAULT_SAMPLE_CAPACITY: usize = 1000;

/// Default observation ceiling: one millisecond, in nanoseconds.
/// Summary observations above it are recorded at the ceiling.
pub const DEFAULT_MAX_OBSERVABLE_NS: u64 = 1_000_000;

/// Configuration for the collector subsystem.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CollectorConfig {
    /// Master switch. When false, histogram creation yields inert handles
    /// and every persistence/export entry point is a silent no-op.
    pub collect: bool,
    /// Cap on raw sample values retained per histogram; the statistical
    /// summary keeps counting once the cap is reached.
    pub sample_capacity: usize,
    /// Ceiling for summary observations, in nanoseconds.
    pub max_observable_ns: u64,
    /// Directory receiving per-histogram distribution dumps.
    pub csv_dir: PathBuf,
    /// Directory receiving export documents.
    pub json_metrics_dir: PathBuf,
    /// Directory holding architecture descriptors.
    pub arch_dir: PathBuf,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            collect: false,
            sample_capacity: DEFAULT_SAMPLE_CAPACITY,
            max_observable_ns: DEFAULT_MAX_OBSERVABLE_NS,
            csv_dir: PathBuf::from("csv_metrics"),
            json_metrics_dir: PathBuf::from("json_metrics"),
            arch_dir: PathBuf::from("json_arch"),
        }
    }
}

impl CollectorConfig {
    /// A default configuration with collection switched on.
    pub fn enabled() -> Self {
        Self {
            collect: true,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CollectorConfig::default();
        assert!(!config.collect);
        assert_eq!(config.sample_capacity, 1000);
        assert_eq!(config.max_observable_ns, 1_000_000);
        assert_eq!(config.csv_dir, PathBuf::from("csv_metrics"));
    }

    #[test]
    fn test_deserialize_partial() {
        let config: CollectorConfig =
            serde_json::from_str(r#"{"collect": true, "sample_capacity": 10}"#).unwrap();
        assert!(config.collect);
        assert_eq!(config.sample_capacity, 10);
        assert_eq!(config.arch_dir, PathBuf::from("json_arch"));
    }
}
