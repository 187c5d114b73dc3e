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

//! Per-histogram distribution dumps.
//!
//! An optional debugging aid, independent of the export pipeline: one
//! plain-text file per histogram, named from the decomposed architecture
//! and instance parts plus a caller-supplied suffix.

use crate::metrics::registry::HistogramHandle;
use orrery_core::error::{CollectError, CollectResult};
use orrery_core::names;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Writes `handle`'s distribution to `<csv_dir>/<arch>_<instance><suffix>.csv`.
///
/// `name` is passed explicitly so callers can dump under a different
/// composite identity than the one the histogram was registered with.
/// Returns `Ok(None)` without touching the filesystem when the handle is
/// inert. The output directory must already exist; failure to create the
/// file reports [`CollectError::OutputPath`], which the service layer
/// treats as a fatal deployment error.
pub fn save_distribution(
    csv_dir: &Path,
    handle: &HistogramHandle,
    name: &str,
    suffix: &str,
) -> CollectResult<Option<PathBuf>> {
    let Some(snapshot) = handle.snapshot() else {
        return Ok(None);
    };

    let path = csv_dir.join(format!(
        "{}_{}{}.csv",
        names::arch_part(name),
        names::instance_part(name),
        suffix
    ));
    let file = File::create(&path).map_err(|source| CollectError::OutputPath {
        path: path.clone(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    snapshot
        .summary
        .write_distribution(&mut writer)
        .and_then(|()| writer.flush())
        .map_err(|source| CollectError::OutputPath {
            path: path.clone(),
            source,
        })?;

    log::debug!("Saved distribution for {name} to {}", path.display());
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CollectorConfig;
    use crate::metrics::registry::CollectorRegistry;
    use orrery_core::telemetry::LatencySummary;

    #[test]
    fn test_inert_handle_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let result = save_distribution(
            dir.path(),
            &HistogramHandle::inert(),
            "testarch.web.web1",
            "_sample",
        );
        assert!(matches!(result, Ok(None)));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_dump_round_trips_total_count() {
        let dir = tempfile::tempdir().unwrap();
        let registry = CollectorRegistry::new(&CollectorConfig::enabled());
        let handle = registry.register_histogram("testarch.us-east.zoneA.web.web1");
        for v in [10u64, 20, 30, 2_000_000] {
            handle.observe_ns(v);
        }

        let path = save_distribution(dir.path(), &handle, "testarch.us-east.zoneA.web.web1", "_s")
            .unwrap()
            .unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "testarch_web1_s.csv"
        );

        let text = std::fs::read_to_string(&path).unwrap();
        let parsed = LatencySummary::parse_distribution(&text).unwrap();
        assert_eq!(parsed.total_count(), 4);
    }

    #[test]
    fn test_missing_directory_is_an_output_path_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let registry = CollectorRegistry::new(&CollectorConfig::enabled());
        let handle = registry.register_histogram("testarch.web.web1");
        handle.observe_ns(1);

        let err = save_distribution(&missing, &handle, "testarch.web.web1", "").unwrap_err();
        assert!(matches!(err, CollectError::OutputPath { .. }));
    }
}
