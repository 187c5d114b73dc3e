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

//! Building and writing the Guesstimate export document.

use crate::config::CollectorConfig;
use crate::export::grid::{CellAddresser, LetterGrid};
use crate::metrics::registry::CollectorRegistry;
use crate::storage::backend::HistogramSnapshot;
use orrery_core::arch::{ArchDescriptor, ServiceSpec};
use orrery_core::error::{CollectError, CollectResult};
use orrery_core::guess::{
    Guess, GuessGraph, GuessMetric, GuessMetricLocation, GuessSpace, Guesstimate,
    GUESSTIMATE_TYPE_DATA,
};
use orrery_core::names;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

const SPACE_DESCRIPTION: &str = "Guesstimate model generated by the orrery simulator";

/// Builds the export document from the registry's accumulated samples and
/// the architecture descriptor, and writes it as JSON.
///
/// Each registered histogram becomes one metric/guesstimate pair on a
/// letter-addressed grid; histograms past the grid capacity are dropped.
/// Per metric, the exporter ships either the raw empirical samples (type
/// `DATA`) or, when a descriptor service with `useCustomGuesstimate`
/// matches, that service's symbolic override with the data omitted.
#[derive(Debug)]
pub struct GuessExporter {
    config: CollectorConfig,
    addresser: Box<dyn CellAddresser>,
}

impl GuessExporter {
    /// Creates an exporter using the default 26x26 letter grid.
    pub fn new(config: CollectorConfig) -> Self {
        Self::with_addresser(config, Box::<LetterGrid>::default())
    }

    /// Creates an exporter with a custom cell-addressing strategy.
    pub fn with_addresser(config: CollectorConfig, addresser: Box<dyn CellAddresser>) -> Self {
        Self { config, addresser }
    }

    /// Exports every registered histogram for the architecture named by
    /// `composite_name`'s architecture part.
    ///
    /// Returns `Ok(None)` without any file I/O when the registry holds no
    /// histograms. A missing, unreadable or invalid architecture
    /// descriptor is an error: the export cannot decide overrides without
    /// knowing which services exist.
    pub fn export_all(
        &self,
        registry: &CollectorRegistry,
        composite_name: &str,
    ) -> CollectResult<Option<PathBuf>> {
        if registry.histogram_count() == 0 {
            return Ok(None);
        }

        let arch = names::arch_part(composite_name);
        let descriptor = self.load_descriptor(arch)?;
        let snapshot = registry.snapshot();
        log::info!("Saving {} histograms for Guesstimate", snapshot.len());

        let guess = self.build_document(arch, &descriptor, snapshot);
        let path = self
            .config
            .json_metrics_dir
            .join(format!("{arch}.json"));
        let file = File::create(&path).map_err(|source| CollectError::OutputPath {
            path: path.clone(),
            source,
        })?;
        serde_json::to_writer_pretty(BufWriter::new(file), &guess)
            .map_err(|e| CollectError::Serialize(e.to_string()))?;

        log::info!("Wrote Guesstimate export to {}", path.display());
        Ok(Some(path))
    }

    fn load_descriptor(&self, arch: &str) -> CollectResult<ArchDescriptor> {
        let path = self.config.arch_dir.join(format!("{arch}_arch.json"));
        let bytes = std::fs::read(&path).map_err(|source| CollectError::DescriptorUnavailable {
            path: path.clone(),
            source,
        })?;
        serde_json::from_slice(&bytes).map_err(|e| CollectError::DescriptorInvalid {
            path,
            message: e.to_string(),
        })
    }

    fn build_document(
        &self,
        arch: &str,
        descriptor: &ArchDescriptor,
        snapshot: Vec<HistogramSnapshot>,
    ) -> Guess {
        let mut metrics = Vec::with_capacity(snapshot.len().min(self.addresser.capacity()));
        let mut guesstimates = Vec::with_capacity(metrics.capacity());

        for (index, histogram) in snapshot.into_iter().enumerate() {
            let Some(cell) = self.addresser.cell(index) else {
                log::warn!(
                    "Export grid full ({} cells); dropping remaining histograms",
                    self.addresser.capacity()
                );
                break;
            };
            let id = cell.label();

            let (guesstimate_type, expression, data) =
                match resolve_override(descriptor, &histogram.name) {
                    Some(service) => (
                        service.guesstimate_type.clone(),
                        service.guesstimate_value.clone(),
                        None,
                    ),
                    None => (
                        GUESSTIMATE_TYPE_DATA.to_string(),
                        String::new(),
                        Some(histogram.samples),
                    ),
                };

            metrics.push(GuessMetric {
                id: id.clone(),
                readable_id: id.clone(),
                name: histogram.name,
                location: GuessMetricLocation {
                    row: cell.row,
                    col: cell.col,
                },
            });
            guesstimates.push(Guesstimate {
                metric: id,
                expression,
                guesstimate_type,
                data,
            });
        }

        Guess {
            space: GuessSpace {
                name: arch.to_string(),
                description: SPACE_DESCRIPTION.to_string(),
                is_private: "true".to_string(),
                graph: GuessGraph {
                    metrics,
                    guesstimates,
                },
            },
        }
    }
}

/// Finds the custom-guesstimate service governing `histogram_name`, if any.
///
/// Matching is substring containment of the service name within the
/// histogram name. When several services match, the last one in the
/// descriptor's list order wins; that tie-break is inherited behavior and
/// is pinned by a test below.
fn resolve_override<'a>(
    descriptor: &'a ArchDescriptor,
    histogram_name: &str,
) -> Option<&'a ServiceSpec> {
    if descriptor.arch.is_empty() {
        return None;
    }
    descriptor
        .services
        .iter()
        .filter(|service| !service.name.is_empty() && histogram_name.contains(&service.name))
        .next_back()
        .filter(|service| service.use_custom_guesstimate)
}
