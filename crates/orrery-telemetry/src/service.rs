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

//! Top-level service tying the registry, persistence and export together.

use crate::config::CollectorConfig;
use crate::export::guesstimate::GuessExporter;
use crate::metrics::registry::{CollectorRegistry, HistogramHandle};
use crate::persist;
use orrery_core::error::CollectError;
use std::path::PathBuf;

/// Service owning the collector's shared state for the process lifetime.
///
/// The registry side is safe to use from any thread; the persistence and
/// export wrappers apply the checkpoint-tooling error policy: disabled
/// collection is a silent no-op, while output-path and descriptor
/// failures terminate the process. Callers needing `Result`s instead
/// should use [`persist::save_distribution`] and [`GuessExporter`]
/// directly.
#[derive(Debug)]
pub struct CollectorService {
    config: CollectorConfig,
    registry: CollectorRegistry,
}

impl CollectorService {
    /// Creates the service and its registry from `config`.
    pub fn new(config: CollectorConfig) -> Self {
        let registry = CollectorRegistry::new(&config);
        Self { config, registry }
    }

    /// Returns the configuration this service was built with.
    pub fn config(&self) -> &CollectorConfig {
        &self.config
    }

    /// Returns a reference to the histogram registry.
    pub fn registry(&self) -> &CollectorRegistry {
        &self.registry
    }

    /// Registers a new histogram; inert handle when collection is off.
    pub fn register_histogram(&self, name: impl Into<String>) -> HistogramHandle {
        self.registry.register_histogram(name)
    }

    /// Dumps one histogram's distribution to the csv directory.
    ///
    /// Silent no-op when collection is disabled; a failure to create the
    /// output file is fatal (misconfigured output directory).
    pub fn save_histogram(&self, handle: &HistogramHandle, name: &str, suffix: &str) {
        if !self.config.collect {
            return;
        }
        if let Err(e) = persist::save_distribution(&self.config.csv_dir, handle, name, suffix) {
            fatal(&e);
        }
    }

    /// Exports all registered histograms as a Guesstimate document.
    ///
    /// Returns immediately when no histograms are registered. A missing
    /// or invalid architecture descriptor, or a failure to write the
    /// export file, is fatal.
    pub fn export_guesses(&self, composite_name: &str) -> Option<PathBuf> {
        let exporter = GuessExporter::new(self.config.clone());
        match exporter.export_all(&self.registry, composite_name) {
            Ok(path) => path,
            Err(e) => fatal(&e),
        }
    }
}

/// Single exit point for the unrecoverable-setup-error policy.
fn fatal(err: &CollectError) -> ! {
    log::error!("{err}");
    std::process::exit(1);
}
