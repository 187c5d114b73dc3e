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

//! Latency collection for the orrery simulator.
//!
//! This crate owns the concurrent sampling registry, the per-histogram
//! distribution dumps and the Guesstimate export pipeline. Simulated
//! components register histograms through [`CollectorRegistry`] and record
//! observations via cheap, clonable [`HistogramHandle`]s; at checkpoint
//! time [`GuessExporter`] reconciles the accumulated samples against the
//! architecture descriptor and emits a single export document.
//!
//! All of it is gated by the `collect` flag on [`CollectorConfig`]: with
//! collection disabled, handles are inert and every entry point is a
//! silent no-op.

pub mod config;
pub mod export;
pub mod metrics;
pub mod persist;
pub mod service;
pub mod storage;
pub mod utils;

pub use self::config::CollectorConfig;
pub use self::export::grid::{CellAddresser, GridCell, LetterGrid};
pub use self::export::guesstimate::GuessExporter;
pub use self::metrics::registry::{CollectorRegistry, HistogramHandle};
pub use self::service::CollectorService;
pub use self::storage::backend::{HistogramSnapshot, SampleBackend};
pub use self::storage::memory_backend::InMemoryBackend;
pub use self::utils::timer::ScopedLatencyTimer;
