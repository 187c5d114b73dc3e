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

//! Core types and interface contracts for the orrery latency collector.
//!
//! This crate defines the "common language" of the collector: the latency
//! summary primitive, the architecture-descriptor and export-document data
//! models, composite-name decomposition, and the shared error type. It
//! contains no I/O and no locking; `orrery-telemetry` builds the concurrent
//! registry and the export pipeline on top of these contracts.

pub mod arch;
pub mod error;
pub mod guess;
pub mod names;
pub mod telemetry;

pub use self::arch::{ArchDescriptor, ServiceSpec};
pub use self::error::{CollectError, CollectResult};
pub use self::guess::{Guess, GuessGraph, GuessMetric, GuessMetricLocation, GuessSpace, Guesstimate};
pub use self::telemetry::LatencySummary;
