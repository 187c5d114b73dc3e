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

//! Abstract definitions for the latency metrics recorded by the simulator.
//!
//! This module defines the statistical "what" of collection: a bucketed
//! latency summary that stays cheap to update from hot paths and can later
//! be dumped to (and parsed back from) a human-diffable text form.
//! `orrery-telemetry` provides the concurrent registry that aggregates these
//! summaries and the exporters that ship them.

pub mod histogram;

pub use self::histogram::LatencySummary;
