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

//! Data model for the Guesstimate export document.
//!
//! A `Guess` is a named "space" holding a graph of metrics laid out on a
//! spreadsheet-style grid, each paired with a guesstimate that carries
//! either raw empirical samples (type `DATA`) or a symbolic expression.
//! The `metrics` and `guesstimates` arrays are parallel and joined by the
//! shared cell identifier.

use serde::{Deserialize, Serialize};

/// The guesstimate type tag for raw empirical data.
pub const GUESSTIMATE_TYPE_DATA: &str = "DATA";

/// The export document root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Guess {
    /// The single space this document describes.
    pub space: GuessSpace,
}

/// A Guesstimate space: name, description, visibility and its graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuessSpace {
    /// The space name (the architecture name).
    pub name: String,
    /// Fixed description identifying the generator.
    pub description: String,
    /// Visibility flag; the wire format encodes it as a string.
    #[serde(rename = "isPrivate")]
    pub is_private: String,
    /// The metric/guesstimate graph.
    pub graph: GuessGraph,
}

/// Parallel sequences of metrics and their guesstimates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuessGraph {
    /// One entry per exported histogram, in cell-assignment order.
    pub metrics: Vec<GuessMetric>,
    /// One entry per metric, joined by the cell identifier.
    pub guesstimates: Vec<Guesstimate>,
}

/// A metric occupying one grid cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuessMetric {
    /// The two-letter cell identifier (e.g. "AA").
    pub id: String,
    /// Human-facing identifier; identical to `id`.
    #[serde(rename = "readableId")]
    pub readable_id: String,
    /// The full composite histogram name.
    pub name: String,
    /// The grid coordinates of this metric.
    pub location: GuessMetricLocation,
}

/// One-based grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessMetricLocation {
    /// Row index, starting at 1.
    pub row: u32,
    /// Column index, starting at 1.
    pub col: u32,
}

/// The value specification for one cell: raw data or a symbolic formula.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Guesstimate {
    /// The cell identifier of the paired metric.
    pub metric: String,
    /// Symbolic expression; empty for empirical data.
    pub expression: String,
    /// Type tag: `DATA` or the override's declared type.
    #[serde(rename = "guesstimateType")]
    pub guesstimate_type: String,
    /// The raw sample sequence; absent when an override is in effect.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<u64>>,
}
