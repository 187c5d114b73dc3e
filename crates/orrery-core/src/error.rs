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

//! Error types shared by the collector.

use std::fmt::Display;
use std::path::PathBuf;

/// A specialized `Result` type for collector operations.
pub type CollectResult<T> = Result<T, CollectError>;

/// An error that can occur while persisting or exporting collected metrics.
///
/// Configuration-disabled collection and capacity overflow are deliberately
/// *not* errors; both are silent no-ops. Every variant here is treated as
/// fatal by the service layer, matching the offline-tooling policy of the
/// collector: there is no retry or partial-success path.
#[derive(Debug)]
pub enum CollectError {
    /// An output file could not be created or written. Indicates an
    /// unusable deployment environment (e.g. a missing output directory).
    OutputPath {
        /// The path that could not be created or written.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
    /// The architecture descriptor file was missing or unreadable.
    DescriptorUnavailable {
        /// The descriptor path that was probed.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
    /// The architecture descriptor file was read but is not valid JSON.
    DescriptorInvalid {
        /// The descriptor path that was read.
        path: PathBuf,
        /// A description of the parse failure.
        message: String,
    },
    /// The export document could not be serialized.
    Serialize(String),
    /// A persisted distribution dump could not be parsed back.
    InvalidDistribution(String),
}

impl Display for CollectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollectError::OutputPath { path, source } => {
                write!(f, "Cannot write output file {}: {source}", path.display())
            }
            CollectError::DescriptorUnavailable { path, source } => {
                write!(
                    f,
                    "Architecture descriptor {} unavailable: {source}",
                    path.display()
                )
            }
            CollectError::DescriptorInvalid { path, message } => {
                write!(
                    f,
                    "Architecture descriptor {} invalid: {message}",
                    path.display()
                )
            }
            CollectError::Serialize(msg) => write!(f, "Serialization failed: {msg}"),
            CollectError::InvalidDistribution(msg) => {
                write!(f, "Invalid distribution dump: {msg}")
            }
        }
    }
}

impl std::error::Error for CollectError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CollectError::OutputPath { source, .. }
            | CollectError::DescriptorUnavailable { source, .. } => Some(source),
            _ => None,
        }
    }
}
