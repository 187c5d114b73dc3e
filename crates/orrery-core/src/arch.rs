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

//! Data model for the externally authored architecture descriptor.
//!
//! The descriptor names the services of a simulated architecture and may
//! attach per-service guesstimate overrides. It is read-only input: the
//! exporter loads it once per export and matches service names against
//! histogram names by substring containment.

use serde::Deserialize;

/// A simulated architecture: name, version and its declared services.
///
/// Every field defaults, matching the tolerant decoding of descriptors
/// authored by hand; an empty `arch` marks a descriptor that carries no
/// usable service list.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ArchDescriptor {
    /// The architecture name.
    pub arch: String,
    /// The descriptor format version.
    pub version: String,
    /// Free-form arguments recorded by the authoring tool.
    pub args: String,
    /// The declared services, in author order. Order matters: when several
    /// service names match one histogram, the last match wins.
    pub services: Vec<ServiceSpec>,
}

/// One declared service and its optional guesstimate override.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServiceSpec {
    /// The service name, matched against histogram names by substring.
    pub name: String,
    /// The simulation package implementing the service.
    pub package: String,
    /// Number of regions the service is deployed to.
    pub regions: i64,
    /// Number of instances per region.
    pub count: i64,
    /// Names of services this one depends on.
    pub dependencies: Vec<String>,
    /// When true, export the symbolic override below instead of raw data.
    #[serde(rename = "useCustomGuesstimate")]
    pub use_custom_guesstimate: bool,
    /// The override's guesstimate type tag (e.g. "MIXTURE").
    #[serde(rename = "guesstimateType")]
    pub guesstimate_type: String,
    /// The override's expression string (e.g. "normal(10,2)").
    #[serde(rename = "guesstimateValue")]
    pub guesstimate_value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_descriptor_deserializes() {
        let json = r#"{
            "arch": "testarch",
            "version": "arch-0.1",
            "args": "-a testarch -d 5",
            "services": [
                {
                    "name": "auth",
                    "package": "karyon",
                    "regions": 1,
                    "count": 3,
                    "dependencies": ["store"],
                    "useCustomGuesstimate": true,
                    "guesstimateType": "MIXTURE",
                    "guesstimateValue": "normal(10,2)"
                },
                {
                    "name": "store",
                    "package": "cassandra",
                    "regions": 1,
                    "count": 6,
                    "dependencies": []
                }
            ]
        }"#;

        let descriptor: ArchDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(descriptor.arch, "testarch");
        assert_eq!(descriptor.services.len(), 2);

        let auth = &descriptor.services[0];
        assert!(auth.use_custom_guesstimate);
        assert_eq!(auth.guesstimate_type, "MIXTURE");
        assert_eq!(auth.guesstimate_value, "normal(10,2)");
        assert_eq!(auth.dependencies, vec!["store".to_string()]);

        let store = &descriptor.services[1];
        assert!(!store.use_custom_guesstimate);
        assert!(store.guesstimate_type.is_empty());
    }

    #[test]
    fn test_missing_fields_default() {
        let descriptor: ArchDescriptor = serde_json::from_str("{}").unwrap();
        assert!(descriptor.arch.is_empty());
        assert!(descriptor.services.is_empty());

        let descriptor: ArchDescriptor =
            serde_json::from_str(r#"{"services": [{"name": "web"}]}"#).unwrap();
        assert_eq!(descriptor.services[0].name, "web");
        assert_eq!(descriptor.services[0].regions, 0);
    }
}
