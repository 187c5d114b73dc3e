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

//! Decomposition of composite histogram identities.
//!
//! Histogram names are dot-separated composites built by the surrounding
//! simulation (e.g. `netflixoss.us-east-1.zoneA.api.api1`). The collector
//! treats them as opaque except when deriving output file paths, where the
//! architecture part (first segment) and instance part (last segment) are
//! needed. These functions are pure and never fail: a name with no
//! separator is its own architecture and instance.

/// Returns the architecture part of a composite histogram name.
pub fn arch_part(name: &str) -> &str {
    name.split('.').next().unwrap_or(name)
}

/// Returns the instance part of a composite histogram name.
pub fn instance_part(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_composite_name_decomposition() {
        let name = "netflixoss.us-east-1.zoneA.api.api1";
        assert_eq!(arch_part(name), "netflixoss");
        assert_eq!(instance_part(name), "api1");
    }

    #[test]
    fn test_two_part_name() {
        assert_eq!(arch_part("testarch.web1"), "testarch");
        assert_eq!(instance_part("testarch.web1"), "web1");
    }

    #[test]
    fn test_degenerate_names() {
        assert_eq!(arch_part("solo"), "solo");
        assert_eq!(instance_part("solo"), "solo");
        assert_eq!(arch_part(""), "");
        assert_eq!(instance_part(""), "");
    }
}
