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

//! The bucketed latency summary backing every histogram.

use crate::error::{CollectError, CollectResult};
use std::io::Write;

/// A fixed-bucket summary of latency observations, in nanoseconds.
///
/// Bucket bounds grow exponentially from 1ns up to a caller-supplied
/// observation ceiling; counts are cumulative (each bucket counts all
/// observations at or below its bound). The summary keeps counting every
/// observation for the lifetime of the histogram, independent of any
/// bounded raw-sample cache kept alongside it.
///
/// Callers are expected to clamp observations to the ceiling before
/// recording; a value above the final bound still contributes to the
/// total, sum and max but lands in no bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct LatencySummary {
    /// Ascending bucket upper bounds; the last bound is the ceiling.
    bucket_bounds: Vec<u64>,
    /// Cumulative count of observations at or below each bound.
    bucket_counts: Vec<u64>,
    total: u64,
    sum: u64,
    min: u64,
    max: u64,
}

impl LatencySummary {
    /// Creates an empty summary whose buckets double from 1ns up to
    /// `ceiling_ns` (the final bound is exactly the ceiling).
    pub fn new(ceiling_ns: u64) -> Self {
        let ceiling = ceiling_ns.max(1);
        let mut bounds = Vec::new();
        let mut bound = 1u64;
        while bound < ceiling {
            bounds.push(bound);
            bound = bound.saturating_mul(2);
        }
        bounds.push(ceiling);
        let len = bounds.len();
        Self {
            bucket_bounds: bounds,
            bucket_counts: vec![0; len],
            total: 0,
            sum: 0,
            min: 0,
            max: 0,
        }
    }

    /// Records one observation.
    pub fn observe(&mut self, value_ns: u64) {
        if self.total == 0 {
            self.min = value_ns;
            self.max = value_ns;
        } else {
            self.min = self.min.min(value_ns);
            self.max = self.max.max(value_ns);
        }
        self.total += 1;
        self.sum = self.sum.saturating_add(value_ns);

        for (i, &bound) in self.bucket_bounds.iter().enumerate() {
            if value_ns <= bound {
                self.bucket_counts[i] += 1;
            }
        }
    }

    /// Total number of observations recorded.
    pub fn total_count(&self) -> u64 {
        self.total
    }

    /// Sum of all recorded observations, saturating at `u64::MAX`.
    pub fn sum_ns(&self) -> u64 {
        self.sum
    }

    /// Smallest recorded observation, if any.
    pub fn min_ns(&self) -> Option<u64> {
        (self.total > 0).then_some(self.min)
    }

    /// Largest recorded observation, if any.
    pub fn max_ns(&self) -> Option<u64> {
        (self.total > 0).then_some(self.max)
    }

    /// The upper bound of the bucket containing the `q`-quantile
    /// (0.0 ..= 1.0), or `None` if the summary is empty or `q` is out of
    /// range. Resolution is bucket-granular.
    pub fn quantile(&self, q: f64) -> Option<u64> {
        if self.total == 0 || !(0.0..=1.0).contains(&q) {
            return None;
        }
        let rank = ((q * self.total as f64).ceil() as u64).max(1);
        for (i, &count) in self.bucket_counts.iter().enumerate() {
            if count >= rank {
                return Some(self.bucket_bounds[i]);
            }
        }
        // Observations above the ceiling land in no bucket.
        Some(self.max)
    }

    /// Iterates `(bucket_bound, cumulative_count)` pairs in ascending order.
    pub fn buckets(&self) -> impl Iterator<Item = (u64, u64)> + '_ {
        self.bucket_bounds
            .iter()
            .copied()
            .zip(self.bucket_counts.iter().copied())
    }

    /// Writes the distribution in its plain-text dump form.
    ///
    /// The format is line-oriented and diff-friendly:
    ///
    /// ```text
    /// total 42
    /// sum 123456
    /// min 10
    /// max 9000
    /// bucket 1 0
    /// bucket 2 3
    /// ...
    /// ```
    ///
    /// `min`/`max` lines are omitted for an empty summary.
    pub fn write_distribution<W: Write>(&self, w: &mut W) -> std::io::Result<()> {
        writeln!(w, "total {}", self.total)?;
        writeln!(w, "sum {}", self.sum)?;
        if self.total > 0 {
            writeln!(w, "min {}", self.min)?;
            writeln!(w, "max {}", self.max)?;
        }
        for (bound, count) in self.buckets() {
            writeln!(w, "bucket {bound} {count}")?;
        }
        Ok(())
    }

    /// Parses a distribution previously written by
    /// [`write_distribution`](Self::write_distribution).
    pub fn parse_distribution(text: &str) -> CollectResult<Self> {
        let mut total = None;
        let mut sum = None;
        let mut min = 0u64;
        let mut max = 0u64;
        let mut bounds = Vec::new();
        let mut counts = Vec::new();

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.split_whitespace();
            let key = parts.next().unwrap_or_default();
            match key {
                "total" => total = Some(parse_field(parts.next(), "total")?),
                "sum" => sum = Some(parse_field(parts.next(), "sum")?),
                "min" => min = parse_field(parts.next(), "min")?,
                "max" => max = parse_field(parts.next(), "max")?,
                "bucket" => {
                    bounds.push(parse_field(parts.next(), "bucket bound")?);
                    counts.push(parse_field(parts.next(), "bucket count")?);
                }
                other => {
                    return Err(CollectError::InvalidDistribution(format!(
                        "unexpected line key '{other}'"
                    )));
                }
            }
        }

        let total = total
            .ok_or_else(|| CollectError::InvalidDistribution("missing 'total' line".into()))?;
        let sum =
            sum.ok_or_else(|| CollectError::InvalidDistribution("missing 'sum' line".into()))?;
        if bounds.is_empty() {
            return Err(CollectError::InvalidDistribution(
                "no bucket lines".into(),
            ));
        }

        Ok(Self {
            bucket_bounds: bounds,
            bucket_counts: counts,
            total,
            sum,
            min,
            max,
        })
    }
}

fn parse_field(field: Option<&str>, what: &str) -> CollectResult<u64> {
    field
        .ok_or_else(|| CollectError::InvalidDistribution(format!("missing {what}")))?
        .parse()
        .map_err(|e| CollectError::InvalidDistribution(format!("bad {what}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CEILING: u64 = 1_000_000;

    #[test]
    fn test_empty_summary() {
        let summary = LatencySummary::new(CEILING);
        assert_eq!(summary.total_count(), 0);
        assert_eq!(summary.min_ns(), None);
        assert_eq!(summary.max_ns(), None);
        assert_eq!(summary.quantile(0.5), None);
        // Last bound is exactly the ceiling.
        assert_eq!(summary.buckets().last().map(|(b, _)| b), Some(CEILING));
    }

    #[test]
    fn test_observe_updates_counts_and_extremes() {
        let mut summary = LatencySummary::new(CEILING);
        summary.observe(3);
        summary.observe(100);
        summary.observe(CEILING);

        assert_eq!(summary.total_count(), 3);
        assert_eq!(summary.sum_ns(), 103 + CEILING);
        assert_eq!(summary.min_ns(), Some(3));
        assert_eq!(summary.max_ns(), Some(CEILING));
        // Cumulative buckets: the final bucket counts everything.
        assert_eq!(summary.buckets().last().map(|(_, c)| c), Some(3));
    }

    #[test]
    fn test_quantile_is_bucket_granular() {
        let mut summary = LatencySummary::new(CEILING);
        for v in [1, 2, 2, 1000, 64000] {
            summary.observe(v);
        }
        // Rank 3 of 5 at q=0.5: values 1, 2, 2 are all <= bound 2.
        assert_eq!(summary.quantile(0.5), Some(2));
        assert_eq!(summary.quantile(1.0), Some(65536));
        assert_eq!(summary.quantile(1.5), None);
    }

    #[test]
    fn test_distribution_round_trip() {
        let mut summary = LatencySummary::new(CEILING);
        for v in [5, 17, 950_000, 1_000_000, 42] {
            summary.observe(v);
        }

        let mut buf = Vec::new();
        summary.write_distribution(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let parsed = LatencySummary::parse_distribution(&text).unwrap();
        assert_eq!(parsed, summary);
        assert_eq!(parsed.total_count(), summary.total_count());
    }

    #[test]
    fn test_empty_distribution_round_trip() {
        let summary = LatencySummary::new(CEILING);
        let mut buf = Vec::new();
        summary.write_distribution(&mut buf).unwrap();
        let parsed = LatencySummary::parse_distribution(&String::from_utf8(buf).unwrap()).unwrap();
        assert_eq!(parsed.total_count(), 0);
        assert_eq!(parsed, summary);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(LatencySummary::parse_distribution("").is_err());
        assert!(LatencySummary::parse_distribution("total x\nsum 0\nbucket 1 0").is_err());
        assert!(LatencySummary::parse_distribution("frobnicate 3").is_err());
    }
}
