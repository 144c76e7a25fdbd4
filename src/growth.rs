// BGPM: Statistics over Routing Table Snapshots and BGP Update Streams
// Copyright (C) 2024-2025 Roland Schmid <roschmi@ethz.ch> and Tibor Schneider <sctibor@ethz.ch>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.
//! Ranking of origin ASes by the growth of the number of prefixes they advertise.
use std::{cmp::Reverse, collections::HashMap};

use itertools::Itertools;
use ordered_float::OrderedFloat;

/// Prefix counts of an origin over the processed snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OriginRecord {
    /// Count in the first snapshot containing the origin.
    pub first: usize,
    /// Count in the most recent later snapshot containing the origin.
    pub last: Option<usize>,
}

impl OriginRecord {
    /// Relative change from `first` to `last`, i.e., `last / first - 1`. Undefined for origins
    /// that were only seen once.
    pub fn growth(&self) -> Option<f64> {
        let last = self.last?;
        (self.first > 0).then(|| last as f64 / self.first as f64 - 1.0)
    }
}

/// Accumulates per-origin prefix counts of chronologically ordered snapshots.
#[derive(Debug, Clone, Default)]
pub struct GrowthRanker {
    origins: HashMap<String, OriginRecord>,
}

impl GrowthRanker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the prefix counts per origin of the next snapshot.
    pub fn add_snapshot(&mut self, counts: impl IntoIterator<Item = (String, usize)>) {
        for (origin, count) in counts {
            self.origins
                .entry(origin)
                .and_modify(|record| record.last = Some(count))
                .or_insert(OriginRecord {
                    first: count,
                    last: None,
                });
        }
    }

    pub fn record(&self, origin: &str) -> Option<&OriginRecord> {
        self.origins.get(origin)
    }

    /// All origins with a defined growth, sorted by descending growth. Ties are ordered by
    /// ascending AS number string.
    pub fn ranking(&self) -> Vec<(&str, f64)> {
        self.origins
            .iter()
            .filter_map(|(origin, record)| Some((origin.as_str(), record.growth()?)))
            .sorted_by_key(|(origin, growth)| (Reverse(OrderedFloat(*growth)), *origin))
            .collect()
    }

    /// The `k` origins with the highest growth, ordered from the lowest to the highest growth.
    pub fn top(&self, k: usize) -> Vec<String> {
        let mut top = self
            .ranking()
            .into_iter()
            .take(k)
            .map(|(origin, _)| origin.to_string())
            .collect_vec();
        top.reverse();
        top
    }
}
