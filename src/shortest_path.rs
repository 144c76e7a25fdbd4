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
//! Shortest advertised AS path per origin, tracked over multiple snapshots.
use std::collections::{BTreeMap, HashMap};

use crate::records::RoutingElement;

/// Shortest path length per origin, with one entry per snapshot. `0` means that the origin had
/// no (non-trivial) path in that snapshot.
pub type ShortestPaths = BTreeMap<String, Vec<usize>>;

/// Minimum path length per origin in a single snapshot.
///
/// The length of a path is the number of distinct ASes on it, so prepending does not count.
/// Paths consisting of the origin only are ignored.
pub fn shortest_paths(elements: impl IntoIterator<Item = RoutingElement>) -> HashMap<String, usize> {
    let mut minimums: HashMap<String, usize> = HashMap::new();
    for elem in elements.into_iter().filter(RoutingElement::has_prefix) {
        let Some(origin) = elem.origin() else {
            continue;
        };
        let len = elem.distinct_ases().len();
        if len == 1 {
            continue;
        }
        minimums
            .entry(origin.to_string())
            .and_modify(|min| *min = (*min).min(len))
            .or_insert(len);
    }
    minimums
}

/// Merges the per-snapshot minimums into vectors of a fixed width.
#[derive(Debug, Clone)]
pub struct ShortestPathTracker {
    num_snapshots: usize,
    paths: ShortestPaths,
}

impl ShortestPathTracker {
    pub fn new(num_snapshots: usize) -> Self {
        Self {
            num_snapshots,
            paths: ShortestPaths::new(),
        }
    }

    /// Store the minimums of the snapshot at position `index` (in processing order). Snapshots
    /// whose `index` is not smaller than the number given to [`Self::new`] are rejected. Returns
    /// whether the snapshot was stored.
    pub fn add_snapshot(&mut self, index: usize, minimums: HashMap<String, usize>) -> bool {
        if index >= self.num_snapshots {
            log::error!(
                "Ignoring snapshot {index}, out of range ({} snapshots)",
                self.num_snapshots
            );
            return false;
        }
        let num_snapshots = self.num_snapshots;
        for (origin, len) in minimums {
            self.paths
                .entry(origin)
                .or_insert_with(|| vec![0; num_snapshots])[index] = len;
        }
        true
    }

    pub fn finish(self) -> ShortestPaths {
        self.paths
    }
}
