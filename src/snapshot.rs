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
//! Aggregations over a single snapshot (table dump). None of them keeps state across snapshots.
use std::collections::{HashMap, HashSet};

use crate::records::RoutingElement;

/// Prefixes advertised by each origin AS.
pub type OriginPrefixes = HashMap<String, HashSet<String>>;

/// Number of distinct prefixes in the snapshot, including those without an AS path.
pub fn count_unique_prefixes(elements: impl IntoIterator<Item = RoutingElement>) -> usize {
    elements
        .into_iter()
        .filter(RoutingElement::has_prefix)
        .map(|e| e.prefix)
        .collect::<HashSet<_>>()
        .len()
}

/// Number of distinct AS tokens over all AS paths in the snapshot.
pub fn count_unique_ases(elements: impl IntoIterator<Item = RoutingElement>) -> usize {
    elements
        .into_iter()
        .filter(RoutingElement::has_prefix)
        .flat_map(|e| e.as_path)
        .collect::<HashSet<_>>()
        .len()
}

/// Collect the distinct prefixes of each origin. Elements without an AS path are skipped.
pub fn origin_prefixes(elements: impl IntoIterator<Item = RoutingElement>) -> OriginPrefixes {
    let mut origins = OriginPrefixes::new();
    for mut elem in elements.into_iter().filter(RoutingElement::has_prefix) {
        let Some(origin) = elem.as_path.pop() else {
            log::trace!("skipping {} without AS path", elem.prefix);
            continue;
        };
        origins.entry(origin).or_default().insert(elem.prefix);
    }
    origins
}

/// Number of distinct prefixes per origin, see [`origin_prefixes`].
pub fn origin_prefix_counts(
    elements: impl IntoIterator<Item = RoutingElement>,
) -> HashMap<String, usize> {
    origin_prefixes(elements)
        .into_iter()
        .map(|(origin, prefixes)| (origin, prefixes.len()))
        .collect()
}
