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
//! Correlation of update events into event durations per peer and prefix.
//!
//! Both correlators consume a single chronologically ordered update stream. Each (peer, prefix)
//! pair runs its own small state machine, stored in a [`PendingTable`].
use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::records::RoutingElement;

mod announce_withdraw;
mod blackhole;

pub use announce_withdraw::{AwCorrelator, AwState};
pub use blackhole::{BlackholeCorrelator, BlackholeState};

/// Completed event durations in seconds, per peer address and prefix, in order of completion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DurationResult(BTreeMap<String, BTreeMap<String, Vec<f64>>>);

impl DurationResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `duration` to the events of `(peer, prefix)`. Non-positive durations are dropped, as
    /// they stem from reordered or clock-skewed updates. Returns whether the duration was kept.
    pub fn record(&mut self, peer: &str, prefix: &str, duration: f64) -> bool {
        if duration <= 0.0 {
            log::trace!("dropping non-positive duration {duration} of {peer} {prefix}");
            return false;
        }
        self.0
            .entry(peer.to_string())
            .or_default()
            .entry(prefix.to_string())
            .or_default()
            .push(duration);
        true
    }

    pub fn get(&self, peer: &str, prefix: &str) -> Option<&[f64]> {
        self.0.get(peer)?.get(prefix).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total number of recorded events.
    pub fn num_events(&self) -> usize {
        self.iter().map(|(_, _, durations)| durations.len()).sum()
    }

    /// Iterate over all `(peer, prefix, durations)`, ordered by peer and prefix.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &[f64])> {
        self.0.iter().flat_map(|(peer, prefixes)| {
            prefixes.iter().map(move |(prefix, durations)| {
                (peer.as_str(), prefix.as_str(), durations.as_slice())
            })
        })
    }

    pub fn into_inner(self) -> BTreeMap<String, BTreeMap<String, Vec<f64>>> {
        self.0
    }
}

/// State of each (peer, prefix) pair, indexed first by peer and then by prefix.
#[derive(Debug, Clone)]
pub struct PendingTable<S> {
    states: HashMap<String, HashMap<String, S>>,
}

impl<S> Default for PendingTable<S> {
    fn default() -> Self {
        Self {
            states: HashMap::new(),
        }
    }
}

impl<S: Default> PendingTable<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, peer: &str, prefix: &str) -> Option<&S> {
        self.states.get(peer)?.get(prefix)
    }

    /// Forget the pair, returning its last state. A pair that is not stored is in its default
    /// state.
    pub fn remove(&mut self, peer: &str, prefix: &str) -> Option<S> {
        let prefixes = self.states.get_mut(peer)?;
        let state = prefixes.remove(prefix);
        if prefixes.is_empty() {
            self.states.remove(peer);
        }
        state
    }

    /// Number of stored pairs.
    pub fn len(&self) -> usize {
        self.states.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Mutable access to the state of a pair, creating it in its default state if necessary.
    pub fn entry(&mut self, peer: &str, prefix: &str) -> &mut S {
        self.states
            .entry(peer.to_string())
            .or_default()
            .entry(prefix.to_string())
            .or_default()
    }

    /// Number of pairs whose state satisfies `f`.
    pub fn count(&self, f: impl Fn(&S) -> bool) -> usize {
        self.states
            .values()
            .flat_map(HashMap::values)
            .filter(|s| f(*s))
            .count()
    }
}

/// A state machine turning an update stream into event durations.
pub trait Correlator {
    /// Process the next element of the stream. Elements must arrive in chronological order.
    fn observe(&mut self, elem: &RoutingElement);

    /// Number of events that started but were not yet resolved.
    fn num_open(&self) -> usize;

    /// End of the stream. Events that are still open are discarded.
    fn finish(self) -> DurationResult;
}
