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
//! Durations of remotely triggered blackholing (RTBH) events.
use crate::records::{ElementType, RoutingElement};

use super::{Correlator, DurationResult, PendingTable};

/// Blackholing state of a (peer, prefix) pair.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum BlackholeState {
    #[default]
    Untagged,
    /// The last announcement carried the blackhole community.
    Tagged { start: f64 },
}

/// Measures the time from an announcement tagged with the blackhole community until the prefix
/// is withdrawn.
///
/// An untagged announcement in between retracts the blackhole without a withdrawal, so no
/// duration is recorded for it.
#[derive(Debug, Clone)]
pub struct BlackholeCorrelator {
    marker: String,
    pending: PendingTable<BlackholeState>,
    result: DurationResult,
}

impl BlackholeCorrelator {
    /// `marker` is matched against the textual form of each community, e.g. `"666"`.
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
            pending: PendingTable::new(),
            result: DurationResult::new(),
        }
    }

    pub fn state(&self, peer: &str, prefix: &str) -> BlackholeState {
        self.pending.get(peer, prefix).copied().unwrap_or_default()
    }
}

impl Correlator for BlackholeCorrelator {
    fn observe(&mut self, elem: &RoutingElement) {
        let peer = elem.peer_address.as_str();
        let prefix = elem.prefix.as_str();
        match elem.elem_type {
            ElementType::Announce if elem.has_community_containing(&self.marker) => {
                *self.pending.entry(peer, prefix) = BlackholeState::Tagged {
                    start: elem.timestamp,
                };
            }
            ElementType::Announce => {
                if let Some(BlackholeState::Tagged { .. }) = self.pending.remove(peer, prefix) {
                    log::trace!("blackhole of {peer} {prefix} retracted at {}", elem.timestamp);
                }
            }
            ElementType::Withdraw => {
                if let Some(BlackholeState::Tagged { start }) = self.pending.remove(peer, prefix) {
                    self.result.record(peer, prefix, elem.timestamp - start);
                }
            }
            ElementType::State => {}
        }
    }

    fn num_open(&self) -> usize {
        self.pending
            .count(|s| matches!(s, BlackholeState::Tagged { .. }))
    }

    fn finish(self) -> DurationResult {
        let open = self.num_open();
        if open > 0 {
            log::debug!("discarding {open} blackhole events that never ended");
        }
        self.result
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const PEER: &str = "10.0.0.1";
    const PREFIX: &str = "1.2.3.0/24";

    fn tagged(t: f64) -> RoutingElement {
        RoutingElement::announce(PEER, PREFIX, "10 20", &["20:100", "65535:666"], t)
    }

    fn untagged(t: f64) -> RoutingElement {
        RoutingElement::announce(PEER, PREFIX, "10 20", &["20:100"], t)
    }

    fn withdraw(t: f64) -> RoutingElement {
        RoutingElement::withdraw(PEER, PREFIX, t)
    }

    fn run(elems: &[RoutingElement]) -> DurationResult {
        let mut c = BlackholeCorrelator::new("666");
        elems.iter().for_each(|e| c.observe(e));
        c.finish()
    }

    #[test]
    fn tagged_then_withdrawn() {
        let result = run(&[tagged(0.0), withdraw(5.0)]);
        assert_eq!(result.get(PEER, PREFIX), Some(&[5.0][..]));
        assert_eq!(result.num_events(), 1);
    }

    #[test]
    fn retracted_tag() {
        assert!(run(&[tagged(0.0), untagged(1.0), withdraw(2.0)]).is_empty());
    }

    #[test]
    fn retag_overwrites_start() {
        let result = run(&[tagged(0.0), tagged(3.0), withdraw(5.0)]);
        assert_eq!(result.get(PEER, PREFIX), Some(&[2.0][..]));
    }

    #[test]
    fn repeated_events() {
        let result = run(&[
            tagged(0.0),
            withdraw(4.0),
            withdraw(6.0),
            tagged(10.0),
            withdraw(11.0),
        ]);
        assert_eq!(result.get(PEER, PREFIX), Some(&[4.0, 1.0][..]));
    }

    #[test]
    fn non_positive_durations() {
        let mut c = BlackholeCorrelator::new("666");
        c.observe(&tagged(5.0));
        c.observe(&withdraw(5.0));
        assert_eq!(c.state(PEER, PREFIX), BlackholeState::Untagged);
        c.observe(&tagged(5.0));
        c.observe(&withdraw(4.0));
        assert_eq!(c.state(PEER, PREFIX), BlackholeState::Untagged);
        assert!(c.finish().is_empty());
    }

    #[test]
    fn resolved_pairs_are_forgotten() {
        let mut c = BlackholeCorrelator::new("666");
        c.observe(&tagged(0.0));
        c.observe(&withdraw(1.0));
        c.observe(&tagged(2.0));
        c.observe(&untagged(3.0));
        c.observe(&untagged(4.0));
        assert!(c.pending.is_empty());
        assert_eq!(c.finish().num_events(), 1);
    }

    #[test]
    fn untagged_noops() {
        let mut c = BlackholeCorrelator::new("666");
        c.observe(&untagged(0.0));
        c.observe(&withdraw(1.0));
        c.observe(&RoutingElement::state(PEER, 2.0));
        assert_eq!(c.num_open(), 0);
        assert!(c.finish().is_empty());
    }

    #[test]
    fn open_events_are_discarded() {
        let mut c = BlackholeCorrelator::new("666");
        c.observe(&tagged(0.0));
        assert_eq!(c.state(PEER, PREFIX), BlackholeState::Tagged { start: 0.0 });
        assert_eq!(c.num_open(), 1);
        assert!(c.finish().is_empty());
    }

    #[test]
    fn keys_are_independent() {
        let other_peer = RoutingElement::withdraw("10.0.0.2", PREFIX, 3.0);
        let other_prefix = RoutingElement::withdraw(PEER, "4.5.6.0/24", 3.0);
        let result = run(&[tagged(0.0), other_peer, other_prefix, withdraw(7.0)]);
        assert_eq!(result.num_events(), 1);
        assert_eq!(result.get(PEER, PREFIX), Some(&[7.0][..]));
    }
}
