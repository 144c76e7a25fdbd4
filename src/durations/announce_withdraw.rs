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
//! Durations between the announcement and the explicit withdrawal of a prefix.
use crate::records::{ElementType, RoutingElement};

use super::{Correlator, DurationResult, PendingTable};

/// State of a (peer, prefix) pair.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum AwState {
    #[default]
    Idle,
    /// Announced at `start` and not withdrawn since.
    Pending { start: f64 },
}

/// Measures the time from the most recent announcement of a prefix until its withdrawal.
///
/// A new announcement replaces the start of a pending one, i.e., implicit withdrawals are not
/// counted as events.
#[derive(Debug, Clone, Default)]
pub struct AwCorrelator {
    pending: PendingTable<AwState>,
    result: DurationResult,
}

impl AwCorrelator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, peer: &str, prefix: &str) -> AwState {
        self.pending.get(peer, prefix).copied().unwrap_or_default()
    }
}

impl Correlator for AwCorrelator {
    fn observe(&mut self, elem: &RoutingElement) {
        let peer = elem.peer_address.as_str();
        let prefix = elem.prefix.as_str();
        match elem.elem_type {
            ElementType::Announce => {
                *self.pending.entry(peer, prefix) = AwState::Pending {
                    start: elem.timestamp,
                };
            }
            ElementType::Withdraw => {
                if let Some(AwState::Pending { start }) = self.pending.remove(peer, prefix) {
                    self.result.record(peer, prefix, elem.timestamp - start);
                }
            }
            ElementType::State => {}
        }
    }

    fn num_open(&self) -> usize {
        self.pending.count(|s| matches!(s, AwState::Pending { .. }))
    }

    fn finish(self) -> DurationResult {
        let open = self.num_open();
        if open > 0 {
            log::debug!("discarding {open} announcements that were never withdrawn");
        }
        self.result
    }
}
