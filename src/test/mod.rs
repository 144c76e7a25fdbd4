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
//! End-to-end tests of the analyses on synthetic dumps served from memory.
//!
//! ```shell
//! cargo test --lib test::
//! ```

use crate::{prelude::*, records::RoutingElement as E};

/// An announcement as it appears in a table dump.
pub(crate) fn rib(prefix: &str, as_path: &str) -> E {
    E::announce("10.0.0.1", prefix, as_path, &[], 0.0)
}

/// Analyzer that processes snapshots sequentially, to make sure both code paths are covered.
pub(crate) fn sequential(source: MemorySource) -> Analyzer<MemorySource> {
    Analyzer::new(source).with_config(AnalysisConfig {
        parallel: false,
        ..Default::default()
    })
}

mod snapshots;
