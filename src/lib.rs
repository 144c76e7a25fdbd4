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
//! Library for computing statistics over BGP table dumps and update streams: prefix and AS
//! counts, the growth of origins, shortest paths per origin, and the durations of blackholing
//! and announce/withdraw events.
use std::path::PathBuf;

pub mod analyzer;
pub mod config;
pub mod durations;
pub mod growth;
pub mod records;
pub mod shortest_path;
pub mod snapshot;
pub mod source;
pub mod tasks;
pub mod util;

#[cfg(test)]
mod test;

pub use analyzer::{
    calculate_aw_durations, calculate_rtbh_durations, calculate_shortest_path,
    calculate_unique_ases, calculate_unique_prefixes, examine_prefixes,
};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Cannot open {path:?}: {reason}")]
    Open { path: PathBuf, reason: String },
    #[error("Cannot decode {path:?}: {reason}")]
    Parse { path: PathBuf, reason: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub mod prelude {
    pub use super::{
        analyzer::Analyzer,
        config::AnalysisConfig,
        durations::{Correlator, DurationResult},
        records::{ElementType, RoutingElement},
        shortest_path::ShortestPaths,
        source::{BgpkitSource, ElementFilter, ElementSource, IpVersion, MemorySource},
        tasks::{Task, TaskOutput},
        Error,
    };
}
