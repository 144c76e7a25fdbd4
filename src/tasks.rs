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
//! The named tasks run by the `bgpm` binary, and their results.
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{
    analyzer::Analyzer, durations::DurationResult, shortest_path::ShortestPaths,
    source::ElementSource, Error,
};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Deserialize,
    Serialize,
    strum::Display,
    strum::EnumIter,
    strum_macros::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
/// Analyses that can be run on a data set.
pub enum Task {
    UniquePrefixes,
    UniqueAses,
    ExaminePrefixes,
    ShortestPath,
    RtbhDurations,
    AwDurations,
}

/// The kind of dump files a task consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    /// Table dumps
    Snapshots,
    /// Update files
    Updates,
    /// Update files containing blackholing events
    BlackholingUpdates,
}

impl Task {
    pub fn input(&self) -> InputKind {
        match self {
            Self::UniquePrefixes | Self::UniqueAses | Self::ExaminePrefixes | Self::ShortestPath => {
                InputKind::Snapshots
            }
            Self::RtbhDurations => InputKind::BlackholingUpdates,
            Self::AwDurations => InputKind::Updates,
        }
    }

    /// Run the task on `files` using `analyzer`.
    pub fn run<S: ElementSource + Sync>(
        &self,
        analyzer: &Analyzer<S>,
        files: &[PathBuf],
    ) -> Result<TaskOutput, Error> {
        log::info!("Running {self} on {} files", files.len());
        Ok(match self {
            Self::UniquePrefixes => TaskOutput::Counts(analyzer.unique_prefixes(files)?),
            Self::UniqueAses => TaskOutput::Counts(analyzer.unique_ases(files)?),
            Self::ExaminePrefixes => TaskOutput::Origins(analyzer.examine_prefixes(files)?),
            Self::ShortestPath => TaskOutput::ShortestPaths(analyzer.shortest_path(files)?),
            Self::RtbhDurations => TaskOutput::Durations(analyzer.rtbh_durations(files)?),
            Self::AwDurations => TaskOutput::Durations(analyzer.aw_durations(files)?),
        })
    }
}

/// Result of a [`Task`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TaskOutput {
    Counts(Vec<usize>),
    Origins(Vec<String>),
    ShortestPaths(ShortestPaths),
    Durations(DurationResult),
}

impl TaskOutput {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Counts(x) => x.is_empty(),
            Self::Origins(x) => x.is_empty(),
            Self::ShortestPaths(x) => x.is_empty(),
            Self::Durations(x) => x.is_empty(),
        }
    }

    pub fn to_json(&self) -> Result<serde_json::Value, Error> {
        Ok(serde_json::to_value(self)?)
    }
}
