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
//! Module that runs the analyses over dump files.
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use bgpm_utils::files::sort_paths;

use crate::{
    config::AnalysisConfig,
    durations::{AwCorrelator, BlackholeCorrelator, Correlator, DurationResult},
    growth::GrowthRanker,
    shortest_path::{self, ShortestPathTracker, ShortestPaths},
    snapshot,
    records::RoutingElement,
    source::{BgpkitSource, ElementSource},
    Error,
};

/// Runs the analyses on the dumps provided by an [`ElementSource`].
///
/// Input files are always processed in lexicographic order of their paths, which is assumed to
/// be their chronological order. The analyzer keeps no state between calls.
#[derive(Debug, Clone, Default)]
pub struct Analyzer<S> {
    source: S,
    config: AnalysisConfig,
}

impl<S: ElementSource + Sync> Analyzer<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            config: AnalysisConfig::default(),
        }
    }

    pub fn with_config(mut self, config: AnalysisConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Number of distinct prefixes in each snapshot.
    pub fn unique_prefixes<P: AsRef<Path>>(&self, files: &[P]) -> Result<Vec<usize>, Error> {
        self.map_snapshots(&sort_paths(files), |elems| {
            snapshot::count_unique_prefixes(elems)
        })
    }

    /// Number of distinct ASes in each snapshot.
    pub fn unique_ases<P: AsRef<Path>>(&self, files: &[P]) -> Result<Vec<usize>, Error> {
        self.map_snapshots(&sort_paths(files), |elems| {
            snapshot::count_unique_ases(elems)
        })
    }

    /// The origins with the highest growth in advertised prefixes, from the lowest to the highest
    /// growth. See [`GrowthRanker`].
    pub fn examine_prefixes<P: AsRef<Path>>(&self, files: &[P]) -> Result<Vec<String>, Error> {
        let snapshots = self.map_snapshots(&sort_paths(files), |elems| {
            snapshot::origin_prefix_counts(elems)
        })?;

        let mut ranker = GrowthRanker::new();
        snapshots
            .into_iter()
            .for_each(|counts| ranker.add_snapshot(counts));
        Ok(ranker.top(self.config.top_origins))
    }

    /// The shortest path length of every origin in each snapshot.
    pub fn shortest_path<P: AsRef<Path>>(&self, files: &[P]) -> Result<ShortestPaths, Error> {
        let files = sort_paths(files);
        let snapshots = self.map_snapshots(&files, |elems| shortest_path::shortest_paths(elems))?;

        let mut tracker = ShortestPathTracker::new(files.len());
        for (i, minimums) in snapshots.into_iter().enumerate() {
            tracker.add_snapshot(i, minimums);
        }
        Ok(tracker.finish())
    }

    /// Durations of all blackholing events in the update stream formed by `files`.
    pub fn rtbh_durations<P: AsRef<Path>>(&self, files: &[P]) -> Result<DurationResult, Error> {
        self.correlate(
            files,
            BlackholeCorrelator::new(self.config.blackhole_community.clone()),
        )
    }

    /// Durations of all explicit announce/withdraw events in the update stream formed by `files`.
    pub fn aw_durations<P: AsRef<Path>>(&self, files: &[P]) -> Result<DurationResult, Error> {
        self.correlate(files, AwCorrelator::new())
    }

    /// Reduce each snapshot with `f`. The results are in the same order as `files`. The first
    /// decoding error of any snapshot is returned instead.
    fn map_snapshots<T, F>(&self, files: &[PathBuf], f: F) -> Result<Vec<T>, Error>
    where
        F: Fn(&mut dyn Iterator<Item = RoutingElement>) -> T + Sync,
        T: Send,
    {
        let filter = self.config.filter();
        let process = |path: &PathBuf| -> Result<T, Error> {
            log::debug!("Processing snapshot {path:?}");
            let stream = self.source.open(path, &filter)?;
            itertools::process_results(stream, |mut elems| f(&mut elems))
        };

        if self.config.parallel {
            files.par_iter().map(process).collect()
        } else {
            files.iter().map(process).collect()
        }
    }

    /// Feed the concatenation of all `files` into `correlator`, as a single stream.
    fn correlate<P, C>(&self, files: &[P], mut correlator: C) -> Result<DurationResult, Error>
    where
        P: AsRef<Path>,
        C: Correlator,
    {
        let filter = self.config.filter();
        let mut latest = f64::NEG_INFINITY;

        for path in sort_paths(files) {
            log::debug!("Correlating updates from {path:?}");
            let mut out_of_order = 0usize;
            for elem in self.source.open(&path, &filter)? {
                let elem = elem?;
                if elem.timestamp < latest {
                    out_of_order += 1;
                } else {
                    latest = elem.timestamp;
                }
                correlator.observe(&elem);
            }
            if out_of_order > 0 {
                log::warn!(
                    "{out_of_order} updates in {path:?} are older than a preceding update. Are the input files in chronological order?"
                );
            }
        }

        Ok(correlator.finish())
    }
}

/// Number of distinct IPv4 prefixes in each MRT table dump.
pub fn calculate_unique_prefixes<P: AsRef<Path>>(files: &[P]) -> Result<Vec<usize>, Error> {
    Analyzer::new(BgpkitSource).unique_prefixes(files)
}

/// Number of distinct ASes on the IPv4 paths of each MRT table dump.
pub fn calculate_unique_ases<P: AsRef<Path>>(files: &[P]) -> Result<Vec<usize>, Error> {
    Analyzer::new(BgpkitSource).unique_ases(files)
}

/// The ten origins with the highest growth in advertised IPv4 prefixes, lowest growth first.
pub fn examine_prefixes<P: AsRef<Path>>(files: &[P]) -> Result<Vec<String>, Error> {
    Analyzer::new(BgpkitSource).examine_prefixes(files)
}

/// Shortest IPv4 path length of every origin in each MRT table dump.
pub fn calculate_shortest_path<P: AsRef<Path>>(files: &[P]) -> Result<ShortestPaths, Error> {
    Analyzer::new(BgpkitSource).shortest_path(files)
}

/// RTBH event durations in the IPv4 update stream formed by the MRT update files.
pub fn calculate_rtbh_durations<P: AsRef<Path>>(files: &[P]) -> Result<DurationResult, Error> {
    Analyzer::new(BgpkitSource).rtbh_durations(files)
}

/// Announce/withdraw event durations in the IPv4 update stream formed by the MRT update files.
pub fn calculate_aw_durations<P: AsRef<Path>>(files: &[P]) -> Result<DurationResult, Error> {
    Analyzer::new(BgpkitSource).aw_durations(files)
}
