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
//! Tests of the snapshot analyses: counts, origin growth, and shortest paths.

use std::path::PathBuf;

use super::{rib, sequential};
use crate::prelude::*;

/// Three table dumps, registered out of order.
fn source() -> MemorySource {
    MemorySource::new()
        .with_dump(
            "ribs/rib.0800.cache",
            vec![
                rib("1.0.0.0/24", "10 20 100"),
                rib("2.0.0.0/24", "10 100"),
                rib("3.0.0.0/24", "10 30 30 200"),
                rib("2001:db8::/32", "10 40 300"),
            ],
        )
        .with_dump(
            "ribs/rib.0000.cache",
            vec![
                rib("1.0.0.0/24", "10 20 20 100"),
                rib("1.0.0.0/24", "11 21 100"),
                rib("3.0.0.0/24", "10 200"),
                rib("4.0.0.0/24", ""),
            ],
        )
        .with_dump(
            "ribs/rib.0400.cache",
            vec![
                rib("3.0.0.0/24", "200"),
                rib("5.0.0.0/24", "10 400"),
                rib("6.0.0.0/24", "10 400"),
            ],
        )
}

fn files() -> Vec<PathBuf> {
    ["ribs/rib.0800.cache", "ribs/rib.0400.cache", "ribs/rib.0000.cache"]
        .into_iter()
        .map(PathBuf::from)
        .collect()
}

#[test]
fn unique_counts_in_sorted_order() {
    let analyzer = Analyzer::new(source());
    // 0000: 1.0, 3.0, 4.0 | 0400: 3.0, 5.0, 6.0 | 0800: 1.0, 2.0, 3.0 (no IPv6)
    assert_eq!(analyzer.unique_prefixes(&files()).unwrap(), vec![3, 3, 3]);
    // 0000: 10 11 20 21 100 200 | 0400: 10 200 400 | 0800: 10 20 30 100 200
    assert_eq!(analyzer.unique_ases(&files()).unwrap(), vec![6, 3, 5]);
}

#[test]
fn counts_have_one_entry_per_file() {
    let analyzer = Analyzer::new(source());
    for n in 0..=3 {
        let files = &files()[..n];
        assert_eq!(analyzer.unique_prefixes(files).unwrap().len(), n);
        assert_eq!(analyzer.unique_ases(files).unwrap().len(), n);
    }
}

#[test]
fn growth_of_single_origin() {
    let source = MemorySource::new()
        .with_dump("1.cache", vec![rib("1.0.0.0/24", "10 100")])
        .with_dump(
            "2.cache",
            vec![rib("1.0.0.0/24", "10 100"), rib("2.0.0.0/24", "20 100")],
        );
    let analyzer = Analyzer::new(source);
    assert_eq!(
        analyzer.examine_prefixes(&["2.cache", "1.cache"]).unwrap(),
        vec!["100".to_string()]
    );
}

#[test]
fn growth_over_snapshots() {
    // 100: 1 -> (absent) -> 2 = 1.0, 200: 1 -> 1 -> 1 = 0.0, 400 only seen once
    let top = Analyzer::new(source()).examine_prefixes(&files()).unwrap();
    assert_eq!(top, vec!["200".to_string(), "100".to_string()]);
}

#[test]
fn growth_is_limited_and_ascending() {
    let first = (0..15)
        .map(|i| rib(&format!("{i}.0.0.0/24"), &format!("10 {}", 1000 + i)))
        .collect();
    let second = (0..15)
        .flat_map(|i| {
            (0..=i).map(move |j| rib(&format!("{i}.{j}.0.0/24"), &format!("10 {}", 1000 + i)))
        })
        .collect();
    let source = MemorySource::new()
        .with_dump("a.cache", first)
        .with_dump("b.cache", second);

    let top = Analyzer::new(source)
        .examine_prefixes(&["a.cache", "b.cache"])
        .unwrap();
    assert_eq!(
        top,
        (1005..1015).map(|asn| asn.to_string()).collect::<Vec<_>>()
    );

    let config = AnalysisConfig {
        top_origins: 3,
        ..Default::default()
    };
    let source = MemorySource::new()
        .with_dump("a.cache", vec![rib("1.0.0.0/24", "1"), rib("2.0.0.0/24", "2")])
        .with_dump("b.cache", vec![rib("1.0.0.0/24", "1"), rib("2.0.0.0/24", "2")]);
    let top = Analyzer::new(source)
        .with_config(config)
        .examine_prefixes(&["a.cache", "b.cache"])
        .unwrap();
    assert_eq!(top, vec!["2".to_string(), "1".to_string()]);
}

#[test]
fn shortest_paths_are_zero_filled() {
    let paths = Analyzer::new(source()).shortest_path(&files()).unwrap();
    assert_eq!(paths.len(), 3);
    assert_eq!(paths["100"], vec![3, 0, 2]);
    // 0400 only has the trivial path "200"
    assert_eq!(paths["200"], vec![2, 0, 3]);
    assert_eq!(paths["400"], vec![0, 2, 0]);
    assert!(paths.values().all(|v| v.len() == files().len()));
}

#[test]
fn parallel_and_sequential_agree() {
    let parallel = Analyzer::new(source());
    let sequential = sequential(source());
    assert_eq!(
        parallel.unique_prefixes(&files()).unwrap(),
        sequential.unique_prefixes(&files()).unwrap()
    );
    assert_eq!(
        parallel.examine_prefixes(&files()).unwrap(),
        sequential.examine_prefixes(&files()).unwrap()
    );
    assert_eq!(
        parallel.shortest_path(&files()).unwrap(),
        sequential.shortest_path(&files()).unwrap()
    );
}

#[test]
fn idempotent() {
    let analyzer = Analyzer::new(source());
    assert_eq!(
        analyzer.unique_ases(&files()).unwrap(),
        analyzer.unique_ases(&files()).unwrap()
    );
    assert_eq!(
        analyzer.shortest_path(&files()).unwrap(),
        analyzer.shortest_path(&files()).unwrap()
    );
    assert_eq!(
        analyzer.examine_prefixes(&files()).unwrap(),
        analyzer.examine_prefixes(&files()).unwrap()
    );
}

#[test]
fn empty_inputs() {
    let analyzer = Analyzer::new(MemorySource::new());
    let files: &[PathBuf] = &[];
    assert!(analyzer.unique_prefixes(files).unwrap().is_empty());
    assert!(analyzer.unique_ases(files).unwrap().is_empty());
    assert!(analyzer.examine_prefixes(files).unwrap().is_empty());
    assert!(analyzer.shortest_path(files).unwrap().is_empty());
}

#[test]
fn missing_dump_is_fatal() {
    let analyzer = Analyzer::new(source());
    let result = analyzer.unique_prefixes(&["ribs/rib.0000.cache", "ribs/rib.9999.cache"]);
    assert!(matches!(result, Err(Error::Open { .. })));
}

#[test]
fn all_ip_versions() {
    let config = AnalysisConfig {
        ip_version: None,
        ..Default::default()
    };
    let analyzer = Analyzer::new(source()).with_config(config);
    assert_eq!(analyzer.unique_prefixes(&files()).unwrap(), vec![3, 3, 4]);
}
