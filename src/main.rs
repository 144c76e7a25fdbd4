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
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use clap::Parser;
use rayon::prelude::*;
use strum::IntoEnumIterator;

use bgpm::{
    prelude::*,
    tasks::InputKind,
    util::{self, PathBufExt},
};
use bgpm_utils::{files, fixtures, other::get_timestamp};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory containing the input directories.
    #[arg(short, long, default_value = "./")]
    data_root: String,
    /// Directory (relative to the data root) with the table dumps.
    #[arg(long, default_value = "rib_files")]
    rib_dir: String,
    /// Directory (relative to the data root) with the update files.
    #[arg(long, default_value = "update_files")]
    updates_dir: String,
    /// Directory (relative to the data root) with the update files containing blackholing events.
    #[arg(long, default_value = "update_files_blackholing")]
    blackholing_dir: String,
    /// Glob pattern selecting the input files in each directory.
    #[arg(short, long, default_value = "*.cache")]
    pattern: String,
    /// Where to write the results to. Defaults to `results/<timestamp>/`.
    #[arg(short, long)]
    output: Option<String>,
    /// Directory with expected results (`<task>.json`) to compare against.
    #[arg(short, long)]
    expected: Option<String>,
    /// Only run the given tasks (can be repeated). Runs all tasks by default.
    #[arg(short, long)]
    task: Vec<Task>,
    /// JSON file with the analysis configuration.
    #[arg(short, long)]
    config: Option<String>,
}

/// What happened to the result of a task.
enum Verdict {
    /// No fixture available to compare with.
    Unchecked,
    Correct,
    Incorrect(Vec<String>),
}

fn run_task(
    task: Task,
    analyzer: &Analyzer<BgpkitSource>,
    inputs: &HashMap<InputKind, Vec<PathBuf>>,
    output: &Path,
    expected: Option<&Path>,
) -> anyhow::Result<Verdict> {
    let files = inputs.get(&task.input()).map(Vec::as_slice).unwrap_or(&[]);
    let result = task.run(analyzer, files)?;
    if result.is_empty() {
        log::warn!("{task}: nothing returned");
    }

    let value = result.to_json()?;
    let output_path = output.then_json(task.to_string());
    fs::write(&output_path, format!("{}\n", serde_json::to_string(&value)?))?;
    log::info!("{task}: written to {output_path:?}");

    let Some(expected) = expected else {
        return Ok(Verdict::Unchecked);
    };
    let Some(fixture) = fixtures::load(expected.then_json(task.to_string()))? else {
        log::warn!("{task}: no expected result in {expected:?}");
        return Ok(Verdict::Unchecked);
    };
    let differences = fixtures::diff(&fixture, &value);
    Ok(if differences.is_empty() {
        Verdict::Correct
    } else {
        Verdict::Incorrect(differences)
    })
}

fn main() -> anyhow::Result<()> {
    util::init_logging();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => AnalysisConfig::from_file(path)?,
        None => AnalysisConfig::default(),
    };
    log::debug!("Using {config:?}");
    let analyzer = Analyzer::new(BgpkitSource).with_config(config);

    let data_root = PathBuf::from(&args.data_root);
    let mut inputs = HashMap::new();
    for (kind, dir) in [
        (InputKind::Snapshots, &args.rib_dir),
        (InputKind::Updates, &args.updates_dir),
        (InputKind::BlackholingUpdates, &args.blackholing_dir),
    ] {
        let found = files::discover(data_root.as_path().then(dir), &args.pattern)?;
        log::info!("Found {} input files in {dir}", found.len());
        inputs.insert(kind, found);
    }

    let output = args
        .output
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("results").then(get_timestamp()));
    fs::create_dir_all(&output)?;
    let expected = args.expected.as_ref().map(PathBuf::from);

    let tasks = if args.task.is_empty() {
        Task::iter().collect()
    } else {
        args.task.clone()
    };

    let verdicts = tasks
        .into_par_iter()
        .map(|task| {
            let verdict = run_task(task, &analyzer, &inputs, &output, expected.as_deref());
            (task, verdict)
        })
        .collect::<Vec<_>>();

    let mut failed = 0;
    for (task, verdict) in verdicts {
        match verdict {
            Ok(Verdict::Unchecked) => {}
            Ok(Verdict::Correct) => log::info!("{task}: returned value is correct"),
            Ok(Verdict::Incorrect(differences)) => {
                failed += 1;
                log::error!("{task}: returned value is incorrect");
                for difference in differences {
                    log::error!("  {difference}");
                }
            }
            Err(e) => {
                failed += 1;
                log::error!("{task}: {e:#}");
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{failed} tasks failed");
    }
    Ok(())
}
