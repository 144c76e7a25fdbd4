//! Module to discover input dumps and bring them into processing order.
//!
//! Dumps are named after their collection time (e.g., `rib.20231201.0000.cache`), so the
//! lexicographic order of their paths is used as their chronological order.

use std::path::{Path, PathBuf};

use itertools::Itertools;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),
    #[error("Cannot access matched path: {0}")]
    Glob(#[from] glob::GlobError),
}

/// Sort paths by their byte representation, i.e., the order in which `ls` would list them.
pub fn sort_paths<P: AsRef<Path>>(paths: impl IntoIterator<Item = P>) -> Vec<PathBuf> {
    paths
        .into_iter()
        .map(|p| p.as_ref().to_path_buf())
        .sorted_by(|a, b| a.as_os_str().cmp(b.as_os_str()))
        .collect()
}

/// Find all files in `dir` matching the glob `pattern`, sorted with [`sort_paths`].
///
/// A missing directory yields an empty list.
pub fn discover(dir: impl AsRef<Path>, pattern: &str) -> Result<Vec<PathBuf>, Error> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        log::warn!("Input directory {dir:?} does not exist, assuming no inputs.");
        return Ok(Vec::new());
    }

    let full_pattern = dir.join(pattern);
    let paths = glob::glob(&full_pattern.to_string_lossy())?
        .filter_map_ok(|p| p.is_file().then_some(p))
        .collect::<Result<Vec<_>, _>>()?;
    log::debug!("Found {} files matching {full_pattern:?}", paths.len());

    Ok(sort_paths(paths))
}

#[cfg(test)]
mod test {
    use std::path::PathBuf;

    use super::sort_paths;

    #[test]
    fn sorting() {
        let sorted = sort_paths([
            "rib_files/rib.20231201.0800.cache",
            "rib_files/rib.20231201.0000.cache",
            "rib_files/rib.20231130.1600.cache",
        ]);
        assert_eq!(
            sorted,
            vec![
                PathBuf::from("rib_files/rib.20231130.1600.cache"),
                PathBuf::from("rib_files/rib.20231201.0000.cache"),
                PathBuf::from("rib_files/rib.20231201.0800.cache"),
            ]
        );
    }

    #[test]
    fn sorting_is_bytewise() {
        // `PathBuf`'s own ordering compares components, which would put `a/b` before `a-b`.
        let sorted = sort_paths(["a/b", "a-b"]);
        assert_eq!(sorted, vec![PathBuf::from("a-b"), PathBuf::from("a/b")]);
    }

    #[test]
    fn missing_dir() {
        let found = super::discover("/this/directory/does/not/exist", "*.cache").unwrap();
        assert!(found.is_empty());
    }
}
