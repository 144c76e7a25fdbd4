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
//! Parameters of the analyses.
use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    source::{ElementFilter, IpVersion},
    Error,
};

/// Parameters shared by all analyses. Every field falls back to its default when missing from a
/// configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Only consider prefixes of this IP version (`null` to consider all).
    pub ip_version: Option<IpVersion>,
    /// An announcement is considered a blackhole signal if one of its communities contains this
    /// string.
    pub blackhole_community: String,
    /// Number of origins reported by the growth ranking.
    pub top_origins: usize,
    /// Process snapshot dumps concurrently.
    pub parallel: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            ip_version: Some(IpVersion::V4),
            blackhole_community: "666".to_string(),
            top_origins: 10,
            parallel: true,
        }
    }
}

impl AnalysisConfig {
    /// Read the configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        log::debug!("Loading analysis configuration from {path:?}");
        Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
    }

    /// The filter requested from the element source.
    pub fn filter(&self) -> ElementFilter {
        ElementFilter {
            ip_version: self.ip_version,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.filter(), ElementFilter::ipv4());
        assert_eq!(config.blackhole_community, "666");
        assert_eq!(config.top_origins, 10);
    }

    #[test]
    fn partial_config() {
        let config: AnalysisConfig =
            serde_json::from_str(r#"{"top_origins": 5, "ip_version": null}"#).unwrap();
        assert_eq!(config.top_origins, 5);
        assert_eq!(config.ip_version, None);
        assert_eq!(config.blackhole_community, "666");
        assert!(config.parallel);
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            AnalysisConfig::from_file("/this/file/does/not/exist.json"),
            Err(Error::Io(_))
        ));
    }
}
