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
//! Module defining the record data type of routing elements consumed by all analyses.
use std::{collections::HashSet, str::FromStr};

use bgpkit_parser::models::{BgpElem, ElemType};
use ipnet::IpNet;
use serde::{Deserialize, Serialize};

use crate::source::IpVersion;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Deserialize,
    Serialize,
    strum::Display,
    strum_macros::EnumString,
)]
/// Kind of a routing element, abbreviated the way BGP dumps print them.
pub enum ElementType {
    #[serde(rename = "A")]
    #[strum(serialize = "A")]
    Announce,
    #[serde(rename = "W")]
    #[strum(serialize = "W")]
    Withdraw,
    #[serde(rename = "S")]
    #[strum(serialize = "S")]
    State,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
/// A single decoded routing element: one prefix of a table dump entry, or one prefix announced or
/// withdrawn by an update.
pub struct RoutingElement {
    pub elem_type: ElementType,
    /// Prefix in CIDR notation. Empty for state elements.
    pub prefix: String,
    pub peer_address: String,
    /// AS path tokens with the origin last. Empty if the element carries no AS path.
    pub as_path: Vec<String>,
    pub communities: Vec<String>,
    /// Seconds since the epoch
    pub timestamp: f64,
}

impl RoutingElement {
    /// Create an announcement. `as_path` is given as it is printed, e.g., `"3356 1299 100"`.
    pub fn announce(
        peer_address: impl Into<String>,
        prefix: impl Into<String>,
        as_path: &str,
        communities: &[&str],
        timestamp: f64,
    ) -> Self {
        Self {
            elem_type: ElementType::Announce,
            prefix: prefix.into(),
            peer_address: peer_address.into(),
            as_path: parse_as_path(as_path),
            communities: communities.iter().map(|c| c.to_string()).collect(),
            timestamp,
        }
    }

    /// Create a withdrawal.
    pub fn withdraw(
        peer_address: impl Into<String>,
        prefix: impl Into<String>,
        timestamp: f64,
    ) -> Self {
        Self {
            elem_type: ElementType::Withdraw,
            prefix: prefix.into(),
            peer_address: peer_address.into(),
            as_path: Vec::new(),
            communities: Vec::new(),
            timestamp,
        }
    }

    /// Create a peer state change.
    pub fn state(peer_address: impl Into<String>, timestamp: f64) -> Self {
        Self {
            elem_type: ElementType::State,
            prefix: String::new(),
            peer_address: peer_address.into(),
            as_path: Vec::new(),
            communities: Vec::new(),
            timestamp,
        }
    }

    /// Whether this element refers to a prefix at all (state elements don't).
    pub fn has_prefix(&self) -> bool {
        self.elem_type != ElementType::State && !self.prefix.is_empty()
    }

    /// The origin AS, i.e., the last token of the AS path.
    pub fn origin(&self) -> Option<&str> {
        self.as_path.last().map(String::as_str)
    }

    /// The set of ASes on the path. Prepending and loops collapse into a single entry.
    pub fn distinct_ases(&self) -> HashSet<&str> {
        self.as_path.iter().map(String::as_str).collect()
    }

    /// Check if any community contains `marker` in its textual form, e.g., `"666"` matches
    /// `"65535:666"`.
    pub fn has_community_containing(&self, marker: &str) -> bool {
        self.communities.iter().any(|c| c.contains(marker))
    }

    /// IP version of the prefix, or `None` if the prefix cannot be parsed.
    pub fn ip_version(&self) -> Option<IpVersion> {
        match IpNet::from_str(&self.prefix).ok()? {
            IpNet::V4(_) => Some(IpVersion::V4),
            IpNet::V6(_) => Some(IpVersion::V6),
        }
    }
}

/// Split a printed AS path into its tokens. AS sets (e.g., `{1,2}`) remain a single token.
pub fn parse_as_path(as_path: &str) -> Vec<String> {
    as_path.split_whitespace().map(str::to_string).collect()
}

impl From<BgpElem> for RoutingElement {
    fn from(elem: BgpElem) -> Self {
        Self {
            elem_type: match elem.elem_type {
                ElemType::ANNOUNCE => ElementType::Announce,
                ElemType::WITHDRAW => ElementType::Withdraw,
            },
            prefix: elem.prefix.prefix.to_string(),
            peer_address: elem.peer_ip.to_string(),
            as_path: elem
                .as_path
                .map(|path| parse_as_path(&path.to_string()))
                .unwrap_or_default(),
            communities: elem
                .communities
                .map(|cs| cs.iter().map(|c| c.to_string()).collect())
                .unwrap_or_default(),
            timestamp: elem.timestamp,
        }
    }
}
