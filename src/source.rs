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
//! Module providing the routing elements stored in dump files. Decoding the MRT format is left to
//! `bgpkit-parser`; the analyses only see [`RoutingElement`]s.
use std::{
    collections::{HashMap, VecDeque},
    fs::File,
    io::{BufReader, Read},
    path::{Path, PathBuf},
};

use bgpkit_parser::{BgpElem, BgpkitParser, Elementor, ParserError};
use serde::{Deserialize, Serialize};

use crate::{records::RoutingElement, Error};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, strum::Display,
)]
/// IP version of a prefix.
pub enum IpVersion {
    #[serde(rename = "ipv4")]
    #[strum(serialize = "ipv4")]
    V4,
    #[serde(rename = "ipv6")]
    #[strum(serialize = "ipv6")]
    V6,
}

/// Filter applied by an [`ElementSource`] before handing out elements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ElementFilter {
    /// Only yield elements whose prefix has this IP version. Elements without a (parsable) prefix
    /// are dropped as well.
    pub ip_version: Option<IpVersion>,
}

impl ElementFilter {
    /// Filter that only lets IPv4 elements through.
    pub fn ipv4() -> Self {
        Self {
            ip_version: Some(IpVersion::V4),
        }
    }

    pub fn matches(&self, elem: &RoutingElement) -> bool {
        match self.ip_version {
            None => true,
            Some(version) => elem.ip_version() == Some(version),
        }
    }
}

/// Stream of elements from a single dump, in file order. A decoding error ends the stream.
pub type ElementStream<'a> = Box<dyn Iterator<Item = Result<RoutingElement, Error>> + 'a>;

/// Something that can open dump files and yield their routing elements.
pub trait ElementSource {
    /// Open the dump at `path`. The returned stream yields the elements in file order, restricted
    /// to those matching `filter`.
    fn open<'a>(&'a self, path: &Path, filter: &ElementFilter)
        -> Result<ElementStream<'a>, Error>;
}

/// Reads uncompressed MRT table dumps and update files using `bgpkit-parser`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BgpkitSource;

impl ElementSource for BgpkitSource {
    fn open<'a>(
        &'a self,
        path: &Path,
        filter: &ElementFilter,
    ) -> Result<ElementStream<'a>, Error> {
        let file = File::open(path).map_err(|e| Error::Open {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        log::debug!("Reading elements from {path:?}");
        Ok(Box::new(MrtElements {
            parser: BgpkitParser::from_reader(BufReader::new(file)),
            elementor: Elementor::new(),
            pending: VecDeque::new(),
            path: path.to_path_buf(),
            filter: *filter,
            done: false,
        }))
    }
}

/// Expands the MRT records of a single file into routing elements, one record at a time.
struct MrtElements<R> {
    parser: BgpkitParser<R>,
    elementor: Elementor,
    pending: VecDeque<BgpElem>,
    path: PathBuf,
    filter: ElementFilter,
    done: bool,
}

impl<R: Read> Iterator for MrtElements<R> {
    type Item = Result<RoutingElement, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(elem) = self.pending.pop_front() {
                let elem = RoutingElement::from(elem);
                if self.filter.matches(&elem) {
                    return Some(Ok(elem));
                }
                continue;
            }

            if self.done {
                return None;
            }

            match self.parser.next_record() {
                Ok(record) => self.pending.extend(self.elementor.record_to_elems(record)),
                Err(e) if matches!(e.error, ParserError::EofExpected) => {
                    self.done = true;
                    return None;
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(Error::Parse {
                        path: self.path.clone(),
                        reason: e.to_string(),
                    }));
                }
            }
        }
    }
}

/// Source serving already decoded dumps from memory, e.g., for replaying recorded elements.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    dumps: HashMap<PathBuf, Vec<RoutingElement>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the elements of the dump at `path`, replacing any previous content.
    pub fn insert(&mut self, path: impl Into<PathBuf>, elements: Vec<RoutingElement>) {
        self.dumps.insert(path.into(), elements);
    }

    /// Builder-style version of [`MemorySource::insert`].
    pub fn with_dump(mut self, path: impl Into<PathBuf>, elements: Vec<RoutingElement>) -> Self {
        self.insert(path, elements);
        self
    }
}

impl ElementSource for MemorySource {
    fn open<'a>(
        &'a self,
        path: &Path,
        filter: &ElementFilter,
    ) -> Result<ElementStream<'a>, Error> {
        let elements = self.dumps.get(path).ok_or_else(|| Error::Open {
            path: path.to_path_buf(),
            reason: "no such dump".to_string(),
        })?;
        let filter = *filter;
        Ok(Box::new(
            elements
                .iter()
                .filter(move |e| filter.matches(e))
                .cloned()
                .map(Ok),
        ))
    }
}
