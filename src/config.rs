// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Ephemeris search-path configuration: where to look for SE1/JPL
//! binary files, and the filename conventions used to find them.
//! (spec.md §4 data model / §6 external interfaces)

use crate::body::Body;
use crate::error::{Error, Result};
use crate::ephemeris::se1;

/// An ordered list of directories to search for ephemeris files, plus
/// whether the analytic fallback may be used if no file is found.
/// (spec.md §6)
#[derive(Clone, Debug)]
pub struct SearchPath {
    directories: Vec<String>,
    allow_fallback: bool,
}

fn split_path(raw: &str) -> Vec<String> {
    let separator = if raw.contains(';') { ';' } else { ':' };
    raw.split(separator)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

impl SearchPath {
    /// An empty search path with fallback enabled.
    pub fn new() -> Self {
        SearchPath {
            directories: Vec::new(),
            allow_fallback: true,
        }
    }

    /// Build a search path from a raw, possibly multi-directory
    /// string, auto-detecting `;` vs `:` as the separator (the former
    /// whenever present, since `:` alone is ambiguous with Windows
    /// drive letters). (spec.md §6)
    pub fn from_raw(raw: &str) -> Self {
        SearchPath {
            directories: split_path(raw),
            allow_fallback: true,
        }
    }

    /// Build a search path from the named environment variable, or an
    /// empty one if it isn't set. (spec.md §6)
    pub fn from_env(var_name: &str) -> Self {
        match std::env::var(var_name) {
            Ok(raw) => Self::from_raw(&raw),
            Err(_) => Self::new(),
        }
    }

    /// Append a directory to the end of the search order.
    pub fn push(&mut self, directory: impl Into<String>) {
        self.directories.push(directory.into());
    }

    /// Disable the analytic Sun/Moon fallback: lookups that find no
    /// file will fail instead of falling back. (spec.md §6)
    pub fn deny_fallback(&mut self) {
        self.allow_fallback = false;
    }

    pub fn allows_fallback(&self) -> bool {
        self.allow_fallback
    }

    pub fn directories(&self) -> &[String] {
        &self.directories
    }

    /// The SE1 filename for `body` at calendar `year`, e.g.
    /// `sepl_18.se1` for a classical planet in the 1800s, `semo_20.se1`
    /// for the Moon in the 2000s. (spec.md §4.D)
    pub fn se1_filename(body: Body, year: i32) -> String {
        format!("{}_{:02}.se1", se1::file_prefix(body), se1::century_suffix(year))
    }

    /// The JPL DE filename for ephemeris number `de_number`, e.g.
    /// `de440.eph`. (spec.md §4.E)
    pub fn jpl_filename(de_number: i32) -> String {
        format!("de{de_number}.eph")
    }

    /// Search this path's directories, in order, for `filename`;
    /// `Err(ConfigurationInvalid)` if none contain it.
    pub fn resolve(&self, filename: &str) -> Result<String> {
        for dir in &self.directories {
            let candidate = format!("{}/{}", dir.trim_end_matches('/'), filename);
            if std::path::Path::new(&candidate).is_file() {
                return Ok(candidate);
            }
        }
        Err(Error::ConfigurationInvalid {
            reason: format!("{filename} not found in any of {:?}", self.directories),
        })
    }
}

impl Default for SearchPath {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separator_detection_prefers_semicolon() {
        let p = SearchPath::from_raw("/a/b;/c/d:e");
        assert_eq!(p.directories(), &["/a/b", "/c/d:e"]);
    }

    #[test]
    fn separator_detection_falls_back_to_colon() {
        let p = SearchPath::from_raw("/a/b:/c/d");
        assert_eq!(p.directories(), &["/a/b", "/c/d"]);
    }

    #[test]
    fn blank_segments_are_dropped() {
        let p = SearchPath::from_raw("/a/b::/c/d");
        assert_eq!(p.directories(), &["/a/b", "/c/d"]);
    }

    #[test]
    fn filename_conventions_match_century_and_body() {
        assert_eq!(SearchPath::se1_filename(Body::Moon, 1974), "semo_19.se1");
        assert_eq!(SearchPath::se1_filename(Body::Mars, 2001), "sepl_20.se1");
        assert_eq!(SearchPath::jpl_filename(440), "de440.eph");
    }

    #[test]
    fn resolve_fails_with_configuration_invalid_when_missing() {
        let p = SearchPath::from_raw("/nonexistent/dir");
        assert!(matches!(
            p.resolve("sepl_20.se1"),
            Err(Error::ConfigurationInvalid { .. })
        ));
    }

    #[test]
    fn new_search_path_allows_fallback_by_default() {
        let mut p = SearchPath::new();
        assert!(p.allows_fallback());
        p.deny_fallback();
        assert!(!p.allows_fallback());
    }
}
