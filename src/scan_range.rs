//! Scan range specifications.
//!
//! A range specification is a comma separated list of single scan numbers and
//! inclusive `start-end` ranges, e.g. `"5,10-12,8"`. Parsing expands it into the
//! concrete set of scan numbers to process.
//!
//! ```
//! use mzextract::scan_range::parse_scan_ids;
//!
//! let scans = parse_scan_ids("5,10-12,8")?;
//! assert_eq!(scans.into_iter().collect::<Vec<_>>(), vec![5, 8, 10, 11, 12]);
//! # Ok::<(), mzextract::scan_range::ScanRangeError>(())
//! ```
//!
//! Spaces are part of the accepted alphabet. Each number is trimmed of surrounding
//! spaces before parsing, so `"1 - 5"` is valid while `"1 0"` is not.

use std::collections::BTreeSet;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

/// Errors produced while parsing a scan range specification.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScanRangeError {
    /// The specification was empty.
    #[error("nothing specified")]
    NothingSpecified,

    /// A character outside `0-9`, `,`, `-` and space was found.
    #[error("invalid character '{character}' at position {position}")]
    InvalidCharacter {
        /// The offending character
        character: char,
        /// Byte offset of the character in the specification
        position: usize,
    },

    /// A token could not be interpreted as a number or a range.
    #[error("invalid format: '{0}'")]
    InvalidFormat(String),
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_digit() || c == ',' || c == '-' || c == ' '
}

fn parse_bound<T: FromStr>(part: &str, token: &str) -> Result<T, ScanRangeError> {
    part.trim_matches(' ')
        .parse::<T>()
        .map_err(|_| ScanRangeError::InvalidFormat(token.to_string()))
}

/// Expand `text` into its tokens, calling `insert` for every single value and
/// every inclusive range.
fn walk_tokens<T, F>(text: &str, mut insert: F) -> Result<(), ScanRangeError>
where
    T: FromStr,
    F: FnMut(T, Option<T>),
{
    if text.is_empty() {
        return Err(ScanRangeError::NothingSpecified);
    }

    if let Some((position, character)) = text.char_indices().find(|(_, c)| !is_allowed(*c)) {
        return Err(ScanRangeError::InvalidCharacter {
            character,
            position,
        });
    }

    for token in text.split(',') {
        if token.is_empty() {
            return Err(ScanRangeError::InvalidFormat(text.to_string()));
        }

        let parts: Vec<&str> = token.split('-').collect();
        match parts.as_slice() {
            [single] => insert(parse_bound(single, token)?, None),
            [start, end] => {
                let start = parse_bound(start, token)?;
                let end = parse_bound(end, token)?;
                insert(start, Some(end));
            }
            _ => return Err(ScanRangeError::InvalidFormat(token.to_string())),
        }
    }

    Ok(())
}

/// Parse a scan range specification into the set of scan numbers it names.
///
/// A reversed range such as `"3-1"` names no scans and is not an error.
///
/// Every named scan is materialized, so `"1-4000000000"` allocates billions of
/// set entries. Use [`scan_id_intervals`] when only the extent matters.
///
/// # Errors
/// - [`ScanRangeError::NothingSpecified`] for an empty string
/// - [`ScanRangeError::InvalidCharacter`] for characters outside `0-9 , -` and space
/// - [`ScanRangeError::InvalidFormat`] for empty tokens, unparseable numbers or
///   tokens with more than one `-`
pub fn parse_scan_ids(text: &str) -> Result<BTreeSet<u32>, ScanRangeError> {
    let mut scans = BTreeSet::new();
    walk_tokens::<u32, _>(text, |start, end| match end {
        Some(end) => scans.extend(start..=end),
        None => {
            scans.insert(start);
        }
    })?;
    Ok(scans)
}

/// Parse a scan range specification into sorted, disjoint, non-adjacent intervals.
///
/// Memory use follows the number of tokens rather than the number of scans.
/// Reversed ranges are dropped. Errors are those of [`parse_scan_ids`].
///
/// ```
/// use mzextract::scan_range::scan_id_intervals;
///
/// let intervals = scan_id_intervals("10-12,5,11-20,21,1-4000000000")?;
/// assert_eq!(intervals, vec![1..=4_000_000_000]);
/// # Ok::<(), mzextract::scan_range::ScanRangeError>(())
/// ```
pub fn scan_id_intervals(text: &str) -> Result<Vec<RangeInclusive<u32>>, ScanRangeError> {
    let mut intervals: Vec<(u32, u32)> = Vec::new();
    walk_tokens::<u32, _>(text, |start, end| {
        let end = end.unwrap_or(start);
        if start <= end {
            intervals.push((start, end));
        }
    })?;
    intervals.sort_unstable();

    let mut merged: Vec<(u32, u32)> = Vec::with_capacity(intervals.len());
    for (start, end) in intervals {
        match merged.last_mut() {
            Some(last) if start <= last.1.saturating_add(1) => last.1 = last.1.max(end),
            _ => merged.push((start, end)),
        }
    }
    Ok(merged.into_iter().map(|(start, end)| start..=end).collect())
}

/// Number of distinct scans named by a specification, without expanding it.
pub fn count_scan_ids(text: &str) -> Result<u64, ScanRangeError> {
    Ok(scan_id_intervals(text)?
        .into_iter()
        .map(|r| u64::from(*r.end() - *r.start()) + 1)
        .sum())
}

/// Parse an MS level selection using the same grammar as [`parse_scan_ids`].
///
/// Levels above 255 fail with [`ScanRangeError::InvalidFormat`].
pub fn parse_ms_levels(text: &str) -> Result<BTreeSet<u8>, ScanRangeError> {
    let mut levels = BTreeSet::new();
    walk_tokens::<u8, _>(text, |start, end| match end {
        Some(end) => levels.extend(start..=end),
        None => {
            levels.insert(start);
        }
    })?;
    Ok(levels)
}

/// A validated scan range specification that keeps its source text.
///
/// Usable directly as a clap argument or a TOML value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRange {
    text: String,
    scans: BTreeSet<u32>,
}

impl ScanRange {
    /// The specification as written.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The scan numbers named by the specification.
    pub fn scans(&self) -> &BTreeSet<u32> {
        &self.scans
    }

    /// Whether `scan` is selected.
    pub fn contains(&self, scan: u32) -> bool {
        self.scans.contains(&scan)
    }

    /// Consume the range, returning its scan set.
    pub fn into_scans(self) -> BTreeSet<u32> {
        self.scans
    }
}

impl FromStr for ScanRange {
    type Err = ScanRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let scans = parse_scan_ids(s)?;
        Ok(Self {
            text: s.to_string(),
            scans,
        })
    }
}

impl fmt::Display for ScanRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl<'de> Deserialize<'de> for ScanRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// A validated MS level selection that keeps its source text.
///
/// Usable directly as a clap argument or a TOML value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MsLevelRange {
    text: String,
    levels: BTreeSet<u8>,
}

impl MsLevelRange {
    /// The selection as written.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The MS levels named by the selection.
    pub fn levels(&self) -> &BTreeSet<u8> {
        &self.levels
    }

    /// Consume the selection, returning its level set.
    pub fn into_levels(self) -> BTreeSet<u8> {
        self.levels
    }
}

impl FromStr for MsLevelRange {
    type Err = ScanRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let levels = parse_ms_levels(s)?;
        Ok(Self {
            text: s.to_string(),
            levels,
        })
    }
}

impl fmt::Display for MsLevelRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl<'de> Deserialize<'de> for MsLevelRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
