//! `"start:length:unit"` source-location descriptors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LocationError;

/// Identifier of a compilation unit (one source file as seen by the compiler).
///
/// The compiler numbers the files of one run from zero; the id is the third
/// field of every `src` descriptor inside that file's syntax tree.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceUnitId(u32);

impl SourceUnitId {
    /// Creates a `SourceUnitId` from a raw `u32` value.
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw `u32` value.
    pub fn as_raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for SourceUnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A byte range within a compilation unit, parsed from a `src` descriptor.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct SourceLocation {
    /// Byte offset of the first character.
    pub start: u32,
    /// Length of the range in bytes.
    pub length: u32,
    /// The compilation unit the range belongs to.
    pub unit: SourceUnitId,
}

impl SourceLocation {
    /// Creates a location from its three components.
    pub fn new(start: u32, length: u32, unit: SourceUnitId) -> Self {
        Self {
            start,
            length,
            unit,
        }
    }
}

impl FromStr for SourceLocation {
    type Err = LocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split(':').collect();
        if fields.len() != 3 {
            return Err(LocationError::FieldCount {
                descriptor: s.to_string(),
                found: fields.len(),
            });
        }

        let parse = |field: &'static str, value: &str| {
            value
                .parse::<u32>()
                .map_err(|_| LocationError::InvalidField {
                    descriptor: s.to_string(),
                    field,
                    value: value.to_string(),
                })
        };

        Ok(Self {
            start: parse("start", fields[0])?,
            length: parse("length", fields[1])?,
            unit: SourceUnitId(parse("unit", fields[2])?),
        })
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.start, self.length, self.unit)
    }
}
