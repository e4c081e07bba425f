//! Recovery of library link references from unlinked bytecode.
//!
//! The compiler leaves a fixed-width placeholder wherever a library address
//! will be linked in. Placeholders start with `__`, followed by the library
//! name and padding, and are exactly as wide as a hex-encoded address. Since
//! `_` never occurs in hex, every `__` marks a placeholder.

use std::borrow::Cow;
use std::iter::FusedIterator;

use crate::types::{LinkReference, LinkReferences};

/// Width of an address slot in bytes.
pub const ADDRESS_SLOT_BYTES: usize = 20;

/// Group key under which all link references are recorded.
pub const UNKNOWN_SOURCE_GROUP: &str = "*";

/// Width of a placeholder in hex characters.
const PLACEHOLDER_LEN: usize = ADDRESS_SLOT_BYTES * 2;

const DELIMITER: &[u8] = b"__";

/// A placeholder found in bytecode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder<'a> {
    /// Position of the placeholder in hex characters.
    pub offset: usize,
    /// Library name embedded in the placeholder.
    pub name: Cow<'a, str>,
}

impl Placeholder<'_> {
    /// Position of the placeholder in bytes.
    pub fn byte_offset(&self) -> usize {
        self.offset / 2
    }
}

/// Iterator over the placeholders of a bytecode string, left to right.
///
/// Created by [`placeholders`].
#[derive(Debug, Clone)]
pub struct Placeholders<'a> {
    bytecode: &'a [u8],
    cursor: usize,
}

impl<'a> Iterator for Placeholders<'a> {
    type Item = Placeholder<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let offset = self.cursor + find(&self.bytecode[self.cursor..], DELIMITER)?;
        let end = (offset + PLACEHOLDER_LEN).min(self.bytecode.len());
        let body = &self.bytecode[offset + DELIMITER.len()..end];
        let name_len = find(body, DELIMITER).unwrap_or(body.len());

        // Skip the whole placeholder so its padding is not read as another one.
        self.cursor = end;

        Some(Placeholder {
            offset,
            name: String::from_utf8_lossy(&body[..name_len]),
        })
    }
}

impl FusedIterator for Placeholders<'_> {}

/// Returns an iterator over the placeholders in `bytecode`.
///
/// A placeholder truncated by the end of the string is still reported, with
/// whatever name text precedes the end.
pub fn placeholders(bytecode: &str) -> Placeholders<'_> {
    Placeholders {
        bytecode: bytecode.as_bytes(),
        cursor: 0,
    }
}

/// Builds the link-reference table for `bytecode`.
///
/// Occurrences of one library are listed in scan order. Bytecode without
/// placeholders, including malformed hex, yields an empty table.
pub fn scan(bytecode: &str) -> LinkReferences {
    let mut references = LinkReferences::new();
    for placeholder in placeholders(bytecode) {
        let start = placeholder.byte_offset();
        references
            .entry(UNKNOWN_SOURCE_GROUP.to_string())
            .or_default()
            .entry(placeholder.name.into_owned())
            .or_default()
            .push(LinkReference {
                start,
                length: ADDRESS_SLOT_BYTES,
            });
    }
    references
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
