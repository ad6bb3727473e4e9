//! Parsing of human-entered source references
//!
//! A reference is usually a channel URL. Two shapes are recognised:
//! `.../channel/<id>` carries the stable id literally, `.../@<handle>` only
//! carries a handle that has to be looked up.

use feedwatch_core::{DIRECT_ID_MARKER, HANDLE_MARKER};

/// What a reference tells us without any network call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceReference<'a> {
    /// The reference embeds the stable id
    DirectId(&'a str),
    /// Only a handle is present
    Handle(&'a str),
}

impl<'a> SourceReference<'a> {
    /// Classify `input`; `None` when it has neither shape
    pub fn parse(input: &'a str) -> Option<Self> {
        if let Some(id) = direct_id(input) {
            return Some(SourceReference::DirectId(id));
        }
        handle(input).map(SourceReference::Handle)
    }
}

/// Text after the last `/channel/`, up to the next path, query or fragment
/// separator
pub fn direct_id(input: &str) -> Option<&str> {
    let (_, rest) = input.rsplit_once(DIRECT_ID_MARKER)?;
    non_empty(first_segment(rest))
}

/// Text after the last `@`, up to the next path, query or fragment separator
pub fn handle(input: &str) -> Option<&str> {
    let (_, rest) = input.trim().rsplit_once(HANDLE_MARKER)?;
    non_empty(first_segment(rest))
}

fn first_segment(rest: &str) -> &str {
    rest.split(['/', '?', '#']).next().unwrap_or_default().trim()
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}
