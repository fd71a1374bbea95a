//! Core value types for the search engine
//!
//! This module defines the search mode enumeration, scan direction and wrap
//! behavior, and the `SearchResult` value returned by every matcher.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Limits
// ─────────────────────────────────────────────────────────────────────────────

/// Maximum length (in bytes) of a search string, of a selection the engine
/// will probe, and of a single substitution result.
pub const SEARCH_MAX: usize = 5119;

// ─────────────────────────────────────────────────────────────────────────────
// Search Mode
// ─────────────────────────────────────────────────────────────────────────────

/// The six matching semantics supported by the engine.
///
/// Word and case variants are orthogonal flags collapsed into named
/// combinations (regex has no word variant). The serialized names are
/// stable and used by macro/scripting layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SearchType {
    /// Case-insensitive literal substring search.
    #[default]
    #[serde(rename = "literal")]
    Literal,
    /// Case-sensitive literal substring search.
    #[serde(rename = "case")]
    CaseSense,
    /// Regular expression search with standard flags.
    #[serde(rename = "regex")]
    Regex,
    /// Case-insensitive literal search constrained to whole words.
    #[serde(rename = "word")]
    LiteralWord,
    /// Case-sensitive literal search constrained to whole words.
    #[serde(rename = "caseWord")]
    CaseSenseWord,
    /// Regular expression search with the case-insensitive flag.
    #[serde(rename = "regexNoCase")]
    RegexNoCase,
}

impl SearchType {
    /// The stable name string for this mode, as used by macros and
    /// serialized session state.
    pub fn to_name(self) -> &'static str {
        match self {
            SearchType::Literal => "literal",
            SearchType::CaseSense => "case",
            SearchType::Regex => "regex",
            SearchType::LiteralWord => "word",
            SearchType::CaseSenseWord => "caseWord",
            SearchType::RegexNoCase => "regexNoCase",
        }
    }

    /// Parse a mode name string. Returns `None` for unknown names.
    pub fn from_name(name: &str) -> Option<SearchType> {
        SearchType::all().iter().copied().find(|t| t.to_name() == name)
    }

    /// Whether this mode is one of the regular expression modes.
    pub fn is_regex(self) -> bool {
        matches!(self, SearchType::Regex | SearchType::RegexNoCase)
    }

    /// Whether this mode matches case-insensitively.
    pub fn is_case_insensitive(self) -> bool {
        matches!(
            self,
            SearchType::Literal | SearchType::LiteralWord | SearchType::RegexNoCase
        )
    }

    /// All modes, in stable name-table order.
    pub fn all() -> &'static [SearchType] {
        &[
            SearchType::Literal,
            SearchType::CaseSense,
            SearchType::Regex,
            SearchType::LiteralWord,
            SearchType::CaseSenseWord,
            SearchType::RegexNoCase,
        ]
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Direction and Wrap Behavior
// ─────────────────────────────────────────────────────────────────────────────

/// Scan direction. Backward search is a first-class operation, not a
/// post-processed reversal of a forward scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Whether a failed search re-attempts from the opposite end of the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapMode {
    Wrap,
    NoWrap,
}

// ─────────────────────────────────────────────────────────────────────────────
// Search Result
// ─────────────────────────────────────────────────────────────────────────────

/// A successful match: the half-open `[start, end)` byte range plus the
/// match "extents": the widest span of text the matcher actually examined.
///
/// For literal and word matches the extents equal the match bounds. Regex
/// matches with lookaround may have examined text outside `[start, end)`;
/// callers that need to recompute a substitution later must extract the
/// extent span, not just the match span.
///
/// Invariants: `start <= end`, `extent_backward <= start`,
/// `extent_forward >= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub start: usize,
    pub end: usize,
    pub extent_backward: usize,
    pub extent_forward: usize,
}

impl SearchResult {
    /// A result whose extents coincide with the match bounds, as produced
    /// by all non-regex matchers.
    pub fn plain(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            extent_backward: start,
            extent_forward: end,
        }
    }

    /// Length of the matched span in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the match is empty (regex can match zero-length spans).
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
