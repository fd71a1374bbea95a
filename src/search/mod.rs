//! Search module
//!
//! This module contains the mode dispatcher and the three matcher
//! families behind it:
//! - Literal: case-sensitive/insensitive substring search
//! - Word: literal search constrained to delimiter-bounded whole words
//! - Regex: forward/backward execution of the external regex engine
//!
//! All matchers share one scan contract: forward search finds the leftmost
//! match at or after `begin_pos`, backward search finds the rightmost
//! match at or before it, and `WrapMode::Wrap` re-attempts from the
//! opposite end of the text on failure.

pub mod engine;
mod literal;
mod regex;
mod types;
mod word;

pub use types::{Direction, SearchResult, SearchType, WrapMode, SEARCH_MAX};

pub(crate) use regex::replace_using_pattern;

use crate::preferences::DEFAULT_DELIMITERS;

/// Search `text` for `pattern`, beginning at `begin_pos`.
///
/// `begin_pos` is a byte offset; a negative value on a backward search
/// means "start from the true end of the text". `delimiters` supplies the
/// word-boundary set for the word modes; `None` selects the default
/// preference set.
///
/// An empty pattern never matches in the literal and word modes. The
/// regex modes hand the pattern to the engine unmodified, which defines
/// its own empty-pattern semantics.
///
/// Returns `None` when nothing matches. That is a normal outcome, not an
/// error, and invalid regex patterns are deliberately folded into it.
pub fn search_string(
    text: &str,
    pattern: &str,
    direction: Direction,
    search_type: SearchType,
    wrap: WrapMode,
    begin_pos: i64,
    delimiters: Option<&str>,
) -> Option<SearchResult> {
    let delimiters = delimiters.unwrap_or(DEFAULT_DELIMITERS);

    match search_type {
        SearchType::CaseSenseWord => {
            word::search_literal_word(text, pattern, true, direction, wrap, begin_pos, delimiters)
        }
        SearchType::LiteralWord => {
            word::search_literal_word(text, pattern, false, direction, wrap, begin_pos, delimiters)
        }
        SearchType::CaseSense => {
            literal::search_literal(text, pattern, true, direction, wrap, begin_pos)
        }
        SearchType::Literal => {
            literal::search_literal(text, pattern, false, direction, wrap, begin_pos)
        }
        SearchType::Regex => regex::search_regex(text, pattern, direction, wrap, begin_pos, false),
        SearchType::RegexNoCase => {
            regex::search_regex(text, pattern, direction, wrap, begin_pos, true)
        }
    }
}

/// Whether the latest hit of an incremental search wrapped past an end of
/// the text, judged against the begin position of the previous hit.
///
/// Callers use this to decide on wrap feedback (a beep, typically); the
/// feedback itself is policy and lives outside the engine.
pub fn incremental_search_wrapped(
    direction: Direction,
    begin_pos: i64,
    last_begin_pos: i64,
    match_start: usize,
) -> bool {
    let start = match_start as i64;
    match direction {
        Direction::Forward => {
            (start >= begin_pos && last_begin_pos < begin_pos)
                || (start < begin_pos && last_begin_pos >= begin_pos)
        }
        Direction::Backward => {
            (start <= begin_pos && last_begin_pos > begin_pos)
                || (start > begin_pos && last_begin_pos <= begin_pos)
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_literal_case_pairs() {
        let text = "Cat cat";
        let r = search_string(text, "CAT", Direction::Forward, SearchType::Literal, WrapMode::NoWrap, 0, None);
        assert_eq!(r.map(|r| r.start), Some(0));

        let r = search_string(text, "cat", Direction::Forward, SearchType::CaseSense, WrapMode::NoWrap, 0, None);
        assert_eq!(r.map(|r| r.start), Some(4));
    }

    #[test]
    fn test_dispatch_word_case_pairs() {
        let text = "Word words Word";
        let r = search_string(text, "word", Direction::Forward, SearchType::LiteralWord, WrapMode::NoWrap, 0, None);
        assert_eq!(r.map(|r| r.start), Some(0));

        let r = search_string(text, "word", Direction::Forward, SearchType::CaseSenseWord, WrapMode::NoWrap, 0, None);
        assert_eq!(r, None);
    }

    #[test]
    fn test_dispatch_regex_pairs() {
        let text = "abc ABC";
        let r = search_string(text, "a.c", Direction::Forward, SearchType::Regex, WrapMode::NoWrap, 1, None);
        assert_eq!(r, None);

        let r = search_string(text, "a.c", Direction::Forward, SearchType::RegexNoCase, WrapMode::NoWrap, 1, None);
        assert_eq!(r.map(|r| r.start), Some(4));
    }

    #[test]
    fn test_spec_example_wraparound() {
        let text = "foo bar foo";
        let r = search_string(text, "foo", Direction::Forward, SearchType::Literal, WrapMode::Wrap, 9, None).unwrap();
        assert_eq!((r.start, r.end), (0, 3));
    }

    #[test]
    fn test_incremental_wrap_detection_forward() {
        // previous hit began past the origin, new hit lands before it
        assert!(incremental_search_wrapped(Direction::Forward, 10, 12, 2));
        // both on the same side of the origin: no wrap
        assert!(!incremental_search_wrapped(Direction::Forward, 10, 12, 15));
    }

    #[test]
    fn test_incremental_wrap_detection_backward() {
        assert!(incremental_search_wrapped(Direction::Backward, 5, 3, 9));
        assert!(!incremental_search_wrapped(Direction::Backward, 5, 3, 2));
    }
}
