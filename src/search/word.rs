//! Whole-word literal matcher
//!
//! Literal search constrained so the match is delimiter-bounded on both
//! sides, per a caller-supplied delimiter set.
//!
//! If the first/last character of the pattern is a normal word character
//! (not a delimiter, not whitespace) the corresponding neighbor of a trial
//! match must be a delimiter, whitespace, or the text boundary. If the
//! pattern's own edge character is itself a delimiter or whitespace, that
//! side's check is skipped, so a pattern that already begins or ends with
//! punctuation matches without requiring an extra boundary character.

use crate::search::literal::case_variants;
use crate::search::types::{Direction, SearchResult, WrapMode};

/// Word-boundary test: whitespace and every byte in the delimiter set
/// delimit words.
pub(crate) fn is_delimiter(b: u8, delimiters: &str) -> bool {
    b.is_ascii_whitespace() || delimiters.as_bytes().contains(&b)
}

fn match_word_at(
    text: &[u8],
    uc: &[u8],
    lc: &[u8],
    at: usize,
    delimiters: &str,
    cignore_left: bool,
    cignore_right: bool,
) -> Option<SearchResult> {
    if at + uc.len() > text.len() {
        return None;
    }
    for (i, (&u, &l)) in uc.iter().zip(lc.iter()).enumerate() {
        let c = text[at + i];
        if c != u && c != l {
            return None;
        }
    }

    let end = at + uc.len();

    // next char right delimits word?
    if !cignore_right && end < text.len() && !is_delimiter(text[end], delimiters) {
        return None;
    }

    // next char left delimits word?
    if !cignore_left && at > 0 && !is_delimiter(text[at - 1], delimiters) {
        return None;
    }

    Some(SearchResult::plain(at, end))
}

/// Search `text` for `pattern` as an isolated word, starting at `begin_pos`.
///
/// Scan structure (forward/backward/wrap, negative `begin_pos`) is
/// identical to the literal matcher.
pub(crate) fn search_literal_word(
    text: &str,
    pattern: &str,
    case_sensitive: bool,
    direction: Direction,
    wrap: WrapMode,
    begin_pos: i64,
    delimiters: &str,
) -> Option<SearchResult> {
    if pattern.is_empty() {
        return None;
    }

    let bytes = text.as_bytes();
    let pat = pattern.as_bytes();
    let (uc, lc) = case_variants(pattern, case_sensitive);

    let cignore_left = is_delimiter(pat[0], delimiters);
    let cignore_right = is_delimiter(pat[pat.len() - 1], delimiters);

    let try_at = |at: usize| {
        match_word_at(bytes, &uc, &lc, at, delimiters, cignore_left, cignore_right)
    };

    match direction {
        Direction::Forward => {
            let begin = begin_pos.clamp(0, text.len() as i64) as usize;

            for at in begin..text.len() {
                if let Some(result) = try_at(at) {
                    return Some(result);
                }
            }

            if wrap == WrapMode::NoWrap {
                return None;
            }

            for at in 0..begin {
                if let Some(result) = try_at(at) {
                    return Some(result);
                }
            }

            None
        }
        Direction::Backward => {
            if begin_pos >= 0 {
                let begin = (begin_pos as usize).min(text.len());
                for at in (0..=begin).rev() {
                    if let Some(result) = try_at(at) {
                        return Some(result);
                    }
                }
            }

            if wrap == WrapMode::NoWrap {
                return None;
            }

            let begin = begin_pos.max(0) as usize;
            for at in (begin..=text.len()).rev() {
                if let Some(result) = try_at(at) {
                    return Some(result);
                }
            }

            None
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
