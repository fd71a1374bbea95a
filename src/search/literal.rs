//! Literal substring matcher
//!
//! Case-sensitive and case-insensitive plain-text search, forward and
//! backward, with optional wraparound. Case-insensitive matching
//! pre-computes an upper-cased and a lower-cased copy of the pattern and
//! accepts a candidate when every byte equals one of the two variants
//! (a 1:1 per-character fold, not full Unicode case folding).

use crate::search::types::{Direction, SearchResult, WrapMode};

/// Build the upper/lower pattern variants used by the dual compare.
///
/// For case-sensitive searches both variants are the pattern itself, which
/// lets the scan loop stay branch-free on sensitivity.
pub(crate) fn case_variants(pattern: &str, case_sensitive: bool) -> (Vec<u8>, Vec<u8>) {
    if case_sensitive {
        (pattern.as_bytes().to_vec(), pattern.as_bytes().to_vec())
    } else {
        (
            pattern.as_bytes().to_ascii_uppercase(),
            pattern.as_bytes().to_ascii_lowercase(),
        )
    }
}

/// Try to match the pattern variants at byte position `at`.
pub(crate) fn match_at(text: &[u8], uc: &[u8], lc: &[u8], at: usize) -> Option<SearchResult> {
    if at + uc.len() > text.len() {
        return None;
    }
    for (i, (&u, &l)) in uc.iter().zip(lc.iter()).enumerate() {
        let c = text[at + i];
        if c != u && c != l {
            return None;
        }
    }
    Some(SearchResult::plain(at, at + uc.len()))
}

/// Search `text` for `pattern` starting at `begin_pos`.
///
/// Forward scans `begin_pos..len` and, on failure with wrap enabled,
/// `0..begin_pos`. Backward is the mirror: `begin_pos..=0` downward, then
/// `len..=begin_pos` downward. A negative `begin_pos` on a backward search
/// means "start from the true end of the text": the primary scan is
/// skipped entirely and only the wrap pass runs.
pub(crate) fn search_literal(
    text: &str,
    pattern: &str,
    case_sensitive: bool,
    direction: Direction,
    wrap: WrapMode,
    begin_pos: i64,
) -> Option<SearchResult> {
    if pattern.is_empty() {
        return None;
    }

    let bytes = text.as_bytes();
    let (uc, lc) = case_variants(pattern, case_sensitive);

    match direction {
        Direction::Forward => {
            let begin = begin_pos.clamp(0, text.len() as i64) as usize;

            // search from begin_pos to the end of the text
            for at in begin..text.len() {
                if let Some(result) = match_at(bytes, &uc, &lc, at) {
                    return Some(result);
                }
            }

            if wrap == WrapMode::NoWrap {
                return None;
            }

            // wrap: search from the start of the text up to begin_pos
            for at in 0..begin {
                if let Some(result) = match_at(bytes, &uc, &lc, at) {
                    return Some(result);
                }
            }

            None
        }
        Direction::Backward => {
            if begin_pos >= 0 {
                let begin = (begin_pos as usize).min(text.len());

                // search from begin_pos down to the start of the text
                for at in (0..=begin).rev() {
                    if let Some(result) = match_at(bytes, &uc, &lc, at) {
                        return Some(result);
                    }
                }
            }

            if wrap == WrapMode::NoWrap {
                return None;
            }

            // wrap: search from the end of the text down to begin_pos
            let begin = begin_pos.max(0) as usize;
            for at in (begin..=text.len()).rev() {
                if let Some(result) = match_at(bytes, &uc, &lc, at) {
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
