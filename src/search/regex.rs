//! Regular expression matcher
//!
//! Wraps the engine adapter for forward/backward search with wraparound,
//! and provides the recompile-and-rematch template substitution used by
//! the replace operations.
//!
//! A compile or execution failure is downgraded to "no match" here: the
//! engine boundary assumes patterns were validated before a live search
//! request reaches it.

use log::debug;

use crate::error::{Error, Result};
use crate::search::engine::CompiledPattern;
use crate::search::types::{Direction, SearchResult, WrapMode};

pub(crate) fn search_regex(
    text: &str,
    pattern: &str,
    direction: Direction,
    wrap: WrapMode,
    begin_pos: i64,
    case_insensitive: bool,
) -> Option<SearchResult> {
    let re = match CompiledPattern::compile(pattern, case_insensitive) {
        Ok(re) => re,
        Err(err) => {
            debug!("invalid search pattern '{}': {}", pattern, err);
            return None;
        }
    };

    match direction {
        Direction::Forward => forward_regex_search(text, &re, wrap, begin_pos),
        Direction::Backward => backward_regex_search(text, &re, wrap, begin_pos),
    }
}

fn forward_regex_search(
    text: &str,
    re: &CompiledPattern,
    wrap: WrapMode,
    begin_pos: i64,
) -> Option<SearchResult> {
    let begin = begin_pos.clamp(0, text.len() as i64) as usize;

    // search from begin_pos to the end of the text
    if let Some(m) = re.execute(text, begin, text.len(), false) {
        return Some(m.as_result());
    }

    if wrap == WrapMode::NoWrap {
        return None;
    }

    // wrap: search from the beginning of the text up to begin_pos
    re.execute(text, 0, begin, false).map(|m| m.as_result())
}

fn backward_regex_search(
    text: &str,
    re: &CompiledPattern,
    wrap: WrapMode,
    begin_pos: i64,
) -> Option<SearchResult> {
    // search from begin_pos to the start of the text. A negative begin_pos
    // says begin searching from the far end of the text. The window ends at
    // begin_pos with no following context: `$` and lookahead treat it as
    // end-of-input, even mid-line.
    if begin_pos >= 0 {
        if let Some(m) = re.execute(text, 0, begin_pos as usize, true) {
            return Some(m.as_result());
        }
    }

    if wrap == WrapMode::NoWrap {
        return None;
    }

    // wrap: search from the end of the text down to begin_pos
    let begin = begin_pos.max(0) as usize;
    re.execute(text, begin, text.len(), true).map(|m| m.as_result())
}

/// Substitute `template` for a match of `pattern` in `source`.
///
/// Re-compiles the expression and re-runs the match on the already-matched
/// text, which lets callers keep passing plain strings around between the
/// search that found the match and the replace that consumes it. `source`
/// must start at the match's backward extent, with `begin_pos` the match
/// start relative to it.
pub(crate) fn replace_using_pattern(
    pattern: &str,
    template: &str,
    source: &str,
    begin_pos: usize,
    case_insensitive: bool,
) -> Result<String> {
    let re = CompiledPattern::compile(pattern, case_insensitive)?;
    let m = re
        .execute(source, begin_pos, source.len(), false)
        .ok_or_else(|| Error::Pattern {
            message: format!("pattern '{}' failed to re-match during substitution", pattern),
        })?;
    m.substitute(source, template)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
