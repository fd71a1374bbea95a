//! Selection-match probe
//!
//! Decides whether the current selection is an *exact* match of the
//! search string under the active mode. Callers use this to pick between
//! "replace the selection" and "search, then replace": if the user just
//! searched, the selection holds the hit and should be replaced in place
//! regardless of where the cursor sits.

use crate::buffer::TextBuffer;
use crate::search::{search_string, Direction, SearchResult, SearchType, WrapMode, SEARCH_MAX};
use crate::string_utils::{ceil_char_boundary, floor_char_boundary};

/// Bytes of context extracted on each side of the selection for regex
/// lookahead/lookbehind. Non-regex modes need none.
const REGEX_LOOK_CONTEXT: usize = 1000;

/// If the selection exactly matches `pattern` under `search_type`, return
/// its bounds and extents in document coordinates.
///
/// Returns `None` ("cannot act on the selection", never an error) when
/// there is no selection, the selection exceeds the maximum search length,
/// a rectangular selection spans multiple lines, or the selection text is
/// not an exact match.
pub fn search_matches_selection(
    buf: &TextBuffer,
    pattern: &str,
    search_type: SearchType,
    delimiters: Option<&str>,
) -> Option<SearchResult> {
    let sel = buf.selection()?;
    let look_context = if search_type.is_regex() {
        REGEX_LOOK_CONTEXT
    } else {
        0
    };

    let (left, right) = if sel.rectangular {
        // a rectangle is only probed when it covers a single line
        if buf.start_of_line(sel.start) != buf.start_of_line(sel.end) {
            return None;
        }
        buf.simple_selection()?
    } else {
        (sel.start, sel.end)
    };

    if right - left > SEARCH_MAX {
        return None;
    }

    // the selection text plus surrounding context for lookaround
    let text = buf.text();
    let string_start = floor_char_boundary(text, left.saturating_sub(look_context));
    let string_end = ceil_char_boundary(text, (right + look_context).min(text.len()));
    let string = &text[string_start..string_end];
    if string.is_empty() {
        return None;
    }

    let sel_len = right - left;
    let begin_pos = left - string_start;

    // we only care about an exact match, but the dispatcher applies the
    // correct matching algorithm for the mode
    let result = search_string(
        string,
        pattern,
        Direction::Forward,
        search_type,
        WrapMode::NoWrap,
        begin_pos as i64,
        delimiters,
    )?;

    if result.start != begin_pos || result.end - result.start != sel_len {
        return None;
    }

    // map the extents back into document coordinates
    Some(SearchResult {
        start: left,
        end: right,
        extent_backward: left - (result.start - result.extent_backward),
        extent_forward: right + (result.extent_forward - result.end),
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
