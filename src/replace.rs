//! Replace operations
//!
//! Three consumers of the matchers live here:
//! - `replace_all_in_string`: whole-text replace-all as a two-pass
//!   measure/build rebuild
//! - `replace_in_selection`: replace-all bounded to a linear or
//!   rectangular selection, with the truncated-substitution policy gate
//! - `replace_once`: single replacement at the selection or the next match
//!
//! Regex substitutions are recomputed per match from the matched extent's
//! surrounding text, so templates can reference capture groups that lie in
//! lookaround context outside the reported match.

use log::warn;

use crate::buffer::TextBuffer;
use crate::error::{Error, Result};
use crate::preferences::TruncSubstitution;
use crate::probe::search_matches_selection;
use crate::search::{
    replace_using_pattern, search_string, Direction, SearchResult, SearchType, WrapMode,
};
use crate::string_utils::ceil_char_boundary;

// ─────────────────────────────────────────────────────────────────────────────
// Cursor Advance
// ─────────────────────────────────────────────────────────────────────────────

/// Where the next search begins after a match: its end, or one past it
/// when the match was empty, to guarantee forward progress.
fn advance_cursor(text: &str, r: &SearchResult) -> i64 {
    if r.is_empty() {
        ceil_char_boundary(text, r.end + 1) as i64
    } else {
        r.end as i64
    }
}

/// Expand the substitution for one regex match, tolerating failure: an
/// over-long result is clipped (and logged), any other failure
/// substitutes nothing. Used by the measure/build passes, which have no
/// policy hook of their own.
fn substitute_tolerant(
    text: &str,
    pattern: &str,
    template: &str,
    r: &SearchResult,
    search_type: SearchType,
) -> String {
    let source = &text[r.extent_backward..];
    match replace_using_pattern(
        pattern,
        template,
        source,
        r.start - r.extent_backward,
        search_type.is_case_insensitive(),
    ) {
        Ok(expanded) => expanded,
        Err(Error::SubstitutionTooLong { truncated }) => {
            warn!(
                "substitution for match at {} exceeded the length limit; clipped to {} bytes",
                r.start,
                truncated.len()
            );
            truncated
        }
        Err(err) => {
            warn!("substitution for match at {} failed: {}", r.start, err);
            String::new()
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Replace All
// ─────────────────────────────────────────────────────────────────────────────

/// Result of a whole-text replace-all: the rebuilt text covering
/// `[copy_start, copy_end)` of the original. The caller splices `text`
/// back into its document over exactly that range; text outside it is
/// untouched by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceAll {
    pub text: String,
    /// Start of the first match in the original text.
    pub copy_start: usize,
    /// End of the last match in the original text.
    pub copy_end: usize,
}

/// Replace every occurrence of `pattern` in `text` with `replacement`.
///
/// Two passes: a measure pass runs the full search sequence to size the
/// output (regex substitutions expand or shrink unpredictably), then a
/// build pass re-runs the identical sequence, alternating copied spans
/// and substitutions. Returns `None` when the pattern is empty or nothing
/// matches.
pub fn replace_all_in_string(
    text: &str,
    pattern: &str,
    replacement: &str,
    search_type: SearchType,
    delimiters: Option<&str>,
) -> Option<ReplaceAll> {
    if pattern.is_empty() {
        return None;
    }

    // rehearse the search to determine the size of the rebuilt text;
    // nothing is substituted yet
    let mut copy_start = None;
    let mut copy_end = 0;
    let mut remove_len = 0;
    let mut add_len = 0;
    let mut begin: i64 = 0;

    while let Some(r) = search_string(
        text,
        pattern,
        Direction::Forward,
        search_type,
        WrapMode::NoWrap,
        begin,
        delimiters,
    ) {
        copy_start.get_or_insert(r.start);
        copy_end = r.end;
        begin = advance_cursor(text, &r);
        remove_len += r.len();
        add_len += if search_type.is_regex() {
            substitute_tolerant(text, pattern, replacement, &r, search_type).len()
        } else {
            replacement.len()
        };
        if r.end == text.len() {
            break;
        }
    }

    let copy_start = copy_start?;

    let mut out = String::with_capacity((copy_end - copy_start) - remove_len + add_len);

    // scan again, substituting the replace string and copying the spans
    // between matches
    let mut begin: i64 = 0;
    let mut last_end = 0;
    let mut first = true;

    while let Some(r) = search_string(
        text,
        pattern,
        Direction::Forward,
        search_type,
        WrapMode::NoWrap,
        begin,
        delimiters,
    ) {
        if !first {
            out.push_str(&text[last_end..r.start]);
        }
        if search_type.is_regex() {
            out.push_str(&substitute_tolerant(text, pattern, replacement, &r, search_type));
        } else {
            out.push_str(replacement);
        }
        last_end = r.end;
        begin = advance_cursor(text, &r);
        first = false;
        if r.end == text.len() {
            break;
        }
    }

    Some(ReplaceAll {
        text: out,
        copy_start,
        copy_end,
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Replace in Selection
// ─────────────────────────────────────────────────────────────────────────────

/// Outcome of a successful in-selection replace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionReplace {
    /// Number of replacements applied.
    pub replaced: usize,
    /// Buffer position just past the last replacement.
    pub cursor: usize,
}

/// Consult the truncated-substitution policy. `Fail` and `Silent` both
/// cancel (telling the user why is the caller's job); `WarnAndAsk` defers
/// to the caller-supplied decision.
fn substitution_cancelled(
    policy: TruncSubstitution,
    confirm_data_loss: &mut dyn FnMut() -> bool,
) -> bool {
    match policy {
        TruncSubstitution::Silent | TruncSubstitution::Fail => true,
        TruncSubstitution::WarnAndAsk => !confirm_data_loss(),
        TruncSubstitution::Ignore => false,
    }
}

/// Replace every occurrence of `pattern` within the current selection.
///
/// A rectangular selection is extended to full lines, and a candidate
/// match is rejected when its display-column span falls outside the
/// selection's column bounds. A rejected match that straddles the left
/// column bound advances the cursor by a single position, because a
/// legitimate match may start between the rejected match's boundaries.
///
/// All replacements happen in a temporary copy applied as one edit.
/// Returns `Ok(None)` when there is no selection or nothing matches,
/// `Ok(Some(..))` on success, and `Err(SubstitutionTooLong)` when a
/// substitution overflowed and `policy` (or the `confirm_data_loss`
/// decision for `WarnAndAsk`) cancelled the operation; the buffer is
/// untouched in that case.
pub fn replace_in_selection(
    buf: &mut TextBuffer,
    pattern: &str,
    replacement: &str,
    search_type: SearchType,
    delimiters: Option<&str>,
    policy: TruncSubstitution,
    mut confirm_data_loss: impl FnMut() -> bool,
) -> Result<Option<SelectionReplace>> {
    let Some(sel) = buf.selection() else {
        return Ok(None);
    };

    let (sel_start, sel_end) = if sel.rectangular {
        (buf.start_of_line(sel.start), buf.end_of_line(sel.end))
    } else {
        (sel.start, sel.end)
    };

    let file_string = buf.slice(sel_start, sel_end).to_string();

    // replacements go into a temporary copy so the buffer sees one edit
    let mut temp = file_string.clone();

    let mut begin: i64 = 0;
    let mut real_offset: i64 = 0;
    let mut cursor_pos = 0;
    let mut any_found = false;
    let mut replaced = 0;

    while let Some(r) = search_string(
        &file_string,
        pattern,
        Direction::Forward,
        search_type,
        WrapMode::NoWrap,
        begin,
        delimiters,
    ) {
        any_found = true;

        // a rectangular selection admits only matches inside its columns
        if sel.rectangular {
            let line_start = buf.start_of_line(sel_start + r.start);
            let start_col = buf.count_display_chars(line_start, sel_start + r.start);
            let end_col = buf.count_display_chars(line_start, sel_start + r.end);

            if start_col < sel.rect_start || end_col > sel.rect_end {
                if r.end == file_string.len() {
                    break;
                }
                begin = if start_col < sel.rect_start && end_col > sel.rect_start {
                    // the rejected match straddles the left bound: a valid
                    // match may start inside it, so advance minimally
                    begin + 1
                } else {
                    advance_cursor(&file_string, &r)
                };
                continue;
            }
        }

        // regexes can treat the artificial range end as a line end and
        // match a fictional empty line starting there
        if r.start == file_string.len() {
            break;
        }

        let offset_start = (r.start as i64 + real_offset) as usize;
        let offset_end = (r.end as i64 + real_offset) as usize;

        let substitution: String = if search_type.is_regex() {
            let source_start = (r.extent_backward as i64 + real_offset) as usize;
            let source = temp[source_start..].to_string();
            match replace_using_pattern(
                pattern,
                replacement,
                &source,
                r.start - r.extent_backward,
                search_type.is_case_insensitive(),
            ) {
                Ok(expanded) => expanded,
                Err(Error::SubstitutionTooLong { truncated }) => {
                    if substitution_cancelled(policy, &mut confirm_data_loss) {
                        return Err(Error::SubstitutionTooLong { truncated });
                    }
                    // the user chose data loss over cancellation
                    warn!(
                        "applying substitution truncated to {} bytes",
                        truncated.len()
                    );
                    truncated
                }
                Err(err) => return Err(err),
            }
        } else {
            replacement.to_string()
        };

        real_offset += substitution.len() as i64 - (r.end - r.start) as i64;
        temp.replace_range(offset_start..offset_end, &substitution);
        replaced += 1;
        cursor_pos = r.end;

        if r.end == file_string.len() {
            break;
        }
        begin = advance_cursor(&file_string, &r);
    }

    if !any_found {
        return Ok(None);
    }

    if replaced > 0 {
        buf.replace_range(sel_start, sel_end, &temp);

        // leave non-rectangular selections selected; rectangular column
        // bounds after replacement would be arbitrary
        if !sel.rectangular {
            buf.select(sel_start, (sel_end as i64 + real_offset) as usize);
        }
    }

    Ok(Some(SelectionReplace {
        replaced,
        cursor: (sel_start as i64 + cursor_pos as i64 + real_offset) as usize,
    }))
}

// ─────────────────────────────────────────────────────────────────────────────
// Single Replace
// ─────────────────────────────────────────────────────────────────────────────

/// Replace one occurrence of `pattern`: the selection when it is itself
/// an exact match (the user is search-then-replacing, wherever the cursor
/// sits), otherwise the next match from `cursor_pos` in `direction`.
///
/// Returns the replaced span `(start, end)` in post-edit coordinates, or
/// `Ok(None)` when nothing matched. An over-long regex substitution is
/// surfaced as `Err(SubstitutionTooLong)` with the buffer untouched.
pub fn replace_once(
    buf: &mut TextBuffer,
    pattern: &str,
    replacement: &str,
    direction: Direction,
    search_type: SearchType,
    wrap: WrapMode,
    cursor_pos: usize,
    delimiters: Option<&str>,
) -> Result<Option<(usize, usize)>> {
    let target = match search_matches_selection(buf, pattern, search_type, delimiters) {
        Some(r) => Some(r),
        None => {
            // start past the insert position so the search doesn't find
            // the hit the cursor is already on
            let begin = match direction {
                Direction::Forward => cursor_pos as i64,
                Direction::Backward => cursor_pos as i64 - 1,
            };
            search_string(
                buf.text(),
                pattern,
                direction,
                search_type,
                wrap,
                begin,
                delimiters,
            )
        }
    };

    let Some(r) = target else {
        return Ok(None);
    };

    let substitution: String = if search_type.is_regex() {
        let text = buf.text();
        let source_end = ceil_char_boundary(text, (r.extent_forward + 1).min(text.len()));
        let source = text[r.extent_backward..source_end].to_string();
        replace_using_pattern(
            pattern,
            replacement,
            &source,
            r.start - r.extent_backward,
            search_type.is_case_insensitive(),
        )?
    } else {
        replacement.to_string()
    };

    buf.replace_range(r.start, r.end, &substitution);
    Ok(Some((r.start, r.start + substitution.len())))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
