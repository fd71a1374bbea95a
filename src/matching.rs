//! Bracket and quote matching
//!
//! A nested-depth scan from a character to its complementary character,
//! optionally constrained so only characters in the same highlighting
//! style participate: matching a `(` inside a string literal must not
//! pair with a `)` in code. The style lookup is supplied by the caller;
//! this crate knows nothing about syntax highlighting itself.

use crate::search::Direction;

// ─────────────────────────────────────────────────────────────────────────────
// Matching Character Table
// ─────────────────────────────────────────────────────────────────────────────

struct CharMatch {
    c: char,
    matching: char,
    direction: Direction,
}

/// All matchable pairs. The first [`N_FLASH_CHARS`] entries are the ones
/// flashed on cursor movement; the rest are reachable only through
/// explicit goto/select-matching commands.
const MATCHING_CHARS: [CharMatch; 13] = [
    CharMatch { c: '{', matching: '}', direction: Direction::Forward },
    CharMatch { c: '}', matching: '{', direction: Direction::Backward },
    CharMatch { c: '(', matching: ')', direction: Direction::Forward },
    CharMatch { c: ')', matching: '(', direction: Direction::Backward },
    CharMatch { c: '[', matching: ']', direction: Direction::Forward },
    CharMatch { c: ']', matching: '[', direction: Direction::Backward },
    CharMatch { c: '<', matching: '>', direction: Direction::Forward },
    CharMatch { c: '>', matching: '<', direction: Direction::Backward },
    CharMatch { c: '/', matching: '/', direction: Direction::Forward },
    CharMatch { c: '"', matching: '"', direction: Direction::Forward },
    CharMatch { c: '\'', matching: '\'', direction: Direction::Forward },
    CharMatch { c: '`', matching: '`', direction: Direction::Forward },
    CharMatch { c: '\\', matching: '\\', direction: Direction::Forward },
];

/// Number of table entries eligible for cursor flashing.
pub const N_FLASH_CHARS: usize = 6;

/// The complementary character and scan direction for `c`, if it is
/// matchable at all.
pub fn matching_char_info(c: char) -> Option<(char, Direction)> {
    MATCHING_CHARS
        .iter()
        .find(|entry| entry.c == c)
        .map(|entry| (entry.matching, entry.direction))
}

/// Whether `c` is flashed when the cursor lands behind it.
pub fn is_flash_char(c: char) -> bool {
    MATCHING_CHARS[..N_FLASH_CHARS].iter().any(|entry| entry.c == c)
}

// ─────────────────────────────────────────────────────────────────────────────
// Matching Scan
// ─────────────────────────────────────────────────────────────────────────────

/// Find the character matching `to_match` at `char_pos`, scanning within
/// `[start_limit, end_limit)`.
///
/// The scan keeps a nesting depth: openers of the same kind increment it,
/// closers decrement it, and the scan succeeds when the depth returns to
/// zero. When `style_of` is supplied, only characters whose style token
/// equals the style at `char_pos` are counted.
pub fn find_matching_char(
    text: &str,
    to_match: char,
    style_of: Option<&dyn Fn(usize) -> u32>,
    char_pos: usize,
    start_limit: usize,
    end_limit: usize,
) -> Option<usize> {
    let (match_char, direction) = matching_char_info(to_match)?;
    let style_to_match = style_of.map(|style| style(char_pos));
    let bytes = text.as_bytes();
    let end_limit = end_limit.min(text.len());

    let same_style = |pos: usize| match (style_of, style_to_match) {
        (Some(style), Some(want)) => style(pos) == want,
        _ => true,
    };

    let mut nest_depth = 1;

    match direction {
        Direction::Forward => {
            for pos in char_pos + 1..end_limit {
                let c = bytes[pos] as char;
                if c == match_char {
                    if same_style(pos) {
                        nest_depth -= 1;
                        if nest_depth == 0 {
                            return Some(pos);
                        }
                    }
                } else if c == to_match && same_style(pos) {
                    nest_depth += 1;
                }
            }
        }
        Direction::Backward => {
            if char_pos == 0 {
                return None;
            }
            for pos in (start_limit..char_pos).rev() {
                let c = bytes[pos] as char;
                if c == match_char {
                    if same_style(pos) {
                        nest_depth -= 1;
                        if nest_depth == 0 {
                            return Some(pos);
                        }
                    }
                } else if c == to_match && same_style(pos) {
                    nest_depth += 1;
                }
            }
        }
    }

    None
}

/// The highlight span for a successful match: just the matching delimiter
/// when `delimiter_only`, otherwise the whole range between the pair
/// (inclusive of both characters).
pub fn flash_range(
    cursor_char_pos: usize,
    match_pos: usize,
    delimiter_only: bool,
) -> (usize, usize) {
    if delimiter_only {
        (match_pos, match_pos + 1)
    } else {
        let lo = cursor_char_pos.min(match_pos);
        let hi = cursor_char_pos.max(match_pos);
        (lo, hi + 1)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
