//! Regular expression engine adapter
//!
//! The engine itself is external (the `regress` ECMAScript engine); this
//! module wraps it behind the narrow contract the matchers need:
//! `compile`, windowed forward/backward `execute`, and template
//! `substitute`. Everything the rest of the crate knows about regular
//! expressions goes through here.

use std::ops::Range;

use regress::{Flags, Regex};

use crate::error::{Error, Result};
use crate::search::types::{SearchResult, SEARCH_MAX};
use crate::string_utils::{ceil_char_boundary, floor_char_boundary};

/// Maximum length of an expanded substitution. A longer result is clipped
/// and reported as `Error::SubstitutionTooLong`, which carries the clipped
/// text so a policy layer can still choose to apply it.
pub const MAX_SUBSTITUTION_LENGTH: usize = SEARCH_MAX;

// ─────────────────────────────────────────────────────────────────────────────
// Compiled Pattern
// ─────────────────────────────────────────────────────────────────────────────

/// A compiled regular expression.
///
/// Compilation is side-effect-free and repeated per call by the matchers;
/// callers sensitive to the cost may keep a `CompiledPattern` around, but
/// nothing in this crate caches them.
#[derive(Debug)]
pub struct CompiledPattern {
    re: Regex,
}

impl CompiledPattern {
    /// Compile `pattern`. The multiline flag is always set: in an editor,
    /// `^` and `$` anchor at line boundaries, not just the text boundaries.
    pub fn compile(pattern: &str, case_insensitive: bool) -> Result<CompiledPattern> {
        let flags = Flags {
            icase: case_insensitive,
            multiline: true,
            ..Flags::default()
        };
        let re = Regex::with_flags(pattern, flags)?;
        Ok(CompiledPattern { re })
    }

    /// Execute the pattern over the window `[start, end)` of `text`.
    ///
    /// The full text up to `end` is handed to the engine, so lookbehind may
    /// examine characters before `start`. Text past `end` is cut off
    /// entirely: `$` and lookahead treat the window end as end-of-input.
    ///
    /// Forward returns the leftmost match starting at or after `start`;
    /// backward returns the match with the rightmost start in the window.
    pub fn execute(
        &self,
        text: &str,
        start: usize,
        end: usize,
        backward: bool,
    ) -> Option<EngineMatch> {
        let end = floor_char_boundary(text, end.min(text.len()));
        let start = ceil_char_boundary(text, start);
        if start > end {
            return None;
        }
        let window = &text[..end];

        if backward {
            // successively re-anchor past the latest match start; the last
            // success is the rightmost-starting match
            let mut best: Option<regress::Match> = None;
            let mut at = start;
            loop {
                let Some(m) = self.re.find_from(window, at).next() else {
                    break;
                };
                let next = ceil_char_boundary(window, m.start() + 1);
                best = Some(m);
                if next <= at {
                    // an empty match at the window end cannot be advanced past
                    break;
                }
                at = next;
            }
            best.map(|m| EngineMatch::from_engine(&m))
        } else {
            self.re
                .find_from(window, start)
                .next()
                .map(|m| EngineMatch::from_engine(&m))
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Engine Match
// ─────────────────────────────────────────────────────────────────────────────

/// A successful engine execution: match bounds, extents, and capture
/// groups, all as byte offsets into the text handed to `execute`.
#[derive(Debug, Clone)]
pub struct EngineMatch {
    pub start: usize,
    pub end: usize,
    /// Furthest-back position the engine's bookkeeping exposes. Capture
    /// groups inside lookbehind land before `start`.
    pub extent_backward: usize,
    /// Furthest-forward position the engine's bookkeeping exposes. Capture
    /// groups inside lookahead land past `end`.
    pub extent_forward: usize,
    captures: Vec<Option<Range<usize>>>,
    named_groups: Vec<(String, Option<Range<usize>>)>,
}

impl EngineMatch {
    fn from_engine(m: &regress::Match) -> EngineMatch {
        let mut extent_backward = m.start();
        let mut extent_forward = m.end();
        for range in m.captures.iter().flatten() {
            extent_backward = extent_backward.min(range.start);
            extent_forward = extent_forward.max(range.end);
        }

        EngineMatch {
            start: m.start(),
            end: m.end(),
            extent_backward,
            extent_forward,
            captures: m.captures.clone(),
            named_groups: m
                .named_groups()
                .map(|(name, range)| (name.to_string(), range))
                .collect(),
        }
    }

    /// Capture group by index; group 0 is the whole match.
    pub fn group(&self, idx: usize) -> Option<Range<usize>> {
        if idx == 0 {
            Some(self.start..self.end)
        } else {
            self.captures.get(idx - 1).cloned().flatten()
        }
    }

    fn named_group(&self, name: &str) -> Option<Range<usize>> {
        self.named_groups
            .iter()
            .find(|(n, _)| n == name)
            .and_then(|(_, range)| range.clone())
    }

    /// The match as a `SearchResult` in the coordinates of the searched
    /// text.
    pub fn as_result(&self) -> SearchResult {
        SearchResult {
            start: self.start,
            end: self.end,
            extent_backward: self.extent_backward,
            extent_forward: self.extent_forward,
        }
    }

    /// Expand a replacement template against this match.
    ///
    /// `text` must be the same text the match was executed on. The template
    /// grammar is the engine's own: `$0` is the whole match, `$1`..`$99`
    /// are capture groups (unmatched groups expand to nothing), `${name}`
    /// is a named group, and `$$` is a literal dollar sign.
    ///
    /// Fails with `Error::SubstitutionTooLong` when the expansion exceeds
    /// [`MAX_SUBSTITUTION_LENGTH`]; the error carries the clipped result.
    pub fn substitute(&self, text: &str, template: &str) -> Result<String> {
        let mut out = String::with_capacity(template.len());
        let mut chars = template.chars().peekable();

        while let Some(ch) = chars.next() {
            if ch != '$' {
                out.push(ch);
                continue;
            }
            match chars.peek() {
                Some('$') => {
                    chars.next();
                    out.push('$');
                }
                Some(&d) if d.is_ascii_digit() => {
                    let mut group = 0usize;
                    while let Some(&d) = chars.peek() {
                        if !d.is_ascii_digit() || group > 99 {
                            break;
                        }
                        chars.next();
                        group = group * 10 + (d as usize - '0' as usize);
                    }
                    if let Some(range) = self.group(group) {
                        out.push_str(&text[range]);
                    }
                }
                Some('{') => {
                    chars.next();
                    let mut name = String::new();
                    let mut closed = false;
                    for ch in chars.by_ref() {
                        if ch == '}' {
                            closed = true;
                            break;
                        }
                        name.push(ch);
                    }
                    if closed {
                        if let Some(range) = self.named_group(&name) {
                            out.push_str(&text[range]);
                        }
                    } else {
                        // malformed ${...}: keep it literal
                        out.push_str("${");
                        out.push_str(&name);
                    }
                }
                _ => out.push('$'),
            }
        }

        if out.len() > MAX_SUBSTITUTION_LENGTH {
            out.truncate(floor_char_boundary(&out, MAX_SUBSTITUTION_LENGTH));
            return Err(Error::SubstitutionTooLong { truncated: out });
        }
        Ok(out)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_failure() {
        assert!(CompiledPattern::compile("(unclosed", false).is_err());
    }

    #[test]
    fn test_forward_execute_in_window() {
        let re = CompiledPattern::compile(r"\d+", false).unwrap();
        let text = "a1 b22 c333";

        let m = re.execute(text, 0, text.len(), false).unwrap();
        assert_eq!((m.start, m.end), (1, 2));

        let m = re.execute(text, 2, text.len(), false).unwrap();
        assert_eq!((m.start, m.end), (4, 6));

        // window end cuts the text: "333" is invisible
        assert!(re.execute(text, 7, 7, false).is_none());
    }

    #[test]
    fn test_backward_execute_finds_rightmost_start() {
        let re = CompiledPattern::compile("aa", false).unwrap();
        let m = re.execute("aaa", 0, 3, true).unwrap();
        // not the first non-overlapping match [0,2): backward search is
        // anchored from the right
        assert_eq!((m.start, m.end), (1, 3));
    }

    #[test]
    fn test_backward_window_end_is_end_of_input() {
        // "$" anchors at the window end even mid-line
        let re = CompiledPattern::compile("r$", false).unwrap();
        let m = re.execute("bar baz", 0, 3, true).unwrap();
        assert_eq!((m.start, m.end), (2, 3));
    }

    #[test]
    fn test_case_insensitive_flag() {
        let re = CompiledPattern::compile("hello", true).unwrap();
        let m = re.execute("say HELLO", 0, 9, false).unwrap();
        assert_eq!((m.start, m.end), (4, 9));
    }

    #[test]
    fn test_multiline_anchors() {
        let re = CompiledPattern::compile("^b", false).unwrap();
        let m = re.execute("a\nb\n", 0, 4, false).unwrap();
        assert_eq!(m.start, 2);
    }

    #[test]
    fn test_lookbehind_sees_text_before_window_start() {
        let re = CompiledPattern::compile("(?<=x)y", false).unwrap();
        // the 'x' sits before the window start; find_from semantics keep
        // it visible to lookbehind
        let m = re.execute("xy", 1, 2, false).unwrap();
        assert_eq!((m.start, m.end), (1, 2));
    }

    #[test]
    fn test_extents_cover_lookaround_captures() {
        let re = CompiledPattern::compile(r"(?<=(\w+) )second", false).unwrap();
        let text = "first second";
        let m = re.execute(text, 0, text.len(), false).unwrap();
        assert_eq!((m.start, m.end), (6, 12));
        assert_eq!(m.extent_backward, 0);
        assert_eq!(m.extent_forward, 12);
    }

    #[test]
    fn test_plain_match_extents_equal_bounds() {
        let re = CompiledPattern::compile("(b)c", false).unwrap();
        let m = re.execute("abcd", 0, 4, false).unwrap();
        assert_eq!(m.extent_backward, m.start);
        assert_eq!(m.extent_forward, m.end);
    }

    #[test]
    fn test_substitute_groups() {
        let re = CompiledPattern::compile(r"(\w+)-(\w+)", false).unwrap();
        let text = "one-two";
        let m = re.execute(text, 0, text.len(), false).unwrap();
        assert_eq!(m.substitute(text, "$2/$1").unwrap(), "two/one");
        assert_eq!(m.substitute(text, "[$0]").unwrap(), "[one-two]");
    }

    #[test]
    fn test_substitute_dollar_escapes() {
        let re = CompiledPattern::compile("x", false).unwrap();
        let m = re.execute("x", 0, 1, false).unwrap();
        assert_eq!(m.substitute("x", "$$1").unwrap(), "$1");
        assert_eq!(m.substitute("x", "a$").unwrap(), "a$");
        assert_eq!(m.substitute("x", "$z").unwrap(), "$z");
    }

    #[test]
    fn test_substitute_unmatched_group_is_empty() {
        let re = CompiledPattern::compile("(a)|(b)", false).unwrap();
        let text = "a";
        let m = re.execute(text, 0, 1, false).unwrap();
        assert_eq!(m.substitute(text, "<$1|$2>").unwrap(), "<a|>");
    }

    #[test]
    fn test_substitute_named_group() {
        let re = CompiledPattern::compile(r"(?<word>\w+)", false).unwrap();
        let text = "hello";
        let m = re.execute(text, 0, text.len(), false).unwrap();
        assert_eq!(m.substitute(text, "<${word}>").unwrap(), "<hello>");
        // malformed reference stays literal
        assert_eq!(m.substitute(text, "${word").unwrap(), "${word");
    }

    #[test]
    fn test_substitute_too_long() {
        let re = CompiledPattern::compile("(a+)", false).unwrap();
        let text = "a".repeat(2000);
        let m = re.execute(&text, 0, text.len(), false).unwrap();
        match m.substitute(&text, "$1$1$1") {
            Err(Error::SubstitutionTooLong { truncated }) => {
                assert_eq!(truncated.len(), MAX_SUBSTITUTION_LENGTH);
            }
            other => panic!("expected SubstitutionTooLong, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_pattern_matches_empty_span() {
        let re = CompiledPattern::compile("", false).unwrap();
        let m = re.execute("abc", 1, 3, false).unwrap();
        assert_eq!((m.start, m.end), (1, 1));
    }
}
