//! Text buffer collaborator
//!
//! A deliberately small, string-backed buffer exposing exactly the
//! operations the engine consumes: a contiguous read-only view, random
//! character access, range replacement, selection state (linear and
//! rectangular), line bounds, display-column counting, and a highlight
//! range for bracket flashing. The storage structure of a real editor
//! buffer is outside this crate's scope; anything providing these
//! operations can host the engine.

use crate::string_utils::{ceil_char_boundary, floor_char_boundary, safe_slice};

/// Default tab stop distance used for display-column arithmetic.
pub const DEFAULT_TAB_DISTANCE: usize = 8;

// ─────────────────────────────────────────────────────────────────────────────
// Selection
// ─────────────────────────────────────────────────────────────────────────────

/// A selection over the buffer.
///
/// `start`/`end` are byte positions. When `rectangular` is set,
/// `rect_start`/`rect_end` are the display-column bounds and only the
/// intersecting column range of each line is considered selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
    pub rectangular: bool,
    pub rect_start: usize,
    pub rect_end: usize,
}

// ─────────────────────────────────────────────────────────────────────────────
// Text Buffer
// ─────────────────────────────────────────────────────────────────────────────

/// String-backed text buffer with selection and highlight state.
#[derive(Debug, Clone)]
pub struct TextBuffer {
    text: String,
    tab_distance: usize,
    selection: Option<Selection>,
    highlight: Option<(usize, usize)>,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self {
            text: String::new(),
            tab_distance: DEFAULT_TAB_DISTANCE,
            selection: None,
            highlight: None,
        }
    }

    /// Create a buffer holding `text`.
    pub fn from_text(text: &str) -> Self {
        Self {
            text: text.to_string(),
            ..Self::new()
        }
    }

    /// Length of the buffer in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The full text as a contiguous read-only view.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The character starting at byte position `pos`, if any. Positions
    /// inside a multi-byte character are floored to its start.
    pub fn char_at(&self, pos: usize) -> Option<char> {
        if pos >= self.text.len() {
            return None;
        }
        let pos = floor_char_boundary(&self.text, pos);
        self.text[pos..].chars().next()
    }

    /// Slice of the buffer between `start` and `end`, adjusted to
    /// character boundaries.
    pub fn slice(&self, start: usize, end: usize) -> &str {
        safe_slice(&self.text, start, end)
    }

    /// Replace `[start, end)` with `new_text`.
    ///
    /// Selection and highlight state are cleared; callers that need a
    /// selection afterwards re-establish it with the adjusted positions.
    pub fn replace_range(&mut self, start: usize, end: usize, new_text: &str) {
        let start = floor_char_boundary(&self.text, start);
        let end = ceil_char_boundary(&self.text, end.max(start));
        self.text.replace_range(start..end, new_text);
        self.selection = None;
        self.highlight = None;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Selection state
    // ─────────────────────────────────────────────────────────────────────────

    /// Select the linear range `[start, end)`.
    pub fn select(&mut self, start: usize, end: usize) {
        let start = start.min(self.text.len());
        let end = end.clamp(start, self.text.len());
        self.selection = Some(Selection {
            start,
            end,
            rectangular: false,
            rect_start: 0,
            rect_end: 0,
        });
    }

    /// Select a rectangle: byte range `[start, end)` with display-column
    /// bounds `[rect_start, rect_end)`.
    pub fn select_rectangular(
        &mut self,
        start: usize,
        end: usize,
        rect_start: usize,
        rect_end: usize,
    ) {
        let start = start.min(self.text.len());
        let end = end.clamp(start, self.text.len());
        self.selection = Some(Selection {
            start,
            end,
            rectangular: true,
            rect_start,
            rect_end: rect_end.max(rect_start),
        });
    }

    pub fn unselect(&mut self) {
        self.selection = None;
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    /// The selection reduced to a plain byte range. For a rectangular
    /// selection this is the column range projected onto the selection's
    /// first line; multi-line rectangles are the caller's problem to
    /// reject.
    pub fn simple_selection(&self) -> Option<(usize, usize)> {
        let sel = self.selection?;
        if !sel.rectangular {
            return Some((sel.start, sel.end));
        }
        let line_start = self.start_of_line(sel.start);
        let left = self.position_of_column(line_start, sel.rect_start);
        let right = self.position_of_column(line_start, sel.rect_end);
        Some((left, right))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Line and column arithmetic
    // ─────────────────────────────────────────────────────────────────────────

    /// Byte position of the start of the line containing `pos`.
    pub fn start_of_line(&self, pos: usize) -> usize {
        let pos = floor_char_boundary(&self.text, pos.min(self.text.len()));
        match self.text[..pos].rfind('\n') {
            Some(nl) => nl + 1,
            None => 0,
        }
    }

    /// Byte position of the end of the line containing `pos` (the position
    /// of the newline, or the buffer end on the last line).
    pub fn end_of_line(&self, pos: usize) -> usize {
        let pos = floor_char_boundary(&self.text, pos.min(self.text.len()));
        match self.text[pos..].find('\n') {
            Some(nl) => pos + nl,
            None => self.text.len(),
        }
    }

    /// Count display characters between `line_start` and `pos`, expanding
    /// tabs to the next tab stop.
    pub fn count_display_chars(&self, line_start: usize, pos: usize) -> usize {
        let pos = pos.min(self.text.len());
        let mut col = 0;
        for (i, c) in self.text[line_start..].char_indices() {
            if line_start + i >= pos {
                break;
            }
            col += match c {
                '\t' => self.tab_distance - (col % self.tab_distance),
                _ => 1,
            };
        }
        col
    }

    /// Byte position at display column `column` of the line beginning at
    /// `line_start`. Stops at the end of the line if the column lies past
    /// it.
    pub fn position_of_column(&self, line_start: usize, column: usize) -> usize {
        let mut col = 0;
        for (i, c) in self.text[line_start..].char_indices() {
            if col >= column || c == '\n' {
                return line_start + i;
            }
            col += match c {
                '\t' => self.tab_distance - (col % self.tab_distance),
                _ => 1,
            };
        }
        self.text.len()
    }

    pub fn tab_distance(&self) -> usize {
        self.tab_distance
    }

    pub fn set_tab_distance(&mut self, tab_distance: usize) {
        self.tab_distance = tab_distance.max(1);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Highlight (bracket flashing)
    // ─────────────────────────────────────────────────────────────────────────

    /// Highlight `[start, end)`, normalizing a reversed pair.
    pub fn highlight(&mut self, start: usize, end: usize) {
        let (start, end) = if start <= end { (start, end) } else { (end, start) };
        self.highlight = Some((start, end.min(self.text.len())));
    }

    pub fn unhighlight(&mut self) {
        self.highlight = None;
    }

    pub fn highlighted(&self) -> Option<(usize, usize)> {
        self.highlight
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
