//! Search history
//!
//! A fixed-capacity circular log of search/replace invocations, owned by
//! the editor session and passed to call sites explicitly; there is no
//! process-wide history state.
//!
//! Contiguous incremental searches share one entry: while the user keeps
//! typing in a single incremental session, each keystroke updates the
//! current entry in place instead of appending. The entry is sealed (made
//! immutable) by any non-incremental call, including one with an empty
//! search string, which is otherwise a no-op and serves as the explicit
//! end-of-session signal.

use serde::{Deserialize, Serialize};

use crate::search::SearchType;

/// Maximum number of entries retained; the oldest is overwritten in ring
/// order beyond this.
pub const MAX_SEARCH_HISTORY: usize = 100;

// ─────────────────────────────────────────────────────────────────────────────
// History Entry
// ─────────────────────────────────────────────────────────────────────────────

/// One recorded search/replace invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub search: String,
    pub replace: String,
    pub search_type: SearchType,
    /// Whether this entry was produced by an incremental search session.
    pub from_incremental: bool,
}

// ─────────────────────────────────────────────────────────────────────────────
// Search History
// ─────────────────────────────────────────────────────────────────────────────

/// Fixed-capacity ring of history entries.
#[derive(Debug, Clone, Default)]
pub struct SearchHistory {
    /// Ring storage; grows up to `MAX_SEARCH_HISTORY` then wraps.
    entries: Vec<HistoryEntry>,
    /// Next slot to write.
    write_slot: usize,
    /// Number of populated entries.
    populated: usize,
    /// Whether the most recent entry is an open incremental session.
    current_is_incremental: bool,
}

impl SearchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of populated entries.
    pub fn len(&self) -> usize {
        self.populated
    }

    pub fn is_empty(&self) -> bool {
        self.populated == 0
    }

    /// Record a search or replace invocation.
    ///
    /// - An empty `search` records nothing, but still seals any open
    ///   incremental entry when `is_incremental` is false.
    /// - A missing `replace` inherits the most recent entry's replace text
    ///   (empty if there is none).
    /// - A call identical to the most recent entry (search, replace, type)
    ///   records nothing.
    /// - When both the most recent entry and this call are incremental,
    ///   the entry is updated in place (search text and type only).
    pub fn record_search(
        &mut self,
        search: &str,
        replace: Option<&str>,
        search_type: SearchType,
        is_incremental: bool,
    ) {
        // a non-incremental call cancels accumulation of contiguous
        // incremental searches, even if nothing is worth saving below
        if !is_incremental {
            self.current_is_incremental = false;
        }

        if search.is_empty() {
            return;
        }

        let replace: String = match replace {
            Some(text) => text.to_string(),
            None => self
                .entry(1)
                .map(|entry| entry.replace.clone())
                .unwrap_or_default(),
        };

        // identical to the most recent entry: don't bother saving
        if let Some(last) = self.entry(1) {
            if last.search_type == search_type && last.search == search && last.replace == replace {
                return;
            }
        }

        // the current entry came from an incremental search and so does
        // this call: update it in place
        if self.current_is_incremental && is_incremental {
            if let Some(slot) = self.history_index(1) {
                let entry = &mut self.entries[slot];
                entry.search = search.to_string();
                entry.search_type = search_type;
            }
            return;
        }
        self.current_is_incremental = is_incremental;

        let entry = HistoryEntry {
            search: search.to_string(),
            replace,
            search_type,
            from_incremental: is_incremental,
        };

        if self.write_slot == self.entries.len() && self.entries.len() < MAX_SEARCH_HISTORY {
            self.entries.push(entry);
        } else {
            // at capacity: recycle the slot, evicting the oldest entry
            self.entries[self.write_slot] = entry;
        }

        if self.populated < MAX_SEARCH_HISTORY {
            self.populated += 1;
        }

        self.write_slot += 1;
        if self.write_slot >= MAX_SEARCH_HISTORY {
            self.write_slot = 0;
        }
    }

    /// Ring slot of the entry `cycles_back` recordings ago (1 = most
    /// recent). Zero, negative, or beyond the populated count is invalid.
    pub fn history_index(&self, cycles_back: i64) -> Option<usize> {
        if cycles_back <= 0 || cycles_back as usize > self.populated {
            return None;
        }

        let mut index = self.write_slot as i64 - cycles_back;
        if index < 0 {
            index += MAX_SEARCH_HISTORY as i64;
        }
        Some(index as usize)
    }

    /// The entry `cycles_back` recordings ago, if populated.
    pub fn entry(&self, cycles_back: i64) -> Option<&HistoryEntry> {
        self.history_index(cycles_back)
            .map(|slot| &self.entries[slot])
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn record(history: &mut SearchHistory, search: &str) {
        history.record_search(search, Some(""), SearchType::Literal, false);
    }

    #[test]
    fn test_empty_search_records_nothing() {
        let mut history = SearchHistory::new();
        history.record_search("", Some("r"), SearchType::Literal, false);
        assert!(history.is_empty());
        assert_eq!(history.entry(1), None);
    }

    #[test]
    fn test_record_and_recall() {
        let mut history = SearchHistory::new();
        record(&mut history, "first");
        record(&mut history, "second");

        assert_eq!(history.len(), 2);
        assert_eq!(history.entry(1).unwrap().search, "second");
        assert_eq!(history.entry(2).unwrap().search, "first");
        assert_eq!(history.entry(3), None);
        assert_eq!(history.entry(0), None);
        assert_eq!(history.entry(-1), None);
    }

    #[test]
    fn test_duplicate_of_most_recent_is_dropped() {
        let mut history = SearchHistory::new();
        record(&mut history, "same");
        record(&mut history, "same");
        assert_eq!(history.len(), 1);

        // a different type makes it a distinct entry
        history.record_search("same", Some(""), SearchType::CaseSense, false);
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_missing_replace_inherits_previous() {
        let mut history = SearchHistory::new();
        history.record_search("one", Some("repl"), SearchType::Literal, false);
        history.record_search("two", None, SearchType::Literal, false);
        assert_eq!(history.entry(1).unwrap().replace, "repl");
    }

    #[test]
    fn test_missing_replace_with_no_history_is_empty() {
        let mut history = SearchHistory::new();
        history.record_search("one", None, SearchType::Literal, false);
        assert_eq!(history.entry(1).unwrap().replace, "");
    }

    #[test]
    fn test_incremental_coalescing() {
        let mut history = SearchHistory::new();
        history.record_search("f", None, SearchType::Literal, true);
        history.record_search("fo", None, SearchType::Literal, true);
        history.record_search("foo", None, SearchType::Literal, true);

        assert_eq!(history.len(), 1);
        assert_eq!(history.entry(1).unwrap().search, "foo");
    }

    #[test]
    fn test_incremental_sealed_by_non_incremental() {
        let mut history = SearchHistory::new();
        history.record_search("typing", None, SearchType::Literal, true);
        history.record_search("other", None, SearchType::Literal, false);
        // a new incremental session must not touch the sealed entry
        history.record_search("t", None, SearchType::Literal, true);

        assert_eq!(history.len(), 3);
        assert_eq!(history.entry(1).unwrap().search, "t");
        assert_eq!(history.entry(2).unwrap().search, "other");
        assert_eq!(history.entry(3).unwrap().search, "typing");
    }

    #[test]
    fn test_incremental_sealed_by_empty_end_signal() {
        let mut history = SearchHistory::new();
        history.record_search("abc", None, SearchType::Literal, true);
        // explicit end-of-incremental-session signal
        history.record_search("", None, SearchType::Literal, false);
        history.record_search("abcd", None, SearchType::Literal, true);

        assert_eq!(history.len(), 2);
        assert_eq!(history.entry(1).unwrap().search, "abcd");
        assert_eq!(history.entry(2).unwrap().search, "abc");
    }

    #[test]
    fn test_eviction_at_capacity() {
        let mut history = SearchHistory::new();
        for i in 0..MAX_SEARCH_HISTORY + 1 {
            record(&mut history, &format!("needle-{}", i));
        }

        assert_eq!(history.len(), MAX_SEARCH_HISTORY);
        // newest survives, oldest ("needle-0") was evicted
        assert_eq!(history.entry(1).unwrap().search, "needle-100");
        assert_eq!(
            history.entry(MAX_SEARCH_HISTORY as i64).unwrap().search,
            "needle-1"
        );
        assert_eq!(history.entry(MAX_SEARCH_HISTORY as i64 + 1), None);
    }

    #[test]
    fn test_from_incremental_flag() {
        let mut history = SearchHistory::new();
        history.record_search("inc", None, SearchType::Literal, true);
        assert!(history.entry(1).unwrap().from_incremental);
        history.record_search("plain", None, SearchType::Literal, false);
        assert!(!history.entry(1).unwrap().from_incremental);
    }
}
