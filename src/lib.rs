//! Lodestone, a search and replace engine for text editors
//!
//! Five matching semantics (literal and whole-word, each case-sensitive
//! or not, plus two regex flavors) behind one dispatcher, with backward
//! search as a first-class symmetric operation, wraparound, incremental
//! search support, selection probing, and batch replace that rebuilds
//! large texts in two passes instead of splicing per match.
//!
//! The engine is deliberately UI-free: it never beeps, prompts, or draws.
//! Failures a user should hear about come back as values (`None` for
//! "no match", [`Error`] for genuine faults), and the policy knobs in
//! [`Preferences`] tell the embedding editor how to present them.

mod buffer;
mod error;
mod history;
mod matching;
mod preferences;
mod probe;
mod replace;
mod search;
mod string_utils;

pub use buffer::{Selection, TextBuffer, DEFAULT_TAB_DISTANCE};
pub use error::{Error, Result, ResultExt};
pub use history::{HistoryEntry, SearchHistory, MAX_SEARCH_HISTORY};
pub use matching::{
    find_matching_char, flash_range, is_flash_char, matching_char_info, N_FLASH_CHARS,
};
pub use preferences::{
    get_config_dir, get_prefs_file_path, load_preferences, load_preferences_from,
    save_preferences, save_preferences_to, Preferences, ShowMatching, TruncSubstitution,
    DEFAULT_DELIMITERS,
};
pub use probe::search_matches_selection;
pub use replace::{
    replace_all_in_string, replace_in_selection, replace_once, ReplaceAll, SelectionReplace,
};
pub use search::engine::{CompiledPattern, EngineMatch, MAX_SUBSTITUTION_LENGTH};
pub use search::{
    incremental_search_wrapped, search_string, Direction, SearchResult, SearchType, WrapMode,
    SEARCH_MAX,
};
