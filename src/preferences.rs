//! Search preferences
//!
//! This module holds the user-facing knobs the engine consults: the word
//! delimiter set, wrap feedback and failure verbosity (policy the caller
//! acts on; the engine itself never beeps or raises dialogs), the
//! truncated-substitution policy, and bracket-flash behavior. Preferences
//! persist as JSON in the platform config directory, with graceful
//! fallback to defaults on a missing or corrupt file.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result, ResultExt};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Application name used for the config directory
const APP_NAME: &str = "lodestone";

/// Preferences file name
const PREFS_FILE_NAME: &str = "preferences.json";

/// Backup file name (used during atomic writes)
const PREFS_BACKUP_NAME: &str = "preferences.json.bak";

/// The default word delimiter set. Whitespace always delimits words and is
/// not listed here.
pub const DEFAULT_DELIMITERS: &str = ".,/\\`'!|@#%^&*()-=+{}[]\":;<>?~";

// ─────────────────────────────────────────────────────────────────────────────
// Truncated Substitution Policy
// ─────────────────────────────────────────────────────────────────────────────

/// What to do when a regex substitution result exceeds the internal
/// maximum length. Proceeding truncates the replacement, which is a
/// deliberate, user-sanctioned data-loss path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum TruncSubstitution {
    /// Silently cancel the operation.
    #[default]
    Silent,
    /// Cancel the operation; the caller should tell the user why.
    Fail,
    /// Ask the user whether to proceed with the truncated result.
    WarnAndAsk,
    /// Proceed with the truncated result without asking.
    Ignore,
}

impl TruncSubstitution {
    /// Display label for settings UIs.
    pub fn label(&self) -> &'static str {
        match self {
            TruncSubstitution::Silent => "Cancel silently",
            TruncSubstitution::Fail => "Cancel with notification",
            TruncSubstitution::WarnAndAsk => "Warn and ask",
            TruncSubstitution::Ignore => "Proceed (lose data)",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Bracket Flash Style
// ─────────────────────────────────────────────────────────────────────────────

/// How a matching bracket is shown when the cursor lands behind one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ShowMatching {
    /// No flashing.
    Off,
    /// Highlight the matching delimiter character only.
    #[default]
    Delimiter,
    /// Highlight the whole range between the pair.
    Range,
}

// ─────────────────────────────────────────────────────────────────────────────
// Preferences
// ─────────────────────────────────────────────────────────────────────────────

/// User preferences consulted by the search engine and its callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Word delimiter characters for word-mode search.
    pub delimiters: String,
    /// Emit a beep when an incremental search wraps past an end of the
    /// text (the caller beeps; the engine only reports the wrap).
    pub beep_on_search_wrap: bool,
    /// Report search failures with a dialog rather than a beep.
    pub search_dialogs: bool,
    /// Policy for substitutions that exceed the internal length limit.
    pub trunc_substitution: TruncSubstitution,
    /// Bracket flash behavior.
    pub show_matching: ShowMatching,
    /// Constrain bracket matching to characters with the same
    /// highlighting style.
    pub match_syntax_based: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            delimiters: DEFAULT_DELIMITERS.to_string(),
            beep_on_search_wrap: false,
            search_dialogs: true,
            trunc_substitution: TruncSubstitution::default(),
            show_matching: ShowMatching::default(),
            match_syntax_based: true,
        }
    }
}

impl Preferences {
    /// The active word delimiter set.
    pub fn default_delimiters(&self) -> &str {
        &self.delimiters
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Persistence
// ─────────────────────────────────────────────────────────────────────────────

/// Get the platform-specific configuration directory for the application.
///
/// # Errors
///
/// Returns `Error::ConfigDirNotFound` if the config directory cannot be
/// determined (e.g., if the HOME environment variable is not set).
pub fn get_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|base| base.join(APP_NAME))
        .ok_or(Error::ConfigDirNotFound)
}

/// Get the full path to the preferences file.
pub fn get_prefs_file_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join(PREFS_FILE_NAME))
}

/// Load preferences from the default location, falling back to defaults
/// on a missing or unreadable file.
pub fn load_preferences() -> Preferences {
    let path = match get_prefs_file_path() {
        Ok(path) => path,
        Err(err) => {
            warn!("Failed to resolve preferences path: {}. Using defaults.", err);
            return Preferences::default();
        }
    };
    load_preferences_from(&path)
        .unwrap_or_warn_default(Preferences::default(), "Failed to load preferences")
}

/// Load preferences from a specific file path.
pub fn load_preferences_from(path: &Path) -> Result<Preferences> {
    if !path.exists() {
        debug!("Preferences file not found at {}, using defaults", path.display());
        return Ok(Preferences::default());
    }

    let contents = fs::read_to_string(path).map_err(|e| Error::ConfigLoad {
        path: path.to_path_buf(),
        source: Box::new(e),
    })?;

    if contents.trim().is_empty() {
        debug!("Preferences file is empty, using defaults");
        return Ok(Preferences::default());
    }

    let prefs: Preferences = serde_json::from_str(&contents)?;
    info!("Preferences loaded from {}", path.display());
    Ok(prefs)
}

/// Save preferences to the default location.
pub fn save_preferences(prefs: &Preferences) -> Result<()> {
    let config_dir = get_config_dir()?;
    if !config_dir.exists() {
        debug!("Creating config directory: {}", config_dir.display());
        fs::create_dir_all(&config_dir).map_err(|e| Error::ConfigSave {
            path: config_dir.clone(),
            source: Box::new(e),
        })?;
    }
    save_preferences_to(&config_dir.join(PREFS_FILE_NAME), prefs)
}

/// Save preferences to a specific file path using a write-then-rename so
/// a failed write never corrupts the existing file.
pub fn save_preferences_to(path: &Path, prefs: &Preferences) -> Result<()> {
    let backup_path = path.with_file_name(PREFS_BACKUP_NAME);

    let json = serde_json::to_string_pretty(prefs).map_err(|e| Error::ConfigSave {
        path: path.to_path_buf(),
        source: Box::new(e),
    })?;

    fs::write(&backup_path, &json).map_err(|e| Error::ConfigSave {
        path: backup_path.clone(),
        source: Box::new(e),
    })?;

    fs::rename(&backup_path, path).map_err(|e| Error::ConfigSave {
        path: path.to_path_buf(),
        source: Box::new(e),
    })?;

    info!("Preferences saved to {}", path.display());
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let prefs = Preferences::default();
        assert_eq!(prefs.default_delimiters(), DEFAULT_DELIMITERS);
        assert!(!prefs.beep_on_search_wrap);
        assert!(prefs.search_dialogs);
        assert_eq!(prefs.trunc_substitution, TruncSubstitution::Silent);
        assert_eq!(prefs.show_matching, ShowMatching::Delimiter);
        assert!(prefs.match_syntax_based);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp = TempDir::new().expect("temp dir");
        let path = temp.path().join(PREFS_FILE_NAME);

        let prefs = Preferences {
            delimiters: ".,;".to_string(),
            beep_on_search_wrap: true,
            trunc_substitution: TruncSubstitution::WarnAndAsk,
            ..Preferences::default()
        };
        save_preferences_to(&path, &prefs).expect("save");

        let loaded = load_preferences_from(&path).expect("load");
        assert_eq!(loaded, prefs);
    }

    #[test]
    fn test_load_missing_file_yields_defaults() {
        let temp = TempDir::new().expect("temp dir");
        let path = temp.path().join("nope.json");
        let loaded = load_preferences_from(&path).expect("load");
        assert_eq!(loaded, Preferences::default());
    }

    #[test]
    fn test_load_corrupt_file_is_an_error() {
        let temp = TempDir::new().expect("temp dir");
        let path = temp.path().join(PREFS_FILE_NAME);
        std::fs::write(&path, "{not json").expect("write");
        assert!(load_preferences_from(&path).is_err());
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let temp = TempDir::new().expect("temp dir");
        let path = temp.path().join(PREFS_FILE_NAME);
        std::fs::write(&path, r#"{"beepOnSearchWrap": true}"#).ok();
        // unknown shape: serde(default) fills missing fields
        let loaded = load_preferences_from(&path);
        // field names are snake_case in the file; the camelCase key above
        // is simply ignored
        assert_eq!(loaded.expect("load"), Preferences::default());
    }

    #[test]
    fn test_trunc_substitution_serde_names() {
        let json = serde_json::to_string(&TruncSubstitution::WarnAndAsk).unwrap();
        assert_eq!(json, "\"warnAndAsk\"");
        let policy: TruncSubstitution = serde_json::from_str("\"ignore\"").unwrap();
        assert_eq!(policy, TruncSubstitution::Ignore);
    }

    #[test]
    fn test_labels() {
        assert_eq!(TruncSubstitution::Ignore.label(), "Proceed (lose data)");
    }
}
