//! Data directory resolution
//!
//! Precedence: `--data-dir` flag, then `SHEET_DATA_DIR`, then the platform
//! data directory.

use std::path::PathBuf;

/// Environment variable overriding the default data directory.
pub const DATA_DIR_ENV: &str = "SHEET_DATA_DIR";

/// Get the platform-specific data directory for character sheets
///
/// Follows platform conventions:
/// - macOS: `~/Library/Application Support/character-sheet`
/// - Linux: `~/.local/share/character-sheet` (or `$XDG_DATA_HOME/character-sheet`)
/// - Windows: `%APPDATA%\character-sheet`
/// - Fallback: `./sheet_data`
pub fn data_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }

    directories::ProjectDirs::from("", "", "character-sheet")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./sheet_data"))
}

/// Resolve an optional `--data-dir` flag.
pub fn resolve(flag: Option<PathBuf>) -> PathBuf {
    flag.unwrap_or_else(data_dir)
}
