//! Platform-specific directory utilities
//!
//! Provides consistent directory paths across different operating systems,
//! following platform conventions for data directories.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Environment variable overriding the condition data directory.
pub const DATA_DIR_ENV: &str = "CONDITION_DATA_DIR";

/// Get the directory where serialized condition files live
///
/// Resolution order:
/// 1. `$CONDITION_DATA_DIR` (also read from `.env`)
/// 2. Platform data directory:
///    - macOS: `~/Library/Application Support/conditions`
///    - Linux: `~/.local/share/conditions` (or `$XDG_DATA_HOME/conditions`)
///    - Windows: `%APPDATA%\conditions`
/// 3. Fallback: `./condition_data`
pub fn data_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }

    directories::ProjectDirs::from("", "", "conditions")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./condition_data"))
}

/// Resolve a condition file argument
///
/// Paths that exist as given are used directly; anything else is looked up
/// in the data directory, with `.bin` appended when no extension is present.
pub fn resolve_condition_file(arg: &Path, data_dir: Option<&Path>) -> Result<PathBuf> {
    if arg.exists() {
        return Ok(arg.to_path_buf());
    }

    let base = data_dir.map(Path::to_path_buf).unwrap_or_else(self::data_dir);
    let mut candidate = base.join(arg);
    if candidate.extension().is_none() {
        candidate.set_extension("bin");
    }

    if !candidate.exists() {
        anyhow::bail!(
            "Condition file not found: {}\n\nHint: files are looked up in {}",
            candidate.display(),
            base.display()
        );
    }

    Ok(candidate)
}

/// Write `bytes` to `name` inside the data directory, creating it if needed
pub fn save_condition_file(name: &str, data_dir: Option<&Path>, bytes: &[u8]) -> Result<PathBuf> {
    let base = data_dir.map(Path::to_path_buf).unwrap_or_else(self::data_dir);
    std::fs::create_dir_all(&base)
        .with_context(|| format!("Failed to create data directory: {}", base.display()))?;

    let mut path = base.join(name);
    if path.extension().is_none() {
        path.set_extension("bin");
    }

    std::fs::write(&path, bytes)
        .with_context(|| format!("Failed to write condition file: {}", path.display()))?;
    Ok(path)
}
