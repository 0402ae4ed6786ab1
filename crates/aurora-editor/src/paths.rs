//! Platform-specific paths for presets and editor settings.
//!
//! - **User config**: `~/.config/aurora/` (Linux), `~/Library/Application Support/aurora/` (macOS), `%APPDATA%\aurora\` (Windows)
//! - **Settings file**: `<user config>/settings.toml`
//! - **User presets**: `<user config>/presets/`

use std::path::{Path, PathBuf};

/// Application name used for directory paths.
const APP_NAME: &str = "aurora";

/// Subdirectory name for presets.
const PRESETS_SUBDIR: &str = "presets";

/// File name of the editor settings.
const SETTINGS_FILE: &str = "settings.toml";

/// File extension of Milkdrop presets.
pub const PRESET_EXTENSION: &str = "milk";

/// Returns the user-specific configuration directory.
///
/// Returns a fallback path if the config directory cannot be determined.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Returns the path of the editor settings file.
pub fn settings_path() -> PathBuf {
    user_config_dir().join(SETTINGS_FILE)
}

/// Returns the user-specific presets directory.
pub fn user_presets_dir() -> PathBuf {
    user_config_dir().join(PRESETS_SUBDIR)
}

/// Ensure the user presets directory exists.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_user_presets_dir() -> Result<PathBuf, crate::EditorError> {
    let dir = user_presets_dir();

    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| crate::EditorError::create_dir(&dir, e))?;
    }

    Ok(dir)
}

/// Returns true if `path` has a `.milk` extension, ignoring case.
pub fn is_preset_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(PRESET_EXTENSION))
}

/// List the preset files in a directory, sorted by path.
///
/// Returns an empty vector if the directory doesn't exist or can't be read.
pub fn list_presets(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut presets: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_preset_file(path))
        .collect();
    presets.sort();
    presets
}

/// Get the preset name from a file path.
///
/// ```rust
/// use aurora_editor::paths::preset_name_from_path;
/// use std::path::Path;
///
/// let name = preset_name_from_path(Path::new("/presets/Geiss - Spiral.milk"));
/// assert_eq!(name, Some("Geiss - Spiral".to_string()));
/// ```
pub fn preset_name_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_user_config_dir() {
        let dir = user_config_dir();
        assert!(dir.to_string_lossy().contains("aurora"));
    }

    #[test]
    fn test_settings_path() {
        let path = settings_path();
        assert!(path.ends_with("aurora/settings.toml"));
    }

    #[test]
    fn test_user_presets_dir() {
        assert!(user_presets_dir().ends_with("aurora/presets"));
    }

    #[test]
    fn test_is_preset_file() {
        assert!(is_preset_file(Path::new("a.milk")));
        assert!(is_preset_file(Path::new("B.MILK")));
        assert!(!is_preset_file(Path::new("a.milk2")));
        assert!(!is_preset_file(Path::new("milk")));
    }

    #[test]
    fn test_list_presets_sorted() {
        let temp_dir = TempDir::new().unwrap();

        fs::write(temp_dir.path().join("b.milk"), "").unwrap();
        fs::write(temp_dir.path().join("a.MILK"), "").unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "").unwrap();
        fs::create_dir(temp_dir.path().join("dir.milk")).unwrap();

        let presets = list_presets(temp_dir.path());
        assert_eq!(
            presets,
            vec![temp_dir.path().join("a.MILK"), temp_dir.path().join("b.milk")]
        );
    }

    #[test]
    fn test_list_presets_nonexistent_dir() {
        assert!(list_presets(Path::new("/nonexistent/path/12345")).is_empty());
    }

    #[test]
    fn test_preset_name_from_path() {
        let path = Path::new("/path/to/flexi.milk");
        assert_eq!(preset_name_from_path(path), Some("flexi".to_string()));
    }
}
