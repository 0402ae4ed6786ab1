//! Persisted editor settings.
//!
//! Settings are stored as TOML:
//!
//! ```toml
//! presets_dir = "/home/user/presets"
//! recent_presets = ["/home/user/presets/Geiss - Spiral.milk"]
//! max_recent = 10
//! preview_on_open = true
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::EditorError;

/// Default number of entries kept in the recent presets list.
pub const DEFAULT_MAX_RECENT: usize = 10;

/// Editor settings that survive restarts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Directory the preset browser starts in, if not the platform default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presets_dir: Option<PathBuf>,
    /// Recently opened presets, most recent first.
    pub recent_presets: Vec<PathBuf>,
    /// Maximum length of `recent_presets`.
    pub max_recent: usize,
    /// Show a preset in the renderer as soon as it is opened, see
    /// [`EditorSession::open_with_settings`](crate::EditorSession::open_with_settings).
    pub preview_on_open: bool,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            presets_dir: None,
            recent_presets: Vec::new(),
            max_recent: DEFAULT_MAX_RECENT,
            preview_on_open: true,
        }
    }
}

impl EditorSettings {
    /// Load settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EditorError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| EditorError::read_file(path, e))?;
        Ok(toml::from_str(&content)?)
    }

    /// Load settings, falling back to defaults if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, EditorError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Save settings to a TOML file, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory or the file cannot be written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), EditorError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| EditorError::create_dir(parent, e))?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| EditorError::write_file(path, e))?;
        tracing::debug!(path = %path.display(), "saved editor settings");
        Ok(())
    }

    /// Moves `path` to the front of the recent presets list.
    pub fn push_recent(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        self.recent_presets.retain(|p| *p != path);
        self.recent_presets.insert(0, path);
        self.recent_presets.truncate(self.max_recent);
    }

    /// The preset browser's start directory.
    pub fn presets_dir(&self) -> PathBuf {
        self.presets_dir
            .clone()
            .unwrap_or_else(crate::paths::user_presets_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let settings = EditorSettings::default();
        assert_eq!(settings.max_recent, 10);
        assert!(settings.preview_on_open);
        assert!(settings.recent_presets.is_empty());
        assert!(settings.presets_dir.is_none());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let settings: EditorSettings = toml::from_str("max_recent = 3").unwrap();
        assert_eq!(settings.max_recent, 3);
        assert!(settings.preview_on_open);
    }

    #[test]
    fn test_push_recent_dedups_and_truncates() {
        let mut settings = EditorSettings {
            max_recent: 3,
            ..Default::default()
        };
        settings.push_recent("a.milk");
        settings.push_recent("b.milk");
        settings.push_recent("c.milk");
        settings.push_recent("a.milk");
        settings.push_recent("d.milk");

        assert_eq!(
            settings.recent_presets,
            vec![
                PathBuf::from("d.milk"),
                PathBuf::from("a.milk"),
                PathBuf::from("c.milk")
            ]
        );
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("settings.toml");

        let mut settings = EditorSettings {
            presets_dir: Some(temp_dir.path().to_path_buf()),
            preview_on_open: false,
            ..Default::default()
        };
        settings.push_recent(temp_dir.path().join("x.milk"));
        settings.save(&path).unwrap();

        let loaded = EditorSettings::load(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let settings =
            EditorSettings::load_or_default(temp_dir.path().join("settings.toml")).unwrap();
        assert_eq!(settings, EditorSettings::default());
    }

    #[test]
    fn test_load_invalid_toml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.toml");
        std::fs::write(&path, "max_recent = [").unwrap();

        assert!(matches!(
            EditorSettings::load(&path),
            Err(EditorError::TomlParse(_))
        ));
    }

    #[test]
    fn test_presets_dir_override() {
        let settings = EditorSettings {
            presets_dir: Some(PathBuf::from("/srv/milk")),
            ..Default::default()
        };
        assert_eq!(settings.presets_dir(), PathBuf::from("/srv/milk"));
    }
}
