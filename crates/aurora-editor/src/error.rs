//! Error types for editor operations.

use std::path::PathBuf;
use thiserror::Error;

use aurora_preset::PresetError;

/// Errors that can occur while editing presets or handling editor settings.
#[derive(Debug, Error)]
pub enum EditorError {
    /// Reading or writing a preset failed
    #[error(transparent)]
    Preset(#[from] PresetError),

    /// A preset could not be opened for editing
    #[error("failed to load preset '{path}': {source}")]
    Load {
        /// Path of the preset that could not be loaded.
        path: PathBuf,
        /// Underlying preset error.
        #[source]
        source: PresetError,
    },

    /// The renderer rejected the preset text
    #[error("renderer rejected preset: {0}")]
    Renderer(String),

    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    ReadFile {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a file
    #[error("failed to write file '{path}': {source}")]
    WriteFile {
        /// Path of the file that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to serialize TOML
    #[error("failed to serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Failed to create directory
    #[error("failed to create directory '{path}': {source}")]
    CreateDir {
        /// Path of the directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl EditorError {
    /// Create a load error for the given preset path.
    pub fn load(path: impl Into<PathBuf>, source: PresetError) -> Self {
        Self::Load {
            path: path.into(),
            source,
        }
    }

    /// Create a read file error.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Create a write file error.
    pub fn write_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::WriteFile {
            path: path.into(),
            source,
        }
    }

    /// Create a directory creation error.
    pub fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::CreateDir {
            path: path.into(),
            source,
        }
    }
}
