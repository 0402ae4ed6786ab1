//! Error types for preset reading and writing.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing a preset.
///
/// Missing or malformed values are never errors: the typed accessors of
/// [`ValueStore`](crate::ValueStore) fall back to defaults instead. Only input
/// that cannot be a preset at all, or a destination that cannot be written,
/// produces a `PresetError`.
#[derive(Debug, Error)]
pub enum PresetError {
    /// Failed to open a preset file for reading
    #[error("failed to open preset '{path}': {source}")]
    Open {
        /// Path of the file that could not be opened.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to create or write a preset file
    #[error("failed to write preset '{path}': {source}")]
    Write {
        /// Path of the file that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Stream read or write error
    #[error("preset stream error: {0}")]
    Io(#[from] std::io::Error),

    /// Input exceeds the maximum preset size
    #[error("preset data is {size} bytes, larger than the {max} byte limit")]
    TooLarge {
        /// Size of the rejected input in bytes.
        size: u64,
        /// The configured limit.
        max: usize,
    },

    /// A NUL byte was found, so the input is most likely a binary file
    #[error("preset data contains a NUL byte at offset {offset}")]
    BinaryData {
        /// Byte offset of the first NUL byte.
        offset: usize,
    },

    /// Not a single key/value line could be parsed
    #[error("no key/value pairs found in preset data")]
    NoEntries,
}

impl PresetError {
    /// Create an open error.
    pub fn open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PresetError::Open {
            path: path.into(),
            source,
        }
    }

    /// Create a write error.
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PresetError::Write {
            path: path.into(),
            source,
        }
    }

    /// Returns true if the error was caused by the preset content rather than
    /// by the file system or stream.
    pub fn is_content_error(&self) -> bool {
        matches!(
            self,
            PresetError::TooLarge { .. } | PresetError::BinaryData { .. } | PresetError::NoEntries
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    fn mock_io_err() -> std::io::Error {
        std::io::Error::new(std::io::ErrorKind::NotFound, "mock")
    }

    #[test]
    fn test_open_factory_produces_correct_variant() {
        let err = PresetError::open("/some/preset.milk", mock_io_err());
        assert!(
            matches!(err, PresetError::Open { ref path, .. } if path == std::path::Path::new("/some/preset.milk"))
        );
    }

    #[test]
    fn test_write_factory_produces_correct_variant() {
        let err = PresetError::write("/out/preset.milk", mock_io_err());
        assert!(
            matches!(err, PresetError::Write { ref path, .. } if path == std::path::Path::new("/out/preset.milk"))
        );
    }

    #[test]
    fn test_open_display_names_path() {
        let msg = PresetError::open("/a/b.milk", mock_io_err()).to_string();
        assert!(msg.contains("failed to open preset"), "got: {msg}");
        assert!(msg.contains("/a/b.milk"), "got: {msg}");
    }

    #[test]
    fn test_too_large_display() {
        let err = PresetError::TooLarge {
            size: 2_000_000,
            max: 0x100000,
        };
        assert_eq!(
            err.to_string(),
            "preset data is 2000000 bytes, larger than the 1048576 byte limit"
        );
    }

    #[test]
    fn test_binary_data_display() {
        let err = PresetError::BinaryData { offset: 12 };
        assert_eq!(err.to_string(), "preset data contains a NUL byte at offset 12");
    }

    #[test]
    fn test_io_wrapping_variants_expose_source() {
        assert!(PresetError::open("/x", mock_io_err()).source().is_some());
        assert!(PresetError::write("/x", mock_io_err()).source().is_some());
        assert!(PresetError::NoEntries.source().is_none());
    }

    #[test]
    fn test_content_errors_are_classified() {
        assert!(PresetError::NoEntries.is_content_error());
        assert!(PresetError::BinaryData { offset: 0 }.is_content_error());
        assert!(PresetError::TooLarge { size: 1, max: 0 }.is_content_error());
        assert!(!PresetError::open("/x", mock_io_err()).is_content_error());
        assert!(!PresetError::Io(mock_io_err()).is_content_error());
    }
}
