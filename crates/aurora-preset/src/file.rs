//! Preset documents: reading, code access and export.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use crate::code_block;
use crate::error::PresetError;
use crate::export::{export_preset, export_preset_bytes};
use crate::parser::{self, MAX_FILE_SIZE};
use crate::store::ValueStore;

/// A parsed Milkdrop preset.
///
/// Holds the raw key/value pairs of a preset file and writes them back in
/// Milkdrop's field order and number formatting. Keys missing from the parsed
/// data are written with Milkdrop's defaults, so exporting an empty document
/// yields the stock "new preset".
///
/// # Example
///
/// ```rust
/// use aurora_preset::PresetFile;
///
/// let mut preset = PresetFile::new();
/// preset.read_data("[preset00]\nzoom=1.01\nper_frame_1=rot=rot+0.01;\n")?;
///
/// assert_eq!(preset.get_float("zoom", 1.0), 1.01);
/// assert_eq!(preset.code("per_frame_"), "rot=rot+0.01;\n");
/// assert!(preset.as_string().contains("\nzoom=1.01000\n"));
/// # Ok::<(), aurora_preset::PresetError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresetFile {
    values: ValueStore,
}

impl PresetFile {
    /// Create a document without any values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a document holding a parsed default preset.
    ///
    /// This is the result of exporting an empty document and reading it back,
    /// so every known key is present with its default value.
    pub fn empty_preset() -> Self {
        let mut preset = Self::new();
        let defaults = preset.as_string();
        match preset.read_data(&defaults) {
            Ok(()) => preset,
            Err(err) => {
                tracing::warn!(error = %err, "default preset did not parse");
                Self::new()
            }
        }
    }

    /// Build a document from an existing store.
    pub fn from_values(values: ValueStore) -> Self {
        Self { values }
    }

    /// Reads a preset file, replacing the current contents.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be opened or read, or if its contents are
    /// rejected (see [`read_data`](Self::read_data)).
    pub fn read_file(&mut self, path: impl AsRef<Path>) -> Result<(), PresetError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| PresetError::open(path, e))?;
        self.read_stream(file)?;
        tracing::debug!(path = %path.display(), entries = self.values.len(), "read preset file");
        Ok(())
    }

    /// Parses in-memory preset data, replacing the current contents.
    ///
    /// # Errors
    ///
    /// Fails if the data exceeds [`MAX_FILE_SIZE`], contains a NUL byte or has
    /// no parsable line. Oversized data leaves the document untouched; the
    /// other failures leave it empty.
    pub fn read_data(&mut self, data: impl AsRef<[u8]>) -> Result<(), PresetError> {
        match parser::parse(data.as_ref()) {
            Ok(values) => {
                self.values = values;
                Ok(())
            }
            Err(err) => {
                if !matches!(err, PresetError::TooLarge { .. }) {
                    self.values.clear();
                }
                Err(err)
            }
        }
    }

    /// Reads preset data from a stream, replacing the current contents.
    ///
    /// At most [`MAX_FILE_SIZE`] bytes are buffered; longer streams are
    /// rejected without touching the document, as are read errors.
    pub fn read_stream(&mut self, reader: impl Read) -> Result<(), PresetError> {
        let mut data = Vec::new();
        let read = reader.take(MAX_FILE_SIZE as u64 + 1).read_to_end(&mut data)?;

        if read > MAX_FILE_SIZE {
            tracing::warn!(max = MAX_FILE_SIZE, "preset stream too large");
            return Err(PresetError::TooLarge {
                size: read as u64,
                max: MAX_FILE_SIZE,
            });
        }

        self.read_data(&data)
    }

    /// Writes the preset in Milkdrop's field order to a stream.
    ///
    /// Code lines read from non-UTF-8 data are written with their original
    /// bytes.
    pub fn write(&self, mut writer: impl Write) -> Result<(), PresetError> {
        writer.write_all(&self.to_bytes())?;
        writer.flush()?;
        Ok(())
    }

    /// Writes the preset to a file, creating or truncating it.
    pub fn write_file(&self, path: impl AsRef<Path>) -> Result<(), PresetError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| PresetError::write(path, e))?;
        self.write(file).map_err(|err| match err {
            PresetError::Io(source) => PresetError::write(path, source),
            other => other,
        })?;
        tracing::debug!(path = %path.display(), "wrote preset file");
        Ok(())
    }

    /// Returns the bytes [`write`](Self::write) produces.
    pub fn to_bytes(&self) -> Vec<u8> {
        export_preset_bytes(&self.values)
    }

    /// Returns the preset as text.
    ///
    /// Matches [`to_bytes`](Self::to_bytes) for UTF-8 presets. Code lines read
    /// from non-UTF-8 data appear decoded as Latin-1.
    pub fn as_string(&self) -> String {
        export_preset(&self.values)
    }

    /// The raw key/value pairs.
    pub fn values(&self) -> &ValueStore {
        &self.values
    }

    /// Mutable access to the raw key/value pairs.
    pub fn values_mut(&mut self) -> &mut ValueStore {
        &mut self.values
    }

    /// Returns the code block stored under `prefix`, one line per stored key.
    ///
    /// See [`code_block::decode`].
    pub fn code(&self, prefix: &str) -> String {
        code_block::decode(&self.values, prefix)
    }

    /// Replaces the code block stored under `prefix`.
    ///
    /// See [`code_block::encode`].
    pub fn set_code(&mut self, prefix: &str, code: &str) {
        code_block::encode(&mut self.values, prefix, code);
    }

    /// See [`ValueStore::get_int`].
    pub fn get_int(&self, key: &str, default: i32) -> i32 {
        self.values.get_int(key, default)
    }

    /// See [`ValueStore::get_float`].
    pub fn get_float(&self, key: &str, default: f32) -> f32 {
        self.values.get_float(key, default)
    }

    /// See [`ValueStore::get_bool`].
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.values.get_bool(key, default)
    }

    /// See [`ValueStore::get_string`].
    pub fn get_string(&self, key: &str, default: &str) -> String {
        self.values.get_string(key, default)
    }

    /// See [`ValueStore::set_int`].
    pub fn set_int(&mut self, key: &str, value: i32) {
        self.values.set_int(key, value);
    }

    /// See [`ValueStore::set_float`].
    pub fn set_float(&mut self, key: &str, value: f32) {
        self.values.set_float(key, value);
    }

    /// See [`ValueStore::set_bool`].
    pub fn set_bool(&mut self, key: &str, value: bool) {
        self.values.set_bool(key, value);
    }

    /// See [`ValueStore::set_string`].
    pub fn set_string(&mut self, key: &str, value: impl Into<String>) {
        self.values.set_string(key, value);
    }
}
