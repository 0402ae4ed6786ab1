//! Line splitting and key/value extraction.
//!
//! The preset format is a loose INI dialect. Every line is split at the first
//! space or equals sign; everything before it is the key, everything after it
//! is the value. There is no section handling: `[preset00]` has no delimiter
//! and is dropped, and junk lines with a delimiter end up as harmless keys
//! nobody reads.
//!
//! Lines are split as bytes. Keys and values that are not valid UTF-8 are read
//! as Latin-1, and such values keep their bytes so they are written back
//! unchanged.

use crate::error::PresetError;
use crate::store::{ValueStore, decode_text};

/// Maximum size of a preset in bytes. Larger inputs are rejected as not being
/// a preset at all.
pub const MAX_FILE_SIZE: usize = 0x100000;

/// Parses raw preset bytes into a [`ValueStore`].
///
/// Lines may end in `\r`, `\n` or any mix of both; empty lines are skipped.
/// The first occurrence of a key wins.
///
/// # Errors
///
/// - [`PresetError::TooLarge`] if `data` exceeds [`MAX_FILE_SIZE`]
/// - [`PresetError::BinaryData`] if `data` contains a NUL byte
/// - [`PresetError::NoEntries`] if no line yields a key/value pair
pub fn parse(data: &[u8]) -> Result<ValueStore, PresetError> {
    if data.len() > MAX_FILE_SIZE {
        tracing::warn!(size = data.len(), max = MAX_FILE_SIZE, "preset data too large");
        return Err(PresetError::TooLarge {
            size: data.len() as u64,
            max: MAX_FILE_SIZE,
        });
    }

    if let Some(offset) = data.iter().position(|&b| b == 0) {
        tracing::warn!(offset, "preset data contains a NUL byte, assuming binary file");
        return Err(PresetError::BinaryData { offset });
    }

    let mut store = ValueStore::new();
    for line in data.split(|&b| b == b'\r' || b == b'\n') {
        if !line.is_empty() {
            parse_line(line, &mut store);
        }
    }

    if store.is_empty() {
        tracing::warn!(size = data.len(), "no key/value pairs found in preset data");
        return Err(PresetError::NoEntries);
    }

    tracing::debug!(size = data.len(), entries = store.len(), "parsed preset data");
    Ok(store)
}

/// Splits a single line and stores the pair if its key is new.
///
/// Lines without a delimiter, or starting with one, are ignored.
pub fn parse_line(line: &[u8], store: &mut ValueStore) {
    let Some(delimiter) = line.iter().position(|&b| b == b' ' || b == b'=') else {
        return;
    };
    if delimiter == 0 {
        return;
    }

    store.insert_first_bytes(&decode_text(&line[..delimiter]), &line[delimiter + 1..]);
}
