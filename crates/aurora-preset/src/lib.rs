//! Reader and writer for Milkdrop preset files.
//!
//! Milkdrop presets (`.milk`) are loosely structured INI-like text files. This
//! crate reads them the way Milkdrop itself does and writes them back in
//! Milkdrop's own field order and number formatting, so an unmodified preset
//! survives a read/write cycle unchanged.
//!
//! # Features
//!
//! - **Lenient parsing**: [`parse`] accepts any mix of line endings, ignores
//!   section headers and junk lines and keeps the first occurrence of a key
//! - **Typed access**: [`ValueStore`] getters fall back to defaults and ignore
//!   trailing comments after numbers
//! - **Code blocks**: [`code_block`] joins and splits the numbered keys used
//!   for equations and shaders
//! - **Export**: [`PresetFile::as_string`] writes every field, filling in
//!   Milkdrop's defaults for missing keys
//! - **Byte fidelity**: lines of legacy ANSI presets are read as Latin-1 and
//!   [`PresetFile::write`] puts their original bytes back
//!
//! # Example
//!
//! ```rust
//! use aurora_preset::PresetFile;
//!
//! let mut preset = PresetFile::empty_preset();
//! preset.set_float("zoom", 1.05);
//! preset.set_code("per_frame_", "rot = rot + 0.01;\nwarp = 0;");
//!
//! let text = preset.as_string();
//! assert!(text.starts_with("MILKDROP_PRESET_VERSION=100\n[preset00]\n"));
//! assert!(text.contains("\nzoom=1.05000\n"));
//! assert!(text.ends_with("per_frame_1=rot = rot + 0.01;\nper_frame_2=warp = 0;\n"));
//! ```

mod error;
mod file;
mod store;

/// Numbered-key code blocks for equations and shaders.
pub mod code_block;

/// Field tables and legacy-compatible serialization.
pub mod export;

/// Lenient number parsing and fixed-precision formatting.
pub mod numeric;

/// Line splitting and key/value extraction.
pub mod parser;

pub use code_block::{MAX_CODE_LINES, SHADER_SENTINEL, is_shader_prefix};
pub use error::PresetError;
pub use export::{PresetSink, SHAPE_COUNT, WAVE_COUNT, export_preset, export_preset_bytes};
pub use file::PresetFile;
pub use parser::{MAX_FILE_SIZE, parse};
pub use store::{ValueStore, normalize_key};

/// Convenience result type for preset operations.
pub type Result<T> = std::result::Result<T, PresetError>;
