//! Editing layer for Milkdrop presets.
//!
//! Builds on [`aurora_preset`] to give preset editors a strongly-typed view of
//! a preset, version-aware shader handling and a session that keeps a live
//! renderer in sync with the edits.
//!
//! # Features
//!
//! - **Typed model**: [`EditorPreset`] holds every field of a preset as a plain
//!   value, with waves and shapes as [`Wave`] and [`Shape`]
//! - **Version rules**: [`PresetVersion`] bands and [`ShaderLossWarning`]s for
//!   shader code that would not be saved
//! - **Code addressing**: [`CodeTarget`] names each equation and shader block
//! - **Sessions**: [`EditorSession`] opens, previews and saves presets through
//!   a [`PresetRenderer`]
//! - **Settings**: [`EditorSettings`] persisted as TOML under [`paths`]
//!
//! # Example
//!
//! ```rust
//! use aurora_editor::{CodeTarget, EditorPreset, PresetVersion};
//! use aurora_preset::PresetFile;
//!
//! let mut doc = PresetFile::empty_preset();
//! let mut preset = EditorPreset::from_document(&doc);
//!
//! preset.set_version_band(PresetVersion::Milkdrop21);
//! preset.warp_shader_version = 2;
//! *preset.code_mut(CodeTarget::WarpShader).unwrap() = "shader_body {}".into();
//! preset.to_document(&mut doc);
//!
//! assert!(doc.as_string().contains("\nwarp_1=`shader_body {}\n"));
//! ```

pub mod code_type;
mod error;
pub mod model;
pub mod paths;
pub mod session;
pub mod settings;
pub mod version;

pub use code_type::{CodeTarget, lines_of_code};
pub use error::EditorError;
pub use model::{ColorRgba, EditorPreset, Shape, Wave};
pub use session::{EditorSession, PresetRenderer};
pub use settings::EditorSettings;
pub use version::{PresetVersion, ShaderLossWarning};

/// Convenience result type for editor operations.
pub type Result<T> = std::result::Result<T, EditorError>;
