//! Legacy-compatible preset serialization.
//!
//! Fields are written in the exact order, precision and default values used by
//! Milkdrop when it saves a preset. Exporting a parsed preset reproduces the
//! original file, and exporting an empty store produces the stock "new preset".

use crate::code_block;
use crate::numeric::format_fixed;
use crate::store::ValueStore;

/// Number of custom waves in a preset.
pub const WAVE_COUNT: usize = 4;

/// Number of custom shapes in a preset.
pub const SHAPE_COUNT: usize = 4;

/// Preset version written when the key is missing.
pub const DEFAULT_PRESET_VERSION: i32 = 100;

/// Output buffer of the exporter.
///
/// Generated text (keys, numbers, headers) is always ASCII. Stored code lines
/// go through [`push_value`](Self::push_value): a `String` receives their
/// text, a `Vec<u8>` the bytes they were read with.
pub trait PresetSink {
    /// Append generated text.
    fn push_text(&mut self, text: &str);

    /// Append the stored value of `key`, if any.
    fn push_value(&mut self, store: &ValueStore, key: &str);
}

impl PresetSink for String {
    fn push_text(&mut self, text: &str) {
        self.push_str(text);
    }

    fn push_value(&mut self, store: &ValueStore, key: &str) {
        if let Some(value) = store.get(key) {
            self.push_str(value);
        }
    }
}

impl PresetSink for Vec<u8> {
    fn push_text(&mut self, text: &str) {
        self.extend_from_slice(text.as_bytes());
    }

    fn push_value(&mut self, store: &ValueStore, key: &str) {
        if let Some(value) = store.get_bytes(key) {
            self.extend_from_slice(value);
        }
    }
}

/// Value type, default and output precision of an exported field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    /// Integer field with its default.
    Int(i32),
    /// Float field written with a fixed number of decimals.
    Float {
        /// Decimals written after the point.
        precision: usize,
        /// Value written when the key is missing or unparsable.
        default: f32,
    },
}

/// A single `key=value` line of the exported preset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportField {
    /// Key (or key suffix for waves and shapes) as written to the file.
    pub key: &'static str,
    /// Type, default and precision.
    pub kind: FieldKind,
}

const fn int(key: &'static str, default: i32) -> ExportField {
    ExportField {
        key,
        kind: FieldKind::Int(default),
    }
}

const fn float(key: &'static str, precision: usize, default: f32) -> ExportField {
    ExportField {
        key,
        kind: FieldKind::Float { precision, default },
    }
}

/// Global fields following the `[preset00]` marker, in write order.
pub const GLOBAL_FIELDS: &[ExportField] = &[
    // Rating and classic post-processing filters
    float("fRating", 3, 3.0),
    float("fGammaAdj", 3, 2.0),
    float("fDecay", 3, 0.98),
    float("fVideoEchoZoom", 3, 2.0),
    float("fVideoEchoAlpha", 3, 0.0),
    int("nVideoEchoOrientation", 0),
    // Filter flags and default waveform parameters
    int("nWaveMode", 0),
    int("bAdditiveWaves", 0),
    int("bWaveDots", 0),
    int("bWaveThick", 0),
    int("bModWaveAlphaByVolume", 0),
    int("bMaximizeWaveColor", 1),
    int("bTexWrap", 1),
    int("bDarkenCenter", 0),
    int("bRedBlueStereo", 0),
    int("bBrighten", 0),
    int("bDarken", 0),
    int("bSolarize", 0),
    int("bInvert", 0),
    // Default waveform and warp animation
    float("fWaveAlpha", 3, 0.8),
    float("fWaveScale", 3, 1.0),
    float("fWaveSmoothing", 3, 0.75),
    float("fWaveParam", 3, 0.0),
    float("fModWaveAlphaStart", 3, 0.75),
    float("fModWaveAlphaEnd", 3, 0.95),
    float("fWarpAnimSpeed", 3, 1.0),
    float("fWarpScale", 3, 1.0),
    float("fZoomExponent", 5, 1.0),
    float("fShader", 3, 0.0),
    // Motion and default waveform color/position
    float("zoom", 5, 1.0),
    float("rot", 5, 0.0),
    float("cx", 3, 0.5),
    float("cy", 3, 0.5),
    float("dx", 5, 0.0),
    float("dy", 5, 0.0),
    float("warp", 5, 1.0),
    float("sx", 5, 1.0),
    float("sy", 5, 1.0),
    float("wave_r", 3, 1.0),
    float("wave_g", 3, 1.0),
    float("wave_b", 3, 1.0),
    float("wave_x", 3, 0.5),
    float("wave_y", 3, 0.5),
    // Borders, motion vectors and blur ranges
    float("ob_size", 3, 0.01),
    float("ob_r", 3, 0.0),
    float("ob_g", 3, 0.0),
    float("ob_b", 3, 0.0),
    float("ob_a", 3, 0.0),
    float("ib_size", 3, 0.01),
    float("ib_r", 3, 0.25),
    float("ib_g", 3, 0.25),
    float("ib_b", 3, 0.25),
    float("ib_a", 3, 0.0),
    float("nMotionVectorsX", 3, 12.0),
    float("nMotionVectorsY", 3, 9.0),
    float("mv_dx", 3, 0.0),
    float("mv_dy", 3, 0.0),
    float("mv_l", 3, 0.9),
    float("mv_r", 3, 1.0),
    float("mv_g", 3, 1.0),
    float("mv_b", 3, 1.0),
    float("mv_a", 3, 1.0),
    float("b1n", 3, 0.0),
    float("b2n", 3, 0.0),
    float("b3n", 3, 0.0),
    float("b1x", 3, 1.0),
    float("b2x", 3, 1.0),
    float("b3x", 3, 1.0),
    float("b1ed", 3, 0.25),
];

/// Per-wave fields, written as `wavecode_<index>_<key>`.
pub const WAVE_FIELDS: &[ExportField] = &[
    int("enabled", 0),
    int("samples", 512),
    int("sep", 0),
    int("bSpectrum", 0),
    int("bUseDots", 0),
    int("bDrawThick", 0),
    int("bAdditive", 0),
    float("scaling", 5, 1.0),
    float("smoothing", 5, 0.5),
    float("r", 3, 1.0),
    float("g", 3, 1.0),
    float("b", 3, 1.0),
    float("a", 3, 1.0),
];

/// Per-shape fields, written as `shapecode_<index>_<key>`.
pub const SHAPE_FIELDS: &[ExportField] = &[
    int("enabled", 0),
    int("sides", 4),
    int("additive", 0),
    int("thickOutline", 0),
    int("textured", 0),
    int("num_inst", 1),
    float("x", 3, 0.5),
    float("y", 3, 0.5),
    float("rad", 5, 0.1),
    float("ang", 5, 0.0),
    float("tex_ang", 5, 0.0),
    float("tex_zoom", 5, 1.0),
    float("r", 3, 1.0),
    float("g", 3, 0.0),
    float("b", 3, 0.0),
    float("a", 3, 1.0),
    float("r2", 3, 1.0),
    float("g2", 3, 0.0),
    float("b2", 3, 0.0),
    float("a2", 3, 0.0),
    float("border_r", 3, 1.0),
    float("border_g", 3, 1.0),
    float("border_b", 3, 1.0),
    float("border_a", 3, 0.1),
];

/// Code block names of a custom wave, written as `wave_<index>_<name><line>`.
pub const WAVE_CODE_BLOCKS: [&str; 3] = ["init", "per_frame", "per_point"];

/// Code block names of a custom shape, written as `shape_<index>_<name><line>`.
pub const SHAPE_CODE_BLOCKS: [&str; 2] = ["init", "per_frame"];

/// Preset-level equation blocks, in write order.
pub const PRESET_CODE_BLOCKS: [&str; 3] = ["per_frame_init_", "per_frame_", "per_pixel_"];

/// Key prefix of the fields of custom wave `index`.
pub fn wave_field_prefix(index: usize) -> String {
    format!("wavecode_{index}_")
}

/// Key prefix of the code blocks of custom wave `index`.
pub fn wave_code_prefix(index: usize) -> String {
    format!("wave_{index}_")
}

/// Key prefix of the fields of custom shape `index`.
pub fn shape_field_prefix(index: usize) -> String {
    format!("shapecode_{index}_")
}

/// Key prefix of the code blocks of custom shape `index`.
pub fn shape_code_prefix(index: usize) -> String {
    format!("shape_{index}_")
}

/// Looks up a field by key in one of the field tables, ignoring case.
pub fn find_field(fields: &[ExportField], key: &str) -> Option<ExportField> {
    fields.iter().copied().find(|f| f.key.eq_ignore_ascii_case(key))
}

fn write_field(
    store: &ValueStore,
    out: &mut impl PresetSink,
    key_prefix: &str,
    field: &ExportField,
) {
    let key = format!("{key_prefix}{}", field.key);
    let value = match field.kind {
        FieldKind::Int(default) => store.get_int(&key, default).to_string(),
        FieldKind::Float { precision, default } => {
            format_fixed(store.get_float(&key, default), precision)
        }
    };
    write_line(out, &key, &value);
}

fn write_line(out: &mut impl PresetSink, key: &str, value: &str) {
    out.push_text(key);
    out.push_text("=");
    out.push_text(value);
    out.push_text("\n");
}

fn write_int_line(out: &mut impl PresetSink, key: &str, value: i32) {
    write_line(out, key, &value.to_string());
}

/// Serializes `store` as preset text.
///
/// Code lines read from non-UTF-8 data appear as Latin-1 text; use
/// [`export_preset_bytes`] for the exact file contents.
pub fn export_preset(store: &ValueStore) -> String {
    let mut out = String::with_capacity(8 * 1024);
    write_preset(store, &mut out);
    out
}

/// Serializes `store` as the bytes of a preset file.
///
/// Identical to [`export_preset`] unless code lines were read from non-UTF-8
/// data, which are written back with their original bytes.
pub fn export_preset_bytes(store: &ValueStore) -> Vec<u8> {
    let mut out = Vec::with_capacity(8 * 1024);
    write_preset(store, &mut out);
    out
}

/// Writes `store` as a complete preset file to `out`.
///
/// Missing keys are filled in with their defaults. Shader code is only written
/// if the matching `PSVERSION_WARP`/`PSVERSION_COMP` is at least 2.
pub fn write_preset(store: &ValueStore, out: &mut impl PresetSink) {
    let preset_version = store.get_int("MILKDROP_PRESET_VERSION", DEFAULT_PRESET_VERSION);
    write_int_line(out, "MILKDROP_PRESET_VERSION", preset_version);

    // Pixel shader versions: one shared line for 2.0, separate lines after that.
    if preset_version == 200 {
        write_int_line(out, "PSVERSION", store.get_int("PSVERSION", 0));
    } else if preset_version > 200 {
        write_int_line(out, "PSVERSION_WARP", store.get_int("PSVERSION_WARP", 0));
        write_int_line(out, "PSVERSION_COMP", store.get_int("PSVERSION_COMP", 0));
    }

    out.push_text("[preset00]\n");

    for field in GLOBAL_FIELDS {
        write_field(store, out, "", field);
    }

    for index in 0..WAVE_COUNT {
        let field_prefix = wave_field_prefix(index);
        for field in WAVE_FIELDS {
            write_field(store, out, &field_prefix, field);
        }
        let code_prefix = wave_code_prefix(index);
        for block in WAVE_CODE_BLOCKS {
            code_block::export(store, &format!("{code_prefix}{block}"), out);
        }
    }

    for index in 0..SHAPE_COUNT {
        let field_prefix = shape_field_prefix(index);
        for field in SHAPE_FIELDS {
            write_field(store, out, &field_prefix, field);
        }
        let code_prefix = shape_code_prefix(index);
        for block in SHAPE_CODE_BLOCKS {
            code_block::export(store, &format!("{code_prefix}{block}"), out);
        }
    }

    for prefix in PRESET_CODE_BLOCKS {
        code_block::export(store, prefix, out);
    }

    if store.get_int("PSVERSION_WARP", 0) >= 2 {
        code_block::export(store, "warp_", out);
    }
    if store.get_int("PSVERSION_COMP", 0) >= 2 {
        code_block::export(store, "comp_", out);
    }
}
