//! Multi-line code stored as numbered keys.
//!
//! The preset format has no multi-line values, so equations and shaders are
//! split into one key per line: `per_frame_1`, `per_frame_2`, and so on.
//! Reading stops at the first missing number, which silently drops anything
//! after a gap. Shader lines (`warp_`, `comp_`) carry a leading backtick that
//! keeps the legacy reader from trimming their indentation.

use crate::export::PresetSink;
use crate::store::{ValueStore, normalize_key};

/// Highest line number read or written for a single code block.
pub const MAX_CODE_LINES: usize = 99999;

/// Marker prepended to every stored shader line.
pub const SHADER_SENTINEL: char = '`';

/// Key prefixes whose lines carry the [`SHADER_SENTINEL`].
pub const SHADER_PREFIXES: [&str; 2] = ["warp_", "comp_"];

/// Returns true if lines stored under `prefix` need the shader sentinel.
pub fn is_shader_prefix(prefix: &str) -> bool {
    let prefix = normalize_key(prefix);
    SHADER_PREFIXES.contains(&prefix.as_str())
}

/// Iterates the raw lines `prefix1`, `prefix2`, ... up to the first gap.
fn numbered_lines<'a>(
    store: &'a ValueStore,
    prefix: &'a str,
) -> impl Iterator<Item = (String, &'a str)> + 'a {
    (1..=MAX_CODE_LINES).map_while(move |index| {
        let key = format!("{prefix}{index}");
        store.get(&key).map(|line| (key, line))
    })
}

/// Reads a code block, one `\n`-terminated line per stored key.
///
/// A single leading [`SHADER_SENTINEL`] is stripped from each line when
/// present, whatever the prefix. Returns an empty string if `prefix1` is
/// missing.
pub fn decode(store: &ValueStore, prefix: &str) -> String {
    let prefix = normalize_key(prefix);

    let mut code = String::new();
    for (_, line) in numbered_lines(store, &prefix) {
        code.push_str(line.strip_prefix(SHADER_SENTINEL).unwrap_or(line));
        code.push('\n');
    }
    code
}

/// Replaces the code block under `prefix` with `code`.
///
/// All keys made of `prefix` followed by nothing but digits are removed
/// first, so an empty `code` leaves no lines behind. Keys that only share the
/// prefix text (`per_frame_init_1` for `per_frame_`) are left alone. Lines
/// beyond [`MAX_CODE_LINES`] are dropped. A line whose text is unchanged keeps
/// the bytes it was read with.
pub fn encode(store: &mut ValueStore, prefix: &str, code: &str) {
    let prefix = normalize_key(prefix);
    let shader = is_shader_prefix(&prefix);

    let lines: Vec<(String, String)> = split_lines(code)
        .take(MAX_CODE_LINES)
        .enumerate()
        .map(|(index, line)| {
            let value = if shader {
                format!("{SHADER_SENTINEL}{line}")
            } else {
                line.to_string()
            };
            (format!("{prefix}{}", index + 1), value)
        })
        .collect();

    // Unchanged lines that were read from non-UTF-8 data keep their bytes.
    let unchanged: Vec<(String, Vec<u8>)> = lines
        .iter()
        .filter(|(key, value)| store.get(key) == Some(value.as_str()))
        .filter_map(|(key, value)| {
            let bytes = store.get_bytes(key)?;
            (bytes != value.as_bytes()).then(|| (key.clone(), bytes.to_vec()))
        })
        .collect();

    store.retain(|key, _| {
        key.strip_prefix(prefix.as_str())
            .is_none_or(|rest| !rest.bytes().all(|b| b.is_ascii_digit()))
    });

    for (key, value) in &lines {
        store.set_string(key, value.as_str());
    }
    for (key, bytes) in &unchanged {
        store.set_bytes(key, bytes);
    }

    tracing::debug!(prefix = %prefix, lines = lines.len(), shader, "encoded code block");
}

/// Appends `key=value` lines for a stored code block, values written as-is.
///
/// A byte sink receives lines read from non-UTF-8 data with their original
/// bytes.
pub fn export(store: &ValueStore, prefix: &str, out: &mut impl PresetSink) {
    let prefix = normalize_key(prefix);

    for (key, _) in numbered_lines(store, &prefix) {
        out.push_text(&key);
        out.push_text("=");
        out.push_value(store, &key);
        out.push_text("\n");
    }
}

/// Splits text into lines the way a line reader does: a trailing newline does
/// not start another, empty, line.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let body = text.strip_suffix('\n').unwrap_or(text);
    let lines = if text.is_empty() { None } else { Some(body.split('\n')) };
    lines.into_iter().flatten()
}
