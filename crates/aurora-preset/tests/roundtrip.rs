//! Integration tests for aurora-preset.
//!
//! These tests read and write complete presets and check that the output is
//! byte-for-byte what Milkdrop itself would write.

use aurora_preset::{MAX_FILE_SIZE, PresetError, PresetFile, ValueStore, code_block, parse};
use tempfile::TempDir;

/// A Milkdrop 2.1 preset in canonical export form, built from the default
/// export with a few edited lines and code blocks added.
fn canonical_preset() -> String {
    let defaults = PresetFile::new().as_string();
    let mut text = defaults
        .replace(
            "MILKDROP_PRESET_VERSION=100\n",
            "MILKDROP_PRESET_VERSION=201\nPSVERSION_WARP=2\nPSVERSION_COMP=3\n",
        )
        .replace("\nfDecay=0.980\n", "\nfDecay=0.925\n")
        .replace("\nzoom=1.00000\n", "\nzoom=1.00998\n")
        .replace("\nwavecode_1_enabled=0\n", "\nwavecode_1_enabled=1\n")
        .replace(
            "\nwavecode_1_a=1.000\n",
            "\nwavecode_1_a=0.500\nwave_1_per_point1=x=sample;\nwave_1_per_point2=y=value1;\n",
        )
        .replace(
            "\nshapecode_0_border_a=0.100\n",
            "\nshapecode_0_border_a=0.100\nshape_0_init1=t1=0;\n",
        );
    text.push_str("per_frame_init_1=q1=0;\n");
    text.push_str("per_frame_1=rot = rot + 0.01*bass;\n");
    text.push_str("per_frame_2=zoom = zoom + 0.01;\n");
    text.push_str("per_pixel_1=warp = warp*rad;\n");
    text.push_str("warp_1=`shader_body\n");
    text.push_str("warp_2=`{\n");
    text.push_str("warp_3=`    ret = tex2D(sampler_main, uv).xyz;\n");
    text.push_str("warp_4=`}\n");
    text.push_str("comp_1=`shader_body { ret = GetPixel(uv); }\n");
    text
}

#[test]
fn test_canonical_preset_round_trips_unchanged() {
    let original = canonical_preset();

    let mut preset = PresetFile::new();
    preset.read_data(&original).expect("canonical preset should parse");

    assert_eq!(preset.as_string(), original);
}

#[test]
fn test_canonical_preset_code_blocks() {
    let mut preset = PresetFile::new();
    preset.read_data(canonical_preset()).unwrap();

    assert_eq!(
        preset.code("warp_"),
        "shader_body\n{\n    ret = tex2D(sampler_main, uv).xyz;\n}\n"
    );
    assert_eq!(preset.code("wave_1_per_point"), "x=sample;\ny=value1;\n");
    assert_eq!(preset.code("shape_0_init"), "t1=0;\n");
    assert_eq!(preset.code("per_frame_init_"), "q1=0;\n");
}

#[test]
fn test_empty_preset_round_trip_closure() {
    let first = PresetFile::empty_preset();

    let mut second = PresetFile::new();
    second.read_data(first.as_string()).expect("default export should parse");

    let mut third = PresetFile::new();
    third.read_data(second.as_string()).unwrap();

    assert_eq!(first.values(), second.values());
    assert_eq!(second.values(), third.values());
    assert_eq!(first.as_string(), PresetFile::new().as_string());
}

#[test]
fn test_legacy_file_gains_defaults_on_export() {
    let mut preset = PresetFile::new();
    preset
        .read_data("[preset00]\r\nfDecay=0.9\r\nzoom=1.02 // slow zoom\r\n")
        .unwrap();

    let text = preset.as_string();
    assert!(text.contains("\nfDecay=0.900\n"));
    assert!(text.contains("\nzoom=1.02000\n"));
    assert!(text.contains("\nfGammaAdj=2.000\n"));
    assert!(text.contains("\nwavecode_3_samples=512\n"));
    assert!(!text.contains('\r'));
}

#[test]
fn test_gap_truncates_code_block() {
    let mut store = ValueStore::new();
    store.set_string("pfx1", "a");
    store.set_string("pfx2", "b");
    store.set_string("pfx4", "d");

    assert_eq!(code_block::decode(&store, "pfx"), "a\nb\n");
}

#[test]
fn test_gap_drops_lines_on_export() {
    let mut preset = PresetFile::new();
    preset
        .read_data("per_frame_1=a;\nper_frame_2=b;\nper_frame_4=d;\n")
        .unwrap();

    let text = preset.as_string();
    assert!(text.ends_with("per_frame_1=a;\nper_frame_2=b;\n"));
    assert!(!text.contains("per_frame_4"));
}

#[test]
fn test_shader_sentinel_round_trip() {
    let mut store = ValueStore::new();
    code_block::encode(&mut store, "warp_", "x\ny");

    assert!(store.get("warp_1").unwrap().starts_with('`'));
    assert!(store.get("warp_2").unwrap().starts_with('`'));
    assert_eq!(code_block::decode(&store, "warp_"), "x\ny\n");
}

#[test]
fn test_first_occurrence_wins() {
    let store = parse(b"zoom=1.0\nzoom=2.0\n").unwrap();
    assert_eq!(store.get("zoom"), Some("1.0"));
}

#[test]
fn test_numeric_leniency() {
    let mut store = ValueStore::new();
    store.set_string("a", "0.5 ; comment");
    store.set_string("b", "abc");

    assert_eq!(store.get_float("a", 9.0), 0.5);
    assert_eq!(store.get_float("b", 9.0), 9.0);
}

#[test]
fn test_nul_byte_rejected() {
    let mut preset = PresetFile::new();
    let result = preset.read_data(b"zoom=1.0\nrot=\0\n");

    assert!(matches!(result, Err(PresetError::BinaryData { .. })));
    assert!(preset.values().is_empty());
}

#[test]
fn test_oversize_rejected() {
    let mut data = b"zoom=1.0\n".to_vec();
    data.resize(MAX_FILE_SIZE + 1, b' ');

    let mut preset = PresetFile::new();
    let result = preset.read_data(&data);

    assert!(matches!(result, Err(PresetError::TooLarge { .. })));
    assert!(preset.values().is_empty());
}

#[test]
fn test_case_insensitive_keys() {
    let mut preset = PresetFile::new();
    preset.set_float("Zoom", 1.5);

    assert_eq!(preset.get_float("zoom", 0.0), 1.5);
    assert_eq!(preset.get_string("ZOOM", ""), "1.500000");
}

#[test]
fn test_file_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("test.milk");

    let mut preset = PresetFile::new();
    preset.read_data(canonical_preset()).unwrap();
    preset.write_file(&path).expect("should write preset");

    let on_disk = std::fs::read_to_string(&path).unwrap();
    assert_eq!(on_disk, canonical_preset());

    let mut loaded = PresetFile::new();
    loaded.read_file(&path).expect("should read preset back");
    assert_eq!(loaded.values(), preset.values());
}

#[test]
fn test_latin1_code_line_round_trips_bytes() {
    let mut preset = PresetFile::new();
    preset.read_data(b"per_frame_1=// caf\xe9\n").unwrap();

    let mut out = Vec::new();
    preset.write(&mut out).unwrap();
    assert!(out.ends_with(b"\nper_frame_1=// caf\xe9\n"));
    assert_eq!(preset.code("per_frame_"), "// caf\u{e9}\n");
}

#[test]
fn test_latin1_preset_file_round_trips_bytes() {
    let text = canonical_preset();
    let marker = "per_frame_2=zoom = zoom + 0.01;";
    let at = text.find(marker).unwrap() + marker.len();
    let mut original = text.as_bytes()[..at].to_vec();
    original.extend_from_slice(b" // vitesse \xe9lev\xe9e");
    original.extend_from_slice(&text.as_bytes()[at..]);

    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("ansi.milk");
    let copy = temp_dir.path().join("copy.milk");
    std::fs::write(&source, &original).unwrap();

    let mut preset = PresetFile::new();
    preset.read_file(&source).expect("ANSI preset should read");
    preset.write_file(&copy).expect("should write preset");

    assert_eq!(std::fs::read(&copy).unwrap(), original);
    assert!(preset.code("per_frame_").contains("// vitesse \u{e9}lev\u{e9}e\n"));
}

#[test]
fn test_read_file_rejects_binary() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("image.milk");
    std::fs::write(&path, [0x89, b'P', b'N', b'G', 0x00, 0x0d, 0x0a]).unwrap();

    let mut preset = PresetFile::new();
    assert!(matches!(
        preset.read_file(&path),
        Err(PresetError::BinaryData { offset: 4 })
    ));
}

#[test]
fn test_read_file_rejects_oversize_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("huge.milk");
    std::fs::write(&path, vec![b'\n'; MAX_FILE_SIZE + 1]).unwrap();

    let mut preset = PresetFile::new();
    assert!(matches!(
        preset.read_file(&path),
        Err(PresetError::TooLarge { .. })
    ));
}

#[test]
fn test_write_file_to_missing_directory_fails() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("missing").join("out.milk");

    let preset = PresetFile::empty_preset();
    assert!(matches!(
        preset.write_file(&path),
        Err(PresetError::Write { .. })
    ));
}
