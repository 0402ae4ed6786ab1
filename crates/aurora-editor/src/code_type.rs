//! Addressing of the code blocks inside a preset.

use std::fmt;

use aurora_preset::code_block;
use aurora_preset::export::{SHAPE_COUNT, WAVE_COUNT, shape_code_prefix, wave_code_prefix};

use crate::model::EditorPreset;

/// One editable block of equation or shader code.
///
/// Wave and shape variants carry the index of the custom wave or shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodeTarget {
    /// Preset init equations.
    PerFrameInit,
    /// Preset per-frame equations.
    PerFrame,
    /// Preset per-vertex equations, stored as `per_pixel_`.
    PerVertex,
    /// Custom wave init equations.
    WaveInit(usize),
    /// Custom wave per-frame equations.
    WavePerFrame(usize),
    /// Custom wave per-point equations.
    WavePerPoint(usize),
    /// Custom shape init equations.
    ShapeInit(usize),
    /// Custom shape per-frame equations.
    ShapePerFrame(usize),
    /// Warp pixel shader.
    WarpShader,
    /// Composite pixel shader.
    CompositeShader,
}

impl CodeTarget {
    /// Every code block of a preset, in file order.
    pub fn all() -> Vec<Self> {
        let mut targets = vec![Self::PerFrameInit, Self::PerFrame, Self::PerVertex];
        for index in 0..WAVE_COUNT {
            targets.extend([
                Self::WaveInit(index),
                Self::WavePerFrame(index),
                Self::WavePerPoint(index),
            ]);
        }
        for index in 0..SHAPE_COUNT {
            targets.extend([Self::ShapeInit(index), Self::ShapePerFrame(index)]);
        }
        targets.extend([Self::WarpShader, Self::CompositeShader]);
        targets
    }

    /// Key prefix of the numbered lines in the preset file.
    pub fn key_prefix(self) -> String {
        match self {
            Self::PerFrameInit => "per_frame_init_".to_string(),
            Self::PerFrame => "per_frame_".to_string(),
            Self::PerVertex => "per_pixel_".to_string(),
            Self::WaveInit(i) => format!("{}init", wave_code_prefix(i)),
            Self::WavePerFrame(i) => format!("{}per_frame", wave_code_prefix(i)),
            Self::WavePerPoint(i) => format!("{}per_point", wave_code_prefix(i)),
            Self::ShapeInit(i) => format!("{}init", shape_code_prefix(i)),
            Self::ShapePerFrame(i) => format!("{}per_frame", shape_code_prefix(i)),
            Self::WarpShader => "warp_".to_string(),
            Self::CompositeShader => "comp_".to_string(),
        }
    }

    /// Whether the block holds shader code rather than equations.
    pub fn is_shader(self) -> bool {
        code_block::is_shader_prefix(&self.key_prefix())
    }

    /// Tab title for the block.
    pub fn label(self) -> String {
        match self {
            Self::PerFrameInit => "Per-Frame Init".to_string(),
            Self::PerFrame => "Per-Frame".to_string(),
            Self::PerVertex => "Per-Vertex".to_string(),
            Self::WaveInit(i) => format!("Wave {i} Init"),
            Self::WavePerFrame(i) => format!("Wave {i} Per-Frame"),
            Self::WavePerPoint(i) => format!("Wave {i} Per-Point"),
            Self::ShapeInit(i) => format!("Shape {i} Init"),
            Self::ShapePerFrame(i) => format!("Shape {i} Per-Frame"),
            Self::WarpShader => "Warp Shader".to_string(),
            Self::CompositeShader => "Composite Shader".to_string(),
        }
    }
}

impl fmt::Display for CodeTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Number of lines in `code`, counted the way a line reader would.
///
/// A trailing newline does not start another line.
pub fn lines_of_code(code: &str) -> usize {
    code_block::split_lines(code).count()
}

impl EditorPreset {
    /// The code of `target`, or `None` if its wave or shape index is out of range.
    pub fn code(&self, target: CodeTarget) -> Option<&str> {
        let code = match target {
            CodeTarget::PerFrameInit => &self.per_frame_init_code,
            CodeTarget::PerFrame => &self.per_frame_code,
            CodeTarget::PerVertex => &self.per_pixel_code,
            CodeTarget::WaveInit(i) => &self.waves.get(i)?.init_code,
            CodeTarget::WavePerFrame(i) => &self.waves.get(i)?.per_frame_code,
            CodeTarget::WavePerPoint(i) => &self.waves.get(i)?.per_point_code,
            CodeTarget::ShapeInit(i) => &self.shapes.get(i)?.init_code,
            CodeTarget::ShapePerFrame(i) => &self.shapes.get(i)?.per_frame_code,
            CodeTarget::WarpShader => &self.warp_shader,
            CodeTarget::CompositeShader => &self.composite_shader,
        };
        Some(code)
    }

    /// Mutable access to the code of `target`.
    pub fn code_mut(&mut self, target: CodeTarget) -> Option<&mut String> {
        let code = match target {
            CodeTarget::PerFrameInit => &mut self.per_frame_init_code,
            CodeTarget::PerFrame => &mut self.per_frame_code,
            CodeTarget::PerVertex => &mut self.per_pixel_code,
            CodeTarget::WaveInit(i) => &mut self.waves.get_mut(i)?.init_code,
            CodeTarget::WavePerFrame(i) => &mut self.waves.get_mut(i)?.per_frame_code,
            CodeTarget::WavePerPoint(i) => &mut self.waves.get_mut(i)?.per_point_code,
            CodeTarget::ShapeInit(i) => &mut self.shapes.get_mut(i)?.init_code,
            CodeTarget::ShapePerFrame(i) => &mut self.shapes.get_mut(i)?.per_frame_code,
            CodeTarget::WarpShader => &mut self.warp_shader,
            CodeTarget::CompositeShader => &mut self.composite_shader,
        };
        Some(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aurora_preset::PresetFile;

    #[test]
    fn test_key_prefixes() {
        assert_eq!(CodeTarget::PerVertex.key_prefix(), "per_pixel_");
        assert_eq!(CodeTarget::WavePerPoint(2).key_prefix(), "wave_2_per_point");
        assert_eq!(CodeTarget::ShapeInit(0).key_prefix(), "shape_0_init");
        assert_eq!(CodeTarget::CompositeShader.key_prefix(), "comp_");
    }

    #[test]
    fn test_is_shader() {
        assert!(CodeTarget::WarpShader.is_shader());
        assert!(CodeTarget::CompositeShader.is_shader());
        assert!(!CodeTarget::PerFrame.is_shader());
        assert!(!CodeTarget::WaveInit(1).is_shader());
    }

    #[test]
    fn test_labels() {
        assert_eq!(CodeTarget::PerFrameInit.label(), "Per-Frame Init");
        assert_eq!(CodeTarget::WavePerFrame(3).label(), "Wave 3 Per-Frame");
        assert_eq!(CodeTarget::ShapePerFrame(1).to_string(), "Shape 1 Per-Frame");
    }

    #[test]
    fn test_all_targets_are_unique() {
        let all = CodeTarget::all();
        assert_eq!(all.len(), 3 + WAVE_COUNT * 3 + SHAPE_COUNT * 2 + 2);

        let prefixes: std::collections::HashSet<_> =
            all.iter().map(|target| target.key_prefix()).collect();
        assert_eq!(prefixes.len(), all.len());
    }

    #[test]
    fn test_lines_of_code() {
        assert_eq!(lines_of_code(""), 0);
        assert_eq!(lines_of_code("a"), 1);
        assert_eq!(lines_of_code("a\n"), 1);
        assert_eq!(lines_of_code("a\n\nb"), 3);
        assert_eq!(lines_of_code("a\nb\n"), 2);
    }

    #[test]
    fn test_code_access() {
        let mut preset = EditorPreset::default();
        preset
            .code_mut(CodeTarget::WavePerPoint(1))
            .unwrap()
            .push_str("y = sin(sample);");

        assert_eq!(preset.waves[1].per_point_code, "y = sin(sample);");
        assert_eq!(
            preset.code(CodeTarget::WavePerPoint(1)),
            Some("y = sin(sample);")
        );
    }

    #[test]
    fn test_code_out_of_range() {
        let mut preset = EditorPreset::default();
        assert!(preset.code(CodeTarget::ShapeInit(SHAPE_COUNT)).is_none());
        assert!(preset.code_mut(CodeTarget::WaveInit(WAVE_COUNT)).is_none());
    }

    #[test]
    fn test_targets_match_document_prefixes() {
        let mut preset = EditorPreset::default();
        for (n, target) in CodeTarget::all().into_iter().enumerate() {
            *preset.code_mut(target).unwrap() = format!("line{n};\n");
        }

        let mut doc = PresetFile::new();
        preset.to_document(&mut doc);

        for (n, target) in CodeTarget::all().into_iter().enumerate() {
            assert_eq!(doc.code(&target.key_prefix()), format!("line{n};\n"));
        }
    }
}
