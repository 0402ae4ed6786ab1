//! Preset version bands and pixel shader version rules.
//!
//! `MILKDROP_PRESET_VERSION` decides how shader versions are stored:
//!
//! | Band | Raw value | Shader versions |
//! |------|-----------|-----------------|
//! | Milkdrop 1.x | below 200 | none, shaders are not supported |
//! | Milkdrop 2.0 | 200 | one `PSVERSION` shared by warp and composite |
//! | Milkdrop 2.1+ | above 200 | separate `PSVERSION_WARP` and `PSVERSION_COMP` |
//!
//! A shader is only written to the file if its version is at least
//! [`MIN_SHADER_VERSION`]. Editing the versions down can therefore silently
//! drop shader code on save; [`EditorPreset::shader_loss_warnings`] reports
//! that situation.

use std::fmt;

use crate::model::EditorPreset;

/// Lowest pixel shader version for which shader code is saved.
pub const MIN_SHADER_VERSION: i32 = 2;

/// Highest pixel shader version offered by version sliders.
pub const MAX_SHADER_VERSION: i32 = 4;

/// The preset version band, as selected in the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PresetVersion {
    /// Milkdrop 1.x, no pixel shaders.
    Milkdrop1,
    /// Milkdrop 2.0, warp and composite share one shader version.
    Milkdrop2,
    /// Milkdrop 2.1 and later, separate warp and composite versions.
    Milkdrop21,
}

impl PresetVersion {
    /// All bands in ascending order.
    pub const ALL: [Self; 3] = [Self::Milkdrop1, Self::Milkdrop2, Self::Milkdrop21];

    /// Classifies a raw `MILKDROP_PRESET_VERSION` value.
    pub fn from_raw(version: i32) -> Self {
        match version {
            v if v < 200 => Self::Milkdrop1,
            200 => Self::Milkdrop2,
            _ => Self::Milkdrop21,
        }
    }

    /// Raw version written when this band is selected.
    pub fn raw(self) -> i32 {
        match self {
            Self::Milkdrop1 => 140,
            Self::Milkdrop2 => 200,
            Self::Milkdrop21 => 201,
        }
    }

    /// Whether presets in this band can contain shader code.
    pub fn supports_shaders(self) -> bool {
        self != Self::Milkdrop1
    }

    /// Whether warp and composite shaders have their own version.
    pub fn separate_shader_versions(self) -> bool {
        self == Self::Milkdrop21
    }

    /// Human-readable description for version selectors.
    pub fn description(self) -> &'static str {
        match self {
            Self::Milkdrop1 => "140 - Milkdrop 1.x, No Shaders",
            Self::Milkdrop2 => "200 - Milkdrop 2.0, Same Warp/Comp PS Versions",
            Self::Milkdrop21 => "201 - Milkdrop 2.1+ Separate Warp/Comp PS Versions",
        }
    }
}

impl fmt::Display for PresetVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Shader code that will not be saved with the current version settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderLossWarning {
    /// The preset version has no shader support but shader code exists.
    ShadersDisabled,
    /// The warp shader version is too low for the existing warp shader.
    WarpVersionTooLow,
    /// The composite shader version is too low for the existing composite shader.
    CompositeVersionTooLow,
}

impl ShaderLossWarning {
    /// Message shown to the user.
    pub fn message(self) -> &'static str {
        match self {
            Self::ShadersDisabled => {
                "WARNING: You have disabled shader support, but the preset still contains shader code.\n\
                 The shader code WILL NOT BE SAVED and gets lost once you close this preset in the editor."
            }
            Self::WarpVersionTooLow => {
                "WARNING: You have selected a WARP shader PS Version below 2, but the preset still contains warp shader code.\n\
                 The warp shader code WILL NOT BE SAVED and gets lost once you close this preset in the editor."
            }
            Self::CompositeVersionTooLow => {
                "WARNING: You have selected a COMPOSITE shader PS Version below 2, but the preset still contains composite shader code.\n\
                 The composite shader WILL NOT BE SAVED and gets lost once you close this preset in the editor."
            }
        }
    }
}

impl fmt::Display for ShaderLossWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl EditorPreset {
    /// The band of the current `preset_version`.
    pub fn version_band(&self) -> PresetVersion {
        PresetVersion::from_raw(self.preset_version)
    }

    /// Switches to another version band, adjusting the shader versions.
    ///
    /// Milkdrop 1.x zeroes both shader versions and Milkdrop 2.0 copies the
    /// warp version to the composite version. Milkdrop 2.1 keeps both.
    pub fn set_version_band(&mut self, band: PresetVersion) {
        self.preset_version = band.raw();
        match band {
            PresetVersion::Milkdrop1 => {
                self.warp_shader_version = 0;
                self.composite_shader_version = 0;
            }
            PresetVersion::Milkdrop2 => {
                self.composite_shader_version = self.warp_shader_version;
            }
            PresetVersion::Milkdrop21 => {}
        }
    }

    /// Sets the single shader version used by Milkdrop 2.0 presets.
    pub fn set_shared_shader_version(&mut self, version: i32) {
        self.warp_shader_version = version;
        self.composite_shader_version = version;
    }

    /// Shader versions as they are written to a document.
    pub(crate) fn normalized_shader_versions(&self) -> (i32, i32) {
        if self.version_band().supports_shaders() {
            (self.warp_shader_version, self.composite_shader_version)
        } else {
            (0, 0)
        }
    }

    /// Whether the composite shader replaces the classic post-processing.
    pub fn uses_composite_shader(&self) -> bool {
        self.preset_version >= 200 && self.composite_shader_version >= MIN_SHADER_VERSION
    }

    /// Whether the shader editor has anything to edit.
    pub fn shaders_editable(&self) -> bool {
        self.version_band().supports_shaders()
            && (self.warp_shader_version >= MIN_SHADER_VERSION
                || self.composite_shader_version >= MIN_SHADER_VERSION)
    }

    /// Shader code that would be dropped by the next save.
    pub fn shader_loss_warnings(&self) -> Vec<ShaderLossWarning> {
        let mut warnings = Vec::new();

        if !self.version_band().supports_shaders() {
            if !self.warp_shader.is_empty() || !self.composite_shader.is_empty() {
                warnings.push(ShaderLossWarning::ShadersDisabled);
            }
            return warnings;
        }

        if self.warp_shader_version < MIN_SHADER_VERSION && !self.warp_shader.is_empty() {
            warnings.push(ShaderLossWarning::WarpVersionTooLow);
        }
        if self.composite_shader_version < MIN_SHADER_VERSION && !self.composite_shader.is_empty()
        {
            warnings.push(ShaderLossWarning::CompositeVersionTooLow);
        }

        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_bands() {
        assert_eq!(PresetVersion::from_raw(100), PresetVersion::Milkdrop1);
        assert_eq!(PresetVersion::from_raw(199), PresetVersion::Milkdrop1);
        assert_eq!(PresetVersion::from_raw(-5), PresetVersion::Milkdrop1);
        assert_eq!(PresetVersion::from_raw(200), PresetVersion::Milkdrop2);
        assert_eq!(PresetVersion::from_raw(201), PresetVersion::Milkdrop21);
        assert_eq!(PresetVersion::from_raw(250), PresetVersion::Milkdrop21);
    }

    #[test]
    fn test_raw_round_trips_band() {
        for band in PresetVersion::ALL {
            assert_eq!(PresetVersion::from_raw(band.raw()), band);
        }
    }

    #[test]
    fn test_band_capabilities() {
        assert!(!PresetVersion::Milkdrop1.supports_shaders());
        assert!(PresetVersion::Milkdrop2.supports_shaders());
        assert!(!PresetVersion::Milkdrop2.separate_shader_versions());
        assert!(PresetVersion::Milkdrop21.separate_shader_versions());
    }

    #[test]
    fn test_set_band_milkdrop1_zeroes_versions() {
        let mut preset = EditorPreset {
            preset_version: 201,
            warp_shader_version: 3,
            composite_shader_version: 4,
            ..Default::default()
        };
        preset.set_version_band(PresetVersion::Milkdrop1);

        assert_eq!(preset.preset_version, 140);
        assert_eq!(preset.warp_shader_version, 0);
        assert_eq!(preset.composite_shader_version, 0);
    }

    #[test]
    fn test_set_band_milkdrop2_shares_warp_version() {
        let mut preset = EditorPreset {
            preset_version: 201,
            warp_shader_version: 3,
            composite_shader_version: 4,
            ..Default::default()
        };
        preset.set_version_band(PresetVersion::Milkdrop2);

        assert_eq!(preset.preset_version, 200);
        assert_eq!(preset.composite_shader_version, 3);
    }

    #[test]
    fn test_set_band_milkdrop21_keeps_versions() {
        let mut preset = EditorPreset {
            preset_version: 200,
            warp_shader_version: 2,
            composite_shader_version: 2,
            ..Default::default()
        };
        preset.set_version_band(PresetVersion::Milkdrop21);
        preset.composite_shader_version = 4;

        assert_eq!(preset.preset_version, 201);
        assert_eq!(preset.warp_shader_version, 2);
        assert_eq!(preset.composite_shader_version, 4);
    }

    #[test]
    fn test_shared_shader_version() {
        let mut preset = EditorPreset::default();
        preset.set_shared_shader_version(3);
        assert_eq!(preset.warp_shader_version, 3);
        assert_eq!(preset.composite_shader_version, 3);
    }

    #[test]
    fn test_no_warnings_without_shader_code() {
        let preset = EditorPreset::default();
        assert!(preset.shader_loss_warnings().is_empty());
    }

    #[test]
    fn test_shaders_disabled_warning() {
        let preset = EditorPreset {
            preset_version: 140,
            composite_shader: "shader_body {}".into(),
            ..Default::default()
        };
        assert_eq!(
            preset.shader_loss_warnings(),
            vec![ShaderLossWarning::ShadersDisabled]
        );
    }

    #[test]
    fn test_version_too_low_warnings() {
        let preset = EditorPreset {
            preset_version: 201,
            warp_shader_version: 1,
            composite_shader_version: 0,
            warp_shader: "a".into(),
            composite_shader: "b".into(),
            ..Default::default()
        };
        assert_eq!(
            preset.shader_loss_warnings(),
            vec![
                ShaderLossWarning::WarpVersionTooLow,
                ShaderLossWarning::CompositeVersionTooLow
            ]
        );
    }

    #[test]
    fn test_sufficient_versions_no_warning() {
        let preset = EditorPreset {
            preset_version: 200,
            warp_shader_version: 2,
            composite_shader_version: 2,
            warp_shader: "a".into(),
            composite_shader: "b".into(),
            ..Default::default()
        };
        assert!(preset.shader_loss_warnings().is_empty());
    }

    #[test]
    fn test_uses_composite_shader() {
        let mut preset = EditorPreset {
            preset_version: 201,
            composite_shader_version: 2,
            ..Default::default()
        };
        assert!(preset.uses_composite_shader());

        preset.composite_shader_version = 1;
        assert!(!preset.uses_composite_shader());

        preset.composite_shader_version = 3;
        preset.preset_version = 140;
        assert!(!preset.uses_composite_shader());
    }

    #[test]
    fn test_shaders_editable() {
        let mut preset = EditorPreset {
            preset_version: 201,
            warp_shader_version: 2,
            ..Default::default()
        };
        assert!(preset.shaders_editable());

        preset.warp_shader_version = 1;
        assert!(!preset.shaders_editable());
    }

    #[test]
    fn test_warning_messages() {
        assert!(
            ShaderLossWarning::ShadersDisabled
                .message()
                .contains("disabled shader support")
        );
        assert!(ShaderLossWarning::WarpVersionTooLow.to_string().contains("WARP"));
        assert!(
            ShaderLossWarning::CompositeVersionTooLow
                .message()
                .contains("COMPOSITE")
        );
    }
}
