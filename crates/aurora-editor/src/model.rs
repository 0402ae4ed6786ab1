//! Strongly-typed preset values for editing.

use aurora_preset::PresetFile;
use aurora_preset::export::{
    SHAPE_COUNT, WAVE_COUNT, shape_code_prefix, shape_field_prefix, wave_code_prefix,
    wave_field_prefix,
};

/// An RGBA color with float channels in the 0..1 range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorRgba {
    /// Red channel.
    pub red: f32,
    /// Green channel.
    pub green: f32,
    /// Blue channel.
    pub blue: f32,
    /// Alpha channel.
    pub alpha: f32,
}

impl ColorRgba {
    /// Create a color from its four channels.
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Channels as `[r, g, b, a]`, the layout color pickers expect.
    pub fn to_array(self) -> [f32; 4] {
        [self.red, self.green, self.blue, self.alpha]
    }

    /// Create a color from `[r, g, b, a]`.
    pub fn from_array([red, green, blue, alpha]: [f32; 4]) -> Self {
        Self::new(red, green, blue, alpha)
    }
}

/// A custom waveform.
#[derive(Debug, Clone, PartialEq)]
pub struct Wave {
    /// Render the waveform if true.
    pub enabled: bool,
    /// Number of samples (vertices) in the waveform.
    pub samples: i32,
    /// Separation distance of dual waveforms.
    pub sep: i32,
    /// Use spectrum data instead of PCM data.
    pub spectrum: bool,
    /// Draw dots instead of lines.
    pub use_dots: bool,
    /// Draw thicker lines.
    pub draw_thick: bool,
    /// Add color values together.
    pub additive: bool,
    /// Scale factor of the waveform.
    pub scaling: f32,
    /// Smoothing factor of the waveform.
    pub smoothing: f32,
    /// Wave color.
    pub color: ColorRgba,
    /// Init code, run once on load.
    pub init_code: String,
    /// Per-frame code, run once after the preset per-frame code.
    pub per_frame_code: String,
    /// Per-point code, run once per waveform vertex.
    pub per_point_code: String,
}

impl Default for Wave {
    fn default() -> Self {
        Self {
            enabled: false,
            samples: 512,
            sep: 0,
            spectrum: false,
            use_dots: false,
            draw_thick: false,
            additive: false,
            scaling: 1.0,
            smoothing: 0.5,
            color: ColorRgba::new(1.0, 1.0, 1.0, 1.0),
            init_code: String::new(),
            per_frame_code: String::new(),
            per_point_code: String::new(),
        }
    }
}

/// A custom shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    /// Draw the shape if true.
    pub enabled: bool,
    /// Number of sides (vertices).
    pub sides: i32,
    /// Draw additively.
    pub additive: bool,
    /// Draw the border with a thick line.
    pub thick_outline: bool,
    /// Render with the main texture.
    pub textured: bool,
    /// Number of instances to render.
    pub instances: i32,
    /// Horizontal position.
    pub x: f32,
    /// Vertical position.
    pub y: f32,
    /// Radius, 1.0 fills the whole screen.
    pub radius: f32,
    /// Rotation angle.
    pub angle: f32,
    /// Texture rotation angle.
    pub tex_angle: f32,
    /// Texture zoom.
    pub tex_zoom: f32,
    /// Center color.
    pub color: ColorRgba,
    /// Edge color.
    pub color2: ColorRgba,
    /// Border color.
    pub border_color: ColorRgba,
    /// Init code, run once on load.
    pub init_code: String,
    /// Per-frame code, run once per shape instance.
    pub per_frame_code: String,
}

impl Default for Shape {
    fn default() -> Self {
        Self {
            enabled: false,
            sides: 4,
            additive: false,
            thick_outline: false,
            textured: false,
            instances: 1,
            x: 0.5,
            y: 0.5,
            radius: 0.1,
            angle: 0.0,
            tex_angle: 0.0,
            tex_zoom: 1.0,
            color: ColorRgba::new(1.0, 0.0, 0.0, 1.0),
            color2: ColorRgba::new(1.0, 0.0, 0.0, 0.0),
            border_color: ColorRgba::new(1.0, 1.0, 1.0, 0.1),
            init_code: String::new(),
            per_frame_code: String::new(),
        }
    }
}

/// All values and code of a preset as plain fields.
///
/// Edit widgets need the values on every frame, so they work on this struct
/// directly instead of going through the string-based [`PresetFile`]
/// accessors. [`from_document`](Self::from_document) and
/// [`to_document`](Self::to_document) sync it with a document in both
/// directions.
///
/// Defaults are the values Milkdrop writes for missing keys.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorPreset {
    /// Preset rating (unused by the renderer).
    pub rating: f32,
    /// Gamma adjustment.
    pub gamma_adj: f32,
    /// Per-frame image decay.
    pub decay: f32,
    /// Video echo zoom.
    pub video_echo_zoom: f32,
    /// Video echo alpha.
    pub video_echo_alpha: f32,
    /// Video echo orientation (0-3).
    pub video_echo_orientation: i32,

    /// Default waveform drawing mode.
    pub wave_mode: i32,
    /// Draw the default waveform additively.
    pub additive_waves: bool,
    /// Draw the default waveform as dots.
    pub wave_dots: bool,
    /// Draw the default waveform with thick lines.
    pub wave_thick: bool,
    /// Modulate the waveform alpha by volume.
    pub mod_wave_alpha_by_volume: bool,
    /// Maximize the waveform color.
    pub maximize_wave_color: bool,
    /// Wrap texture lookups at the screen edges.
    pub tex_wrap: bool,
    /// Darken the screen center.
    pub darken_center: bool,
    /// Red/blue stereo filter.
    pub red_blue_stereo: bool,
    /// Brighten filter.
    pub brighten: bool,
    /// Darken filter.
    pub darken: bool,
    /// Solarize filter.
    pub solarize: bool,
    /// Invert filter.
    pub invert: bool,

    /// Default waveform color. The alpha channel is `fWaveAlpha`.
    pub wave_color: ColorRgba,
    /// Default waveform scale.
    pub wave_scale: f32,
    /// Default waveform smoothing.
    pub wave_smoothing: f32,
    /// Default waveform mode parameter.
    pub wave_param: f32,
    /// Volume at which alpha modulation starts.
    pub mod_wave_alpha_start: f32,
    /// Volume at which alpha modulation ends.
    pub mod_wave_alpha_end: f32,
    /// Warp animation speed.
    pub warp_anim_speed: f32,
    /// Warp scale.
    pub warp_scale: f32,
    /// Zoom exponent.
    pub zoom_exponent: f32,
    /// Legacy shader amount.
    pub shader: f32,

    /// Zoom per frame.
    pub zoom: f32,
    /// Rotation per frame.
    pub rot: f32,
    /// Rotation center x.
    pub rot_cx: f32,
    /// Rotation center y.
    pub rot_cy: f32,
    /// Horizontal motion per frame.
    pub x_push: f32,
    /// Vertical motion per frame.
    pub y_push: f32,
    /// Warp amount.
    pub warp_amount: f32,
    /// Horizontal stretch.
    pub stretch_x: f32,
    /// Vertical stretch.
    pub stretch_y: f32,
    /// Default waveform x position.
    pub wave_x: f32,
    /// Default waveform y position.
    pub wave_y: f32,

    /// Outer border size.
    pub outer_border_size: f32,
    /// Outer border color.
    pub outer_border_color: ColorRgba,
    /// Inner border size.
    pub inner_border_size: f32,
    /// Inner border color.
    pub inner_border_color: ColorRgba,

    /// Motion vector grid width.
    pub mv_x: f32,
    /// Motion vector grid height.
    pub mv_y: f32,
    /// Motion vector x offset.
    pub mv_dx: f32,
    /// Motion vector y offset.
    pub mv_dy: f32,
    /// Motion vector length.
    pub mv_l: f32,
    /// Motion vector color.
    pub mv_color: ColorRgba,

    /// Blur 1 range minimum.
    pub blur1_min: f32,
    /// Blur 2 range minimum.
    pub blur2_min: f32,
    /// Blur 3 range minimum.
    pub blur3_min: f32,
    /// Blur 1 range maximum.
    pub blur1_max: f32,
    /// Blur 2 range maximum.
    pub blur2_max: f32,
    /// Blur 3 range maximum.
    pub blur3_max: f32,
    /// Blur 1 edge darkening.
    pub blur1_edge_darken: f32,

    /// `MILKDROP_PRESET_VERSION`.
    pub preset_version: i32,
    /// `PSVERSION` or `PSVERSION_WARP`.
    pub warp_shader_version: i32,
    /// `PSVERSION` or `PSVERSION_COMP`.
    pub composite_shader_version: i32,

    /// Preset init code, run once on load.
    pub per_frame_init_code: String,
    /// Preset per-frame code, run once at the start of each frame.
    pub per_frame_code: String,
    /// Preset per-vertex ("per-pixel") code, run once per warp mesh vertex.
    pub per_pixel_code: String,

    /// Custom waveforms.
    pub waves: [Wave; WAVE_COUNT],
    /// Custom shapes.
    pub shapes: [Shape; SHAPE_COUNT],

    /// Warp shader code.
    pub warp_shader: String,
    /// Composite shader code.
    pub composite_shader: String,
}

impl Default for EditorPreset {
    fn default() -> Self {
        Self {
            rating: 3.0,
            gamma_adj: 2.0,
            decay: 0.98,
            video_echo_zoom: 2.0,
            video_echo_alpha: 0.0,
            video_echo_orientation: 0,

            wave_mode: 0,
            additive_waves: false,
            wave_dots: false,
            wave_thick: false,
            mod_wave_alpha_by_volume: false,
            maximize_wave_color: true,
            tex_wrap: true,
            darken_center: false,
            red_blue_stereo: false,
            brighten: false,
            darken: false,
            solarize: false,
            invert: false,

            wave_color: ColorRgba::new(1.0, 1.0, 1.0, 0.8),
            wave_scale: 1.0,
            wave_smoothing: 0.75,
            wave_param: 0.0,
            mod_wave_alpha_start: 0.75,
            mod_wave_alpha_end: 0.95,
            warp_anim_speed: 1.0,
            warp_scale: 1.0,
            zoom_exponent: 1.0,
            shader: 0.0,

            zoom: 1.0,
            rot: 0.0,
            rot_cx: 0.5,
            rot_cy: 0.5,
            x_push: 0.0,
            y_push: 0.0,
            warp_amount: 1.0,
            stretch_x: 1.0,
            stretch_y: 1.0,
            wave_x: 0.5,
            wave_y: 0.5,

            outer_border_size: 0.01,
            outer_border_color: ColorRgba::new(0.0, 0.0, 0.0, 0.0),
            inner_border_size: 0.01,
            inner_border_color: ColorRgba::new(0.25, 0.25, 0.25, 0.0),

            mv_x: 12.0,
            mv_y: 9.0,
            mv_dx: 0.0,
            mv_dy: 0.0,
            mv_l: 0.9,
            mv_color: ColorRgba::new(1.0, 1.0, 1.0, 1.0),

            blur1_min: 0.0,
            blur2_min: 0.0,
            blur3_min: 0.0,
            blur1_max: 1.0,
            blur2_max: 1.0,
            blur3_max: 1.0,
            blur1_edge_darken: 0.25,

            preset_version: 100,
            warp_shader_version: 0,
            composite_shader_version: 0,

            per_frame_init_code: String::new(),
            per_frame_code: String::new(),
            per_pixel_code: String::new(),

            waves: Default::default(),
            shapes: Default::default(),

            warp_shader: String::new(),
            composite_shader: String::new(),
        }
    }
}

fn read_color(doc: &PresetFile, keys: [&str; 4], color: ColorRgba) -> ColorRgba {
    ColorRgba {
        red: doc.get_float(keys[0], color.red),
        green: doc.get_float(keys[1], color.green),
        blue: doc.get_float(keys[2], color.blue),
        alpha: doc.get_float(keys[3], color.alpha),
    }
}

fn write_color(doc: &mut PresetFile, keys: [&str; 4], color: ColorRgba) {
    doc.set_float(keys[0], color.red);
    doc.set_float(keys[1], color.green);
    doc.set_float(keys[2], color.blue);
    doc.set_float(keys[3], color.alpha);
}

impl EditorPreset {
    /// Reads every field from `doc`, using the field defaults for missing or
    /// unparsable values.
    pub fn from_document(doc: &PresetFile) -> Self {
        let mut preset = Self::default();
        preset.read_document(doc);
        preset
    }

    fn read_document(&mut self, doc: &PresetFile) {
        // General
        self.rating = doc.get_float("fRating", self.rating);
        self.decay = doc.get_float("fDecay", self.decay);
        self.gamma_adj = doc.get_float("fGammaAdj", self.gamma_adj);
        self.video_echo_zoom = doc.get_float("fVideoEchoZoom", self.video_echo_zoom);
        self.video_echo_alpha = doc.get_float("fVideoEchoAlpha", self.video_echo_alpha);
        self.video_echo_orientation =
            doc.get_int("nVideoEchoOrientation", self.video_echo_orientation);
        self.red_blue_stereo = doc.get_bool("bRedBlueStereo", self.red_blue_stereo);
        self.brighten = doc.get_bool("bBrighten", self.brighten);
        self.darken = doc.get_bool("bDarken", self.darken);
        self.solarize = doc.get_bool("bSolarize", self.solarize);
        self.invert = doc.get_bool("bInvert", self.invert);
        self.shader = doc.get_float("fShader", self.shader);
        self.blur1_min = doc.get_float("b1n", self.blur1_min);
        self.blur2_min = doc.get_float("b2n", self.blur2_min);
        self.blur3_min = doc.get_float("b3n", self.blur3_min);
        self.blur1_max = doc.get_float("b1x", self.blur1_max);
        self.blur2_max = doc.get_float("b2x", self.blur2_max);
        self.blur3_max = doc.get_float("b3x", self.blur3_max);
        self.blur1_edge_darken = doc.get_float("b1ed", self.blur1_edge_darken);

        // Default waveform
        self.wave_mode = doc.get_int("nWaveMode", self.wave_mode);
        self.additive_waves = doc.get_bool("bAdditiveWaves", self.additive_waves);
        self.wave_dots = doc.get_bool("bWaveDots", self.wave_dots);
        self.wave_thick = doc.get_bool("bWaveThick", self.wave_thick);
        self.mod_wave_alpha_by_volume =
            doc.get_bool("bModWaveAlphaByVolume", self.mod_wave_alpha_by_volume);
        self.maximize_wave_color = doc.get_bool("bMaximizeWaveColor", self.maximize_wave_color);
        self.wave_scale = doc.get_float("fWaveScale", self.wave_scale);
        self.wave_smoothing = doc.get_float("fWaveSmoothing", self.wave_smoothing);
        self.wave_param = doc.get_float("fWaveParam", self.wave_param);
        self.mod_wave_alpha_start = doc.get_float("fModWaveAlphaStart", self.mod_wave_alpha_start);
        self.mod_wave_alpha_end = doc.get_float("fModWaveAlphaEnd", self.mod_wave_alpha_end);
        self.wave_color = read_color(
            doc,
            ["wave_r", "wave_g", "wave_b", "fWaveAlpha"],
            self.wave_color,
        );
        self.wave_x = doc.get_float("wave_x", self.wave_x);
        self.wave_y = doc.get_float("wave_y", self.wave_y);

        // Motion vectors
        self.mv_x = doc.get_float("nMotionVectorsX", self.mv_x);
        self.mv_y = doc.get_float("nMotionVectorsY", self.mv_y);
        self.mv_dx = doc.get_float("mv_dx", self.mv_dx);
        self.mv_dy = doc.get_float("mv_dy", self.mv_dy);
        self.mv_l = doc.get_float("mv_l", self.mv_l);
        self.mv_color.red = doc.get_float("mv_r", self.mv_color.red);
        self.mv_color.green = doc.get_float("mv_g", self.mv_color.green);
        self.mv_color.blue = doc.get_float("mv_b", self.mv_color.blue);
        // Old presets only have the on/off flag; mv_a overrides it when present.
        self.mv_color.alpha = if doc.get_bool("bMotionVectorsOn", false) {
            1.0
        } else {
            0.0
        };
        self.mv_color.alpha = doc.get_float("mv_a", self.mv_color.alpha);

        // Motion
        self.zoom = doc.get_float("zoom", self.zoom);
        self.rot = doc.get_float("rot", self.rot);
        self.rot_cx = doc.get_float("cx", self.rot_cx);
        self.rot_cy = doc.get_float("cy", self.rot_cy);
        self.x_push = doc.get_float("dx", self.x_push);
        self.y_push = doc.get_float("dy", self.y_push);
        self.warp_amount = doc.get_float("warp", self.warp_amount);
        self.stretch_x = doc.get_float("sx", self.stretch_x);
        self.stretch_y = doc.get_float("sy", self.stretch_y);
        self.tex_wrap = doc.get_bool("bTexWrap", self.tex_wrap);
        self.darken_center = doc.get_bool("bDarkenCenter", self.darken_center);
        self.warp_anim_speed = doc.get_float("fWarpAnimSpeed", self.warp_anim_speed);
        self.warp_scale = doc.get_float("fWarpScale", self.warp_scale);
        self.zoom_exponent = doc.get_float("fZoomExponent", self.zoom_exponent);

        // Borders
        self.outer_border_size = doc.get_float("ob_size", self.outer_border_size);
        self.outer_border_color = read_color(
            doc,
            ["ob_r", "ob_g", "ob_b", "ob_a"],
            self.outer_border_color,
        );
        self.inner_border_size = doc.get_float("ib_size", self.inner_border_size);
        self.inner_border_color = read_color(
            doc,
            ["ib_r", "ib_g", "ib_b", "ib_a"],
            self.inner_border_color,
        );

        // Versions
        self.preset_version = doc.get_int("MILKDROP_PRESET_VERSION", self.preset_version);
        if self.preset_version < 200 {
            // Milkdrop 1.x has no shaders.
            self.warp_shader_version = 0;
            self.composite_shader_version = 0;
        } else if self.preset_version == 200 {
            // Milkdrop 2.0 has a single version for both shaders.
            self.warp_shader_version = doc.get_int("PSVERSION", self.warp_shader_version);
            self.composite_shader_version = doc.get_int("PSVERSION", self.composite_shader_version);
        } else {
            self.warp_shader_version = doc.get_int("PSVERSION_WARP", self.warp_shader_version);
            self.composite_shader_version =
                doc.get_int("PSVERSION_COMP", self.composite_shader_version);
        }

        // Code
        self.per_frame_init_code = doc.code("per_frame_init_");
        self.per_frame_code = doc.code("per_frame_");
        self.per_pixel_code = doc.code("per_pixel_");

        for (index, wave) in self.waves.iter_mut().enumerate() {
            let fields = wave_field_prefix(index);
            let key = |name: &str| format!("{fields}{name}");

            // Read as an integer: any non-zero value enables the wave.
            wave.enabled = doc.get_int(&key("enabled"), i32::from(wave.enabled)) != 0;
            wave.samples = doc.get_int(&key("samples"), wave.samples);
            wave.sep = doc.get_int(&key("sep"), wave.sep);
            wave.spectrum = doc.get_bool(&key("bSpectrum"), wave.spectrum);
            wave.use_dots = doc.get_bool(&key("bUseDots"), wave.use_dots);
            wave.draw_thick = doc.get_bool(&key("bDrawThick"), wave.draw_thick);
            wave.additive = doc.get_bool(&key("bAdditive"), wave.additive);
            wave.scaling = doc.get_float(&key("scaling"), wave.scaling);
            wave.smoothing = doc.get_float(&key("smoothing"), wave.smoothing);
            wave.color = read_color(
                doc,
                [&key("r"), &key("g"), &key("b"), &key("a")],
                wave.color,
            );

            let code = wave_code_prefix(index);
            wave.init_code = doc.code(&format!("{code}init"));
            wave.per_frame_code = doc.code(&format!("{code}per_frame"));
            wave.per_point_code = doc.code(&format!("{code}per_point"));
        }

        for (index, shape) in self.shapes.iter_mut().enumerate() {
            let fields = shape_field_prefix(index);
            let key = |name: &str| format!("{fields}{name}");

            shape.enabled = doc.get_bool(&key("enabled"), shape.enabled);
            shape.sides = doc.get_int(&key("sides"), shape.sides);
            shape.additive = doc.get_bool(&key("additive"), shape.additive);
            shape.thick_outline = doc.get_bool(&key("thickOutline"), shape.thick_outline);
            shape.textured = doc.get_bool(&key("textured"), shape.textured);
            shape.instances = doc.get_int(&key("num_inst"), shape.instances);
            shape.x = doc.get_float(&key("x"), shape.x);
            shape.y = doc.get_float(&key("y"), shape.y);
            shape.radius = doc.get_float(&key("rad"), shape.radius);
            shape.angle = doc.get_float(&key("ang"), shape.angle);
            shape.tex_angle = doc.get_float(&key("tex_ang"), shape.tex_angle);
            shape.tex_zoom = doc.get_float(&key("tex_zoom"), shape.tex_zoom);
            shape.color = read_color(
                doc,
                [&key("r"), &key("g"), &key("b"), &key("a")],
                shape.color,
            );
            shape.color2 = read_color(
                doc,
                [&key("r2"), &key("g2"), &key("b2"), &key("a2")],
                shape.color2,
            );
            shape.border_color = read_color(
                doc,
                [
                    &key("border_r"),
                    &key("border_g"),
                    &key("border_b"),
                    &key("border_a"),
                ],
                shape.border_color,
            );

            let code = shape_code_prefix(index);
            shape.init_code = doc.code(&format!("{code}init"));
            shape.per_frame_code = doc.code(&format!("{code}per_frame"));
        }

        // Shaders
        self.warp_shader = doc.code("warp_");
        self.composite_shader = doc.code("comp_");
    }

    /// Writes every field into `doc` under the keys it was read from.
    ///
    /// Shader versions are normalized for the preset version first: presets
    /// below version 200 get zero versions, so their shader code is not
    /// exported. Keys not covered by the model are left as they are.
    pub fn to_document(&self, doc: &mut PresetFile) {
        // General
        doc.set_float("fRating", self.rating);
        doc.set_float("fDecay", self.decay);
        doc.set_float("fGammaAdj", self.gamma_adj);
        doc.set_float("fVideoEchoZoom", self.video_echo_zoom);
        doc.set_float("fVideoEchoAlpha", self.video_echo_alpha);
        doc.set_int("nVideoEchoOrientation", self.video_echo_orientation);
        doc.set_bool("bRedBlueStereo", self.red_blue_stereo);
        doc.set_bool("bBrighten", self.brighten);
        doc.set_bool("bDarken", self.darken);
        doc.set_bool("bSolarize", self.solarize);
        doc.set_bool("bInvert", self.invert);
        doc.set_float("fShader", self.shader);
        doc.set_float("b1n", self.blur1_min);
        doc.set_float("b2n", self.blur2_min);
        doc.set_float("b3n", self.blur3_min);
        doc.set_float("b1x", self.blur1_max);
        doc.set_float("b2x", self.blur2_max);
        doc.set_float("b3x", self.blur3_max);
        doc.set_float("b1ed", self.blur1_edge_darken);

        // Default waveform
        doc.set_int("nWaveMode", self.wave_mode);
        doc.set_bool("bAdditiveWaves", self.additive_waves);
        doc.set_bool("bWaveDots", self.wave_dots);
        doc.set_bool("bWaveThick", self.wave_thick);
        doc.set_bool("bModWaveAlphaByVolume", self.mod_wave_alpha_by_volume);
        doc.set_bool("bMaximizeWaveColor", self.maximize_wave_color);
        doc.set_float("fWaveScale", self.wave_scale);
        doc.set_float("fWaveSmoothing", self.wave_smoothing);
        doc.set_float("fWaveParam", self.wave_param);
        doc.set_float("fModWaveAlphaStart", self.mod_wave_alpha_start);
        doc.set_float("fModWaveAlphaEnd", self.mod_wave_alpha_end);
        write_color(doc, ["wave_r", "wave_g", "wave_b", "fWaveAlpha"], self.wave_color);
        doc.set_float("wave_x", self.wave_x);
        doc.set_float("wave_y", self.wave_y);

        // Motion vectors
        doc.set_float("nMotionVectorsX", self.mv_x);
        doc.set_float("nMotionVectorsY", self.mv_y);
        doc.set_float("mv_dx", self.mv_dx);
        doc.set_float("mv_dy", self.mv_dy);
        doc.set_float("mv_l", self.mv_l);
        write_color(doc, ["mv_r", "mv_g", "mv_b", "mv_a"], self.mv_color);

        // Motion
        doc.set_float("zoom", self.zoom);
        doc.set_float("rot", self.rot);
        doc.set_float("cx", self.rot_cx);
        doc.set_float("cy", self.rot_cy);
        doc.set_float("dx", self.x_push);
        doc.set_float("dy", self.y_push);
        doc.set_float("warp", self.warp_amount);
        doc.set_float("sx", self.stretch_x);
        doc.set_float("sy", self.stretch_y);
        doc.set_bool("bTexWrap", self.tex_wrap);
        doc.set_bool("bDarkenCenter", self.darken_center);
        doc.set_float("fWarpAnimSpeed", self.warp_anim_speed);
        doc.set_float("fWarpScale", self.warp_scale);
        doc.set_float("fZoomExponent", self.zoom_exponent);

        // Borders
        doc.set_float("ob_size", self.outer_border_size);
        write_color(doc, ["ob_r", "ob_g", "ob_b", "ob_a"], self.outer_border_color);
        doc.set_float("ib_size", self.inner_border_size);
        write_color(doc, ["ib_r", "ib_g", "ib_b", "ib_a"], self.inner_border_color);

        // Versions
        let (warp_version, composite_version) = self.normalized_shader_versions();
        doc.set_int("MILKDROP_PRESET_VERSION", self.preset_version);
        doc.set_int("PSVERSION", warp_version);
        doc.set_int("PSVERSION_WARP", warp_version);
        doc.set_int("PSVERSION_COMP", composite_version);

        // Code
        doc.set_code("per_frame_init_", &self.per_frame_init_code);
        doc.set_code("per_frame_", &self.per_frame_code);
        doc.set_code("per_pixel_", &self.per_pixel_code);

        for (index, wave) in self.waves.iter().enumerate() {
            let fields = wave_field_prefix(index);
            let key = |name: &str| format!("{fields}{name}");

            doc.set_int(&key("enabled"), i32::from(wave.enabled));
            doc.set_int(&key("samples"), wave.samples);
            doc.set_int(&key("sep"), wave.sep);
            doc.set_bool(&key("bSpectrum"), wave.spectrum);
            doc.set_bool(&key("bUseDots"), wave.use_dots);
            doc.set_bool(&key("bDrawThick"), wave.draw_thick);
            doc.set_bool(&key("bAdditive"), wave.additive);
            doc.set_float(&key("scaling"), wave.scaling);
            doc.set_float(&key("smoothing"), wave.smoothing);
            write_color(doc, [&key("r"), &key("g"), &key("b"), &key("a")], wave.color);

            let code = wave_code_prefix(index);
            doc.set_code(&format!("{code}init"), &wave.init_code);
            doc.set_code(&format!("{code}per_frame"), &wave.per_frame_code);
            doc.set_code(&format!("{code}per_point"), &wave.per_point_code);
        }

        for (index, shape) in self.shapes.iter().enumerate() {
            let fields = shape_field_prefix(index);
            let key = |name: &str| format!("{fields}{name}");

            doc.set_bool(&key("enabled"), shape.enabled);
            doc.set_int(&key("sides"), shape.sides);
            doc.set_bool(&key("additive"), shape.additive);
            doc.set_bool(&key("thickOutline"), shape.thick_outline);
            doc.set_bool(&key("textured"), shape.textured);
            doc.set_int(&key("num_inst"), shape.instances);
            doc.set_float(&key("x"), shape.x);
            doc.set_float(&key("y"), shape.y);
            doc.set_float(&key("rad"), shape.radius);
            doc.set_float(&key("ang"), shape.angle);
            doc.set_float(&key("tex_ang"), shape.tex_angle);
            doc.set_float(&key("tex_zoom"), shape.tex_zoom);
            write_color(doc, [&key("r"), &key("g"), &key("b"), &key("a")], shape.color);
            write_color(doc, [&key("r2"), &key("g2"), &key("b2"), &key("a2")], shape.color2);
            write_color(
                doc,
                [
                    &key("border_r"),
                    &key("border_g"),
                    &key("border_b"),
                    &key("border_a"),
                ],
                shape.border_color,
            );

            let code = shape_code_prefix(index);
            doc.set_code(&format!("{code}init"), &shape.init_code);
            doc.set_code(&format!("{code}per_frame"), &shape.per_frame_code);
        }

        // Shaders
        doc.set_code("warp_", &self.warp_shader);
        doc.set_code("comp_", &self.composite_shader);
    }
}
