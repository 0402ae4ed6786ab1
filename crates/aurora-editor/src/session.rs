//! Editing sessions tying a preset document to a live renderer.

use std::path::{Path, PathBuf};

use aurora_preset::PresetFile;

use crate::error::EditorError;
use crate::model::EditorPreset;
use crate::settings::EditorSettings;

/// The visualizer engine that displays the edited preset.
///
/// Implemented by the host application. A mutable reference to a renderer
/// is itself a renderer, so a session can borrow the engine instead of
/// owning it.
pub trait PresetRenderer {
    /// Loads preset text for immediate display.
    ///
    /// # Errors
    ///
    /// Returns the engine's message if the preset could not be loaded, for
    /// example because an equation failed to compile.
    fn load_preset_data(&mut self, data: &str) -> Result<(), String>;

    /// Stops or resumes automatic preset switching while editing.
    fn set_preset_locked(&mut self, _locked: bool) {}
}

impl<R: PresetRenderer + ?Sized> PresetRenderer for &mut R {
    fn load_preset_data(&mut self, data: &str) -> Result<(), String> {
        (**self).load_preset_data(data)
    }

    fn set_preset_locked(&mut self, locked: bool) {
        (**self).set_preset_locked(locked);
    }
}

/// A preset opened for editing.
///
/// Owns the parsed document, the editable model built from it and the
/// renderer that previews the edits. The document keeps keys the model does
/// not know about, so they survive a save.
///
/// # Example
///
/// ```rust
/// use aurora_editor::{EditorSession, PresetRenderer};
///
/// struct Headless;
///
/// impl PresetRenderer for Headless {
///     fn load_preset_data(&mut self, _data: &str) -> Result<(), String> {
///         Ok(())
///     }
/// }
///
/// let mut session = EditorSession::open(Headless, None)?;
/// session.model_mut().zoom = 1.02;
/// session.preview()?;
/// assert!(session.export_string().contains("\nzoom=1.02000\n"));
/// # Ok::<(), aurora_editor::EditorError>(())
/// ```
#[derive(Debug)]
pub struct EditorSession<R: PresetRenderer> {
    renderer: R,
    document: PresetFile,
    model: EditorPreset,
    path: Option<PathBuf>,
    saved_export: String,
}

impl<R: PresetRenderer> EditorSession<R> {
    /// Opens a preset for editing and shows it in the renderer.
    ///
    /// With no path, the stock empty preset is edited.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Load`] if the file cannot be read and
    /// [`EditorError::Renderer`] if the renderer rejects it.
    pub fn open(renderer: R, path: Option<&Path>) -> Result<Self, EditorError> {
        Self::open_preset(renderer, path, true)
    }

    /// Opens a preset for editing, showing it only if
    /// [`EditorSettings::preview_on_open`] is set.
    ///
    /// Without the preview the renderer is locked but keeps its current
    /// preset until the first [`preview`](Self::preview).
    ///
    /// # Errors
    ///
    /// Same as [`open`](Self::open).
    pub fn open_with_settings(
        renderer: R,
        path: Option<&Path>,
        settings: &EditorSettings,
    ) -> Result<Self, EditorError> {
        Self::open_preset(renderer, path, settings.preview_on_open)
    }

    fn open_preset(
        mut renderer: R,
        path: Option<&Path>,
        preview: bool,
    ) -> Result<Self, EditorError> {
        let document = match path {
            None => PresetFile::empty_preset(),
            Some(path) => {
                let mut document = PresetFile::new();
                document
                    .read_file(path)
                    .map_err(|e| EditorError::load(path, e))?;
                document
            }
        };

        renderer.set_preset_locked(true);

        if preview {
            let export = document.as_string();
            if let Err(message) = renderer.load_preset_data(&export) {
                tracing::warn!(error = %message, "renderer rejected preset");
                renderer.set_preset_locked(false);
                return Err(EditorError::Renderer(message));
            }
        }

        let model = EditorPreset::from_document(&document);
        tracing::info!(
            path = %path.map_or_else(|| "<new>".into(), |p| p.display().to_string()),
            entries = document.values().len(),
            preview,
            "opened preset for editing"
        );

        let mut session = Self {
            renderer,
            document,
            model,
            path: path.map(Path::to_path_buf),
            saved_export: String::new(),
        };
        // Values the model normalizes on load do not count as edits.
        session.saved_export = session.synced_export();
        Ok(session)
    }

    /// The editable values.
    pub fn model(&self) -> &EditorPreset {
        &self.model
    }

    /// Mutable access to the editable values.
    pub fn model_mut(&mut self) -> &mut EditorPreset {
        &mut self.model
    }

    /// The document as of the last sync with the model.
    pub fn document(&self) -> &PresetFile {
        &self.document
    }

    /// The renderer previewing this session.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Path the preset was loaded from or last saved to.
    pub fn loaded_path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn sync(&mut self) -> String {
        for warning in self.model.shader_loss_warnings() {
            tracing::warn!(?warning, "{}", warning.message());
        }
        self.model.to_document(&mut self.document);
        self.document.as_string()
    }

    /// Applies the model to the document and reloads it in the renderer.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Renderer`] if the renderer rejects the preset.
    /// The document keeps the edits either way.
    pub fn preview(&mut self) -> Result<(), EditorError> {
        let export = self.sync();
        match self.renderer.load_preset_data(&export) {
            Ok(()) => {
                tracing::info!("preset preview updated");
                Ok(())
            }
            Err(message) => {
                tracing::warn!(error = %message, "preset reload failed");
                Err(EditorError::Renderer(message))
            }
        }
    }

    /// The preset text with all edits applied, as copied to the clipboard.
    pub fn export_string(&mut self) -> String {
        self.sync()
    }

    fn synced_export(&self) -> String {
        let mut document = self.document.clone();
        self.model.to_document(&mut document);
        document.as_string()
    }

    /// Whether the current edits differ from the last loaded or saved text.
    pub fn is_modified(&self) -> bool {
        self.synced_export() != self.saved_export
    }

    /// Saves to the path the preset was loaded from or last saved to.
    ///
    /// Returns `Ok(false)` without writing if the session has no path yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&mut self) -> Result<bool, EditorError> {
        let Some(path) = self.path.clone() else {
            return Ok(false);
        };
        self.save_as(&path)?;
        Ok(true)
    }

    /// Saves to `path`, which becomes the session's path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_as(&mut self, path: &Path) -> Result<(), EditorError> {
        let export = self.sync();
        self.document.write_file(path)?;

        tracing::info!(path = %path.display(), "saved preset");
        self.path = Some(path.to_path_buf());
        self.saved_export = export;
        Ok(())
    }

    /// Ends the session and hands back the renderer.
    pub fn close(mut self) -> R {
        if self.is_modified() {
            tracing::info!("closing preset with unsaved changes");
        }
        self.renderer.set_preset_locked(false);
        self.renderer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct RecordingRenderer {
        loaded: Vec<String>,
        locked: bool,
        reject: Option<String>,
    }

    impl PresetRenderer for RecordingRenderer {
        fn load_preset_data(&mut self, data: &str) -> Result<(), String> {
            if let Some(message) = &self.reject {
                return Err(message.clone());
            }
            self.loaded.push(data.to_string());
            Ok(())
        }

        fn set_preset_locked(&mut self, locked: bool) {
            self.locked = locked;
        }
    }

    #[test]
    fn test_open_empty_preset() {
        let session = EditorSession::open(RecordingRenderer::default(), None).unwrap();

        assert_eq!(session.model(), &EditorPreset::default());
        assert!(session.loaded_path().is_none());
        assert_eq!(session.renderer().loaded.len(), 1);
        assert!(session.renderer().locked);
        assert!(!session.is_modified());
    }

    #[test]
    fn test_open_without_preview_leaves_renderer_alone() {
        let settings = EditorSettings {
            preview_on_open: false,
            ..Default::default()
        };
        let mut session =
            EditorSession::open_with_settings(RecordingRenderer::default(), None, &settings)
                .unwrap();

        assert!(session.renderer().loaded.is_empty());
        assert!(session.renderer().locked);
        assert!(!session.is_modified());

        session.preview().unwrap();
        assert_eq!(session.renderer().loaded.len(), 1);
    }

    #[test]
    fn test_open_without_preview_ignores_rejecting_renderer() {
        let renderer = RecordingRenderer {
            reject: Some("bad preset".into()),
            ..Default::default()
        };
        let settings = EditorSettings {
            preview_on_open: false,
            ..Default::default()
        };

        let mut session = EditorSession::open_with_settings(renderer, None, &settings).unwrap();
        assert!(matches!(session.preview(), Err(EditorError::Renderer(_))));
    }

    #[test]
    fn test_open_with_default_settings_previews() {
        let session = EditorSession::open_with_settings(
            RecordingRenderer::default(),
            None,
            &EditorSettings::default(),
        )
        .unwrap();
        assert_eq!(session.renderer().loaded.len(), 1);
    }

    #[test]
    fn test_renderer_rejection_unlocks() {
        let mut renderer = RecordingRenderer {
            reject: Some("bad preset".into()),
            ..Default::default()
        };

        {
            let result = EditorSession::open(&mut renderer, None);
            assert!(matches!(result, Err(EditorError::Renderer(ref m)) if m == "bad preset"));
        }
        assert!(!renderer.locked);
        assert!(renderer.loaded.is_empty());
    }

    #[test]
    fn test_preview_sends_edits() {
        let mut session = EditorSession::open(RecordingRenderer::default(), None).unwrap();
        session.model_mut().decay = 0.5;
        session.preview().unwrap();

        let last = session.renderer().loaded.last().unwrap();
        assert!(last.contains("\nfDecay=0.500\n"));
    }

    #[test]
    fn test_modified_tracking() {
        let mut session = EditorSession::open(RecordingRenderer::default(), None).unwrap();
        assert!(!session.is_modified());

        session.model_mut().rot = 0.1;
        assert!(session.is_modified());

        session.model_mut().rot = 0.0;
        assert!(!session.is_modified());
    }

    #[test]
    fn test_save_without_path() {
        let mut session = EditorSession::open(RecordingRenderer::default(), None).unwrap();
        assert!(!session.save().unwrap());
    }

    #[test]
    fn test_close_releases_lock() {
        let session = EditorSession::open(RecordingRenderer::default(), None).unwrap();
        let renderer = session.close();
        assert!(!renderer.locked);
    }
}
