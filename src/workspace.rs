use std::fmt;
use std::path::{Path, PathBuf};

use egui::{Pos2, Rect, Vec2};
use image::RgbaImage;
use uuid::Uuid;

use crate::canvas::{Canvas, CanvasError};
use crate::clipboard::Clipboard;
use crate::error::EditorError;
use crate::file_handler::{self, FileError};
use crate::history::UndoRedoEngine;
use crate::layer::{Layer, LayerId};
use crate::raster;
use crate::selection::{SelectionEngine, SelectionState};
use crate::state::EditorConfig;

/// A unique identifier for a workspace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WorkspaceId(Uuid);

impl WorkspaceId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for WorkspaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One open image: its layers, its selection and its history
#[derive(Debug)]
pub struct Workspace {
    id: WorkspaceId,
    canvas: Canvas,
    selection: SelectionEngine,
    history: UndoRedoEngine,
    dirty: bool,
    file: Option<PathBuf>,
}

impl Workspace {
    fn new(canvas: Canvas, file: Option<PathBuf>, config: &EditorConfig) -> Self {
        Self {
            id: WorkspaceId::new(),
            canvas,
            selection: SelectionEngine::new(config.dash_length),
            history: UndoRedoEngine::with_limit(config.history_limit),
            dirty: false,
            file,
        }
    }

    pub fn id(&self) -> WorkspaceId {
        self.id
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Direct canvas access for tools and collaborators.
    /// Edits made here are not tracked by the dirty flag.
    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    pub fn base(&self) -> &RgbaImage {
        self.canvas.base()
    }

    pub fn effects(&self) -> &RgbaImage {
        self.canvas.effects()
    }

    pub fn selection(&self) -> Option<&SelectionState> {
        self.selection.state()
    }

    pub fn history(&self) -> &UndoRedoEngine {
        &self.history
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    /// Display title: the file name, or "Untitled"
    pub fn title(&self) -> String {
        self.file
            .as_deref()
            .and_then(Path::file_name)
            .map_or_else(|| "Untitled".to_string(), |name| name.to_string_lossy().into_owned())
    }

    /// Push a snapshot of the base layer onto the undo stack
    pub fn save_state(&mut self) {
        self.history.save_state(self.canvas.base());
    }

    pub fn undo(&mut self) -> bool {
        self.commit_selection();
        let restored = self.history.undo(self.canvas.base_mut());
        self.dirty |= restored;
        restored
    }

    pub fn redo(&mut self) -> bool {
        self.commit_selection();
        let restored = self.history.redo(self.canvas.base_mut());
        self.dirty |= restored;
        restored
    }

    /// Lift `bounds` off the base layer as a CUT selection.
    /// Zero-extent or off-canvas bounds are ignored.
    pub fn select(&mut self, bounds: Rect) -> bool {
        let Some(region) = SelectionEngine::resolve_bounds(bounds, &self.canvas) else {
            log::warn!("ignoring selection with empty bounds {:?}", bounds);
            return false;
        };
        self.commit_selection();
        self.selection.lift(&mut self.canvas, region);
        self.dirty = true;
        true
    }

    /// Place the clipboard image at `at` as a COPY selection
    pub fn paste(&mut self, clipboard: &dyn Clipboard, at: Pos2) -> bool {
        let Some(image) = clipboard.image() else {
            log::debug!("paste requested with an empty clipboard");
            return false;
        };
        if image.width() == 0 || image.height() == 0 {
            log::debug!("ignoring paste of an empty clipboard image");
            return false;
        }
        self.commit_selection();
        self.selection.paste(&mut self.canvas, image, at)
    }

    pub fn move_selection(&mut self, delta: Vec2) -> bool {
        self.selection.move_by(&mut self.canvas, delta)
    }

    pub fn commit_selection(&mut self) -> bool {
        let committed = self.selection.commit(&mut self.canvas);
        self.dirty |= committed;
        committed
    }

    pub fn copy_selection(&self, clipboard: &mut dyn Clipboard) -> bool {
        self.selection.copy_to(clipboard)
    }

    pub fn has_selection(&self) -> bool {
        self.selection.is_active()
    }

    /// Wipe the effects layer unless a selection preview owns it
    pub fn clear_preview(&mut self) {
        if !self.selection.is_active() {
            raster::clear(self.canvas.effects_mut());
        }
    }

    /// Rotate then mirror every layer.
    ///
    /// Any active selection is committed first. History snapshots no longer
    /// match the new geometry, so the history is cleared.
    pub fn rotate_and_mirror(&mut self, degrees: u32, mirror_x: bool, mirror_y: bool) -> Result<(), CanvasError> {
        if !matches!(degrees, 0 | 90 | 180 | 270) {
            return Err(CanvasError::UnsupportedAngle(degrees));
        }
        self.commit_selection();
        self.canvas.rotate_and_mirror(degrees, mirror_x, mirror_y)?;
        self.history.clear();
        self.dirty = true;
        Ok(())
    }

    pub fn add_user_layer(&mut self, name: &str) -> LayerId {
        self.canvas.add_user_layer(name)
    }

    pub fn remove_user_layer(&mut self, id: LayerId) -> Result<Layer, CanvasError> {
        self.canvas.remove_user_layer(id)
    }

    /// Write the base layer to `path`. The dirty flag is cleared, and the
    /// path remembered, only once the write succeeded.
    pub fn save_to(&mut self, path: &Path) -> Result<(), FileError> {
        file_handler::save_image(self.canvas.base(), path)?;
        self.file = Some(path.to_path_buf());
        self.dirty = false;
        Ok(())
    }

    /// Write the base layer back to the file it came from
    pub fn save(&mut self) -> Result<(), EditorError> {
        let path = self.file.clone().ok_or(EditorError::NoFilePath)?;
        self.save_to(&path)?;
        Ok(())
    }
}

/// Owns every open workspace and tracks which one is active
pub struct WorkspaceManager {
    workspaces: Vec<Workspace>,
    active: Option<WorkspaceId>,
    config: EditorConfig,
    clipboard: Box<dyn Clipboard>,
}

impl fmt::Debug for WorkspaceManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkspaceManager")
            .field("workspaces", &self.workspaces)
            .field("active", &self.active)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl WorkspaceManager {
    pub fn new(config: EditorConfig, clipboard: Box<dyn Clipboard>) -> Self {
        Self {
            workspaces: Vec::new(),
            active: None,
            config,
            clipboard,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.workspaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workspaces.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Workspace> {
        self.workspaces.iter()
    }

    pub fn get(&self, id: WorkspaceId) -> Option<&Workspace> {
        self.workspaces.iter().find(|w| w.id == id)
    }

    pub fn get_mut(&mut self, id: WorkspaceId) -> Option<&mut Workspace> {
        self.workspaces.iter_mut().find(|w| w.id == id)
    }

    pub fn active_id(&self) -> Option<WorkspaceId> {
        self.active
    }

    pub fn active(&self) -> Option<&Workspace> {
        self.active.and_then(|id| self.get(id))
    }

    pub fn active_mut(&mut self) -> Option<&mut Workspace> {
        let id = self.active?;
        self.get_mut(id)
    }

    /// Make `id` the workspace that receives editing messages
    pub fn activate(&mut self, id: WorkspaceId) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        self.active = Some(id);
        true
    }

    fn insert(&mut self, workspace: Workspace) -> WorkspaceId {
        let id = workspace.id;
        log::info!(
            "Opened workspace {} ({}x{}) as {}",
            workspace.title(),
            workspace.canvas.width(),
            workspace.canvas.height(),
            id
        );
        self.workspaces.push(workspace);
        self.active = Some(id);
        id
    }

    /// Create a blank workspace and make it active
    pub fn new_workspace(&mut self, width: u32, height: u32) -> Result<WorkspaceId, CanvasError> {
        let canvas = Canvas::new(width, height, self.config.background)?;
        let workspace = Workspace::new(canvas, None, &self.config);
        Ok(self.insert(workspace))
    }

    /// Blank workspace at the configured default size
    pub fn new_default_workspace(&mut self) -> Result<WorkspaceId, CanvasError> {
        self.new_workspace(self.config.canvas_width, self.config.canvas_height)
    }

    /// Install a decoded image as the base layer of a fresh workspace
    pub fn open_image(&mut self, image: RgbaImage, path: Option<PathBuf>) -> Result<WorkspaceId, CanvasError> {
        let canvas = Canvas::from_image(image, self.config.background)?;
        let workspace = Workspace::new(canvas, path, &self.config);
        Ok(self.insert(workspace))
    }

    pub fn open_file(&mut self, path: &Path) -> Result<WorkspaceId, EditorError> {
        let image = file_handler::load_image(path)?;
        Ok(self.open_image(image, Some(path.to_path_buf()))?)
    }

    pub fn save_active(&mut self, path: &Path) -> Result<(), EditorError> {
        let workspace = self.active_mut().ok_or(EditorError::NoActiveWorkspace)?;
        workspace.save_to(path)?;
        Ok(())
    }

    pub fn save(&mut self, id: WorkspaceId, path: &Path) -> Result<(), EditorError> {
        let workspace = self.get_mut(id).ok_or(EditorError::WorkspaceNotFound(id))?;
        workspace.save_to(path)?;
        Ok(())
    }

    /// Close `id`. A dirty workspace is only closed if `confirm` agrees.
    /// Returns whether the workspace was closed.
    pub fn close(&mut self, id: WorkspaceId, confirm: impl FnOnce(&Workspace) -> bool) -> bool {
        let Some(index) = self.workspaces.iter().position(|w| w.id == id) else {
            return false;
        };
        if self.workspaces[index].dirty && !confirm(&self.workspaces[index]) {
            log::info!("Kept dirty workspace {} open", self.workspaces[index].title());
            return false;
        }

        let closed = self.workspaces.remove(index);
        log::info!("Closed workspace {}", closed.title());
        if self.active == Some(id) {
            self.active = self.workspaces.last().map(|w| w.id);
        }
        true
    }

    /// Run `f` on the active workspace together with the clipboard
    pub(crate) fn with_active<R>(&mut self, f: impl FnOnce(&mut Workspace, &mut dyn Clipboard) -> R) -> Option<R> {
        let id = self.active?;
        let workspace = self.workspaces.iter_mut().find(|w| w.id == id)?;
        Some(f(workspace, self.clipboard.as_mut()))
    }
}
