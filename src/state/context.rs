//! The session context for the paint editor, wiring the message bus, the
//! workspaces and the tools together.
//!
//! The `EditorContext` is the dependency-injection root: nothing in the
//! editing core reaches for process-global state, so every test can build a
//! fresh context.
//!
//! # Message flow
//!
//! Subscribers are registered in a fixed order, which is also their delivery
//! order for messages they share:
//!
//! 1. `ToolBox`: `ToolChanged`, `WidthChanged`, `ColorChanged`
//! 2. `WorkspaceManager`: selection, history, workspace and tool messages
//!
//! Pointer events do not travel over the bus. [`EditorContext::pointer_down`]
//! and friends hand the active workspace's base and effects surfaces to the
//! active tool directly, after posting `SaveStateRequest` for the first
//! pointer-down of a mutating gesture.
//!
//! # Example
//!
//! ```rust,no_run
//! use egui::{pos2, Rect, Vec2};
//! use layered_paint::event::{SelectionCommitRequested, SelectionMoved, SelectionRequested};
//! use layered_paint::state::{EditorConfig, EditorContext};
//!
//! let editor = EditorContext::new(EditorConfig::default())?;
//! editor.new_workspace(800, 600)?;
//!
//! editor.post(SelectionRequested { bounds: Rect::from_min_size(pos2(100.0, 100.0), Vec2::splat(50.0)) });
//! editor.post(SelectionMoved { dx: 20.0, dy: 0.0 });
//! editor.post(SelectionCommitRequested);
//! # Ok::<(), layered_paint::EditorError>(())
//! ```

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use egui::Pos2;

use super::EditorConfig;
use crate::clipboard::{Clipboard, SharedClipboard};
use crate::error::EditorError;
use crate::event::*;
use crate::tools::{PointerPhase, ToolBox};
use crate::workspace::{WorkspaceId, WorkspaceManager};

/// The main context for the paint editor.
#[derive(Debug)]
pub struct EditorContext {
    /// The bus every component talks over
    bus: MessageBus,
    /// Open workspaces; the manager is the single owner of each of them
    workspaces: Rc<RefCell<WorkspaceManager>>,
    /// Active tool and the drawing style shared by all tools
    tools: Rc<RefCell<ToolBox>>,
}

impl EditorContext {
    /// Creates a context backed by a private in-process clipboard
    pub fn new(config: EditorConfig) -> Result<Self, EditorError> {
        Self::with_clipboard(config, Box::new(SharedClipboard::new()))
    }

    pub fn with_clipboard(config: EditorConfig, clipboard: Box<dyn Clipboard>) -> Result<Self, EditorError> {
        let tools = ToolBox::new(Default::default(), config.style).with_dash_length(config.dash_length);
        let tools = Rc::new(RefCell::new(tools));
        let workspaces = Rc::new(RefCell::new(WorkspaceManager::new(config, clipboard)));
        let bus = MessageBus::new();

        bus.register::<ToolChanged, _>(&tools)?;
        bus.register::<WidthChanged, _>(&tools)?;
        bus.register::<ColorChanged, _>(&tools)?;

        bus.register::<SelectionRequested, _>(&workspaces)?;
        bus.register::<SelectionMoved, _>(&workspaces)?;
        bus.register::<SelectionCommitRequested, _>(&workspaces)?;
        bus.register::<CopySelectionRequested, _>(&workspaces)?;
        bus.register::<SelectionPasted, _>(&workspaces)?;
        bus.register::<ToolChanged, _>(&workspaces)?;
        bus.register::<SaveStateRequest, _>(&workspaces)?;
        bus.register::<UndoRequest, _>(&workspaces)?;
        bus.register::<RedoRequest, _>(&workspaces)?;
        bus.register::<NewWorkspaceRequested, _>(&workspaces)?;
        bus.register::<RotateRequested, _>(&workspaces)?;

        Ok(Self { bus, workspaces, tools })
    }

    pub fn bus(&self) -> &MessageBus {
        &self.bus
    }

    /// Post a message; returns once every handler has run
    pub fn post<M: Message>(&self, message: M) {
        self.bus.post(message);
    }

    pub fn workspaces(&self) -> Ref<'_, WorkspaceManager> {
        self.workspaces.borrow()
    }

    /// Mutable access to the workspaces.
    ///
    /// The guard must be dropped before posting: handlers borrow the manager.
    pub fn workspaces_mut(&self) -> RefMut<'_, WorkspaceManager> {
        self.workspaces.borrow_mut()
    }

    pub fn tools(&self) -> Ref<'_, ToolBox> {
        self.tools.borrow()
    }

    pub fn new_workspace(&self, width: u32, height: u32) -> Result<WorkspaceId, EditorError> {
        Ok(self.workspaces.borrow_mut().new_workspace(width, height)?)
    }

    pub fn pointer_down(&self, pos: Pos2) {
        if self.workspaces.borrow().active().is_none() {
            log::debug!("pointer down at {:?} with no active workspace", pos);
            return;
        }
        let needs_snapshot = self.tools.borrow_mut().begin_gesture();
        if needs_snapshot {
            self.bus.post(SaveStateRequest);
        }
        self.dispatch_pointer(PointerPhase::Down, pos);
    }

    pub fn pointer_dragged(&self, pos: Pos2) {
        self.dispatch_pointer(PointerPhase::Dragged, pos);
    }

    pub fn pointer_up(&self, pos: Pos2) {
        self.dispatch_pointer(PointerPhase::Up, pos);
    }

    fn dispatch_pointer(&self, phase: PointerPhase, pos: Pos2) {
        let mut outbox = Outbox::new();
        {
            let mut tools = self.tools.borrow_mut();
            if !tools.gesture_in_progress() {
                return;
            }
            let mut workspaces = self.workspaces.borrow_mut();
            let Some(workspace) = workspaces.active_mut() else {
                tools.cancel_gesture();
                return;
            };

            let mutator = tools.active().is_mutator();
            let (base, effects) = workspace.canvas_mut().surfaces_mut();
            tools.handle_pointer(phase, base, effects, pos, &mut outbox);
            if mutator {
                workspace.mark_dirty();
            }
        }
        // Borrows are released, so handlers can reach the workspaces again
        outbox.flush(&self.bus);
    }
}
