#![warn(clippy::all, rust_2018_idioms)]

pub mod canvas;
pub mod clipboard;
pub mod error;
pub mod event;
pub mod file_handler;
pub mod geometry;
pub mod history;
pub mod layer;
pub mod raster;
pub mod selection;
pub mod state;
pub mod style;
pub mod tools;
pub mod workspace;

pub use canvas::{Canvas, CanvasError};
pub use clipboard::{Clipboard, SharedClipboard};
pub use error::EditorError;
pub use event::{Handler, Message, MessageBus, Outbox};
pub use history::UndoRedoEngine;
pub use layer::{Layer, LayerId, LayerKind};
pub use selection::{SelectionEngine, SelectionMode, SelectionState};
pub use state::{EditorConfig, EditorContext};
pub use style::DrawingStyle;
pub use tools::{Tool, ToolBox, ToolKind};
pub use workspace::{Workspace, WorkspaceId, WorkspaceManager};
