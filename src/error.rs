use thiserror::Error;

use crate::canvas::CanvasError;
use crate::event::BusError;
use crate::file_handler::FileError;
use crate::state::PersistenceError;
use crate::workspace::WorkspaceId;

/// Top-level error for editor operations
#[derive(Debug, Error)]
pub enum EditorError {
    #[error(transparent)]
    Bus(#[from] BusError),

    #[error(transparent)]
    Canvas(#[from] CanvasError),

    #[error(transparent)]
    File(#[from] FileError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error("no workspace is active")]
    NoActiveWorkspace,

    #[error("no workspace with id {0}")]
    WorkspaceNotFound(WorkspaceId),

    #[error("workspace has never been saved and has no file path")]
    NoFilePath,
}
