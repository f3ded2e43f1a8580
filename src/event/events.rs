use egui::{Color32, Rect};

use super::Message;
use crate::tools::ToolKind;

/// Lift the pixels inside `bounds` off the base layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionRequested {
    pub bounds: Rect,
}

/// Drag the active selection by a delta, in surface coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionMoved {
    pub dx: f32,
    pub dy: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionCommitRequested;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CopySelectionRequested;

/// Place the clipboard image with its top-left corner at (x, y)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionPasted {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolChanged {
    pub tool: ToolKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SaveStateRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UndoRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RedoRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidthChanged {
    pub width: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorChanged {
    pub color: Color32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewWorkspaceRequested {
    pub width: u32,
    pub height: u32,
}

/// Rotate (clockwise) then mirror every layer of the active workspace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotateRequested {
    pub degrees: u32,
    pub mirror_x: bool,
    pub mirror_y: bool,
}

impl Message for SelectionRequested {}
impl Message for SelectionMoved {}
impl Message for SelectionCommitRequested {}
impl Message for CopySelectionRequested {}
impl Message for SelectionPasted {}
impl Message for ToolChanged {}
impl Message for SaveStateRequest {}
impl Message for UndoRequest {}
impl Message for RedoRequest {}
impl Message for WidthChanged {}
impl Message for ColorChanged {}
impl Message for NewWorkspaceRequested {}
impl Message for RotateRequested {}
