//! Bus subscriptions of the workspace manager and the tool box.

use egui::{Pos2, Vec2};

use super::*;
use crate::tools::{ToolBox, ToolKind};
use crate::workspace::WorkspaceManager;

fn no_workspace(message: &dyn std::fmt::Debug) {
    log::debug!("no active workspace for {:?}", message);
}

impl Handler<SelectionRequested> for WorkspaceManager {
    fn handle(&mut self, message: &SelectionRequested, _outbox: &mut Outbox) {
        if self.with_active(|ws, _| ws.select(message.bounds)).is_none() {
            no_workspace(message);
        }
    }
}

impl Handler<SelectionMoved> for WorkspaceManager {
    fn handle(&mut self, message: &SelectionMoved, _outbox: &mut Outbox) {
        let delta = Vec2::new(message.dx, message.dy);
        if self.with_active(|ws, _| ws.move_selection(delta)).is_none() {
            no_workspace(message);
        }
    }
}

impl Handler<SelectionCommitRequested> for WorkspaceManager {
    fn handle(&mut self, message: &SelectionCommitRequested, _outbox: &mut Outbox) {
        if self.with_active(|ws, _| ws.commit_selection()).is_none() {
            no_workspace(message);
        }
    }
}

impl Handler<CopySelectionRequested> for WorkspaceManager {
    fn handle(&mut self, message: &CopySelectionRequested, _outbox: &mut Outbox) {
        match self.with_active(|ws, clipboard| ws.copy_selection(clipboard)) {
            Some(true) => log::debug!("copied selection to the clipboard"),
            Some(false) => log::debug!("copy requested with no active selection"),
            None => no_workspace(message),
        }
    }
}

impl Handler<SelectionPasted> for WorkspaceManager {
    fn handle(&mut self, message: &SelectionPasted, _outbox: &mut Outbox) {
        let at = Pos2::new(message.x, message.y);
        if self.with_active(|ws, clipboard| ws.paste(clipboard, at)).is_none() {
            no_workspace(message);
        }
    }
}

/// Leaving the move tool puts the selection down. Without this a lifted
/// selection would float over every later edit.
impl Handler<ToolChanged> for WorkspaceManager {
    fn handle(&mut self, message: &ToolChanged, outbox: &mut Outbox) {
        let Some(has_selection) = self.with_active(|ws, _| ws.has_selection()) else {
            return;
        };
        if has_selection {
            if message.tool != ToolKind::Move {
                outbox.post(SelectionCommitRequested);
            }
        } else {
            // Leftover preview from a gesture cut short by the switch
            self.with_active(|ws, _| ws.clear_preview());
        }
    }
}

impl Handler<SaveStateRequest> for WorkspaceManager {
    fn handle(&mut self, message: &SaveStateRequest, _outbox: &mut Outbox) {
        if self.with_active(|ws, _| ws.save_state()).is_none() {
            no_workspace(message);
        }
    }
}

impl Handler<UndoRequest> for WorkspaceManager {
    fn handle(&mut self, message: &UndoRequest, _outbox: &mut Outbox) {
        if self.with_active(|ws, _| ws.undo()).is_none() {
            no_workspace(message);
        }
    }
}

impl Handler<RedoRequest> for WorkspaceManager {
    fn handle(&mut self, message: &RedoRequest, _outbox: &mut Outbox) {
        if self.with_active(|ws, _| ws.redo()).is_none() {
            no_workspace(message);
        }
    }
}

impl Handler<NewWorkspaceRequested> for WorkspaceManager {
    fn handle(&mut self, message: &NewWorkspaceRequested, _outbox: &mut Outbox) {
        if let Err(err) = self.new_workspace(message.width, message.height) {
            log::warn!("ignoring {:?}: {}", message, err);
        }
    }
}

impl Handler<RotateRequested> for WorkspaceManager {
    fn handle(&mut self, message: &RotateRequested, _outbox: &mut Outbox) {
        let result = self.with_active(|ws, _| ws.rotate_and_mirror(message.degrees, message.mirror_x, message.mirror_y));
        match result {
            Some(Err(err)) => log::warn!("ignoring {:?}: {}", message, err),
            Some(Ok(())) => {}
            None => no_workspace(message),
        }
    }
}

impl Handler<ToolChanged> for ToolBox {
    fn handle(&mut self, message: &ToolChanged, _outbox: &mut Outbox) {
        self.select(message.tool);
    }
}

impl Handler<WidthChanged> for ToolBox {
    fn handle(&mut self, message: &WidthChanged, _outbox: &mut Outbox) {
        if message.width == 0 {
            log::warn!("ignoring zero stroke width");
            return;
        }
        self.style_mut().width = message.width;
    }
}

impl Handler<ColorChanged> for ToolBox {
    fn handle(&mut self, message: &ColorChanged, _outbox: &mut Outbox) {
        self.style_mut().color = message.color;
    }
}
