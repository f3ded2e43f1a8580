use image::RgbaImage;

/// Snapshot-based undo/redo for one workspace's base layer
#[derive(Debug, Clone, Default)]
pub struct UndoRedoEngine {
    /// Snapshots that can be restored by undo, most recent last
    undo_stack: Vec<RgbaImage>,
    /// Snapshots that can be restored by redo, most recent last
    redo_stack: Vec<RgbaImage>,
    /// Maximum undo depth; the oldest snapshot is dropped beyond it
    limit: Option<usize>,
}

impl UndoRedoEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    /// Record `base` as the state to return to. Invalidates any redo history.
    pub fn save_state(&mut self, base: &RgbaImage) {
        self.undo_stack.push(base.clone());
        self.redo_stack.clear();

        if let Some(limit) = self.limit {
            if self.undo_stack.len() > limit {
                let excess = self.undo_stack.len() - limit;
                self.undo_stack.drain(..excess);
            }
        }
        log::trace!("saved state, undo depth {}", self.undo_stack.len());
    }

    /// Restore the most recent snapshot into `base`, keeping the current
    /// pixels for redo. Returns false when there is nothing to undo.
    pub fn undo(&mut self, base: &mut RgbaImage) -> bool {
        Self::step(&mut self.undo_stack, &mut self.redo_stack, base, "undo")
    }

    /// Mirror of [`Self::undo`]
    pub fn redo(&mut self, base: &mut RgbaImage) -> bool {
        Self::step(&mut self.redo_stack, &mut self.undo_stack, base, "redo")
    }

    fn step(source: &mut Vec<RgbaImage>, target: &mut Vec<RgbaImage>, base: &mut RgbaImage, label: &str) -> bool {
        let Some(snapshot) = source.last() else {
            log::debug!("{label} requested with an empty stack");
            return false;
        };
        if snapshot.dimensions() != base.dimensions() {
            log::warn!(
                "{label} snapshot is {:?} but the base layer is {:?}; discarding history",
                snapshot.dimensions(),
                base.dimensions()
            );
            source.clear();
            target.clear();
            return false;
        }

        if let Some(snapshot) = source.pop() {
            target.push(std::mem::replace(base, snapshot));
        }
        true
    }

    /// Returns true if there are snapshots that can be undone
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Returns true if there are snapshots that can be redone
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Clear the history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
