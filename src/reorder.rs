//! Drag-and-drop reordering over a filtered view.
//!
//! Drop zones are numbered in the coordinates of the list the user sees, which
//! may hide tasks (e.g. the "Active" tab). Resolution maps that index back onto
//! the canonical order and installs the result in a single replacement.

use crate::models::Task;
use crate::state::AppState;
use crate::view::filtered;

/// Transient gesture state. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragSession {
    dragged_id: Option<String>,
    drag_over_index: Option<usize>,
    /// Survives `leave()`: the final drag-over and the drag-end event do not
    /// always agree on an index, so the end of the gesture reads this one.
    last_drag_over_index: Option<usize>,
}

impl DragSession {
    pub fn begin(&mut self, task_id: &str) {
        self.dragged_id = Some(task_id.to_string());
        self.drag_over_index = None;
        self.last_drag_over_index = None;
    }

    /// Records the zone under the pointer. Ignored when nothing is being dragged.
    pub fn note_candidate_drop_index(&mut self, filtered_index: usize) {
        if self.dragged_id.is_none() {
            return;
        }
        self.drag_over_index = Some(filtered_index);
        self.last_drag_over_index = Some(filtered_index);
    }

    /// Pointer left a zone: drop the highlight, keep the last valid index.
    pub fn leave(&mut self) {
        self.drag_over_index = None;
    }

    pub fn dragged_id(&self) -> Option<&str> {
        self.dragged_id.as_deref()
    }

    pub fn drag_over_index(&self) -> Option<usize> {
        self.drag_over_index
    }

    pub fn last_drag_over_index(&self) -> Option<usize> {
        self.last_drag_over_index
    }

    pub fn is_active(&self) -> bool {
        self.dragged_id.is_some()
    }

    pub fn is_dragging(&self, task_id: &str) -> bool {
        self.dragged_id.as_deref() == Some(task_id)
    }

    pub fn is_drop_highlighted(&self, filtered_index: usize) -> bool {
        self.drag_over_index == Some(filtered_index)
    }

    /// Clears every field and returns what a drop needs, if anything.
    fn finish(&mut self) -> Option<(String, usize)> {
        let session = std::mem::take(self);
        session.dragged_id.zip(session.last_drag_over_index)
    }
}

/// A filtered-view drop index, normalized. Both end sentinels (`len` and
/// `len + 1`) collapse to `End`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropZone {
    Start,
    Before(usize),
    End,
}

impl DropZone {
    pub fn from_filtered_index(index: usize, filtered_len: usize) -> Self {
        if index == 0 {
            DropZone::Start
        } else if index >= filtered_len {
            DropZone::End
        } else {
            DropZone::Before(index)
        }
    }
}

/// Where a drop moves the dragged task in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropPlan {
    /// Current canonical index of the dragged task.
    pub from: usize,
    /// Canonical index it ends up at, counted in the list with the task removed.
    pub to: usize,
}

impl DropPlan {
    pub fn is_move(&self) -> bool {
        self.from != self.to
    }
}

/// Maps a drop of `dragged_id` on `drop_index` of `view` onto `order`.
/// Returns `None` when the dragged task is not in the view or not in `order`.
pub fn plan_drop(
    order: &[Task],
    view: &[&Task],
    dragged_id: &str,
    drop_index: usize,
) -> Option<DropPlan> {
    view.iter().position(|task| task.id == dragged_id)?;
    let from = order.iter().position(|task| task.id == dragged_id)?;

    // Looked up against the original order, before removal.
    let target = match DropZone::from_filtered_index(drop_index, view.len()) {
        DropZone::Start => Some(0),
        DropZone::End => Some(order.len()),
        DropZone::Before(index) => view
            .get(index)
            .and_then(|target| order.iter().position(|task| task.id == target.id)),
    };

    let remaining = order.len() - 1;
    let to = match target {
        // Removal shifted everything after `from` one slot left.
        Some(target) if from < target => target - 1,
        Some(target) => target,
        None => {
            log::debug!("drop target for {dragged_id} not found; appending");
            remaining
        }
    };
    Some(DropPlan {
        from,
        to: to.min(remaining),
    })
}

/// Ends the gesture on `state`: resolves the drop against the view as it looks
/// right now, then resets the session whatever happened. Returns true when the
/// canonical order changed.
pub fn end_drag(state: &mut AppState) -> bool {
    let Some((dragged_id, drop_index)) = state.drag.finish() else {
        log::debug!("drag ended without a drop index");
        return false;
    };

    let plan = {
        let view = filtered(state.tasks(), state.filter);
        plan_drop(state.tasks(), &view, &dragged_id, drop_index)
    };
    let Some(plan) = plan else {
        log::debug!("dragged task {dragged_id} no longer visible; drop ignored");
        return false;
    };
    if !plan.is_move() {
        return false;
    }

    log::debug!("moved task {dragged_id} via drop zone {drop_index}");
    state.store.move_to(&dragged_id, plan.to)
}
