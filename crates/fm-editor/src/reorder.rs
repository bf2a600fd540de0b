//! List-layout reorder with midpoint hysteresis.
//!
//! Definitions laid out as a sequential list (instead of free x/y
//! placement) reorder by dragging a row over its neighbours. Swapping the
//! moment the pointer enters the hovered row would oscillate when the rows
//! are adjacent: the swap moves the hovered row under the pointer, which
//! immediately re-triggers the opposite swap. The fix is the classic
//! hysteresis rule — only reorder once the pointer crosses the hovered
//! row's vertical midpoint in the direction of travel.

use crate::store::FormStore;

/// Tracks one row-drag gesture across hover events.
#[derive(Debug, Clone, Copy)]
pub struct ListReorder {
    drag_index: usize,
}

impl ListReorder {
    /// Start dragging the row at `index`.
    pub fn begin(index: usize) -> Self {
        Self { drag_index: index }
    }

    /// The dragged row's current index (updated as moves trigger).
    pub fn index(&self) -> usize {
        self.drag_index
    }

    /// Pointer is over the row at `hover_index`, whose rendered rect spans
    /// `hover_top .. hover_top + hover_height` (canvas coordinates).
    /// Applies `move_element` once the midpoint rule fires and returns
    /// whether a move happened.
    pub fn hover(
        &mut self,
        hover_index: usize,
        pointer_y: f32,
        hover_top: f32,
        hover_height: f32,
        store: &mut FormStore,
    ) -> bool {
        let drag_index = self.drag_index;
        if drag_index == hover_index {
            return false;
        }

        let hover_middle_y = hover_height / 2.0;
        let hover_client_y = pointer_y - hover_top;

        // Dragging downwards: wait until past the midpoint.
        if drag_index < hover_index && hover_client_y < hover_middle_y {
            return false;
        }
        // Dragging upwards: wait until before the midpoint.
        if drag_index > hover_index && hover_client_y > hover_middle_y {
            return false;
        }

        store.move_element(drag_index, hover_index);
        // The dragged row now lives at the hover index; track it so the
        // same crossing doesn't re-trigger.
        self.drag_index = hover_index;
        true
    }
}
