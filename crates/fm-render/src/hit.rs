//! Hit testing: point → element lookup.
//!
//! Walks the definition back-to-front (later in list order = painted on
//! top) to find which element sits under a given canvas position. Bounds
//! come from the shell's rendered rects, reported per element — the model
//! only knows x/y/width, the rendered height depends on the widget.

use fm_core::id::ElementId;
use fm_core::model::FormElement;
use std::collections::HashMap;

/// A rendered element rectangle in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.x + self.width && py >= self.y && py <= self.y + self.height
    }

    pub fn intersects_rect(&self, rx: f32, ry: f32, rw: f32, rh: f32) -> bool {
        self.x <= rx + rw && self.x + self.width >= rx && self.y <= ry + rh
            && self.y + self.height >= ry
    }
}

/// Find the topmost element at position (px, py).
/// Returns `None` if no element is hit (background).
pub fn hit_test(
    definition: &[FormElement],
    bounds: &HashMap<ElementId, Bounds>,
    px: f32,
    py: f32,
) -> Option<ElementId> {
    definition
        .iter()
        .rev()
        .find(|el| bounds.get(&el.id).is_some_and(|b| b.contains(px, py)))
        .map(|el| el.id)
}

/// Find all elements whose rendered bounds intersect the given rectangle,
/// in list order.
pub fn hit_test_rect(
    definition: &[FormElement],
    bounds: &HashMap<ElementId, Bounds>,
    rx: f32,
    ry: f32,
    rw: f32,
    rh: f32,
) -> Vec<ElementId> {
    definition
        .iter()
        .filter(|el| {
            bounds
                .get(&el.id)
                .is_some_and(|b| b.intersects_rect(rx, ry, rw, rh))
        })
        .map(|el| el.id)
        .collect()
}
