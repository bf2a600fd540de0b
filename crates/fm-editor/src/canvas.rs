//! Canvas interaction engine: raw pointer events → store operations.
//!
//! All coordinate math lives here. Pointer positions arrive in viewport
//! coordinates; the engine translates them through the canvas rectangle
//! and scroll offsets, applies grid snapping, and calls the store.
//!
//! A drag gesture is an explicit little state machine:
//!
//! ```text
//! Idle → Dragging(source) → { dropped on canvas | dropped elsewhere | cancelled }
//! ```
//!
//! driven by `begin_drag` / `drop` / `cancel_drag` rather than real pointer
//! events, so gestures are testable without an event loop. Intermediate
//! pointer moves may ask for a `drag_preview` position (visual feedback)
//! but never touch the store — the final committed state reflects only the
//! terminal drop. Resize is deliberately different: it commits on every
//! `resize_to` so the element gives live feedback while the handle moves.
//! That asymmetry mirrors how the two gestures feel in use and is kept on
//! purpose; the end state after release is correct either way.

use crate::store::{ElementEdit, FormStore, Placement};
use fm_core::css::{CssLength, DEFAULT_ELEMENT_WIDTH_PX};
use fm_core::id::ElementId;
use fm_core::model::ElementType;
use fm_render::hit::{Bounds, hit_test};
use std::collections::HashMap;

/// Narrowest an element can be resized to, in pixels.
pub const MIN_WIDTH_PX: f32 = 100.0;

/// Default snapping grid pitch, in pixels.
pub const DEFAULT_GRID_SIZE: f32 = 20.0;

/// The canvas surface's placement in the viewport: bounding-rect top-left
/// plus current scroll offsets.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CanvasViewport {
    pub left: f32,
    pub top: f32,
    pub scroll_x: f32,
    pub scroll_y: f32,
}

impl CanvasViewport {
    pub fn new(left: f32, top: f32) -> Self {
        Self {
            left,
            top,
            scroll_x: 0.0,
            scroll_y: 0.0,
        }
    }

    pub fn scrolled(mut self, scroll_x: f32, scroll_y: f32) -> Self {
        self.scroll_x = scroll_x;
        self.scroll_y = scroll_y;
        self
    }

    /// Viewport coordinates → canvas-local coordinates.
    pub fn to_canvas(&self, viewport_x: f32, viewport_y: f32) -> (f32, f32) {
        (
            viewport_x - self.left + self.scroll_x,
            viewport_y - self.top + self.scroll_y,
        )
    }
}

/// Grid-snap settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    pub enabled: bool,
    pub size: f32,
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            enabled: true,
            size: DEFAULT_GRID_SIZE,
        }
    }
}

impl Grid {
    pub fn off() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Round to the nearest grid line when snapping is on.
    pub fn snap(&self, v: f32) -> f32 {
        if self.enabled && self.size > 0.0 {
            (v / self.size).round() * self.size
        } else {
            v
        }
    }
}

/// What a drag gesture is carrying.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragSource {
    /// A new element of this type, dragged off the palette.
    Palette(ElementType),
    /// An existing element being repositioned. Its position is captured
    /// here at drag-begin — never re-read from the store at drop time, so
    /// in-flight reads cannot compound into a stale final position.
    Existing {
        id: ElementId,
        origin_x: f32,
        origin_y: f32,
    },
}

#[derive(Debug, Clone, Copy)]
struct DragState {
    source: DragSource,
    /// Pointer position at drag-begin, viewport coordinates.
    start_x: f32,
    start_y: f32,
}

#[derive(Debug, Clone, Copy)]
struct ResizeState {
    id: ElementId,
    /// Pointer x at handle-press, viewport coordinates.
    start_pointer_x: f32,
    /// Rendered width at handle-press, pixels.
    start_width: f32,
}

/// Translates drags, clicks, and resizes into store calls.
pub struct CanvasEngine {
    pub viewport: CanvasViewport,
    pub grid: Grid,
    bounds: HashMap<ElementId, Bounds>,
    drag: Option<DragState>,
    resize: Option<ResizeState>,
}

impl CanvasEngine {
    pub fn new(viewport: CanvasViewport) -> Self {
        Self {
            viewport,
            grid: Grid::default(),
            bounds: HashMap::new(),
            drag: None,
            resize: None,
        }
    }

    // ─── Rendered bounds ────────────────────────────────────────────────

    /// Record an element's rendered rect, canvas coordinates. The shell
    /// reports these after layout; clicks resolve against them.
    pub fn report_bounds(&mut self, id: ElementId, bounds: Bounds) {
        self.bounds.insert(id, bounds);
    }

    pub fn forget_bounds(&mut self, id: ElementId) {
        self.bounds.remove(&id);
    }

    // ─── Drag gesture ───────────────────────────────────────────────────

    /// Enter the dragging state. A gesture already in flight is replaced —
    /// the platform only ever delivers one drag at a time.
    pub fn begin_drag(&mut self, source: DragSource, pointer_x: f32, pointer_y: f32) {
        self.drag = Some(DragState {
            source,
            start_x: pointer_x,
            start_y: pointer_y,
        });
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Where the dragged thing would land if dropped at this pointer
    /// position. Visual feedback only — nothing is committed.
    pub fn drag_preview(&self, pointer_x: f32, pointer_y: f32) -> Option<(f32, f32)> {
        let drag = self.drag.as_ref()?;
        Some(self.landing_position(drag, pointer_x, pointer_y))
    }

    /// Terminal event: commit the gesture at this pointer position.
    ///
    /// A palette source materializes a new element at the drop position and
    /// selects it; an existing source commits its one position update. The
    /// element may have been deleted mid-drag — then nothing happens and
    /// `None` comes back.
    pub fn drop(&mut self, pointer_x: f32, pointer_y: f32, store: &mut FormStore) -> Option<ElementId> {
        let drag = self.drag.take()?;
        let (x, y) = self.landing_position(&drag, pointer_x, pointer_y);

        match drag.source {
            DragSource::Palette(ty) => {
                let element = store.add_element(ty, Placement::Position { x, y });
                log::debug!("palette drop: {} at ({x}, {y})", element.id);
                Some(element.id)
            }
            DragSource::Existing { id, .. } => {
                store.get(id)?;
                store.update_element(id, ElementEdit::Position { x, y });
                log::debug!("moved {id} to ({x}, {y})");
                Some(id)
            }
        }
    }

    /// The gesture ended without a canvas drop (dropped elsewhere, or the
    /// platform cancelled it). Equivalent to never having started: the
    /// store is untouched.
    pub fn cancel_drag(&mut self) {
        self.drag = None;
    }

    fn landing_position(&self, drag: &DragState, pointer_x: f32, pointer_y: f32) -> (f32, f32) {
        let raw = match drag.source {
            // New element: the pointer's canvas-local position.
            DragSource::Palette(_) => self.viewport.to_canvas(pointer_x, pointer_y),
            // Existing element: origin plus the pointer delta. Both pointer
            // samples share the same frame, so the delta is scroll-invariant.
            DragSource::Existing {
                origin_x, origin_y, ..
            } => (
                origin_x + (pointer_x - drag.start_x),
                origin_y + (pointer_y - drag.start_y),
            ),
        };
        self.place(raw)
    }

    /// Snap, then clamp: no negative placement.
    fn place(&self, (x, y): (f32, f32)) -> (f32, f32) {
        (self.grid.snap(x).max(0.0), self.grid.snap(y).max(0.0))
    }

    // ─── Click selection ────────────────────────────────────────────────

    /// A plain click at this viewport position: select the topmost element
    /// under it, or clear the selection on background.
    pub fn click(&mut self, pointer_x: f32, pointer_y: f32, store: &mut FormStore) {
        let (x, y) = self.viewport.to_canvas(pointer_x, pointer_y);
        let hit = hit_test(store.definition(), &self.bounds, x, y);
        store.set_selection(hit);
    }

    // ─── Resize gesture ─────────────────────────────────────────────────

    /// Handle-press on the selected element's bottom-right corner. Captures
    /// the current rendered width and pointer x; a no-op when nothing is
    /// selected (the handle only exists on a selected element).
    pub fn begin_resize(&mut self, store: &FormStore, pointer_x: f32) {
        let Some(element) = store.selection() else {
            return;
        };
        let start_width = CssLength::parse(element.width_or_default())
            .and_then(|l| l.as_px())
            .unwrap_or(DEFAULT_ELEMENT_WIDTH_PX);
        self.resize = Some(ResizeState {
            id: element.id,
            start_pointer_x: pointer_x,
            start_width,
        });
    }

    pub fn is_resizing(&self) -> bool {
        self.resize.is_some()
    }

    /// Pointer move while resizing: commit the new width immediately.
    /// Width = captured width + pointer delta, snapped, floored at
    /// [`MIN_WIDTH_PX`].
    pub fn resize_to(&mut self, pointer_x: f32, store: &mut FormStore) {
        let Some(resize) = self.resize else {
            return;
        };
        let requested = resize.start_width + (pointer_x - resize.start_pointer_x);
        let width = self.grid.snap(requested).max(MIN_WIDTH_PX);
        store.update_element(resize.id, ElementEdit::Width(CssLength::px(width).to_string()));
    }

    /// Pointer release: the gesture is over. The last committed width
    /// stands.
    pub fn end_resize(&mut self) {
        self.resize = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fm_core::id::SequentialIds;
    use pretty_assertions::assert_eq;

    fn store() -> FormStore {
        FormStore::with_ids(SequentialIds::new())
    }

    fn engine_at(left: f32, top: f32) -> CanvasEngine {
        CanvasEngine::new(CanvasViewport::new(left, top))
    }

    // ─── Coordinate transforms & snapping ───────────────────────────────

    #[test]
    fn viewport_transform_subtracts_origin_and_adds_scroll() {
        let viewport = CanvasViewport::new(50.0, 50.0).scrolled(100.0, 30.0);
        assert_eq!(viewport.to_canvas(137.0, 184.0), (187.0, 164.0));
    }

    #[test]
    fn snap_rounds_to_nearest_grid_line() {
        let grid = Grid::default();
        assert_eq!(grid.snap(87.0), 80.0);
        assert_eq!(grid.snap(134.0), 140.0);
        assert_eq!(grid.snap(0.0), 0.0);
    }

    #[test]
    fn snap_disabled_passes_through() {
        assert_eq!(Grid::off().snap(87.0), 87.0);
    }

    // ─── Palette drop ───────────────────────────────────────────────────

    #[test]
    fn palette_drop_lands_snapped_and_selected() {
        // Canvas rect at viewport (50, 50), no scroll, grid 20. A drop at
        // viewport (137, 184) is raw (87, 134) and snaps to (80, 140).
        let mut engine = engine_at(50.0, 50.0);
        let mut store = store();

        engine.begin_drag(DragSource::Palette(ElementType::Text), 60.0, 60.0);
        let id = engine.drop(137.0, 184.0, &mut store).unwrap();

        let element = store.get(id).unwrap();
        assert_eq!(element.position(), (80.0, 140.0));
        assert_eq!(store.selected_id(), Some(id));
    }

    #[test]
    fn palette_drop_respects_scroll_offsets() {
        let mut engine = engine_at(50.0, 50.0);
        engine.viewport = engine.viewport.scrolled(200.0, 0.0);
        engine.grid = Grid::off();
        let mut store = store();

        engine.begin_drag(DragSource::Palette(ElementType::Date), 0.0, 0.0);
        let id = engine.drop(137.0, 184.0, &mut store).unwrap();
        assert_eq!(store.get(id).unwrap().position(), (287.0, 134.0));
    }

    #[test]
    fn drop_clamps_to_non_negative() {
        let mut engine = engine_at(50.0, 50.0);
        engine.grid = Grid::off();
        let mut store = store();

        engine.begin_drag(DragSource::Palette(ElementType::Text), 0.0, 0.0);
        let id = engine.drop(10.0, 20.0, &mut store).unwrap();
        assert_eq!(store.get(id).unwrap().position(), (0.0, 0.0));
    }

    // ─── Existing-element move ──────────────────────────────────────────

    #[test]
    fn move_commits_origin_plus_delta() {
        let mut engine = engine_at(0.0, 0.0);
        engine.grid = Grid::off();
        let mut store = store();
        let el = store.add_element(
            ElementType::Email,
            Placement::Position { x: 100.0, y: 60.0 },
        );

        engine.begin_drag(
            DragSource::Existing {
                id: el.id,
                origin_x: 100.0,
                origin_y: 60.0,
            },
            400.0,
            300.0,
        );
        engine.drop(430.0, 290.0, &mut store);

        assert_eq!(store.get(el.id).unwrap().position(), (130.0, 50.0));
    }

    #[test]
    fn move_delta_is_scroll_invariant() {
        // Scroll offset doesn't matter for an existing element: both
        // pointer samples are viewport-space, only the delta counts.
        let mut engine = engine_at(50.0, 50.0);
        engine.viewport = engine.viewport.scrolled(500.0, 500.0);
        engine.grid = Grid::off();
        let mut store = store();
        let el = store.add_element(
            ElementType::Text,
            Placement::Position { x: 40.0, y: 40.0 },
        );

        engine.begin_drag(
            DragSource::Existing {
                id: el.id,
                origin_x: 40.0,
                origin_y: 40.0,
            },
            200.0,
            200.0,
        );
        engine.drop(210.0, 195.0, &mut store);
        assert_eq!(store.get(el.id).unwrap().position(), (50.0, 35.0));
    }

    #[test]
    fn intermediate_moves_do_not_commit() {
        let mut engine = engine_at(0.0, 0.0);
        let mut store = store();
        let el = store.add_element(
            ElementType::Text,
            Placement::Position { x: 40.0, y: 40.0 },
        );
        let revision = store.revision();

        engine.begin_drag(
            DragSource::Existing {
                id: el.id,
                origin_x: 40.0,
                origin_y: 40.0,
            },
            0.0,
            0.0,
        );
        // Arbitrarily many previews...
        for i in 0..50 {
            let _ = engine.drag_preview(i as f32, i as f32);
        }
        assert_eq!(store.revision(), revision);
        assert_eq!(store.get(el.id).unwrap().position(), (40.0, 40.0));

        // ...and only the terminal drop commits, once.
        engine.drop(100.0, 0.0, &mut store);
        assert_eq!(store.revision(), revision + 1);
        assert_eq!(store.get(el.id).unwrap().position(), (140.0, 40.0));
    }

    #[test]
    fn cancelled_drag_leaves_store_untouched() {
        let mut engine = engine_at(0.0, 0.0);
        let mut store = store();
        let before = store.revision();

        engine.begin_drag(DragSource::Palette(ElementType::Table), 10.0, 10.0);
        engine.cancel_drag();

        assert!(!engine.is_dragging());
        assert_eq!(store.revision(), before);
        assert!(store.is_empty());
        // A drop after cancel is inert too.
        assert_eq!(engine.drop(99.0, 99.0, &mut store), None);
    }

    #[test]
    fn drop_of_deleted_element_is_a_noop() {
        let mut engine = engine_at(0.0, 0.0);
        let mut store = store();
        let el = store.add_element(
            ElementType::Text,
            Placement::Position { x: 0.0, y: 0.0 },
        );

        engine.begin_drag(
            DragSource::Existing {
                id: el.id,
                origin_x: 0.0,
                origin_y: 0.0,
            },
            0.0,
            0.0,
        );
        store.remove_element(el.id);
        assert_eq!(engine.drop(60.0, 60.0, &mut store), None);
        assert!(store.is_empty());
    }

    // ─── Click selection ────────────────────────────────────────────────

    #[test]
    fn click_selects_hit_element_and_background_clears() {
        let mut engine = engine_at(0.0, 0.0);
        let mut store = store();
        let a = store.add_element(
            ElementType::Text,
            Placement::Position { x: 0.0, y: 0.0 },
        );
        let b = store.add_element(
            ElementType::Email,
            Placement::Position { x: 400.0, y: 0.0 },
        );
        engine.report_bounds(a.id, Bounds::new(0.0, 0.0, 280.0, 80.0));
        engine.report_bounds(b.id, Bounds::new(400.0, 0.0, 280.0, 80.0));

        engine.click(20.0, 20.0, &mut store);
        assert_eq!(store.selected_id(), Some(a.id));

        engine.click(420.0, 20.0, &mut store);
        assert_eq!(store.selected_id(), Some(b.id));

        engine.click(900.0, 900.0, &mut store);
        assert_eq!(store.selected_id(), None);
    }

    // ─── Resize ─────────────────────────────────────────────────────────

    #[test]
    fn resize_tracks_delta_and_floors_at_min_width() {
        // 280px wide, handle pressed at x=500; snapping off so the math is
        // bare: 410 → 190, 350 → 130, 300 → 80 → floored to 100.
        let mut engine = engine_at(0.0, 0.0);
        engine.grid = Grid::off();
        let mut store = store();
        let el = store.add_element(
            ElementType::Text,
            Placement::Position { x: 0.0, y: 0.0 },
        );
        store.update_element(el.id, ElementEdit::Width("280px".into()));

        engine.begin_resize(&store, 500.0);
        assert!(engine.is_resizing());

        engine.resize_to(410.0, &mut store);
        assert_eq!(store.get(el.id).unwrap().width.as_deref(), Some("190px"));

        engine.resize_to(350.0, &mut store);
        assert_eq!(store.get(el.id).unwrap().width.as_deref(), Some("130px"));

        engine.resize_to(300.0, &mut store);
        assert_eq!(store.get(el.id).unwrap().width.as_deref(), Some("100px"));

        engine.end_resize();
        assert!(!engine.is_resizing());
    }

    #[test]
    fn resize_commits_live_on_every_move() {
        let mut engine = engine_at(0.0, 0.0);
        engine.grid = Grid::off();
        let mut store = store();
        let el = store.add_element(
            ElementType::Textarea,
            Placement::Position { x: 0.0, y: 0.0 },
        );

        let before = store.revision();
        engine.begin_resize(&store, 0.0);
        engine.resize_to(10.0, &mut store);
        engine.resize_to(20.0, &mut store);
        assert_eq!(store.revision(), before + 2);
        assert_eq!(store.get(el.id).unwrap().width.as_deref(), Some("300px"));
    }

    #[test]
    fn resize_snaps_to_grid_when_enabled() {
        let mut engine = engine_at(0.0, 0.0);
        let mut store = store();
        let el = store.add_element(
            ElementType::Text,
            Placement::Position { x: 0.0, y: 0.0 },
        );

        engine.begin_resize(&store, 0.0); // default width 280
        engine.resize_to(13.0, &mut store); // 293 → snaps to 300
        assert_eq!(store.get(el.id).unwrap().width.as_deref(), Some("300px"));
    }

    #[test]
    fn resize_without_selection_is_inert() {
        let mut engine = engine_at(0.0, 0.0);
        let mut store = store();
        store.add_element(
            ElementType::Text,
            Placement::Position { x: 0.0, y: 0.0 },
        );
        store.set_selection(None);

        engine.begin_resize(&store, 500.0);
        assert!(!engine.is_resizing());
        engine.resize_to(600.0, &mut store);
        assert_eq!(store.definition()[0].width, None);
    }

    #[test]
    fn resize_survives_mid_gesture_deletion() {
        let mut engine = engine_at(0.0, 0.0);
        let mut store = store();
        let el = store.add_element(
            ElementType::Text,
            Placement::Position { x: 0.0, y: 0.0 },
        );

        engine.begin_resize(&store, 0.0);
        store.remove_element(el.id);
        engine.resize_to(50.0, &mut store); // stale id → store no-op
        assert!(store.is_empty());
    }

    #[test]
    fn unparseable_width_restarts_from_default() {
        let mut engine = engine_at(0.0, 0.0);
        engine.grid = Grid::off();
        let mut store = store();
        let el = store.add_element(
            ElementType::Text,
            Placement::Position { x: 0.0, y: 0.0 },
        );
        store.update_element(el.id, ElementEdit::Width("50%".into()));

        engine.begin_resize(&store, 0.0);
        engine.resize_to(20.0, &mut store); // 280 + 20
        assert_eq!(store.get(el.id).unwrap().width.as_deref(), Some("300px"));
    }
}
