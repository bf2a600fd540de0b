pub mod binding;
pub mod canvas;
pub mod reorder;
pub mod store;

pub use binding::{
    PropertyField, PropertyPanel, default_value_edit, edit_for, editable_fields, parse_bound,
    parse_count,
};
pub use canvas::{
    CanvasEngine, CanvasViewport, DEFAULT_GRID_SIZE, DragSource, Grid, MIN_WIDTH_PX,
};
pub use reorder::ListReorder;
pub use store::{ElementEdit, FormStore, OptionEdit, Placement};
