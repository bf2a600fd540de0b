pub mod css;
pub mod factory;
pub mod id;
pub mod model;
pub mod palette;
pub mod schema;
pub mod template;

pub use css::{CssLength, CssUnit, DEFAULT_ELEMENT_WIDTH, DEFAULT_ELEMENT_WIDTH_PX};
pub use factory::create_element;
pub use id::{CounterIds, ElementId, IdSource, OptionId, SequentialIds};
pub use model::*;
pub use schema::{EXPORT_FILE_NAME, from_json, to_json, to_json_pretty};
pub use template::{
    KeyValueStore, MemoryStore, TEMPLATES_KEY, Template, TemplateError, TemplateVault, export_json,
};
