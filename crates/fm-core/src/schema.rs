//! The durable JSON artifact: serialize and deserialize form definitions.
//!
//! The export format is a JSON array of element objects in list order, each
//! carrying exactly the fields its type declares. The schema is versionless
//! but stable: optional fields an older or newer writer omitted must
//! deserialize to their defaults rather than failing.

use crate::model::FormDefinition;

/// File name the export surface writes.
pub const EXPORT_FILE_NAME: &str = "form-design.json";

/// Compact serialization, for storage payloads.
pub fn to_json(definition: &FormDefinition) -> serde_json::Result<String> {
    serde_json::to_string(definition)
}

/// Pretty serialization, for the downloadable export artifact.
pub fn to_json_pretty(definition: &FormDefinition) -> serde_json::Result<String> {
    serde_json::to_string_pretty(definition)
}

/// Reconstruct a definition from its JSON form.
pub fn from_json(json: &str) -> serde_json::Result<FormDefinition> {
    serde_json::from_str(json)
}
