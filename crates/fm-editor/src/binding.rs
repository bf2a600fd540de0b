//! Selection & property binding: the contract a property panel builds on.
//!
//! The panel itself is view glue and lives outside the core. What lives
//! here is everything it needs to stay honest:
//!
//! - [`PropertyPanel`] — observation state. The store bumps its revision on
//!   every effective mutation and exposes the selected id; the panel
//!   re-reads its snapshot whenever either moves, so an edit made through
//!   *any* path (canvas drag, option CRUD, another panel) shows up.
//! - [`editable_fields`] — the per-type field set to render.
//! - [`edit_for`] / the parse helpers — raw input strings → store edits,
//!   with failed numeric parses degrading the field to unset rather than
//!   corrupting anything.
//!
//! Write-back goes exclusively through the store's named operations; the
//! binding never holds its own copy of element state.

use crate::store::{ElementEdit, FormStore};
use fm_core::id::ElementId;
use fm_core::model::{DefaultValue, ElementType, FormElement};

/// One editable property slot in the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyField {
    Label,
    Name,
    Placeholder,
    HelperText,
    Required,
    MinLength,
    MaxLength,
    Rows,
    MinValue,
    MaxValue,
    /// The option-list editor; edits flow through the option operations,
    /// not [`edit_for`].
    Options,
    Accept,
    TableRows,
    TableCols,
}

/// Which property fields the panel offers for an element type.
pub fn editable_fields(ty: ElementType) -> &'static [PropertyField] {
    use PropertyField::*;
    match ty {
        ElementType::Text => &[Label, Name, Placeholder, HelperText, Required, MinLength, MaxLength],
        ElementType::Textarea => &[
            Label,
            Name,
            Placeholder,
            HelperText,
            Required,
            MinLength,
            MaxLength,
            Rows,
        ],
        ElementType::Number => &[Label, Name, Placeholder, HelperText, Required, MinValue, MaxValue],
        ElementType::Email => &[Label, Name, Placeholder, HelperText, Required],
        ElementType::Dropdown => &[Label, Name, Placeholder, HelperText, Required, Options],
        ElementType::Radio => &[Label, Name, HelperText, Required, Options],
        ElementType::Checkbox => &[Label, Name, HelperText, Required],
        ElementType::Date => &[Label, Name, Placeholder, HelperText, Required],
        ElementType::File => &[Label, Name, HelperText, Required, Accept],
        ElementType::Table => &[Label, Name, HelperText, Required, TableRows, TableCols],
    }
}

/// Tolerant integer parse for count-like fields (lengths, rows, cols).
/// Empty or unparseable input yields `None` — "unset", never an error.
pub fn parse_count(raw: &str) -> Option<u32> {
    raw.trim().parse().ok()
}

/// Tolerant numeric parse for value bounds (number min/max).
pub fn parse_bound(raw: &str) -> Option<f64> {
    raw.trim().parse().ok()
}

fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Map a field's raw input string to the store edit that writes it back.
///
/// Returns `None` for [`PropertyField::Options`] — the option list is
/// edited row-by-row through the store's option operations.
pub fn edit_for(field: PropertyField, raw: &str) -> Option<ElementEdit> {
    match field {
        PropertyField::Label => Some(ElementEdit::Label(raw.to_string())),
        PropertyField::Name => Some(ElementEdit::Name(raw.to_string())),
        PropertyField::Placeholder => Some(ElementEdit::Placeholder(non_empty(raw))),
        PropertyField::HelperText => Some(ElementEdit::HelperText(non_empty(raw))),
        PropertyField::Required => {
            let checked = raw.trim().eq_ignore_ascii_case("true") || raw.trim() == "on";
            Some(ElementEdit::Required(checked))
        }
        PropertyField::MinLength => Some(ElementEdit::MinLength(parse_count(raw))),
        PropertyField::MaxLength => Some(ElementEdit::MaxLength(parse_count(raw))),
        PropertyField::Rows => Some(ElementEdit::Rows(parse_count(raw))),
        PropertyField::MinValue => Some(ElementEdit::Min(parse_bound(raw))),
        PropertyField::MaxValue => Some(ElementEdit::Max(parse_bound(raw))),
        PropertyField::Options => None,
        PropertyField::Accept => Some(ElementEdit::Accept(non_empty(raw))),
        PropertyField::TableRows => Some(ElementEdit::TableRows(parse_count(raw))),
        PropertyField::TableCols => Some(ElementEdit::TableCols(parse_count(raw))),
    }
}

/// Map a default-value input to its edit, shaped by the element type.
pub fn default_value_edit(ty: ElementType, raw: &str) -> ElementEdit {
    let value = match ty {
        ElementType::Checkbox => Some(DefaultValue::Bool(
            raw.trim().eq_ignore_ascii_case("true") || raw.trim() == "on",
        )),
        _ => non_empty(raw).map(DefaultValue::Text),
    };
    ElementEdit::DefaultValue(value)
}

/// Observation state for one bound property surface.
#[derive(Debug, Clone, Copy, Default)]
pub struct PropertyPanel {
    seen_revision: u64,
    seen_selection: Option<ElementId>,
}

impl PropertyPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the surface must re-render: the selection moved, or the
    /// definition changed since the last refresh. The revision is
    /// store-wide, so this over-triggers on edits to unselected elements —
    /// a refresh is a cheap snapshot read, staleness is not.
    pub fn needs_refresh(&self, store: &FormStore) -> bool {
        store.selected_id() != self.seen_selection || store.revision() != self.seen_revision
    }

    /// Snapshot the current selection and mark the store state as seen.
    pub fn refresh(&mut self, store: &FormStore) -> Option<FormElement> {
        self.seen_revision = store.revision();
        self.seen_selection = store.selected_id();
        store.selection().cloned()
    }
}
