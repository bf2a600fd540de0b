//! Structural preview: a `FormElement` rendered to a widget description.
//!
//! This is the read-only contract a live-preview surface consumes. It is
//! pure presentation — no styling, no interaction — and deliberately
//! structural so any frontend (DOM, egui, a test) can walk it. The match
//! over element kinds is exhaustive: a new type cannot ship without a
//! preview shape.

use fm_core::id::ElementId;
use fm_core::model::{DefaultValue, ElementKind, ElementType, FormElement};

/// One selectable choice in a dropdown or radio preview.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewOption {
    pub value: String,
    pub label: String,
}

/// The widget shape a preview surface should render for an element.
#[derive(Debug, Clone, PartialEq)]
pub enum PreviewControl {
    /// Single-line input: text, number, or email.
    Input {
        input_type: ElementType,
        placeholder: Option<String>,
        value: Option<String>,
    },
    TextArea {
        rows: u32,
        placeholder: Option<String>,
        value: Option<String>,
    },
    Dropdown {
        placeholder: String,
        options: Vec<PreviewOption>,
        selected: Option<String>,
    },
    RadioGroup {
        options: Vec<PreviewOption>,
        selected: Option<String>,
    },
    Checkbox {
        checked: bool,
    },
    DatePicker {
        placeholder: String,
        value: Option<String>,
    },
    FileUpload {
        accept: Option<String>,
    },
    TableGrid {
        rows: u32,
        cols: u32,
    },
}

/// A fully resolved preview of one element: common chrome plus control.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewNode {
    pub id: ElementId,
    /// Submitted-value key; always present per the model contract.
    pub name: String,
    pub label: String,
    pub required: bool,
    pub helper_text: Option<String>,
    /// Absolute canvas position, origin-defaulted.
    pub x: f32,
    pub y: f32,
    /// CSS width, defaulted.
    pub width: String,
    pub control: PreviewControl,
}

/// Resolve one element into its preview description.
pub fn preview(element: &FormElement) -> PreviewNode {
    let text_value = element
        .default_value
        .as_ref()
        .and_then(DefaultValue::as_text)
        .map(str::to_string);

    let control = match &element.kind {
        ElementKind::Text { .. } => PreviewControl::Input {
            input_type: ElementType::Text,
            placeholder: element.placeholder.clone(),
            value: text_value,
        },
        ElementKind::Number { .. } => PreviewControl::Input {
            input_type: ElementType::Number,
            placeholder: element.placeholder.clone(),
            value: text_value,
        },
        ElementKind::Email => PreviewControl::Input {
            input_type: ElementType::Email,
            placeholder: element.placeholder.clone(),
            value: text_value,
        },
        ElementKind::Textarea { rows, .. } => PreviewControl::TextArea {
            rows: rows.unwrap_or(3),
            placeholder: element.placeholder.clone(),
            value: text_value,
        },
        ElementKind::Dropdown { options } => PreviewControl::Dropdown {
            placeholder: element
                .placeholder
                .clone()
                .unwrap_or_else(|| "Select an option".to_string()),
            options: options
                .iter()
                .map(|o| PreviewOption {
                    value: o.value.clone(),
                    label: o.label.clone(),
                })
                .collect(),
            selected: text_value,
        },
        ElementKind::Radio { options } => PreviewControl::RadioGroup {
            options: options
                .iter()
                .map(|o| PreviewOption {
                    value: o.value.clone(),
                    label: o.label.clone(),
                })
                .collect(),
            selected: text_value,
        },
        ElementKind::Checkbox => PreviewControl::Checkbox {
            checked: element
                .default_value
                .as_ref()
                .and_then(DefaultValue::as_bool)
                .unwrap_or(false),
        },
        ElementKind::Date => PreviewControl::DatePicker {
            placeholder: element
                .placeholder
                .clone()
                .unwrap_or_else(|| "Pick a date".to_string()),
            value: text_value,
        },
        ElementKind::File { accept } => PreviewControl::FileUpload {
            accept: accept.clone(),
        },
        ElementKind::Table { rows, cols } => PreviewControl::TableGrid {
            rows: *rows,
            cols: *cols,
        },
    };

    let (x, y) = element.position();
    PreviewNode {
        id: element.id,
        name: element.name.clone(),
        label: element.label.clone(),
        required: element.is_required(),
        helper_text: element.helper_text.clone(),
        x,
        y,
        width: element.width_or_default().to_string(),
        control,
    }
}

/// Preview every element, in list order.
pub fn preview_all(definition: &[FormElement]) -> Vec<PreviewNode> {
    definition.iter().map(preview).collect()
}
