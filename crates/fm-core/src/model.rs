//! Core data model for form definitions.
//!
//! A form definition is an ordered list of [`FormElement`] values. List
//! order is logical order — tab order and export order — and is independent
//! of where an element sits on the canvas (`x`/`y`). Each element carries a
//! closed-set `type` discriminant; the per-type payload lives in
//! [`ElementKind`] so every switch over element types is exhaustive and a
//! new variant fails to compile until it is handled everywhere.

use crate::css::DEFAULT_ELEMENT_WIDTH;
use crate::id::{ElementId, OptionId};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

// ─── Element types ───────────────────────────────────────────────────────

/// The closed set of form element types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Text,
    Number,
    Email,
    Textarea,
    Dropdown,
    Radio,
    Checkbox,
    Date,
    File,
    Table,
}

impl ElementType {
    /// Every type, in palette order.
    pub const ALL: [ElementType; 10] = [
        ElementType::Text,
        ElementType::Number,
        ElementType::Email,
        ElementType::Textarea,
        ElementType::Dropdown,
        ElementType::Radio,
        ElementType::Checkbox,
        ElementType::Date,
        ElementType::File,
        ElementType::Table,
    ];

    /// The wire name used as the JSON `type` discriminant and id prefix.
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementType::Text => "text",
            ElementType::Number => "number",
            ElementType::Email => "email",
            ElementType::Textarea => "textarea",
            ElementType::Dropdown => "dropdown",
            ElementType::Radio => "radio",
            ElementType::Checkbox => "checkbox",
            ElementType::Date => "date",
            ElementType::File => "file",
            ElementType::Table => "table",
        }
    }

    /// Parse a wire name back into a type.
    ///
    /// An unknown name is the factory's programmer-error condition surfacing
    /// at the string boundary (e.g. a palette entry added without a model
    /// variant) — callers are expected to treat it as a bug, not recover.
    pub fn parse(s: &str) -> Result<Self, UnknownTypeError> {
        ElementType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownTypeError(s.to_string()))
    }

    /// Default display label for a freshly created element.
    pub fn default_label(&self) -> String {
        match self {
            ElementType::Checkbox => "Agree to terms".to_string(),
            other => {
                let name = other.as_str();
                let mut label = String::with_capacity(name.len() + 6);
                let mut chars = name.chars();
                if let Some(first) = chars.next() {
                    label.extend(first.to_uppercase());
                    label.push_str(chars.as_str());
                }
                label.push_str(" Field");
                label
            }
        }
    }

    /// Default placeholder text, for the types that render one.
    pub fn default_placeholder(&self) -> Option<&'static str> {
        match self {
            ElementType::Text => Some("Enter text"),
            ElementType::Number => Some("Enter a number"),
            ElementType::Email => Some("Enter email address"),
            ElementType::Textarea => Some("Enter long text"),
            _ => None,
        }
    }

    /// Whether this type carries an editable option list.
    pub fn has_options(&self) -> bool {
        matches!(self, ElementType::Dropdown | ElementType::Radio)
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A type name outside the closed set was requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTypeError(pub String);

impl fmt::Display for UnknownTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported element type: {}", self.0)
    }
}

impl std::error::Error for UnknownTypeError {}

// ─── Options ─────────────────────────────────────────────────────────────

/// One choice row inside a dropdown or radio element. Owned exclusively by
/// its parent element; created and destroyed only through the store's
/// option operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormElementOption {
    pub id: OptionId,
    pub value: String,
    pub label: String,
}

/// Option storage. The factory seeds two options, so two slots live inline.
pub type OptionList = SmallVec<[FormElementOption; 2]>;

// ─── Default values ──────────────────────────────────────────────────────

/// A pre-filled value. Checkboxes carry a bool; everything else a string
/// (dates as `yyyy-MM-dd`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefaultValue {
    Bool(bool),
    Text(String),
}

impl DefaultValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            DefaultValue::Bool(b) => Some(*b),
            DefaultValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            DefaultValue::Text(s) => Some(s),
            DefaultValue::Bool(_) => None,
        }
    }
}

// ─── Per-type payloads ───────────────────────────────────────────────────

/// The type-specific portion of an element. Serialized inline into the
/// element object with `type` as the discriminant, so the JSON artifact
/// stays flat: `{"id": …, "type": "dropdown", "options": […], …}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementKind {
    #[serde(rename_all = "camelCase")]
    Text {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_length: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_length: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pattern: Option<String>,
    },
    Number {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
    Email,
    #[serde(rename_all = "camelCase")]
    Textarea {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        rows: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_length: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_length: Option<u32>,
    },
    Dropdown {
        options: OptionList,
    },
    Radio {
        options: OptionList,
    },
    Checkbox,
    Date,
    File {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        accept: Option<String>,
    },
    Table {
        rows: u32,
        cols: u32,
    },
}

impl ElementKind {
    /// The discriminant for this payload.
    pub fn element_type(&self) -> ElementType {
        match self {
            ElementKind::Text { .. } => ElementType::Text,
            ElementKind::Number { .. } => ElementType::Number,
            ElementKind::Email => ElementType::Email,
            ElementKind::Textarea { .. } => ElementType::Textarea,
            ElementKind::Dropdown { .. } => ElementType::Dropdown,
            ElementKind::Radio { .. } => ElementType::Radio,
            ElementKind::Checkbox => ElementType::Checkbox,
            ElementKind::Date => ElementType::Date,
            ElementKind::File { .. } => ElementType::File,
            ElementKind::Table { .. } => ElementType::Table,
        }
    }

    /// The option list, for dropdown/radio payloads.
    pub fn options(&self) -> Option<&OptionList> {
        match self {
            ElementKind::Dropdown { options } | ElementKind::Radio { options } => Some(options),
            _ => None,
        }
    }

    pub fn options_mut(&mut self) -> Option<&mut OptionList> {
        match self {
            ElementKind::Dropdown { options } | ElementKind::Radio { options } => Some(options),
            _ => None,
        }
    }
}

// ─── Form elements ───────────────────────────────────────────────────────

/// One form field's complete declarative description.
///
/// `id` is generated at creation and immutable; `type` (the `kind`
/// discriminant) is likewise never mutated in place — replacing an
/// element's type means remove + add.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormElement {
    pub id: ElementId,
    /// Form-field identifier; maps to the submitted value's key.
    pub name: String,
    /// Display text shown above the field.
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<DefaultValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub helper_text: Option<String>,
    /// Canvas position, top-left, in pixels. Absent means the origin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
    /// CSS length string, e.g. `"280px"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(flatten)]
    pub kind: ElementKind,
}

impl FormElement {
    pub fn element_type(&self) -> ElementType {
        self.kind.element_type()
    }

    /// Canvas position with the origin default applied.
    pub fn position(&self) -> (f32, f32) {
        (self.x.unwrap_or(0.0), self.y.unwrap_or(0.0))
    }

    /// Rendered width with the default applied.
    pub fn width_or_default(&self) -> &str {
        self.width.as_deref().unwrap_or(DEFAULT_ELEMENT_WIDTH)
    }

    pub fn is_required(&self) -> bool {
        self.required.unwrap_or(false)
    }
}

/// The ordered list of all elements composing one form.
/// Insertion order is logical/tab/export order.
pub type FormDefinition = Vec<FormElement>;
