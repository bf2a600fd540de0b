//! Element factory: every new element starts here.
//!
//! The factory is the only place per-type defaults are defined, and the
//! only code path that materializes a `FormElement` during editing — the
//! store calls in here, nothing constructs elements ad hoc.

use crate::id::{ElementId, IdSource, OptionId};
use crate::model::{ElementKind, ElementType, FormElement, FormElementOption, OptionList};

/// Create a new element of the given type, populated with defaults.
///
/// Pure apart from drawing fresh ids from `ids`. The match below is
/// exhaustive over the closed type set; adding a variant without a factory
/// arm is a compile error.
pub fn create_element(ty: ElementType, ids: &mut dyn IdSource) -> FormElement {
    let id = ElementId::intern(&ids.next_id(ty.as_str()));

    let kind = match ty {
        ElementType::Text => ElementKind::Text {
            min_length: None,
            max_length: None,
            pattern: None,
        },
        ElementType::Number => ElementKind::Number {
            min: None,
            max: None,
        },
        ElementType::Email => ElementKind::Email,
        ElementType::Textarea => ElementKind::Textarea {
            rows: Some(3),
            min_length: None,
            max_length: None,
        },
        ElementType::Dropdown => ElementKind::Dropdown {
            options: seed_options(ids, ["Option 1", "Option 2"], ["option1", "option2"]),
        },
        ElementType::Radio => ElementKind::Radio {
            options: seed_options(ids, ["Choice 1", "Choice 2"], ["choice1", "choice2"]),
        },
        ElementType::Checkbox => ElementKind::Checkbox,
        ElementType::Date => ElementKind::Date,
        ElementType::File => ElementKind::File { accept: None },
        ElementType::Table => ElementKind::Table { rows: 3, cols: 2 },
    };

    FormElement {
        id,
        name: id.as_str().to_string(),
        label: ty.default_label(),
        placeholder: ty.default_placeholder().map(str::to_string),
        default_value: None,
        required: Some(false),
        helper_text: None,
        x: None,
        y: None,
        width: None,
        kind,
    }
}

fn seed_options(ids: &mut dyn IdSource, labels: [&str; 2], values: [&str; 2]) -> OptionList {
    labels
        .iter()
        .zip(values.iter())
        .map(|(label, value)| FormElementOption {
            id: OptionId::intern(&ids.next_id("opt")),
            value: (*value).to_string(),
            label: (*label).to_string(),
        })
        .collect()
}
