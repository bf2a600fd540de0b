//! Submission assembly: entered values → submittable payload.
//!
//! A preview surface collects `(name, value)` pairs from its rendered
//! controls at submit time. This module folds those pairs into the payload
//! shape the form contract promises: one entry per field name, with
//! repeated names (e.g. a multi-select) aggregated into a list under the
//! same key. The element's `type` dictates which value shape to expect —
//! strings for text-like fields and dates (`yyyy-MM-dd`), `"on"`-style
//! marker values for checked checkboxes, absent keys for unchecked ones.

use fm_core::id::ElementId;
use fm_core::model::FormDefinition;
use std::collections::BTreeMap;

/// A submitted value: single entry or aggregated list.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmittedValue {
    Single(String),
    Many(Vec<String>),
}

impl SubmittedValue {
    fn push(&mut self, value: String) {
        match self {
            SubmittedValue::Single(first) => {
                *self = SubmittedValue::Many(vec![std::mem::take(first), value]);
            }
            SubmittedValue::Many(all) => all.push(value),
        }
    }
}

/// The assembled payload, keyed by field name.
pub type Submission = BTreeMap<String, SubmittedValue>;

/// Fold entered `(name, value)` pairs into a submission payload.
pub fn collect_submission<I>(entries: I) -> Submission
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut payload = Submission::new();
    for (name, value) in entries {
        match payload.get_mut(&name) {
            Some(existing) => existing.push(value),
            None => {
                payload.insert(name, SubmittedValue::Single(value));
            }
        }
    }
    payload
}

/// Overlay date-picker selections onto a payload.
///
/// Date widgets hold their picked value outside the plain input flow; each
/// pick is `(element id, "yyyy-MM-dd")` and lands under the element's
/// `name`, replacing whatever the fold produced for that key.
pub fn apply_date_picks(
    payload: &mut Submission,
    definition: &FormDefinition,
    picks: &[(ElementId, String)],
) {
    for (id, date) in picks {
        if let Some(element) = definition.iter().find(|el| el.id == *id) {
            payload.insert(element.name.clone(), SubmittedValue::Single(date.clone()));
        }
    }
    log::debug!("assembled submission with {} keys", payload.len());
}
