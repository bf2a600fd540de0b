//! The element store: single source of truth for the form being designed.
//!
//! The store exclusively owns the ordered definition and the selection
//! pointer. Every other component holds transient read snapshots and calls
//! the named operations below; nothing else writes. All operations are
//! synchronous and atomic with respect to the collection — no partial
//! state is ever observable between calls.
//!
//! Selection is held as an id, not a copy of the element: the selected
//! element's display data is re-derived from the definition on every read,
//! so a mutation made through any path is immediately visible to whoever
//! observes the selection.
//!
//! Stale references are expected, not exceptional. UI events race (a
//! drag-end can arrive after its element was deleted), so every operation
//! given an id that is no longer present is a silent no-op.

use fm_core::factory::create_element;
use fm_core::id::{CounterIds, ElementId, IdSource, OptionId};
use fm_core::model::{
    DefaultValue, ElementKind, ElementType, FormDefinition, FormElement, FormElementOption,
};

/// Where a new element lands in the definition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Append at the end (list-layout drop on empty canvas space).
    Append,
    /// Insert at a list index; an out-of-range index appends.
    Index(usize),
    /// Append with a canvas position. The store records the coordinates
    /// exactly as given — snapping is the canvas engine's business and has
    /// already happened by the time this call is made.
    Position { x: f32, y: f32 },
}

/// A single field-level edit, merged into the matching element.
///
/// `id` and `type` deliberately have no variant: the two immutable fields
/// cannot be altered through the update path by construction. Numeric
/// fields carry `Option` — `None` unsets the field (a failed parse in the
/// property panel degrades to unset, it never corrupts its neighbours).
#[derive(Debug, Clone, PartialEq)]
pub enum ElementEdit {
    Name(String),
    Label(String),
    Placeholder(Option<String>),
    DefaultValue(Option<DefaultValue>),
    Required(bool),
    HelperText(Option<String>),
    /// Canvas position, already snapped/clamped by the caller.
    Position { x: f32, y: f32 },
    /// CSS width string, e.g. `"190px"`.
    Width(String),
    /// Text and textarea.
    MinLength(Option<u32>),
    /// Text and textarea.
    MaxLength(Option<u32>),
    /// Text only.
    Pattern(Option<String>),
    /// Number only.
    Min(Option<f64>),
    /// Number only.
    Max(Option<f64>),
    /// Textarea display rows.
    Rows(Option<u32>),
    /// File accept filter, e.g. `"image/*, .pdf"`.
    Accept(Option<String>),
    /// Table rows; clamped to ≥ 1, `None` leaves the current value.
    TableRows(Option<u32>),
    /// Table columns; clamped to ≥ 1, `None` leaves the current value.
    TableCols(Option<u32>),
}

/// A field-level edit on one option row.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionEdit {
    Label(String),
    Value(String),
}

/// The mutable form-designer state: definition + selection.
pub struct FormStore {
    definition: FormDefinition,
    selected: Option<ElementId>,
    ids: Box<dyn IdSource>,
    revision: u64,
}

impl FormStore {
    /// An empty store with the process-wide id source.
    pub fn new() -> Self {
        Self::with_ids(CounterIds)
    }

    /// An empty store drawing ids from the given source.
    /// Tests inject a deterministic source here.
    pub fn with_ids(ids: impl IdSource + 'static) -> Self {
        Self {
            definition: Vec::new(),
            selected: None,
            ids: Box::new(ids),
            revision: 0,
        }
    }

    // ─── Reads ───────────────────────────────────────────────────────────

    pub fn definition(&self) -> &[FormElement] {
        &self.definition
    }

    pub fn len(&self) -> usize {
        self.definition.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definition.is_empty()
    }

    pub fn get(&self, id: ElementId) -> Option<&FormElement> {
        self.definition.iter().find(|el| el.id == id)
    }

    pub fn index_of(&self, id: ElementId) -> Option<usize> {
        self.definition.iter().position(|el| el.id == id)
    }

    pub fn selected_id(&self) -> Option<ElementId> {
        self.selected
    }

    /// The selected element, re-derived from the definition on every read.
    pub fn selection(&self) -> Option<&FormElement> {
        self.selected.and_then(|id| self.get(id))
    }

    /// Bumped on every effective definition mutation. A bound editor
    /// re-reads its snapshot when this moves or the selection id changes.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    // ─── Element operations ──────────────────────────────────────────────

    /// Create an element of `ty` via the factory, place it, and select it.
    /// Returns a snapshot of the created element so the caller can
    /// reference it (including its generated id) immediately.
    pub fn add_element(&mut self, ty: ElementType, placement: Placement) -> FormElement {
        let mut element = create_element(ty, self.ids.as_mut());

        let index = match placement {
            Placement::Append => self.definition.len(),
            Placement::Index(i) if i <= self.definition.len() => i,
            Placement::Index(_) => self.definition.len(),
            Placement::Position { x, y } => {
                element.x = Some(x);
                element.y = Some(y);
                self.definition.len()
            }
        };

        log::debug!("add {} at index {index}", element.id);
        self.definition.insert(index, element.clone());
        self.selected = Some(element.id);
        self.revision += 1;
        element
    }

    /// Delete the element with this id, if present. Clears the selection
    /// when it pointed at the removed element.
    pub fn remove_element(&mut self, id: ElementId) {
        let Some(index) = self.index_of(id) else {
            log::warn!("remove for unknown element {id}, ignoring");
            return;
        };
        self.definition.remove(index);
        if self.selected == Some(id) {
            self.selected = None;
        }
        self.revision += 1;
        log::debug!("removed {id}");
    }

    /// Merge one field edit into the element with this id.
    ///
    /// A type-specific edit aimed at an element of another type is ignored,
    /// like any other stale or mismatched reference.
    pub fn update_element(&mut self, id: ElementId, edit: ElementEdit) {
        let Some(element) = self.definition.iter_mut().find(|el| el.id == id) else {
            log::warn!("update for unknown element {id}, ignoring");
            return;
        };
        if apply_edit(element, edit) {
            self.revision += 1;
        }
    }

    /// Point the selection at an element (or clear it with `None`).
    /// An id not present in the definition is ignored — the selection
    /// invariant (selected id always exists) holds unconditionally.
    pub fn set_selection(&mut self, id: Option<ElementId>) {
        match id {
            Some(id) if self.get(id).is_none() => {
                log::warn!("selection of unknown element {id}, ignoring");
            }
            other => self.selected = other,
        }
    }

    /// Reorder: remove the element at `from` and reinsert it at `to`.
    /// Pure list-order move — x/y are untouched. No-op when the indices
    /// are equal or either is out of bounds.
    pub fn move_element(&mut self, from: usize, to: usize) {
        if from == to || from >= self.definition.len() || to >= self.definition.len() {
            return;
        }
        let element = self.definition.remove(from);
        self.definition.insert(to, element);
        self.revision += 1;
        log::debug!("moved element {from} -> {to}");
    }

    /// Swap in a whole definition (template load). Selection clears —
    /// the old selected id has no meaning in the new list.
    pub fn replace_definition(&mut self, definition: FormDefinition) {
        self.definition = definition;
        self.selected = None;
        self.revision += 1;
    }

    // ─── Option operations (dropdown / radio only) ──────────────────────

    /// Append an auto-numbered option to the element's list.
    pub fn add_option(&mut self, element_id: ElementId) {
        let Some(element) = self.definition.iter_mut().find(|el| el.id == element_id) else {
            log::warn!("add_option for unknown element {element_id}, ignoring");
            return;
        };
        let Some(options) = element.kind.options_mut() else {
            log::warn!("add_option on non-options element {element_id}, ignoring");
            return;
        };
        let next_id = OptionId::intern(&self.ids.next_id("opt"));
        let n = options.len() + 1;
        options.push(FormElementOption {
            id: next_id,
            value: format!("option{n}"),
            label: format!("New Option {n}"),
        });
        self.revision += 1;
    }

    /// Merge a field edit into one option row.
    pub fn update_option(&mut self, element_id: ElementId, option_id: OptionId, edit: OptionEdit) {
        let Some(options) = self.options_mut(element_id) else {
            return;
        };
        let Some(option) = options.iter_mut().find(|o| o.id == option_id) else {
            log::warn!("update for unknown option {option_id}, ignoring");
            return;
        };
        match edit {
            OptionEdit::Label(label) => option.label = label,
            OptionEdit::Value(value) => option.value = value,
        }
        self.revision += 1;
    }

    /// Remove exactly the option with this id; other rows keep their order
    /// and ids.
    pub fn remove_option(&mut self, element_id: ElementId, option_id: OptionId) {
        let Some(options) = self.options_mut(element_id) else {
            return;
        };
        let before = options.len();
        options.retain(|o| o.id != option_id);
        if options.len() != before {
            self.revision += 1;
        }
    }

    fn options_mut(&mut self, element_id: ElementId) -> Option<&mut fm_core::model::OptionList> {
        let element = self.definition.iter_mut().find(|el| el.id == element_id)?;
        let options = element.kind.options_mut();
        if options.is_none() {
            log::warn!("option operation on non-options element {element_id}, ignoring");
        }
        options
    }
}

impl Default for FormStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Merge one edit into an element. Returns whether anything was applied.
fn apply_edit(element: &mut FormElement, edit: ElementEdit) -> bool {
    match edit {
        ElementEdit::Name(name) => {
            element.name = name;
            true
        }
        ElementEdit::Label(label) => {
            element.label = label;
            true
        }
        ElementEdit::Placeholder(placeholder) => {
            element.placeholder = placeholder;
            true
        }
        ElementEdit::DefaultValue(value) => {
            element.default_value = value;
            true
        }
        ElementEdit::Required(required) => {
            element.required = Some(required);
            true
        }
        ElementEdit::HelperText(text) => {
            element.helper_text = text;
            true
        }
        ElementEdit::Position { x, y } => {
            element.x = Some(x);
            element.y = Some(y);
            true
        }
        ElementEdit::Width(width) => {
            element.width = Some(width);
            true
        }
        ElementEdit::MinLength(value) => match &mut element.kind {
            ElementKind::Text { min_length, .. } | ElementKind::Textarea { min_length, .. } => {
                *min_length = value;
                true
            }
            _ => mismatched(element, "minLength"),
        },
        ElementEdit::MaxLength(value) => match &mut element.kind {
            ElementKind::Text { max_length, .. } | ElementKind::Textarea { max_length, .. } => {
                *max_length = value;
                true
            }
            _ => mismatched(element, "maxLength"),
        },
        ElementEdit::Pattern(value) => match &mut element.kind {
            ElementKind::Text { pattern, .. } => {
                *pattern = value;
                true
            }
            _ => mismatched(element, "pattern"),
        },
        ElementEdit::Min(value) => match &mut element.kind {
            ElementKind::Number { min, .. } => {
                *min = value;
                true
            }
            _ => mismatched(element, "min"),
        },
        ElementEdit::Max(value) => match &mut element.kind {
            ElementKind::Number { max, .. } => {
                *max = value;
                true
            }
            _ => mismatched(element, "max"),
        },
        ElementEdit::Rows(value) => match &mut element.kind {
            ElementKind::Textarea { rows, .. } => {
                *rows = value;
                true
            }
            _ => mismatched(element, "rows"),
        },
        ElementEdit::Accept(value) => match &mut element.kind {
            ElementKind::File { accept } => {
                *accept = value;
                true
            }
            _ => mismatched(element, "accept"),
        },
        ElementEdit::TableRows(value) => match (&mut element.kind, value) {
            (ElementKind::Table { rows, .. }, Some(n)) => {
                *rows = n.max(1);
                true
            }
            // unparseable count: keep the current value
            (ElementKind::Table { .. }, None) => false,
            _ => mismatched(element, "rows"),
        },
        ElementEdit::TableCols(value) => match (&mut element.kind, value) {
            (ElementKind::Table { cols, .. }, Some(n)) => {
                *cols = n.max(1);
                true
            }
            (ElementKind::Table { .. }, None) => false,
            _ => mismatched(element, "cols"),
        },
    }
}

fn mismatched(element: &FormElement, field: &str) -> bool {
    log::warn!(
        "{field} edit on {} element {}, ignoring",
        element.element_type(),
        element.id
    );
    false
}
