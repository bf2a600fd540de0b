//! The element palette: what the sidebar offers for dragging onto the
//! canvas. Pure data — drag semantics live in the editor crate.

use crate::model::ElementType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteEntry {
    pub ty: ElementType,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct PaletteCategory {
    pub name: &'static str,
    pub entries: &'static [PaletteEntry],
}

/// Palette contents, in sidebar order.
pub const PALETTE: [PaletteCategory; 3] = [
    PaletteCategory {
        name: "Basic Inputs",
        entries: &[
            PaletteEntry {
                ty: ElementType::Text,
                label: "Text Input",
            },
            PaletteEntry {
                ty: ElementType::Number,
                label: "Number Input",
            },
            PaletteEntry {
                ty: ElementType::Email,
                label: "Email Input",
            },
            PaletteEntry {
                ty: ElementType::Textarea,
                label: "Text Area",
            },
        ],
    },
    PaletteCategory {
        name: "Selection Controls",
        entries: &[
            PaletteEntry {
                ty: ElementType::Dropdown,
                label: "Dropdown",
            },
            PaletteEntry {
                ty: ElementType::Radio,
                label: "Radio Group",
            },
            PaletteEntry {
                ty: ElementType::Checkbox,
                label: "Checkbox",
            },
        ],
    },
    PaletteCategory {
        name: "Advanced Elements",
        entries: &[
            PaletteEntry {
                ty: ElementType::Date,
                label: "Date Picker",
            },
            PaletteEntry {
                ty: ElementType::File,
                label: "File Upload",
            },
            PaletteEntry {
                ty: ElementType::Table,
                label: "Table",
            },
        ],
    },
];

/// Case-insensitive palette search over labels and wire names.
/// An empty query matches everything.
pub fn filter(query: &str) -> Vec<PaletteEntry> {
    let query = query.trim().to_lowercase();
    PALETTE
        .iter()
        .flat_map(|category| category.entries.iter().copied())
        .filter(|entry| {
            query.is_empty()
                || entry.label.to_lowercase().contains(&query)
                || entry.ty.as_str().contains(&query)
        })
        .collect()
}
