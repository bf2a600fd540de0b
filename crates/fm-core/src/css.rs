//! CSS-length parsing for element widths.
//!
//! Widths travel through the data model as CSS length strings (`"280px"`)
//! so the export artifact stays directly consumable by a web renderer.
//! Resize math needs the numeric value back out; this module is the one
//! place that conversion lives. Parsing is tolerant by contract: a width
//! the parser does not understand is carried verbatim in the model and
//! treated as unset where a number is needed.

use std::fmt;
use winnow::combinator::alt;
use winnow::prelude::*;
use winnow::token::take_while;

/// Width applied when an element does not specify one.
pub const DEFAULT_ELEMENT_WIDTH: &str = "280px";

/// Numeric twin of [`DEFAULT_ELEMENT_WIDTH`], for resize math.
pub const DEFAULT_ELEMENT_WIDTH_PX: f32 = 280.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CssUnit {
    Px,
    Percent,
    Rem,
    Em,
}

impl CssUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            CssUnit::Px => "px",
            CssUnit::Percent => "%",
            CssUnit::Rem => "rem",
            CssUnit::Em => "em",
        }
    }
}

/// A parsed CSS length: numeric value plus unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CssLength {
    pub value: f32,
    pub unit: CssUnit,
}

impl CssLength {
    pub fn px(value: f32) -> Self {
        Self {
            value,
            unit: CssUnit::Px,
        }
    }

    /// Parse a length like `"280px"` or `"50%"`. Surrounding whitespace is
    /// ignored; anything else trailing makes the whole string unparseable.
    pub fn parse(input: &str) -> Option<Self> {
        let mut rest = input.trim();
        let length = css_length.parse_next(&mut rest).ok()?;
        rest.is_empty().then_some(length)
    }

    /// The pixel value, for lengths in px.
    pub fn as_px(&self) -> Option<f32> {
        (self.unit == CssUnit::Px).then_some(self.value)
    }
}

impl fmt::Display for CssLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit.as_str())
    }
}

fn css_length(input: &mut &str) -> ModalResult<CssLength> {
    let value = parse_number(input)?;
    // "rem" before "em": alt takes the first match
    let unit = alt((
        "px".value(CssUnit::Px),
        "%".value(CssUnit::Percent),
        "rem".value(CssUnit::Rem),
        "em".value(CssUnit::Em),
    ))
    .parse_next(input)?;
    Ok(CssLength { value, unit })
}

fn parse_number(input: &mut &str) -> ModalResult<f32> {
    let start = *input;
    if input.starts_with('-') {
        *input = &input[1..];
    }
    let _ = take_while(1.., |c: char| c.is_ascii_digit()).parse_next(input)?;
    if input.starts_with('.') {
        *input = &input[1..];
        let _ = take_while::<_, _, winnow::error::ContextError>(0.., |c: char| {
            c.is_ascii_digit()
        })
        .parse_next(input);
    }
    let matched = &start[..start.len() - input.len()];
    matched
        .parse::<f32>()
        .map_err(|_| winnow::error::ErrMode::Backtrack(winnow::error::ContextError::new()))
}
