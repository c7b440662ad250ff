use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TemplateError;
use crate::template::{Align, FormatSpec, Render};

/// A coordinate pair that knows how to render itself as `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Render for Point {
    type Spec = FormatSpec;

    // Only layout is meaningful for a point: fill, alignment, width.
    fn parse(spec: &str) -> Result<FormatSpec, TemplateError> {
        let parsed = FormatSpec::parse(spec)?;
        if !parsed.is_layout_only() {
            return Err(TemplateError::invalid_spec(
                spec,
                "a point only accepts fill, alignment and width",
            ));
        }
        Ok(parsed)
    }

    fn render(&self, spec: &FormatSpec, out: &mut String) -> Result<(), TemplateError> {
        spec.pad(&self.to_string(), Align::Left, out);
        Ok(())
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("({}, {})", self.x, self.y))
    }
}

/// One line of a shopping list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub price: f64,
}

impl Item {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }
}
