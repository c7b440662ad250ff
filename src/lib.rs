//! Formatting & Contiguous Views
//!
//! This crate backs two small lessons:
//!
//! 1. **Text formatting** - a runtime template engine with positional,
//!    indexed and named arguments, fill/align/width, radix and precision,
//!    plus a [`Render`](template::Render) hook for your own types.
//! 2. **Bounds-safe views** - [`Span`](span::Span), [`SpanMut`](span::SpanMut)
//!    and [`FixedSpan`](span::FixedSpan), non-owning views over a `Vec`, an
//!    array or a boxed slice, with `first` / `last` / `subspan`.
//!
//! ## Running the lessons
//!
//! ```bash
//! cargo run --bin format_examples
//! cargo run --bin span_test_cases
//! cargo run --bin span_test_cases -- my_data.toml
//! ```

pub mod config;
pub mod demo;
pub mod error;
pub mod logging;
pub mod model;
pub mod span;
pub mod template;

pub use error::{ConfigError, DemoError, SpanError, TemplateError};
pub use span::{FixedSpan, Span, SpanMut};
pub use template::{format, format_to, formatted_size, Args, Render, Template};
