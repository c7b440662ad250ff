//! Runtime string templates.
//!
//! ```
//! use format_span::{render, template::Args, format};
//!
//! let greeting = render!("{}, your final score is {} points!", "Ming", 95).unwrap();
//! assert_eq!(greeting, "Ming, your final score is 95 points!");
//!
//! let args = Args::new().arg(&"first").arg(&"second");
//! let text = format("{0}, again {0}, then {1}", &args).unwrap();
//! assert_eq!(text, "first, again first, then second");
//! ```
//!
//! Unlike `format!`, the template is only known at run time, so a specifier
//! that does not suit its argument (`{:d}` on text) is reported as an
//! [`TemplateError::IncompatibleType`] instead of a compile error.

pub mod render;
pub mod spec;

use std::iter::Peekable;
use std::str::{CharIndices, FromStr};

use tracing::debug;

use crate::error::TemplateError;

pub use render::{ErasedRender, Render};
pub use spec::{Align, FormatSpec, Sign};

/// Formats `template` with `args` and returns the result.
///
/// ```
/// let text = format_span::render!("{:*^9}", "mid").unwrap();
/// assert_eq!(text, "***mid***");
/// ```
#[macro_export]
macro_rules! render {
    ($template:expr $(, $arg:expr)* $(,)?) => {
        $crate::template::format(
            $template,
            &$crate::template::Args::new()$(.arg(&$arg))*,
        )
    };
}

// =============================================================================
// Arguments
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
enum ArgRef {
    Index(usize),
    Name(String),
}

/// Values substituted into a template, by position or by name.
#[derive(Default)]
pub struct Args<'a> {
    positional: Vec<&'a dyn ErasedRender>,
    named: Vec<(&'a str, &'a dyn ErasedRender)>,
}

impl<'a> Args<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arg<T: ErasedRender>(mut self, value: &'a T) -> Self {
        self.positional.push(value);
        self
    }

    pub fn named<T: ErasedRender>(mut self, name: &'a str, value: &'a T) -> Self {
        self.named.push((name, value));
        self
    }

    pub fn push(&mut self, value: &'a dyn ErasedRender) {
        self.positional.push(value);
    }

    /// Number of arguments, positional and named.
    pub fn len(&self) -> usize {
        self.positional.len() + self.named.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.named.is_empty()
    }

    fn lookup(&self, arg: &ArgRef) -> Result<&'a dyn ErasedRender, TemplateError> {
        match arg {
            ArgRef::Index(index) => {
                self.positional
                    .get(*index)
                    .copied()
                    .ok_or(TemplateError::MissingArgument {
                        index: *index,
                        count: self.positional.len(),
                    })
            }
            ArgRef::Name(name) => self
                .named
                .iter()
                .find(|(candidate, _)| *candidate == name.as_str())
                .map(|(_, value)| *value)
                .ok_or_else(|| TemplateError::UnknownName { name: name.clone() }),
        }
    }
}

// =============================================================================
// Parsed template
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
enum SpecPiece {
    Text(String),
    Nested(ArgRef),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field { arg: ArgRef, spec: Vec<SpecPiece> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Indexing {
    Unknown,
    Automatic,
    Manual,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
    arg_count: usize,
}

impl Template {
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let template = TemplateParser::new(source).run()?;
        debug!(
            fields = template.field_count(),
            arg_count = template.arg_count,
            "parsed template"
        );
        Ok(template)
    }

    /// Number of positional arguments the template refers to.
    pub fn arg_count(&self) -> usize {
        self.arg_count
    }

    pub fn field_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|segment| matches!(segment, Segment::Field { .. }))
            .count()
    }

    pub fn render(&self, args: &Args<'_>) -> Result<String, TemplateError> {
        let mut out = String::new();
        self.render_to(&mut out, args)?;
        Ok(out)
    }

    /// Appends the rendered text to `out`.
    pub fn render_to(&self, out: &mut String, args: &Args<'_>) -> Result<(), TemplateError> {
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field { arg, spec } => {
                    let value = args.lookup(arg)?;
                    let spec = resolve_spec(spec, args)?;
                    value.render_erased(&spec, out)?;
                }
            }
        }
        Ok(())
    }
}

impl FromStr for Template {
    type Err = TemplateError;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        Self::parse(source)
    }
}

/// Splices dynamic width and precision values into the spec text.
fn resolve_spec(pieces: &[SpecPiece], args: &Args<'_>) -> Result<String, TemplateError> {
    let mut spec = String::new();
    for piece in pieces {
        match piece {
            SpecPiece::Text(text) => spec.push_str(text),
            SpecPiece::Nested(arg) => {
                let what = if spec.ends_with('.') { "precision" } else { "width" };
                let count = args
                    .lookup(arg)?
                    .erased_count()
                    .ok_or(TemplateError::InvalidDynamicCount { what })?;
                // Width 0 means no padding; its digit would read as the zero flag.
                if what == "precision" || count > 0 {
                    spec.push_str(&count.to_string());
                }
            }
        }
    }
    Ok(spec)
}

struct TemplateParser<'t> {
    chars: Peekable<CharIndices<'t>>,
    indexing: Indexing,
    next_auto: usize,
    arg_count: usize,
}

impl<'t> TemplateParser<'t> {
    fn new(source: &'t str) -> Self {
        Self {
            chars: source.char_indices().peekable(),
            indexing: Indexing::Unknown,
            next_auto: 0,
            arg_count: 0,
        }
    }

    fn run(mut self) -> Result<Template, TemplateError> {
        let mut segments = Vec::new();
        let mut literal = String::new();

        while let Some((offset, ch)) = self.chars.next() {
            match ch {
                '{' if self.eat('{') => literal.push('{'),
                '{' => {
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(self.field(offset)?);
                }
                '}' if self.eat('}') => literal.push('}'),
                '}' => return Err(TemplateError::UnmatchedBrace { brace: '}', offset }),
                other => literal.push(other),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Template {
            segments,
            arg_count: self.arg_count,
        })
    }

    fn eat(&mut self, expected: char) -> bool {
        self.chars.next_if(|&(_, ch)| ch == expected).is_some()
    }

    /// Parses the remainder of a field whose `{` sat at `open`.
    fn field(&mut self, open: usize) -> Result<Segment, TemplateError> {
        let (id, terminator) = self.arg_id(open)?;
        let arg = self.resolve(&id, open)?;

        let mut spec = Vec::new();
        if terminator == ':' {
            let mut text = String::new();
            loop {
                match self.chars.next() {
                    Some((_, '}')) => break,
                    Some((offset, '{')) => {
                        if !text.is_empty() {
                            spec.push(SpecPiece::Text(std::mem::take(&mut text)));
                        }
                        let (id, terminator) = self.arg_id(offset)?;
                        if terminator != '}' {
                            return Err(TemplateError::InvalidArgId { id, offset });
                        }
                        spec.push(SpecPiece::Nested(self.resolve(&id, offset)?));
                    }
                    Some((_, ch)) => text.push(ch),
                    None => return Err(TemplateError::UnclosedPlaceholder { offset: open }),
                }
            }
            if !text.is_empty() {
                spec.push(SpecPiece::Text(text));
            }
        }

        Ok(Segment::Field { arg, spec })
    }

    /// Reads an argument id up to `:` or `}` and reports which one ended it.
    fn arg_id(&mut self, open: usize) -> Result<(String, char), TemplateError> {
        let mut id = String::new();
        for (offset, ch) in self.chars.by_ref() {
            match ch {
                ':' | '}' => return Ok((id, ch)),
                '{' => {
                    id.push(ch);
                    return Err(TemplateError::InvalidArgId { id, offset });
                }
                other => id.push(other),
            }
        }
        Err(TemplateError::UnclosedPlaceholder { offset: open })
    }

    fn resolve(&mut self, id: &str, offset: usize) -> Result<ArgRef, TemplateError> {
        if id.is_empty() {
            self.switch_to(Indexing::Automatic, offset)?;
            let index = self.next_auto;
            self.next_auto += 1;
            self.arg_count = self.arg_count.max(index + 1);
            return Ok(ArgRef::Index(index));
        }

        if id.bytes().all(|b| b.is_ascii_digit()) {
            if id.len() > 1 && id.starts_with('0') {
                return Err(TemplateError::InvalidArgId {
                    id: id.to_owned(),
                    offset,
                });
            }
            self.switch_to(Indexing::Manual, offset)?;
            let index: usize = id.parse().map_err(|_| TemplateError::InvalidArgId {
                id: id.to_owned(),
                offset,
            })?;
            self.arg_count = self.arg_count.max(index + 1);
            return Ok(ArgRef::Index(index));
        }

        let mut chars = id.chars();
        let starts_well = chars
            .next()
            .is_some_and(|first| first.is_alphabetic() || first == '_');
        if starts_well && chars.all(|ch| ch.is_alphanumeric() || ch == '_') {
            return Ok(ArgRef::Name(id.to_owned()));
        }

        Err(TemplateError::InvalidArgId {
            id: id.to_owned(),
            offset,
        })
    }

    fn switch_to(&mut self, mode: Indexing, offset: usize) -> Result<(), TemplateError> {
        match self.indexing {
            Indexing::Unknown => {
                self.indexing = mode;
                Ok(())
            }
            current if current == mode => Ok(()),
            _ => Err(TemplateError::MixedIndexing { offset }),
        }
    }
}

// =============================================================================
// One-shot helpers
// =============================================================================

pub fn format(template: &str, args: &Args<'_>) -> Result<String, TemplateError> {
    Template::parse(template)?.render(args)
}

/// Appends to `out` instead of allocating a new string.
pub fn format_to(out: &mut String, template: &str, args: &Args<'_>) -> Result<(), TemplateError> {
    Template::parse(template)?.render_to(out, args)
}

/// Length in bytes of the text [`format`] would produce.
pub fn formatted_size(template: &str, args: &Args<'_>) -> Result<usize, TemplateError> {
    format(template, args).map(|text| text.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render;

    #[test]
    fn test_positional_arguments_left_to_right() {
        let text = render!("{} meets {}.", "Alice", "Bob").unwrap();
        assert_eq!(text, "Alice meets Bob.");
    }

    #[test]
    fn test_indexed_arguments_can_repeat() {
        let text = render!(
            "Reusing arguments: {0}, again {0}, the second is {1}",
            "first",
            "second"
        )
        .unwrap();
        assert_eq!(text, "Reusing arguments: first, again first, the second is second");
    }

    #[test]
    fn test_named_arguments() {
        let level = 99;
        let args = Args::new().named("player", &"Alex").named("level", &level);
        let text = format("Player: {player}, Level: {level:>4}", &args).unwrap();
        assert_eq!(text, "Player: Alex, Level:   99");
    }

    #[test]
    fn test_escaped_braces() {
        let text = render!("{{}} holds {}", 1).unwrap();
        assert_eq!(text, "{} holds 1");
    }

    #[test]
    fn test_mixed_indexing_is_rejected() {
        assert_eq!(
            Template::parse("{} and {0}"),
            Err(TemplateError::MixedIndexing { offset: 7 })
        );
        assert!(Template::parse("{1} and {}").is_err());
        assert!(Template::parse("{} and {name}").is_ok());
    }

    #[test]
    fn test_structural_errors() {
        assert_eq!(
            Template::parse("oops }"),
            Err(TemplateError::UnmatchedBrace { brace: '}', offset: 5 })
        );
        assert_eq!(
            Template::parse("ab {0:>10"),
            Err(TemplateError::UnclosedPlaceholder { offset: 3 })
        );
        assert_eq!(
            Template::parse("{"),
            Err(TemplateError::UnclosedPlaceholder { offset: 0 })
        );
        assert!(matches!(
            Template::parse("{1x}"),
            Err(TemplateError::InvalidArgId { .. })
        ));
    }

    #[test]
    fn test_leading_zero_index_is_rejected() {
        assert_eq!(
            Template::parse("a {00}"),
            Err(TemplateError::InvalidArgId { id: "00".into(), offset: 2 })
        );
        assert!(Template::parse("{:{01}}").is_err());
        assert_eq!(render!("{0}{10}", 'a', 1, 2, 3, 4, 5, 6, 7, 8, 9, 'k').unwrap(), "ak");
    }

    #[test]
    fn test_missing_and_unknown_arguments() {
        assert_eq!(
            render!("{} {}", 1),
            Err(TemplateError::MissingArgument { index: 1, count: 1 })
        );
        assert_eq!(
            format("{who}", &Args::new()),
            Err(TemplateError::UnknownName { name: "who".into() })
        );
    }

    #[test]
    fn test_incompatible_spec_is_reported() {
        assert_eq!(
            render!("{:d}", "I am a string"),
            Err(TemplateError::IncompatibleType { ty: 'd', kind: "string" })
        );
    }

    #[test]
    fn test_dynamic_width_and_precision() {
        let text = render!("[{:<{}}|{:>{}.{}f}]", "Apple", 8, 2.5, 7, 2).unwrap();
        assert_eq!(text, "[Apple   |   2.50]");

        let args = Args::new().arg(&3.14159).named("p", &3usize);
        assert_eq!(format("{0:.{p}f}", &args).unwrap(), "3.142");

        assert_eq!(
            render!("{:{}}", "x", "wide"),
            Err(TemplateError::InvalidDynamicCount { what: "width" })
        );
        assert_eq!(
            render!("{:.{}}", 1.5, -1),
            Err(TemplateError::InvalidDynamicCount { what: "precision" })
        );
    }

    #[test]
    fn test_dynamic_zero_width_means_no_padding() {
        assert_eq!(render!("[{:>{}}]", "x", 0usize).unwrap(), "[x]");
        assert_eq!(render!("[{:{}}]", "x", 0usize).unwrap(), "[x]");
        assert_eq!(render!("[{:*^{}}]", 42, 0).unwrap(), "[42]");
        assert_eq!(render!("[{:{}.{}f}]", 2.5, 0, 1).unwrap(), "[2.5]");
        assert_eq!(render!("[{:0{}}]", 7, 3).unwrap(), "[007]");
        assert_eq!(render!("[{:.{}f}]", 2.7, 0).unwrap(), "[3]");
        assert_eq!(render!("[{:.{}}]", "abc", 0).unwrap(), "[]");
    }

    #[test]
    fn test_arg_count_and_field_count() {
        let template: Template = "{:<{}} {} {{literal}}".parse().unwrap();
        assert_eq!(template.arg_count(), 3);
        assert_eq!(template.field_count(), 2);

        let template = Template::parse("{2} {0}").unwrap();
        assert_eq!(template.arg_count(), 3);
    }

    #[test]
    fn test_template_is_reusable() {
        let row = Template::parse("{:<12}{:>10.2f}").unwrap();
        let apple = row.render(&Args::new().arg(&"Apple").arg(&5.0)).unwrap();
        let cake = row.render(&Args::new().arg(&"Cake").arg(&25.8)).unwrap();
        assert_eq!(apple, "Apple             5.00");
        assert_eq!(cake, "Cake             25.80");
        assert_eq!(apple.len(), 22);
    }

    #[test]
    fn test_format_to_appends_and_formatted_size() {
        let mut out = String::from("> ");
        format_to(&mut out, "{:#x}", &Args::new().arg(&255)).unwrap();
        assert_eq!(out, "> 0xff");

        let size = formatted_size("{:*^20}", &Args::new().arg(&"mid")).unwrap();
        assert_eq!(size, 20);
    }

    #[test]
    fn test_push_accepts_trait_objects() {
        let values: [Box<dyn ErasedRender>; 3] = [Box::new(1), Box::new("two"), Box::new(3.5)];
        let mut args = Args::new();
        for value in &values {
            args.push(value.as_ref());
        }
        assert_eq!(args.len(), 3);
        assert_eq!(format("{} {} {}", &args).unwrap(), "1 two 3.5");
    }

    #[test]
    fn test_len_counts_named_arguments() {
        let args = Args::new().named("level", &99);
        assert_eq!(args.len(), 1);
        assert!(!args.is_empty());

        let args = Args::new().arg(&1).named("level", &99);
        assert_eq!(args.len(), 2);

        let args = Args::new();
        assert_eq!(args.len(), 0);
        assert!(args.is_empty());
    }
}
