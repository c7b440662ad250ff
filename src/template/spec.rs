//! Standard format specifier:
//! `[[fill]align][sign]['#']['0'][width]['.' precision][type]`

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::TemplateError;

lazy_static! {
    static ref SPEC_RE: Regex = Regex::new(
        r"^(?:(?P<fill>[^{}])?(?P<align>[<>^]))?(?P<sign>[+\- ])?(?P<alt>#)?(?P<zero>0)?(?P<width>[0-9]+)?(?:\.(?P<precision>[0-9]+))?(?P<ty>[a-zA-Z?])?$"
    )
    .expect("format spec pattern is valid");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sign {
    Plus,
    #[default]
    Minus,
    Space,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatSpec {
    pub fill: char,
    pub align: Option<Align>,
    pub sign: Option<Sign>,
    pub alternate: bool,
    pub zero_pad: bool,
    pub width: Option<usize>,
    pub precision: Option<usize>,
    pub ty: Option<char>,
}

impl Default for FormatSpec {
    fn default() -> Self {
        Self {
            fill: ' ',
            align: None,
            sign: None,
            alternate: false,
            zero_pad: false,
            width: None,
            precision: None,
            ty: None,
        }
    }
}

impl FormatSpec {
    pub fn parse(spec: &str) -> Result<Self, TemplateError> {
        if spec.is_empty() {
            return Ok(Self::default());
        }

        let caps = SPEC_RE
            .captures(spec)
            .ok_or_else(|| TemplateError::invalid_spec(spec, "unrecognised specifier"))?;

        let number = |name: &str| -> Result<Option<usize>, TemplateError> {
            caps.name(name)
                .map(|m| {
                    m.as_str()
                        .parse::<usize>()
                        .map_err(|_| TemplateError::invalid_spec(spec, format!("{name} is too large")))
                })
                .transpose()
        };

        let align = caps.name("align").map(|m| match m.as_str() {
            "<" => Align::Left,
            ">" => Align::Right,
            _ => Align::Center,
        });
        let sign = caps.name("sign").map(|m| match m.as_str() {
            "+" => Sign::Plus,
            "-" => Sign::Minus,
            _ => Sign::Space,
        });

        let width = number("width")?;
        if width == Some(0) {
            return Err(TemplateError::invalid_spec(spec, "width must be positive"));
        }

        Ok(Self {
            fill: caps
                .name("fill")
                .and_then(|m| m.as_str().chars().next())
                .unwrap_or(' '),
            align,
            sign,
            alternate: caps.name("alt").is_some(),
            zero_pad: caps.name("zero").is_some(),
            width,
            precision: number("precision")?,
            ty: caps.name("ty").and_then(|m| m.as_str().chars().next()),
        })
    }

    /// True when nothing beyond fill, alignment and width was requested.
    pub fn is_layout_only(&self) -> bool {
        self.sign.is_none()
            && !self.alternate
            && !self.zero_pad
            && self.precision.is_none()
            && self.ty.is_none()
    }

    /// Appends `body` to `out`, padded to `width` characters.
    pub fn pad(&self, body: &str, default_align: Align, out: &mut String) {
        let len = body.chars().count();
        let padding = match self.width {
            Some(width) if width > len => width - len,
            _ => {
                out.push_str(body);
                return;
            }
        };

        let (before, after) = match self.align.unwrap_or(default_align) {
            Align::Left => (0, padding),
            Align::Right => (padding, 0),
            Align::Center => (padding / 2, padding - padding / 2),
        };
        out.extend(std::iter::repeat(self.fill).take(before));
        out.push_str(body);
        out.extend(std::iter::repeat(self.fill).take(after));
    }

    /// Pads a numeric body. `prefix` holds the sign and any radix marker;
    /// zero padding goes between it and the digits.
    pub fn pad_numeric(&self, prefix: &str, digits: &str, out: &mut String) {
        if self.zero_pad && self.align.is_none() {
            let len = prefix.chars().count() + digits.chars().count();
            let zeros = self.width.map_or(0, |width| width.saturating_sub(len));
            out.push_str(prefix);
            out.extend(std::iter::repeat('0').take(zeros));
            out.push_str(digits);
            return;
        }
        let body = format!("{prefix}{digits}");
        self.pad(&body, Align::Right, out);
    }

    pub fn sign_prefix(&self, negative: bool) -> &'static str {
        match (negative, self.sign.unwrap_or_default()) {
            (true, _) => "-",
            (false, Sign::Plus) => "+",
            (false, Sign::Space) => " ",
            (false, Sign::Minus) => "",
        }
    }
}

impl fmt::Display for FormatSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(align) = self.align {
            let align = match align {
                Align::Left => '<',
                Align::Right => '>',
                Align::Center => '^',
            };
            write!(f, "{}{align}", self.fill)?;
        }
        match self.sign {
            Some(Sign::Plus) => f.write_str("+")?,
            Some(Sign::Minus) => f.write_str("-")?,
            Some(Sign::Space) => f.write_str(" ")?,
            None => {}
        }
        if self.alternate {
            f.write_str("#")?;
        }
        if self.zero_pad {
            f.write_str("0")?;
        }
        if let Some(width) = self.width {
            write!(f, "{width}")?;
        }
        if let Some(precision) = self.precision {
            write!(f, ".{precision}")?;
        }
        if let Some(ty) = self.ty {
            write!(f, "{ty}")?;
        }
        Ok(())
    }
}
