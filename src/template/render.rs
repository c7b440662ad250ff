//! The `Render` capability: how a value takes part in template substitution.
//!
//! Rendering happens in two phases. [`Render::parse`] turns the text after the
//! `:` of a replacement field into a type-specific spec (or rejects it), and
//! [`Render::render`] writes the value using that spec. Built-in types use
//! [`FormatSpec`]; your own types may use it too, or define their own grammar.

use super::spec::{Align, FormatSpec};
use crate::error::TemplateError;

pub trait Render {
    type Spec;

    fn parse(spec: &str) -> Result<Self::Spec, TemplateError>;

    fn render(&self, spec: &Self::Spec, out: &mut String) -> Result<(), TemplateError>;

    /// Integer value usable as a dynamic width or precision.
    fn as_count(&self) -> Option<usize> {
        None
    }
}

/// Object-safe face of [`Render`], so one argument list can mix types.
pub trait ErasedRender {
    fn render_erased(&self, spec: &str, out: &mut String) -> Result<(), TemplateError>;

    fn erased_count(&self) -> Option<usize>;
}

impl<T: Render + ?Sized> ErasedRender for T {
    fn render_erased(&self, spec: &str, out: &mut String) -> Result<(), TemplateError> {
        let parsed = T::parse(spec)?;
        self.render(&parsed, out)
    }

    fn erased_count(&self) -> Option<usize> {
        self.as_count()
    }
}

impl<T: Render + ?Sized> Render for &T {
    type Spec = T::Spec;

    fn parse(spec: &str) -> Result<Self::Spec, TemplateError> {
        T::parse(spec)
    }

    fn render(&self, spec: &Self::Spec, out: &mut String) -> Result<(), TemplateError> {
        (**self).render(spec, out)
    }

    fn as_count(&self) -> Option<usize> {
        (**self).as_count()
    }
}

// =============================================================================
// Text
// =============================================================================

fn reject_numeric_flags(spec: &FormatSpec, kind: &'static str) -> Result<(), TemplateError> {
    if spec.sign.is_some() || spec.alternate || spec.zero_pad {
        return Err(TemplateError::invalid_spec(
            spec.to_string(),
            format!("sign, '#' and '0' are not allowed for {kind} values"),
        ));
    }
    Ok(())
}

fn render_text(text: &str, spec: &FormatSpec, out: &mut String) -> Result<(), TemplateError> {
    reject_numeric_flags(spec, "string")?;
    match spec.ty {
        None | Some('s') => {
            let body: String = match spec.precision {
                Some(max) => text.chars().take(max).collect(),
                None => text.to_owned(),
            };
            spec.pad(&body, Align::Left, out);
        }
        Some('?') => spec.pad(&format!("{text:?}"), Align::Left, out),
        Some(ty) => return Err(TemplateError::IncompatibleType { ty, kind: "string" }),
    }
    Ok(())
}

impl Render for str {
    type Spec = FormatSpec;

    fn parse(spec: &str) -> Result<FormatSpec, TemplateError> {
        FormatSpec::parse(spec)
    }

    fn render(&self, spec: &FormatSpec, out: &mut String) -> Result<(), TemplateError> {
        render_text(self, spec, out)
    }
}

impl Render for String {
    type Spec = FormatSpec;

    fn parse(spec: &str) -> Result<FormatSpec, TemplateError> {
        FormatSpec::parse(spec)
    }

    fn render(&self, spec: &FormatSpec, out: &mut String) -> Result<(), TemplateError> {
        render_text(self, spec, out)
    }
}

// =============================================================================
// Integers
// =============================================================================

fn render_integer(
    negative: bool,
    magnitude: u128,
    spec: &FormatSpec,
    out: &mut String,
) -> Result<(), TemplateError> {
    if spec.precision.is_some() {
        return Err(TemplateError::invalid_spec(
            spec.to_string(),
            "precision is not allowed for integer values",
        ));
    }

    let (marker, digits) = match spec.ty {
        None | Some('d') => ("", magnitude.to_string()),
        Some('b') => ("0b", format!("{magnitude:b}")),
        Some('B') => ("0B", format!("{magnitude:b}")),
        Some('o') => ("0", format!("{magnitude:o}")),
        Some('x') => ("0x", format!("{magnitude:x}")),
        Some('X') => ("0X", format!("{magnitude:X}")),
        Some('c') => {
            let ch = u32::try_from(magnitude)
                .ok()
                .filter(|_| !negative)
                .and_then(char::from_u32)
                .ok_or_else(|| {
                    TemplateError::invalid_spec("c", format!("{magnitude} is not a valid code point"))
                })?;
            return render_char_text(ch, spec, out);
        }
        Some(ty) => return Err(TemplateError::IncompatibleType { ty, kind: "integer" }),
    };

    // Octal zero needs no leading marker.
    let marker = if spec.alternate && !(marker == "0" && magnitude == 0) {
        marker
    } else {
        ""
    };
    let prefix = format!("{}{marker}", spec.sign_prefix(negative));
    spec.pad_numeric(&prefix, &digits, out);
    Ok(())
}

macro_rules! impl_render_signed {
    ($($ty:ty),*) => {$(
        impl Render for $ty {
            type Spec = FormatSpec;

            fn parse(spec: &str) -> Result<FormatSpec, TemplateError> {
                FormatSpec::parse(spec)
            }

            fn render(&self, spec: &FormatSpec, out: &mut String) -> Result<(), TemplateError> {
                render_integer(*self < 0, self.unsigned_abs() as u128, spec, out)
            }

            fn as_count(&self) -> Option<usize> {
                usize::try_from(*self).ok()
            }
        }
    )*};
}

macro_rules! impl_render_unsigned {
    ($($ty:ty),*) => {$(
        impl Render for $ty {
            type Spec = FormatSpec;

            fn parse(spec: &str) -> Result<FormatSpec, TemplateError> {
                FormatSpec::parse(spec)
            }

            fn render(&self, spec: &FormatSpec, out: &mut String) -> Result<(), TemplateError> {
                render_integer(false, *self as u128, spec, out)
            }

            fn as_count(&self) -> Option<usize> {
                usize::try_from(*self).ok()
            }
        }
    )*};
}

impl_render_signed!(i8, i16, i32, i64, i128, isize);
impl_render_unsigned!(u8, u16, u32, u64, u128, usize);

// =============================================================================
// Floating point
// =============================================================================

/// Rewrites Rust's `1.5e0` exponent into the `1.5e+00` form.
fn normalise_exponent(text: &str, upper: bool) -> String {
    let Some((mantissa, exponent)) = text.split_once('e') else {
        return text.to_owned();
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let sign = if exponent < 0 { '-' } else { '+' };
    let e = if upper { 'E' } else { 'e' };
    format!("{mantissa}{e}{sign}{:02}", exponent.unsigned_abs())
}

fn strip_trailing_zeros(text: &str) -> String {
    let (mantissa, exponent) = match text.find(['e', 'E']) {
        Some(at) => text.split_at(at),
        None => (text, ""),
    };
    if !mantissa.contains('.') {
        return text.to_owned();
    }
    let mantissa = mantissa.trim_end_matches('0').trim_end_matches('.');
    format!("{mantissa}{exponent}")
}

/// Shortest round-trip text: plain digits, unless the exponent form is
/// strictly shorter (`1e+20`, `1e-07`).
fn shortest(fixed: String, scientific: &str) -> String {
    let scientific = normalise_exponent(scientific, false);
    if scientific.len() < fixed.len() {
        scientific
    } else {
        fixed
    }
}

/// Alternate form always shows a decimal point, ahead of any exponent.
fn with_point(digits: String) -> String {
    if digits.contains('.') {
        return digits;
    }
    match digits.find(['e', 'E']) {
        Some(at) => format!("{}.{}", &digits[..at], &digits[at..]),
        None => format!("{digits}."),
    }
}

/// `%g`-style: fixed or scientific, whichever suits the exponent.
fn general(value: f64, precision: usize, alternate: bool, upper: bool) -> String {
    let precision = precision.max(1);
    let scientific = format!("{:.*e}", precision - 1, value);
    let exponent: i64 = scientific
        .split_once('e')
        .and_then(|(_, exp)| exp.parse().ok())
        .unwrap_or(0);

    let text = if exponent < -4 || exponent >= precision as i64 {
        normalise_exponent(&scientific, upper)
    } else {
        let decimals = (precision as i64 - 1 - exponent).max(0) as usize;
        format!("{:.*}", decimals, value)
    };

    if alternate {
        text
    } else {
        strip_trailing_zeros(&text)
    }
}

fn render_float(value: f64, spec: &FormatSpec, out: &mut String) -> Result<(), TemplateError> {
    let upper = matches!(spec.ty, Some('F' | 'E' | 'G'));
    let negative = value.is_sign_negative() && !value.is_nan();
    let magnitude = value.abs();

    if !magnitude.is_finite() {
        let word = match (magnitude.is_nan(), upper) {
            (true, false) => "nan",
            (true, true) => "NAN",
            (false, false) => "inf",
            (false, true) => "INF",
        };
        spec.pad(&format!("{}{word}", spec.sign_prefix(negative)), Align::Right, out);
        return Ok(());
    }

    let digits = match (spec.ty, spec.precision) {
        (None, None) => shortest(magnitude.to_string(), &format!("{magnitude:e}")),
        (None, Some(p)) | (Some('g' | 'G'), Some(p)) => general(magnitude, p, spec.alternate, upper),
        (Some('g' | 'G'), None) => general(magnitude, 6, spec.alternate, upper),
        (Some('f' | 'F'), p) => format!("{:.*}", p.unwrap_or(6), magnitude),
        (Some('e' | 'E'), p) => {
            normalise_exponent(&format!("{:.*e}", p.unwrap_or(6), magnitude), upper)
        }
        (Some(ty), _) => {
            return Err(TemplateError::IncompatibleType { ty, kind: "floating point" });
        }
    };

    let digits = if spec.alternate { with_point(digits) } else { digits };
    spec.pad_numeric(spec.sign_prefix(negative), &digits, out);
    Ok(())
}

impl Render for f64 {
    type Spec = FormatSpec;

    fn parse(spec: &str) -> Result<FormatSpec, TemplateError> {
        FormatSpec::parse(spec)
    }

    fn render(&self, spec: &FormatSpec, out: &mut String) -> Result<(), TemplateError> {
        render_float(*self, spec, out)
    }
}

impl Render for f32 {
    type Spec = FormatSpec;

    fn parse(spec: &str) -> Result<FormatSpec, TemplateError> {
        FormatSpec::parse(spec)
    }

    fn render(&self, spec: &FormatSpec, out: &mut String) -> Result<(), TemplateError> {
        // Shortest form must come from the f32 itself, not its widened value.
        if spec.ty.is_none() && spec.precision.is_none() && self.is_finite() {
            let negative = self.is_sign_negative();
            let magnitude = self.abs();
            let digits = shortest(magnitude.to_string(), &format!("{magnitude:e}"));
            let digits = if spec.alternate { with_point(digits) } else { digits };
            spec.pad_numeric(spec.sign_prefix(negative), &digits, out);
            return Ok(());
        }
        render_float(f64::from(*self), spec, out)
    }
}

// =============================================================================
// bool and char
// =============================================================================

fn render_char_text(ch: char, spec: &FormatSpec, out: &mut String) -> Result<(), TemplateError> {
    let mut buf = [0u8; 4];
    let text = FormatSpec {
        ty: None,
        ..spec.clone()
    };
    render_text(ch.encode_utf8(&mut buf), &text, out)
}

impl Render for bool {
    type Spec = FormatSpec;

    fn parse(spec: &str) -> Result<FormatSpec, TemplateError> {
        FormatSpec::parse(spec)
    }

    fn render(&self, spec: &FormatSpec, out: &mut String) -> Result<(), TemplateError> {
        match spec.ty {
            None | Some('s') => render_text(if *self { "true" } else { "false" }, spec, out),
            Some('b' | 'B' | 'd' | 'o' | 'x' | 'X') => render_integer(false, *self as u128, spec, out),
            Some(ty) => Err(TemplateError::IncompatibleType { ty, kind: "bool" }),
        }
    }
}

impl Render for char {
    type Spec = FormatSpec;

    fn parse(spec: &str) -> Result<FormatSpec, TemplateError> {
        FormatSpec::parse(spec)
    }

    fn render(&self, spec: &FormatSpec, out: &mut String) -> Result<(), TemplateError> {
        match spec.ty {
            None | Some('c') => render_char_text(*self, spec, out),
            Some('?') => render_text(&format!("{self:?}"), &FormatSpec { ty: None, ..spec.clone() }, out),
            Some('b' | 'B' | 'd' | 'o' | 'x' | 'X') => {
                render_integer(false, u128::from(u32::from(*self)), spec, out)
            }
            Some(ty) => Err(TemplateError::IncompatibleType { ty, kind: "char" }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn show<T: Render + ?Sized>(value: &T, spec: &str) -> String {
        let mut out = String::new();
        value.render_erased(spec, &mut out).unwrap();
        out
    }

    fn fails<T: Render + ?Sized>(value: &T, spec: &str) -> TemplateError {
        let mut out = String::new();
        value.render_erased(spec, &mut out).unwrap_err()
    }

    #[test]
    fn test_text() {
        assert_eq!(show("Item", "<12"), "Item        ");
        assert_eq!(show("Price", ">10"), "     Price");
        assert_eq!(show("truncate me", ".5"), "trunc");
        assert_eq!(show(&String::from("a\"b"), "?"), "\"a\\\"b\"");
    }

    #[test]
    fn test_text_rejects_integer_type() {
        assert_eq!(
            fails("I am a string", "d"),
            TemplateError::IncompatibleType { ty: 'd', kind: "string" }
        );
        assert!(matches!(fails("text", "+"), TemplateError::InvalidSpec { .. }));
    }

    #[test]
    fn test_integer_bases() {
        assert_eq!(show(&42, ""), "42");
        assert_eq!(show(&42, "b"), "101010");
        assert_eq!(show(&42, "#x"), "0x2a");
        assert_eq!(show(&42, "#X"), "0X2A");
        assert_eq!(show(&42, "#o"), "052");
        assert_eq!(show(&0, "#o"), "0");
        assert_eq!(show(&42, "#010b"), "0b00101010");
        assert_eq!(show(&-42, "#x"), "-0x2a");
        assert_eq!(show(&i64::MIN, "x"), "-8000000000000000");
        assert_eq!(show(&7u8, "+"), "+7");
        assert_eq!(show(&7u8, " "), " 7");
        assert_eq!(show(&65, "c"), "A");
    }

    #[test]
    fn test_integer_rejects_precision_and_string_type() {
        assert!(matches!(fails(&1, ".2"), TemplateError::InvalidSpec { .. }));
        assert_eq!(
            fails(&1, "s"),
            TemplateError::IncompatibleType { ty: 's', kind: "integer" }
        );
        assert!(fails(&-1, "c").to_string().contains("code point"));
    }

    #[test]
    fn test_float_fixed_and_shortest() {
        assert_eq!(show(&std::f64::consts::PI, ".4f"), "3.1416");
        assert_eq!(show(&25.8, ">10.2f"), "     25.80");
        assert_eq!(show(&5.0, ""), "5");
        assert_eq!(show(&2.5, ""), "2.5");
        assert_eq!(show(&1.0f32, ""), "1");
        assert_eq!(show(&0.1f32, ""), "0.1");
        assert_eq!(show(&-1.5, "+08.2f"), "-0001.50");
        assert_eq!(show(&1.0, "f"), "1.000000");
    }

    #[test]
    fn test_float_shortest_switches_to_exponent_when_shorter() {
        assert_eq!(show(&1e300, ""), "1e+300");
        assert_eq!(show(&1e20, ""), "1e+20");
        assert_eq!(show(&1e-7, ""), "1e-07");
        assert_eq!(show(&-2.5e-10, ""), "-2.5e-10");
        assert_eq!(show(&100.0, ""), "100");
        assert_eq!(show(&1234567.0, ""), "1234567");
        assert_eq!(show(&0.001, ""), "0.001");
        assert_eq!(show(&1e20f32, ""), "1e+20");
        assert_eq!(show(&1e-7f32, ""), "1e-07");
        assert_eq!(show(&1e20, "#"), "1.e+20");
        assert_eq!(show(&5.0, "#"), "5.");
    }

    #[test]
    fn test_float_scientific_and_general() {
        assert_eq!(show(&std::f64::consts::PI, ".4e"), "3.1416e+00");
        assert_eq!(show(&0.00012, "E"), "1.200000E-04");
        assert_eq!(show(&std::f64::consts::PI, ".2"), "3.1");
        assert_eq!(show(&1234567.0, "g"), "1.23457e+06");
        assert_eq!(show(&0.5, "g"), "0.5");
        assert_eq!(show(&100.0, ".3g"), "100");
    }

    #[test]
    fn test_float_non_finite() {
        assert_eq!(show(&f64::INFINITY, ""), "inf");
        assert_eq!(show(&f64::NEG_INFINITY, ">6"), "  -inf");
        assert_eq!(show(&f64::NAN, "F"), "NAN");
        assert_eq!(show(&f64::NAN, "06"), "   nan");
    }

    #[test]
    fn test_float_rejects_radix() {
        assert_eq!(
            fails(&1.0, "x"),
            TemplateError::IncompatibleType { ty: 'x', kind: "floating point" }
        );
    }

    #[test]
    fn test_bool_and_char() {
        assert_eq!(show(&true, ""), "true");
        assert_eq!(show(&false, "^7"), " false ");
        assert_eq!(show(&true, "d"), "1");
        assert_eq!(show(&'x', "*>3"), "**x");
        assert_eq!(show(&'A', "#x"), "0x41");
        assert_eq!(show(&'\n', "?"), "'\\n'");
        assert_eq!(
            fails(&'x', "e"),
            TemplateError::IncompatibleType { ty: 'e', kind: "char" }
        );
    }

    #[test]
    fn test_as_count() {
        assert_eq!(12u8.as_count(), Some(12));
        assert_eq!((-1i32).as_count(), None);
        assert_eq!(1.5f64.as_count(), None);
        assert_eq!("12".as_count(), None);
    }
}
