//! Formatting lesson: templates, alignment, number bases, custom types.

use std::f64::consts::PI;
use std::io::Write;

use colored::Colorize;
use tracing::debug;

use super::{banner, heading};
use crate::config::FormatConfig;
use crate::error::DemoError;
use crate::render;
use crate::template::{self, Args, Template};

pub fn run<W: Write>(out: &mut W, config: &FormatConfig) -> Result<(), DemoError> {
    banner(out, "Formatting lesson")?;
    writeln!(out)?;

    basic_usage(out, config)?;
    type_safety(out)?;
    alignment(out, config)?;
    numbers(out, config)?;
    custom_type(out, config)?;
    fill_characters(out)?;
    positional_arguments(out)?;
    comparison(out, config)?;
    Ok(())
}

pub fn basic_usage<W: Write>(out: &mut W, config: &FormatConfig) -> Result<(), DemoError> {
    heading(out, "Basic usage")?;
    let message = render!(
        "{}, your final score is {} points!",
        config.student_name,
        config.score
    )?;
    writeln!(out, "{message}\n")?;
    Ok(())
}

pub fn type_safety<W: Write>(out: &mut W) -> Result<(), DemoError> {
    heading(out, "Type safety")?;
    writeln!(out, "The native macro refuses this at compile time (left commented out):")?;
    writeln!(out, "    format!(\"{{:x}}\", \"I am a string\");")?;
    // let _ = format!("{:x}", "I am a string");

    match render!("{:d}", "I am a string") {
        Ok(text) => writeln!(out, "Rendered: {text}")?,
        Err(err) => {
            debug!(%err, "template rejected");
            writeln!(out, "A runtime template reports it instead: {}", err.to_string().red())?;
        }
    }
    writeln!(out)?;
    Ok(())
}

pub fn alignment<W: Write>(out: &mut W, config: &FormatConfig) -> Result<(), DemoError> {
    heading(out, "Alignment and padding")?;
    let header = Template::parse("{:<{}}{:>{}}")?;
    let row = Template::parse("{:<{}}{:>{}.{}f}")?;

    let line = header.render(
        &Args::new()
            .arg(&"Item")
            .arg(&config.name_width)
            .arg(&"Price")
            .arg(&config.price_width),
    )?;
    writeln!(out, "{line}")?;
    writeln!(out, "{}", "-".repeat(config.name_width + config.price_width))?;

    for item in &config.items {
        let line = row.render(
            &Args::new()
                .arg(&item.name)
                .arg(&config.name_width)
                .arg(&item.price)
                .arg(&config.price_width)
                .arg(&config.price_precision),
        )?;
        writeln!(out, "{line}")?;
    }
    writeln!(out)?;
    Ok(())
}

pub fn numbers<W: Write>(out: &mut W, config: &FormatConfig) -> Result<(), DemoError> {
    heading(out, "Number formatting")?;
    let number = config.number;
    writeln!(out, "{}", render!("PI ≈ {:.4f}", PI)?)?;
    writeln!(out, "{}", render!("Scientific: {:.3e}", PI * 1000.0)?)?;
    writeln!(out, "{}", render!("Decimal: {}", number)?)?;
    writeln!(out, "{}", render!("Binary: {:b}", number)?)?;
    writeln!(out, "{}", render!("Hexadecimal with prefix: {:#x}", number)?)?;
    writeln!(out, "{}", render!("Octal with prefix: {:#o}", number)?)?;
    writeln!(out, "{}", render!("Zero-padded binary: {:#010b}", number)?)?;
    writeln!(out)?;
    Ok(())
}

pub fn custom_type<W: Write>(out: &mut W, config: &FormatConfig) -> Result<(), DemoError> {
    heading(out, "Custom type formatting")?;
    let p = config.point;
    writeln!(out, "{}", render!("The point is: {}", p)?)?;
    writeln!(out, "{}", render!("Right-aligned: [{:>12}]", p)?)?;
    writeln!(out, "Through Display and format!: [{p:^12}]")?;
    writeln!(out)?;
    Ok(())
}

pub fn fill_characters<W: Write>(out: &mut W) -> Result<(), DemoError> {
    heading(out, "Fill characters")?;
    writeln!(out, "{}", render!("{:*^20}", "center")?)?;
    writeln!(out, "{}", render!("{:->20}", "right")?)?;
    writeln!(out, "{}", render!("{:-<20}", "left")?)?;
    writeln!(out)?;
    Ok(())
}

pub fn positional_arguments<W: Write>(out: &mut W) -> Result<(), DemoError> {
    heading(out, "Positional arguments")?;
    let text = render!(
        "Reusing arguments: {0}, again {0}, the second is {1}",
        "first",
        "second"
    )?;
    writeln!(out, "{text}\n")?;
    Ok(())
}

pub fn comparison<W: Write>(out: &mut W, config: &FormatConfig) -> Result<(), DemoError> {
    heading(out, "Comparison")?;
    let name = config.player.as_str();
    let level = config.level;

    write!(out, "write! style: ")?;
    writeln!(out, "Player: {}, Level: {}", name, level)?;

    write!(out, "piecewise style: ")?;
    out.write_all(b"Player: ")?;
    out.write_all(name.as_bytes())?;
    out.write_all(b", Level: ")?;
    out.write_all(level.to_string().as_bytes())?;
    out.write_all(b"\n")?;

    write!(out, "template style: ")?;
    let args = Args::new().named("name", &name).named("level", &level);
    writeln!(out, "{}", template::format("Player: {name}, Level: {level}", &args)?)?;
    Ok(())
}
