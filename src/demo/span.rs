//! View lesson: one interface over many storage kinds, sub-ranges, fixed
//! lengths, and why a view must not outlive its storage.

use std::io::{self, Write};

use colored::Colorize;
use itertools::Itertools;
use tracing::debug;

use super::{banner, heading};
use crate::config::SpanConfig;
use crate::error::DemoError;
use crate::span::{FixedSpan, Span, SpanMut};

/// Accepts a `Vec`, an array or a boxed slice alike.
pub fn inspect<W: Write>(out: &mut W, troops: Span<'_, i32>) -> io::Result<()> {
    writeln!(
        out,
        "Reporting, General! A phalanx of {} soldiers has arrived. They are: {}",
        troops.len(),
        troops.iter().join(" ")
    )
}

/// Only ever sees exactly three channels.
pub fn process_rgb_color<W: Write>(out: &mut W, color: FixedSpan<'_, f32, 3>) -> io::Result<()> {
    writeln!(
        out,
        "Processing color: R={}, G={}, B={}",
        color[0], color[1], color[2]
    )
}

pub fn demo_slice_operations<W: Write>(out: &mut W, data: Span<'_, i32>) -> Result<(), DemoError> {
    writeln!(out, "Original data: {}", data.iter().join(" "))?;

    let middle = data.try_subspan(1, 3)?;
    writeln!(out, "Middle slice (subspan(1, 3)): {}", middle.iter().join(" "))?;

    let front = data.try_first(2)?;
    writeln!(out, "Front slice (first(2)): {}", front.iter().join(" "))?;

    let back = data.try_last(2)?;
    writeln!(out, "Back slice (last(2)): {}", back.iter().join(" "))?;
    Ok(())
}

/// Writes through a narrowed mutable view; the caller sees the change.
pub fn demo_mutable_view<W: Write>(out: &mut W, squad: &mut [i32]) -> Result<(), DemoError> {
    let view = SpanMut::from(&mut *squad);
    for soldier in view.try_subspan(1, 3)? {
        *soldier *= 10;
    }
    writeln!(
        out,
        "After promoting the middle three through a mutable view: {}",
        squad.iter().join(" ")
    )?;
    Ok(())
}

pub fn run<W: Write>(out: &mut W, config: &SpanConfig) -> Result<(), DemoError> {
    banner(out, "Unified interface")?;
    let elite_troops: Vec<i32> = config.elite.clone();
    let guard_troops: [i32; 4] = config.guard;
    let veteran_troops: Box<[i32]> = config.veteran.clone().into_boxed_slice();

    heading(out, "Vec inspection")?;
    inspect(out, Span::from(&elite_troops))?;
    heading(out, "Array inspection")?;
    inspect(out, Span::from(&guard_troops))?;
    heading(out, "Boxed slice inspection")?;
    inspect(out, Span::from(&veteran_troops))?;

    writeln!(out)?;
    banner(out, "Sub-range extraction")?;
    let mut squad = config.squad.clone();
    demo_slice_operations(out, Span::from(&squad))?;
    demo_mutable_view(out, &mut squad)?;

    writeln!(out)?;
    banner(out, "Fixed-length views")?;
    let red: [f32; 3] = config.red;
    process_rgb_color(out, FixedSpan::from(&red))?;
    let blue: [f32; 3] = config.blue;
    process_rgb_color(out, FixedSpan::from(&blue))?;

    // Does not compile: a 4-element array is not a FixedSpan<f32, 3>.
    // let color_with_alpha = [0.0f32, 1.0, 0.0, 1.0];
    // process_rgb_color(out, FixedSpan::from(&color_with_alpha))?;

    let color_with_alpha = vec![0.0f32, 1.0, 0.0, 1.0];
    match FixedSpan::<f32, 3>::try_from(color_with_alpha.as_slice()) {
        Ok(color) => process_rgb_color(out, color)?,
        Err(err) => {
            debug!(%err, "fixed-length conversion rejected");
            writeln!(
                out,
                "Converting a 4-element Vec at run time fails: {}",
                err.to_string().red()
            )?;
        }
    }

    writeln!(out)?;
    banner(out, "Lifetime warning")?;
    writeln!(out, "The dangerous pattern below is shown, never run:")?;
    {
        let safe_data = config.safe_data.clone();
        let safe_view = Span::from(&safe_data);
        match safe_view.front() {
            Some(first) => writeln!(out, "Safe span usage: {first}")?,
            None => writeln!(out, "Safe span usage: the view is empty, nothing to read")?,
        }
    }

    // Rejected by the borrow checker: `local_data` is dropped while borrowed.
    // fn dangerous_function() -> Span<'static, i32> {
    //     let local_data = vec![9, 9, 9];
    //     Span::from(&local_data)
    // }
    writeln!(
        out,
        "Returning a view of a local Vec does not compile (left commented out)"
    )?;

    writeln!(out)?;
    banner(out, "Lesson complete")?;
    Ok(())
}
