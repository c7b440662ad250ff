//! The two lessons. Each writes to any `io::Write`, so the binaries hand them
//! stdout and the tests hand them a `Vec<u8>`.

pub mod format;
pub mod span;

use std::io::{self, Write};

use colored::Colorize;

fn banner<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    writeln!(out, "{}", format!("========== {title} ==========").bold())
}

fn heading<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    writeln!(out, "{}", format!("[{title}]").cyan())
}
