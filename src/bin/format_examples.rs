//! Formatting lesson.
//!
//! Run with: cargo run --bin format_examples [-- demo.toml]

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use colored::Colorize;

use format_span::config::DemoConfig;
use format_span::{demo, logging, DemoError};

fn main() -> ExitCode {
    logging::init();

    let path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = match DemoConfig::load(path.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err.to_string().red());
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = run_lesson(&config) {
        eprintln!("{}", err.to_string().red());
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run_lesson(config: &DemoConfig) -> Result<(), DemoError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    demo::format::run(&mut out, &config.format)?;
    out.flush()?;
    Ok(())
}
