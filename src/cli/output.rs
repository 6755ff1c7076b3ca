//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically. Everything but
//! [`error`] writes to a caller-supplied sink so sessions can be scripted.

use std::fmt::Display;
use std::io::{self, Write};

use colored::Colorize;

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Write warning (yellow "Warning:" prefix)
pub fn warning(out: &mut dyn Write, msg: &(impl Display + ?Sized)) -> io::Result<()> {
    writeln!(out, "{}: {}", "Warning".yellow(), msg)
}

/// Write success status (green checkmark)
pub fn success(out: &mut dyn Write, msg: &(impl Display + ?Sized)) -> io::Result<()> {
    writeln!(out, "{} {}", "✓".green(), msg)
}

/// Write failure status (red X)
pub fn failure(out: &mut dyn Write, msg: &(impl Display + ?Sized)) -> io::Result<()> {
    writeln!(out, "{} {}", "✗".red(), msg)
}

/// Write labelled result (green label)
pub fn action(out: &mut dyn Write, label: &str, msg: &(impl Display + ?Sized)) -> io::Result<()> {
    writeln!(out, "{}: {}", label.green(), msg)
}

/// Write plain output (no color)
pub fn info(out: &mut dyn Write, msg: &(impl Display + ?Sized)) -> io::Result<()> {
    writeln!(out, "{}", msg)
}

/// Write prompt without newline (cyan)
pub fn prompt(out: &mut dyn Write, msg: &(impl Display + ?Sized)) -> io::Result<()> {
    write!(out, "{} ", msg.to_string().cyan())?;
    out.flush()
}
