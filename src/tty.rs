//! Terminal output for the migration report.
//!
//! Leveled, tagged report lines on stderr. ANSI color is applied only
//! when stderr is a terminal, so piped output stays clean.

use std::io::{self, IsTerminal};

const GREEN: &str = "\x1b[0;32m";
const YELLOW: &str = "\x1b[1;33m";
const RED: &str = "\x1b[0;31m";
const RESET: &str = "\x1b[0m";

fn tag(color: &str, label: &str) -> String {
    if io::stderr().is_terminal() {
        format!("{}{}{}", color, label, RESET)
    } else {
        label.to_string()
    }
}

pub fn info(message: &str) {
    eprintln!("{} {}", tag(GREEN, "[INFO]"), message);
}

pub fn warning(message: &str) {
    eprintln!("{} {}", tag(YELLOW, "[WARNING]"), message);
}

pub fn error(message: &str) {
    eprintln!("{} {}", tag(RED, "[ERROR]"), message);
}
