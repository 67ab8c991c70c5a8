//! Terminal output formatting utilities.
//!
//! Changelog lines are the only thing written to stdout; every diagnostic
//! goes to stderr so the output can be piped.

use std::sync::atomic::{AtomicBool, Ordering};

use colored::Colorize;

static QUIET_MODE: AtomicBool = AtomicBool::new(false);
static VERBOSE_MODE: AtomicBool = AtomicBool::new(false);

/// Set quiet mode globally. Call once at startup.
pub fn set_quiet(quiet: bool) {
    QUIET_MODE.store(quiet, Ordering::Relaxed);
}

/// Set verbose mode globally. Call once at startup.
pub fn set_verbose(verbose: bool) {
    VERBOSE_MODE.store(verbose, Ordering::Relaxed);
}

fn is_quiet() -> bool {
    QUIET_MODE.load(Ordering::Relaxed)
}

fn is_verbose() -> bool {
    VERBOSE_MODE.load(Ordering::Relaxed)
}

/// Print an error message (always prints to stderr).
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a warning message to stderr (suppressed in quiet mode).
pub fn warn(msg: &str) {
    if !is_quiet() {
        eprintln!("{} {}", "!".yellow(), msg);
    }
}

/// Print an info message to stderr (only in verbose mode).
pub fn info(msg: &str) {
    if is_verbose() {
        eprintln!("{} {}", "→".blue(), msg);
    }
}

/// Print a changelog line (always prints to stdout).
pub fn essential(msg: &str) {
    println!("{msg}");
}
