//! Logging utilities with colored output.
//!
//! This module provides:
//! - `log!` macro for formatted terminal output with colored prefixes
//! - `debug!` macro for output only shown with `--verbose`
//! - [`success`] for the `✓` line printed after each generated file
//!
//! # Example
//!
//! ```ignore
//! log!("icons"; "rendering {} sizes", count);
//! logger::success("Generated Icon-192.png (192x192)");
//! ```

use crossterm::{
    execute,
    terminal::{Clear, ClearType},
};
use owo_colors::{OwoColorize, Stream, Style};
use std::{
    io::{Write, stdout},
    sync::atomic::{AtomicBool, Ordering},
};

/// Global verbose flag (set by --verbose CLI argument)
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set verbose mode globally
pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

/// Check if verbose mode is enabled
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

// ============================================================================
// Log Macro
// ============================================================================

/// Log a message with a colored module prefix
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a debug message (only shown when --verbose is enabled)
///
/// # Usage
/// ```ignore
/// debug!("module"; "debug info: {}", value);
/// ```
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Log a message with a colored module prefix
#[inline]
pub fn log(module: &str, message: &str) {
    let module_lower = module.to_ascii_lowercase();
    let prefix = colorize_prefix(module, &module_lower);

    let mut stdout = stdout().lock();
    execute!(stdout, Clear(ClearType::UntilNewLine)).ok();
    writeln!(stdout, "{prefix} {message}").ok();
    stdout.flush().ok();
}

/// Print a success line (✓ prefix, green).
pub fn success(message: &str) {
    let mut stdout = stdout().lock();
    writeln!(
        stdout,
        "{} {message}",
        "✓".if_supports_color(Stream::Stdout, |t| t.green())
    )
    .ok();
    stdout.flush().ok();
}

/// Print a plain line to stdout without any prefix.
///
/// Used for multi-line instructional output where a prefix on every
/// line would get in the way of copy-pasting commands.
pub fn plain(message: &str) {
    let mut stdout = stdout().lock();
    writeln!(stdout, "{message}").ok();
    stdout.flush().ok();
}

/// Apply color to a module prefix based on module type
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> String {
    let prefix = format!("[{module}]");
    match module_lower {
        "icons" => prefix
            .if_supports_color(Stream::Stdout, |p| p.style(Style::new().bright_blue().bold()))
            .to_string(),
        "done" => prefix
            .if_supports_color(Stream::Stdout, |p| p.style(Style::new().bright_green().bold()))
            .to_string(),
        "error" => prefix
            .if_supports_color(Stream::Stdout, |p| p.style(Style::new().bright_red().bold()))
            .to_string(),
        _ => prefix
            .if_supports_color(Stream::Stdout, |p| p.style(Style::new().bright_yellow().bold()))
            .to_string(),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_contains_module_name() {
        assert!(colorize_prefix("icons", "icons").contains("[icons]"));
        assert!(colorize_prefix("Config", "config").contains("[Config]"));
    }

    #[test]
    fn test_prefix_plain_when_color_disabled() {
        owo_colors::set_override(false);
        assert_eq!(colorize_prefix("icons", "icons"), "[icons]");
        assert_eq!(colorize_prefix("exec", "exec"), "[exec]");
    }

    #[test]
    fn test_verbose_toggle() {
        set_verbose(true);
        assert!(is_verbose());
        set_verbose(false);
        assert!(!is_verbose());
    }
}
