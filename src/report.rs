//! Error reports
//!
//! Turns an error and its `source()` chain into log message text:
//!
//! ```text
//! failed to save settings
//! Caused by: permission denied
//! ```
//!
//! Rendering goes through user `Display` impls, which may fail or panic. Either
//! case falls back to a shorter description instead of reaching the caller.

use std::error::Error;
use std::fmt::{self, Write as _};
use std::panic::{self, AssertUnwindSafe};

/// Prefix for each cause line
pub const CAUSE_PREFIX: &str = "Caused by: ";

/// Used when not even the error's own `Display` can be rendered
pub const UNPRINTABLE_ERROR: &str = "<unprintable error>";

/// Render `error` and its causes as message text
///
/// Each line is terminated while building, then exactly one trailing line
/// terminator is stripped from the result.
pub fn render_error(error: &(dyn Error + 'static)) -> String {
    let full = panic::catch_unwind(AssertUnwindSafe(|| render_chain(error)));
    match full {
        Ok(Ok(text)) => strip_line_terminator(&text).to_string(),
        _ => short_description(error),
    }
}

fn render_chain(error: &(dyn Error + 'static)) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "{}", error)?;

    let mut source = error.source();
    while let Some(cause) = source {
        writeln!(out, "{}{}", CAUSE_PREFIX, cause)?;
        source = cause.source();
    }

    Ok(out)
}

fn short_description(error: &(dyn Error + 'static)) -> String {
    let short = panic::catch_unwind(AssertUnwindSafe(|| {
        let mut out = String::new();
        write!(out, "{}", error).map(|_| out)
    }));
    match short {
        Ok(Ok(text)) => text,
        _ => UNPRINTABLE_ERROR.to_string(),
    }
}

/// Remove one trailing `\r\n` or `\n`, if present
pub fn strip_line_terminator(text: &str) -> &str {
    text.strip_suffix("\r\n")
        .or_else(|| text.strip_suffix('\n'))
        .unwrap_or(text)
}
