//! Terminal detection for colored status output

use is_terminal::IsTerminal;
use std::env;
use std::ffi::OsStr;
use std::io::stdout;

/// Whether status words written to stdout should be colored.
///
/// Requires the config switch, a terminal on stdout, no `NO_COLOR`, and a
/// `TERM` other than `dumb`.
pub fn use_color(color_enabled: bool) -> bool {
    let no_color = env::var_os("NO_COLOR");
    let term = env::var("TERM").ok();
    color_allowed(
        color_enabled,
        stdout().is_terminal(),
        no_color.as_deref(),
        term.as_deref(),
    )
}

fn color_allowed(
    color_enabled: bool,
    is_terminal: bool,
    no_color: Option<&OsStr>,
    term: Option<&str>,
) -> bool {
    if !color_enabled || !is_terminal {
        return false;
    }
    if no_color.is_some_and(|v| !v.is_empty()) {
        return false;
    }
    term != Some("dumb")
}
