// file: src/utils/logging.rs
// description: Tracing subscriber initialization with optional ANSI coloring

use colored::*;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Installs the global subscriber. Events go to stderr so command output on
/// stdout stays machine readable. `RUST_LOG` overrides the verbosity flag.
pub fn init_logger(colored_output: bool, verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(verbose)
        .with_line_number(verbose)
        .compact()
        .with_ansi(colored_output);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

/// Status line for terminal output; the marker is always bold, the message
/// takes the colour only when `tint_message` is set.
fn status_line(marker: &str, color: Color, msg: &str, tint_message: bool) -> String {
    let marker = marker.color(color).bold();
    if tint_message {
        format!("{} {}", marker, msg.color(color))
    } else {
        format!("{} {}", marker, msg)
    }
}

pub fn format_success(msg: &str) -> String {
    status_line("✓", Color::Green, msg, true)
}

pub fn format_warning(msg: &str) -> String {
    status_line("⚠", Color::Yellow, msg, true)
}

pub fn format_info(msg: &str) -> String {
    status_line("ℹ", Color::Blue, msg, false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_lines_without_color() {
        colored::control::set_override(false);
        assert_eq!(format_success("ready"), "✓ ready");
        assert_eq!(format_warning("careful"), "⚠ careful");
        assert_eq!(format_info("note"), "ℹ note");
    }
}
