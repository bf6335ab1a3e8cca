//! Terminal output formatting for the story-dev CLI.
//!
//! Provides consistent, colored output using the [`console`] crate.

use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Print a bold cyan header between two rules.
pub fn print_header(text: &str) {
    let rule = "═".repeat(60);
    println!();
    println!("{}", style(&rule).bold().cyan());
    println!("  {}", style(text).bold().cyan());
    println!("{}", style(&rule).bold().cyan());
    println!();
}

/// Print a bold section title with a dim underline.
pub fn print_section(text: &str) {
    println!("\n{}", style(text).bold());
    println!("{}", style("─".repeat(40)).dim());
}

/// Print a success message prefixed with green `[OK]`.
pub fn print_success(text: &str) {
    println!("{} {}", style("[OK]").green().bold(), text);
}

/// Print a warning message prefixed with yellow `[WARN]`.
pub fn print_warning(text: &str) {
    println!("{} {}", style("[WARN]").yellow().bold(), text);
}

/// Print an informational message prefixed with blue `[INFO]`.
pub fn print_info(text: &str) {
    println!("{} {}", style("[INFO]").blue().bold(), text);
}

/// Print a key-value pair with dimmed key formatting.
pub fn print_key_value(key: &str, value: &str) {
    println!("  {}: {}", style(key).dim(), value);
}

/// Start a spinner with `text`; finish it with [`ProgressBar::finish_with_message`].
pub fn spinner(text: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(text.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}
