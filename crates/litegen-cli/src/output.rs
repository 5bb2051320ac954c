//! Styled terminal output helpers

use colored::Colorize;

const WIDTH: usize = 70;

/// Print a section header with styling
pub fn print_header(title: &str) {
    println!();
    println!("{}", "─".repeat(WIDTH).bright_black());
    println!("{}", title.bold().cyan());
    println!("{}", "─".repeat(WIDTH).bright_black());
}

/// Print success message with green checkmark
pub fn print_success(msg: &str) {
    println!("  {} {}", "✓".green().bold(), msg);
}

/// Print info message with blue info icon
pub fn print_info(msg: &str) {
    println!("  {} {}", "ℹ".blue(), msg);
}

/// Print a labelled value, e.g. a path
pub fn print_field(label: &str, value: &str) {
    let label = format!("{:<10}", format!("{label}:"));
    println!("  {} {}", label.bold(), value);
}

/// Print a styled banner for the demo start
pub fn print_banner(title: &str) {
    let inner = WIDTH - 2;
    let padding = inner.saturating_sub(title.len()) / 2;
    let title_line = format!(
        "║{}{}{}║",
        " ".repeat(padding),
        title,
        " ".repeat(inner.saturating_sub(padding + title.len()))
    );

    println!();
    println!("{}", format!("╔{}╗", "═".repeat(inner)).cyan());
    println!("{}", title_line.cyan().bold());
    println!("{}", format!("╚{}╝", "═".repeat(inner)).cyan());
}

/// Print a styled completion message
pub fn print_done() {
    println!();
    println!("{}", "═".repeat(WIDTH).cyan());
    println!("{}", "  Demo completed successfully!".green().bold());
    println!("{}", "═".repeat(WIDTH).cyan());
    println!();
}
