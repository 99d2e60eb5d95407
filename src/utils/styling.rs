//! Terminal styling utilities

use console::{style, Emoji};
use std::path::Path;

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", ">> ");
pub static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");

/// Print the application banner
pub fn print_banner(version: &str) {
    println!();
    println!(
        "    {} {}",
        style("ergostat").cyan().bold(),
        style("occupational-health survey statistics").dim()
    );
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Print the input configuration line
pub fn print_config(input: &Path, rows: usize, cols: usize, memory_mb: f64) {
    println!("    {} Input: {}", FOLDER, input.display());
    println!(
        "      Rows: {}   Columns: {}   Estimated memory: {:.2} MB",
        style(rows).yellow(),
        style(cols).yellow(),
        memory_mb
    );
}

/// Print a step header with styling
pub fn print_step_header(step_num: u8, title: &str) {
    println!();
    println!(
        "    {} {} {}",
        style(format!("STEP {}", step_num)).cyan().bold(),
        style("│").dim(),
        style(title).white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {} {}", INFO, message);
}

/// Print a per-stage failure without aborting the run
pub fn print_stage_error(stage: &str, error: &anyhow::Error) {
    println!(
        "    {} {} {}",
        style("✗").red().bold(),
        style(format!("{} failed:", stage)).red().bold(),
        style(format!("{:#}", error)).red()
    );
}

/// Print elapsed time for a step
pub fn print_step_time(elapsed: std::time::Duration) {
    println!(
        "      {}",
        style(format!("({:.2}s)", elapsed.as_secs_f64())).dim()
    );
}

/// Print the final completion message
pub fn print_completion() {
    println!();
    println!(
        "    {} {}",
        ROCKET,
        style("Ergostat analysis complete!").green().bold()
    );
    println!();
}
