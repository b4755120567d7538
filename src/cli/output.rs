use colored::Colorize;

/// Shown in place of secret values.
pub const MASK: &str = "********";

/// Print a header line.
pub fn header(msg: &str) {
    println!("\n{}", msg.bold());
}

/// Print a success message.
pub fn success(msg: &str) {
    println!("  {} {}", "✓".green(), msg);
}

/// Print a warning message.
pub fn warning(msg: &str) {
    println!("  {} {}", "⚠".yellow(), msg);
}

/// Print an error message to stderr.
pub fn error(msg: &str) {
    eprintln!("  {} {}", "✗".red(), msg);
}

/// Print an aligned `label: value` line.
pub fn field(label: &str, value: &str) {
    println!("    {:<14} {}", format!("{label}:").dimmed(), value.cyan());
}
