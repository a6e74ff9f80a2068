//! Unified output formatting utilities for consistent CLI presentation.
//!
//! This module provides standardized formatting functions for all repo-view output,
//! ensuring consistent colors, spacing, and message structure across commands.
//!
//! # Design Principles
//! - Red for errors, yellow for warnings, white for messages and headers
//! - Newline before and after blocks printed on stdout
//! - Warnings go to stderr so rendered views stay pipeable

use colored::*;

/// Formats and prints an error message with consistent styling
///
/// # Format
/// ```text
///
/// ✕ Error: <message>
///
/// ```
///
/// # Colors
/// - "✕ Error:" in red
/// - Message in white
/// - Newlines before and after for spacing
pub fn print_error(message: &str) {
    println!("\n{} {}\n", "✕ Error:".red(), message.white());
}

/// Formats and prints a warning on stderr
///
/// # Format
/// ```text
/// ! Warning: <message>
/// ```
///
/// # Colors
/// - "! Warning:" in yellow
/// - Message in white
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "! Warning:".yellow(), message.white());
}

/// Formats and prints an informational message with consistent styling
///
/// # Format
/// ```text
///
/// <message>
///
/// ```
///
/// # Colors
/// - Message in white
/// - Newlines before and after for spacing
pub fn print_info(message: &str) {
    println!("\n{}\n", message.white());
}

/// Formats and prints a section header with consistent styling
///
/// # Format
/// ```text
///
/// <header>:
///
/// ```
///
/// # Colors
/// - Header in white
/// - Newlines before and after for spacing
pub fn print_section_header(header: &str) {
    println!("\n{}:\n", header.white());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_error_does_not_panic() {
        print_error("Test error message");
    }

    #[test]
    fn test_print_warning_does_not_panic() {
        print_warning("Failed to fetch file tree");
    }

    #[test]
    fn test_print_info_does_not_panic() {
        print_info("Information message");
    }

    #[test]
    fn test_print_section_header_does_not_panic() {
        print_section_header("Local Branches");
    }

    #[test]
    fn test_color_functions_available() {
        // Test that color functions are available and don't panic
        let _ = "test".red();
        let _ = "test".white();
        let _ = "test".yellow();
    }
}
