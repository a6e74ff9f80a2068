//! Color mapping for change statuses and diff lines.
//!
//! Every place that prints a status or a diff goes through this module, so a status
//! has the same color in the commit view, the working view and the overview.
//!
//! # Color Scheme
//! - **Added**: Green
//! - **Deleted**: Red
//! - **Modified**: Yellow
//! - **Renamed**: Blue
//! - **Other codes**: Magenta
//! - **Diff lines**: green additions, red removals, cyan hunk headers

use crate::core::change_status::ChangeStatus;
use colored::*;

/// Color function for a change status
pub fn get_status_color_style(status: ChangeStatus) -> Box<dyn Fn(&str) -> ColoredString> {
    match status {
        ChangeStatus::Added => Box::new(|text: &str| text.green()),
        ChangeStatus::Deleted => Box::new(|text: &str| text.red()),
        ChangeStatus::Modified => Box::new(|text: &str| text.yellow()),
        ChangeStatus::Renamed => Box::new(|text: &str| text.blue()),
        ChangeStatus::Other(_) => Box::new(|text: &str| text.magenta()),
    }
}

/// Colored single-letter status code
pub fn get_colored_status(status: ChangeStatus) -> ColoredString {
    get_status_color_style(status)(&status.code().to_string())
}

/// File path in its status color
pub fn get_colored_path(status: ChangeStatus, path: &str) -> ColoredString {
    get_status_color_style(status)(path)
}

/// One line of unified diff text
pub fn get_colored_diff_line(line: &str) -> ColoredString {
    if line.starts_with("@@") {
        line.cyan()
    } else if line.starts_with('+') {
        line.green()
    } else if line.starts_with('-') {
        line.red()
    } else {
        line.normal()
    }
}
