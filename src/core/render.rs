//! Text rendering of the browser panels.
//!
//! Every function returns a colorized `String`; commands decide where it goes.
//! [`strip_ansi_codes`] recovers the plain text, which is what the tests compare.
//!
//! # Panels
//! - **Header**: current branch and local branches
//! - **Tree**: nested file tree, directories first as stored
//! - **History**: commits with short hash, summary, author and date
//! - **Changes**: file changes grouped by staging state, optionally with diffs
//! - **File**: numbered lines of a file

use crate::core::{
    colors::{get_colored_diff_line, get_colored_path, get_colored_status},
    model::{CommitInfo, FileChange, FileTreeItem, RepoInfo},
};
use colored::*;
use std::fmt::Write;

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn render_header(info: &RepoInfo) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Branch: {}", info.current_branch.blue());

    if !info.branches.is_empty() {
        let branches: Vec<String> = info
            .branches
            .iter()
            .map(|branch| {
                if *branch == info.current_branch {
                    branch.green().bold().to_string()
                } else {
                    branch.white().to_string()
                }
            })
            .collect();
        let _ = writeln!(out, "Branches: {}", branches.join(", "));
    }
    out
}

/// Commit list, marking `selected` with a bullet
pub fn render_commits(commits: &[CommitInfo], selected: Option<&str>) -> String {
    if commits.is_empty() {
        return format!("{}\n", "No commits yet".bright_black());
    }

    let mut out = String::new();
    for commit in commits {
        let marker = if selected == Some(commit.hash.as_str()) {
            "●".green()
        } else {
            " ".normal()
        };
        let _ = writeln!(
            out,
            "{} {} {} {} {}",
            marker,
            commit.short_hash().yellow(),
            commit.summary().white(),
            commit.author.bright_black(),
            commit.date.format(DATE_FORMAT).to_string().bright_black()
        );
    }
    out
}

/// Change list; staged and unstaged entries get their own sections
pub fn render_changes(changes: &[FileChange], with_diffs: bool) -> String {
    if changes.is_empty() {
        return format!("{}\n", "No changes".bright_black());
    }

    let mut out = String::new();
    let staged: Vec<&FileChange> = changes.iter().filter(|c| c.staged == Some(true)).collect();
    let unstaged: Vec<&FileChange> = changes.iter().filter(|c| c.staged == Some(false)).collect();
    let unsorted: Vec<&FileChange> = changes.iter().filter(|c| c.staged.is_none()).collect();

    if !staged.is_empty() {
        let _ = writeln!(out, "{} {}", "➤".green(), "Staged:".green());
        render_change_lines(&mut out, &staged, with_diffs);
    }
    if !unstaged.is_empty() {
        if !staged.is_empty() {
            out.push('\n');
        }
        let _ = writeln!(out, "{} {}", "➤".yellow(), "Not staged:".yellow());
        render_change_lines(&mut out, &unstaged, with_diffs);
    }
    render_change_lines(&mut out, &unsorted, with_diffs);
    out
}

fn render_change_lines(out: &mut String, changes: &[&FileChange], with_diffs: bool) {
    for change in changes {
        let _ = writeln!(
            out,
            "   {}  {}",
            get_colored_status(change.status),
            get_colored_path(change.status, &change.path)
        );

        if let (true, Some(diff)) = (with_diffs, change.diff.as_deref()) {
            for line in diff.lines() {
                let _ = writeln!(out, "      {}", get_colored_diff_line(line));
            }
        }
    }
}

pub fn render_tree(items: &[FileTreeItem]) -> String {
    if items.is_empty() {
        return format!("{}\n", "Empty tree".bright_black());
    }

    let mut out = String::new();
    render_tree_level(&mut out, items, 0);
    out
}

fn render_tree_level(out: &mut String, items: &[FileTreeItem], depth: usize) {
    let indent = "  ".repeat(depth);
    for item in items {
        match item {
            FileTreeItem::Dir { children, .. } => {
                let _ = writeln!(out, "{indent}{} {}/", "▸".blue(), item.name().blue().bold());
                render_tree_level(out, children, depth + 1);
            }
            FileTreeItem::File { .. } => {
                let _ = writeln!(out, "{indent}  {}", item.name().white());
            }
        }
    }
}

/// File content with right-aligned line numbers
pub fn render_file(path: &str, content: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", path.blue().bold());

    let width = content.lines().count().max(1).to_string().len();
    for (number, line) in content.lines().enumerate() {
        let _ = writeln!(
            out,
            "{} {} {}",
            format!("{:>width$}", number + 1).bright_black(),
            "│".bright_black(),
            line
        );
    }
    out
}

/// Strip ANSI color codes
pub fn strip_ansi_codes(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            for ch in chars.by_ref() {
                if ch.is_ascii_alphabetic() {
                    break;
                }
            }
        } else {
            result.push(ch);
        }
    }

    result
}
