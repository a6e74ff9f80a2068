//! Folding flat repository paths into a nested [`FileTreeItem`] forest.

use crate::core::model::FileTreeItem;

/// Build a file tree from slash-separated file paths.
///
/// Nodes keep first-seen order. Every intermediate component becomes a directory
/// whose `path` is the prefix up to that component. A path that names an existing
/// directory, or that runs through an existing file, is ignored.
pub fn build_tree<I, S>(paths: I) -> Vec<FileTreeItem>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut roots = Vec::new();
    for path in paths {
        let path = path.as_ref().trim_matches('/');
        if path.is_empty() {
            continue;
        }
        let parts: Vec<&str> = path.split('/').filter(|p| !p.is_empty()).collect();
        insert(&mut roots, "", &parts);
    }
    roots
}

fn insert(level: &mut Vec<FileTreeItem>, prefix: &str, parts: &[&str]) {
    let Some((first, rest)) = parts.split_first() else {
        return;
    };
    let path = if prefix.is_empty() {
        (*first).to_string()
    } else {
        format!("{prefix}/{first}")
    };

    let existing = level.iter().position(|item| item.path() == path);

    if rest.is_empty() {
        if existing.is_none() {
            level.push(FileTreeItem::file(path));
        }
        return;
    }

    let index = match existing {
        Some(index) => index,
        None => {
            level.push(FileTreeItem::dir(path.clone(), Vec::new()));
            level.len() - 1
        }
    };

    if let FileTreeItem::Dir { children, .. } = &mut level[index] {
        insert(children, &path, rest);
    } else {
        log::debug!("Skipping '{}': '{}' is a file", parts.join("/"), path);
    }
}
