//! Repository domain model.
//!
//! Typed shapes for every fact a provider can return. All types serialize to the
//! same JSON wire format the providers speak, and every payload entering the crate
//! from outside goes through [`decode`], which deserializes and then validates, so a
//! malformed response fails with a [`DecodeError`] instead of producing a partial
//! entity.
//!
//! # Public API
//! - [`RepoInfo`], [`CommitInfo`], [`FileChange`], [`FileTreeItem`], [`FileContent`]
//! - [`Decode`]: Validation hook implemented by every decodable payload
//! - [`decode`]: Strict JSON entry point

use crate::core::change_status::ChangeStatus;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// A provider payload that could not be turned into a domain entity
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("malformed {target} payload: {reason}")]
pub struct DecodeError {
    pub target: &'static str,
    pub reason: String,
}

impl DecodeError {
    pub fn new(target: &'static str, reason: impl Into<String>) -> Self {
        Self {
            target,
            reason: reason.into(),
        }
    }
}

/// Post-deserialization validation for provider payloads
pub trait Decode: for<'de> Deserialize<'de> {
    /// Name used in decode error messages
    const TARGET: &'static str;

    /// Check invariants serde cannot express
    fn validate(&self) -> Result<(), DecodeError> {
        Ok(())
    }
}

/// Decode a JSON provider payload into a validated entity
pub fn decode<T: Decode>(json: &str) -> Result<T, DecodeError> {
    let value: T =
        serde_json::from_str(json).map_err(|e| DecodeError::new(T::TARGET, e.to_string()))?;
    value.validate()?;
    Ok(value)
}

/// Decode an already-parsed JSON value into a validated entity
pub fn decode_value<T: Decode>(value: serde_json::Value) -> Result<T, DecodeError> {
    let value: T =
        serde_json::from_value(value).map_err(|e| DecodeError::new(T::TARGET, e.to_string()))?;
    value.validate()?;
    Ok(value)
}

/// Repository identity at load time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoInfo {
    pub current_branch: String,
    pub branches: Vec<String>,
}

impl Decode for RepoInfo {
    const TARGET: &'static str = "RepoInfo";

    fn validate(&self) -> Result<(), DecodeError> {
        let mut seen = HashSet::new();
        for branch in &self.branches {
            if !seen.insert(branch.as_str()) {
                return Err(DecodeError::new(
                    Self::TARGET,
                    format!("duplicate branch '{branch}'"),
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitInfo {
    pub hash: String,
    pub message: String,
    pub author: String,
    pub date: DateTime<FixedOffset>,
}

impl CommitInfo {
    /// Abbreviated hash for display
    pub fn short_hash(&self) -> &str {
        match self.hash.char_indices().nth(7) {
            Some((end, _)) => &self.hash[..end],
            None => &self.hash,
        }
    }

    /// First line of the commit message
    pub fn summary(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }
}

impl Decode for CommitInfo {
    const TARGET: &'static str = "CommitInfo";

    fn validate(&self) -> Result<(), DecodeError> {
        if self.hash.is_empty() {
            return Err(DecodeError::new(Self::TARGET, "empty commit hash"));
        }
        Ok(())
    }
}

impl Decode for Vec<CommitInfo> {
    const TARGET: &'static str = "commit list";

    fn validate(&self) -> Result<(), DecodeError> {
        let mut seen = HashSet::new();
        for commit in self {
            commit.validate()?;
            if !seen.insert(commit.hash.as_str()) {
                return Err(DecodeError::new(
                    Self::TARGET,
                    format!("duplicate commit '{}'", commit.hash),
                ));
            }
        }
        Ok(())
    }
}

/// One file's change, either in a commit or in the working tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChange {
    pub path: String,
    pub status: ChangeStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diff: Option<String>,
    /// Only set for working-tree changes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staged: Option<bool>,
}

impl Decode for FileChange {
    const TARGET: &'static str = "FileChange";

    fn validate(&self) -> Result<(), DecodeError> {
        if self.path.is_empty() {
            return Err(DecodeError::new(Self::TARGET, "empty path"));
        }
        Ok(())
    }
}

impl Decode for Vec<FileChange> {
    const TARGET: &'static str = "file change list";

    fn validate(&self) -> Result<(), DecodeError> {
        self.iter().try_for_each(Decode::validate)
    }
}

/// Payload of a file content request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileContent {
    pub content: String,
}

impl Decode for FileContent {
    const TARGET: &'static str = "FileContent";
}

/// Node of the repository file tree.
///
/// A file can never carry children; see [`RawTreeItem`] for the decode rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTreeItem", into = "RawTreeItem")]
pub enum FileTreeItem {
    File {
        path: String,
    },
    Dir {
        path: String,
        children: Vec<FileTreeItem>,
    },
}

impl FileTreeItem {
    pub fn file(path: impl Into<String>) -> Self {
        FileTreeItem::File { path: path.into() }
    }

    pub fn dir(path: impl Into<String>, children: Vec<FileTreeItem>) -> Self {
        FileTreeItem::Dir {
            path: path.into(),
            children,
        }
    }

    /// Repository-relative path of the node
    pub fn path(&self) -> &str {
        match self {
            FileTreeItem::File { path } | FileTreeItem::Dir { path, .. } => path,
        }
    }

    /// Last path component
    pub fn name(&self) -> &str {
        let path = self.path();
        path.rsplit('/').next().unwrap_or(path)
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            FileTreeItem::File { .. } => NodeKind::File,
            FileTreeItem::Dir { .. } => NodeKind::Dir,
        }
    }

    /// Children of a directory; always empty for files
    pub fn children(&self) -> &[FileTreeItem] {
        match self {
            FileTreeItem::File { .. } => &[],
            FileTreeItem::Dir { children, .. } => children,
        }
    }

    /// Number of file nodes in this subtree
    pub fn file_count(&self) -> usize {
        match self {
            FileTreeItem::File { .. } => 1,
            FileTreeItem::Dir { children, .. } => children.iter().map(Self::file_count).sum(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Dir,
}

/// Wire shape of a tree node: `{ path, type, children? }`.
///
/// Decoding accepts a file with null or empty children, treats a directory without
/// children as empty, and rejects a file with children or duplicate sibling paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawTreeItem {
    path: String,
    #[serde(rename = "type")]
    kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    children: Option<Vec<FileTreeItem>>,
}

impl TryFrom<RawTreeItem> for FileTreeItem {
    type Error = String;

    fn try_from(raw: RawTreeItem) -> Result<Self, Self::Error> {
        match raw.kind {
            NodeKind::File => match raw.children {
                Some(children) if !children.is_empty() => {
                    Err(format!("file '{}' has children", raw.path))
                }
                _ => Ok(FileTreeItem::File { path: raw.path }),
            },
            NodeKind::Dir => {
                let children = raw.children.unwrap_or_default();
                check_unique_siblings(&children)?;
                Ok(FileTreeItem::Dir {
                    path: raw.path,
                    children,
                })
            }
        }
    }
}

impl From<FileTreeItem> for RawTreeItem {
    fn from(item: FileTreeItem) -> Self {
        match item {
            FileTreeItem::File { path } => RawTreeItem {
                path,
                kind: NodeKind::File,
                children: None,
            },
            FileTreeItem::Dir { path, children } => RawTreeItem {
                path,
                kind: NodeKind::Dir,
                children: Some(children),
            },
        }
    }
}

fn check_unique_siblings(items: &[FileTreeItem]) -> Result<(), String> {
    let mut seen = HashSet::new();
    for item in items {
        if !seen.insert(item.path()) {
            return Err(format!("duplicate tree path '{}'", item.path()));
        }
    }
    Ok(())
}

impl Decode for Vec<FileTreeItem> {
    const TARGET: &'static str = "file tree";

    fn validate(&self) -> Result<(), DecodeError> {
        check_unique_siblings(self).map_err(|reason| DecodeError::new(Self::TARGET, reason))
    }
}
