//! Repository data provider contract.
//!
//! The view-state store depends only on [`RepositoryProvider`]; how the facts are
//! produced (libgit2, a recorded facts file, a remote service) is up to the
//! implementation.
//!
//! # Design
//!
//! The trait is async because providers may perform I/O. Every method returns a
//! [`ProviderError`] on failure, which distinguishes a missing resource from any
//! other failure so the store can decide how to surface it.

use crate::core::error::RepoViewError;
use crate::core::model::{CommitInfo, DecodeError, FileChange, FileContent, FileTreeItem, RepoInfo};
use async_trait::async_trait;
use thiserror::Error;

/// Detail reported when no repository exists at the working directory
pub const NO_REPOSITORY_DETAIL: &str =
    "No Git repository found in the current directory. Please ensure you're in a valid Git repository.";

/// Errors from provider operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The queried resource (the repository itself, a file) does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Any other failure of the underlying service.
    #[error("provider failure: {0}")]
    Failed(String),

    /// The provider answered with a payload that does not match the domain model.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl ProviderError {
    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::NotFound(detail.into())
    }

    pub fn failed(detail: impl Into<String>) -> Self {
        Self::Failed(detail.into())
    }

    /// Provider-supplied detail for a missing resource
    pub fn not_found_detail(&self) -> Option<&str> {
        match self {
            Self::NotFound(detail) => Some(detail),
            _ => None,
        }
    }
}

impl From<RepoViewError> for ProviderError {
    fn from(err: RepoViewError) -> Self {
        match err {
            RepoViewError::NotInGitRepo => ProviderError::not_found(NO_REPOSITORY_DETAIL),
            RepoViewError::Decode(decode) => ProviderError::Decode(decode),
            other if other.is_not_found() => ProviderError::not_found(other.to_string()),
            other => ProviderError::failed(other.to_string()),
        }
    }
}

/// Source of every repository fact the browser displays.
#[async_trait]
pub trait RepositoryProvider: Send + Sync {
    async fn get_repo_info(&self) -> Result<RepoInfo, ProviderError>;

    /// Commits reachable from HEAD, most recent first
    async fn get_commits(&self) -> Result<Vec<CommitInfo>, ProviderError>;

    /// Changes introduced by `commit_hash`
    async fn get_file_changes(&self, commit_hash: &str) -> Result<Vec<FileChange>, ProviderError>;

    /// Staged and unstaged changes of the working tree
    async fn get_working_changes(&self) -> Result<Vec<FileChange>, ProviderError>;

    /// Roots of the file tree
    async fn get_file_tree(&self) -> Result<Vec<FileTreeItem>, ProviderError>;

    async fn get_file_content(&self, path: &str) -> Result<FileContent, ProviderError>;
}
