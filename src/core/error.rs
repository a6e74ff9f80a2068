//! Domain-specific error types and error handling utilities.
//!
//! This module defines [`RepoViewError`] which covers every failure the crate can
//! hit outside of the view-state store: opening the repository, walking git objects,
//! decoding provider payloads and loading configuration. It uses `thiserror` for
//! ergonomic error definitions and includes constructors for common failure scenarios.
//!
//! # Public API
//! - [`RepoViewError`]: Main error enum covering all failure modes
//! - [`Result<T>`]: Type alias for `std::result::Result<T, RepoViewError>`
//!
//! # Error Categories
//! - **Git operations**: Repository not found, unknown revisions, git2 library errors
//! - **File operations**: Missing or non-text files, I/O errors
//! - **Payload decoding**: Malformed provider responses and facts files
//! - **Configuration**: Unreadable or unparsable config files

use crate::core::model::DecodeError;
use std::path::PathBuf;
use thiserror::Error;

/// Domain-specific error types for repo-view
#[derive(Error, Debug)]
pub enum RepoViewError {
    // Git repository errors
    #[error("Not in a git repository")]
    NotInGitRepo,

    #[error("Git repository error: {0}")]
    GitRepo(#[from] git2::Error),

    #[error("Invalid UTF-8 path in repository")]
    InvalidUtf8Path,

    #[error("Unknown commit: {hash}")]
    UnknownCommit { hash: String },

    // File operation errors
    #[error("File not found or is not a text file: {path}")]
    NotATextFile { path: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Payload errors
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("Failed to read facts file '{path}': {source}")]
    FactsReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse facts file '{path}': {source}")]
    FactsParseFailed {
        path: PathBuf,
        source: serde_json::Error,
    },

    // Configuration errors
    #[error("Could not find config directory")]
    ConfigDirectoryNotFound,

    #[error("Failed to read config file '{path}': {source}")]
    ConfigReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ConfigParseFailed {
        path: PathBuf,
        source: serde_json::Error,
    },

    // View errors, reported with the message the browser shows
    #[error("{message}")]
    NoRepository { message: String },

    #[error("{message}")]
    RequestFailed { message: String },

    // Runtime errors
    #[error("Background task failed: {0}")]
    TaskFailed(String),
}

/// Convenience type alias for Results using RepoViewError
pub type Result<T> = std::result::Result<T, RepoViewError>;

impl RepoViewError {
    /// Create an unknown commit error
    pub fn unknown_commit(hash: impl Into<String>) -> Self {
        Self::UnknownCommit { hash: hash.into() }
    }

    /// Create a missing or binary file error
    pub fn not_a_text_file(path: impl Into<String>) -> Self {
        Self::NotATextFile { path: path.into() }
    }

    /// Create a facts file read error
    pub fn facts_read_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FactsReadFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a facts file parse error
    pub fn facts_parse_failed(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::FactsParseFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a config read error
    pub fn config_read_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ConfigReadFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a config parse error
    pub fn config_parse_failed(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::ConfigParseFailed {
            path: path.into(),
            source,
        }
    }

    /// Create the error for a repository that could not be loaded
    pub fn no_repository(message: impl Into<String>) -> Self {
        Self::NoRepository {
            message: message.into(),
        }
    }

    /// Create the error for a browser request that failed
    pub fn request_failed(message: impl Into<String>) -> Self {
        Self::RequestFailed {
            message: message.into(),
        }
    }

    /// Create a background task failure from a join error
    pub fn task_failed(source: impl std::fmt::Display) -> Self {
        Self::TaskFailed(source.to_string())
    }

    /// Whether the error means the queried resource does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotInGitRepo | Self::NotATextFile { .. })
    }
}
