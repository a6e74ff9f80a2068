//! repo-view - a read-only Git repository browser.
//!
//! The heart of the crate is [`RepoStore`], a view-state store that fetches repository
//! facts through a [`RepositoryProvider`] and keeps selections, collections and
//! per-operation status coherent under concurrent, out-of-order completions.
//! [`RepoView`] composes it into a browser with tabs, screens and notifications.
//!
//! # Public API
//! The main public interface is re-exported from the [`core`] module, which provides:
//! - Domain model with strict decoding
//! - Repository providers (libgit2, facts file)
//! - The view-state store and its composition root
//! - Error handling and result types
//! - Rendering and output helpers

pub mod commands;
pub mod core;

pub use crate::core::{
    // Domain model
    ChangeStatus,
    CommitInfo,
    FileChange,
    FileContent,
    FileTreeItem,
    RepoInfo,

    // Providers
    FactsProvider,
    LocalGitProvider,
    ProviderError,
    RepositoryProvider,

    // View state
    Operation,
    Phase,
    RepoSnapshot,
    RepoStore,
    RepoView,
    Screen,
    StoreError,
    Tab,

    // Error handling
    RepoViewError,
    Result,
};
