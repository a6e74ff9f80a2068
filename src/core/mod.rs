//! Core functionality for the repo-view browser.
//!
//! This module provides the domain model, the repository providers, the view-state
//! store and its composition root, plus the rendering and output helpers the
//! commands use.

pub mod change_status;
pub mod colors;
pub mod command_init;
pub mod config;
pub mod dirs;
pub mod error;
pub mod facts_provider;
pub mod git;
pub mod local_provider;
pub mod model;
pub mod output;
pub mod provider;
pub mod render;
pub mod store;
pub mod tree;
pub mod view;

// === Error handling ===
pub use error::{RepoViewError, Result};

// === Domain model ===
// Repository facts exchanged with providers, strictly validated on decode
pub use change_status::ChangeStatus;
pub use model::{
    decode, decode_value, CommitInfo, Decode, DecodeError, FileChange, FileContent,
    FileTreeItem, NodeKind, RepoInfo,
};

// === Providers ===
// Where repository facts come from: libgit2 or a recorded facts file
pub use facts_provider::FactsProvider;
pub use git::GitRepo;
pub use local_provider::{LocalGitProvider, DEFAULT_COMMIT_LIMIT};
pub use provider::{ProviderError, RepositoryProvider, NO_REPOSITORY_DETAIL};

// === View state ===
pub use store::{FailureKind, OpStatus, Operation, Phase, RepoSnapshot, RepoStore, StoreError};
pub use view::{Notification, RepoView, Screen, Tab};

// === Command initialization ===
pub use command_init::{ViewCommandContext, ViewCommandInit, ViewOptions};

// === Configuration ===
pub use config::ViewerConfig;

// === Output formatting ===
pub use colors::{get_colored_diff_line, get_colored_path, get_colored_status, get_status_color_style};
pub use output::{print_error, print_info, print_section_header, print_warning};
pub use render::strip_ansi_codes;
