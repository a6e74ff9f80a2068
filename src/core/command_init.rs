//! Centralized initialization for browser commands.
//!
//! This module provides [`ViewCommandInit`] which handles the setup every command
//! shares: loading the user config, choosing a provider, building the runtime and
//! mounting the view.
//!
//! # Public API
//! - [`ViewOptions`]: Global command-line options
//! - [`ViewCommandInit`]: Main initializer
//! - [`ViewCommandContext`]: Mounted view plus the runtime that drives it
//!
//! # Initialization Steps
//! 1. **Config**: Read `config.json`, apply the color preference
//! 2. **Provider**: A facts file when `--facts` is given, the git repository otherwise.
//!    `--limit` caps the commits of either; the configured limit applies to git only
//! 3. **Runtime**: Current-thread tokio runtime
//! 4. **Mount**: Initial fetches of working changes, repo info, commits and tree

use crate::core::{
    config::ViewerConfig,
    error::{RepoViewError, Result},
    facts_provider::FactsProvider,
    local_provider::LocalGitProvider,
    model::FileChange,
    output::print_warning,
    provider::RepositoryProvider,
    store::{Operation, RepoSnapshot, RepoStore},
    view::{RepoView, Screen, Tab},
};
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;

/// Options shared by every command
#[derive(Debug, Clone, Default)]
pub struct ViewOptions {
    /// Directory to discover the repository from, current directory by default
    pub repo: Option<PathBuf>,
    /// Recorded repository facts to browse instead of a git repository
    pub facts: Option<PathBuf>,
    /// Number of commits to list, overrides the config
    pub limit: Option<usize>,
}

pub struct ViewCommandInit;

impl ViewCommandInit {
    /// Build the provider, mount the view and return the ready context
    pub fn initialize(options: &ViewOptions) -> Result<ViewCommandContext> {
        let config = ViewerConfig::load()?;
        config.apply_color();

        let provider = Self::provider(options, &config)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        let view = RepoView::new(RepoStore::new(provider));
        runtime.block_on(view.mount());

        log::debug!("Mounted view, screen is {:?}", view.screen());
        Ok(ViewCommandContext { runtime, view })
    }

    fn provider(
        options: &ViewOptions,
        config: &ViewerConfig,
    ) -> Result<Arc<dyn RepositoryProvider>> {
        if let Some(facts) = &options.facts {
            let mut provider = FactsProvider::load(facts)?;
            if let Some(limit) = options.limit {
                provider = provider.with_commit_limit(limit);
            }
            return Ok(Arc::new(provider));
        }

        let root = match &options.repo {
            Some(dir) => dir.clone(),
            None => env::current_dir()?,
        };
        let limit = options.limit.unwrap_or(config.commit_limit);
        log::debug!("Browsing {} with commit limit {limit}", root.display());
        Ok(Arc::new(LocalGitProvider::new(root).with_commit_limit(limit)))
    }
}

/// Mounted view plus the runtime that drives its requests
pub struct ViewCommandContext {
    runtime: Runtime,
    pub view: RepoView,
}

impl ViewCommandContext {
    pub fn switch_tab(&mut self, tab: Tab) {
        self.runtime.block_on(self.view.switch_tab(tab));
    }

    pub fn select_commit(&mut self, hash: &str) {
        self.runtime.block_on(self.view.select_commit(hash));
    }

    pub fn select_file(&mut self, path: &str) {
        self.runtime.block_on(self.view.select_file(path));
    }

    /// Current state, or an error when nothing could be loaded or `focus` failed.
    ///
    /// Other pending notifications are printed as warnings.
    pub fn browser_snapshot(&mut self, focus: Option<Operation>) -> Result<RepoSnapshot> {
        if let Screen::NoRepository { message } = self.view.screen() {
            return Err(RepoViewError::no_repository(message));
        }

        let snapshot = self.view.snapshot();
        if let Some(err) = focus.and_then(|op| snapshot.status(op).error.as_ref()) {
            return Err(RepoViewError::request_failed(err.message.clone()));
        }

        while let Some(notification) = self.view.take_notification() {
            print_warning(&notification.message);
        }
        Ok(snapshot)
    }

    pub fn visible_changes(&self) -> Vec<FileChange> {
        self.view.visible_changes()
    }
}
