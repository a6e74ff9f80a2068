//! libgit2-backed [`RepositoryProvider`].
//!
//! `git2::Repository` is not `Sync`, so every call discovers and opens the
//! repository on tokio's blocking pool and drops it when the query is done.

use crate::core::{
    error::{RepoViewError, Result},
    git::GitRepo,
    model::{CommitInfo, FileChange, FileContent, FileTreeItem, RepoInfo},
    provider::{ProviderError, RepositoryProvider},
};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Default number of commits returned by [`LocalGitProvider::get_commits`]
pub const DEFAULT_COMMIT_LIMIT: usize = 10;

#[derive(Debug, Clone)]
pub struct LocalGitProvider {
    root: PathBuf,
    commit_limit: usize,
}

impl LocalGitProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            commit_limit: DEFAULT_COMMIT_LIMIT,
        }
    }

    pub fn with_commit_limit(mut self, commit_limit: usize) -> Self {
        self.commit_limit = commit_limit;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Run a query against a freshly opened repository on the blocking pool
    async fn query<T, F>(&self, op: F) -> std::result::Result<T, ProviderError>
    where
        T: Send + 'static,
        F: FnOnce(&GitRepo) -> Result<T> + Send + 'static,
    {
        let root = self.root.clone();
        let outcome = tokio::task::spawn_blocking(move || {
            log::debug!("Opening repository from {}", root.display());
            let git_repo = GitRepo::open(&root).map_err(|_| RepoViewError::NotInGitRepo)?;
            log::debug!("Found repository at {}", git_repo.get_repo_path().display());
            op(&git_repo)
        })
        .await
        .map_err(RepoViewError::task_failed)
        .and_then(|result| result);

        outcome.map_err(ProviderError::from)
    }
}

#[async_trait]
impl RepositoryProvider for LocalGitProvider {
    async fn get_repo_info(&self) -> std::result::Result<RepoInfo, ProviderError> {
        self.query(|git_repo| git_repo.repo_info()).await
    }

    async fn get_commits(&self) -> std::result::Result<Vec<CommitInfo>, ProviderError> {
        let limit = self.commit_limit;
        self.query(move |git_repo| git_repo.commits(limit)).await
    }

    async fn get_file_changes(
        &self,
        commit_hash: &str,
    ) -> std::result::Result<Vec<FileChange>, ProviderError> {
        let hash = commit_hash.to_string();
        self.query(move |git_repo| git_repo.commit_changes(&hash))
            .await
    }

    async fn get_working_changes(&self) -> std::result::Result<Vec<FileChange>, ProviderError> {
        self.query(|git_repo| git_repo.working_changes()).await
    }

    async fn get_file_tree(&self) -> std::result::Result<Vec<FileTreeItem>, ProviderError> {
        self.query(|git_repo| git_repo.file_tree()).await
    }

    async fn get_file_content(&self, path: &str) -> std::result::Result<FileContent, ProviderError> {
        let path = path.to_string();
        self.query(move |git_repo| git_repo.file_content(&path))
            .await
    }
}
