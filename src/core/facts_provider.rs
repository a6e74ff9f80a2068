//! [`RepositoryProvider`] that serves recorded repository facts from JSON.
//!
//! The document is parsed once; each section stays a raw JSON value and is decoded
//! strictly on every request, so a malformed section only fails its own operation.
//!
//! ```json
//! {
//!   "repo_info": { "current_branch": "main", "branches": ["main"] },
//!   "commits": [],
//!   "file_changes": { "<hash>": [] },
//!   "working_changes": [],
//!   "file_tree": [],
//!   "file_contents": { "<path>": "<text>" }
//! }
//! ```

use crate::core::{
    error::{RepoViewError, Result},
    model::{decode_value, CommitInfo, FileChange, FileContent, FileTreeItem, RepoInfo},
    provider::{ProviderError, RepositoryProvider, NO_REPOSITORY_DETAIL},
};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::Path;

#[derive(Debug, Default, Clone, Deserialize)]
struct FactsDocument {
    #[serde(default)]
    repo_info: Value,
    #[serde(default)]
    commits: Value,
    #[serde(default)]
    file_changes: Map<String, Value>,
    #[serde(default)]
    working_changes: Value,
    #[serde(default)]
    file_tree: Value,
    #[serde(default)]
    file_contents: Map<String, Value>,
}

#[derive(Debug, Clone)]
pub struct FactsProvider {
    facts: FactsDocument,
    /// Recorded commits beyond this many are not served
    commit_limit: Option<usize>,
}

impl FactsProvider {
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        Ok(Self {
            facts: serde_json::from_str(json)?,
            commit_limit: None,
        })
    }

    pub fn with_commit_limit(mut self, commit_limit: usize) -> Self {
        self.commit_limit = Some(commit_limit);
        self
    }

    pub fn load(path: &Path) -> Result<Self> {
        log::debug!("Loading repository facts from {}", path.display());
        let content = std::fs::read_to_string(path)
            .map_err(|e| RepoViewError::facts_read_failed(path, e))?;
        Self::from_json(&content).map_err(|e| RepoViewError::facts_parse_failed(path, e))
    }
}

/// Missing or null list sections mean "no entries"
fn list_section(value: &Value) -> Value {
    if value.is_null() {
        Value::Array(Vec::new())
    } else {
        value.clone()
    }
}

#[async_trait]
impl RepositoryProvider for FactsProvider {
    async fn get_repo_info(&self) -> std::result::Result<RepoInfo, ProviderError> {
        if self.facts.repo_info.is_null() {
            return Err(ProviderError::not_found(NO_REPOSITORY_DETAIL));
        }
        Ok(decode_value(self.facts.repo_info.clone())?)
    }

    async fn get_commits(&self) -> std::result::Result<Vec<CommitInfo>, ProviderError> {
        let mut commits: Vec<CommitInfo> = decode_value(list_section(&self.facts.commits))?;
        if let Some(limit) = self.commit_limit {
            commits.truncate(limit);
        }
        Ok(commits)
    }

    async fn get_file_changes(
        &self,
        commit_hash: &str,
    ) -> std::result::Result<Vec<FileChange>, ProviderError> {
        let changes = self
            .facts
            .file_changes
            .get(commit_hash)
            .ok_or_else(|| ProviderError::from(RepoViewError::unknown_commit(commit_hash)))?;
        Ok(decode_value(list_section(changes))?)
    }

    async fn get_working_changes(&self) -> std::result::Result<Vec<FileChange>, ProviderError> {
        Ok(decode_value(list_section(&self.facts.working_changes))?)
    }

    async fn get_file_tree(&self) -> std::result::Result<Vec<FileTreeItem>, ProviderError> {
        Ok(decode_value(list_section(&self.facts.file_tree))?)
    }

    async fn get_file_content(&self, path: &str) -> std::result::Result<FileContent, ProviderError> {
        match self.facts.file_contents.get(path) {
            Some(Value::String(content)) => Ok(FileContent {
                content: content.clone(),
            }),
            _ => Err(RepoViewError::not_a_text_file(path).into()),
        }
    }
}
