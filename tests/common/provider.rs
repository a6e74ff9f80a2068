//! Scripted repository provider
//!
//! Every provider call is answered from a per-method script. A reply can be queued
//! up front, or gated: the call then stays pending until the test releases it
//! through the returned sender, which lets tests choose the exact order in which
//! concurrent requests complete.

#![allow(dead_code)]

use async_trait::async_trait;
use repo_view::core::{
    ChangeStatus, CommitInfo, FileChange, FileContent, FileTreeItem, ProviderError, RepoInfo,
    RepositoryProvider,
};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use tokio::sync::oneshot;

pub type Reply<T> = Result<T, ProviderError>;

/// Queued replies for one provider method, keyed by call argument
pub struct Script<T> {
    replies: Mutex<HashMap<String, VecDeque<oneshot::Receiver<Reply<T>>>>>,
}

impl<T> Default for Script<T> {
    fn default() -> Self {
        Self {
            replies: Mutex::new(HashMap::new()),
        }
    }
}

impl<T> Script<T> {
    /// Queue a reply for `key` that is held back until the sender fires
    pub fn gate(&self, key: &str) -> oneshot::Sender<Reply<T>> {
        let (sender, receiver) = oneshot::channel();
        self.replies
            .lock()
            .unwrap()
            .entry(key.to_string())
            .or_default()
            .push_back(receiver);
        sender
    }

    /// Queue an immediate reply for `key`
    pub fn reply(&self, key: &str, reply: Reply<T>) {
        let sender = self.gate(key);
        let _ = sender.send(reply);
    }

    async fn next(&self, key: &str) -> Reply<T> {
        let receiver = self
            .replies
            .lock()
            .unwrap()
            .get_mut(key)
            .and_then(VecDeque::pop_front);

        match receiver {
            Some(receiver) => receiver
                .await
                .unwrap_or_else(|_| Err(ProviderError::failed("gate dropped"))),
            None => Err(ProviderError::failed(format!("unscripted call for '{key}'"))),
        }
    }
}

#[derive(Default)]
pub struct ScriptedProvider {
    pub repo_info: Script<RepoInfo>,
    pub commits: Script<Vec<CommitInfo>>,
    pub file_changes: Script<Vec<FileChange>>,
    pub working_changes: Script<Vec<FileChange>>,
    pub file_tree: Script<Vec<FileTreeItem>>,
    pub file_content: Script<FileContent>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    /// Provider answering the four initial fetches with an empty `main` repository
    pub fn mounted() -> Self {
        let provider = Self::default();
        provider.repo_info.reply("", Ok(repo_info("main")));
        provider.commits.reply("", Ok(Vec::new()));
        provider.working_changes.reply("", Ok(Vec::new()));
        provider.file_tree.reply("", Ok(Vec::new()));
        provider
    }

    /// Every call received so far, as `method argument`
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, method: &str, argument: &str) {
        let call = if argument.is_empty() {
            method.to_string()
        } else {
            format!("{method} {argument}")
        };
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl RepositoryProvider for ScriptedProvider {
    async fn get_repo_info(&self) -> Reply<RepoInfo> {
        self.record("get_repo_info", "");
        self.repo_info.next("").await
    }

    async fn get_commits(&self) -> Reply<Vec<CommitInfo>> {
        self.record("get_commits", "");
        self.commits.next("").await
    }

    async fn get_file_changes(&self, commit_hash: &str) -> Reply<Vec<FileChange>> {
        self.record("get_file_changes", commit_hash);
        self.file_changes.next(commit_hash).await
    }

    async fn get_working_changes(&self) -> Reply<Vec<FileChange>> {
        self.record("get_working_changes", "");
        self.working_changes.next("").await
    }

    async fn get_file_tree(&self) -> Reply<Vec<FileTreeItem>> {
        self.record("get_file_tree", "");
        self.file_tree.next("").await
    }

    async fn get_file_content(&self, path: &str) -> Reply<FileContent> {
        self.record("get_file_content", path);
        self.file_content.next(path).await
    }
}

pub fn repo_info(branch: &str) -> RepoInfo {
    RepoInfo {
        current_branch: branch.to_string(),
        branches: vec![branch.to_string()],
    }
}

pub fn commit(hash: &str, message: &str) -> CommitInfo {
    CommitInfo {
        hash: hash.to_string(),
        message: message.to_string(),
        author: "Test User <test@example.com>".to_string(),
        date: chrono::DateTime::parse_from_rfc3339("2024-01-01T12:00:00Z").unwrap(),
    }
}

pub fn modified(path: &str) -> FileChange {
    FileChange {
        path: path.to_string(),
        status: ChangeStatus::Modified,
        diff: Some("@@ -1 +1 @@\n-old\n+new".to_string()),
        staged: None,
    }
}

pub fn content(text: &str) -> FileContent {
    FileContent {
        content: text.to_string(),
    }
}
