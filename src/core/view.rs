//! Composition root for the repository browser.
//!
//! [`RepoView`] turns user intents (open the browser, switch tab, pick a commit,
//! pick a file) into store operations and decides which screen the presentation
//! layer shows.

use crate::core::model::FileChange;
use crate::core::store::{Operation, RepoSnapshot, RepoStore, StoreError};
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Working,
    Commit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// Initial fetches have not completed yet
    Loading,
    /// No repository could be loaded; `message` is shown full-page
    NoRepository { message: String },
    Browser,
}

/// Transient error report for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub operation: Operation,
    pub message: String,
}

impl From<&StoreError> for Notification {
    fn from(err: &StoreError) -> Self {
        Self {
            operation: err.operation,
            message: err.message.clone(),
        }
    }
}

#[derive(Debug)]
pub struct RepoView {
    store: RepoStore,
    active_tab: Tab,
    /// Set once `mount` has awaited every initial fetch
    mounted: AtomicBool,
    last_notified_seq: u64,
}

impl RepoView {
    pub fn new(store: RepoStore) -> Self {
        Self {
            store,
            active_tab: Tab::default(),
            mounted: AtomicBool::new(false),
            last_notified_seq: 0,
        }
    }

    pub fn store(&self) -> &RepoStore {
        &self.store
    }

    pub fn snapshot(&self) -> RepoSnapshot {
        self.store.snapshot()
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    /// Run the initial fetches concurrently and wait for all of them
    pub async fn mount(&self) {
        log::debug!("Mounting repository view");
        tokio::join!(
            self.store.fetch_working_changes(),
            self.store.fetch_repo_info(),
            self.store.fetch_commits(),
            self.store.fetch_file_tree(),
        );
        self.mounted.store(true, Ordering::Release);
    }

    pub async fn switch_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
        match tab {
            Tab::Working => self.store.fetch_working_changes().await,
            Tab::Commit => {
                let snapshot = self.store.snapshot();
                let target = snapshot
                    .selected_commit
                    .or_else(|| snapshot.commits.first().map(|commit| commit.hash.clone()));
                self.store.fetch_file_changes(target.as_deref()).await;
            }
        }
    }

    /// Show the changes of `hash` on the commit tab
    pub async fn select_commit(&mut self, hash: &str) {
        self.active_tab = Tab::Commit;
        self.store.fetch_file_changes(Some(hash)).await;
    }

    pub async fn select_file(&mut self, path: &str) {
        self.store.fetch_file_content(path).await;
    }

    pub fn screen(&self) -> Screen {
        if !self.mounted.load(Ordering::Acquire) {
            return Screen::Loading;
        }
        Self::screen_for(&self.store.snapshot())
    }

    fn screen_for(snapshot: &RepoSnapshot) -> Screen {
        if snapshot.repo_info.is_some() {
            return Screen::Browser;
        }

        let repo_error = snapshot.status(Operation::RepoInfo).error.as_ref();
        match repo_error.or_else(|| snapshot.error()) {
            Some(err) => Screen::NoRepository {
                message: err.message.clone(),
            },
            None if snapshot.status(Operation::RepoInfo).is_pending() => Screen::Loading,
            None => Screen::Browser,
        }
    }

    /// Next failure not yet reported, oldest first.
    ///
    /// Every failure the store logs is reported once, even if its operation has
    /// since been restarted. Failures logged while the no-repository screen is
    /// shown are consumed silently.
    pub fn take_notification(&mut self) -> Option<Notification> {
        let unseen = self.store.failures_since(self.last_notified_seq);

        if matches!(
            Self::screen_for(&self.store.snapshot()),
            Screen::NoRepository { .. }
        ) {
            if let Some(latest) = unseen.last() {
                self.last_notified_seq = latest.seq;
            }
            return None;
        }

        let next = unseen.first()?;
        self.last_notified_seq = next.seq;
        Some(Notification::from(next))
    }

    /// Changes listed under the active tab
    pub fn visible_changes(&self) -> Vec<FileChange> {
        let snapshot = self.store.snapshot();
        match self.active_tab {
            Tab::Working => snapshot.working_changes,
            Tab::Commit => snapshot.selected_commit_changes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::facts_provider::FactsProvider;
    use std::sync::Arc;

    const FACTS: &str = r#"{
        "repo_info": {"current_branch": "main", "branches": ["main"]},
        "commits": [
            {"hash": "c2", "message": "Second", "author": "Ann <ann@example.com>", "date": "2024-03-02T09:00:00Z"},
            {"hash": "c1", "message": "First", "author": "Ann <ann@example.com>", "date": "2024-03-01T09:00:00Z"}
        ],
        "file_changes": {
            "c2": [{"path": "b.txt", "status": "A"}],
            "c1": [{"path": "a.txt", "status": "A"}]
        },
        "working_changes": [{"path": "a.txt", "status": "M", "staged": false}],
        "file_tree": [{"path": "a.txt", "type": "file"}, {"path": "b.txt", "type": "file"}],
        "file_contents": {"a.txt": "alpha\n"}
    }"#;

    fn view(json: &str) -> RepoView {
        let provider = FactsProvider::from_json(json).unwrap();
        RepoView::new(RepoStore::new(Arc::new(provider)))
    }

    #[tokio::test]
    async fn test_loading_until_mounted() {
        let view = view(FACTS);
        assert_eq!(view.screen(), Screen::Loading);

        view.mount().await;
        assert_eq!(view.screen(), Screen::Browser);

        let snapshot = view.snapshot();
        assert_eq!(snapshot.commits.len(), 2);
        assert_eq!(snapshot.file_tree.len(), 2);
        assert_eq!(snapshot.working_changes.len(), 1);
    }

    #[tokio::test]
    async fn test_commit_tab_defaults_to_newest_commit() {
        let mut view = view(FACTS);
        view.mount().await;

        view.switch_tab(Tab::Commit).await;
        assert_eq!(view.snapshot().selected_commit.as_deref(), Some("c2"));
        assert_eq!(view.visible_changes()[0].path, "b.txt");

        view.select_commit("c1").await;
        view.switch_tab(Tab::Working).await;
        view.switch_tab(Tab::Commit).await;
        assert_eq!(view.snapshot().selected_commit.as_deref(), Some("c1"));
        assert_eq!(view.visible_changes()[0].path, "a.txt");
    }

    #[tokio::test]
    async fn test_commit_tab_without_commits() {
        let mut view = view(r#"{"repo_info": {"current_branch": "main", "branches": []}}"#);
        view.mount().await;

        view.switch_tab(Tab::Commit).await;
        assert!(view.visible_changes().is_empty());
        assert!(view.take_notification().is_none());
    }

    #[tokio::test]
    async fn test_missing_repository_screen() {
        let mut view = view("{}");
        view.mount().await;

        match view.screen() {
            Screen::NoRepository { message } => {
                assert!(message.starts_with("No Git repository found"))
            }
            other => panic!("unexpected screen {other:?}"),
        }
        assert!(view.take_notification().is_none());
    }

    #[tokio::test]
    async fn test_notifications_are_one_shot() {
        let mut view = view(FACTS);
        view.mount().await;

        view.select_file("missing.txt").await;
        let notification = view.take_notification().unwrap();
        assert_eq!(notification.operation, Operation::FileContent);
        assert_eq!(
            notification.message,
            "File not found or is not a text file: missing.txt"
        );
        assert!(view.take_notification().is_none());

        view.select_file("missing.txt").await;
        assert!(view.take_notification().is_some());
    }

    #[tokio::test]
    async fn test_failure_is_reported_after_a_successful_retry() {
        let mut view = view(FACTS);
        view.mount().await;

        view.select_file("missing.txt").await;
        view.select_file("a.txt").await;
        assert!(view.snapshot().error().is_none());

        let notification = view.take_notification().expect("earlier failure kept");
        assert_eq!(notification.operation, Operation::FileContent);
        assert!(view.take_notification().is_none());
    }
}
