//! Repository view-state store.
//!
//! [`RepoStore`] is the single source of truth for what the browser shows. It owns
//! every collection fetched from the [`RepositoryProvider`], the current selections
//! and one status record per logical operation. Nothing else writes these fields;
//! readers take a [`RepoSnapshot`] or subscribe to revision changes.
//!
//! # Request lifecycle
//!
//! Every fetch runs its begin phase synchronously when called: the operation turns
//! Pending, its previous error is cleared, selection fields are assigned and stale
//! content is dropped. The returned future awaits the provider and completes the
//! request. Failures never escape; they are recorded in the operation's status.
//!
//! # Ordering
//!
//! Each operation has a generation counter bumped by every request. A completion
//! whose generation is no longer current is discarded, so the most recently issued
//! request for an operation always determines its fields, whatever order the
//! provider answers in.
//!
//! # Failure log
//!
//! Restarting an operation clears the error in its status, so the store also keeps
//! every applied failure in a bounded log ordered by sequence number. Readers that
//! must see each failure exactly once poll [`RepoStore::failures_since`].

use crate::core::{
    model::{CommitInfo, FileChange, FileTreeItem, RepoInfo},
    provider::{ProviderError, RepositoryProvider},
};
use std::collections::VecDeque;
use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::watch;

/// Logical store operations, one status slot each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operation {
    RepoInfo,
    Commits,
    FileChanges,
    WorkingChanges,
    FileTree,
    FileContent,
}

impl Operation {
    pub const ALL: [Operation; 6] = [
        Operation::RepoInfo,
        Operation::Commits,
        Operation::FileChanges,
        Operation::WorkingChanges,
        Operation::FileTree,
        Operation::FileContent,
    ];

    fn slot(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Operation::RepoInfo => "repository info",
            Operation::Commits => "commits",
            Operation::FileChanges => "file changes",
            Operation::WorkingChanges => "working changes",
            Operation::FileTree => "file tree",
            Operation::FileContent => "file content",
        }
    }

    /// Message shown for failures that carry no not-found detail
    pub fn fallback_message(self) -> &'static str {
        match self {
            Operation::RepoInfo => "Failed to fetch repository info",
            Operation::Commits => "Failed to fetch commits",
            Operation::FileChanges => "Failed to fetch file changes",
            Operation::WorkingChanges => "Failed to fetch working changes",
            Operation::FileTree => "Failed to fetch file tree",
            Operation::FileContent => "Failed to fetch file content",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Pending,
    Success,
    Failure,
}

/// How a failure is surfaced to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The provider says the queried resource does not exist
    ResourceAbsent,
    /// Transport, decode or unspecified failure
    OperationFailed,
}

/// A failure recorded by the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreError {
    pub operation: Operation,
    pub kind: FailureKind,
    pub message: String,
    /// Store-wide order in which failures were recorded, starting at 1
    pub seq: u64,
}

impl StoreError {
    fn classify(operation: Operation, err: &ProviderError, seq: u64) -> Self {
        let (kind, message) = match err.not_found_detail() {
            Some(detail) => (FailureKind::ResourceAbsent, detail.to_string()),
            None => (
                FailureKind::OperationFailed,
                operation.fallback_message().to_string(),
            ),
        };
        Self {
            operation,
            kind,
            message,
            seq,
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpStatus {
    pub phase: Phase,
    pub error: Option<StoreError>,
}

impl OpStatus {
    pub fn is_pending(&self) -> bool {
        self.phase == Phase::Pending
    }
}

/// Point-in-time copy of everything the store holds
#[derive(Debug, Clone, Default)]
pub struct RepoSnapshot {
    pub repo_info: Option<RepoInfo>,
    pub commits: Vec<CommitInfo>,
    /// Most recently requested commit
    pub selected_commit: Option<String>,
    pub selected_commit_changes: Vec<FileChange>,
    pub working_changes: Vec<FileChange>,
    pub file_tree: Vec<FileTreeItem>,
    pub selected_file: Option<String>,
    /// Content of `selected_file`, once its fetch succeeded
    pub file_content: Option<String>,
    statuses: [OpStatus; 6],
}

impl RepoSnapshot {
    pub fn status(&self, operation: Operation) -> &OpStatus {
        &self.statuses[operation.slot()]
    }

    /// True while any operation is in flight
    pub fn loading(&self) -> bool {
        self.statuses.iter().any(OpStatus::is_pending)
    }

    /// Most recently recorded failure that is still current
    pub fn error(&self) -> Option<&StoreError> {
        self.errors().pop()
    }

    /// Every current failure, oldest first
    pub fn errors(&self) -> Vec<&StoreError> {
        let mut errors: Vec<&StoreError> = self
            .statuses
            .iter()
            .filter_map(|status| status.error.as_ref())
            .collect();
        errors.sort_by_key(|err| err.seq);
        errors
    }
}

/// Failures kept for [`RepoStore::failures_since`]
const FAILURE_LOG_CAPACITY: usize = 32;

struct StoreState {
    snapshot: RepoSnapshot,
    generations: [u64; 6],
    last_error_seq: u64,
    failures: VecDeque<StoreError>,
}

/// Identifies one issued request
#[derive(Debug, Clone, Copy)]
struct Ticket {
    operation: Operation,
    generation: u64,
}

/// Shared handle to the repository view state.
///
/// Cloning is cheap; every clone reads and writes the same state.
#[derive(Clone)]
pub struct RepoStore {
    provider: Arc<dyn RepositoryProvider>,
    state: Arc<Mutex<StoreState>>,
    revision: Arc<watch::Sender<u64>>,
}

impl fmt::Debug for RepoStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RepoStore")
            .field("revision", &*self.revision.borrow())
            .finish_non_exhaustive()
    }
}

impl RepoStore {
    pub fn new(provider: Arc<dyn RepositoryProvider>) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            provider,
            state: Arc::new(Mutex::new(StoreState {
                snapshot: RepoSnapshot::default(),
                generations: [0; 6],
                last_error_seq: 0,
                failures: VecDeque::with_capacity(FAILURE_LOG_CAPACITY),
            })),
            revision: Arc::new(revision),
        }
    }

    pub fn snapshot(&self) -> RepoSnapshot {
        self.lock().snapshot.clone()
    }

    /// Receiver that observes a new revision after every state change
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    /// Logged failures with a sequence number above `seq`, oldest first.
    ///
    /// Failures stay in the log after their operation restarts; only the oldest
    /// entries are dropped once the log is full.
    pub fn failures_since(&self, seq: u64) -> Vec<StoreError> {
        self.lock()
            .failures
            .iter()
            .filter(|err| err.seq > seq)
            .cloned()
            .collect()
    }

    pub fn fetch_repo_info(&self) -> impl Future<Output = ()> + Send + 'static {
        let ticket = self.begin(Operation::RepoInfo, |_| {});
        let store = self.clone();
        async move {
            let result = store.provider.get_repo_info().await;
            store.complete(ticket, result, |s, info| s.repo_info = Some(info), |_| {});
        }
    }

    pub fn fetch_commits(&self) -> impl Future<Output = ()> + Send + 'static {
        let ticket = self.begin(Operation::Commits, |_| {});
        let store = self.clone();
        async move {
            let result = store.provider.get_commits().await;
            store.complete(ticket, result, |s, commits| s.commits = commits, |_| {});
        }
    }

    pub fn fetch_file_tree(&self) -> impl Future<Output = ()> + Send + 'static {
        let ticket = self.begin(Operation::FileTree, |_| {});
        let store = self.clone();
        async move {
            let result = store.provider.get_file_tree().await;
            store.complete(ticket, result, |s, tree| s.file_tree = tree, |_| {});
        }
    }

    pub fn fetch_working_changes(&self) -> impl Future<Output = ()> + Send + 'static {
        let ticket = self.begin(Operation::WorkingChanges, |_| {});
        let store = self.clone();
        async move {
            let result = store.provider.get_working_changes().await;
            store.complete(
                ticket,
                result,
                |s, changes| s.working_changes = changes,
                |_| {},
            );
        }
    }

    /// Fetch the changes of `commit_hash`.
    ///
    /// An absent or empty hash clears the selection and completes immediately with no
    /// changes, without calling the provider.
    pub fn fetch_file_changes(
        &self,
        commit_hash: Option<&str>,
    ) -> impl Future<Output = ()> + Send + 'static {
        let hash = commit_hash.filter(|h| !h.is_empty()).map(str::to_owned);
        let ticket = self.begin(Operation::FileChanges, |s| {
            s.selected_commit = hash.clone();
            s.selected_commit_changes.clear();
        });

        let store = self.clone();
        let request = match hash {
            Some(hash) => Some(hash),
            None => {
                store.complete(ticket, Ok(Vec::new()), |_, _: Vec<FileChange>| {}, |_| {});
                None
            }
        };

        async move {
            if let Some(hash) = request {
                let result = store.provider.get_file_changes(&hash).await;
                store.complete(
                    ticket,
                    result,
                    |s, changes| s.selected_commit_changes = changes,
                    |_| {},
                );
            }
        }
    }

    /// Select `path` and fetch its content.
    ///
    /// The selection is assigned and the previous content dropped before this
    /// returns; the content itself arrives when the future completes.
    pub fn fetch_file_content(&self, path: &str) -> impl Future<Output = ()> + Send + 'static {
        let path = path.to_owned();
        let ticket = self.begin(Operation::FileContent, |s| {
            s.selected_file = Some(path.clone());
            s.file_content = None;
        });

        let store = self.clone();
        async move {
            let result = store.provider.get_file_content(&path).await;
            store.complete(
                ticket,
                result,
                |s, content| s.file_content = Some(content.content),
                |s| s.file_content = None,
            );
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn update<R>(&self, f: impl FnOnce(&mut StoreState) -> R) -> R {
        let result = f(&mut self.lock());
        self.revision.send_modify(|revision| *revision += 1);
        result
    }

    fn begin(&self, operation: Operation, prepare: impl FnOnce(&mut RepoSnapshot)) -> Ticket {
        let slot = operation.slot();
        let ticket = self.update(|state| {
            state.generations[slot] += 1;
            state.snapshot.statuses[slot] = OpStatus {
                phase: Phase::Pending,
                error: None,
            };
            prepare(&mut state.snapshot);
            Ticket {
                operation,
                generation: state.generations[slot],
            }
        });
        log::debug!("Issued {} request #{}", operation, ticket.generation);
        ticket
    }

    fn complete<T>(
        &self,
        ticket: Ticket,
        result: Result<T, ProviderError>,
        apply: impl FnOnce(&mut RepoSnapshot, T),
        on_failure: impl FnOnce(&mut RepoSnapshot),
    ) {
        let slot = ticket.operation.slot();
        let mut state = self.lock();

        if state.generations[slot] != ticket.generation {
            log::debug!(
                "Discarding stale {} response #{} (current #{})",
                ticket.operation,
                ticket.generation,
                state.generations[slot]
            );
            return;
        }

        let status = match result {
            Ok(value) => {
                apply(&mut state.snapshot, value);
                OpStatus {
                    phase: Phase::Success,
                    error: None,
                }
            }
            Err(err) => {
                log::warn!("Fetching {} failed: {err}", ticket.operation);
                state.last_error_seq += 1;
                let error = StoreError::classify(ticket.operation, &err, state.last_error_seq);
                on_failure(&mut state.snapshot);
                if state.failures.len() == FAILURE_LOG_CAPACITY {
                    state.failures.pop_front();
                }
                state.failures.push_back(error.clone());
                OpStatus {
                    phase: Phase::Failure,
                    error: Some(error),
                }
            }
        };
        state.snapshot.statuses[slot] = status;
        drop(state);

        self.revision.send_modify(|revision| *revision += 1);
    }
}
