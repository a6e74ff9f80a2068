//! Read-only git repository access.
//!
//! This module provides a high-level interface to the repository facts the browser
//! shows through the [`GitRepo`] struct. It wraps the `git2` library and turns its
//! objects into the typed domain model.
//!
//! # Public API
//! - [`GitRepo`]: Main interface for git repository queries
//!
//! # Key Features
//! - **Repository info**: Current branch (detached and unborn HEAD aware) and local branches
//! - **History**: Time-sorted commit walk from HEAD
//! - **Changes**: Per-commit and working-tree changes with unified hunk text
//! - **Tree and content**: HEAD file tree and UTF-8 file content
//! - **Type safety**: All operations return structured data instead of raw strings

use crate::core::{
    change_status::ChangeStatus,
    error::{RepoViewError, Result},
    model::{CommitInfo, FileChange, FileContent, FileTreeItem, RepoInfo},
    tree::build_tree,
};
use chrono::{DateTime, FixedOffset};
use git2::{
    BranchType, Commit, Diff, DiffOptions, ErrorCode, ObjectType, Patch, Repository, Sort, Tree,
    TreeWalkMode, TreeWalkResult,
};
use std::path::{Path, PathBuf};

pub struct GitRepo {
    repo: Repository,
}

impl GitRepo {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Repository::discover(path)?;
        Ok(GitRepo { repo })
    }

    pub fn get_repo_path(&self) -> PathBuf {
        self.repo.path().to_path_buf()
    }

    pub fn get_current_branch(&self) -> Result<String> {
        let head = match self.repo.head() {
            Ok(head) => head,
            Err(e) if e.code() == ErrorCode::UnbornBranch => return self.unborn_branch_name(),
            Err(e) => return Err(e.into()),
        };

        if let Some(branch_name) = head.shorthand() {
            if head.is_branch() {
                Ok(branch_name.to_string())
            } else {
                // Detached HEAD
                match head.target() {
                    Some(oid) => Ok(format!("detached at {}", &oid.to_string()[..7])),
                    None => Ok("detached".to_string()),
                }
            }
        } else {
            Ok("-none-".to_string())
        }
    }

    /// Branch HEAD points at before the first commit exists
    fn unborn_branch_name(&self) -> Result<String> {
        let head_ref = self.repo.find_reference("HEAD")?;
        let target = head_ref.symbolic_target().unwrap_or("-none-");
        Ok(target.trim_start_matches("refs/heads/").to_string())
    }

    /// Local branch names, sorted
    pub fn get_branches(&self) -> Result<Vec<String>> {
        let mut branches = Vec::new();
        for branch in self.repo.branches(Some(BranchType::Local))? {
            let (branch, _) = branch?;
            if let Some(name) = branch.name()? {
                branches.push(name.to_string());
            }
        }
        branches.sort();
        Ok(branches)
    }

    pub fn repo_info(&self) -> Result<RepoInfo> {
        Ok(RepoInfo {
            current_branch: self.get_current_branch()?,
            branches: self.get_branches()?,
        })
    }

    fn head_commit(&self) -> Result<Option<Commit<'_>>> {
        match self.repo.head() {
            Ok(head) => Ok(Some(head.peel_to_commit()?)),
            Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => {
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn head_tree(&self) -> Result<Option<Tree<'_>>> {
        match self.head_commit()? {
            Some(commit) => Ok(Some(commit.tree()?)),
            None => Ok(None),
        }
    }

    /// Most recent commits reachable from HEAD, newest first
    pub fn commits(&self, limit: usize) -> Result<Vec<CommitInfo>> {
        if self.head_commit()?.is_none() {
            return Ok(Vec::new());
        }

        let mut walk = self.repo.revwalk()?;
        walk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        walk.push_head()?;

        let mut commits = Vec::new();
        for oid in walk.take(limit) {
            let commit = self.repo.find_commit(oid?)?;
            commits.push(commit_info(&commit)?);
        }
        Ok(commits)
    }

    /// Changes introduced by a commit relative to its first parent.
    ///
    /// A root commit has no parent and yields no changes.
    pub fn commit_changes(&self, hash: &str) -> Result<Vec<FileChange>> {
        let commit = self
            .repo
            .revparse_single(hash)
            .and_then(|object| object.peel_to_commit())
            .map_err(|_| RepoViewError::unknown_commit(hash))?;

        if commit.parent_count() == 0 {
            return Ok(Vec::new());
        }

        let parent = commit.parent(0)?;
        let mut diff =
            self.repo
                .diff_tree_to_tree(Some(&parent.tree()?), Some(&commit.tree()?), None)?;
        diff.find_similar(None)?;
        diff_to_changes(&diff, None)
    }

    /// Staged changes followed by unstaged and untracked changes
    pub fn working_changes(&self) -> Result<Vec<FileChange>> {
        let head_tree = self.head_tree()?;
        let index = self.repo.index()?;

        let mut staged = self
            .repo
            .diff_tree_to_index(head_tree.as_ref(), Some(&index), None)?;
        staged.find_similar(None)?;

        let mut opts = DiffOptions::new();
        opts.include_untracked(true)
            .recurse_untracked_dirs(true)
            .show_untracked_content(true);
        let unstaged = self
            .repo
            .diff_index_to_workdir(Some(&index), Some(&mut opts))?;

        let mut changes = diff_to_changes(&staged, Some(true))?;
        changes.extend(diff_to_changes(&unstaged, Some(false))?);
        Ok(changes)
    }

    /// Blob paths of the HEAD tree in tree-walk order
    pub fn tracked_paths(&self) -> Result<Vec<String>> {
        let Some(tree) = self.head_tree()? else {
            return Ok(Vec::new());
        };

        let mut paths = Vec::new();
        tree.walk(TreeWalkMode::PreOrder, |root, entry| {
            if entry.kind() == Some(ObjectType::Blob) {
                if let Some(name) = entry.name() {
                    paths.push(format!("{root}{name}"));
                }
            }
            TreeWalkResult::Ok
        })?;
        Ok(paths)
    }

    pub fn file_tree(&self) -> Result<Vec<FileTreeItem>> {
        Ok(build_tree(self.tracked_paths()?))
    }

    /// UTF-8 content of the file at `path` in the HEAD tree
    pub fn file_content(&self, path: &str) -> Result<FileContent> {
        let not_found = || RepoViewError::not_a_text_file(path);

        let tree = self.head_tree()?.ok_or_else(not_found)?;
        let entry = tree.get_path(Path::new(path)).map_err(|_| not_found())?;
        let blob = entry
            .to_object(&self.repo)
            .and_then(|object| object.peel_to_blob())
            .map_err(|_| not_found())?;
        let content = std::str::from_utf8(blob.content()).map_err(|_| not_found())?;

        Ok(FileContent {
            content: content.to_string(),
        })
    }
}

fn commit_info(commit: &Commit<'_>) -> Result<CommitInfo> {
    let author = commit.author();
    let time = commit.time();
    let offset = FixedOffset::east_opt(time.offset_minutes() * 60)
        .ok_or_else(|| git2::Error::from_str("invalid commit time offset"))?;
    let date = DateTime::from_timestamp(time.seconds(), 0)
        .ok_or_else(|| git2::Error::from_str("invalid commit timestamp"))?
        .with_timezone(&offset);

    Ok(CommitInfo {
        hash: commit.id().to_string(),
        message: commit.message().unwrap_or("").trim_end().to_string(),
        author: format!(
            "{} <{}>",
            author.name().unwrap_or(""),
            author.email().unwrap_or("")
        ),
        date,
    })
}

fn diff_to_changes(diff: &Diff<'_>, staged: Option<bool>) -> Result<Vec<FileChange>> {
    let mut changes = Vec::with_capacity(diff.deltas().len());

    for (idx, delta) in diff.deltas().enumerate() {
        let path = delta
            .new_file()
            .path()
            .or_else(|| delta.old_file().path())
            .and_then(Path::to_str)
            .ok_or(RepoViewError::InvalidUtf8Path)?
            .to_string();

        let text = if delta.flags().is_binary() {
            None
        } else {
            match Patch::from_diff(diff, idx)? {
                Some(patch) => hunk_text(&patch)?,
                None => None,
            }
        };

        changes.push(FileChange {
            path,
            status: ChangeStatus::from_delta(delta.status()),
            diff: text,
            staged,
        });
    }

    Ok(changes)
}

/// Hunk headers and lines of a patch, without the file header
fn hunk_text(patch: &Patch<'_>) -> Result<Option<String>> {
    if patch.num_hunks() == 0 {
        return Ok(None);
    }

    let mut text = String::new();
    for hunk_idx in 0..patch.num_hunks() {
        let (hunk, line_count) = patch.hunk(hunk_idx)?;
        text.push_str(&String::from_utf8_lossy(hunk.header()));
        for line_idx in 0..line_count {
            let line = patch.line_in_hunk(hunk_idx, line_idx)?;
            if matches!(line.origin(), '+' | '-' | ' ') {
                text.push(line.origin());
            }
            text.push_str(&String::from_utf8_lossy(line.content()));
        }
    }
    Ok(Some(text))
}
