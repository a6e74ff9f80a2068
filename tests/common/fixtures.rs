//! Test data generation utilities and predefined scenarios

#![allow(dead_code)]

use super::repository::*;
use repo_view::core::error::Result;
use std::path::{Path, PathBuf};

/// Recorded facts for a small repository on `main` with two commits
pub const FACTS_JSON: &str = r#"{
    "repo_info": {"current_branch": "main", "branches": ["dev", "main"]},
    "commits": [
        {"hash": "deadbeefcafe", "message": "Fix greeting", "author": "Bob <bob@example.com>", "date": "2024-02-01T10:00:00+01:00"},
        {"hash": "0123456789ab", "message": "Initial commit", "author": "Bob <bob@example.com>", "date": "2024-01-31T10:00:00+01:00"}
    ],
    "file_changes": {
        "deadbeefcafe": [{"path": "x.txt", "status": "M", "diff": "@@ -1 +1 @@\n-hi\n+hello"}],
        "0123456789ab": []
    },
    "working_changes": [{"path": "notes.md", "status": "A", "staged": false}],
    "file_tree": [
        {"path": "src", "type": "dir", "children": [{"path": "src/app.ts", "type": "file"}]},
        {"path": "x.txt", "type": "file"}
    ],
    "file_contents": {"x.txt": "hello\n", "src/app.ts": "export {};\n"}
}"#;

/// Writes `json` to `facts.json` inside `dir`
pub fn write_facts_file(dir: &Path, json: &str) -> Result<PathBuf> {
    let path = dir.join("facts.json");
    std::fs::write(&path, json)?;
    Ok(path)
}

/// Scenario: two commits, a nested directory, one staged and one unstaged change
pub fn create_browsable_repo() -> Result<TestRepo> {
    let repo = setup_test_repo()?;

    commit_file(&repo.path, "README.md", "# Demo\n", "Initial commit")?;
    create_file(&repo.path, "src/main.rs", "fn main() {}\n")?;
    create_file(&repo.path, "src/lib.rs", "pub fn hello() {}\n")?;
    git_add(&repo.path, ".")?;
    git_commit(&repo.path, "Add sources")?;

    create_file(&repo.path, "src/main.rs", "fn main() {\n    println!(\"hi\");\n}\n")?;
    git_add(&repo.path, "src/main.rs")?;
    create_file(&repo.path, "README.md", "# Demo\n\nMore docs.\n")?;

    Ok(repo)
}
