//! Computes added/modified/deleted file sets between two points in a
//! repository's history, feeding the discovery stage and the incremental
//! chunk refresher.
//!
//! Two detection strategies, chosen by the caller:
//! - [`ChangeDetector::detect_between_revisions`] shells out to `git
//!   diff --name-status`, for repos with real commit history.
//! - [`ChangeDetector::detect_against_hashes`] walks the working tree and
//!   compares content hashes against a previously recorded map, for
//!   non-git checkouts or uncommitted working-tree changes.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use codegraph_ir::features::git_history::GitExecutor;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use walkdir::WalkDir;

use crate::error::{OrchestratorError, Result};

/// Three disjoint file-path sets describing what changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSet {
    pub added: Vec<String>,
    pub modified: Vec<String>,
    pub deleted: Vec<String>,
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.modified.is_empty() && self.deleted.is_empty()
    }

    pub fn total_changed(&self) -> usize {
        self.added.len() + self.modified.len() + self.deleted.len()
    }
}

const DEFAULT_IGNORED_DIRS: &[&str] = &[".git", "node_modules", "__pycache__", "target", ".venv"];

/// Extension- and ignore-rule-aware change detector for a single repo root.
pub struct ChangeDetector {
    repo_root: PathBuf,
    extensions: Vec<String>,
    ignored_dirs: Vec<String>,
}

impl ChangeDetector {
    pub fn new(repo_root: impl Into<PathBuf>) -> Self {
        Self {
            repo_root: repo_root.into(),
            extensions: vec!["py".to_string()],
            ignored_dirs: DEFAULT_IGNORED_DIRS.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions;
        self
    }

    pub fn with_ignored_dirs(mut self, ignored_dirs: Vec<String>) -> Self {
        self.ignored_dirs = ignored_dirs;
        self
    }

    /// Whether `path` passes the extension allow-list and isn't under an
    /// ignored directory.
    pub fn is_tracked(&self, path: &Path) -> bool {
        let has_tracked_extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| self.extensions.iter().any(|e| e == ext))
            .unwrap_or(false);
        if !has_tracked_extension {
            return false;
        }
        !path
            .components()
            .any(|c| self.ignored_dirs.iter().any(|d| c.as_os_str() == d.as_str()))
    }

    /// Diff two revisions with `git diff --name-status`. Renames are split
    /// into a delete of the old path and an add of the new path, since
    /// downstream stages key state by path, not by git's rename detection.
    pub fn detect_between_revisions(&self, old_rev: &str, new_rev: &str) -> Result<ChangeSet> {
        let git = GitExecutor::new(&self.repo_root).map_err(OrchestratorError::parse)?;
        let output = git
            .run_command(&["diff", "--name-status", old_rev, new_rev])
            .map_err(OrchestratorError::parse)?;

        let mut set = ChangeSet::default();
        for line in output.lines() {
            let mut fields = line.split('\t');
            let Some(status) = fields.next() else { continue };
            let status_code = status.chars().next().unwrap_or(' ');

            match status_code {
                'A' => {
                    if let Some(path) = fields.next() {
                        self.push_if_tracked(&mut set.added, path);
                    }
                }
                'M' | 'T' => {
                    if let Some(path) = fields.next() {
                        self.push_if_tracked(&mut set.modified, path);
                    }
                }
                'D' => {
                    if let Some(path) = fields.next() {
                        self.push_if_tracked(&mut set.deleted, path);
                    }
                }
                'R' | 'C' => {
                    let old_path = fields.next();
                    let new_path = fields.next();
                    if let Some(old_path) = old_path {
                        self.push_if_tracked(&mut set.deleted, old_path);
                    }
                    if let Some(new_path) = new_path {
                        self.push_if_tracked(&mut set.added, new_path);
                    }
                }
                _ => {}
            }
        }

        Ok(set)
    }

    fn push_if_tracked(&self, bucket: &mut Vec<String>, path: &str) {
        if self.is_tracked(Path::new(path)) {
            bucket.push(path.to_string());
        }
    }

    /// Compare the working tree against a previously recorded `file_path ->
    /// content_hash` map. Missing previous entries are additions; hash
    /// mismatches are modifications; previously-known paths absent on disk
    /// are deletions.
    pub fn detect_against_hashes(&self, previous_hashes: &HashMap<String, String>) -> ChangeSet {
        let mut set = ChangeSet::default();
        let mut seen = std::collections::HashSet::new();

        for entry in WalkDir::new(&self.repo_root)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            let path = entry.path();
            if !self.is_tracked(path) {
                continue;
            }
            let rel_path = path
                .strip_prefix(&self.repo_root)
                .unwrap_or(path)
                .to_string_lossy()
                .to_string();

            let Ok(content) = std::fs::read(path) else { continue };
            let hash = content_hash(&content);
            seen.insert(rel_path.clone());

            match previous_hashes.get(&rel_path) {
                None => set.added.push(rel_path),
                Some(prev_hash) if prev_hash != &hash => set.modified.push(rel_path),
                Some(_) => {}
            }
        }

        for prev_path in previous_hashes.keys() {
            if !seen.contains(prev_path) && self.is_tracked(Path::new(prev_path)) {
                set.deleted.push(prev_path.clone());
            }
        }

        set
    }
}

fn content_hash(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    format!("{:x}", hasher.finalize())
}
