//! Git change detection for crawlhint.
//!
//! Lists the content files that were added, copied, modified or renamed
//! between two revisions (by default the last commit and its parent).
//! Deleted files are never reported.

mod filter;

pub use filter::ContentFilter;

use std::path::{Path, PathBuf};

use git2::{Delta, DiffFindOptions, DiffOptions, Repository};
use tracing::debug;

/// Error from revision-history queries.
#[derive(Debug, thiserror::Error)]
pub enum VcsError {
    /// libgit2 failure (repository not found, revision does not resolve, ...).
    #[error("git error: {0}")]
    Git(#[from] git2::Error),

    /// Changed path is not valid UTF-8.
    #[error("invalid UTF-8 in path: {}", .0.display())]
    InvalidUtf8(PathBuf),

    /// Repository has no working directory to read content from.
    #[error("repository at {} is bare", .0.display())]
    BareRepository(PathBuf),
}

/// A changed file, relative to the repository root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangedFile {
    /// Slash-separated path relative to the working directory.
    pub path: String,
}

/// Pair of revisions to compare.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionRange {
    /// Older revision.
    pub base: String,
    /// Newer revision.
    pub head: String,
}

impl Default for RevisionRange {
    fn default() -> Self {
        Self {
            base: "HEAD~1".to_owned(),
            head: "HEAD".to_owned(),
        }
    }
}

impl std::fmt::Display for RevisionRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.base, self.head)
    }
}

/// Queries a git repository for changed content files.
pub struct ChangeDetector {
    repo: Repository,
    workdir: PathBuf,
}

impl ChangeDetector {
    /// Open the repository containing `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`VcsError::Git`] if no repository is found, or
    /// [`VcsError::BareRepository`] if it has no working directory.
    pub fn open(dir: &Path) -> Result<Self, VcsError> {
        let repo = Repository::discover(dir)?;
        let workdir = repo
            .workdir()
            .ok_or_else(|| VcsError::BareRepository(repo.path().to_path_buf()))?
            .to_path_buf();
        Ok(Self { repo, workdir })
    }

    /// Working directory changed paths are relative to.
    #[must_use]
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// List content files changed between the two revisions of `range`.
    ///
    /// Renames are detected and reported under their new path. The result
    /// keeps the diff's path order and may be empty.
    ///
    /// # Errors
    ///
    /// Returns [`VcsError::Git`] if either revision does not resolve to a tree
    /// or the diff fails.
    pub fn changed_files(
        &self,
        range: &RevisionRange,
        filter: &ContentFilter,
    ) -> Result<Vec<ChangedFile>, VcsError> {
        let base = self.repo.revparse_single(&range.base)?.peel_to_tree()?;
        let head = self.repo.revparse_single(&range.head)?.peel_to_tree()?;

        let mut diff_opts = DiffOptions::new();
        let mut diff = self
            .repo
            .diff_tree_to_tree(Some(&base), Some(&head), Some(&mut diff_opts))?;

        let mut find_opts = DiffFindOptions::new();
        find_opts.renames(true);
        diff.find_similar(Some(&mut find_opts))?;

        let mut files = Vec::new();
        for delta in diff.deltas() {
            if !matches!(
                delta.status(),
                Delta::Added | Delta::Copied | Delta::Modified | Delta::Renamed
            ) {
                continue;
            }
            let Some(path) = delta.new_file().path() else {
                continue;
            };
            let path = path
                .to_str()
                .ok_or_else(|| VcsError::InvalidUtf8(path.to_path_buf()))?;

            if filter.matches(path) {
                files.push(ChangedFile {
                    path: path.to_owned(),
                });
            } else {
                debug!(path, "ignoring change outside content paths");
            }
        }

        debug!(range = %range, count = files.len(), "collected changed content files");
        Ok(files)
    }
}
