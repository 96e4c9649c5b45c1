//! The version-control side of reconciliation: branching off the commit
//! that holds the local documentation tree being synced, so a caller can
//! layer their own review workflow (forge pull request, manual push, ...)
//! on top without this crate needing to speak to a forge API.

mod error;

use std::path::{Path, PathBuf};

use git2::{BranchType, Repository};

pub use error::Error;

/// The operations a reconciliation run needs from whatever holds the
/// documentation tree's history. Opening a pull request is part of the
/// contract but is explicitly unimplemented here: turning a branch into a
/// review request is forge-specific and stays out of this crate.
pub trait VcsHost: Send + Sync {
    /// Creates `name` pointing at the current `HEAD` commit. Returns
    /// [`Error::BranchExists`] if the branch is already present.
    fn create_branch(&self, name: &str) -> Result<(), Error>;

    /// Opens a pull request for `branch` against the host's default
    /// branch. No implementation in this crate supports this; it exists so
    /// callers can depend on the trait without depending on a specific
    /// forge's SDK.
    fn open_pull_request(&self, branch: &str, title: &str, body: &str) -> Result<String, Error>;
}

/// A [`VcsHost`] backed by a local git checkout. Branching is implemented
/// directly against the repository; opening a pull request is not, since
/// that requires talking to a forge (GitHub, GitLab, ...) this crate
/// doesn't depend on.
pub struct LocalGitHost {
    repo_path: PathBuf,
}

impl LocalGitHost {
    pub fn new(repo_path: impl Into<PathBuf>) -> Self {
        Self {
            repo_path: repo_path.into(),
        }
    }

    fn open(&self) -> Result<Repository, Error> {
        Repository::discover(&self.repo_path).map_err(|source| Error::OpenRepository {
            path: self.repo_path.display().to_string(),
            source,
        })
    }
}

impl VcsHost for LocalGitHost {
    fn create_branch(&self, name: &str) -> Result<(), Error> {
        let repo = self.open()?;
        if repo.find_branch(name, BranchType::Local).is_ok() {
            return Err(Error::BranchExists {
                name: name.to_string(),
            });
        }
        let head_commit = repo.head()?.peel_to_commit()?;
        repo.branch(name, &head_commit, false)?;
        log::info!("created branch {name:?} at {}", head_commit.id());
        Ok(())
    }

    fn open_pull_request(&self, _branch: &str, _title: &str, _body: &str) -> Result<String, Error> {
        Err(Error::Unsupported)
    }
}

/// Whether `path` (or an ancestor of it) is inside a git working tree.
pub fn is_git_repository(path: &Path) -> bool {
    Repository::discover(path).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::process::Command;

    fn init_repo(path: &Path) {
        let status = Command::new("git")
            .arg("init")
            .arg("--quiet")
            .arg(path)
            .status()
            .expect("git must be on PATH for this test");
        assert!(status.success());
        Command::new("git")
            .args(["-C", path.to_str().unwrap(), "commit", "--allow-empty", "-m", "root", "--quiet"])
            .env("GIT_AUTHOR_NAME", "test")
            .env("GIT_AUTHOR_EMAIL", "test@example.com")
            .env("GIT_COMMITTER_NAME", "test")
            .env("GIT_COMMITTER_EMAIL", "test@example.com")
            .status()
            .expect("creating the root commit should succeed");
    }

    fn tmp_dir() -> tempfile::TempDir {
        tempfile::TempDir::new().unwrap()
    }

    #[test]
    fn create_branch_succeeds_once_and_fails_on_repeat() {
        let dir = tmp_dir();
        init_repo(dir.path());
        let host = LocalGitHost::new(dir.path());

        host.create_branch("docs-sync").unwrap();
        let err = host.create_branch("docs-sync").unwrap_err();
        assert!(matches!(err, Error::BranchExists { .. }));
    }

    #[test]
    fn open_pull_request_is_unsupported() {
        let dir = tmp_dir();
        init_repo(dir.path());
        let host = LocalGitHost::new(dir.path());

        let err = host.open_pull_request("docs-sync", "title", "body").unwrap_err();
        assert!(matches!(err, Error::Unsupported));
    }
}
