use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("could not open the git repository at {path}: {source}")]
    OpenRepository {
        path: String,
        source: git2::Error,
    },

    #[error("branch {name:?} already exists")]
    BranchExists { name: String },

    #[error("git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("opening a pull request is not supported by this host")]
    Unsupported,
}
