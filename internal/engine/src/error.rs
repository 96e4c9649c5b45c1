use thiserror::Error;

/// Top-level error for a reconcile or migrate run. Each variant maps to one
/// of the abstract error kinds: `InputError`/`ClientError`/`ActionError`/
/// `MigrationError`/`ServerError`.
#[derive(Error, Debug)]
pub enum Error {
    #[error("input error: {0}")]
    Input(String),

    #[error("forum client error: {0}")]
    Client(#[from] forum_client::Error),

    #[error("action error: {0}")]
    Action(String),

    #[error("migration failed, {failed} of {attempted} items could not be written: {reasons:?}")]
    Migration {
        attempted: usize,
        failed: usize,
        reasons: Vec<String>,
    },

    #[error("server error: {0}")]
    Server(String),

    #[error(transparent)]
    Vcs(#[from] docsync_vcs::Error),

    #[error("invalid navigation table: {0}")]
    Table(#[from] nav_table::Error),

    #[error("error walking the local documentation tree: {0}")]
    LocalTree(#[from] local_tree::Error),
}
