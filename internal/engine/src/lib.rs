//! Drives reconciliation between a local documentation tree and its forum
//! index, and the inverse migration that reconstructs a tree from a remote
//! index alone.

mod error;
mod executor;
mod index_updater;
mod metadata;
mod migrator;
mod orchestrator;
mod report;

pub use error::Error;
pub use executor::{execute, DRAFT_NAVLINK_LINK};
pub use index_updater::update_index;
pub use metadata::{load as load_metadata, Metadata, METADATA_FILE_NAME};
pub use migrator::{execute as migrate_execute, plan as migrate_plan, MigrationMeta, INDEX_FILE_NAME};
pub use orchestrator::{orchestrate, UserInputs};
pub use report::{ActionReport, ReportResult};
