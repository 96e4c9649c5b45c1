//! Compares a locally walked documentation tree against a remote navigation
//! index and produces the ordered set of actions needed to reconcile them.

mod diff;
mod types;

pub use diff::diff;
pub use types::{
    Action, ContentChange, CreateAction, DeleteAction, NavlinkChange, NoopAction, UpdateAction,
};
