//! Parsing, emission, and validation of the navigation table embedded in a
//! documentation index topic.

mod codec;
mod error;
mod types;
mod validate;

pub use codec::{emit, emit_with_marker, parse, parse_with_marker};
pub use error::Error;
pub use types::{Navlink, TablePath, TableRow};
pub use validate::validate_levels;
