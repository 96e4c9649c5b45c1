//! Enforces the level-sequence invariant on any row stream, regardless of
//! whether the rows were parsed from a table or produced by a filesystem
//! walk.

use crate::error::Error;
use crate::types::TableRow;

/// Validates that `rows[0].level == 1` and that no row's level jumps up by
/// more than 1 relative to its predecessor. Decreases of any size are
/// allowed.
pub fn validate_levels(rows: &[TableRow]) -> Result<(), Error> {
    let mut previous: Option<u32> = None;

    for row in rows {
        if row.level == 0 {
            return Err(Error::NonPositiveLevel {
                path: row.path.to_string(),
                level: row.level as i64,
            });
        }

        match previous {
            None if row.level != 1 => {
                return Err(Error::InvalidStartLevel {
                    path: row.path.to_string(),
                    level: row.level as i64,
                })
            }
            Some(previous_level) if row.level > previous_level + 1 => {
                return Err(Error::LevelJump {
                    path: row.path.to_string(),
                    previous: previous_level,
                    level: row.level,
                })
            }
            _ => {}
        }

        previous = Some(row.level);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Navlink, TablePath};

    fn row(level: u32, path: &str) -> TableRow {
        TableRow::new(level, TablePath::new(path), Navlink::group(path))
    }

    #[test]
    fn empty_sequence_is_valid() {
        assert!(validate_levels(&[]).is_ok());
    }

    #[test]
    fn rejects_non_one_starting_level() {
        let err = validate_levels(&[row(2, "a")]).unwrap_err();
        assert!(matches!(err, Error::InvalidStartLevel { .. }));
    }

    #[test]
    fn rejects_level_jump() {
        let err = validate_levels(&[row(1, "a"), row(3, "b")]).unwrap_err();
        assert!(matches!(err, Error::LevelJump { .. }));
    }

    #[test]
    fn allows_arbitrary_decrease() {
        assert!(validate_levels(&[row(1, "a"), row(2, "b"), row(3, "c"), row(1, "d")]).is_ok());
    }

    #[test]
    fn allows_single_step_increase() {
        assert!(validate_levels(&[row(1, "a"), row(2, "b"), row(3, "c")]).is_ok());
    }

    #[test]
    fn rejects_a_zero_level_mid_sequence() {
        let err = validate_levels(&[row(1, "a"), row(0, "b")]).unwrap_err();
        assert!(matches!(err, Error::NonPositiveLevel { .. }));
    }
}
