use std::path::Path;

use serde::Deserialize;

use crate::error::Error;

pub const METADATA_FILE_NAME: &str = "metadata.yaml";

/// The subset of `metadata.yaml` this engine cares about: the project name
/// (used to title a freshly created index topic) and, optionally, the URL
/// of an existing index topic to reconcile or migrate from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Metadata {
    pub name: String,
    #[serde(default)]
    pub docs: Option<String>,
}

/// Loads and validates `metadata.yaml` under `base_path`. A missing file, a
/// file that isn't valid YAML, or one missing/blank the `name` field is an
/// [`Error::Input`].
pub fn load(base_path: &Path) -> Result<Metadata, Error> {
    let path = base_path.join(METADATA_FILE_NAME);
    let raw = std::fs::read_to_string(&path).map_err(|source| {
        Error::Input(format!("could not read {}: {source}", path.display()))
    })?;
    let metadata: Metadata = serde_yaml::from_str(&raw)
        .map_err(|source| Error::Input(format!("malformed {}: {source}", path.display())))?;

    if metadata.name.trim().is_empty() {
        return Err(Error::Input(format!(
            "{} is missing a non-empty 'name' field",
            path.display()
        )));
    }

    Ok(metadata)
}
