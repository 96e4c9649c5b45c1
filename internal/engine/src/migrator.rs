use std::path::{Path, PathBuf};

use forum_client::ForumClient;
use nav_table::{TablePath, TableRow};
use tokio::fs;

use crate::error::Error;
use crate::report::{ActionReport, ReportResult};

pub const INDEX_FILE_NAME: &str = "index.md";

/// One file or directory-marker the migrator needs to materialize, derived
/// from a single remote row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationMeta {
    Document {
        path: PathBuf,
        link: String,
        row: TableRow,
    },
    Gitkeep {
        path: PathBuf,
        row: TableRow,
    },
    Index {
        path: PathBuf,
        content: String,
    },
}

impl MigrationMeta {
    fn path(&self) -> &Path {
        match self {
            MigrationMeta::Document { path, .. } => path,
            MigrationMeta::Gitkeep { path, .. } => path,
            MigrationMeta::Index { path, .. } => path,
        }
    }
}

/// Translates a remote row stream into the file tree it describes. Rows
/// must already satisfy the level-sequence invariant ([`nav_table::validate_levels`]).
///
/// Groups are tracked on an explicit stack keyed by level; a group is only
/// written as an empty (`.gitkeep`-marked) directory if the walk never
/// produces a deeper descendant row for it, document or group alike.
pub fn plan(preamble: &str, rows: &[TableRow]) -> Result<Vec<MigrationMeta>, Error> {
    nav_table::validate_levels(rows)?;

    struct Open {
        local_path: PathBuf,
        table_prefix: TablePath,
        level: u32,
        row: TableRow,
        has_child: bool,
    }

    let mut stack: Vec<Open> = Vec::new();
    let mut metas = vec![MigrationMeta::Index {
        path: PathBuf::from(INDEX_FILE_NAME),
        content: preamble.to_string(),
    }];

    for row in rows {
        while let Some(top) = stack.last() {
            if top.level >= row.level {
                let closed = stack.pop().unwrap();
                if !closed.has_child {
                    metas.push(MigrationMeta::Gitkeep {
                        path: closed.local_path.join(local_tree::GITKEEP_NAME),
                        row: closed.row,
                    });
                }
            } else {
                break;
            }
        }

        let (parent_local, parent_prefix) = match stack.last() {
            Some(top) => (top.local_path.clone(), Some(top.table_prefix.clone())),
            None => (PathBuf::new(), None),
        };
        if let Some(top) = stack.last_mut() {
            top.has_child = true;
        }

        let name = extract_name(parent_prefix.as_ref(), &row.path);
        let local_path = parent_local.join(&name);

        if row.is_document() {
            let link = row
                .navlink
                .link
                .clone()
                .expect("document rows always carry a link");
            metas.push(MigrationMeta::Document {
                path: local_path.with_extension("md"),
                link,
                row: row.clone(),
            });
        } else {
            let table_prefix = match &parent_prefix {
                Some(parent) => parent.join(&name),
                None => TablePath::new(name.clone()),
            };
            stack.push(Open {
                local_path: local_path.clone(),
                table_prefix,
                level: row.level,
                row: row.clone(),
                has_child: false,
            });
        }
    }

    while let Some(closed) = stack.pop() {
        if !closed.has_child {
            metas.push(MigrationMeta::Gitkeep {
                path: closed.local_path.join(local_tree::GITKEEP_NAME),
                row: closed.row,
            });
        }
    }

    Ok(metas)
}

/// Strips `parent`'s table-path prefix from `table_path`, returning the
/// remaining token as the local file/directory name. If `table_path`
/// doesn't actually start with that prefix (an authoring inconsistency
/// upstream), the whole path is used verbatim instead of failing the run.
fn extract_name(parent: Option<&TablePath>, table_path: &TablePath) -> String {
    match parent {
        Some(parent) => parent
            .strip_prefix_of(table_path.as_str())
            .unwrap_or_else(|| table_path.as_str())
            .to_string(),
        None => table_path.as_str().to_string(),
    }
}

/// Materializes a migration plan under `docs_root`, fetching document
/// content from `client`. Returns one report per item; if any item failed,
/// the caller should treat the whole migration as failed (see
/// [`Error::Migration`], raised by the orchestrator once every item has
/// been attempted).
pub async fn execute(
    client: &dyn ForumClient,
    metas: &[MigrationMeta],
    docs_root: &Path,
) -> Vec<ActionReport> {
    let mut reports = Vec::with_capacity(metas.len());

    for meta in metas {
        let target = docs_root.join(meta.path());
        let report = match meta {
            MigrationMeta::Document { link, row, .. } => {
                match client.retrieve_topic(link).await {
                    Ok(content) => match write_file(&target, &content).await {
                        Ok(()) => ActionReport {
                            row: Some(row.clone()),
                            location: target.display().to_string(),
                            result: ReportResult::Success,
                            reason: None,
                        },
                        Err(reason) => ActionReport {
                            row: Some(row.clone()),
                            location: target.display().to_string(),
                            result: ReportResult::Fail,
                            reason: Some(reason),
                        },
                    },
                    Err(source) => ActionReport {
                        row: Some(row.clone()),
                        location: target.display().to_string(),
                        result: ReportResult::Fail,
                        reason: Some(source.to_string()),
                    },
                }
            }
            MigrationMeta::Gitkeep { row, .. } => match write_file(&target, "").await {
                Ok(()) => ActionReport {
                    row: Some(row.clone()),
                    location: target.display().to_string(),
                    result: ReportResult::Success,
                    reason: None,
                },
                Err(reason) => ActionReport {
                    row: Some(row.clone()),
                    location: target.display().to_string(),
                    result: ReportResult::Fail,
                    reason: Some(reason),
                },
            },
            MigrationMeta::Index { content, .. } => match write_file(&target, content).await {
                Ok(()) => ActionReport {
                    row: None,
                    location: target.display().to_string(),
                    result: ReportResult::Success,
                    reason: None,
                },
                Err(reason) => ActionReport {
                    row: None,
                    location: target.display().to_string(),
                    result: ReportResult::Fail,
                    reason: Some(reason),
                },
            },
        };
        reports.push(report);
    }

    reports
}

async fn write_file(path: &Path, content: &str) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| format!("creating {}: {e}", parent.display()))?;
    }
    fs::write(path, content)
        .await
        .map_err(|e| format!("writing {}: {e}", path.display()))
}
