//! Enumerates a local documentation directory into the same row model the
//! navigation table codec produces, so the two can be diffed directly.

mod error;

use std::fs;
use std::path::{Path, PathBuf};

use nav_table::{Navlink, TablePath, TableRow};

pub use error::Error;

/// The sentinel empty file used to keep otherwise-empty directories under
/// version control. Never surfaced as a row.
pub const GITKEEP_NAME: &str = ".gitkeep";

/// A single entry discovered by [`walk`]: the row it corresponds to, its
/// local filesystem path, and (for documents) its file content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalEntry {
    pub row: TableRow,
    pub local_path: PathBuf,
    pub content: Option<String>,
}

/// Walks `docs_root` depth-first in deterministic (sorted) order, yielding
/// one [`LocalEntry`] per directory (group) and per `.md` file (document).
pub fn walk(docs_root: &Path) -> Result<Vec<LocalEntry>, Error> {
    let mut entries = Vec::new();
    walk_dir(docs_root, None, 1, &mut entries)?;
    Ok(entries)
}

fn walk_dir(
    dir: &Path,
    parent: Option<&TablePath>,
    level: u32,
    out: &mut Vec<LocalEntry>,
) -> Result<(), Error> {
    let mut children: Vec<fs::DirEntry> = read_dir(dir)?
        .collect::<Result<Vec<_>, std::io::Error>>()
        .map_err(|source| Error::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    children.sort_by_key(|entry| entry.file_name());

    for entry in children {
        let path = entry.path();
        let file_type = entry.file_type().map_err(|source| Error::Io {
            path: path.clone(),
            source,
        })?;
        let name = entry.file_name();
        let name = name.to_str().ok_or_else(|| Error::NotUtf8 {
            path: path.clone(),
        })?;

        if file_type.is_dir() {
            let table_path = table_path_for(parent, name);
            out.push(LocalEntry {
                row: TableRow::new(level, table_path.clone(), Navlink::group(title_case(name))),
                local_path: path.clone(),
                content: None,
            });
            walk_dir(&path, Some(&table_path), level + 1, out)?;
        } else if let Some(stem) = name.strip_suffix(".md") {
            let table_path = table_path_for(parent, stem);
            let content = fs::read_to_string(&path).map_err(|source| Error::Io {
                path: path.clone(),
                source,
            })?;
            out.push(LocalEntry {
                row: TableRow::new(level, table_path, Navlink::group(content.clone())),
                local_path: path,
                content: Some(content),
            });
        }
        // Anything else (including the gitkeep marker) doesn't surface as a row.
    }

    Ok(())
}

fn read_dir(dir: &Path) -> std::io::Result<fs::ReadDir> {
    fs::read_dir(dir)
}

fn table_path_for(parent: Option<&TablePath>, name: &str) -> TablePath {
    match parent {
        Some(parent) => parent.join(name),
        None => TablePath::new(name),
    }
}

/// Converts a dash/underscore-separated path token into Title Case, e.g.
/// `doc-one` -> `Doc One`.
fn title_case(token: &str) -> String {
    token
        .split(|c| c == '-' || c == '_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_file(path: &Path, content: &str) {
        fs::write(path, content).unwrap();
    }

    #[test]
    fn title_case_splits_on_dash_and_underscore() {
        assert_eq!(title_case("doc-one"), "Doc One");
        assert_eq!(title_case("my_doc_name"), "My Doc Name");
        assert_eq!(title_case("single"), "Single");
    }

    #[test]
    fn walk_orders_entries_and_skips_gitkeep() {
        let tmp = tempfile_dir();
        let docs = tmp.path();
        fs::create_dir(docs.join("nested")).unwrap();
        write_file(&docs.join("nested").join(GITKEEP_NAME), "");
        write_file(&docs.join("index.md"), "index content");
        write_file(&docs.join("zzz.md"), "zzz content");

        let entries = walk(docs).unwrap();
        let paths: Vec<String> = entries.iter().map(|e| e.row.path.to_string()).collect();

        assert_eq!(paths, vec!["index", "nested", "zzz"]);
        assert!(entries[1].row.is_group());
        assert!(entries[1].content.is_none());
    }

    #[test]
    fn walk_nests_documents_under_groups() {
        let tmp = tempfile_dir();
        let docs = tmp.path();
        fs::create_dir(docs.join("group-1")).unwrap();
        write_file(&docs.join("group-1").join("content-1.md"), "body");

        let entries = walk(docs).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].row.path.to_string(), "group-1");
        assert_eq!(entries[0].row.level, 1);
        assert_eq!(entries[1].row.path.to_string(), "group-1-content-1");
        assert_eq!(entries[1].row.level, 2);
        assert_eq!(entries[1].content.as_deref(), Some("body"));
    }

    #[test]
    fn group_titles_are_title_cased_but_document_titles_are_their_content() {
        let tmp = tempfile_dir();
        let docs = tmp.path();
        fs::create_dir(docs.join("nested-dir")).unwrap();
        write_file(&docs.join("doc.md"), "doc content 1");

        let entries = walk(docs).unwrap();
        let by_path = |path: &str| {
            entries
                .iter()
                .find(|e| e.row.path.as_str() == path)
                .unwrap()
        };

        assert_eq!(by_path("doc").row.navlink.title, "doc content 1");
        assert_eq!(by_path("nested-dir").row.navlink.title, "Nested Dir");
    }

    fn tempfile_dir() -> tempfile::TempDir {
        tempfile::TempDir::new().unwrap()
    }
}
