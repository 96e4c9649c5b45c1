use std::collections::{HashMap, HashSet};

use local_tree::LocalEntry;
use nav_table::{Navlink, TablePath, TableRow};

use crate::types::{
    Action, ContentChange, CreateAction, DeleteAction, NavlinkChange, NoopAction, UpdateAction,
};

/// Compares the locally walked tree against the remote index and produces
/// the ordered sequence of actions that brings the remote tree in line with
/// it: local traversal order first, then any rows that only exist remotely,
/// as deletes in reverse remote order.
///
/// `remote_content` supplies previously-fetched topic bodies for document
/// rows that also exist locally, keyed by path; rows absent from the map are
/// treated as having no fetched content (the common case for anything that
/// is about to be deleted rather than compared).
pub fn diff(
    local: &[LocalEntry],
    remote: &[TableRow],
    remote_content: &HashMap<TablePath, String>,
) -> Vec<Action> {
    let remote_by_path: HashMap<&TablePath, &TableRow> =
        remote.iter().map(|row| (&row.path, row)).collect();
    let mut matched: HashSet<TablePath> = HashSet::new();

    let mut actions: Vec<Action> = local
        .iter()
        .map(|entry| {
            let path = &entry.row.path;
            match remote_by_path.get(path) {
                Some(remote_row) => {
                    matched.insert(path.clone());
                    matched_action(entry, remote_row, remote_content)
                }
                None => Action::Create(CreateAction {
                    level: entry.row.level,
                    path: path.clone(),
                    navlink_title: entry.row.navlink.title.clone(),
                    content: entry.content.clone(),
                }),
            }
        })
        .collect();

    for row in remote.iter().rev() {
        if matched.contains(&row.path) {
            continue;
        }
        actions.push(Action::Delete(DeleteAction {
            level: row.level,
            path: row.path.clone(),
            navlink: row.navlink.clone(),
            content: remote_content.get(&row.path).cloned(),
        }));
    }

    actions
}

fn matched_action(
    entry: &LocalEntry,
    remote_row: &TableRow,
    remote_content: &HashMap<TablePath, String>,
) -> Action {
    let is_document = entry.content.is_some();
    let old_content = if is_document {
        remote_content.get(&entry.row.path).cloned()
    } else {
        None
    };
    let new_content = entry.content.clone();

    let unchanged = entry.row.level == remote_row.level
        && entry.row.navlink.title == remote_row.navlink.title
        && old_content == new_content;

    if unchanged {
        Action::Noop(NoopAction {
            level: entry.row.level,
            path: entry.row.path.clone(),
            navlink: remote_row.navlink.clone(),
            content: new_content,
        })
    } else {
        let new_navlink = Navlink {
            title: entry.row.navlink.title.clone(),
            link: remote_row.navlink.link.clone(),
        };
        Action::Update(UpdateAction {
            level: entry.row.level,
            path: entry.row.path.clone(),
            navlink_change: NavlinkChange {
                old: remote_row.navlink.clone(),
                new: new_navlink,
            },
            content_change: ContentChange {
                old: old_content,
                new: new_content,
            },
        })
    }
}
