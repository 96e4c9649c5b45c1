use doc_differ::Action;
use forum_client::ForumClient;
use nav_table::{Navlink, TableRow};

use crate::error::Error;
use crate::report::{ActionReport, ReportResult};

/// Placeholder link assigned to a document row created under `draft_mode`,
/// since no topic is actually created to link to.
pub const DRAFT_NAVLINK_LINK: &str = "<draft_navlink_link>";

/// Drives `actions` against `client` in order, honoring `draft_mode` and
/// `delete_pages`. Returns one report per action plus the rows that survive
/// into the regenerated index (deletes contribute no row).
///
/// A content-changed update whose new content is `None` is an engine
/// invariant violation and aborts the run immediately with
/// [`Error::Action`]; every other forum-client failure is captured as a
/// `FAIL` report and execution continues.
pub async fn execute(
    actions: &[Action],
    client: &dyn ForumClient,
    draft_mode: bool,
    delete_pages: bool,
) -> Result<(Vec<ActionReport>, Vec<TableRow>), Error> {
    let mut reports = Vec::with_capacity(actions.len());
    let mut rows = Vec::with_capacity(actions.len());

    for action in actions {
        match action {
            Action::Create(a) => {
                log::info!("{action} (draft mode: {draft_mode})");
                let is_document = a.content.is_some();
                if !is_document {
                    let row = TableRow::new(a.level, a.path.clone(), Navlink::group(&a.navlink_title));
                    reports.push(ActionReport {
                        row: Some(row.clone()),
                        location: a.path.to_string(),
                        result: if draft_mode {
                            ReportResult::Skipped
                        } else {
                            ReportResult::Success
                        },
                        reason: if draft_mode {
                            Some("draft mode".to_string())
                        } else {
                            None
                        },
                    });
                    rows.push(row);
                } else if draft_mode {
                    let row = TableRow::new(
                        a.level,
                        a.path.clone(),
                        Navlink::document(&a.navlink_title, DRAFT_NAVLINK_LINK),
                    );
                    reports.push(ActionReport {
                        row: Some(row.clone()),
                        location: a.path.to_string(),
                        result: ReportResult::Skipped,
                        reason: Some("draft mode".to_string()),
                    });
                    rows.push(row);
                } else {
                    let content = a.content.as_deref().unwrap_or("");
                    match client.create_topic(&a.navlink_title, content).await {
                        Ok(url) => {
                            let row = TableRow::new(
                                a.level,
                                a.path.clone(),
                                Navlink::document(&a.navlink_title, url.clone()),
                            );
                            reports.push(ActionReport {
                                row: Some(row.clone()),
                                location: url,
                                result: ReportResult::Success,
                                reason: None,
                            });
                            rows.push(row);
                        }
                        Err(source) => {
                            reports.push(ActionReport {
                                row: None,
                                location: a.path.to_string(),
                                result: ReportResult::Fail,
                                reason: Some(source.to_string()),
                            });
                        }
                    }
                }
            }

            Action::Update(a) => {
                log::info!("{action} (draft mode: {draft_mode})");
                let is_group = a.navlink_change.old.link.is_none();
                let content_changed = a.content_change.old != a.content_change.new;

                if is_group || draft_mode || !content_changed {
                    let reason = if draft_mode {
                        "draft mode"
                    } else if is_group {
                        "no remote topic for a group row"
                    } else {
                        "title/level only, nothing to push remotely"
                    };
                    let row = TableRow::new(a.level, a.path.clone(), a.navlink_change.new.clone());
                    reports.push(ActionReport {
                        row: Some(row.clone()),
                        location: a.path.to_string(),
                        result: ReportResult::Skipped,
                        reason: Some(reason.to_string()),
                    });
                    rows.push(row);
                    continue;
                }

                let new_content = a.content_change.new.as_deref().ok_or_else(|| {
                    Error::Action(format!(
                        "update for {:?} changed content to None",
                        a.path
                    ))
                })?;
                let url = a
                    .navlink_change
                    .old
                    .link
                    .clone()
                    .expect("document update always carries an existing link");

                match client.update_topic(&url, new_content).await {
                    Ok(()) => {
                        let row =
                            TableRow::new(a.level, a.path.clone(), a.navlink_change.new.clone());
                        reports.push(ActionReport {
                            row: Some(row.clone()),
                            location: url,
                            result: ReportResult::Success,
                            reason: None,
                        });
                        rows.push(row);
                    }
                    Err(source) => {
                        let row =
                            TableRow::new(a.level, a.path.clone(), a.navlink_change.old.clone());
                        reports.push(ActionReport {
                            row: Some(row.clone()),
                            location: url,
                            result: ReportResult::Fail,
                            reason: Some(source.to_string()),
                        });
                        rows.push(row);
                    }
                }
            }

            Action::Delete(a) => {
                log::info!(
                    "{action} (draft mode: {draft_mode}, delete pages: {delete_pages})"
                );
                let is_document = a.navlink.link.is_some();
                if !is_document || draft_mode {
                    reports.push(ActionReport {
                        row: None,
                        location: a.path.to_string(),
                        result: ReportResult::Skipped,
                        reason: Some(if draft_mode {
                            "draft mode".to_string()
                        } else {
                            "group rows have no remote topic".to_string()
                        }),
                    });
                    continue;
                }
                let url = a.navlink.link.clone().expect("checked is_document above");
                if !delete_pages {
                    reports.push(ActionReport {
                        row: None,
                        location: url,
                        result: ReportResult::Skipped,
                        reason: Some("delete_pages disabled".to_string()),
                    });
                    continue;
                }
                match client.delete_topic(&url).await {
                    Ok(()) => reports.push(ActionReport {
                        row: None,
                        location: url,
                        result: ReportResult::Success,
                        reason: None,
                    }),
                    Err(source) => reports.push(ActionReport {
                        row: None,
                        location: url,
                        result: ReportResult::Fail,
                        reason: Some(source.to_string()),
                    }),
                }
            }

            Action::Noop(a) => {
                log::info!("{action}");
                let row = TableRow::new(a.level, a.path.clone(), a.navlink.clone());
                let location = a.navlink.link.clone().unwrap_or_else(|| a.path.to_string());
                reports.push(ActionReport {
                    row: Some(row.clone()),
                    location,
                    result: ReportResult::Success,
                    reason: Some("noop".to_string()),
                });
                rows.push(row);
            }
        }
    }

    Ok((reports, rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use doc_differ::{ContentChange, CreateAction, DeleteAction, NavlinkChange, NoopAction, UpdateAction};
    use nav_table::TablePath;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockClient {
        created: Mutex<Vec<(String, String)>>,
        updated: Mutex<Vec<(String, String)>>,
        deleted: Mutex<Vec<String>>,
        fail_create: bool,
    }

    #[async_trait]
    impl ForumClient for MockClient {
        async fn create_topic(&self, title: &str, content: &str) -> Result<String, forum_client::Error> {
            if self.fail_create {
                return Err(forum_client::Error::InvalidUrl("boom".to_string()));
            }
            self.created.lock().unwrap().push((title.to_string(), content.to_string()));
            Ok(format!("https://forum.example/t/{title}/1"))
        }
        async fn retrieve_topic(&self, _url: &str) -> Result<String, forum_client::Error> {
            unimplemented!()
        }
        async fn update_topic(&self, url: &str, content: &str) -> Result<(), forum_client::Error> {
            self.updated.lock().unwrap().push((url.to_string(), content.to_string()));
            Ok(())
        }
        async fn delete_topic(&self, url: &str) -> Result<(), forum_client::Error> {
            self.deleted.lock().unwrap().push(url.to_string());
            Ok(())
        }
        async fn check_topic_read_permission(&self, _url: &str) -> Result<bool, forum_client::Error> {
            Ok(true)
        }
        async fn check_topic_write_permission(&self, _url: &str) -> Result<bool, forum_client::Error> {
            Ok(true)
        }
        fn absolute_url(&self, url: &str) -> Result<String, forum_client::Error> {
            Ok(url.to_string())
        }
    }

    #[tokio::test]
    async fn create_group_never_calls_the_client() {
        let client = MockClient::default();
        let action = Action::Create(CreateAction {
            level: 1,
            path: TablePath::new("section"),
            navlink_title: "Section".to_string(),
            content: None,
        });

        let (reports, rows) = execute(&[action], &client, false, false).await.unwrap();
        assert_eq!(reports[0].result, ReportResult::Success);
        assert!(client.created.lock().unwrap().is_empty());
        assert!(rows[0].navlink.link.is_none());
    }

    #[tokio::test]
    async fn create_group_in_draft_mode_is_skipped() {
        let client = MockClient::default();
        let action = Action::Create(CreateAction {
            level: 1,
            path: TablePath::new("section"),
            navlink_title: "Section".to_string(),
            content: None,
        });

        let (reports, rows) = execute(&[action], &client, true, false).await.unwrap();
        assert_eq!(reports[0].result, ReportResult::Skipped);
        assert!(client.created.lock().unwrap().is_empty());
        assert!(rows[0].navlink.link.is_none());
    }

    #[tokio::test]
    async fn create_document_in_draft_mode_gets_the_sentinel_link() {
        let client = MockClient::default();
        let action = Action::Create(CreateAction {
            level: 1,
            path: TablePath::new("doc"),
            navlink_title: "Doc".to_string(),
            content: Some("body".to_string()),
        });

        let (reports, rows) = execute(&[action], &client, true, false).await.unwrap();
        assert_eq!(reports[0].result, ReportResult::Skipped);
        assert_eq!(rows[0].navlink.link.as_deref(), Some(DRAFT_NAVLINK_LINK));
        assert!(client.created.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_document_outside_draft_mode_creates_a_topic() {
        let client = MockClient::default();
        let action = Action::Create(CreateAction {
            level: 1,
            path: TablePath::new("doc"),
            navlink_title: "Doc".to_string(),
            content: Some("body".to_string()),
        });

        let (reports, rows) = execute(&[action], &client, false, false).await.unwrap();
        assert_eq!(reports[0].result, ReportResult::Success);
        assert!(rows[0].navlink.link.is_some());
        assert_eq!(client.created.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_with_title_only_change_skips_the_remote_call() {
        let client = MockClient::default();
        let action = Action::Update(UpdateAction {
            level: 1,
            path: TablePath::new("doc"),
            navlink_change: NavlinkChange {
                old: Navlink::document("Old Title", "https://forum.example/t/doc/1"),
                new: Navlink::document("New Title", "https://forum.example/t/doc/1"),
            },
            content_change: ContentChange {
                old: Some("same".to_string()),
                new: Some("same".to_string()),
            },
        });

        let (reports, _rows) = execute(&[action], &client, false, false).await.unwrap();
        assert_eq!(reports[0].result, ReportResult::Skipped);
        assert!(client.updated.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_with_content_change_to_none_is_a_fatal_action_error() {
        let client = MockClient::default();
        let action = Action::Update(UpdateAction {
            level: 1,
            path: TablePath::new("doc"),
            navlink_change: NavlinkChange {
                old: Navlink::document("Title", "https://forum.example/t/doc/1"),
                new: Navlink::document("Title", "https://forum.example/t/doc/1"),
            },
            content_change: ContentChange {
                old: Some("body".to_string()),
                new: None,
            },
        });

        let err = execute(&[action], &client, false, false).await.unwrap_err();
        assert!(matches!(err, Error::Action(_)));
    }

    #[tokio::test]
    async fn delete_document_without_delete_pages_is_skipped_but_drops_the_row() {
        let client = MockClient::default();
        let action = Action::Delete(DeleteAction {
            level: 1,
            path: TablePath::new("doc"),
            navlink: Navlink::document("Doc", "https://forum.example/t/doc/1"),
            content: Some("body".to_string()),
        });

        let (reports, rows) = execute(&[action], &client, false, false).await.unwrap();
        assert_eq!(reports[0].result, ReportResult::Skipped);
        assert!(rows.is_empty());
        assert!(client.deleted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_document_with_delete_pages_calls_the_client() {
        let client = MockClient::default();
        let action = Action::Delete(DeleteAction {
            level: 1,
            path: TablePath::new("doc"),
            navlink: Navlink::document("Doc", "https://forum.example/t/doc/1"),
            content: Some("body".to_string()),
        });

        let (reports, _rows) = execute(&[action], &client, false, true).await.unwrap();
        assert_eq!(reports[0].result, ReportResult::Success);
        assert_eq!(client.deleted.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn client_failure_on_create_becomes_a_fail_report_and_execution_continues() {
        let client = MockClient {
            fail_create: true,
            ..Default::default()
        };
        let actions = vec![
            Action::Create(CreateAction {
                level: 1,
                path: TablePath::new("a"),
                navlink_title: "A".to_string(),
                content: Some("body".to_string()),
            }),
            Action::Noop(NoopAction {
                level: 1,
                path: TablePath::new("b"),
                navlink: Navlink::document("B", "https://forum.example/t/b/2"),
                content: Some("body".to_string()),
            }),
        ];

        let (reports, rows) = execute(&actions, &client, false, false).await.unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].result, ReportResult::Fail);
        assert_eq!(reports[1].result, ReportResult::Success);
        assert_eq!(rows.len(), 1);
    }
}
