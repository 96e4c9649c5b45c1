use std::collections::HashMap;
use std::path::Path;

use forum_client::ForumClient;
use docsync_vcs::VcsHost;

use crate::error::Error;
use crate::metadata::{self, Metadata};
use crate::report::{ActionReport, ReportResult};
use crate::{executor, index_updater, migrator};

/// The subset of command-line/environment configuration the orchestrator
/// needs, independent of how the caller sourced it (CLI flags, env vars, ...).
#[derive(Debug, Clone, Default)]
pub struct UserInputs {
    pub dry_run: bool,
    pub delete_pages: bool,
    pub branch_name: Option<String>,
}

const DEFAULT_MIGRATION_BRANCH: &str = "docs-migration";

/// Top-level entry point: loads `metadata.yaml` under `base_path` and picks
/// reconcile, migrate, or index-creation based on whether `base_path/docs`
/// exists and whether a remote index is already known.
pub async fn orchestrate(
    base_path: &Path,
    inputs: UserInputs,
    create_if_not_exists: bool,
    client: &dyn ForumClient,
    vcs: &dyn VcsHost,
) -> Result<HashMap<String, ActionReport>, Error> {
    let metadata = metadata::load(base_path)?;
    let docs_dir = base_path.join("docs");

    if docs_dir.is_dir() {
        let index_url = metadata.docs.clone().ok_or_else(|| {
            Error::Input(
                "docs/ exists locally but metadata.yaml has no 'docs' index topic url"
                    .to_string(),
            )
        })?;
        return reconcile(&docs_dir, &index_url, &inputs, client).await;
    }

    if let Some(index_url) = metadata.docs.clone() {
        let report = migrate(base_path, &index_url, &inputs, client, vcs).await?;
        let mut out = HashMap::new();
        out.insert(report.location.clone(), report);
        return Ok(out);
    }

    if create_if_not_exists {
        return create_index(&metadata, client).await;
    }

    Err(Error::Input(
        "no local docs/ directory and no index topic url in metadata.yaml; \
         pass create_if_not_exists to start a new index"
            .to_string(),
    ))
}

async fn reconcile(
    docs_dir: &Path,
    index_url: &str,
    inputs: &UserInputs,
    client: &dyn ForumClient,
) -> Result<HashMap<String, ActionReport>, Error> {
    let local_entries = local_tree::walk(docs_dir)?;
    let local_rows: Vec<_> = local_entries.iter().map(|e| e.row.clone()).collect();
    nav_table::validate_levels(&local_rows)?;

    let index_body = client.retrieve_topic(index_url).await?;
    let (preamble, remote_rows) = nav_table::parse(&index_body)?;
    nav_table::validate_levels(&remote_rows)?;

    let mut remote_content = HashMap::new();
    for entry in &local_entries {
        if entry.content.is_none() {
            continue;
        }
        let remote_row = match remote_rows.iter().find(|row| row.path == entry.row.path) {
            Some(row) => row,
            None => continue,
        };
        if let Some(link) = &remote_row.navlink.link {
            let content = client.retrieve_topic(link).await?;
            remote_content.insert(entry.row.path.clone(), content);
        }
    }

    let actions = doc_differ::diff(&local_entries, &remote_rows, &remote_content);
    let (reports, rows) =
        executor::execute(&actions, client, inputs.dry_run, inputs.delete_pages).await?;

    if !inputs.dry_run {
        index_updater::update_index(client, index_url, &preamble, &rows).await?;
    }

    let mut out = HashMap::new();
    for report in reports {
        out.insert(report.location.clone(), report);
    }
    Ok(out)
}

async fn migrate(
    base_path: &Path,
    index_url: &str,
    inputs: &UserInputs,
    client: &dyn ForumClient,
    vcs: &dyn VcsHost,
) -> Result<ActionReport, Error> {
    let index_body = client.retrieve_topic(index_url).await?;
    let (preamble, rows) = nav_table::parse(&index_body)?;
    nav_table::validate_levels(&rows)?;

    let metas = migrator::plan(&preamble, &rows)?;
    let docs_dir = base_path.join("docs");
    let reports = migrator::execute(client, &metas, &docs_dir).await;

    let failures: Vec<String> = reports
        .iter()
        .filter(|report| report.result == ReportResult::Fail)
        .map(|report| report.reason.clone().unwrap_or_default())
        .collect();
    if !failures.is_empty() {
        return Err(Error::Migration {
            attempted: reports.len(),
            failed: failures.len(),
            reasons: failures,
        });
    }

    let branch_name = inputs
        .branch_name
        .clone()
        .unwrap_or_else(|| DEFAULT_MIGRATION_BRANCH.to_string());
    vcs.create_branch(&branch_name)?;
    match vcs.open_pull_request(
        &branch_name,
        "Migrate documentation from the forum",
        "Recovered the documentation tree from its forum index topic.",
    ) {
        Ok(pr_url) => Ok(ActionReport {
            row: None,
            location: pr_url,
            result: ReportResult::Success,
            reason: None,
        }),
        Err(docsync_vcs::Error::Unsupported) => Ok(ActionReport {
            row: None,
            location: branch_name,
            result: ReportResult::Success,
            reason: Some(
                "recovered tree committed to branch; open a pull request manually, \
                 this host does not support opening one"
                    .to_string(),
            ),
        }),
        Err(source) => Err(source.into()),
    }
}

async fn create_index(
    metadata: &Metadata,
    client: &dyn ForumClient,
) -> Result<HashMap<String, ActionReport>, Error> {
    let title = format!("{} Documentation Overview", title_case(&metadata.name));
    let preamble = format!(
        "Automatically created index for the {} documentation.\n\n",
        metadata.name
    );
    let body = nav_table::emit(&preamble, &[]);
    let url = client.create_topic(&title, &body).await?;

    let mut out = HashMap::new();
    out.insert(
        url.clone(),
        ActionReport {
            row: None,
            location: url,
            result: ReportResult::Success,
            reason: None,
        },
    );
    Ok(out)
}

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
