use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(about = "Reconcile a local documentation tree with its forum index")]
struct Opt {
    /// Root of the repository holding `metadata.yaml` and, optionally, `docs/`.
    #[arg(long, default_value = ".")]
    base_path: PathBuf,

    #[arg(long, env = "DISCOURSE_HOST")]
    discourse_host: String,

    #[arg(long, env = "DISCOURSE_API_USERNAME")]
    discourse_api_username: String,

    #[arg(long, env = "DISCOURSE_API_KEY")]
    discourse_api_key: String,

    #[arg(long, env = "DISCOURSE_CATEGORY_ID")]
    discourse_category_id: u64,

    /// Compute and log actions without touching the forum server.
    #[arg(long)]
    dry_run: bool,

    /// Also delete the remote topic for documents removed locally.
    #[arg(long)]
    delete_pages: bool,

    /// Branch to commit a recovered tree to, in migrate mode.
    #[arg(long)]
    branch_name: Option<String>,

    /// Create a new index topic when no local docs/ and no remote index exist.
    #[arg(long)]
    create_if_not_exists: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    flexi_logger::Logger::try_with_env_or_str("info")?.start()?;

    let opt = Opt::parse();
    log::trace!("starting with options: {opt:?}");

    let client = forum_client::DiscourseClient::new(
        opt.discourse_host,
        opt.discourse_api_username,
        opt.discourse_api_key,
        opt.discourse_category_id,
    );
    let vcs = docsync_vcs::LocalGitHost::new(&opt.base_path);

    let inputs = docsync_engine::UserInputs {
        dry_run: opt.dry_run,
        delete_pages: opt.delete_pages,
        branch_name: opt.branch_name,
    };

    let reports = docsync_engine::orchestrate(
        &opt.base_path,
        inputs,
        opt.create_if_not_exists,
        &client,
        &vcs,
    )
    .await?;

    for (location, report) in &reports {
        log::info!(
            "{location}: {} ({})",
            report.result,
            report.reason.as_deref().unwrap_or("-")
        );
    }

    Ok(())
}
