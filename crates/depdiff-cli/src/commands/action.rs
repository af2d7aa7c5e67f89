use crate::input::{filter_change_kinds, read_records};
use crate::summary::print_summary;
use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;
use depdiff_config::{ActionConfig, FileConfig};
use depdiff_core::{classify, create_annotations, CheckDocs, CheckRunOutput, MarkdownRenderer};
use depdiff_info::GitHubClient;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ActionCommand {
    /// JSON scan results (`-` for stdin)
    #[arg(long, short = 'i', default_value = "-")]
    input: PathBuf,

    /// Optional depdiff.toml overrides
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Print the report instead of publishing it
    #[arg(long)]
    dry_run: bool,
}

pub fn handle_action_command(cmd: ActionCommand) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;
    runtime.block_on(async_handle_action_command(cmd))
}

async fn async_handle_action_command(cmd: ActionCommand) -> Result<()> {
    let mut config = ActionConfig::from_env().context("Failed to read action environment")?;
    if let Some(path) = &cmd.config {
        let file = FileConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?;
        config.merge_file(&file)?;
    }

    let docs = CheckDocs::built_in().context("Failed to load built-in check table")?;
    config.validate_checks(&docs)?;

    let records = read_records(&cmd.input)?;
    let records = filter_change_kinds(records, |kind| config.includes(kind));
    tracing::info!(
        repository = %config.repository,
        base = %config.base_ref,
        head = %config.head_ref,
        records = records.len(),
        "rendering dependency-diff report"
    );

    let insights = super::fetch_insights(&records).await?;
    let set = classify(&records);
    let report = MarkdownRenderer::new(&docs, &insights)
        .render(&set, &config.base_ref, &config.head_ref)
        .context("Failed to render report")?;
    let output = CheckRunOutput::new(
        create_annotations(&records, &docs).context("Failed to build annotations")?,
    );

    print_summary(&set);

    if cmd.dry_run {
        println!("{report}");
        if config.publish_check_run {
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        return Ok(());
    }

    let Some(token) = config.token.as_deref() else {
        bail!("No GitHub token: set INPUT_REPO_TOKEN or GITHUB_TOKEN, or pass --dry-run");
    };
    let github = GitHubClient::new(token)?;
    let repo = &config.repository;

    if config.publish_comment {
        let number = config.pull_request_number()?;
        let comment = github
            .create_issue_comment(&repo.owner, &repo.repo, number, &report)
            .await?;
        eprintln!(
            "{} {}",
            "✓ Posted report comment".green(),
            comment.html_url.unwrap_or_default().dimmed()
        );
    }

    if config.publish_check_run {
        let head_sha = config
            .head_sha
            .as_deref()
            .context("Missing GITHUB_SHA for the check run")?;
        let run = github
            .create_check_run(&repo.owner, &repo.repo, head_sha, &output)
            .await?;
        eprintln!(
            "{} {}",
            "✓ Created check run".green(),
            run.html_url.unwrap_or_default().dimmed()
        );
    }

    Ok(())
}
