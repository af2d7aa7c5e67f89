use crate::input::{filter_change_kinds, read_records};
use crate::summary::print_summary;
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use depdiff_core::{
    classify, create_annotations, Annotation, ChangeKind, CheckDocs, InsightsLookup,
    KnownInsights, MarkdownRenderer, NoInsights,
};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct RenderCommand {
    /// JSON scan results (`-` for stdin)
    #[arg(long, short = 'i', default_value = "-")]
    input: PathBuf,

    /// Base git reference
    #[arg(long)]
    base: String,

    /// Head git reference
    #[arg(long)]
    head: String,

    /// Link added dependencies known to deps.dev
    #[arg(long)]
    deps_dev: bool,

    /// Only report these change types (repeatable; default all)
    #[arg(long = "change-type")]
    change_types: Vec<ChangeKind>,

    /// Output format
    #[arg(long, short = 'o', value_enum, default_value_t = OutputFormat::Markdown)]
    output: OutputFormat,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Markdown,
    Json,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    report: &'a str,
    annotations: &'a [Annotation],
}

pub fn handle_render_command(cmd: RenderCommand) -> Result<()> {
    let docs = CheckDocs::built_in().context("Failed to load built-in check table")?;
    let records = read_records(&cmd.input)?;
    let records = filter_change_kinds(records, |kind| {
        cmd.change_types.is_empty() || cmd.change_types.contains(&kind)
    });

    let known: KnownInsights;
    let insights: &dyn InsightsLookup = if cmd.deps_dev {
        known = super::fetch_insights_blocking(&records)?;
        &known
    } else {
        &NoInsights
    };

    let set = classify(&records);
    let report = MarkdownRenderer::new(&docs, insights)
        .render(&set, &cmd.base, &cmd.head)
        .context("Failed to render report")?;

    match cmd.output {
        OutputFormat::Markdown => println!("{report}"),
        OutputFormat::Json => {
            let annotations =
                create_annotations(&records, &docs).context("Failed to build annotations")?;
            let json = JsonReport {
                report: &report,
                annotations: &annotations,
            };
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }

    print_summary(&set);
    Ok(())
}
