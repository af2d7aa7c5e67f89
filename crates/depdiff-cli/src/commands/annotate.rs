use crate::input::read_records;
use anyhow::{Context, Result};
use clap::Args;
use depdiff_core::{create_annotations, CheckDocs, CheckRunOutput};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct AnnotateCommand {
    /// JSON scan results (`-` for stdin)
    #[arg(long, short = 'i', default_value = "-")]
    input: PathBuf,
}

pub fn handle_annotate_command(cmd: AnnotateCommand) -> Result<()> {
    let docs = CheckDocs::built_in().context("Failed to load built-in check table")?;
    let records = read_records(&cmd.input)?;

    let annotations = create_annotations(&records, &docs).context("Failed to build annotations")?;
    let output = CheckRunOutput::new(annotations);

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
