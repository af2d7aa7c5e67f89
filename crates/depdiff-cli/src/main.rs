//! depdiff CLI - dependency-diff reports for pull requests.

mod commands;
mod input;
mod summary;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "depdiff")]
#[command(about = "Rank and report dependency changes between two git references", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Verbose logging on stderr (-v info, -vv debug)
    #[arg(short = 'v', global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Render the markdown report for a set of scan results
    Render(commands::RenderCommand),

    /// Print check-run annotations as JSON
    Annotate(commands::AnnotateCommand),

    /// Run inside a pull request workflow: render and publish to GitHub
    Action(commands::ActionCommand),
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Render(cmd) => commands::handle_render_command(cmd),
        Command::Annotate(cmd) => commands::handle_annotate_command(cmd),
        Command::Action(cmd) => commands::handle_action_command(cmd),
    }
}
