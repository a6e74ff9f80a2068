use clap::{Parser, Subcommand};
use repo_view::commands::*;
use repo_view::core::{command_init::ViewOptions, error::Result, print_error};
use std::env;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "repo-view")]
#[command(about = "A read-only browser for Git repositories")]
#[command(version = "0.1.0")]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Repository directory (defaults to the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    repo: Option<PathBuf>,

    /// Browse recorded repository facts from a JSON file instead
    #[arg(long, global = true, value_name = "FILE")]
    facts: Option<PathBuf>,

    /// Number of commits to list
    #[arg(long, global = true, value_name = "N")]
    limit: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show branch, file tree, history and working changes
    Overview,
    /// Show the commit history
    Log,
    /// Show the changes of a commit (newest when omitted)
    Show {
        /// Commit hash or any revision git understands
        hash: Option<String>,
    },
    /// Show staged and unstaged changes
    Working,
    /// Show the file tree of HEAD
    Tree,
    /// Show the content of a file at HEAD
    Cat {
        /// Repository-relative file path
        path: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Configure logging based on --debug flag
    if cli.debug {
        env::set_var("RUST_LOG", "debug");
    } else {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let options = ViewOptions {
        repo: cli.repo,
        facts: cli.facts,
        limit: cli.limit,
    };

    let result = match cli.command {
        Commands::Overview => execute_overview(&options),
        Commands::Log => execute_log(&options),
        Commands::Show { hash } => execute_show(&options, hash),
        Commands::Working => execute_working(&options),
        Commands::Tree => execute_tree(&options),
        Commands::Cat { path } => execute_cat(&options, &path),
    };

    if let Err(e) = result {
        print_error(&e.to_string());
        std::process::exit(1);
    }

    Ok(())
}
