//! Development tasks for the linsys workspace.
//!
//! Usage: `cargo xtask <command>`

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::Command;

#[derive(Parser)]
#[command(name = "xtask", about = "Development tasks for linsys")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate documentation for the workspace
    Doc {
        /// Open documentation in browser after generation
        #[arg(long)]
        open: bool,
    },
    /// Run all CI checks (fmt, clippy, test, doc)
    Ci,
    /// Run the criterion benchmarks
    Bench,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let root = project_root()?;

    match cli.command {
        Commands::Doc { open } => cmd_doc(&root, open),
        Commands::Ci => cmd_ci(&root),
        Commands::Bench => run_cargo(&root, &["bench", "-p", "linsys"]),
    }
}

fn project_root() -> Result<PathBuf> {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(Path::to_path_buf)
        .context("xtask must live inside the workspace")
}

fn cmd_doc(root: &Path, open: bool) -> Result<()> {
    let mut args = vec!["doc", "--workspace", "--no-deps"];
    if open {
        args.push("--open");
    }
    run_cargo(root, &args)
}

fn cmd_ci(root: &Path) -> Result<()> {
    println!("Running cargo fmt...");
    run_cargo(root, &["fmt", "--all", "--", "--check"])?;

    println!("Running cargo clippy...");
    run_cargo(root, &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"])?;

    println!("Running cargo test...");
    run_cargo(root, &["test", "--workspace"])?;

    println!("Checking documentation...");
    run_cargo(root, &["doc", "--workspace", "--no-deps"])?;

    println!("All CI checks passed!");
    Ok(())
}

fn run_cargo(dir: &Path, args: &[&str]) -> Result<()> {
    let status = Command::new("cargo")
        .args(args)
        .current_dir(dir)
        .status()
        .with_context(|| format!("Failed to run cargo {}", args.join(" ")))?;

    if !status.success() {
        anyhow::bail!("cargo {} failed", args.join(" "));
    }
    Ok(())
}
