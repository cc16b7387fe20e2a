use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "paper-triage",
    version,
    about = "Triage a batch of PDF papers with an LLM agent and grade the result"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Catalog(CatalogArgs),
    Inventory(InventoryArgs),
    Triage(TriageArgs),
    Judge(JudgeArgs),
}

#[derive(Args, Debug, Clone)]
pub struct CatalogArgs {
    #[arg(long, default_value = "papers.json")]
    pub catalog_path: PathBuf,

    #[arg(long, default_value = "/tmp/papers")]
    pub base_dir: PathBuf,

    #[arg(long, default_value = "environment/ground_truth.json")]
    pub ground_truth: PathBuf,

    #[arg(long)]
    pub download_plan_path: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct InventoryArgs {
    #[arg(long, default_value = "/papers")]
    pub base_dir: PathBuf,

    #[arg(long)]
    pub manifest_path: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

#[derive(Args, Debug, Clone)]
pub struct TriageArgs {
    #[arg(long, default_value = "/papers")]
    pub base_dir: PathBuf,

    /// External program that reads a triage request on stdin and prints a triage result.
    #[arg(long, conflicts_with = "replay")]
    pub agent_command: Option<String>,

    #[arg(long = "agent-arg", allow_hyphen_values = true)]
    pub agent_args: Vec<String>,

    /// Previously produced triage result to materialize instead of calling an agent.
    #[arg(long)]
    pub replay: Option<PathBuf>,

    #[arg(long)]
    pub preview_chars: Option<usize>,

    #[arg(long)]
    pub paper_text_cap: Option<usize>,

    /// Smaller previews and text caps for models with little context headroom.
    #[arg(long, default_value_t = false)]
    pub compact_context: bool,

    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

#[derive(Args, Debug, Clone)]
pub struct JudgeArgs {
    #[arg(long, default_value = "/papers")]
    pub base_dir: PathBuf,

    #[arg(long, default_value = "environment/ground_truth.json")]
    pub ground_truth: PathBuf,

    #[arg(long)]
    pub output: Option<PathBuf>,
}
