use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "statute-extract",
    version,
    about = "Recover Part/Chapter/Section structure from statute text"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Extract(ExtractArgs),
    Chunk(ChunkArgs),
    Classify(ClassifyArgs),
    Validate(ValidateArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ExtractArgs {
    /// Page text with pages separated by form feeds, as written by pdftotext.
    #[arg(long)]
    pub input: PathBuf,

    #[arg(long, default_value = ".cache/statute-extract")]
    pub out_dir: PathBuf,

    #[arg(long)]
    pub output: Option<PathBuf>,

    #[arg(long)]
    pub manifest_path: Option<PathBuf>,

    #[arg(long)]
    pub policy_path: Option<PathBuf>,

    #[arg(long)]
    pub explanation_max_words: Option<usize>,

    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ChunkArgs {
    /// Extracted document JSON.
    #[arg(long)]
    pub input: PathBuf,

    #[arg(long, default_value = ".cache/statute-extract")]
    pub out_dir: PathBuf,

    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ClassifyArgs {
    #[arg(long)]
    pub input: PathBuf,

    #[arg(long, default_value_t = false)]
    pub skip_blank: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Extracted document JSON.
    #[arg(long)]
    pub input: PathBuf,

    #[arg(long, default_value_t = false)]
    pub strict: bool,
}
