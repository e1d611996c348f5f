use std::path::PathBuf;

use clap::Parser;

mod play;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Seed for the piece sequence (drawn from the OS if omitted)
    #[clap(long)]
    seed: Option<u64>,
    /// Path of the high-score file
    #[clap(long, default_value = "./gridfall-scores.json")]
    score_file: PathBuf,
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    play::run(&args)
}
