use clap::Parser;

use crate::constants::{DEFAULT_ROUNDS, DEFAULT_SEED};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Parse and summarize a bag written as {v0,v1,...} instead of running the checks.
    #[arg(long)]
    pub bag: Option<String>,

    #[arg(long, default_value_t = DEFAULT_ROUNDS)]
    pub rounds: usize,

    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Finish by inserting into a full bag, which aborts the program.
    #[arg(long)]
    pub overflow: bool,
}
