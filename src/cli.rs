mod burrow;
mod feed;
mod pvoutput;
mod summarize;

use clap::{Parser, Subcommand};

use crate::cli::{burrow::BurrowArgs, summarize::SummarizeArgs};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Main command: summarize the days and upload the summaries to PVOutput.
    #[clap(name = "summarize")]
    Summarize(Box<SummarizeArgs>),

    /// Development tools.
    #[clap(name = "burrow")]
    Burrow(Box<BurrowArgs>),
}
