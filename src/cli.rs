use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "continuous pager: scroll-driven pagination")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Keep scrolling a paginated URL to the bottom, printing every page as it loads
    Follow(FollowArgs),
    /// Print shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct FollowArgs {
    /// URL of the first page; later pages are requested with ?page=N
    #[arg(short, long)]
    pub url: String,

    /// Page already displayed
    #[arg(short, long, default_value_t = 1)]
    pub current: u32,

    /// Total number of pages
    #[arg(short, long)]
    pub total: u32,

    /// Distance from the bottom (pixels) that triggers the next page
    #[arg(short, long)]
    pub distance: Option<f64>,

    /// Terminal rows used as viewport height
    #[arg(long, default_value_t = 24)]
    pub height: u32,

    /// JSON file with pager options (`url`, `distance`)
    #[arg(long)]
    pub options: Option<PathBuf>,

    /// Give up after this many consecutive failed fetches
    #[arg(long, default_value_t = 3)]
    pub max_failures: usize,
}
