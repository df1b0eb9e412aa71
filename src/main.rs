use anyhow::Result;

use continuous_pager::cli::Command;
use continuous_pager::{handle_completions, handle_follow, interpret};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Follow(args) => handle_follow(args),
        Command::Completions { shell } => handle_completions(*shell),
    }
}
