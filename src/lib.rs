pub mod cli;
pub mod config;
pub mod dom;
pub mod errors;
pub mod http;
pub mod pager;
pub mod pagination;
pub mod services;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use cli::Cli;
use tokio::task::LocalSet;

use crate::cli::{Command, FollowArgs};
use crate::config::AppConfig;
use crate::services::FollowService;

pub use crate::config::{PagerConfig, PagerDefaults, PagerOptions};
pub use crate::dom::{Area, Container, Fragment, Indicator, ScrollSurface, Window};
pub use crate::errors::PagerError;
pub use crate::http::{FetchFailed, HttpTransport, Transport};
pub use crate::pager::{PagerCommand, PagerRegistry, ScrollPager, Trigger};

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_follow(args: &FollowArgs) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    let local = LocalSet::new();
    local.block_on(&runtime, async {
        let service = FollowService::new(AppConfig::new(), args.clone());
        service.run().await.map(|_| ())
    })
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}
