//! sqlvendor - bmnsqlite3 third-party tree updater
//!
//! Vendoring pipeline for the bmnsqlite3 package: produces one renamed,
//! self-contained copy of CPython's sqlite3 extension module per supported
//! CPython release series, plus one shared extraction of the pinned SQLite
//! amalgamation.

use clap::Parser;

mod cli;
mod config;
mod echo;
mod error;
mod fetch;
mod fsops;
mod git;
mod pipeline;
mod report;
mod resolver;
mod vendor;

use cli::Cli;
use echo::Echo;
use error::Result;
use git::GitCli;
use pipeline::Pipeline;

fn run(cli: Cli) -> Result<()> {
    let echo = Echo::new(cli.quiet);
    std::fs::create_dir_all(&cli.work_dir)?;

    let git = GitCli::locate(
        config::CPYTHON_GIT_URL,
        git::checkout_dir(&cli.work_dir),
        echo,
    )?;
    git.version()?;

    Pipeline::new(&git, &cli.work_dir, echo).run()
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
