//! Playfetch - app store downloader for the command line
//!
//! Authenticates against a remote application-store backend (through a
//! token dispenser or account credentials), searches the catalog and
//! downloads package artifacts and their expansion files.

use clap::Parser;

mod catalog;
mod cli;
mod commands;
mod config;
mod credentials;
mod error;
mod market;
mod output;
mod session;
mod token;

use cli::Cli;
use config::Config;
use error::Result;
use session::Session;

fn main() {
    let cli = Cli::parse();

    if cli.version {
        commands::version::run();
        return;
    }

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;

    // CLI overrides on top of the loaded configuration
    if cli.token {
        config.token_enable = true;
    }
    if let Some(url) = cli.token_url.clone() {
        config.token_url = Some(url);
    }
    if let Some(folder) = cli.folder.clone() {
        config.set_download_folder(folder);
    }

    let mut session = Session::connect(config, cli.verbose)?;

    if let Some(query) = &cli.search {
        commands::search::run(&mut session, query, cli.number, !cli.paid)?;
    }

    if let Some(package) = &cli.download {
        commands::download::run(&mut session, package, cli.additional_files)?;
    }

    Ok(())
}
