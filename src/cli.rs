//! CLI definitions using clap derive API
//!
//! The interface is flag-driven rather than subcommand-driven: `-s` searches,
//! `-d` downloads, and the remaining flags tune the session. Running without
//! arguments prints the help.

use clap::Parser;
use clap::builder::{Styles, styling::AnsiColor};
use std::path::PathBuf;

/// Playfetch - app store downloader for the command line
#[derive(Parser, Debug)]
#[command(
    name = "playfetch",
    author,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "An app store package downloader and manager for command line",
    arg_required_else_help = true,
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  playfetch -s firefox -n 10           \x1b[90m# Search the catalog\x1b[0m\n   \
                  playfetch -d org.mozilla.firefox     \x1b[90m# Download an app by id\x1b[0m\n   \
                  playfetch -d com.example.game -a -f ./apks\n\n\
                  "
)]
pub struct Cli {
    /// Print version number and exit
    #[arg(short = 'V', long = "version")]
    pub version: bool,

    /// Search the given string in the store catalog
    #[arg(short = 's', long = "search", value_name = "SEARCH")]
    pub search: Option<String>,

    /// Also search for paid apps
    #[arg(short = 'P', long = "paid")]
    pub paid: bool,

    /// For the search option, returns the given number of matching applications
    #[arg(short = 'n', long = "number", value_name = "NUMBER", default_value_t = 1)]
    pub number: usize,

    /// Download the app that maps the given AppID
    #[arg(short = 'd', long = "download", value_name = "AppID")]
    pub download: Option<String>,

    /// Enable the download of additional files
    #[arg(short = 'a', long = "additional-files")]
    pub additional_files: bool,

    /// Where to put the downloaded Apks, only for the -d command
    #[arg(short = 'f', long = "folder", value_name = "FOLDER")]
    pub folder: Option<PathBuf>,

    /// Instead of classical credentials, use the tokenized version
    #[arg(short = 't', long = "token")]
    pub token: bool,

    /// Use the given token dispenser URL to retrieve a token
    #[arg(long = "token-url", alias = "tu", value_name = "TOKEN_URL")]
    pub token_url: Option<String>,

    /// Use a different config file than playfetch.conf
    #[arg(short = 'c', long = "config", value_name = "CONF_FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}
