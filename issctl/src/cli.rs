//! Command-line options for `issctl`.
//!
//! Without a sub-command, `issctl` prints the current ISS position as `lat long`.
//!

use std::path::PathBuf;

use clap::{crate_authors, crate_description, crate_name, crate_version, Parser, Subcommand};

/// CLI options
#[derive(Debug, Parser)]
#[command(disable_version_flag = true)]
#[clap(name = crate_name!(), about = crate_description!())]
#[clap(version = crate_version!(), author = crate_authors!())]
pub struct Opts {
    /// configuration file.
    #[clap(short = 'c', long)]
    pub config: Option<PathBuf>,
    /// debug mode (hierarchical traces).
    #[clap(short = 'D', long = "debug")]
    pub debug: bool,
    /// Output as JSON.
    #[clap(short = 'j', long)]
    pub json: bool,
    /// Query this URL instead of the configured one.
    #[clap(short = 'u', long)]
    pub url: Option<String>,
    /// Request timeout in seconds.
    #[clap(short = 't', long)]
    pub timeout: Option<u64>,
    /// Sub-commands (see below).
    #[clap(subcommand)]
    pub subcmd: Option<SubCommand>,
}

#[derive(Debug, Subcommand)]
pub enum SubCommand {
    /// List all package versions
    Version,
}
