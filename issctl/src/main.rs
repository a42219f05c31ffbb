use std::time::Duration;

use clap::{crate_authors, crate_description, crate_version, Parser};
use eyre::Result;
use tracing::trace;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{filter::EnvFilter, fmt};
use tracing_tree::HierarchicalLayer;

use iss_api::{Client, ClientConfig};

use crate::cli::{Opts, SubCommand};

mod cli;

/// Binary name, using a different binary name
pub const NAME: &str = env!("CARGO_BIN_NAME");
/// Binary version
pub const VERSION: &str = crate_version!();
/// Authors
pub const AUTHORS: &str = crate_authors!();

fn main() -> Result<()> {
    let opts = Opts::parse();

    init_logging(opts.debug);

    // Banner
    //
    banner();

    if let Some(SubCommand::Version) = opts.subcmd {
        eprintln!("Modules: ");
        eprintln!("\t{}", version());
        eprintln!("\t{}", iss_api::version());
        return Ok(());
    }

    // File first, then command-line overrides.
    //
    let cfg = ClientConfig::load(opts.config.as_deref())?;
    trace!("cfg={cfg:?}");

    let mut builder = Client::builder().config(&cfg);
    if let Some(url) = opts.url {
        builder = builder.base_url(url);
    }
    if let Some(secs) = opts.timeout {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    let client = builder.build()?;

    let pos = client.get_position()?;
    if opts.json {
        println!("{}", serde_json::to_string(&pos)?);
    } else {
        println!("{pos}");
    }
    Ok(())
}

/// Initialise logging, filters come from `RUST_LOG`.
///
fn init_logging(debug: bool) {
    let filter = EnvFilter::from_default_env();

    // Do we want hierarchical output?
    //
    let (tree, fmt) = if debug {
        let tree = HierarchicalLayer::new(2)
            .with_writer(std::io::stderr)
            .with_targets(true)
            .with_bracketed_fields(true);
        (Some(tree), None)
    } else {
        let fmt = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact();
        (None, Some(fmt))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tree)
        .with(fmt)
        .init();
}

/// Return our version number
///
#[inline]
pub fn version() -> String {
    format!("{}/{}", NAME, VERSION)
}

/// Display banner
///
fn banner() {
    eprintln!(
        r##"
{}/{} by {}
{}
"##,
        NAME,
        VERSION,
        AUTHORS,
        crate_description!()
    )
}
