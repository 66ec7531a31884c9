//! `artbid` binary entry point.

use clap::Parser;

use artbid_storefront::cli::{self, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    artbid_storefront::init_tracing();
    cli::run(Cli::parse()).await
}
