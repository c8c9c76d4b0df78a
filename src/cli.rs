use crate::config::ServeConfig;
use crate::render::FishTemplate;
use crate::server;
use anyhow::{Context, Result};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "sharpfish", version, about = "Serve procedural fish as SVG")]
pub struct Args {
    /// Listen address (host:port). Defaults to localhost:18927.
    #[arg(value_name = "ADDR")]
    pub addr: Option<String>,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_logging();

    let template = FishTemplate::embedded().context("Embedded fish template is broken")?;
    let config = ServeConfig::with_addr(args.addr);
    server::bind(&config, template)?.run()
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}
