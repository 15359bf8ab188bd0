mod config;
mod viewer;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use metaballs_engine::device::GpuInit;
use metaballs_engine::logging::{init_logging, LoggingConfig};
use metaballs_engine::window::Runtime;

use config::ViewerConfig;
use viewer::Viewer;

/// Renders a static set of metaballs described by a TOML file.
#[derive(Parser, Debug)]
#[command(name = "metaballs-viewer")]
struct Args {
    /// Scene/appearance config; built-in defaults are used when omitted.
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Log filter in env_logger syntax (overrides the config file).
    #[arg(long)]
    log: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ViewerConfig::load(path)?,
        None => ViewerConfig::default(),
    };

    init_logging(LoggingConfig {
        env_filter: args.log.or_else(|| config.log.filter.clone()),
        ..Default::default()
    });

    for warning in config.validate() {
        log::warn!("{warning}");
    }

    let app = Viewer::new(&config)?;
    Runtime::run(config.runtime_config(), GpuInit::default(), app)
}
