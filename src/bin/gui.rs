use std::path::PathBuf;

use fractal_explorer::{ExplorerConfig, PixelsPresenterFactory, RunGuiCommand};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Optional config path as the only argument.
    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => ExplorerConfig::load(path)?,
        None => ExplorerConfig::default(),
    };

    let presenter_factory = PixelsPresenterFactory::new();
    let command = RunGuiCommand::new(presenter_factory, config);

    command.execute()?;

    Ok(())
}
