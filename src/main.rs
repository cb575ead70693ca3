use clap::Parser;
use env_logger::Env;
use log::{debug, LevelFilter};

mod cli;

use crate::cli::Cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut logger = env_logger::Builder::from_env(Env::default().default_filter_or("warn"));
    if cli.debug {
        logger.filter_level(LevelFilter::Debug);
    }
    logger.init();

    let config = cli.load_config()?;
    debug!("{:#?}", config);

    cli.execute(config).await
}
