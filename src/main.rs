use clap::Parser;
use layoutkit::cli::{self, Cli};
use layoutkit::{init_logging, Config};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (config, config_error) = match Config::load_or_default() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };

    init_logging(&config.logging)?;
    if let Some(e) = config_error {
        tracing::warn!("Ignoring unusable config, using defaults: {}", e);
    }

    let output = cli::run(&cli.command, &config)?;
    println!("{}", output);

    Ok(())
}
