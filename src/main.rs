use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pagescribe::cli::{Cli, Commands};
use pagescribe::config::Config;
use pagescribe::extractors::Strategy;
use pagescribe::pipeline::ExtractionPipeline;
use pagescribe::{output, utils};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "pagescribe=debug"
    } else {
        "pagescribe=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::load()?;

    match cli.command {
        Commands::Extract {
            url,
            output,
            format,
        } => {
            let url = utils::validate_and_normalize_url(&url)?;
            match utils::extract_domain(&url) {
                Some(domain) => tracing::info!("Extracting transcript from {}", domain),
                None => tracing::info!("Extracting transcript from {}", url),
            }

            let pipeline = ExtractionPipeline::new(config, cli.quiet)?;
            let result = pipeline.extract(&url).await?;

            tracing::info!(
                "Extracted {} line(s) via the {} strategy",
                result.lines.len(),
                result.strategy
            );

            match output {
                Some(path) => {
                    output::save_to_file(&result, &path, &format)?;
                    println!("Transcript saved to: {}", path.display());
                }
                None => {
                    output::print_to_console(&result, &format)?;
                }
            }
        }
        Commands::Config { show } => {
            if show {
                config.display();
            } else {
                config.save()?;
                println!("Configuration written. Edit it to change the User-Agent or platform endpoints.");
            }
        }
        Commands::Strategies => {
            println!("Extraction strategies, in priority order:");
            for strategy in Strategy::ordered() {
                println!("  • {} - {}", strategy, strategy.description());
            }
        }
    }

    Ok(())
}
