use clap::{Parser, Subcommand};
use channel_index::{config, generate, load, output};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "channel-index")]
#[command(about = "Publish a channel database as indexed M3U playlists")]
#[command(long_about = "\
Publish a channel database as indexed M3U playlists

The source directory holds the reference lists and the channel playlists:

  source/
  ├── config.toml          # Generator config (optional)
  ├── reference.toml       # [[categories]], [[countries]], [[languages]]
  └── channels/            # *.m3u playlists, any depth

The output directory receives a global index, indexes by category, country
and language, one playlist per category, country and language (each with a
safe-for-work variant where applicable), and channels.json.

Set RUST_LOG=debug for per-file diagnostics.

Run 'channel-index gen-config' to print a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Source directory
    #[arg(long, default_value = ".", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = ".gh-pages", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load the source directory and write all playlists
    Generate,
    /// Load the source directory and report what it contains
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Command::Generate => {
            println!("==> Loading {}", cli.source.display());
            let (site_config, store) = load::load_source(&cli.source)?;
            println!("==> Generating {}", cli.output.display());
            let report = generate::generate(&store, &site_config, &cli.output)?;
            output::print_generate_output(&report);
            info!("Done");
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let (_, store) = load::load_source(&cli.source)?;
            output::print_check_output(&store);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
