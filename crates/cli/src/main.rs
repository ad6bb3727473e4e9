use clap::Parser;
use feedwatch::Commands;
use feedwatch_config::SettingsLoader;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "feedwatch")]
#[command(about = "Announce new YouTube uploads on Discord", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory holding the channel registry and state files
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// The .env file holding webhook URLs and the API key
    #[arg(long, global = true, value_name = "FILE")]
    env_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let mut loader = SettingsLoader::new();
    if let Some(dir) = cli.data_dir {
        loader = loader.data_dir(dir);
    }
    if let Some(path) = cli.env_file {
        loader = loader.env_file(path);
    }

    // FEEDWATCH_LOG may live in .env, so it has to be loaded before logging
    loader.load_env_file()?;
    let loader = loader.load_dotenv(false);

    if let Err(e) = feedwatch_utils::tracing::init() {
        eprintln!("Warning: failed to initialize logging: {e}");
    }

    cli.command.execute(loader).await?;
    Ok(())
}
