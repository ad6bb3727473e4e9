use crate::commands::Commands;
use crate::context::AppContext;
use feedwatch_config::SettingsLoader;
use feedwatch_core::{Error, Result};
use std::time::Duration;

impl Commands {
    pub async fn execute(self, loader: SettingsLoader) -> Result<()> {
        match self {
            Commands::Run { once, interval } => {
                let loader = match interval {
                    Some(0) => {
                        return Err(Error::configuration("--interval must be greater than zero"))
                    }
                    Some(secs) => loader.check_interval(Duration::from_secs(secs)),
                    None => loader,
                };
                crate::commands::run::execute(context(loader)?, once).await
            }
            Commands::Channel { command } => command.execute(&context(loader)?),
            Commands::Resolve { reference } => {
                crate::commands::resolve::execute(&context(loader)?, &reference).await
            }
            Commands::State { platform, command } => {
                crate::commands::state::execute(&context(loader)?, platform.as_deref(), command)
            }
        }
    }
}

fn context(loader: SettingsLoader) -> Result<AppContext> {
    let settings = loader.load()?;
    tracing::debug!(data_dir = %settings.data_dir.display(), "settings loaded");
    Ok(AppContext::new(settings))
}
