use crate::context::AppContext;
use clap::Subcommand;
use feedwatch_core::{Error, Platform, Result};

#[derive(Subcommand, Debug)]
pub enum StateCommands {
    /// Drop the last-seen record of a source; its next item is treated as a first observation
    Forget {
        /// Platform name, e.g. youtube
        platform: String,
        /// Source URL as stored in the ledger
        source: String,
    },
}

pub fn execute(ctx: &AppContext, platform: Option<&str>, command: Option<StateCommands>) -> Result<()> {
    let ledger = ctx.ledger();

    match command {
        Some(StateCommands::Forget { platform, source }) => {
            let platform: Platform = platform.parse()?;
            if ledger.forget(platform, &source)? {
                println!("Forgot {platform} record for {source}");
            } else {
                println!("No {platform} record for {source}");
            }
            Ok(())
        }
        None => {
            let value = match platform {
                Some(name) => {
                    let platform: Platform = name.parse()?;
                    serde_json::to_value(ledger.get_all_for(platform))
                }
                None => serde_json::to_value(ledger.get_all()),
            }
            .map_err(|e| Error::json("failed to encode ledger", e))?;

            let pretty = serde_json::to_string_pretty(&value)
                .map_err(|e| Error::json("failed to encode ledger", e))?;
            println!("{pretty}");
            Ok(())
        }
    }
}
