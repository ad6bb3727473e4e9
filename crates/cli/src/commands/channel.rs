use crate::context::AppContext;
use clap::Subcommand;
use feedwatch_config::{ChannelUpdate, EnvFile};
use feedwatch_core::{Error, Result, SourceConfig};

#[derive(Subcommand, Debug)]
pub enum ChannelCommands {
    /// Register a channel
    Add {
        /// Display name used in notifications
        #[arg(long)]
        name: String,

        /// Channel URL with an @handle or /channel/<id>
        #[arg(long)]
        url: String,

        /// Name of the .env key holding the webhook URL
        #[arg(long, value_name = "KEY")]
        webhook_env: String,

        /// Webhook URL to store under the key in .env
        #[arg(long, value_name = "URL")]
        webhook_url: Option<String>,
    },

    /// List registered channels
    #[command(visible_alias = "ls")]
    List,

    /// Remove a channel
    #[command(visible_alias = "rm")]
    Remove { name: String },

    /// Change a channel's name, URL or webhook
    Edit {
        name: String,

        #[arg(long)]
        new_name: Option<String>,

        #[arg(long)]
        url: Option<String>,

        #[arg(long, value_name = "KEY")]
        webhook_env: Option<String>,

        /// New webhook URL, saved under the channel's (new) key
        #[arg(long, value_name = "URL")]
        webhook_url: Option<String>,
    },
}

impl ChannelCommands {
    pub fn execute(self, ctx: &AppContext) -> Result<()> {
        let registry = ctx.registry();

        match self {
            ChannelCommands::Add {
                name,
                url,
                webhook_env,
                webhook_url,
            } => {
                if let Some(webhook_url) = &webhook_url {
                    EnvFile::check_assignment(&webhook_env, webhook_url)?;
                }
                registry.add(SourceConfig::new(&name, url, &webhook_env))?;
                if let Some(webhook_url) = webhook_url {
                    ctx.env_file().upsert(&webhook_env, &webhook_url)?;
                }
                println!("Added channel '{name}'");
                Ok(())
            }
            ChannelCommands::List => {
                let channels = registry.list()?;
                if channels.is_empty() {
                    println!("No channels configured.");
                }
                for c in channels {
                    println!("- {} | {} | {}", c.name, c.source_reference, c.notification_target_key);
                }
                Ok(())
            }
            ChannelCommands::Remove { name } => {
                registry.remove(&name)?;
                println!("Removed channel '{name}'");
                Ok(())
            }
            ChannelCommands::Edit {
                name,
                new_name,
                url,
                webhook_env,
                webhook_url,
            } => {
                if let Some(webhook_url) = &webhook_url {
                    let key = webhook_env.as_deref().unwrap_or(&name);
                    EnvFile::check_assignment(key, webhook_url)?;
                }
                let update = ChannelUpdate {
                    name: new_name,
                    url,
                    webhook_env,
                };

                let channel = if update.is_empty() {
                    if webhook_url.is_none() {
                        return Err(Error::registry("nothing to change"));
                    }
                    registry
                        .get(&name)?
                        .ok_or_else(|| Error::registry(format!("no channel named '{name}'")))?
                } else {
                    registry.update(&name, update)?
                };

                // Stored under whichever key the channel uses after the edit
                if let Some(webhook_url) = webhook_url {
                    ctx.env_file()
                        .upsert(&channel.notification_target_key, &webhook_url)?;
                }
                println!("Updated channel '{}'", channel.name);
                Ok(())
            }
        }
    }
}
