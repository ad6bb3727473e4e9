use clap::Subcommand;

pub mod channel;
pub mod resolve;
pub mod run;
pub mod state;

use self::channel::ChannelCommands;
use self::state::StateCommands;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Watch the registered channels and announce new uploads
    Run {
        /// Run a single cycle and exit
        #[arg(long)]
        once: bool,

        /// Seconds between cycles (overrides CHECK_INTERVAL)
        #[arg(long, value_name = "SECS")]
        interval: Option<u64>,
    },

    /// Manage the registered channels
    #[command(visible_alias = "c")]
    Channel {
        #[command(subcommand)]
        command: ChannelCommands,
    },

    /// Resolve a channel URL to its id and cache the answer
    Resolve {
        /// Channel URL, e.g. https://www.youtube.com/@handle
        reference: String,
    },

    /// Show or edit the last-seen ledger
    State {
        /// Only show one platform
        #[arg(long)]
        platform: Option<String>,

        #[command(subcommand)]
        command: Option<StateCommands>,
    },
}
