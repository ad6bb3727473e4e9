//! Configuration, webhook targets and the channel registry for feedwatch
//!
//! - `settings` / `loader`: runtime settings read from `.env` and the process
//!   environment
//! - `env_file`: reading and editing the `.env` file that stores webhook URLs
//! - `targets`: the `TargetProvider` used by the monitor
//! - `registry`: the JSON channel registry

pub mod env_file;
pub mod loader;
pub mod registry;
pub mod settings;
pub mod targets;

pub use env_file::EnvFile;
pub use loader::SettingsLoader;
pub use registry::{ChannelRegistry, ChannelUpdate};
pub use settings::Settings;
pub use targets::EnvFileTargets;
