// Re-export command modules
pub mod commands;
pub mod context;
mod execute;

// Re-export commonly used types
pub use commands::Commands;
pub use context::AppContext;
