/// Constants used throughout the feedwatch codebase
// Environment variable names
pub const FEEDWATCH_DATA_DIR_VAR: &str = "FEEDWATCH_DATA_DIR";
pub const FEEDWATCH_ENV_FILE_VAR: &str = "FEEDWATCH_ENV_FILE";
pub const FEEDWATCH_LOG_VAR: &str = "FEEDWATCH_LOG";
pub const FEEDWATCH_HTTP_TIMEOUT_VAR: &str = "FEEDWATCH_HTTP_TIMEOUT";
pub const YOUTUBE_API_KEY_VAR: &str = "YOUTUBE_API_KEY";
pub const CHECK_INTERVAL_VAR: &str = "CHECK_INTERVAL";

// Defaults
pub const DEFAULT_CHECK_INTERVAL_SECS: u64 = 300;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_ENV_FILE: &str = ".env";
pub const APP_DIR_NAME: &str = "feedwatch";

// Persisted state file names (relative to the data directory)
pub const CHANNEL_ID_CACHE_FILE: &str = "cache_channel_ids.json";
pub const LAST_SEEN_FILE: &str = "last_seen.json";
pub const CHANNEL_REGISTRY_FILE: &str = "channels.json";

// Source reference shapes
pub const DIRECT_ID_MARKER: &str = "/channel/";
pub const HANDLE_MARKER: char = '@';

// Outbound requests
pub const USER_AGENT: &str = "Mozilla/5.0";
