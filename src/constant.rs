/// Application name and metadata constants
pub const APP_NAME: &str = "Paper Diff";

/// Used when the settings carry no usable log level
pub const DEFAULT_LOG_LEVEL: &str = "info";
