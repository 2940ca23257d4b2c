use crate::config::Settings;
use crate::constant::DEFAULT_LOG_LEVEL;
use std::str::FromStr;
use tracing::Level;

/// Parse a level name, falling back to the default on anything unknown
pub fn parse_level(name: &str) -> Level {
    Level::from_str(name.trim())
        .or_else(|_| Level::from_str(DEFAULT_LOG_LEVEL))
        .unwrap_or(Level::INFO)
}

/// Install the global fmt subscriber. Safe to call more than once; later
/// calls leave the first subscriber in place.
pub fn init(settings: &Settings) {
    let level = parse_level(&settings.log_level);
    if tracing_subscriber::fmt()
        .with_max_level(level)
        .try_init()
        .is_ok()
    {
        tracing::debug!("Logging initialized at {}", level);
    }
}
