//! Logger setup for the `illa` binary.
//!
//! Library code only uses the `log` macros. The dispatcher installs
//! `env_logger` once the global `--log-level` option (or `ILLA_LOG`) has been
//! parsed; records go to stderr so they never mix with help output.

use log::LevelFilter;

/// Environment variable consulted when `--log-level` is not given.
pub const LOG_ENV: &str = "ILLA_LOG";

/// Level used when neither the flag nor the environment set one.
pub const DEFAULT_LEVEL: &str = "warn";

/// Accepted values of `--log-level`.
pub const LEVEL_CHOICES: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

/// Parse a level name, falling back to [`DEFAULT_LEVEL`] for unknown input.
pub fn parse_level(level: &str) -> LevelFilter {
    level
        .parse::<LevelFilter>()
        .or_else(|_| DEFAULT_LEVEL.parse())
        .unwrap_or(LevelFilter::Off)
}

/// Install `env_logger` at `level`.
///
/// Returns `false` when a logger was already installed in this process, which
/// happens when the dispatcher runs more than once (tests, embedding).
pub fn init(level: LevelFilter) -> bool {
    let installed = env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .target(env_logger::Target::Stderr)
        .try_init()
        .is_ok();

    if installed {
        log::debug!("Logger initialized at level {level}");
    }
    installed
}
