//! # Output Configuration
//!
//! This module controls how `illa` decorates what it prints: whether help text
//! keeps its ANSI styling and whether status lines carry emoji.
//!
//! ## Respecting User Preferences
//!
//! The module respects the following environment variables and flags:
//! - `--color=never|always|auto` - CLI flag for color control
//! - `NO_COLOR` - Disables colors when set (per https://no-color.org/)
//! - `CLICOLOR=0` - Disables colors
//! - `CLICOLOR_FORCE=1` - Forces colors even in non-TTY
//! - `TERM=dumb` - Disables colors for dumb terminals

use std::env;
use std::ffi::OsStr;

use console::Emoji;

pub static FAIL: Emoji<'_, '_> = Emoji("❌ ", "");

/// Accepted values of the `--color` flag.
pub const COLOR_CHOICES: [&str; 3] = ["auto", "always", "never"];

/// Output configuration for controlling colors and emojis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    /// Whether colors and emojis should be used in output.
    pub use_color: bool,
}

impl OutputConfig {
    /// Create an output configuration from environment and CLI flag.
    ///
    /// `--color=always` overrides `NO_COLOR`; `--color=never` wins over
    /// everything; `auto` (and any unrecognised value) detects support from
    /// the environment and the terminal.
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    /// Detect whether color output is supported based on environment.
    fn detect_color_support() -> bool {
        // The presence of NO_COLOR (even if empty) disables colors
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }

        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }

        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }

        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        console::Term::stdout().features().colors_supported()
    }

    /// Create an output configuration from the `--color` value in raw arguments.
    ///
    /// This is a lenient scan that runs before parsing, so help, version and
    /// error output follow the flag even when parsing fails. Both `--color WHEN`
    /// and `--color=WHEN` are recognised, the last occurrence wins, and nothing
    /// after a `--` separator is considered.
    pub fn from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<OsStr>,
    {
        let mut flag: Option<String> = None;
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            let arg = arg.as_ref().to_string_lossy();
            if arg == "--" {
                break;
            }
            if arg == "--color" {
                if let Some(value) = args.next() {
                    flag = Some(value.as_ref().to_string_lossy().into_owned());
                }
            } else if let Some(value) = arg.strip_prefix("--color=") {
                flag = Some(value.to_string());
            }
        }

        Self::from_env_and_flag(flag.as_deref().unwrap_or("auto"))
    }

    /// Make `console` styling on both streams follow this configuration.
    pub fn apply(&self) {
        console::set_colors_enabled(self.use_color);
        console::set_colors_enabled_stderr(self.use_color);
    }

    /// Create a configuration with colors always enabled.
    #[cfg(test)]
    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    /// Create a configuration with colors always disabled.
    #[cfg(test)]
    pub fn without_color() -> Self {
        Self { use_color: false }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

/// Returns the emoji prefix when colors are enabled, the plain prefix otherwise.
pub fn emoji<'a>(config: &OutputConfig, emoji: &Emoji<'a, 'a>, plain: &'a str) -> &'a str {
    if config.use_color {
        emoji.0
    } else {
        plain
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_always() {
        let config = OutputConfig::from_env_and_flag("always");
        assert!(config.use_color);
    }

    #[test]
    fn test_color_never() {
        let config = OutputConfig::from_env_and_flag("never");
        assert!(!config.use_color);
    }

    #[test]
    fn test_color_flag_is_case_insensitive() {
        assert!(OutputConfig::from_env_and_flag("ALWAYS").use_color);
        assert!(!OutputConfig::from_env_and_flag("Never").use_color);
    }

    #[test]
    fn test_from_args_reads_separate_value() {
        let config = OutputConfig::from_args(["illa", "--color", "always", "--help"]);
        assert_eq!(config, OutputConfig::with_color());

        let config = OutputConfig::from_args(["illa", "bogus", "--color", "never"]);
        assert_eq!(config, OutputConfig::without_color());
    }

    #[test]
    fn test_from_args_reads_equals_form() {
        let config = OutputConfig::from_args(["illa", "--color=never", "--version"]);
        assert_eq!(config, OutputConfig::without_color());
    }

    #[test]
    fn test_from_args_last_occurrence_wins() {
        let config = OutputConfig::from_args(["illa", "--color=never", "--color", "always"]);
        assert!(config.use_color);
    }

    #[test]
    fn test_from_args_stops_at_separator() {
        let config = OutputConfig::from_args(["illa", "--color", "never", "--", "--color=always"]);
        assert!(!config.use_color);
    }

    #[test]
    fn test_emoji_helper_with_color() {
        let config = OutputConfig::with_color();
        assert_eq!(emoji(&config, &FAIL, "error:"), "❌ ");
    }

    #[test]
    fn test_emoji_helper_without_color() {
        let config = OutputConfig::without_color();
        assert_eq!(emoji(&config, &FAIL, "error:"), "error:");
    }
}
