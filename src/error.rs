//! # Error Handling
//!
//! This module defines the single error taxonomy of the `illa` dispatcher.
//! Every failure that can happen between reading the argument vector and
//! finishing a handler is one variant of [`Error`]:
//!
//! - **`UnknownCommand`**: a positional word does not name a registered child.
//! - **`Usage`**: `clap` rejected the arguments (unknown flag, bad value).
//! - **`Handler`**: the matched handler returned an error.
//! - **`InvalidDescriptor`**: the command tree breaks a naming invariant.
//! - **`Io`**: help or version text could not be written.
//!
//! Nothing in the library recovers from these. They are propagated verbatim to
//! the process boundary in `main.rs`, which prints them and exits with
//! [`Error::exit_code`].

use thiserror::Error;

/// Process exit statuses used by the `illa` binary.
pub mod exit_codes {
    /// Successful termination, including help and version output.
    pub const SUCCESS: u8 = 0;

    /// Any execution error.
    pub const FAILURE: u8 = 1;
}

/// Main error type for command resolution and execution
#[derive(Error, Debug)]
pub enum Error {
    /// A positional argument did not match any child of `parent`.
    ///
    /// `suggestions` holds the names of children that are close to `name`.
    #[error(
        "unknown command \"{name}\" for \"{parent}\"{}\nRun '{parent} --help' for usage.",
        format_suggestions(suggestions)
    )]
    UnknownCommand {
        name: String,
        parent: String,
        suggestions: Vec<String>,
    },

    /// `clap` rejected the argument vector.
    #[error("{message}")]
    Usage { message: String },

    /// The matched handler reported a failure.
    #[error("{command} failed: {source:#}")]
    Handler {
        command: String,
        source: anyhow::Error,
    },

    /// The command tree is malformed.
    #[error("Invalid command descriptor: {message}")]
    InvalidDescriptor { message: String },

    /// Writing to the output stream failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Get the process exit status for this error.
    ///
    /// Callers and scripts only distinguish success from failure, so every
    /// variant maps to [`exit_codes::FAILURE`].
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::UnknownCommand { .. }
            | Error::Usage { .. }
            | Error::Handler { .. }
            | Error::InvalidDescriptor { .. }
            | Error::Io(_) => exit_codes::FAILURE,
        }
    }

    /// Build a [`Error::Usage`] from a clap parse failure.
    ///
    /// Clap prefixes its rendering with `error: `; the prefix is dropped so the
    /// boundary can apply its own.
    pub fn from_clap(err: &clap::Error) -> Self {
        let rendered = err.to_string();
        let message = rendered
            .strip_prefix("error: ")
            .unwrap_or(&rendered)
            .trim_end()
            .to_string();
        Error::Usage { message }
    }
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        return String::new();
    }
    let mut out = String::from("\n\nDid you mean this?\n");
    for suggestion in suggestions {
        out.push('\t');
        out.push_str(suggestion);
        out.push('\n');
    }
    out
}

/// Result type alias for dispatcher operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_command_message() {
        let err = Error::UnknownCommand {
            name: "bogus-command".to_string(),
            parent: "illa".to_string(),
            suggestions: vec![],
        };
        let message = err.to_string();

        assert!(message.starts_with("unknown command \"bogus-command\" for \"illa\""));
        assert!(message.contains("Run 'illa --help' for usage."));
        assert!(!message.contains("Did you mean"));
    }

    #[test]
    fn test_unknown_command_lists_suggestions() {
        let err = Error::UnknownCommand {
            name: "deplyo".to_string(),
            parent: "illa".to_string(),
            suggestions: vec!["deploy".to_string()],
        };
        let message = err.to_string();

        assert!(message.contains("Did you mean this?\n\tdeploy\n"));
    }

    #[test]
    fn test_handler_error_includes_context_chain() {
        let source = anyhow::anyhow!("container not running").context("stop failed");
        let err = Error::Handler {
            command: "illa stop".to_string(),
            source,
        };

        assert_eq!(
            err.to_string(),
            "illa stop failed: stop failed: container not running"
        );
    }

    #[test]
    fn test_every_variant_exits_with_failure() {
        let errors = [
            Error::UnknownCommand {
                name: "x".to_string(),
                parent: "illa".to_string(),
                suggestions: vec![],
            },
            Error::Usage {
                message: "bad".to_string(),
            },
            Error::Handler {
                command: "illa".to_string(),
                source: anyhow::anyhow!("boom"),
            },
            Error::InvalidDescriptor {
                message: "empty".to_string(),
            },
            Error::Io(std::io::Error::other("closed")),
        ];

        for err in &errors {
            assert_eq!(err.exit_code(), exit_codes::FAILURE);
        }
    }

    #[test]
    fn test_from_clap_strips_prefix() {
        let clap_err = clap::Command::new("illa")
            .try_get_matches_from(["illa", "--nope"])
            .unwrap_err();
        let err = Error::from_clap(&clap_err);
        let message = err.to_string();

        assert!(!message.starts_with("error: "));
        assert!(message.contains("--nope"));
    }
}
