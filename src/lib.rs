//! # ILLA CLI Library
//!
//! This library holds everything behind the `illa` binary: the command
//! descriptor tree, the dispatcher that resolves an argument vector against
//! it, and the boundary that turns the outcome into an exit status.
//!
//! ## Quick Example
//!
//! ```
//! use illa::cli;
//! use illa::dispatch::Dispatcher;
//!
//! let dispatcher = Dispatcher::new(cli::construct());
//!
//! // No arguments: the root has no handler, so its help is printed.
//! let mut out: Vec<u8> = Vec::new();
//! dispatcher.execute(["illa", "--color", "never"], &mut out).unwrap();
//! assert!(String::from_utf8(out).unwrap().contains("ILLA CLI"));
//!
//! // An unregistered word is an error.
//! let err = dispatcher.execute(["illa", "bogus-command"], &mut Vec::<u8>::new()).unwrap_err();
//! assert_eq!(err.exit_code(), 1);
//! ```
//!
//! ## Core Concepts
//!
//! - **Command Descriptor (`command`)**: name, short and long description,
//!   ordered children and an optional handler.
//! - **Dispatcher (`dispatch`)**: validates the tree, parses with `clap`,
//!   walks the matched subcommands and runs the handler or prints help.
//! - **Errors (`error`)**: one taxonomy for everything that can fail, each
//!   variant mapped to exit status 1.
//! - **Boundary ([`finish`])**: prints an error and yields the exit status.
//!   Only `main.rs` turns that status into process termination.

pub mod cli;
pub mod command;
pub mod dispatch;
pub mod error;
pub mod logging;
pub mod output;
pub mod suggestions;

use std::io::Write;

use console::style;

use crate::error::{exit_codes, Result};
use crate::output::{emoji, OutputConfig, FAIL};

/// Map the result of a dispatch to an exit status, reporting any error on `err_out`.
///
/// `output` decides whether the report is styled; callers derive it from the
/// same arguments they dispatched so `--color` holds even for parse failures.
pub fn finish(result: Result<()>, output: &OutputConfig, err_out: &mut dyn Write) -> u8 {
    let err = match result {
        Ok(()) => return exit_codes::SUCCESS,
        Err(err) => err,
    };

    log::debug!("Execution failed: {err:?}");

    // The message is the last thing the process does; a closed stream leaves
    // nothing else to report to.
    let _ = writeln!(
        err_out,
        "{}{} {}",
        emoji(output, &FAIL, ""),
        style("Error:")
            .red()
            .bold()
            .force_styling(output.use_color),
        err
    );

    err.exit_code()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_finish_success_is_zero() {
        let mut err_out: Vec<u8> = Vec::new();
        let output = OutputConfig::without_color();
        assert_eq!(finish(Ok(()), &output, &mut err_out), exit_codes::SUCCESS);
        assert!(err_out.is_empty());
    }

    #[test]
    fn test_finish_error_prints_message() {
        let mut err_out: Vec<u8> = Vec::new();
        let status = finish(
            Err(Error::UnknownCommand {
                name: "bogus-command".to_string(),
                parent: "illa".to_string(),
                suggestions: vec![],
            }),
            &OutputConfig::without_color(),
            &mut err_out,
        );

        let message = String::from_utf8(err_out).unwrap();
        assert_eq!(status, exit_codes::FAILURE);
        assert!(message.starts_with("Error: "));
        assert!(!message.contains("\u{1b}["));
        assert!(message.contains("unknown command \"bogus-command\" for \"illa\""));
    }

    #[test]
    fn test_finish_error_follows_color_choice() {
        let mut err_out: Vec<u8> = Vec::new();
        let status = finish(
            Err(Error::Usage {
                message: "unexpected argument '--nope' found".to_string(),
            }),
            &OutputConfig::with_color(),
            &mut err_out,
        );

        let message = String::from_utf8(err_out).unwrap();
        assert_eq!(status, exit_codes::FAILURE);
        assert!(message.starts_with("❌ "));
        assert!(message.contains("\u{1b}["));
        assert!(message.contains("--nope"));
    }
}
