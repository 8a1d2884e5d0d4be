//! # Command Descriptors
//!
//! A [`CommandDescriptor`] describes one command of the CLI: its invocation
//! name, the one-line and long help text, the commands nested under it and an
//! optional handler. A descriptor without a handler prints its help when it is
//! the resolved command.
//!
//! Descriptors are assembled once with the consuming builder methods and are
//! never mutated afterwards. The dispatcher turns the tree into a
//! `clap::Command` for parsing, then walks the descriptors themselves to find
//! the handler.
//!
//! ```
//! use illa::command::CommandDescriptor;
//!
//! let root = CommandDescriptor::new("tool")
//!     .short("Tool CLI")
//!     .subcommand(
//!         CommandDescriptor::new("hello")
//!             .short("Say hello")
//!             .handler(|_, out| {
//!                 writeln!(out, "hello")?;
//!                 Ok(())
//!             }),
//!     );
//!
//! assert_eq!(root.invocation_name(), "tool");
//! assert!(root.find_child("hello").is_some());
//! assert!(root.validate().is_ok());
//! ```

use std::collections::HashSet;
use std::fmt;
use std::io::Write;

use clap::{Arg, ArgMatches, Command};

use crate::error::{Error, Result};
use crate::output::OutputConfig;

/// Name clap reserves for its generated `help` subcommand.
pub const RESERVED_HELP: &str = "help";

/// Function run when its command is the result of resolution.
pub type Handler =
    Box<dyn Fn(&Invocation<'_>, &mut dyn Write) -> anyhow::Result<()> + Send + Sync>;

/// Context handed to a [`Handler`].
#[derive(Debug)]
pub struct Invocation<'a> {
    path: Vec<&'a str>,
    matches: &'a ArgMatches,
    output: OutputConfig,
}

impl<'a> Invocation<'a> {
    pub(crate) fn new(path: Vec<&'a str>, matches: &'a ArgMatches, output: OutputConfig) -> Self {
        Self {
            path,
            matches,
            output,
        }
    }

    /// Names from the root down to the resolved command.
    pub fn path(&self) -> &[&'a str] {
        &self.path
    }

    /// The resolved path joined with spaces, e.g. `illa deploy`.
    pub fn command_path(&self) -> String {
        self.path.join(" ")
    }

    /// Parsed arguments of the resolved command.
    pub fn matches(&self) -> &'a ArgMatches {
        self.matches
    }

    pub fn output(&self) -> &OutputConfig {
        &self.output
    }
}

/// Description of a command and the commands nested under it.
pub struct CommandDescriptor {
    invocation_name: String,
    short_description: String,
    long_description: String,
    usage: Option<String>,
    version: Option<String>,
    args: Vec<Arg>,
    children: Vec<CommandDescriptor>,
    handler: Option<Handler>,
}

impl CommandDescriptor {
    /// Start a descriptor for the command invoked as `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            invocation_name: name.into(),
            short_description: String::new(),
            long_description: String::new(),
            usage: None,
            version: None,
            args: Vec::new(),
            children: Vec::new(),
            handler: None,
        }
    }

    /// One-line description shown in command lists and `-h`.
    pub fn short(mut self, text: impl Into<String>) -> Self {
        self.short_description = text.into();
        self
    }

    /// Extended description shown by `--help`.
    pub fn long(mut self, text: impl Into<String>) -> Self {
        self.long_description = text.into();
        self
    }

    /// Replace the generated usage line.
    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = Some(usage.into());
        self
    }

    /// Enable `-V/--version` with this version string.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Add an argument the handler can read from [`Invocation::matches`].
    pub fn arg(mut self, arg: Arg) -> Self {
        self.args.push(arg);
        self
    }

    /// Register a nested command. Children keep their registration order.
    pub fn subcommand(mut self, child: CommandDescriptor) -> Self {
        self.children.push(child);
        self
    }

    pub fn handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Invocation<'_>, &mut dyn Write) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.handler = Some(Box::new(handler));
        self
    }

    pub fn invocation_name(&self) -> &str {
        &self.invocation_name
    }

    pub fn short_description(&self) -> &str {
        &self.short_description
    }

    pub fn long_description(&self) -> &str {
        &self.long_description
    }

    pub fn usage_line(&self) -> Option<&str> {
        self.usage.as_deref()
    }

    pub fn version_string(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn children(&self) -> &[CommandDescriptor] {
        &self.children
    }

    pub(crate) fn handler_fn(&self) -> Option<&Handler> {
        self.handler.as_ref()
    }

    pub fn has_handler(&self) -> bool {
        self.handler.is_some()
    }

    /// Look up a direct child by invocation name.
    pub fn find_child(&self, name: &str) -> Option<&CommandDescriptor> {
        self.children
            .iter()
            .find(|child| child.invocation_name == name)
    }

    pub fn child_names(&self) -> impl Iterator<Item = &str> {
        self.children
            .iter()
            .map(|child| child.invocation_name.as_str())
    }

    /// Check the naming invariants of this descriptor and all descendants.
    ///
    /// Names must be non-empty, free of whitespace and not start with `-`.
    /// Siblings must have distinct names, and `help` is reserved for the
    /// generated help command.
    pub fn validate(&self) -> Result<()> {
        validate_name(&self.invocation_name)?;

        let mut seen = HashSet::new();
        for child in &self.children {
            if child.invocation_name == RESERVED_HELP {
                return Err(Error::InvalidDescriptor {
                    message: format!(
                        "\"{RESERVED_HELP}\" is reserved and cannot be registered under \"{}\"",
                        self.invocation_name
                    ),
                });
            }
            if !seen.insert(child.invocation_name.as_str()) {
                return Err(Error::InvalidDescriptor {
                    message: format!(
                        "duplicate command \"{}\" under \"{}\"",
                        child.invocation_name, self.invocation_name
                    ),
                });
            }
            child.validate()?;
        }

        Ok(())
    }

    /// Text for `--help`: the short description followed by the long one.
    pub fn long_about(&self) -> String {
        match (
            self.short_description.is_empty(),
            self.long_description.is_empty(),
        ) {
            (false, false) => format!("{}\n\n{}", self.short_description, self.long_description),
            (true, false) => self.long_description.clone(),
            _ => self.short_description.clone(),
        }
    }

    /// Build the clap command for this descriptor and its children.
    ///
    /// Commands without a handler accept any positional word as an external
    /// subcommand, so an unknown name reaches resolution instead of being
    /// rejected by clap as an unexpected argument.
    pub fn to_clap(&self) -> Command {
        let mut cmd = Command::new(self.invocation_name.clone())
            .about(self.short_description.clone())
            .long_about(self.long_about())
            .args(self.args.iter().cloned())
            .subcommands(self.children.iter().map(CommandDescriptor::to_clap));

        if let Some(usage) = &self.usage {
            cmd = cmd.override_usage(usage.clone());
        }
        if let Some(version) = &self.version {
            cmd = cmd.version(version.clone());
        }
        if self.handler.is_none() {
            cmd = cmd.allow_external_subcommands(true);
        }

        cmd
    }
}

impl fmt::Debug for CommandDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDescriptor")
            .field("invocation_name", &self.invocation_name)
            .field("short_description", &self.short_description)
            .field("long_description", &self.long_description)
            .field("usage", &self.usage)
            .field("version", &self.version)
            .field("args", &self.args.len())
            .field("children", &self.children)
            .field("handler", &self.handler.is_some())
            .finish()
    }
}

fn validate_name(name: &str) -> Result<()> {
    let problem = if name.is_empty() {
        Some("command name must not be empty")
    } else if name.chars().any(char::is_whitespace) {
        Some("command name must not contain whitespace")
    } else if name.starts_with('-') {
        Some("command name must not start with '-'")
    } else {
        None
    };

    match problem {
        Some(problem) => Err(Error::InvalidDescriptor {
            message: format!("{problem}: {name:?}"),
        }),
        None => Ok(()),
    }
}
