//! # Command Resolution and Dispatch
//!
//! The [`Dispatcher`] owns the root [`CommandDescriptor`] and performs the one
//! parse-and-dispatch pass of a process:
//!
//! 1.  **Validation**: the descriptor tree is checked for naming problems.
//! 2.  **Parsing**: the tree is converted to a `clap::Command`, the global
//!     `--color` and `--log-level` options are added, and the argument vector
//!     is parsed. Help and version requests end resolution successfully.
//! 3.  **Resolution**: the matched subcommand chain is walked through the
//!     descriptors. A word that names no child is an
//!     [`Error::UnknownCommand`], with suggestions drawn from the siblings.
//! 4.  **Execution**: logging and colour are configured from the global
//!     options, then the resolved handler runs. A command without a handler
//!     prints its long help.
//!
//! The dispatcher never terminates the process; every failure is returned as
//! an [`Error`] for the boundary in `main.rs` to report.

use std::ffi::OsString;
use std::io::Write;

use clap::builder::StyledStr;
use clap::error::ErrorKind;
use clap::{Arg, ArgMatches, Command};
use log::{debug, info, trace};

use crate::command::{CommandDescriptor, Invocation};
use crate::error::{Error, Result};
use crate::logging;
use crate::output::{OutputConfig, COLOR_CHOICES};
use crate::suggestions::similar_names;

/// Id of the global `--color` option.
pub const COLOR_ARG: &str = "color";

/// Id of the global `--log-level` option.
pub const LOG_LEVEL_ARG: &str = "log-level";

/// Options accepted by every command in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlobalOptions {
    pub output: OutputConfig,
    pub log_level: log::LevelFilter,
}

impl GlobalOptions {
    /// Read the global options from parsed matches.
    ///
    /// Missing values fall back to the same defaults the arguments declare.
    pub fn from_matches(matches: &ArgMatches) -> Self {
        let color = matches
            .try_get_one::<String>(COLOR_ARG)
            .ok()
            .flatten()
            .map_or("auto", String::as_str);
        let level = matches
            .try_get_one::<String>(LOG_LEVEL_ARG)
            .ok()
            .flatten()
            .map_or(logging::DEFAULT_LEVEL, String::as_str);

        Self {
            output: OutputConfig::from_env_and_flag(color),
            log_level: logging::parse_level(level),
        }
    }
}

/// The global arguments added to the root command.
pub fn global_args() -> [Arg; 2] {
    [
        Arg::new(COLOR_ARG)
            .long(COLOR_ARG)
            .global(true)
            .value_name("WHEN")
            .value_parser(COLOR_CHOICES)
            .default_value("auto")
            .help("Colorize output"),
        Arg::new(LOG_LEVEL_ARG)
            .long(LOG_LEVEL_ARG)
            .global(true)
            .value_name("LEVEL")
            .value_parser(logging::LEVEL_CHOICES)
            .env(logging::LOG_ENV)
            .default_value(logging::DEFAULT_LEVEL)
            .help("Set log level"),
    ]
}

/// Outcome of resolving an argument vector.
#[derive(Debug)]
pub enum Resolution<'a> {
    /// Help or version text was requested; nothing else runs.
    Display {
        text: StyledStr,
        /// Colour choice taken from the raw arguments, since parsing stopped.
        output: OutputConfig,
    },
    /// A command in the tree was selected.
    Matched(Matched<'a>),
}

/// A command selected by resolution, with everything needed to run it.
#[derive(Debug)]
pub struct Matched<'a> {
    /// Names from the root down to the selected command.
    pub path: Vec<&'a str>,
    pub command: &'a CommandDescriptor,
    /// Arguments parsed for the selected command.
    pub matches: ArgMatches,
    pub globals: GlobalOptions,
    /// Long help of the selected command, present when it has no handler.
    pub help: Option<StyledStr>,
}

impl Matched<'_> {
    pub fn command_path(&self) -> String {
        self.path.join(" ")
    }
}

/// Routes an argument vector to the handler of the matching command.
#[derive(Debug)]
pub struct Dispatcher {
    root: CommandDescriptor,
}

impl Dispatcher {
    pub fn new(root: CommandDescriptor) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &CommandDescriptor {
        &self.root
    }

    /// The full clap command: the descriptor tree plus the global options.
    pub fn command(&self) -> Command {
        self.root.to_clap().args(global_args())
    }

    /// Resolve `args` against the descriptor tree without running anything.
    ///
    /// The first element of `args` is the binary name, as with
    /// `std::env::args_os`.
    pub fn resolve<I, T>(&self, args: I) -> Result<Resolution<'_>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        self.root.validate()?;

        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        let output = OutputConfig::from_args(&args);

        let mut cmd = self.command();
        let mut matches = match cmd.try_get_matches_from_mut(args) {
            Ok(matches) => matches,
            Err(err) => {
                return match err.kind() {
                    ErrorKind::DisplayHelp
                    | ErrorKind::DisplayVersion
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                        trace!("Parser requested display: {:?}", err.kind());
                        Ok(Resolution::Display {
                            text: err.render(),
                            output,
                        })
                    }
                    _ => Err(Error::from_clap(&err)),
                };
            }
        };

        let mut node = &self.root;
        let mut path = vec![node.invocation_name()];
        while let Some((name, sub_matches)) = matches.remove_subcommand() {
            let Some(child) = node.find_child(&name) else {
                return Err(Error::UnknownCommand {
                    suggestions: similar_names(&name, node.child_names()),
                    parent: path.join(" "),
                    name,
                });
            };
            trace!("Descending into \"{name}\"");
            node = child;
            path.push(child.invocation_name());
            matches = sub_matches;
        }

        let help = if node.has_handler() {
            None
        } else {
            Some(render_long_help(&mut cmd, &path[1..])?)
        };

        Ok(Resolution::Matched(Matched {
            globals: GlobalOptions::from_matches(&matches),
            path,
            command: node,
            matches,
            help,
        }))
    }

    /// Resolve `args` and run the result, writing normal output to `out`.
    pub fn execute<I, T>(&self, args: I, out: &mut dyn Write) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let resolution = self.resolve(args)?;
        self.run(resolution, out)
    }

    /// Run an already resolved command.
    pub fn run(&self, resolution: Resolution<'_>, out: &mut dyn Write) -> Result<()> {
        let matched = match resolution {
            Resolution::Display { text, output } => {
                return write_styled(out, &text, &output);
            }
            Resolution::Matched(matched) => matched,
        };

        logging::init(matched.globals.log_level);
        matched.globals.output.apply();

        let command_path = matched.command_path();
        debug!("Resolved command path: {command_path}");

        if let Some(handler) = matched.command.handler_fn() {
            info!("Running {command_path}");
            let invocation =
                Invocation::new(matched.path, &matched.matches, matched.globals.output);
            return handler(&invocation, out).map_err(|source| Error::Handler {
                command: command_path,
                source,
            });
        }

        debug!("{command_path} has no handler, printing help");
        match &matched.help {
            Some(help) => write_styled(out, help, &matched.globals.output),
            None => Ok(()),
        }
    }
}

/// Render the long help of the subcommand at `path` below `cmd`.
fn render_long_help(cmd: &mut Command, path: &[&str]) -> Result<StyledStr> {
    cmd.build();

    let mut target = cmd;
    for name in path {
        target = match target.find_subcommand_mut(name) {
            Some(sub) => sub,
            None => {
                return Err(Error::InvalidDescriptor {
                    message: format!("command \"{name}\" is missing from the parser"),
                })
            }
        };
    }

    Ok(target.render_long_help())
}

fn write_styled(out: &mut dyn Write, text: &StyledStr, config: &OutputConfig) -> Result<()> {
    let rendered = if config.use_color {
        text.ansi().to_string()
    } else {
        text.to_string()
    };

    out.write_all(rendered.as_bytes())?;
    if !rendered.ends_with('\n') {
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}
