//! # ILLA CLI
//!
//! Binary entry point for the `illa` command-line tool.
//!
//! It builds the root command, hands the process arguments to the dispatcher
//! and converts the outcome into an exit status. All behaviour lives in the
//! `illa` library; this file is the only place the process status is decided.

use std::env;
use std::ffi::OsString;
use std::io;
use std::process::ExitCode;

use illa::cli;
use illa::dispatch::Dispatcher;
use illa::output::OutputConfig;

fn main() -> ExitCode {
    let dispatcher = Dispatcher::new(cli::construct());
    let args: Vec<OsString> = env::args_os().collect();
    let output = OutputConfig::from_args(&args);

    let result = dispatcher.execute(args, &mut io::stdout().lock());
    let status = illa::finish(result, &output, &mut io::stderr().lock());

    ExitCode::from(status)
}
