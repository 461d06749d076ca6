//! Cratchit - line-at-a-time command interpreter
//!
//! Main entry point for the CLI application.

use std::ffi::OsString;
use std::io::{self, Write};

use clap::Parser;
use cratchit::core::logging;
use cratchit::{Config, Cratchit, Repl, StartupContext};
use tracing::{error, warn};

/// Cratchit - command interpreter with durable key-value state
///
/// Every argument is part of the first command; there are no flags.
#[derive(Parser, Debug)]
#[command(name = "cratchit")]
#[command(author, version, about, long_about = None)]
#[command(disable_help_flag = true, disable_version_flag = true)]
struct Args {
    /// First command, processed before any interactive input
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    command: Vec<OsString>,
}

impl Args {
    /// Parse `args`, falling back to taking them verbatim if clap objects
    fn from_args<I>(args: I) -> (Self, Option<clap::Error>)
    where
        I: IntoIterator<Item = OsString>,
    {
        let args: Vec<OsString> = args.into_iter().collect();
        match Self::try_parse_from(&args) {
            Ok(parsed) => (parsed, None),
            Err(e) => (
                Self {
                    command: args.into_iter().skip(1).collect(),
                },
                Some(e),
            ),
        }
    }

    /// Arguments decoded for display, invalid UTF-8 replaced
    fn command_words(&self) -> Vec<String> {
        self.command
            .iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect()
    }
}

fn main() -> anyhow::Result<()> {
    let (args, parse_error) = Args::from_args(std::env::args_os());

    let config = Config::load();
    logging::init(&config.logging);

    if let Some(e) = parse_error {
        warn!("Taking arguments verbatim: {}", e);
    }

    let startup = StartupContext::resolve(args.command_words());

    let mut stdout = io::stdout().lock();
    if config.repl.show_search_path {
        startup.write_search_path(&mut stdout);
    }

    let cratchit = Cratchit::open(startup.environment_file());
    let mut repl = Repl::new(cratchit, startup.command, io::stdin().lock(), stdout);

    if let Err(e) = repl.run() {
        error!("Interpreter stopped: {}", e);
    }

    let mut stdout = repl.close();
    let _ = writeln!(stdout);
    let _ = stdout.flush();

    Ok(())
}
