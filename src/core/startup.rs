//! Values resolved once at process start
//!
//! Nothing downstream reads the process environment directly; it gets a
//! [`StartupContext`] instead.

use std::env;
use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;

use tracing::error;

/// File holding the persisted environment, relative to the working directory
pub const ENVIRONMENT_FILE_NAME: &str = "cratchit.env";

/// Shown in place of `PATH` when the variable is not set
pub const UNSET: &str = "<unset>";

/// Startup inputs for the interpreter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupContext {
    /// Process arguments joined into the first command
    pub command: String,
    /// Directory the environment file is resolved against
    pub working_dir: PathBuf,
    /// `PATH`, if set
    pub search_path: Option<String>,
}

impl StartupContext {
    /// Resolve the context from the running process
    pub fn resolve<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            command: join_command(args),
            working_dir: env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            search_path: decode_search_path(env::var_os("PATH")),
        }
    }

    /// Location of `cratchit.env`
    pub fn environment_file(&self) -> PathBuf {
        self.working_dir.join(ENVIRONMENT_FILE_NAME)
    }

    /// The `PATH=` banner line
    pub fn search_path_line(&self) -> String {
        format!("\nPATH={}", self.search_path.as_deref().unwrap_or(UNSET))
    }

    /// Write the banner line to `out`, logging if that fails
    pub fn write_search_path<W: Write>(&self, out: &mut W) {
        if let Err(e) = out
            .write_all(self.search_path_line().as_bytes())
            .and_then(|()| out.flush())
        {
            error!("Failed to write PATH banner: {}", e);
        }
    }
}

/// A set `PATH` stays set even when it is not valid UTF-8
fn decode_search_path(value: Option<OsString>) -> Option<String> {
    value.map(|p| p.to_string_lossy().into_owned())
}

/// Each argument followed by a single space
pub fn join_command<I, S>(args: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    args.into_iter().fold(String::new(), |mut acc, arg| {
        acc.push_str(arg.as_ref());
        acc.push(' ');
        acc
    })
}
