//! Running external programs and collecting their output

use serde::Deserialize;
use std::process::{ExitStatus, Stdio};
use thiserror::Error;
use tokio::process::Command;

/// A program together with the leading arguments it should always get.
///
/// Used as a prefix, the arguments of a specific call are appended after
/// `args`. This allows wrapping a program in `sudo` or similar from the
/// configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandStrings {
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("couldn't run {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{command} failed ({status}): {stderr}")]
    Failed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },
}

impl CommandStrings {
    pub fn new(command: &str, args: &[&str]) -> CommandStrings {
        CommandStrings {
            command: command.to_owned(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Human readable form of the full command line, for logs and errors.
    pub fn display_with<S: AsRef<str>>(&self, extra_args: &[S]) -> String {
        let mut line = self.command.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        for arg in extra_args {
            line.push(' ');
            line.push_str(arg.as_ref());
        }
        line
    }

    /// Run the command with `extra_args` appended, wait for it to finish and
    /// return its standard output.
    ///
    /// A non-zero exit status is reported as [CommandError::Failed], carrying
    /// the program's standard error.
    pub async fn run<S: AsRef<str>>(&self, extra_args: &[S]) -> Result<String, CommandError> {
        let command_line = self.display_with(extra_args);
        log::debug!("Running {}", command_line);
        let mut command = Command::new(&self.command);
        command.args(&self.args);
        for arg in extra_args {
            let arg: &str = arg.as_ref();
            command.arg(arg);
        }
        let output = command
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| CommandError::Spawn {
                command: command_line.clone(),
                source,
            })?;
        if !output.status.success() {
            return Err(CommandError::Failed {
                command: command_line,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
