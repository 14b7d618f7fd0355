use std::ffi::{OsStr, OsString};
use std::fmt;
use std::fs::File;
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::debug;

/// An external program plus its argument vector.
///
/// Arguments are handed to the OS as-is; no shell is involved, so paths and
/// filenames never need quoting. Paths stay `OsString` end to end and reach
/// the tool byte for byte, even when they are not valid UTF-8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    program: OsString,
    args: Vec<OsString>,
}

impl ToolCommand {
    pub fn new(program: impl AsRef<OsStr>) -> Self {
        Self {
            program: program.as_ref().to_os_string(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    pub fn program(&self) -> &OsStr {
        &self.program
    }

    pub fn arguments(&self) -> &[OsString] {
        &self.args
    }

    fn to_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        command
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.to_string_lossy())?;
        for arg in &self.args {
            let arg = arg.to_string_lossy();
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " \"{}\"", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    /// Exit code; `None` when the process was terminated by a signal.
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    /// Short description of a failed run for console messages.
    pub fn failure_message(&self) -> String {
        let status = match self.status {
            Some(code) => format!("exit status {}", code),
            None => "terminated by signal".to_string(),
        };
        match self.stderr.trim() {
            "" => status,
            stderr => format!("{}: {}", status, stderr),
        }
    }
}

/// Executes external tools. Every call blocks until the process exits.
pub trait CommandRunner {
    /// Runs the command with stdout and stderr captured.
    fn capture(&self, command: &ToolCommand) -> io::Result<ToolOutput>;

    /// Runs the command attached to the terminal and returns its exit code.
    fn run_attached(&self, command: &ToolCommand) -> io::Result<Option<i32>>;

    /// Runs the command with stdout streamed into `destination`, which is
    /// created or truncated first. Only stderr is captured.
    fn run_to_file(&self, command: &ToolCommand, destination: &Path) -> io::Result<ToolOutput>;
}

/// Runs commands as real child processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn capture(&self, command: &ToolCommand) -> io::Result<ToolOutput> {
        debug!(%command, "capturing tool output");
        let output = command.to_command().stdin(Stdio::null()).output()?;

        Ok(ToolOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn run_attached(&self, command: &ToolCommand) -> io::Result<Option<i32>> {
        debug!(%command, "running attached tool");
        let status = command.to_command().status()?;
        Ok(status.code())
    }

    fn run_to_file(&self, command: &ToolCommand, destination: &Path) -> io::Result<ToolOutput> {
        debug!(%command, path = %destination.display(), "streaming tool output to file");
        let file = File::create(destination)?;

        let output = command
            .to_command()
            .stdin(Stdio::null())
            .stdout(Stdio::from(file))
            .stderr(Stdio::piped())
            .output()?;

        Ok(ToolOutput {
            status: output.status.code(),
            stdout: String::new(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
