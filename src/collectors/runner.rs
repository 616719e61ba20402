use crate::error::{Result, SmartError};
use std::process::Command;

/// Exit status and merged output of one external command run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Low 8 bits of the exit code.
    pub status: u8,
    /// stdout followed by stderr, one entry per line.
    pub lines:  Vec<String>,
}

/// Runs an external program to completion. Timeouts and cancellation are the
/// implementor's concern.
pub trait CommandRunner: Send + Sync {
    fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput>;
}

/// Runs commands with `std::process::Command`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput> {
        let out = Command::new(program)
            .args(args)
            .output()
            .map_err(|source| SmartError::Spawn { command: render_command(program, args), source })?;

        let code = out
            .status
            .code()
            .ok_or_else(|| SmartError::Terminated { command: render_command(program, args) })?;

        let mut lines: Vec<String> = String::from_utf8_lossy(&out.stdout)
            .lines()
            .map(str::to_string)
            .collect();
        lines.extend(String::from_utf8_lossy(&out.stderr).lines().map(str::to_string));

        Ok(CommandOutput { status: (code & 0xff) as u8, lines })
    }
}

/// `smartctl -x /dev/sda`, for logs and error messages.
pub fn render_command(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}
