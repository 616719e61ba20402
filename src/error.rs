//! Error types for the smartctl engine.

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, SmartError>;

/// Errors raised while running smartctl.
///
/// Parsing never fails: lines that do not match a grammar are skipped.
#[derive(Error, Debug)]
pub enum SmartError {
    /// Fatal exit status (command line did not parse, or the device could not be opened).
    #[error("'{command}' failed with exit status {status:#04x}")]
    Execution {
        command: String,
        output:  Vec<String>,
        status:  u8,
    },

    /// The tool could not be started at all.
    #[error("failed to start '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source:  std::io::Error,
    },

    /// The tool was killed by a signal and produced no exit status.
    #[error("'{command}' terminated without an exit status")]
    Terminated { command: String },
}

impl SmartError {
    /// Captured output for execution errors, empty otherwise.
    pub fn output(&self) -> &[String] {
        match self {
            SmartError::Execution { output, .. } => output,
            _ => &[],
        }
    }
}
