use std::io;

use crate::request::Action;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("could not determine the archive format; specify one explicitly")]
    FormatUnresolvable,

    #[error("no tool available to {action}: tried {}", tools.join(", "))]
    AllCandidatesExhausted {
        action: Action,
        tools: Vec<&'static str>,
    },

    #[error("{tool} exited with code {code}")]
    ToolExecutionFailed { tool: &'static str, code: i32 },

    #[error("{0}")]
    UnsupportedOperation(String),

    #[error("{0}")]
    InsufficientSpecification(String),

    #[error("malformed extra options: {0}")]
    InvalidExtraOpt(String),

    #[error("command failed: {program}, source: {source}")]
    CommandFailed { program: String, source: io::Error },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    /// Process exit code for the whole operation. A tool that ran and
    /// failed owns the final code; everything else is a generic failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ToolExecutionFailed { code, .. } => *code,
            _ => 1,
        }
    }
}
