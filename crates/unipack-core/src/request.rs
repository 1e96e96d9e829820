use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::format::Format;
use crate::registry::ToolId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Pack,
    Unpack,
    View,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::Pack => "pack",
            Action::Unpack => "unpack",
            Action::View => "view",
        })
    }
}

/// A path argument or the `-` stdin/stdout sentinel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target {
    Stdio,
    Path(PathBuf),
}

impl Target {
    pub fn parse(s: &str) -> Target {
        if s == "-" {
            Target::Stdio
        } else {
            Target::Path(PathBuf::from(s))
        }
    }

    pub fn is_stdio(&self) -> bool {
        matches!(self, Target::Stdio)
    }

    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Target::Stdio => None,
            Target::Path(p) => Some(p),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Stdio => f.write_str("-"),
            Target::Path(p) => write!(f, "{}", p.display()),
        }
    }
}

/// The uniform request every adapter translates from. Built once per
/// invocation by the argument layer and read-only inside the core.
#[derive(Clone, Debug)]
pub struct Request {
    pub inputs: Vec<Target>,
    pub archive: Target,
    pub format: Option<Format>,
    pub tool: Option<ToolId>,
    pub password: Option<String>,
    pub extra_opt: Option<String>,
    pub verbosity: u8,
    pub output: Option<Target>,
    pub test: bool,
}

impl Request {
    pub fn new(archive: Target) -> Self {
        Self {
            inputs: Vec::new(),
            archive,
            format: None,
            tool: None,
            password: None,
            extra_opt: None,
            verbosity: 0,
            output: None,
            test: false,
        }
    }

    pub fn inputs(mut self, inputs: Vec<Target>) -> Self {
        self.inputs = inputs;
        self
    }

    pub fn input(mut self, input: Target) -> Self {
        self.inputs.push(input);
        self
    }

    pub fn format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }

    pub fn tool(mut self, tool: ToolId) -> Self {
        self.tool = Some(tool);
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn extra_opt(mut self, extra: impl Into<String>) -> Self {
        self.extra_opt = Some(extra.into());
        self
    }

    pub fn verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn output(mut self, output: Target) -> Self {
        self.output = Some(output);
        self
    }

    pub fn test(mut self, test: bool) -> Self {
        self.test = test;
        self
    }

    /// Extra options split by shell-word rules, in argument order.
    pub fn extra_args(&self) -> Result<Vec<String>> {
        match &self.extra_opt {
            None => Ok(Vec::new()),
            Some(raw) => shlex::split(raw).ok_or_else(|| Error::InvalidExtraOpt(raw.clone())),
        }
    }

    /// Output directory with the working-directory default applied.
    pub fn output_or_cwd(&self) -> Target {
        self.output
            .clone()
            .unwrap_or_else(|| Target::Path(PathBuf::from(".")))
    }

    pub fn validate(&self, action: Action) -> Result<()> {
        if action == Action::Pack && self.inputs.is_empty() {
            return Err(Error::InsufficientSpecification(
                "nothing to pack: no inputs given".into(),
            ));
        }
        let stdio_ends = usize::from(self.archive.is_stdio())
            + usize::from(self.output.as_ref().is_some_and(Target::is_stdio));
        if stdio_ends > 1 {
            return Err(Error::InsufficientSpecification(
                "archive and output cannot both be '-'".into(),
            ));
        }
        Ok(())
    }
}
