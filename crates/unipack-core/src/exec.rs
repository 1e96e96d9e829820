use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use tracing::debug;

use crate::error::{Error, Result};

/// Stdin wiring for one pipeline stage. `Inherit` on a non-first stage
/// means "read from the previous stage".
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StdinSource {
    Inherit,
    File(PathBuf),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StdoutSink {
    Inherit,
    File(PathBuf),
    /// Feed the next command in the pipeline.
    Pipe,
}

/// One external command, fully specified. Built fresh per dispatch
/// attempt and never mutated after construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub stdin: StdinSource,
    pub stdout: StdoutSink,
}

/// Commands chained stdout-to-stdin; every stage except the last uses
/// the `Pipe` sink.
pub type Pipeline = Vec<CommandSpec>;

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            stdin: StdinSource::Inherit,
            stdout: StdoutSink::Inherit,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn stdin_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.stdin = StdinSource::File(path.into());
        self
    }

    pub fn stdout_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.stdout = StdoutSink::File(path.into());
        self
    }

    pub fn pipe_to_next(mut self) -> Self {
        self.stdout = StdoutSink::Pipe;
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            if arg.contains(' ') {
                write!(f, " '{arg}'")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        if let StdinSource::File(p) = &self.stdin {
            write!(f, " < {}", p.display())?;
        }
        if let StdoutSink::File(p) = &self.stdout {
            write!(f, " > {}", p.display())?;
        }
        Ok(())
    }
}

/// Shell-like rendering of a whole pipeline, for logs and dry runs.
pub fn render(pipeline: &[CommandSpec]) -> String {
    pipeline
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Runs command pipelines and prepares output directories. Selected once
/// per invocation (system or dry-run) and injected into the dispatcher.
pub trait Executor {
    /// Run a pipeline to completion and return its exit code. `Ok` with
    /// a nonzero code means the tool ran and failed; `Err` means it
    /// could not be run at all.
    fn run(&self, pipeline: &[CommandSpec]) -> Result<i32>;

    /// Create a directory an adapter is about to write into.
    fn ensure_dir(&self, path: &Path) -> Result<()>;
}

/// Spawns real processes synchronously, one pipeline at a time.
pub struct SystemExecutor;

impl SystemExecutor {
    fn spawn_stage(spec: &CommandSpec, upstream: Option<&mut Child>) -> Result<Child> {
        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args);

        match &spec.stdin {
            StdinSource::File(path) => {
                cmd.stdin(Stdio::from(File::open(path)?));
            }
            StdinSource::Inherit => {
                if let Some(prev) = upstream
                    && let Some(out) = prev.stdout.take()
                {
                    cmd.stdin(Stdio::from(out));
                }
            }
        }
        match &spec.stdout {
            StdoutSink::Inherit => {}
            StdoutSink::Pipe => {
                cmd.stdout(Stdio::piped());
            }
            StdoutSink::File(path) => {
                cmd.stdout(Stdio::from(File::create(path)?));
            }
        }

        cmd.spawn().map_err(|e| Error::CommandFailed {
            program: spec.program.clone(),
            source: e,
        })
    }
}

impl Executor for SystemExecutor {
    fn run(&self, pipeline: &[CommandSpec]) -> Result<i32> {
        debug!(command = %render(pipeline), "spawning");
        let mut children: Vec<Child> = Vec::with_capacity(pipeline.len());
        for spec in pipeline {
            let child = Self::spawn_stage(spec, children.last_mut())?;
            children.push(child);
        }

        // The first failing stage owns the pipeline's exit code.
        let mut code = 0;
        for (mut child, spec) in children.into_iter().zip(pipeline) {
            let status = child.wait().map_err(|e| Error::CommandFailed {
                program: spec.program.clone(),
                source: e,
            })?;
            if code == 0 && !status.success() {
                code = status.code().unwrap_or(1);
            }
        }
        Ok(code)
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        std::fs::create_dir_all(path)?;
        Ok(())
    }
}

/// Prints what would run instead of running it. Directory creation is a
/// no-op, so a dry run leaves the filesystem untouched.
pub struct DryRun;

impl Executor for DryRun {
    fn run(&self, pipeline: &[CommandSpec]) -> Result<i32> {
        println!("{}", render(pipeline));
        Ok(0)
    }

    fn ensure_dir(&self, _path: &Path) -> Result<()> {
        Ok(())
    }
}
