//! Candidate walk and the pack/unpack/view entry points.
//!
//! The only condition that moves the walk to the next candidate is a
//! binary that cannot be located. Once a tool runs, its result is final:
//! a nonzero exit is reported, never retried with another tool.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::adapters;
use crate::error::{Error, Result};
use crate::exec::{self, Executor};
use crate::format::{Format, FormatClass};
use crate::locate::ToolLocator;
use crate::registry::{self, ToolId};
use crate::request::{Action, Request, Target};

pub struct Dispatcher<'a> {
    exec: &'a dyn Executor,
    locator: &'a dyn ToolLocator,
}

impl<'a> Dispatcher<'a> {
    pub fn new(exec: &'a dyn Executor, locator: &'a dyn ToolLocator) -> Self {
        Self { exec, locator }
    }

    pub fn pack(&self, req: &Request) -> Result<i32> {
        self.entry(Action::Pack, req)
    }

    pub fn unpack(&self, req: &Request) -> Result<i32> {
        self.entry(Action::Unpack, req)
    }

    pub fn view(&self, req: &Request) -> Result<i32> {
        self.entry(Action::View, req)
    }

    fn entry(&self, action: Action, req: &Request) -> Result<i32> {
        req.validate(action)?;
        let format = req.format.clone().ok_or(Error::FormatUnresolvable)?;
        self.dispatch(action, &format, req)
    }

    fn dispatch(&self, action: Action, format: &Format, req: &Request) -> Result<i32> {
        let req = self.resolve_targets(action, format, req)?;

        if let Some(forced) = req.tool {
            let tool = redirect_forced(action, forced);
            if tool != forced {
                debug!(
                    forced = forced.program(),
                    used = tool.program(),
                    "forced tool cannot read archives, redirected"
                );
            }
            return self.run_adapter(action, tool, format, &req);
        }

        let class = format.class().ok_or_else(|| {
            Error::UnsupportedOperation(format!("no tool handles {format} archives"))
        })?;

        match class {
            FormatClass::TarFamily => self.run_adapter(action, ToolId::Tar, format, &req),
            FormatClass::Filter => {
                let tool = natural_filter_tool(action, format)?;
                self.run_adapter(action, tool, format, &req)
            }
            FormatClass::SevenZ | FormatClass::Rar | FormatClass::Zip | FormatClass::Unknown => {
                self.walk_candidates(action, class, format, &req)
            }
        }
    }

    fn walk_candidates(
        &self,
        action: Action,
        class: FormatClass,
        format: &Format,
        req: &Request,
    ) -> Result<i32> {
        let mut tried = Vec::new();
        for &tool in registry::candidates(class, action) {
            match self.locator.locate(tool) {
                None => {
                    debug!(tool = tool.program(), "candidate not installed, skipping");
                    tried.push(tool.program());
                }
                Some(path) => {
                    debug!(tool = tool.program(), path = %path.display(), "candidate selected");
                    return self.run_adapter(action, tool, format, req);
                }
            }
        }
        Err(Error::AllCandidatesExhausted {
            action,
            tools: tried,
        })
    }

    fn run_adapter(
        &self,
        action: Action,
        tool: ToolId,
        format: &Format,
        req: &Request,
    ) -> Result<i32> {
        let plan = adapters::build(action, tool, format, req)?;
        let mut worst = 0;
        for pipeline in &plan {
            info!("running: {}", exec::render(pipeline));
            let code = self.exec.run(pipeline)?;
            if code > worst {
                worst = code;
            }
        }
        if worst != 0 {
            return Err(Error::ToolExecutionFailed {
                tool: tool.program(),
                code: worst,
            });
        }
        Ok(0)
    }

    /// Apply output-target defaults before any adapter sees the request:
    /// unpack of container formats lands in the working directory (the
    /// directory is created here, a no-op under dry-run), while a filter
    /// unpack infers its output file from the archive name.
    fn resolve_targets(&self, action: Action, format: &Format, req: &Request) -> Result<Request> {
        let mut req = req.clone();
        if action != Action::Unpack {
            return Ok(req);
        }

        if format.is_filter() {
            if req.output.is_none() {
                req.output = Some(Target::Path(infer_filter_output(&req.archive, format)?));
            }
        } else {
            let output = req.output_or_cwd();
            if let Target::Path(dir) = &output {
                self.exec.ensure_dir(dir)?;
            }
            req.output = Some(output);
        }
        Ok(req)
    }
}

/// `zip` cannot read archives; a forced zip unpack or view is served by
/// unzip instead.
fn redirect_forced(action: Action, tool: ToolId) -> ToolId {
    match (action, tool) {
        (Action::Unpack | Action::View, ToolId::Zip) => ToolId::Unzip,
        _ => tool,
    }
}

fn natural_filter_tool(action: Action, format: &Format) -> Result<ToolId> {
    let tool = match action {
        Action::Pack => format.filter_compressor(),
        Action::Unpack | Action::View => format.filter_decompressor(),
    };
    tool.ok_or_else(|| {
        Error::UnsupportedOperation(format!("no filter tool handles {format} streams"))
    })
}

/// Strip the format suffix off the archive name to get the output file.
fn infer_filter_output(archive: &Target, format: &Format) -> Result<PathBuf> {
    let suffix = format!(".{}", format.token());
    if let Target::Path(path) = archive {
        let name = path.to_string_lossy();
        if let Some(stem) = name.strip_suffix(&suffix)
            && !stem.is_empty()
        {
            return Ok(PathBuf::from(stem));
        }
    }
    Err(Error::InsufficientSpecification(format!(
        "cannot infer an output name for {archive}; pass an explicit output target"
    )))
}
