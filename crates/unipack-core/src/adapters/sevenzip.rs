//! 7-Zip dialect, shared by `7z` and the LZMA-only `7zr`. Passwords go
//! inline so the tool never prompts; the output directory uses the
//! attached `-o<dir>` form, unlike the rar family's bare positional.

use super::Plan;
use crate::error::Result;
use crate::exec::CommandSpec;
use crate::format::Format;
use crate::registry::ToolId;
use crate::request::Request;

pub(super) fn pack(tool: ToolId, format: &Format, req: &Request) -> Result<Plan> {
    let mut args: Vec<String> = vec![
        "a".into(),
        req.archive.to_string(),
        format!("-t{}", format.token()),
    ];
    if let Some(password) = &req.password {
        args.push(format!("-p{password}"));
    }
    args.extend(req.extra_args()?);
    args.push("--".into());
    args.extend(req.inputs.iter().map(ToString::to_string));
    Ok(vec![vec![CommandSpec::new(tool.program()).args(args)]])
}

pub(super) fn unpack(tool: ToolId, format: &Format, req: &Request) -> Result<Plan> {
    let mut args: Vec<String> = vec!["x".into(), req.archive.to_string()];
    if *format != Format::Unknown {
        args.push(format!("-t{}", format.token()));
    }
    if let Some(password) = &req.password {
        args.push(format!("-p{password}"));
    }
    args.extend(req.extra_args()?);
    args.push(format!("-o{}", req.output_or_cwd()));
    Ok(vec![vec![CommandSpec::new(tool.program()).args(args)]])
}

pub(super) fn view(tool: ToolId, req: &Request) -> Result<Plan> {
    let mut args: Vec<String> = if req.test {
        vec!["t".into()]
    } else if req.verbosity > 0 {
        vec!["l".into(), "-slt".into()]
    } else {
        vec!["l".into()]
    };
    args.push(req.archive.to_string());
    if let Some(password) = &req.password {
        args.push(format!("-p{password}"));
    }
    args.extend(req.extra_args()?);
    Ok(vec![vec![CommandSpec::new(tool.program()).args(args)]])
}
