//! rar family dialect (`rar`, `unrar`, `winrar`). Unlike `zip -r` and
//! tar these tools do not descend into directories unless asked, so pack
//! always requests recursion. The output directory is a bare positional
//! argument, not 7z's attached `-o` form.

use super::Plan;
use crate::error::Result;
use crate::exec::CommandSpec;
use crate::format::Format;
use crate::registry::ToolId;
use crate::request::Request;

pub(super) fn pack(tool: ToolId, format: &Format, req: &Request) -> Result<Plan> {
    let mut args: Vec<String> = vec!["a".into(), req.archive.to_string()];
    if tool == ToolId::Winrar {
        args.push(format!("-af{}", format.token()));
    }
    if let Some(password) = &req.password {
        args.push(format!("-p{password}"));
    }
    args.push("-r".into());
    args.extend(req.extra_args()?);
    args.push("--".into());
    args.extend(req.inputs.iter().map(ToString::to_string));
    Ok(vec![vec![CommandSpec::new(tool.program()).args(args)]])
}

pub(super) fn unpack(tool: ToolId, req: &Request) -> Result<Plan> {
    let mut args: Vec<String> = vec!["x".into(), req.archive.to_string()];
    if let Some(password) = &req.password {
        args.push(format!("-p{password}"));
    }
    args.extend(req.extra_args()?);
    args.push(req.output_or_cwd().to_string());
    Ok(vec![vec![CommandSpec::new(tool.program()).args(args)]])
}

pub(super) fn view(tool: ToolId, req: &Request) -> Result<Plan> {
    // four listing tiers: bare, file list, technical, technical+verbose
    let command = if req.test {
        "t"
    } else {
        match req.verbosity {
            0 => "l",
            1 => "v",
            2 => "lt",
            _ => "vt",
        }
    };
    let mut args: Vec<String> = vec![command.into(), req.archive.to_string()];
    if let Some(password) = &req.password {
        args.push(format!("-p{password}"));
    }
    args.extend(req.extra_args()?);
    Ok(vec![vec![CommandSpec::new(tool.program()).args(args)]])
}
