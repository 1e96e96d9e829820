//! Single-stream filter compressors (gzip, bzip2, xz, lzma, lzip, lzop,
//! compress). No container semantics: pack runs one invocation per input
//! and unpack is a plain stdin-to-stdout decompression.

use std::path::PathBuf;

use super::Plan;
use crate::error::Result;
use crate::exec::CommandSpec;
use crate::format::Format;
use crate::registry::ToolId;
use crate::request::{Request, Target};

/// One compress invocation per input. A single input targets the
/// request's archive; with several, each input keeps its own name plus
/// the format suffix and a stdio input maps to stdio output. All inputs
/// are attempted even after a failure.
pub(super) fn pack(tool: ToolId, format: &Format, req: &Request) -> Result<Plan> {
    let mut opts: Vec<String> = Vec::new();
    if req.verbosity > 0 {
        opts.push("-v".into());
    }
    opts.extend(req.extra_args()?);

    let mut plan = Plan::new();
    for input in &req.inputs {
        let outfile = if req.inputs.len() == 1 {
            req.archive.clone()
        } else {
            match input {
                Target::Stdio => Target::Stdio,
                Target::Path(p) => {
                    Target::Path(PathBuf::from(format!("{}.{}", p.display(), format.token())))
                }
            }
        };

        let mut spec = CommandSpec::new(tool.program()).args(opts.clone());
        if let Target::Path(p) = input {
            spec = spec.stdin_file(p);
        }
        if let Target::Path(p) = &outfile {
            spec = spec.stdout_file(p);
        }
        plan.push(vec![spec]);
    }
    Ok(plan)
}

/// Decompress archive to the resolved output target. The dispatcher has
/// already inferred the output name or rejected the request.
pub(super) fn unpack(tool: ToolId, req: &Request) -> Result<Plan> {
    let mut spec = CommandSpec::new(tool.program()).arg("-d");
    spec = spec.args(req.extra_args()?);
    if let Target::Path(p) = &req.archive {
        spec = spec.stdin_file(p);
    }
    if let Some(Target::Path(p)) = &req.output {
        spec = spec.stdout_file(p);
    }
    Ok(vec![vec![spec]])
}

/// gzip has no real listing mode for archives, only `--list` over the
/// stream; a requested test is a second pass whose exit code is combined
/// with the listing's.
pub(super) fn view_gzip(req: &Request) -> Result<Plan> {
    let mut plan = Plan::new();

    let mut list = CommandSpec::new("gzip").arg("--list");
    if req.verbosity > 0 {
        list = list.arg("-v");
    }
    plan.push(vec![attach_archive(list, &req.archive)]);

    if req.test {
        let test = CommandSpec::new("gzip").arg("--test");
        plan.push(vec![attach_archive(test, &req.archive)]);
    }
    Ok(plan)
}

fn attach_archive(spec: CommandSpec, archive: &Target) -> CommandSpec {
    match archive {
        Target::Stdio => spec,
        Target::Path(p) => spec.arg(p.display().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::{StdinSource, StdoutSink};

    #[test]
    fn single_input_targets_the_archive() {
        let req = Request::new(Target::parse("notes.gz")).input(Target::parse("notes"));
        let plan = pack(ToolId::Gzip, &Format::Gz, &req).unwrap();
        assert_eq!(plan.len(), 1);
        let spec = &plan[0][0];
        assert_eq!(spec.program, "gzip");
        assert_eq!(spec.stdin, StdinSource::File("notes".into()));
        assert_eq!(spec.stdout, StdoutSink::File("notes.gz".into()));
    }

    #[test]
    fn multiple_inputs_each_get_the_suffix() {
        let req = Request::new(Target::Stdio)
            .input(Target::parse("a.txt"))
            .input(Target::parse("b.txt"));
        let plan = pack(ToolId::Gzip, &Format::Gz, &req).unwrap();
        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0][0].stdout, StdoutSink::File("a.txt.gz".into()));
        assert_eq!(plan[1][0].stdout, StdoutSink::File("b.txt.gz".into()));
    }

    #[test]
    fn stdio_input_maps_to_stdio_output() {
        let req = Request::new(Target::Stdio)
            .input(Target::parse("a.txt"))
            .input(Target::Stdio);
        let plan = pack(ToolId::Xz, &Format::Xz, &req).unwrap();
        assert_eq!(plan[1][0].stdin, StdinSource::Inherit);
        assert_eq!(plan[1][0].stdout, StdoutSink::Inherit);
    }

    #[test]
    fn unpack_decompresses_between_targets() {
        let req = Request::new(Target::parse("a.bz2")).output(Target::parse("a"));
        let plan = unpack(ToolId::Bzip2, &req).unwrap();
        let spec = &plan[0][0];
        assert_eq!(spec.args, ["-d"]);
        assert_eq!(spec.stdin, StdinSource::File("a.bz2".into()));
        assert_eq!(spec.stdout, StdoutSink::File("a".into()));
    }

    #[test]
    fn unpack_to_stdout_leaves_sink_inherited() {
        let req = Request::new(Target::parse("a.gz")).output(Target::Stdio);
        let plan = unpack(ToolId::Gzip, &req).unwrap();
        assert_eq!(plan[0][0].stdout, StdoutSink::Inherit);
    }

    #[test]
    fn gzip_view_lists_and_optionally_tests() {
        let req = Request::new(Target::parse("a.gz"));
        let plan = view_gzip(&req).unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0][0].args, ["--list", "a.gz"]);

        let testing = Request::new(Target::parse("a.gz")).test(true);
        let plan = view_gzip(&testing).unwrap();
        assert_eq!(plan.len(), 2);
        assert_eq!(plan[1][0].args, ["--test", "a.gz"]);
    }
}
