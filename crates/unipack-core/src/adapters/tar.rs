//! tar dialect. Compound `tar.*` formats pipe `tar c` output through the
//! matching filter compressor; plain tar writes the archive directly.

use super::Plan;
use crate::error::Result;
use crate::exec::CommandSpec;
use crate::format::Format;
use crate::request::{Request, Target};

pub(super) fn pack(format: &Format, req: &Request) -> Result<Plan> {
    let mut args: Vec<String> = vec!["cf".into(), "-".into()];
    args.extend(req.extra_args()?);
    if req.verbosity > 0 {
        args.push("-v".into());
    }
    // guard against inputs that look like options
    args.push("--".into());
    args.extend(req.inputs.iter().map(ToString::to_string));
    let create = CommandSpec::new("tar").args(args);

    let pipeline = match format.compound_compressor() {
        None => vec![redirect(create, &req.archive)],
        Some(compressor) => {
            let mut press = CommandSpec::new(compressor.program());
            if req.verbosity > 0 {
                press = press.arg("-v");
            }
            vec![create.pipe_to_next(), redirect(press, &req.archive)]
        }
    };
    Ok(vec![pipeline])
}

pub(super) fn unpack(format: &Format, req: &Request) -> Result<Plan> {
    let mut args: Vec<String> = vec![
        "xf".into(),
        req.archive.to_string(),
        "-C".into(),
        req.output_or_cwd().to_string(),
    ];
    args.extend(legacy_lzma_flag(format));
    args.extend(req.extra_args()?);
    if req.verbosity > 0 {
        args.push("-v".into());
    }
    Ok(vec![vec![CommandSpec::new("tar").args(args)]])
}

pub(super) fn view(format: &Format, req: &Request) -> Result<Plan> {
    let mut args: Vec<String> = vec!["tf".into(), req.archive.to_string()];
    args.extend(legacy_lzma_flag(format));
    args.extend(req.extra_args()?);
    if req.verbosity > 0 {
        args.push("-v".into());
    }
    Ok(vec![vec![CommandSpec::new("tar").args(args)]])
}

/// tar autodetects every compound compression except legacy lzma, which
/// needs its explicit flag when reading.
fn legacy_lzma_flag(format: &Format) -> Option<String> {
    (*format == Format::TarLzma).then(|| "--lzma".to_string())
}

fn redirect(spec: CommandSpec, archive: &Target) -> CommandSpec {
    match archive {
        Target::Stdio => spec,
        Target::Path(p) => spec.stdout_file(p),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::StdoutSink;
    use crate::request::Target;

    fn req(archive: &str) -> Request {
        Request::new(Target::parse(archive))
            .input(Target::parse("src"))
            .input(Target::parse("docs"))
    }

    #[test]
    fn plain_tar_writes_archive_directly() {
        let plan = pack(&Format::Tar, &req("out.tar")).unwrap();
        assert_eq!(plan.len(), 1);
        let pipeline = &plan[0];
        assert_eq!(pipeline.len(), 1);
        assert_eq!(pipeline[0].program, "tar");
        assert_eq!(pipeline[0].args, ["cf", "-", "--", "src", "docs"]);
        assert_eq!(pipeline[0].stdout, StdoutSink::File("out.tar".into()));
    }

    #[test]
    fn compound_format_pipes_through_compressor() {
        let plan = pack(&Format::TarGz, &req("out.tar.gz")).unwrap();
        let pipeline = &plan[0];
        assert_eq!(pipeline.len(), 2);
        assert_eq!(pipeline[0].program, "tar");
        assert_eq!(pipeline[0].stdout, StdoutSink::Pipe);
        assert_eq!(pipeline[1].program, "gzip");
        assert_eq!(pipeline[1].stdout, StdoutSink::File("out.tar.gz".into()));
    }

    #[test]
    fn tar_z_compresses_with_compress() {
        let plan = pack(&Format::TarZ, &req("out.tar.Z")).unwrap();
        assert_eq!(plan[0][1].program, "compress");
    }

    #[test]
    fn stdio_archive_leaves_stdout_alone() {
        let plan = pack(&Format::TarXz, &req("-")).unwrap();
        assert_eq!(plan[0][1].program, "xz");
        assert_eq!(plan[0][1].stdout, StdoutSink::Inherit);
    }

    #[test]
    fn verbosity_flags_both_stages() {
        let request = req("out.tgz").verbosity(1);
        let plan = pack(&Format::TarGz, &request).unwrap();
        assert!(plan[0][0].args.contains(&"-v".to_string()));
        assert!(plan[0][1].args.contains(&"-v".to_string()));
    }

    #[test]
    fn extra_opts_come_before_the_input_guard() {
        let request = req("out.tar").extra_opt("--exclude target");
        let plan = pack(&Format::Tar, &request).unwrap();
        let args = &plan[0][0].args;
        let exclude = args.iter().position(|a| a == "--exclude").unwrap();
        let guard = args.iter().position(|a| a == "--").unwrap();
        assert!(exclude < guard);
    }

    #[test]
    fn unpack_changes_into_output_dir() {
        let request = Request::new(Target::parse("a.tar.gz")).output(Target::parse("dest"));
        let plan = unpack(&Format::TarGz, &request).unwrap();
        assert_eq!(plan[0][0].args, ["xf", "a.tar.gz", "-C", "dest"]);
    }

    #[test]
    fn tar_lzma_needs_the_legacy_flag() {
        let request = Request::new(Target::parse("a.tar.lzma"));
        let plan = unpack(&Format::TarLzma, &request).unwrap();
        assert!(plan[0][0].args.contains(&"--lzma".to_string()));

        let listing = view(&Format::TarLzma, &request).unwrap();
        assert!(listing[0][0].args.contains(&"--lzma".to_string()));

        let plain = view(&Format::TarGz, &request).unwrap();
        assert!(!plain[0][0].args.contains(&"--lzma".to_string()));
    }

    #[test]
    fn view_lists_without_output_dir() {
        let request = Request::new(Target::parse("a.tar")).verbosity(1);
        let plan = view(&Format::Tar, &request).unwrap();
        assert_eq!(plan[0][0].args, ["tf", "a.tar", "-v"]);
    }
}
