//! zip/unzip dialect. `zip` only writes archives, so unpack and view are
//! always expressed in terms of `unzip`.

use super::Plan;
use crate::error::Result;
use crate::exec::CommandSpec;
use crate::request::Request;

pub(super) fn pack(req: &Request) -> Result<Plan> {
    let mut args: Vec<String> = vec!["-r".into(), req.archive.to_string()];
    args.extend(req.extra_args()?);
    if let Some(password) = &req.password {
        args.push(format!("-P{password}"));
    }
    if req.verbosity > 0 {
        args.push("-v".into());
    }
    args.push("--".into());
    args.extend(req.inputs.iter().map(ToString::to_string));
    Ok(vec![vec![CommandSpec::new("zip").args(args)]])
}

pub(super) fn unpack(req: &Request) -> Result<Plan> {
    let mut args: Vec<String> = vec!["-d".into(), req.output_or_cwd().to_string()];
    args.extend(req.extra_args()?);
    if let Some(password) = &req.password {
        args.push(format!("-P{password}"));
    }
    args.push("--".into());
    args.push(req.archive.to_string());
    Ok(vec![vec![CommandSpec::new("unzip").args(args)]])
}

pub(super) fn view(req: &Request) -> Result<Plan> {
    let mode = if req.test {
        "-t"
    } else if req.verbosity > 0 {
        "-v"
    } else {
        "-l"
    };
    let mut args: Vec<String> = vec![mode.into()];
    if let Some(password) = &req.password {
        args.push(format!("-P{password}"));
    }
    args.extend(req.extra_args()?);
    args.push("--".into());
    args.push(req.archive.to_string());
    Ok(vec![vec![CommandSpec::new("unzip").args(args)]])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Target;

    #[test]
    fn pack_recurses_by_default() {
        let req = Request::new(Target::parse("out.zip"))
            .input(Target::parse("src"))
            .input(Target::parse("README"));
        let plan = pack(&req).unwrap();
        assert_eq!(plan[0][0].program, "zip");
        assert_eq!(
            plan[0][0].args,
            ["-r", "out.zip", "--", "src", "README"]
        );
    }

    #[test]
    fn pack_places_password_before_the_guard() {
        let req = Request::new(Target::parse("out.zip"))
            .input(Target::parse("src"))
            .password("pw")
            .verbosity(1);
        let plan = pack(&req).unwrap();
        assert_eq!(
            plan[0][0].args,
            ["-r", "out.zip", "-Ppw", "-v", "--", "src"]
        );
    }

    #[test]
    fn unpack_always_runs_unzip() {
        let req = Request::new(Target::parse("a.zip")).output(Target::parse("dest"));
        let plan = unpack(&req).unwrap();
        assert_eq!(plan[0][0].program, "unzip");
        assert_eq!(plan[0][0].args, ["-d", "dest", "--", "a.zip"]);
    }

    #[test]
    fn view_switches_on_test_and_verbosity() {
        let req = Request::new(Target::parse("a.zip"));
        assert_eq!(view(&req).unwrap()[0][0].args[0], "-l");
        assert_eq!(view(&req.clone().verbosity(1)).unwrap()[0][0].args[0], "-v");
        assert_eq!(view(&req.test(true)).unwrap()[0][0].args[0], "-t");
    }
}
