//! unipack CLI: argument parsing, format resolution and archive-name
//! inference on top of the core dispatch engine.

use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{ArgAction, Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use unipack_core::{
    Dispatcher, DryRun, Error, Executor, FileProbe, Format, Request, SystemExecutor, Target,
    ToolId, WhichLocator,
};

#[derive(Parser)]
#[command(
    name = "unipack",
    version,
    about = "pack, unpack and view archives with whatever tool is installed"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compress files or directories into an archive
    Pack(PackArgs),
    /// Extract an archive
    Unpack(UnpackArgs),
    /// List an archive's contents, or test it
    View(ViewArgs),
}

#[derive(Args)]
struct PackArgs {
    /// Files or directories to pack; `-` reads from stdin
    #[arg(required = true)]
    inputs: Vec<String>,

    /// Archive to create; `-` writes to stdout
    #[arg(long = "to", value_name = "ARCHIVE")]
    archive: Option<String>,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Args)]
struct UnpackArgs {
    /// Archive to extract; `-` reads from stdin
    archive: String,

    /// Output directory, or output file for plain compressed streams
    #[arg(long = "to", value_name = "OUTPUT")]
    output: Option<String>,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Args)]
struct ViewArgs {
    /// Archive to inspect
    archive: String,

    /// Test archive integrity instead of listing
    #[arg(short, long)]
    test: bool,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Args)]
struct CommonArgs {
    /// Increase output verbosity
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,

    /// Password for the archive
    #[arg(short, long, visible_alias = "passwd")]
    password: Option<String>,

    /// Extra options passed through to the selected tool
    #[arg(long, value_name = "OPTS")]
    extra_opt: Option<String>,

    /// Force a specific tool instead of the preference order
    #[arg(long, value_name = "TOOL")]
    tool: Option<String>,

    /// Archive format; inferred when omitted
    #[arg(short, long)]
    format: Option<String>,

    /// Print the commands that would run without executing anything
    #[arg(long)]
    dry_run: bool,
}

impl Command {
    fn common(&self) -> &CommonArgs {
        match self {
            Command::Pack(a) => &a.common,
            Command::Unpack(a) => &a.common,
            Command::View(a) => &a.common,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.command.common().verbose);

    let code = match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("unipack: {err:#}");
            err.downcast_ref::<Error>().map_or(1, Error::exit_code)
        }
    };
    std::process::exit(code);
}

fn run(cli: &Cli) -> anyhow::Result<i32> {
    let common = cli.command.common();

    let system = SystemExecutor;
    let dry = DryRun;
    let exec: &dyn Executor = if common.dry_run { &dry } else { &system };
    let locator = WhichLocator;
    let dispatcher = Dispatcher::new(exec, &locator);

    let tool = common
        .tool
        .as_deref()
        .map(|name| ToolId::from_name(name).with_context(|| format!("unknown tool {name:?}")))
        .transpose()?;

    match &cli.command {
        Command::Pack(args) => {
            let inputs: Vec<Target> = args.inputs.iter().map(|s| Target::parse(s)).collect();
            let format = match &common.format {
                Some(token) => Format::normalize(token),
                None => match args.archive.as_deref().and_then(Format::from_filename) {
                    Some(format) => format,
                    None => bail!(
                        "could not determine the archive format; \
                         pass --format or a recognizable --to name"
                    ),
                },
            };
            if format.is_filter() && args.archive.is_some() && inputs.len() > 1 {
                bail!(
                    "a single {format} stream cannot hold several inputs; \
                     drop --to to compress each one under its own name"
                );
            }
            let archive = match &args.archive {
                Some(s) => Target::parse(s),
                None => guess_archive_name(&inputs, &format)?,
            };
            let req = base_request(archive, common, tool).inputs(inputs).format(format);
            finish(dispatcher.pack(&req))
        }
        Command::Unpack(args) => {
            let archive = Target::parse(&args.archive);
            let format = resolve_format(common.format.as_deref(), &archive, &locator)?;
            let mut req = base_request(archive, common, tool).format(format);
            if let Some(output) = &args.output {
                req = req.output(Target::parse(output));
            }
            finish(dispatcher.unpack(&req))
        }
        Command::View(args) => {
            let archive = Target::parse(&args.archive);
            let format = resolve_format(common.format.as_deref(), &archive, &locator)?;
            let mut req = base_request(archive, common, tool).format(format);
            req = req.test(args.test);
            finish(dispatcher.view(&req))
        }
    }
}

fn base_request(archive: Target, common: &CommonArgs, tool: Option<ToolId>) -> Request {
    let mut req = Request::new(archive).verbosity(common.verbose);
    if let Some(password) = &common.password {
        req = req.password(password.clone());
    }
    if let Some(extra) = &common.extra_opt {
        req = req.extra_opt(extra.clone());
    }
    if let Some(tool) = tool {
        req = req.tool(tool);
    }
    req
}

/// An explicit --format wins; otherwise the archive content decides.
fn resolve_format(
    flag: Option<&str>,
    archive: &Target,
    locator: &WhichLocator,
) -> anyhow::Result<Format> {
    if let Some(token) = flag {
        return Ok(Format::normalize(token));
    }
    let Some(path) = archive.as_path() else {
        bail!("cannot probe an archive read from stdin; pass --format");
    };
    let format = unipack_core::identify(path, &FileProbe, locator)?;
    Ok(format)
}

/// Pick an archive name when --to is omitted: a lone input names its own
/// archive, several filter inputs each get their own stream, and several
/// container inputs fall back to the working directory's name.
fn guess_archive_name(inputs: &[Target], format: &Format) -> anyhow::Result<Target> {
    if let [input] = inputs {
        return Ok(match input {
            Target::Stdio => Target::Stdio,
            Target::Path(p) => {
                Target::Path(PathBuf::from(format!("{}.{}", p.display(), format.token())))
            }
        });
    }
    if format.is_filter() {
        // each input becomes <name>.<fmt>; the archive target goes unused
        return Ok(Target::Stdio);
    }
    let cwd = std::env::current_dir().context("could not determine the working directory")?;
    let name = cwd
        .file_name()
        .and_then(|n| n.to_str())
        .context("could not determine an archive name here; pass --to")?;
    Ok(Target::parse(&format!("{name}.{}", format.token())))
}

/// A tool that ran and failed owns the operation's exit code; it has
/// already written its diagnostics to stderr, so nothing is added here.
fn finish(result: unipack_core::Result<i32>) -> anyhow::Result<i32> {
    match result {
        Ok(code) => Ok(code),
        Err(Error::ToolExecutionFailed { tool, code }) => {
            tracing::debug!(tool, code, "tool reported failure");
            Ok(code)
        }
        Err(err) => Err(err.into()),
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
