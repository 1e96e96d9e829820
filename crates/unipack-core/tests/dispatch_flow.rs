//! End-to-end flows through the public API: resolve a format, dispatch,
//! and inspect the commands that would run.

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use unipack_core::{
    CommandSpec, ContentProbe, Dispatcher, Error, Executor, Format, Pipeline, Request, Result,
    Target, ToolId, ToolLocator,
};

struct Recorder {
    runs: RefCell<Vec<Pipeline>>,
}

impl Recorder {
    fn new() -> Self {
        Self {
            runs: RefCell::new(Vec::new()),
        }
    }
}

impl Executor for Recorder {
    fn run(&self, pipeline: &[CommandSpec]) -> Result<i32> {
        self.runs.borrow_mut().push(pipeline.to_vec());
        Ok(0)
    }

    fn ensure_dir(&self, _path: &Path) -> Result<()> {
        Ok(())
    }
}

struct Installed(&'static [ToolId]);

impl ToolLocator for Installed {
    fn locate(&self, tool: ToolId) -> Option<PathBuf> {
        self.0
            .contains(&tool)
            .then(|| PathBuf::from(tool.program()))
    }
}

struct CannedProbe(&'static str);

impl ContentProbe for CannedProbe {
    fn describe(&self, _path: &Path) -> Result<String> {
        Ok(self.0.to_string())
    }

    fn describe_filtered(&self, _decoder: &Path, _path: &Path) -> Result<String> {
        Ok(String::new())
    }
}

#[test]
fn identified_format_drives_the_unpack_dispatch() {
    // a gzip-wrapped tar stream, identified by content, unpacked by tar
    let probe = CannedProbe("gzip compressed data (POSIX tar archive)");
    let locator = Installed(&[ToolId::Tar]);
    let format = unipack_core::identify(Path::new("mystery"), &probe, &locator).unwrap();
    assert_eq!(format, Format::TarGz);

    let exec = Recorder::new();
    let dispatcher = Dispatcher::new(&exec, &locator);
    let req = Request::new(Target::parse("mystery")).format(format);
    assert_eq!(dispatcher.unpack(&req).unwrap(), 0);

    let runs = exec.runs.borrow();
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0][0].program, "tar");
    assert_eq!(runs[0][0].args[..2], ["xf".to_string(), "mystery".to_string()]);
}

#[test]
fn unknown_content_falls_back_to_the_unknown_candidates() {
    let probe = CannedProbe("data");
    let locator = Installed(&[ToolId::Rar]);
    let format = unipack_core::identify(Path::new("blob"), &probe, &locator).unwrap();
    assert_eq!(format, Format::Unknown);

    let exec = Recorder::new();
    let dispatcher = Dispatcher::new(&exec, &locator);
    let req = Request::new(Target::parse("blob")).format(format);
    // unknown unpack order is 7z, rar, winrar; only rar is installed
    assert_eq!(dispatcher.unpack(&req).unwrap(), 0);
    assert_eq!(exec.runs.borrow()[0][0].program, "rar");
}

#[test]
fn filename_resolution_feeds_pack() {
    let format = Format::from_filename("backup.tgz").unwrap();
    assert_eq!(format, Format::TarGz);

    let exec = Recorder::new();
    let locator = Installed(&[]);
    let dispatcher = Dispatcher::new(&exec, &locator);
    let req = Request::new(Target::parse("backup.tgz"))
        .input(Target::parse("data"))
        .format(format);
    dispatcher.pack(&req).unwrap();

    let runs = exec.runs.borrow();
    assert_eq!(runs[0].len(), 2, "tar must pipe into gzip");
}

#[test]
fn every_candidate_missing_is_a_hard_error() {
    let exec = Recorder::new();
    let locator = Installed(&[]);
    let dispatcher = Dispatcher::new(&exec, &locator);
    let req = Request::new(Target::parse("a.7z")).format(Format::SevenZ);

    let err = dispatcher.view(&req).unwrap_err();
    assert!(matches!(err, Error::AllCandidatesExhausted { .. }));
    assert_eq!(err.exit_code(), 1);
}
