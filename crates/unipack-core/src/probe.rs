use std::fs::File;
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::{Error, Result};

/// Content inspection collaborator used only by `identify`. Returns the
/// free-text description of a file; callers match type-signature
/// substrings in it and nothing more.
pub trait ContentProbe {
    /// Describe a file, looking through one compression layer.
    fn describe(&self, path: &Path) -> Result<String>;

    /// Describe the stream produced by piping the file through a
    /// decompressor, for the second-level tar probe.
    fn describe_filtered(&self, decoder: &Path, path: &Path) -> Result<String>;
}

/// The real probe: `file -zb -- <path>`, and `<decoder> -d < path | file -`
/// for the second level.
pub struct FileProbe;

impl FileProbe {
    fn run_file(mut cmd: Command) -> Result<String> {
        let output = cmd
            .stderr(Stdio::null())
            .output()
            .map_err(|e| Error::CommandFailed {
                program: "file".into(),
                source: e,
            })?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl ContentProbe for FileProbe {
    fn describe(&self, path: &Path) -> Result<String> {
        let mut cmd = Command::new("file");
        cmd.args(["-zb", "--"]).arg(path);
        let desc = Self::run_file(cmd)?;
        debug!(path = %path.display(), desc = desc.trim(), "probed");
        Ok(desc)
    }

    fn describe_filtered(&self, decoder: &Path, path: &Path) -> Result<String> {
        let source = File::open(path)?;
        let mut child = Command::new(decoder)
            .arg("-d")
            .stdin(Stdio::from(source))
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| Error::CommandFailed {
                program: decoder.display().to_string(),
                source: e,
            })?;

        let mut cmd = Command::new("file");
        cmd.arg("-");
        if let Some(out) = child.stdout.take() {
            cmd.stdin(Stdio::from(out));
        }
        let desc = Self::run_file(cmd);
        // file(1) stops reading early; the decoder may exit nonzero on
        // the broken pipe and that is fine for identification purposes.
        let _ = child.wait();
        desc
    }
}
