use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::format::Format;
use crate::locate::ToolLocator;
use crate::probe::ContentProbe;
use crate::registry::ToolId;

/// Outer compression layers `file -z` names directly; each upgrades to
/// its `tar.*` variant when the description also reports a tar archive.
const OUTER: &[(&str, Format)] = &[
    ("gzip compressed data", Format::Gz),
    ("bzip2 compressed data", Format::Bz2),
    ("XZ compressed data", Format::Xz),
    ("compress'd data", Format::Z),
    ("lzip compressed data", Format::Lz),
];

const DIRECT: &[(&str, Format)] = &[
    ("RAR archive data", Format::Rar),
    ("RAR self-extracting", Format::Rar),
    ("Zip archive data", Format::Zip),
    ("ZIP self-extracting", Format::Zip),
    ("tar archive", Format::Tar),
    ("7-zip archive data", Format::SevenZ),
];

/// Guess an archive's format from its content.
///
/// LZMA and lzop streams need a second probe of the decompressed bytes
/// to tell `tar.lzma`/`tar.lzo` from their bare counterparts, because
/// `file -z` does not look through those layers. When the decoder binary
/// is missing the bare filter format is returned; ambiguous or missing
/// signatures yield `Unknown` rather than an error.
pub fn identify(path: &Path, probe: &dyn ContentProbe, locator: &dyn ToolLocator) -> Result<Format> {
    let desc = probe.describe(path)?;

    for (signature, format) in OUTER {
        if desc.contains(signature) {
            return Ok(if desc.contains("tar archive") {
                format.wrapped_in_tar()
            } else {
                format.clone()
            });
        }
    }

    if desc.contains("LZMA compressed data") {
        return second_level(path, probe, locator, ToolId::Lzma, Format::Lzma);
    }
    if desc.contains("lzop compressed data") {
        return second_level(path, probe, locator, ToolId::Lzop, Format::Lzo);
    }

    for (signature, format) in DIRECT {
        if desc.contains(signature) {
            return Ok(format.clone());
        }
    }
    Ok(Format::Unknown)
}

fn second_level(
    path: &Path,
    probe: &dyn ContentProbe,
    locator: &dyn ToolLocator,
    decoder: ToolId,
    bare: Format,
) -> Result<Format> {
    let Some(binary) = locator.locate(decoder) else {
        debug!(decoder = decoder.program(), "decoder missing, reporting bare filter format");
        return Ok(bare);
    };
    let desc = probe.describe_filtered(&binary, path)?;
    Ok(if desc.contains("tar archive") {
        bare.wrapped_in_tar()
    } else {
        bare
    })
}
