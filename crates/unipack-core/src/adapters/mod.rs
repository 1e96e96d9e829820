//! Per-(tool, action) translation of the uniform request into concrete
//! command pipelines. One module per tool family; `build` is the closed
//! dispatch table over every combination, so no pairing is resolved at
//! runtime by name.

mod filter;
mod rar;
mod sevenzip;
mod tar;
mod zip;

use crate::error::{Error, Result};
use crate::exec::Pipeline;
use crate::format::Format;
use crate::registry::ToolId;
use crate::request::{Action, Request};

/// An invocation plan: pipelines run strictly in order, and the worst
/// exit code across them is the operation's result.
pub type Plan = Vec<Pipeline>;

pub fn build(action: Action, tool: ToolId, format: &Format, req: &Request) -> Result<Plan> {
    use Action::*;
    use ToolId::*;

    match (action, tool) {
        (Pack, Tar) => tar::pack(format, req),
        (Unpack, Tar) => tar::unpack(format, req),
        (View, Tar) => tar::view(format, req),

        (Pack, Gzip | Bzip2 | Xz | Lzma | Lzip | Lzop | Compress) => {
            filter::pack(tool, format, req)
        }
        (Unpack, Gzip | Bzip2 | Xz | Lzma | Lzip | Lzop | Compress) => filter::unpack(tool, req),
        (View, Gzip | Bzip2 | Xz | Lzma | Lzip | Lzop | Compress) => {
            // gzip can list its streams; no other filter has a listing mode
            if *format == Format::Gz {
                filter::view_gzip(req)
            } else {
                Err(Error::UnsupportedOperation(format!(
                    "{format} streams cannot be listed; unpack instead"
                )))
            }
        }

        (Pack, SevenZip | SevenZipLegacy) => sevenzip::pack(tool, format, req),
        (Unpack, SevenZip | SevenZipLegacy) => sevenzip::unpack(tool, format, req),
        (View, SevenZip | SevenZipLegacy) => sevenzip::view(tool, req),

        (Pack, Rar | Winrar) => rar::pack(tool, format, req),
        (Unpack, Rar | Winrar | Unrar) => rar::unpack(tool, req),
        (View, Rar | Winrar | Unrar) => rar::view(tool, req),
        (Pack, Unrar) => Err(Error::UnsupportedOperation(
            "unrar cannot create archives".into(),
        )),

        (Pack, Zip) => zip::pack(req),
        // zip itself cannot read archives; unzip serves both cases
        (Unpack, Zip | Unzip) => zip::unpack(req),
        (View, Zip | Unzip) => zip::view(req),
        (Pack, Unzip) => Err(Error::UnsupportedOperation(
            "unzip cannot create archives".into(),
        )),
    }
}
