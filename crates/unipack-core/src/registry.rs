use crate::format::FormatClass;
use crate::request::Action;

/// Identifier for every external program the dispatcher may invoke.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToolId {
    Tar,
    Gzip,
    Bzip2,
    Xz,
    Lzma,
    Lzip,
    Lzop,
    Compress,
    SevenZip,
    SevenZipLegacy,
    Rar,
    Winrar,
    Unrar,
    Zip,
    Unzip,
}

impl ToolId {
    /// Binary name looked up on PATH.
    pub fn program(self) -> &'static str {
        match self {
            ToolId::Tar => "tar",
            ToolId::Gzip => "gzip",
            ToolId::Bzip2 => "bzip2",
            ToolId::Xz => "xz",
            ToolId::Lzma => "lzma",
            ToolId::Lzip => "lzip",
            ToolId::Lzop => "lzop",
            ToolId::Compress => "compress",
            ToolId::SevenZip => "7z",
            ToolId::SevenZipLegacy => "7zr",
            ToolId::Rar => "rar",
            ToolId::Winrar => "winrar",
            ToolId::Unrar => "unrar",
            ToolId::Zip => "zip",
            ToolId::Unzip => "unzip",
        }
    }

    /// Inverse of `program`, for forced-tool selection on the command line.
    pub fn from_name(name: &str) -> Option<ToolId> {
        Some(match name {
            "tar" => ToolId::Tar,
            "gzip" => ToolId::Gzip,
            "bzip2" => ToolId::Bzip2,
            "xz" => ToolId::Xz,
            "lzma" => ToolId::Lzma,
            "lzip" => ToolId::Lzip,
            "lzop" => ToolId::Lzop,
            "compress" => ToolId::Compress,
            "7z" => ToolId::SevenZip,
            "7zr" => ToolId::SevenZipLegacy,
            "rar" => ToolId::Rar,
            "winrar" => ToolId::Winrar,
            "unrar" => ToolId::Unrar,
            "zip" => ToolId::Zip,
            "unzip" => ToolId::Unzip,
            _ => return None,
        })
    }
}

/// Candidate tools for an archive class and action, in preference order.
///
/// Tar-family and filter formats have one natural tool derived from the
/// format itself; the dispatcher never walks a list for those, so their
/// rows here are only the trivial ones.
pub fn candidates(class: FormatClass, action: Action) -> &'static [ToolId] {
    use ToolId::*;
    match (class, action) {
        (FormatClass::SevenZ, Action::Pack) => &[SevenZip, SevenZipLegacy],
        (FormatClass::SevenZ, Action::Unpack) => &[SevenZip, SevenZipLegacy, Winrar],
        (FormatClass::SevenZ, Action::View) => &[SevenZip, SevenZipLegacy],

        (FormatClass::Rar, Action::Pack) => &[Rar, Winrar],
        (FormatClass::Rar, Action::Unpack) => &[Unrar, Rar, Winrar, SevenZip],
        (FormatClass::Rar, Action::View) => &[Unrar, Rar, SevenZip],

        (FormatClass::Zip, Action::Pack) => &[Zip, SevenZip, Winrar],
        (FormatClass::Zip, Action::Unpack) => &[Unzip, SevenZip, Winrar],
        (FormatClass::Zip, Action::View) => &[Unzip, SevenZip],

        (FormatClass::Unknown, Action::Pack) => &[SevenZip, Winrar],
        (FormatClass::Unknown, Action::Unpack) => &[SevenZip, Rar, Winrar],
        (FormatClass::Unknown, Action::View) => &[SevenZip],

        (FormatClass::TarFamily, _) => &[Tar],
        (FormatClass::Filter, _) => &[],
    }
}
