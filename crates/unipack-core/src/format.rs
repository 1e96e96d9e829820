use std::fmt;

use crate::registry::ToolId;

/// Canonical archive/compression format after alias resolution.
///
/// Tokens that map to no known format are carried verbatim in `Other`
/// (lowercased), so a filename guess on `notes.txt` yields `txt` rather
/// than losing the token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Format {
    Tar,
    TarGz,
    TarBz2,
    TarXz,
    TarLzma,
    TarZ,
    TarLz,
    TarLzo,
    Gz,
    Bz2,
    Xz,
    Lzma,
    Z,
    Lz,
    Lzo,
    SevenZ,
    Rar,
    Zip,
    Unknown,
    Other(String),
}

/// Dispatch class of a format: tar-family and filters have one natural
/// tool, the archive classes walk a candidate list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatClass {
    TarFamily,
    Filter,
    SevenZ,
    Rar,
    Zip,
    Unknown,
}

impl Format {
    /// Resolve a format spelling to its canonical token.
    ///
    /// The single-letter `Z` suffix (legacy `compress`) is matched
    /// case-sensitively; everything else is lowercased before the alias
    /// lookup. Idempotent: canonical tokens map to themselves.
    pub fn normalize(token: &str) -> Format {
        if token == "taZ" || token == "tar.Z" {
            return Format::TarZ;
        }
        if token == "Z" {
            return Format::Z;
        }

        match token.to_ascii_lowercase().as_str() {
            "tar" => Format::Tar,
            "tar.gz" | "tgz" | "taz" => Format::TarGz,
            "tar.bz2" | "tz2" | "tbz" | "tbz2" => Format::TarBz2,
            "tar.xz" => Format::TarXz,
            "tar.lzma" | "tlz" => Format::TarLzma,
            "tar.lz" => Format::TarLz,
            "tar.lzo" => Format::TarLzo,
            "gz" | "gzip" => Format::Gz,
            "bz2" | "bzip2" => Format::Bz2,
            "xz" => Format::Xz,
            "lzma" => Format::Lzma,
            "lz" | "lzip" => Format::Lz,
            "lzo" | "lzop" => Format::Lzo,
            "7z" => Format::SevenZ,
            "rar" => Format::Rar,
            "zip" => Format::Zip,
            "unknown" => Format::Unknown,
            other => Format::Other(other.to_string()),
        }
    }

    /// Guess a format from a filename.
    ///
    /// Inspects the last two dot-segments so `a.tar.gz` resolves to
    /// `tar.gz` while `a.gz` resolves to `gz`. Names without a dot give
    /// `None`.
    pub fn from_filename(name: &str) -> Option<Format> {
        if !name.contains('.') {
            return None;
        }
        let segments: Vec<&str> = name.split('.').collect();
        let last = *segments.last()?;
        if segments[segments.len() - 2].eq_ignore_ascii_case("tar") {
            Some(Self::normalize(&format!("tar.{last}")))
        } else {
            Some(Self::normalize(last))
        }
    }

    /// Canonical token of this format.
    pub fn token(&self) -> &str {
        match self {
            Format::Tar => "tar",
            Format::TarGz => "tar.gz",
            Format::TarBz2 => "tar.bz2",
            Format::TarXz => "tar.xz",
            Format::TarLzma => "tar.lzma",
            Format::TarZ => "tar.Z",
            Format::TarLz => "tar.lz",
            Format::TarLzo => "tar.lzo",
            Format::Gz => "gz",
            Format::Bz2 => "bz2",
            Format::Xz => "xz",
            Format::Lzma => "lzma",
            Format::Z => "Z",
            Format::Lz => "lz",
            Format::Lzo => "lzo",
            Format::SevenZ => "7z",
            Format::Rar => "rar",
            Format::Zip => "zip",
            Format::Unknown => "unknown",
            Format::Other(token) => token,
        }
    }

    /// Dispatch class, `None` for passthrough tokens no tool handles.
    pub fn class(&self) -> Option<FormatClass> {
        match self {
            Format::Tar
            | Format::TarGz
            | Format::TarBz2
            | Format::TarXz
            | Format::TarLzma
            | Format::TarZ
            | Format::TarLz
            | Format::TarLzo => Some(FormatClass::TarFamily),
            Format::Gz
            | Format::Bz2
            | Format::Xz
            | Format::Lzma
            | Format::Z
            | Format::Lz
            | Format::Lzo => Some(FormatClass::Filter),
            Format::SevenZ => Some(FormatClass::SevenZ),
            Format::Rar => Some(FormatClass::Rar),
            Format::Zip => Some(FormatClass::Zip),
            Format::Unknown => Some(FormatClass::Unknown),
            Format::Other(_) => None,
        }
    }

    pub fn is_filter(&self) -> bool {
        matches!(self.class(), Some(FormatClass::Filter))
    }

    pub fn is_tar_family(&self) -> bool {
        matches!(self.class(), Some(FormatClass::TarFamily))
    }

    /// Compressor used when piping `tar c` output for a compound format.
    pub fn compound_compressor(&self) -> Option<ToolId> {
        match self {
            Format::TarGz => Some(ToolId::Gzip),
            Format::TarBz2 => Some(ToolId::Bzip2),
            Format::TarXz => Some(ToolId::Xz),
            Format::TarLzma => Some(ToolId::Lzma),
            Format::TarZ => Some(ToolId::Compress),
            Format::TarLz => Some(ToolId::Lzip),
            Format::TarLzo => Some(ToolId::Lzop),
            _ => None,
        }
    }

    /// Natural compressor for a bare filter format.
    pub fn filter_compressor(&self) -> Option<ToolId> {
        match self {
            Format::Gz => Some(ToolId::Gzip),
            Format::Bz2 => Some(ToolId::Bzip2),
            Format::Xz => Some(ToolId::Xz),
            Format::Lzma => Some(ToolId::Lzma),
            Format::Z => Some(ToolId::Compress),
            Format::Lz => Some(ToolId::Lzip),
            Format::Lzo => Some(ToolId::Lzop),
            _ => None,
        }
    }

    /// Default decompressor for a bare filter format. `compress` has no
    /// decompression mode of its own; gzip reads `.Z` streams.
    pub fn filter_decompressor(&self) -> Option<ToolId> {
        match self {
            Format::Z => Some(ToolId::Gzip),
            _ => self.filter_compressor(),
        }
    }

    /// The `tar.*` variant of a filter format, for probe results that
    /// report a tar stream inside the compression layer.
    pub fn wrapped_in_tar(&self) -> Format {
        match self {
            Format::Gz => Format::TarGz,
            Format::Bz2 => Format::TarBz2,
            Format::Xz => Format::TarXz,
            Format::Lzma => Format::TarLzma,
            Format::Z => Format::TarZ,
            Format::Lz => Format::TarLz,
            Format::Lzo => Format::TarLzo,
            other => other.clone(),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_short_aliases() {
        assert_eq!(Format::normalize("tgz"), Format::TarGz);
        assert_eq!(Format::normalize("taz"), Format::TarGz);
        assert_eq!(Format::normalize("tz2"), Format::TarBz2);
        assert_eq!(Format::normalize("tbz"), Format::TarBz2);
        assert_eq!(Format::normalize("tbz2"), Format::TarBz2);
        assert_eq!(Format::normalize("tlz"), Format::TarLzma);
        assert_eq!(Format::normalize("gzip"), Format::Gz);
        assert_eq!(Format::normalize("bzip2"), Format::Bz2);
        assert_eq!(Format::normalize("lzip"), Format::Lz);
        assert_eq!(Format::normalize("lzop"), Format::Lzo);
    }

    #[test]
    fn normalize_is_case_insensitive_except_z() {
        assert_eq!(Format::normalize("TGZ"), Format::TarGz);
        assert_eq!(Format::normalize("Tar.Gz"), Format::TarGz);
        assert_eq!(Format::normalize("Z"), Format::Z);
        assert_eq!(Format::normalize("taZ"), Format::TarZ);
        assert_eq!(Format::normalize("tar.Z"), Format::TarZ);
        // lowercase taz is the gzip alias, not legacy compress
        assert_eq!(Format::normalize("taz"), Format::TarGz);
    }

    #[test]
    fn normalize_passes_unknown_tokens_through() {
        assert_eq!(Format::normalize("txt"), Format::Other("txt".into()));
        assert_eq!(Format::normalize("unknown"), Format::Unknown);
        assert_eq!(Format::normalize("7z"), Format::SevenZ);
    }

    #[test]
    fn normalize_is_idempotent() {
        let tokens = [
            "tgz", "taz", "tz2", "tbz", "tbz2", "tlz", "gzip", "bzip2", "lzip", "lzop", "tar",
            "tar.gz", "tar.bz2", "tar.xz", "tar.lzma", "tar.Z", "taZ", "gz", "bz2", "xz", "lzma",
            "Z", "lz", "lzo", "7z", "rar", "zip", "unknown", "txt", "TXT", "weird.ext",
        ];
        for token in tokens {
            let once = Format::normalize(token);
            let twice = Format::normalize(once.token());
            assert_eq!(once, twice, "token {token:?} not stable");
        }
    }

    #[test]
    fn filename_guess_resolves_compound_extensions() {
        assert_eq!(Format::from_filename("a.tar.gz"), Some(Format::TarGz));
        assert_eq!(Format::from_filename("a.tgz"), Some(Format::TarGz));
        assert_eq!(Format::from_filename("a.TAR.GZ"), Some(Format::TarGz));
        assert_eq!(Format::from_filename("a.tar.Z"), Some(Format::TarZ));
        assert_eq!(Format::from_filename("backup.tar"), Some(Format::Tar));
        // a bare "tar.gz" still reads as the compound format
        assert_eq!(Format::from_filename("tar.gz"), Some(Format::TarGz));
    }

    #[test]
    fn filename_guess_falls_back_to_last_segment() {
        assert_eq!(Format::from_filename("a.gz"), Some(Format::Gz));
        assert_eq!(
            Format::from_filename("a.txt"),
            Some(Format::Other("txt".into()))
        );
        assert_eq!(Format::from_filename("noext"), None);
    }

    #[test]
    fn class_partitions_all_formats() {
        assert_eq!(Format::Tar.class(), Some(FormatClass::TarFamily));
        assert_eq!(Format::TarLzo.class(), Some(FormatClass::TarFamily));
        assert_eq!(Format::Z.class(), Some(FormatClass::Filter));
        assert_eq!(Format::SevenZ.class(), Some(FormatClass::SevenZ));
        assert_eq!(Format::Rar.class(), Some(FormatClass::Rar));
        assert_eq!(Format::Zip.class(), Some(FormatClass::Zip));
        assert_eq!(Format::Unknown.class(), Some(FormatClass::Unknown));
        assert_eq!(Format::Other("txt".into()).class(), None);
    }

    #[test]
    fn compress_decompresses_via_gzip() {
        assert_eq!(Format::Z.filter_compressor(), Some(ToolId::Compress));
        assert_eq!(Format::Z.filter_decompressor(), Some(ToolId::Gzip));
    }

    #[test]
    fn tar_wrapping_upgrades_filters() {
        assert_eq!(Format::Gz.wrapped_in_tar(), Format::TarGz);
        assert_eq!(Format::Lzo.wrapped_in_tar(), Format::TarLzo);
        assert_eq!(Format::Rar.wrapped_in_tar(), Format::Rar);
    }
}
