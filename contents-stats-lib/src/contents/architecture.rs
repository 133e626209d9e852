use core::fmt::{Display, Formatter, Result as FmtResult};
use core::str::FromStr;
use std::path::{Path, PathBuf};
use strum::{EnumIter, IntoEnumIterator, IntoStaticStr};

/// An architecture for which the mirror publishes a Contents index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum Architecture {
    Armel,
    Armhf,
    Arm64,
    I386,
    Amd64,
    Mips,
    Mipsel,
    Mips64el,
    Ppc64el,
    S390x,
    Source,
}

impl Architecture {
    /// The identifier used by the mirror, e.g. `amd64`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Name of the decompressed index, e.g. `Contents-amd64`.
    #[must_use]
    pub fn contents_file_name(self) -> String {
        format!("Contents-{self}")
    }

    /// Name of the compressed index as served by the mirror, e.g. `Contents-amd64.gz`.
    #[must_use]
    pub fn compressed_file_name(self) -> String {
        format!("Contents-{self}.gz")
    }

    /// Comma-separated list of every supported identifier.
    #[must_use]
    pub fn supported() -> String {
        Self::iter().map(Self::as_str).collect::<Vec<_>>().join(", ")
    }
}

impl FromStr for Architecture {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, String> {
        Self::iter()
            .find(|arch| arch.as_str() == s)
            .ok_or_else(|| format!("architecture '{s}' is not supported (supported: {})", Self::supported()))
    }
}

impl Display for Architecture {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Local locations of the files produced for one architecture.
///
/// The compressed download is transient; the decompressed index stays behind and
/// serves as the cache when the mirror cannot be reached on a later run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentsFiles {
    compressed: PathBuf,
    decompressed: PathBuf,
    partial: PathBuf,
}

impl ContentsFiles {
    #[must_use]
    pub fn new(dir: impl AsRef<Path>, architecture: Architecture) -> Self {
        let dir = dir.as_ref();
        let contents = architecture.contents_file_name();

        Self {
            compressed: dir.join(architecture.compressed_file_name()),
            partial: dir.join(format!("{contents}.partial")),
            decompressed: dir.join(contents),
        }
    }

    #[must_use]
    pub fn compressed(&self) -> &Path {
        &self.compressed
    }

    #[must_use]
    pub fn decompressed(&self) -> &Path {
        &self.decompressed
    }

    /// Scratch file the decompressor writes to before it replaces the cached index.
    #[must_use]
    pub fn partial(&self) -> &Path {
        &self.partial
    }
}
