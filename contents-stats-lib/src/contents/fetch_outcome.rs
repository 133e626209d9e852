use core::fmt::{Display, Formatter, Result as FmtResult};

/// Why a fresh index could not be produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unavailable {
    /// The mirror's base page could not be retrieved.
    Mirror(String),

    /// The mirror is up but did not serve the requested Contents file.
    File(String),

    /// The download completed but could not be decompressed.
    Decompression(String),
}

impl Display for Unavailable {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Mirror(detail) => write!(f, "mirror server not available at the moment ({detail})"),
            Self::File(detail) => write!(f, "requested file not available at the moment ({detail})"),
            Self::Decompression(detail) => write!(f, "unable to decompress the downloaded file ({detail})"),
        }
    }
}

/// Result of a single download attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResult {
    /// The compressed index was written to disk.
    Downloaded { bytes: u64 },

    /// Nothing was written.
    Unavailable(Unavailable),
}

/// How the index that gets counted was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// A fresh index was downloaded and decompressed during this run.
    Fetched,

    /// The refresh failed, so counting proceeds against the index left by an earlier run.
    UsedCache(Unavailable),
}

impl FetchOutcome {
    #[must_use]
    pub const fn is_fetched(&self) -> bool {
        matches!(self, Self::Fetched)
    }

    /// Short label naming where the counted data came from.
    #[must_use]
    pub const fn source(&self) -> &'static str {
        match self {
            Self::Fetched => "mirror",
            Self::UsedCache(_) => "cache",
        }
    }
}
