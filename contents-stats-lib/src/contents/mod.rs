//! Fetching, decompressing, counting and ranking a Debian Contents index
//!
//! A Contents index lists every file shipped in a Debian suite, one per line,
//! followed by the package(s) that install it. This module turns that index into
//! a ranking of the packages that own the most files.
//!
//! # Implementation Model
//!
//! The pipeline runs strictly in sequence:
//!
//! 1. [`Mirror`] downloads `Contents-<arch>.gz` after probing that the mirror is up.
//! 2. [`decompress`] streams the download into `Contents-<arch>` in fixed-size blocks.
//! 3. [`count_packages`] reads the decompressed index line by line into [`PackageCounts`].
//! 4. [`rank`] keeps the packages with the highest counts.
//!
//! Steps 1 and 2 are wrapped by [`refresh`], which never fails: when the mirror or
//! the download lets it down, it reports [`FetchOutcome::UsedCache`] and the
//! decompressed index left behind by an earlier run is counted instead.

mod architecture;
mod counter;
mod decompress;
mod fetch_outcome;
mod mirror;
mod progress;
mod ranker;
mod refresh;

pub use architecture::{Architecture, ContentsFiles};
pub use counter::{PackageCounts, count_lines, count_packages, package_name};
pub use decompress::{DEFAULT_BLOCK_SIZE, decompress};
pub use fetch_outcome::{FetchOutcome, FetchResult, Unavailable};
pub use mirror::{DEFAULT_MIRROR_URL, Mirror};
pub use progress::{Phase, Progress};
pub use ranker::{DEFAULT_TOP_COUNT, RankedPackage, rank};
pub use refresh::refresh;
