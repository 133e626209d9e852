use crate::Result;
use ohno::IntoAppError;
use rustc_hash::FxHashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

const LOG_TARGET: &str = "   counter";

/// Number of files owned by each package seen in a Contents index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageCounts {
    counts: FxHashMap<String, u64>,
}

impl PackageCounts {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one more file for `package`.
    pub fn add(&mut self, package: &str) {
        if let Some(count) = self.counts.get_mut(package) {
            *count += 1;
        } else {
            let _ = self.counts.insert(package.to_owned(), 1);
        }
    }

    #[must_use]
    pub fn get(&self, package: &str) -> Option<u64> {
        self.counts.get(package).copied()
    }

    /// Number of distinct packages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(name, &count)| (name.as_str(), count))
    }
}

impl<'a> FromIterator<&'a str> for PackageCounts {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut counts = Self::new();
        for package in iter {
            counts.add(package);
        }
        counts
    }
}

/// Extract the package named by one line of a Contents index.
///
/// The name is whatever follows the last `/`, trimmed. A line without any `/`
/// is taken whole.
#[must_use]
pub fn package_name(line: &str) -> &str {
    line.rsplit_once('/').map_or(line, |(_, name)| name).trim()
}

/// Count the packages named in the Contents index at `path`.
///
/// The file is streamed line by line.
pub fn count_packages(path: impl AsRef<Path>) -> Result<PackageCounts> {
    let path = path.as_ref();
    let start = Instant::now();

    log::info!(target: LOG_TARGET, "Counting packages in '{}'", path.display());

    let file = File::open(path).into_app_err_with(|| format!("unable to read '{}'", path.display()))?;
    let counts = count_lines(BufReader::new(file)).into_app_err_with(|| format!("unable to read '{}'", path.display()))?;

    log::debug!(
        target: LOG_TARGET,
        "Found {} distinct packages in '{}' in {:.3}s",
        counts.len(),
        path.display(),
        start.elapsed().as_secs_f64()
    );

    Ok(counts)
}

/// Count the packages named by each line of `reader`.
///
/// A line with nothing after its last `/`, or a blank line, counts towards the
/// empty name. Invalid UTF-8 is replaced rather than rejected.
pub fn count_lines(mut reader: impl BufRead) -> std::io::Result<PackageCounts> {
    let mut counts = PackageCounts::new();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }

        let line = String::from_utf8_lossy(&buf);
        counts.add(package_name(&line));
    }

    Ok(counts)
}
