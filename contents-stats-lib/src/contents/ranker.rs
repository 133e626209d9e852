use super::PackageCounts;

/// Default number of packages kept by [`rank`].
pub const DEFAULT_TOP_COUNT: usize = 10;

/// A package and the number of files it owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedPackage {
    pub name: String,
    pub count: u64,
}

impl RankedPackage {
    #[must_use]
    pub fn new(name: impl Into<String>, count: u64) -> Self {
        Self { name: name.into(), count }
    }
}

/// Select the `limit` packages owning the most files, highest count first.
///
/// Packages with equal counts keep the order in which `counts` yields them.
#[must_use]
pub fn rank(counts: &PackageCounts, limit: usize) -> Vec<RankedPackage> {
    let mut entries: Vec<(&str, u64)> = counts.iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1));

    entries.into_iter().take(limit).map(|(name, count)| RankedPackage::new(name, count)).collect()
}
