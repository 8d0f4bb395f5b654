//! The deduplicated set of files selected for one run.

use crate::types::ScanTarget;
use std::collections::HashSet;

/// Deduplicated set of scan targets.
///
/// Built once by the collector and never mutated afterwards. Iteration order
/// is unspecified.
#[derive(Debug, Clone, Default)]
pub struct WorkSet {
    targets: HashSet<ScanTarget>,
}

impl WorkSet {
    /// Number of distinct targets.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn contains(&self, target: &ScanTarget) -> bool {
        self.targets.contains(target)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScanTarget> {
        self.targets.iter()
    }
}

impl FromIterator<ScanTarget> for WorkSet {
    fn from_iter<I: IntoIterator<Item = ScanTarget>>(iter: I) -> Self {
        Self {
            targets: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for WorkSet {
    type Item = ScanTarget;
    type IntoIter = std::collections::hash_set::IntoIter<ScanTarget>;

    fn into_iter(self) -> Self::IntoIter {
        self.targets.into_iter()
    }
}
