//! Per-city lists of pending package obligations.

use std::collections::HashMap;

use crate::{CityId, PackageId};

/// City to packages awaiting processing there.
///
/// Entries disappear as soon as their list becomes empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Ledger {
    entries: HashMap<CityId, Vec<PackageId>>,
}

impl Ledger {
    pub(crate) fn record(&mut self, city: CityId, package: PackageId) {
        self.entries.entry(city).or_default().push(package);
    }

    pub(crate) fn pending(&self, city: CityId) -> &[PackageId] {
        self.entries.get(&city).map_or(&[][..], Vec::as_slice)
    }

    /// Remove and return the whole entry for `city`.
    pub(crate) fn take(&mut self, city: CityId) -> Vec<PackageId> {
        self.entries.remove(&city).unwrap_or_default()
    }

    /// Keep only the packages for which `keep` returns `true`.
    pub(crate) fn retain_at<F>(&mut self, city: CityId, mut keep: F)
    where
        F: FnMut(PackageId) -> bool,
    {
        let Some(packages) = self.entries.get_mut(&city) else {
            return;
        };
        packages.retain(|package| keep(*package));
        if packages.is_empty() {
            self.entries.remove(&city);
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
