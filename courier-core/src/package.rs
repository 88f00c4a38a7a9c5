//! Packages and the tracking seam couriers use to update them.
//!
//! Packages belong to the caller. Couriers refer to them by [`PackageId`] and
//! report movement and status changes through [`PackageTracker`], so the
//! engine never owns package storage.

use std::collections::HashMap;
use std::fmt;

use crate::{CityId, Day};

/// Identifier allocated by the service layer.
pub type PackageId = u64;

/// Lifecycle of a package. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PackageStatus {
    /// Waiting at its source city.
    NotPickedUp,
    /// Travelling with a courier.
    InDelivery,
    /// Dropped off at its destination.
    Delivered,
}

impl PackageStatus {
    /// Human-readable status used in reports and logs.
    ///
    /// # Examples
    /// ```
    /// use courier_core::PackageStatus;
    ///
    /// assert_eq!(PackageStatus::InDelivery.as_str(), "in delivery");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotPickedUp => "not picked up",
            Self::InDelivery => "in delivery",
            Self::Delivered => "delivered",
        }
    }
}

impl fmt::Display for PackageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parcel travelling through the network.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Package {
    /// Unique identifier.
    pub id: PackageId,
    /// City the package currently sits in.
    pub location: CityId,
    /// Current lifecycle stage.
    pub status: PackageStatus,
}

impl Package {
    /// Create a package waiting at `location`.
    #[must_use]
    pub const fn new(id: PackageId, location: CityId) -> Self {
        Self {
            id,
            location,
            status: PackageStatus::NotPickedUp,
        }
    }

    /// Move the package to `location`.
    pub const fn change_location(&mut self, location: CityId) {
        self.location = location;
    }

    /// Advance the status; backward transitions are ignored.
    ///
    /// Returns whether the status changed.
    pub fn advance_status(&mut self, status: PackageStatus) -> bool {
        if status <= self.status {
            return false;
        }
        self.status = status;
        true
    }
}

/// One status transition observed during simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusChange {
    /// Package that changed.
    pub package: PackageId,
    /// Courier day on which the change happened.
    pub day: Day,
    /// Status after the change.
    pub status: PackageStatus,
}

impl StatusChange {
    /// Construct a status change record.
    #[must_use]
    pub const fn new(package: PackageId, day: Day, status: PackageStatus) -> Self {
        Self {
            package,
            day,
            status,
        }
    }
}

/// Mutable view of caller-owned packages.
///
/// Couriers call this while stepping through a day. Implementations decide
/// how unknown ids are handled; they must not panic.
pub trait PackageTracker {
    /// Record that `package` is now at `location`.
    fn relocate(&mut self, package: PackageId, location: CityId);

    /// Record the new status of `package`.
    fn update_status(&mut self, package: PackageId, status: PackageStatus);
}

/// In-memory package registry keyed by id.
///
/// # Examples
/// ```
/// use courier_core::{Edge, Package, PackageBook, PackageStatus, PackageTracker, build_graph};
///
/// # fn main() -> Result<(), courier_core::GraphError> {
/// let graph = build_graph([Edge::new("A", "B", 1)]);
/// let a = graph.city_id("A")?;
/// let b = graph.city_id("B")?;
/// let mut book = PackageBook::new();
/// book.insert(Package::new(101, a));
/// book.update_status(101, PackageStatus::InDelivery);
/// book.relocate(101, b);
/// let package = book.get(101).expect("registered");
/// assert_eq!(package.location, b);
/// assert_eq!(package.status, PackageStatus::InDelivery);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct PackageBook {
    packages: HashMap<PackageId, Package>,
}

impl PackageBook {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a package, replacing any previous entry with the same id.
    pub fn insert(&mut self, package: Package) -> Option<Package> {
        self.packages.insert(package.id, package)
    }

    /// Look up a package.
    #[must_use]
    pub fn get(&self, id: PackageId) -> Option<&Package> {
        self.packages.get(&id)
    }

    /// Number of registered packages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    /// Whether no packages are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

impl PackageTracker for PackageBook {
    fn relocate(&mut self, package: PackageId, location: CityId) {
        match self.packages.get_mut(&package) {
            Some(entry) => entry.change_location(location),
            None => log::warn!("cannot relocate unknown package {package}"),
        }
    }

    fn update_status(&mut self, package: PackageId, status: PackageStatus) {
        match self.packages.get_mut(&package) {
            Some(entry) => {
                if !entry.advance_status(status) {
                    log::warn!(
                        "package {package} cannot move from {} to {status}",
                        entry.status
                    );
                }
            }
            None => log::warn!("cannot update unknown package {package}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::reference_map;
    use rstest::rstest;

    #[rstest]
    fn status_only_moves_forward() {
        let graph = reference_map();
        let a = graph.city_id("A").expect("A");
        let mut package = Package::new(101, a);
        assert!(package.advance_status(PackageStatus::InDelivery));
        assert!(package.advance_status(PackageStatus::Delivered));
        assert!(!package.advance_status(PackageStatus::NotPickedUp));
        assert_eq!(package.status, PackageStatus::Delivered);
    }

    #[rstest]
    #[case(PackageStatus::NotPickedUp, "not picked up")]
    #[case(PackageStatus::InDelivery, "in delivery")]
    #[case(PackageStatus::Delivered, "delivered")]
    fn statuses_render_as_messages(#[case] status: PackageStatus, #[case] expected: &str) {
        assert_eq!(status.to_string(), expected);
    }

    #[rstest]
    fn book_ignores_unknown_packages() {
        let graph = reference_map();
        let b = graph.city_id("B").expect("B");
        let mut book = PackageBook::new();
        book.relocate(7, b);
        book.update_status(7, PackageStatus::Delivered);
        assert!(book.is_empty());
    }
}
