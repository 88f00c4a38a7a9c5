//! The delivery service front desk.
//!
//! [`DeliveryService`] accepts post receipts, hands packages to the fleet,
//! prices them, keeps the package registry and writes every status change to
//! an [`EventLog`].

use std::fmt;
use std::io::Write;
use std::sync::Arc;

use camino::Utf8Path;
use courier_core::{
    CityId, Courier, CourierClass, CourierId, Day, Distance, Fleet, FleetConfig, Graph,
    IdSequence, Package, PackageBook, PackageId, PackageStatus, StatusChange,
};
use courier_fs::Utf8File;
use serde::Serialize;

use crate::{EventLog, PostReceipt, ServiceError, Tariff};

/// Package ids start right after this value.
pub const PACKAGE_ID_OFFSET: u64 = 100;

/// Outcome of [`DeliveryService::send_package`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Quote {
    /// Identifier allocated to the package.
    pub id: PackageId,
    /// Price charged for the shipment.
    pub price: u64,
    /// Courier that took the package.
    pub courier: CourierId,
    /// Distance the courier travels until delivery.
    pub distance: Distance,
}

/// Where a package is and how far along it is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageReport {
    /// Package identifier.
    pub id: PackageId,
    /// Name of the city the package is in.
    pub location: String,
    /// Current status.
    pub status: PackageStatus,
}

impl fmt::Display for PackageReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Package ID: {}\nCurrent location: {}\nCurrent status: {}",
            self.id, self.location, self.status
        )
    }
}

/// Receipt-driven facade over a [`Fleet`].
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use courier_core::{Edge, FleetConfig, PackageStatus, build_graph};
/// use courier_service::{DeliveryService, Tariff};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let graph = Arc::new(build_graph([Edge::new("A", "B", 10)]));
/// let mut service =
///     DeliveryService::new(graph, &FleetConfig::new("A"), Tariff::default(), Vec::new())?;
///
/// let quote = service.send_receipt("A,B,150,basic")?;
/// assert_eq!((quote.id, quote.price), (101, 100));
///
/// service.shift_time(1)?;
/// assert_eq!(service.package_report(101)?.status, PackageStatus::Delivered);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct DeliveryService<W: Write> {
    fleet: Fleet,
    packages: PackageBook,
    ids: IdSequence,
    day: Day,
    tariff: Tariff,
    log: EventLog<W>,
}

impl DeliveryService<Utf8File> {
    /// Create a service that logs into `path`, truncating any previous log.
    ///
    /// # Errors
    ///
    /// [`ServiceError::CreateLog`] when the file cannot be created, otherwise
    /// as [`DeliveryService::new`].
    pub fn with_log_file(
        graph: Arc<Graph>,
        config: &FleetConfig,
        tariff: Tariff,
        path: &Utf8Path,
    ) -> Result<Self, ServiceError> {
        let file = courier_fs::create_file(path).map_err(|source| ServiceError::CreateLog {
            path: path.to_path_buf(),
            source,
        })?;
        Self::new(graph, config, tariff, file)
    }
}

impl<W: Write> DeliveryService<W> {
    /// Create the fleet described by `config` on `graph`.
    ///
    /// # Errors
    ///
    /// [`ServiceError::Configuration`] when the fleet cannot be built.
    pub fn new(
        graph: Arc<Graph>,
        config: &FleetConfig,
        tariff: Tariff,
        log: W,
    ) -> Result<Self, ServiceError> {
        let fleet = Fleet::new(graph, config)?;
        Ok(Self {
            fleet,
            packages: PackageBook::new(),
            ids: IdSequence::new(PACKAGE_ID_OFFSET),
            day: 0,
            tariff,
            log: EventLog::new(log),
        })
    }

    /// Parse `line` as a [`PostReceipt`] and send it.
    ///
    /// # Errors
    ///
    /// [`ServiceError::Receipt`] for malformed lines, otherwise as
    /// [`DeliveryService::send_package`].
    pub fn send_receipt(&mut self, line: &str) -> Result<Quote, ServiceError> {
        let receipt: PostReceipt = line.parse()?;
        self.send_package(&receipt)
    }

    /// Register a package, assign it to a courier and price it.
    ///
    /// The package is logged as not picked up on the current day.
    ///
    /// # Errors
    ///
    /// [`ServiceError::UnknownCity`] for cities missing from the map and
    /// [`ServiceError::Fleet`] when no courier can deliver it; no id is
    /// consumed in either case. [`ServiceError::WriteLog`] when the event
    /// cannot be logged; the package is registered regardless.
    pub fn send_package(&mut self, receipt: &PostReceipt) -> Result<Quote, ServiceError> {
        let source = self.resolve(&receipt.source)?;
        let destination = self.resolve(&receipt.destination)?;
        let id = self.ids.peek();
        let assignment = self
            .fleet
            .assign_package(id, source, destination, receipt.class)?;
        self.ids.next_id();
        self.packages.insert(Package::new(id, source));
        let price = self
            .tariff
            .price(assignment.distance, receipt.weight, receipt.class);
        log::info!(
            "package {id} ({receipt}) accepted by courier {} for {price}",
            assignment.courier
        );
        self.log.record(&[StatusChange::new(
            id,
            self.day,
            PackageStatus::NotPickedUp,
        )])?;
        Ok(Quote {
            id,
            price,
            courier: assignment.courier,
            distance: assignment.distance,
        })
    }

    /// Advance every courier by `days` and log what happened.
    ///
    /// Returned and logged changes are ordered by day, then status, then
    /// package id.
    ///
    /// # Errors
    ///
    /// [`ServiceError::NegativeDays`] and [`ServiceError::TooManyDays`] are
    /// raised before anything moves; [`ServiceError::WriteLog`] after the
    /// simulation has advanced.
    pub fn shift_time(&mut self, days: i64) -> Result<Vec<StatusChange>, ServiceError> {
        if days < 0 {
            return Err(ServiceError::NegativeDays { days });
        }
        let steps = Day::try_from(days)
            .ok()
            .filter(|count| self.day.checked_add(*count).is_some())
            .ok_or(ServiceError::TooManyDays { days })?;
        let mut changes = self.fleet.shift_time(steps, &mut self.packages);
        changes.sort_by_key(|change| (change.day, change.status, change.package));
        self.day += steps;
        log::info!(
            "shifted time by {steps} days to day {} with {} status changes",
            self.day,
            changes.len()
        );
        self.log.record(&changes)?;
        Ok(changes)
    }

    /// Location name and status of package `id`.
    ///
    /// # Errors
    ///
    /// [`ServiceError::PackageNotFound`] for unknown ids.
    pub fn package_report(&self, id: PackageId) -> Result<PackageReport, ServiceError> {
        let (location, status) = self.query_package(id)?;
        let name = self.fleet.graph().name_of(location).map_err(|err| {
            log::warn!("package {id} sits in a city outside the map: {err}");
            ServiceError::PackageNotFound { id }
        })?;
        Ok(PackageReport {
            id,
            location: name.to_owned(),
            status,
        })
    }

    /// Current city and status of package `id`.
    ///
    /// # Errors
    ///
    /// [`ServiceError::PackageNotFound`] for unknown ids.
    pub fn query_package(&self, id: PackageId) -> Result<(CityId, PackageStatus), ServiceError> {
        self.packages
            .get(id)
            .map(|package| (package.location, package.status))
            .ok_or(ServiceError::PackageNotFound { id })
    }

    /// Days simulated so far.
    #[must_use]
    pub const fn day(&self) -> Day {
        self.day
    }

    /// Id the next accepted package will receive.
    #[must_use]
    pub const fn next_package_id(&self) -> PackageId {
        self.ids.peek()
    }

    /// The fleet serving this desk.
    #[must_use]
    pub const fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    /// Couriers of `class`, for inspection.
    #[must_use]
    pub fn couriers(&self, class: CourierClass) -> &[Courier] {
        self.fleet.couriers(class)
    }

    /// The event log.
    #[must_use]
    pub const fn log(&self) -> &EventLog<W> {
        &self.log
    }

    /// Tear the service down and return the log writer.
    #[must_use]
    pub fn into_log(self) -> W {
        self.log.into_inner()
    }

    fn resolve(&self, name: &str) -> Result<CityId, ServiceError> {
        self.fleet
            .graph()
            .city_id(name)
            .map_err(|_| ServiceError::UnknownCity {
                name: name.to_owned(),
            })
    }
}
