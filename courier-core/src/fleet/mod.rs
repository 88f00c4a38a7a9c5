//! Courier pools and the least-marginal-distance assignment heuristic.
//!
//! A [`Fleet`] owns one pool per [`CourierClass`]. Every courier starts in
//! the same city. When a package arrives, each courier of the requested class
//! prices the delivery with a dry-run [`RoutePlan`](crate::RoutePlan); the
//! cheapest one commits to it.

mod error;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::{
    CityId, Courier, CourierId, Day, Distance, Graph, IdSequence, PackageId, PackageTracker,
    StatusChange,
};

pub use error::{ConfigurationError, FleetError, ParseCourierClassError};

/// Service level of a courier and of the packages it may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum CourierClass {
    /// Cheap and slow.
    Basic,
    /// Expensive and fast.
    FirstClass,
}

impl CourierClass {
    /// Every class, in simulation order.
    pub const ALL: [Self; 2] = [Self::Basic, Self::FirstClass];

    /// Name used in receipts and reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::FirstClass => "firstClass",
        }
    }

    /// Couriers of this class are numbered `offset + 1`, `offset + 2`, ...
    #[must_use]
    pub const fn id_offset(self) -> u64 {
        match self {
            Self::Basic => 1000,
            Self::FirstClass => 2000,
        }
    }

    /// Largest pool that keeps the class id ranges disjoint.
    pub const MAX_COURIERS: usize = 999;

    /// Daily travel limit used when none is configured.
    #[must_use]
    pub const fn default_daily_limit(self) -> Distance {
        match self {
            Self::Basic => 150,
            Self::FirstClass => 400,
        }
    }
}

impl fmt::Display for CourierClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CourierClass {
    type Err = ParseCourierClassError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|class| class.as_str() == s)
            .ok_or_else(|| ParseCourierClassError { name: s.to_owned() })
    }
}

/// Size and speed of one courier pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassConfig {
    /// Number of couriers in the pool.
    pub couriers: usize,
    /// Distance each courier may travel per day.
    pub daily_limit: Distance,
}

impl ClassConfig {
    /// Construct a pool configuration.
    #[must_use]
    pub const fn new(couriers: usize, daily_limit: Distance) -> Self {
        Self {
            couriers,
            daily_limit,
        }
    }

    /// One courier travelling at the class's default speed.
    #[must_use]
    pub const fn default_for(class: CourierClass) -> Self {
        Self::new(1, class.default_daily_limit())
    }
}

/// Parameters for [`Fleet::new`].
///
/// # Examples
/// ```
/// use courier_core::{ClassConfig, FleetConfig};
///
/// let config = FleetConfig::new("Zagreb").with_first_class(ClassConfig::new(3, 500));
/// assert_eq!(config.basic, ClassConfig::new(1, 150));
/// assert_eq!(config.first_class.couriers, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FleetConfig {
    /// City every courier starts in.
    pub start_city: String,
    /// Basic pool.
    pub basic: ClassConfig,
    /// First-class pool.
    pub first_class: ClassConfig,
}

impl FleetConfig {
    /// Default pools starting in `start_city`.
    #[must_use]
    pub fn new(start_city: impl Into<String>) -> Self {
        Self {
            start_city: start_city.into(),
            basic: ClassConfig::default_for(CourierClass::Basic),
            first_class: ClassConfig::default_for(CourierClass::FirstClass),
        }
    }

    /// Replace the basic pool configuration.
    #[must_use]
    pub const fn with_basic(mut self, basic: ClassConfig) -> Self {
        self.basic = basic;
        self
    }

    /// Replace the first-class pool configuration.
    #[must_use]
    pub const fn with_first_class(mut self, first_class: ClassConfig) -> Self {
        self.first_class = first_class;
        self
    }

    /// Configuration of `class`.
    #[must_use]
    pub const fn class(&self, class: CourierClass) -> ClassConfig {
        match class {
            CourierClass::Basic => self.basic,
            CourierClass::FirstClass => self.first_class,
        }
    }
}

/// Outcome of [`Fleet::assign_package`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignment {
    /// Courier that took the package.
    pub courier: CourierId,
    /// Class of that courier.
    pub class: CourierClass,
    /// Distance travelled until the package is delivered.
    pub distance: Distance,
}

#[derive(Debug, Clone)]
struct Pool {
    class: CourierClass,
    ids: IdSequence,
    couriers: Vec<Courier>,
}

impl Pool {
    fn new(
        class: CourierClass,
        config: ClassConfig,
        start: CityId,
        graph: &Arc<Graph>,
    ) -> Result<Self, ConfigurationError> {
        if config.couriers == 0 {
            return Err(ConfigurationError::NoCouriers { class });
        }
        if config.couriers > CourierClass::MAX_COURIERS {
            return Err(ConfigurationError::TooManyCouriers {
                class,
                requested: config.couriers,
                max: CourierClass::MAX_COURIERS,
            });
        }
        let mut ids = IdSequence::new(class.id_offset());
        let couriers = (0..config.couriers)
            .map(|_| Courier::new(ids.next_id(), start, Arc::clone(graph), config.daily_limit))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            class,
            ids,
            couriers,
        })
    }

    // Lowest quote wins; `Vec` order is id order, so ties keep the lower id.
    fn cheapest(&self, source: CityId, destination: CityId) -> Option<(usize, Distance)> {
        let mut best: Option<(usize, Distance)> = None;
        for (index, courier) in self.couriers.iter().enumerate() {
            match courier.quote(source, destination) {
                Ok(distance) => {
                    if best.is_none_or(|(_, current)| distance < current) {
                        best = Some((index, distance));
                    }
                }
                Err(err) => log::debug!("courier {} cannot quote: {err}", courier.id()),
            }
        }
        best
    }
}

/// All couriers of the simulation.
#[derive(Debug, Clone)]
pub struct Fleet {
    graph: Arc<Graph>,
    basic: Pool,
    first_class: Pool,
}

impl Fleet {
    /// Create every courier described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] for an unknown start city, an empty or
    /// oversized pool, or a zero daily limit.
    pub fn new(graph: Arc<Graph>, config: &FleetConfig) -> Result<Self, ConfigurationError> {
        let start = graph
            .city_id(&config.start_city)
            .map_err(|source| ConfigurationError::UnknownStartCity { source })?;
        let basic = Pool::new(CourierClass::Basic, config.basic, start, &graph)?;
        let first_class = Pool::new(CourierClass::FirstClass, config.first_class, start, &graph)?;
        log::debug!(
            "fleet of {} basic and {} first-class couriers starts in {}",
            basic.couriers.len(),
            first_class.couriers.len(),
            config.start_city
        );
        Ok(Self {
            graph,
            basic,
            first_class,
        })
    }

    /// Graph shared by every courier.
    #[must_use]
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Couriers of `class` in id order.
    #[must_use]
    pub fn couriers(&self, class: CourierClass) -> &[Courier] {
        &self.pool(class).couriers
    }

    /// Look up a courier of any class.
    ///
    /// # Errors
    ///
    /// [`FleetError::CourierNotFound`] for unknown ids.
    pub fn courier(&self, id: CourierId) -> Result<&Courier, FleetError> {
        CourierClass::ALL
            .into_iter()
            .flat_map(|class| self.couriers(class))
            .find(|courier| courier.id() == id)
            .ok_or(FleetError::CourierNotFound { id })
    }

    /// Id the next courier of `class` would receive.
    #[must_use]
    pub const fn next_courier_id(&self, class: CourierClass) -> CourierId {
        match class {
            CourierClass::Basic => self.basic.ids.peek(),
            CourierClass::FirstClass => self.first_class.ids.peek(),
        }
    }

    /// Give `package` to the courier of `class` with the smallest projected
    /// distance and commit it to that courier's route.
    ///
    /// # Errors
    ///
    /// [`FleetError::Graph`] when the cities are unknown or `destination` is
    /// unreachable from `source`; [`FleetError::NoCourierAvailable`] when no
    /// courier of the class can reach `source`. Nothing changes on error.
    pub fn assign_package(
        &mut self,
        package: PackageId,
        source: CityId,
        destination: CityId,
        class: CourierClass,
    ) -> Result<Assignment, FleetError> {
        self.graph.shortest_distance(source, destination)?;
        let Some((index, distance)) = self.pool(class).cheapest(source, destination) else {
            return Err(self.no_courier_available(class, source, destination));
        };
        let pool = self.pool_mut(class);
        let Some(courier) = pool.couriers.get_mut(index) else {
            log::warn!("{class} courier index {index} vanished during assignment");
            return Err(self.no_courier_available(class, source, destination));
        };
        courier.deliver(package, source, destination)?;
        log::info!(
            "package {package} assigned to {} courier {} at distance {distance}",
            pool.class,
            courier.id()
        );
        Ok(Assignment {
            courier: courier.id(),
            class,
            distance,
        })
    }

    /// Advance every courier by `days`, basic couriers first.
    ///
    /// Changes are grouped per courier in id order.
    pub fn shift_time<T>(&mut self, days: Day, tracker: &mut T) -> Vec<StatusChange>
    where
        T: PackageTracker + ?Sized,
    {
        let mut changes = Vec::new();
        for courier in self
            .basic
            .couriers
            .iter_mut()
            .chain(self.first_class.couriers.iter_mut())
        {
            changes.extend(courier.shift_time(days, tracker));
        }
        changes
    }

    fn no_courier_available(
        &self,
        class: CourierClass,
        source: CityId,
        destination: CityId,
    ) -> FleetError {
        match (self.graph.name_of(source), self.graph.name_of(destination)) {
            (Ok(from), Ok(to)) => FleetError::NoCourierAvailable {
                class,
                from: from.to_owned(),
                to: to.to_owned(),
            },
            (Err(err), _) | (_, Err(err)) => FleetError::Graph(err),
        }
    }

    const fn pool(&self, class: CourierClass) -> &Pool {
        match class {
            CourierClass::Basic => &self.basic,
            CourierClass::FirstClass => &self.first_class,
        }
    }

    const fn pool_mut(&mut self, class: CourierClass) -> &mut Pool {
        match class {
            CourierClass::Basic => &mut self.basic,
            CourierClass::FirstClass => &mut self.first_class,
        }
    }
}
