//! Facade crate for the courier network simulator.
//!
//! This crate re-exports the routing engine and, behind the `service`
//! feature, the delivery service that reads map files, prices receipts and
//! logs status changes.

#![forbid(unsafe_code)]

pub use courier_core::{
    Assignment, City, CityId, ClassConfig, ConfigurationError, Courier, CourierClass, CourierId,
    Day, Distance, Edge, Fleet, FleetConfig, FleetError, Graph, GraphError, Package, PackageBook,
    PackageId, PackageStatus, PackageTracker, RoutePlan, StatusChange, build_graph,
};

#[cfg(feature = "service")]
pub use courier_service::{
    DeliveryService, EventLog, MapFileError, PackageReport, PostReceipt, Quote, ReceiptError,
    ServiceError, Tariff, load_map, parse_edges,
};
