//! Delivery service layer for the courier network simulator.
//!
//! Wraps the `courier-core` engine with the parts a post office needs:
//! map files, post receipts, prices, package numbering and an on-disk log of
//! every status change.
#![forbid(unsafe_code)]

mod error;
mod event_log;
mod map_file;
mod pricing;
mod receipt;
mod service;

pub use error::{MapFileError, ReceiptError, ServiceError};
pub use event_log::{EventLog, format_event};
pub use map_file::{load_map, parse_edges};
pub use pricing::{Tariff, weight_multiplier};
pub use receipt::PostReceipt;
pub use service::{DeliveryService, PACKAGE_ID_OFFSET, PackageReport, Quote};
