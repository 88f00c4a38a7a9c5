//! Error types raised by the delivery service and its file formats.

use std::io;
use std::num::ParseIntError;

use camino::Utf8PathBuf;
use courier_core::{ConfigurationError, FleetError, PackageId, ParseCourierClassError};
use thiserror::Error;

/// Errors raised while loading a map file.
#[derive(Debug, Error)]
pub enum MapFileError {
    /// The file could not be opened or read.
    #[error("failed to read map file {path}")]
    Read {
        /// Requested map path.
        path: Utf8PathBuf,
        /// Source error from the filesystem.
        #[source]
        source: io::Error,
    },
    /// A non-blank line is not `cityA cityB distance`.
    #[error(
        "{origin}:{line}: following line not structured as - \
         [cityName1, cityName2, distance]: {content:?}"
    )]
    MalformedLine {
        /// File name or other description of the input.
        origin: String,
        /// One-based line number.
        line: usize,
        /// Offending line.
        content: String,
    },
}

/// Errors raised while parsing a post receipt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReceiptError {
    /// The receipt does not have exactly four comma-separated fields.
    #[error("receipt needs 4 fields (source,destination,weight,class), found {found}")]
    FieldCount {
        /// Number of fields present.
        found: usize,
    },
    /// The weight is not a non-negative integer.
    #[error("weight {value:?} is not a whole number of grams")]
    InvalidWeight {
        /// Raw weight field.
        value: String,
        /// Source error from integer parsing.
        #[source]
        source: ParseIntError,
    },
    /// The class is neither `basic` nor `firstClass`.
    #[error(transparent)]
    UnknownClass(#[from] ParseCourierClassError),
}

/// Errors raised by [`DeliveryService`](crate::DeliveryService).
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Time cannot run backwards.
    #[error("cannot shift time by {days} days")]
    NegativeDays {
        /// Requested shift.
        days: i64,
    },
    /// The shift would overflow the day counter.
    #[error("cannot shift time by {days} days at once")]
    TooManyDays {
        /// Requested shift.
        days: i64,
    },
    /// The receipt could not be parsed.
    #[error("invalid receipt: {0}")]
    Receipt(#[from] ReceiptError),
    /// A receipt names a city that is not on the map.
    #[error("city {name:?} does not exist")]
    UnknownCity {
        /// Name from the receipt.
        name: String,
    },
    /// No package carries this id.
    #[error("package {id} does not exist")]
    PackageNotFound {
        /// Requested id.
        id: PackageId,
    },
    /// The fleet could not take the package.
    #[error(transparent)]
    Fleet(#[from] FleetError),
    /// The fleet could not be created.
    #[error("invalid fleet configuration: {0}")]
    Configuration(#[from] ConfigurationError),
    /// The event log could not be created.
    #[error("failed to create event log {path}")]
    CreateLog {
        /// Requested log path.
        path: Utf8PathBuf,
        /// Source error from the filesystem.
        #[source]
        source: io::Error,
    },
    /// Appending to the event log failed.
    #[error("failed to write event log")]
    WriteLog(#[from] io::Error),
}

impl ServiceError {
    /// Whether the error rejects a single request and leaves the service usable.
    ///
    /// Log and configuration failures return `false`.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::NegativeDays { .. }
                | Self::TooManyDays { .. }
                | Self::Receipt(_)
                | Self::UnknownCity { .. }
                | Self::PackageNotFound { .. }
                | Self::Fleet(_)
        )
    }
}
