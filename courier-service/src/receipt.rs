//! Post receipts: `source,destination,weightInGrams,class`.

use std::fmt;
use std::str::FromStr;

use courier_core::CourierClass;
use serde::{Deserialize, Serialize};

use crate::ReceiptError;

/// A request to ship one package.
///
/// # Examples
/// ```
/// use courier_core::CourierClass;
/// use courier_service::PostReceipt;
///
/// let receipt: PostReceipt = "Split,Zagreb,1500,firstClass".parse().expect("valid receipt");
/// assert_eq!(receipt.weight, 1500);
/// assert_eq!(receipt.class, CourierClass::FirstClass);
/// assert_eq!(receipt.to_string(), "Split,Zagreb,1500,firstClass");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostReceipt {
    /// City the package is collected from.
    pub source: String,
    /// City the package is delivered to.
    pub destination: String,
    /// Weight in grams.
    pub weight: u64,
    /// Requested service level.
    pub class: CourierClass,
}

impl FromStr for PostReceipt {
    type Err = ReceiptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.trim().split(',').map(str::trim).collect();
        let &[source, destination, raw_weight, class] = fields.as_slice() else {
            return Err(ReceiptError::FieldCount {
                found: fields.len(),
            });
        };
        let weight = raw_weight
            .parse()
            .map_err(|err| ReceiptError::InvalidWeight {
                value: raw_weight.to_owned(),
                source: err,
            })?;
        Ok(Self {
            source: source.to_owned(),
            destination: destination.to_owned(),
            weight,
            class: class.parse()?,
        })
    }
}

impl fmt::Display for PostReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.source, self.destination, self.weight, self.class
        )
    }
}
