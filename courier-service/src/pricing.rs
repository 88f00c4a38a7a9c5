//! Shipping prices.
//!
//! A package costs `distance * class rate * weight multiplier`, where the
//! distance is the one quoted by the assigned courier.

use courier_core::{CourierClass, Distance};
use serde::{Deserialize, Serialize};

/// Price per distance unit for each class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tariff {
    /// Rate for [`CourierClass::Basic`].
    pub basic_rate: u64,
    /// Rate for [`CourierClass::FirstClass`].
    pub first_class_rate: u64,
}

impl Default for Tariff {
    fn default() -> Self {
        Self {
            basic_rate: 5,
            first_class_rate: 10,
        }
    }
}

impl Tariff {
    /// Rate charged for `class`.
    #[must_use]
    pub const fn rate(&self, class: CourierClass) -> u64 {
        match class {
            CourierClass::Basic => self.basic_rate,
            CourierClass::FirstClass => self.first_class_rate,
        }
    }

    /// Price of shipping `weight` grams over `distance` with `class`.
    ///
    /// # Examples
    /// ```
    /// use courier_core::CourierClass;
    /// use courier_service::Tariff;
    ///
    /// let tariff = Tariff::default();
    /// assert_eq!(tariff.price(14, 500, CourierClass::Basic), 140);
    /// assert_eq!(tariff.price(14, 50, CourierClass::FirstClass), 140);
    /// ```
    #[must_use]
    pub const fn price(&self, distance: Distance, weight: u64, class: CourierClass) -> u64 {
        distance
            .saturating_mul(self.rate(class))
            .saturating_mul(weight_multiplier(weight))
    }
}

/// Heavier packages cost a multiple of the base price.
#[must_use]
pub const fn weight_multiplier(grams: u64) -> u64 {
    match grams {
        10_000.. => 7,
        5_000.. => 5,
        2_000.. => 4,
        1_000.. => 3,
        100.. => 2,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 1)]
    #[case(99, 1)]
    #[case(100, 2)]
    #[case(999, 2)]
    #[case(1_000, 3)]
    #[case(2_000, 4)]
    #[case(4_999, 4)]
    #[case(5_000, 5)]
    #[case(10_000, 7)]
    #[case(u64::MAX, 7)]
    fn multipliers_follow_weight_brackets(#[case] grams: u64, #[case] expected: u64) {
        assert_eq!(weight_multiplier(grams), expected);
    }

    #[rstest]
    fn custom_tariffs_scale_prices() {
        let tariff = Tariff {
            basic_rate: 2,
            first_class_rate: 7,
        };
        assert_eq!(tariff.price(10, 1_000, CourierClass::Basic), 60);
        assert_eq!(tariff.price(10, 1_000, CourierClass::FirstClass), 210);
        assert_eq!(tariff.price(u64::MAX, 1, CourierClass::Basic), u64::MAX);
    }
}
