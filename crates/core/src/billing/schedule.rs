//! Fee schedule: scale admin-fee tiers and courier radio rental.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One step of the scale admin fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaleTier {
    /// The tier applies when the month has fewer rides than this.
    pub rides_below: usize,
    /// Fee charged for the tier.
    pub fee: Decimal,
}

/// Rates used by the fee engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSchedule {
    /// Scale tiers in ascending `rides_below` order.
    pub scale_tiers: Vec<ScaleTier>,
    /// Fee when the month exceeds every tier.
    pub scale_ceiling_fee: Decimal,
    /// Monthly radio rental charged to renting couriers.
    pub radio_rental: Decimal,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            scale_tiers: vec![
                ScaleTier {
                    rides_below: 30,
                    fee: Decimal::from(50),
                },
                ScaleTier {
                    rides_below: 90,
                    fee: Decimal::from(75),
                },
                ScaleTier {
                    rides_below: 210,
                    fee: Decimal::from(100),
                },
            ],
            scale_ceiling_fee: Decimal::from(125),
            radio_rental: Decimal::new(3000, 2),
        }
    }
}

impl FeeSchedule {
    /// Returns the default schedule with a different radio rental.
    #[must_use]
    pub fn with_radio_rental(mut self, radio_rental: Decimal) -> Self {
        self.radio_rental = radio_rental;
        self
    }

    /// Scale admin fee for a month with `rides_in_month` rides.
    #[must_use]
    pub fn scale_admin_fee(&self, rides_in_month: usize) -> Decimal {
        self.scale_tiers
            .iter()
            .find(|tier| rides_in_month < tier.rides_below)
            .map_or(self.scale_ceiling_fee, |tier| tier.fee)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(0, dec!(50))]
    #[case(29, dec!(50))]
    #[case(30, dec!(75))]
    #[case(89, dec!(75))]
    #[case(90, dec!(100))]
    #[case(209, dec!(100))]
    #[case(210, dec!(125))]
    #[case(5_000, dec!(125))]
    fn test_scale_tiers(#[case] rides: usize, #[case] expected: Decimal) {
        assert_eq!(FeeSchedule::default().scale_admin_fee(rides), expected);
    }

    #[test]
    fn test_with_radio_rental() {
        let schedule = FeeSchedule::default().with_radio_rental(dec!(45.50));
        assert_eq!(schedule.radio_rental, dec!(45.50));
        assert_eq!(schedule.scale_ceiling_fee, dec!(125));
    }
}
