//! Stamp Duty Land Tax, England & Northern Ireland (rates from April 2024).

use super::{
    apply_bands, finish, BuyerType, RateBand, Region, StampDutyResult,
    ADDITIONAL_PROPERTY_THRESHOLD,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const STANDARD_RATES: &[RateBand] = &[
    RateBand {
        from: dec!(0),
        to: Some(dec!(250000)),
        rate: dec!(0),
        name: "Up to £250,000",
    },
    RateBand {
        from: dec!(250000),
        to: Some(dec!(925000)),
        rate: dec!(0.05),
        name: "£250,001 to £925,000",
    },
    RateBand {
        from: dec!(925000),
        to: Some(dec!(1500000)),
        rate: dec!(0.10),
        name: "£925,001 to £1,500,000",
    },
    RateBand {
        from: dec!(1500000),
        to: None,
        rate: dec!(0.12),
        name: "Over £1,500,000",
    },
];

const FIRST_TIME_BUYER_RATES: &[RateBand] = &[
    RateBand {
        from: dec!(0),
        to: Some(dec!(425000)),
        rate: dec!(0),
        name: "Up to £425,000",
    },
    RateBand {
        from: dec!(425000),
        to: Some(dec!(625000)),
        rate: dec!(0.05),
        name: "£425,001 to £625,000",
    },
];

/// First-time buyer relief is lost entirely above this price.
pub const FIRST_TIME_BUYER_PRICE_CAP: Decimal = dec!(625000);

/// Added to every band rate for additional properties.
pub const ADDITIONAL_PROPERTY_SURCHARGE: Decimal = dec!(0.03);

pub fn calculate_sdlt(price: Decimal, buyer_type: BuyerType) -> StampDutyResult {
    let first_time_relief =
        buyer_type == BuyerType::FirstTime && price <= FIRST_TIME_BUYER_PRICE_CAP;
    let rates = if first_time_relief {
        FIRST_TIME_BUYER_RATES
    } else {
        STANDARD_RATES
    };

    let surcharge = if buyer_type == BuyerType::Additional && price > ADDITIONAL_PROPERTY_THRESHOLD
    {
        ADDITIONAL_PROPERTY_SURCHARGE
    } else {
        Decimal::ZERO
    };

    log::debug!(
        "SDLT on {} ({:?}): first-time relief={}, surcharge={}",
        price,
        buyer_type,
        first_time_relief,
        surcharge
    );

    let (breakdown, total) = apply_bands(price, rates, surcharge);
    finish(price, total, breakdown, Region::England, buyer_type)
}
