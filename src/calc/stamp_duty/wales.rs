//! Land Transaction Tax, Wales.
//!
//! There is no first-time buyer relief, and additional properties use a
//! separate higher rates table rather than a surcharge.

use super::{
    apply_bands, finish, BuyerType, RateBand, Region, StampDutyResult,
    ADDITIONAL_PROPERTY_THRESHOLD,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const STANDARD_RATES: &[RateBand] = &[
    RateBand {
        from: dec!(0),
        to: Some(dec!(225000)),
        rate: dec!(0),
        name: "Up to £225,000",
    },
    RateBand {
        from: dec!(225000),
        to: Some(dec!(400000)),
        rate: dec!(0.06),
        name: "£225,001 to £400,000",
    },
    RateBand {
        from: dec!(400000),
        to: Some(dec!(750000)),
        rate: dec!(0.075),
        name: "£400,001 to £750,000",
    },
    RateBand {
        from: dec!(750000),
        to: Some(dec!(1500000)),
        rate: dec!(0.10),
        name: "£750,001 to £1,500,000",
    },
    RateBand {
        from: dec!(1500000),
        to: None,
        rate: dec!(0.12),
        name: "Over £1,500,000",
    },
];

const HIGHER_RATES: &[RateBand] = &[
    RateBand {
        from: dec!(0),
        to: Some(dec!(180000)),
        rate: dec!(0.04),
        name: "Up to £180,000",
    },
    RateBand {
        from: dec!(180000),
        to: Some(dec!(250000)),
        rate: dec!(0.075),
        name: "£180,001 to £250,000",
    },
    RateBand {
        from: dec!(250000),
        to: Some(dec!(400000)),
        rate: dec!(0.09),
        name: "£250,001 to £400,000",
    },
    RateBand {
        from: dec!(400000),
        to: Some(dec!(750000)),
        rate: dec!(0.115),
        name: "£400,001 to £750,000",
    },
    RateBand {
        from: dec!(750000),
        to: Some(dec!(1500000)),
        rate: dec!(0.14),
        name: "£750,001 to £1,500,000",
    },
    RateBand {
        from: dec!(1500000),
        to: None,
        rate: dec!(0.16),
        name: "Over £1,500,000",
    },
];

pub fn calculate_ltt(price: Decimal, buyer_type: BuyerType) -> StampDutyResult {
    let higher_rates = buyer_type == BuyerType::Additional && price > ADDITIONAL_PROPERTY_THRESHOLD;
    let rates = if higher_rates {
        HIGHER_RATES
    } else {
        STANDARD_RATES
    };

    log::debug!("LTT on {} ({:?}): higher rates={}", price, buyer_type, higher_rates);

    let (breakdown, total) = apply_bands(price, rates, Decimal::ZERO);

    let reported_buyer = match buyer_type {
        BuyerType::FirstTime => BuyerType::Standard,
        other => other,
    };
    finish(price, total, breakdown, Region::Wales, reported_buyer)
}
