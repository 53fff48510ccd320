//! Land and Buildings Transaction Tax, Scotland.

use super::{
    apply_bands, finish, BuyerType, CalculationBand, RateBand, Region, StampDutyResult,
    ADDITIONAL_PROPERTY_THRESHOLD,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const STANDARD_RATES: &[RateBand] = &[
    RateBand {
        from: dec!(0),
        to: Some(dec!(145000)),
        rate: dec!(0),
        name: "Up to £145,000",
    },
    RateBand {
        from: dec!(145000),
        to: Some(dec!(250000)),
        rate: dec!(0.02),
        name: "£145,001 to £250,000",
    },
    RateBand {
        from: dec!(250000),
        to: Some(dec!(325000)),
        rate: dec!(0.05),
        name: "£250,001 to £325,000",
    },
    RateBand {
        from: dec!(325000),
        to: Some(dec!(750000)),
        rate: dec!(0.10),
        name: "£325,001 to £750,000",
    },
    RateBand {
        from: dec!(750000),
        to: None,
        rate: dec!(0.12),
        name: "Over £750,000",
    },
];

// Same as standard apart from a higher nil-rate band. No price cap.
const FIRST_TIME_BUYER_RATES: &[RateBand] = &[
    RateBand {
        from: dec!(0),
        to: Some(dec!(175000)),
        rate: dec!(0),
        name: "Up to £175,000",
    },
    RateBand {
        from: dec!(175000),
        to: Some(dec!(250000)),
        rate: dec!(0.02),
        name: "£175,001 to £250,000",
    },
    RateBand {
        from: dec!(250000),
        to: Some(dec!(325000)),
        rate: dec!(0.05),
        name: "£250,001 to £325,000",
    },
    RateBand {
        from: dec!(325000),
        to: Some(dec!(750000)),
        rate: dec!(0.10),
        name: "£325,001 to £750,000",
    },
    RateBand {
        from: dec!(750000),
        to: None,
        rate: dec!(0.12),
        name: "Over £750,000",
    },
];

/// Additional Dwelling Supplement, charged on the whole price.
pub const ADS_RATE: Decimal = dec!(0.06);

pub const ADS_BAND_NAME: &str = "Additional Dwelling Supplement (6%)";

pub fn calculate_lbtt(price: Decimal, buyer_type: BuyerType) -> StampDutyResult {
    let rates = if buyer_type == BuyerType::FirstTime {
        FIRST_TIME_BUYER_RATES
    } else {
        STANDARD_RATES
    };

    let (mut breakdown, mut total) = apply_bands(price, rates, Decimal::ZERO);

    if buyer_type == BuyerType::Additional && price > ADDITIONAL_PROPERTY_THRESHOLD {
        let ads = price * ADS_RATE;
        log::debug!("ADS on {}: {}", price, ads);
        breakdown.push(CalculationBand {
            band_name: ADS_BAND_NAME.to_string(),
            from: Decimal::ZERO,
            to: price,
            rate: ADS_RATE,
            taxable_amount: price,
            tax_due: ads,
        });
        total += ads;
    }

    finish(price, total, breakdown, Region::Scotland, buyer_type)
}
