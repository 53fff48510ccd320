//! Residential property transfer taxes: SDLT (England & Northern Ireland),
//! LBTT (Scotland) and LTT (Wales).
//!
//! Each region owns its band tables and its own rules for first-time buyers
//! and additional properties. Only the marginal band walk is shared.

pub mod england;
pub mod scotland;
pub mod wales;

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Additional-property rules only bite above this price, in every region.
pub const ADDITIONAL_PROPERTY_THRESHOLD: Decimal = dec!(40000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Region {
    #[default]
    England,
    Scotland,
    Wales,
}

impl Region {
    pub fn from_str(s: &str) -> Option<Region> {
        match s.trim().to_lowercase().as_str() {
            "england" | "england-ni" | "northern-ireland" | "sdlt" => Some(Region::England),
            "scotland" | "lbtt" => Some(Region::Scotland),
            "wales" | "ltt" => Some(Region::Wales),
            _ => None,
        }
    }

    /// Like [`Region::from_str`], but unknown regions are taxed as England.
    pub fn parse_or_default(s: &str) -> Region {
        Region::from_str(s).unwrap_or_else(|| {
            log::warn!("Unknown region '{}', calculating as England", s);
            Region::England
        })
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Region::England => "England & Northern Ireland (SDLT)",
            Region::Scotland => "Scotland (LBTT)",
            Region::Wales => "Wales (LTT)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum BuyerType {
    #[default]
    Standard,
    FirstTime,
    Additional,
}

impl BuyerType {
    pub fn from_str(s: &str) -> Option<BuyerType> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Some(BuyerType::Standard),
            "first-time" | "first_time" | "ftb" => Some(BuyerType::FirstTime),
            "additional" | "second-home" => Some(BuyerType::Additional),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            BuyerType::Standard => "Standard purchase",
            BuyerType::FirstTime => "First-time buyer",
            BuyerType::Additional => "Additional property",
        }
    }
}

/// Informational only: every calculation uses residential rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum PropertyType {
    #[default]
    Residential,
    NonResidential,
    Mixed,
}

impl PropertyType {
    pub fn from_str(s: &str) -> Option<PropertyType> {
        match s.trim().to_lowercase().as_str() {
            "residential" => Some(PropertyType::Residential),
            "non-residential" | "commercial" => Some(PropertyType::NonResidential),
            "mixed" => Some(PropertyType::Mixed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PropertyDetails {
    #[schemars(with = "f64")]
    pub purchase_price: Decimal,
    pub region: Region,
    #[serde(default)]
    pub property_type: PropertyType,
    pub buyer_type: BuyerType,
}

/// One row of a marginal rate table. `to = None` is the open-ended top band.
#[derive(Debug, Clone, Copy)]
pub struct RateBand {
    pub from: Decimal,
    pub to: Option<Decimal>,
    pub rate: Decimal,
    pub name: &'static str,
}

/// Tax due on the slice of the price falling in one band.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct CalculationBand {
    pub band_name: String,
    #[schemars(with = "String")]
    pub from: Decimal,
    #[schemars(with = "String")]
    pub to: Decimal,
    #[schemars(with = "String")]
    pub rate: Decimal,
    #[schemars(with = "String")]
    pub taxable_amount: Decimal,
    #[schemars(with = "String")]
    pub tax_due: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct StampDutyResult {
    /// Rounded to the penny
    #[schemars(with = "String")]
    pub total_tax: Decimal,
    /// Percentage of the purchase price, to 2 dp
    #[schemars(with = "String")]
    pub effective_rate: Decimal,
    pub breakdown: Vec<CalculationBand>,
    pub region: Region,
    pub buyer_type: BuyerType,
    #[schemars(with = "String")]
    pub purchase_price: Decimal,
}

/// Calculate transfer tax for a purchase in any region.
pub fn calculate_stamp_duty(details: &PropertyDetails) -> StampDutyResult {
    let price = details.purchase_price;
    match details.region {
        Region::England => england::calculate_sdlt(price, details.buyer_type),
        Region::Scotland => scotland::calculate_lbtt(price, details.buyer_type),
        Region::Wales => wales::calculate_ltt(price, details.buyer_type),
    }
}

/// Walk `bands` in order, taxing each slice of `price` at the band rate plus
/// `surcharge`. Returns the breakdown and the unrounded total.
pub(crate) fn apply_bands(
    price: Decimal,
    bands: &[RateBand],
    surcharge: Decimal,
) -> (Vec<CalculationBand>, Decimal) {
    let mut breakdown = Vec::new();
    let mut total = Decimal::ZERO;

    for band in bands {
        if price <= band.from {
            break;
        }

        let to = band.to.map_or(price, |to| to.min(price));
        let taxable = to - band.from;
        if taxable <= Decimal::ZERO {
            continue;
        }

        let rate = band.rate + surcharge;
        let tax_due = taxable * rate;
        total += tax_due;

        log::debug!(
            "{}: {} @ {} = {}",
            band.name,
            taxable,
            rate,
            tax_due
        );

        breakdown.push(CalculationBand {
            band_name: band.name.to_string(),
            from: band.from,
            to,
            rate,
            taxable_amount: taxable,
            tax_due,
        });
    }

    (breakdown, total)
}

pub(crate) fn round_gbp(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Round the total and derive the effective rate from the unrounded total.
pub(crate) fn finish(
    price: Decimal,
    total_tax: Decimal,
    breakdown: Vec<CalculationBand>,
    region: Region,
    buyer_type: BuyerType,
) -> StampDutyResult {
    let effective_rate = if price > Decimal::ZERO {
        total_tax / price * dec!(100)
    } else {
        Decimal::ZERO
    };

    StampDutyResult {
        total_tax: round_gbp(total_tax),
        effective_rate: round_gbp(effective_rate),
        breakdown,
        region,
        buyer_type,
        purchase_price: price,
    }
}
