use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Smallest decimal price a bookmaker will lay.
pub const MIN_DECIMAL_ODDS: Decimal = dec!(1.01);

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum OddsError {
    #[error("fractional odds {numerator}/{denominator} must have a non-zero numerator and denominator")]
    ZeroFraction { numerator: u32, denominator: u32 },
    #[error("decimal odds {0} are below the minimum of 1.01")]
    DecimalBelowMinimum(Decimal),
    #[error("american odds must be non-zero")]
    ZeroAmerican,
}

/// Odds as entered, in one of the three formats bookmakers quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "format", rename_all = "kebab-case")]
pub enum OddsInput {
    /// e.g. 5/1, 11/4
    Fractional { numerator: u32, denominator: u32 },
    /// e.g. 6.0
    Decimal {
        #[schemars(with = "f64")]
        value: Decimal,
    },
    /// e.g. +500, -110
    American { value: i32 },
}

impl OddsInput {
    pub fn fractional(numerator: u32, denominator: u32) -> Self {
        OddsInput::Fractional {
            numerator,
            denominator,
        }
    }

    pub fn decimal(value: Decimal) -> Self {
        OddsInput::Decimal { value }
    }

    pub fn american(value: i32) -> Self {
        OddsInput::American { value }
    }

    /// Decimal odds (total return per unit staked).
    ///
    /// Degenerate inputs (a zero anywhere) are priced at 1, i.e. stake back
    /// and no profit. Use [`OddsInput::validate`] to detect them.
    pub fn to_decimal(&self) -> Decimal {
        match *self {
            OddsInput::Fractional {
                numerator,
                denominator,
            } => {
                if numerator == 0 || denominator == 0 {
                    return Decimal::ONE;
                }
                Decimal::from(numerator) / Decimal::from(denominator) + Decimal::ONE
            }
            OddsInput::Decimal { value } => {
                if value.is_zero() {
                    Decimal::ONE
                } else {
                    value
                }
            }
            OddsInput::American { value } => match value {
                0 => Decimal::ONE,
                v if v > 0 => Decimal::from(v) / dec!(100) + Decimal::ONE,
                v => dec!(100) / Decimal::from(v).abs() + Decimal::ONE,
            },
        }
    }

    /// Reports inputs outside the nominal domain of each format.
    pub fn validate(&self) -> Result<(), OddsError> {
        match *self {
            OddsInput::Fractional {
                numerator,
                denominator,
            } if numerator == 0 || denominator == 0 => Err(OddsError::ZeroFraction {
                numerator,
                denominator,
            }),
            OddsInput::Decimal { value } if value < MIN_DECIMAL_ODDS => {
                Err(OddsError::DecimalBelowMinimum(value))
            }
            OddsInput::American { value: 0 } => Err(OddsError::ZeroAmerican),
            _ => Ok(()),
        }
    }
}

impl std::fmt::Display for OddsInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OddsInput::Fractional {
                numerator,
                denominator,
            } => write!(f, "{}/{}", numerator, denominator),
            OddsInput::Decimal { value } => write!(f, "{}", value),
            OddsInput::American { value } if *value > 0 => write!(f, "+{}", value),
            OddsInput::American { value } => write!(f, "{}", value),
        }
    }
}

/// Prices that display as a familiar fraction, keyed by the profit fraction
/// rounded to 2 decimal places.
const COMMON_FRACTIONS: &[(Decimal, &str)] = &[
    (dec!(0.5), "1/2"),
    (dec!(0.33), "1/3"),
    (dec!(0.25), "1/4"),
    (dec!(0.2), "1/5"),
    (dec!(0.17), "1/6"),
    (dec!(1), "Evens"),
    (dec!(2), "2/1"),
    (dec!(3), "3/1"),
    (dec!(4), "4/1"),
    (dec!(5), "5/1"),
    (dec!(6), "6/1"),
    (dec!(7), "7/1"),
    (dec!(8), "8/1"),
    (dec!(9), "9/1"),
    (dec!(10), "10/1"),
    (dec!(1.5), "3/2"),
    (dec!(2.5), "5/2"),
    (dec!(3.5), "7/2"),
    (dec!(4.5), "9/2"),
];

const MAX_DISPLAY_DENOMINATOR: u32 = 10;

/// Render decimal odds the way a bookmaker would chalk them up.
pub fn to_fractional_display(decimal_odds: Decimal) -> String {
    let fraction = decimal_odds.saturating_sub(Decimal::ONE);

    let key = fraction.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if let Some((_, display)) = COMMON_FRACTIONS.iter().find(|(k, _)| *k == key) {
        return display.to_string();
    }

    let (numerator, denominator) = best_fraction(fraction);
    format!("{}/{}", numerator, denominator)
}

/// Closest n/d to `fraction` with d <= 10. Lower denominators win ties.
fn best_fraction(fraction: Decimal) -> (Decimal, u32) {
    let mut best = (Decimal::ONE, 1);
    let mut best_error = fraction.saturating_sub(Decimal::ONE).abs();

    for d in 1..=MAX_DISPLAY_DENOMINATOR {
        let denominator = Decimal::from(d);
        let Some(scaled) = fraction.checked_mul(denominator) else {
            break;
        };
        let numerator = round_half_up(scaled);
        let error = (fraction - numerator / denominator).abs();
        if error < best_error {
            best_error = error;
            best = (numerator, d);
        }
    }

    (best.0.normalize(), best.1)
}

fn round_half_up(value: Decimal) -> Decimal {
    value.saturating_add(dec!(0.5)).floor()
}

/// Place odds: the win profit scaled by the each-way fraction, plus the stake.
pub fn apply_each_way_fraction(decimal_odds: Decimal, fraction: Decimal) -> Decimal {
    decimal_odds
        .saturating_sub(Decimal::ONE)
        .saturating_mul(fraction)
        .saturating_add(Decimal::ONE)
}

/// Parse `"N/D"` (whitespace allowed around the slash), `"Evens"` or `"EVS"`.
pub fn parse_fractional(s: &str) -> Option<OddsInput> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("evens") || s.eq_ignore_ascii_case("evs") {
        return Some(OddsInput::fractional(1, 1));
    }

    let (numerator, denominator) = s.split_once('/')?;
    let (numerator, denominator) = (numerator.trim(), denominator.trim());
    if !is_digits(numerator) || !is_digits(denominator) {
        return None;
    }
    Some(OddsInput::fractional(
        numerator.parse().ok()?,
        denominator.parse().ok()?,
    ))
}

/// Parse a decimal price of at least 1.
pub fn parse_decimal(s: &str) -> Option<OddsInput> {
    let value: Decimal = s.trim().parse().ok()?;
    (value >= Decimal::ONE).then_some(OddsInput::decimal(value))
}

/// Parse a signed moneyline price such as `+450` or `-200`.
pub fn parse_american(s: &str) -> Option<OddsInput> {
    let s = s.trim();
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    if !is_digits(digits) {
        return None;
    }
    let value: i32 = s.parse().ok()?;
    (value != 0).then_some(OddsInput::american(value))
}

/// Parse odds in any format.
///
/// A leading sign marks American odds; unsigned numbers are decimal prices.
pub fn parse_odds(s: &str) -> Option<OddsInput> {
    let trimmed = s.trim();
    parse_fractional(trimmed).or_else(|| {
        if trimmed.starts_with(['+', '-']) {
            parse_american(trimmed)
        } else {
            parse_decimal(trimmed)
        }
    })
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
