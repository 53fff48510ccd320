use super::odds::{apply_each_way_fraction, to_fractional_display, OddsInput};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Fraction of the win odds paid on the place part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub enum EachWayTerms {
    #[default]
    #[serde(rename = "1/4")]
    Quarter,
    #[serde(rename = "1/5")]
    Fifth,
    #[serde(rename = "1/6")]
    Sixth,
    #[serde(rename = "1/8")]
    Eighth,
}

impl EachWayTerms {
    pub fn fraction(&self) -> Decimal {
        match self {
            EachWayTerms::Quarter => dec!(0.25),
            EachWayTerms::Fifth => dec!(0.2),
            EachWayTerms::Sixth => Decimal::ONE / dec!(6),
            EachWayTerms::Eighth => dec!(0.125),
        }
    }

    pub fn display(&self) -> &'static str {
        match self {
            EachWayTerms::Quarter => "1/4",
            EachWayTerms::Fifth => "1/5",
            EachWayTerms::Sixth => "1/6",
            EachWayTerms::Eighth => "1/8",
        }
    }

    pub fn from_str(s: &str) -> Option<EachWayTerms> {
        match s.trim().replace(' ', "").as_str() {
            "1/4" => Some(EachWayTerms::Quarter),
            "1/5" => Some(EachWayTerms::Fifth),
            "1/6" => Some(EachWayTerms::Sixth),
            "1/8" => Some(EachWayTerms::Eighth),
            _ => None,
        }
    }
}

impl std::fmt::Display for EachWayTerms {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum BetOutcome {
    #[default]
    Won,
    Placed,
    Lost,
}

impl BetOutcome {
    pub fn from_str(s: &str) -> Option<BetOutcome> {
        match s.trim().to_lowercase().as_str() {
            "won" | "win" => Some(BetOutcome::Won),
            "placed" | "place" => Some(BetOutcome::Placed),
            "lost" | "lose" => Some(BetOutcome::Lost),
            _ => None,
        }
    }
}

/// Kind of event. Carried for display, it never changes the settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum RaceType {
    #[default]
    HorseRacing,
    Greyhound,
    Golf,
    Other,
}

impl RaceType {
    pub fn from_str(s: &str) -> Option<RaceType> {
        match s.trim().to_lowercase().as_str() {
            "horse-racing" | "horse" | "horses" => Some(RaceType::HorseRacing),
            "greyhound" | "greyhounds" | "dogs" => Some(RaceType::Greyhound),
            "golf" => Some(RaceType::Golf),
            "other" => Some(RaceType::Other),
            _ => None,
        }
    }
}

/// An each-way bet as placed with the bookmaker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BetDetails {
    /// Stake on each part, so the bet costs twice this
    #[schemars(with = "f64")]
    pub stake: Decimal,
    pub odds: OddsInput,
    pub each_way_terms: EachWayTerms,
    pub number_of_places: u8,
    pub outcome: BetOutcome,
    pub race_type: RaceType,
    #[serde(default)]
    pub number_of_runners: Option<u32>,
}

/// One leg of an each-way bet.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct PartBreakdown {
    #[schemars(with = "String")]
    pub stake: Decimal,
    pub odds: String,
    #[schemars(with = "String")]
    pub potential_return: Decimal,
    #[schemars(with = "String")]
    pub potential_profit: Decimal,
    #[schemars(with = "String")]
    pub actual_return: Decimal,
}

/// Settlement of an each-way bet under every outcome, plus the actual one.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct EachWayResult {
    #[schemars(with = "String")]
    pub stake_per_part: Decimal,
    #[schemars(with = "String")]
    pub total_stake: Decimal,

    #[schemars(with = "String")]
    pub win_odds_decimal: Decimal,
    pub win_odds_fractional: String,
    #[schemars(with = "String")]
    pub place_odds_decimal: Decimal,
    pub place_odds_fractional: String,

    // Won: both parts pay
    #[schemars(with = "String")]
    pub win_bet_return: Decimal,
    #[schemars(with = "String")]
    pub win_bet_profit: Decimal,
    #[schemars(with = "String")]
    pub place_bet_return_if_won: Decimal,
    #[schemars(with = "String")]
    pub place_bet_profit_if_won: Decimal,
    #[schemars(with = "String")]
    pub total_return_if_won: Decimal,
    #[schemars(with = "String")]
    pub total_profit_if_won: Decimal,

    // Placed: only the place part pays
    #[schemars(with = "String")]
    pub place_bet_return_if_placed: Decimal,
    #[schemars(with = "String")]
    pub place_bet_profit_if_placed: Decimal,
    #[schemars(with = "String")]
    pub total_return_if_placed: Decimal,
    #[schemars(with = "String")]
    pub total_profit_if_placed: Decimal,

    #[schemars(with = "String")]
    pub total_loss: Decimal,

    pub outcome: BetOutcome,
    #[schemars(with = "String")]
    pub actual_return: Decimal,
    #[schemars(with = "String")]
    pub actual_profit: Decimal,

    #[schemars(with = "String")]
    pub each_way_fraction: Decimal,
    pub places_paying_out: u8,

    pub win_part: PartBreakdown,
    pub place_part: PartBreakdown,
}

/// Settle an each-way bet.
///
/// Inputs are not validated: a zero or negative stake produces the
/// corresponding (meaningless) figures rather than an error. Figures too
/// large for a `Decimal` saturate at `Decimal::MAX`.
pub fn calculate_each_way(bet: &BetDetails) -> EachWayResult {
    let stake = bet.stake;
    let total_stake = stake.saturating_mul(dec!(2));

    let win_odds_decimal = bet.odds.to_decimal();
    let each_way_fraction = bet.each_way_terms.fraction();
    let place_odds_decimal = apply_each_way_fraction(win_odds_decimal, each_way_fraction);
    let win_odds_fractional = to_fractional_display(win_odds_decimal);
    let place_odds_fractional = to_fractional_display(place_odds_decimal);

    let win_bet_return = stake.saturating_mul(win_odds_decimal);
    let win_bet_profit = win_bet_return.saturating_sub(stake);
    let place_bet_return_if_won = stake.saturating_mul(place_odds_decimal);
    let place_bet_profit_if_won = place_bet_return_if_won.saturating_sub(stake);
    let total_return_if_won = win_bet_return.saturating_add(place_bet_return_if_won);
    let total_profit_if_won = total_return_if_won.saturating_sub(total_stake);

    let place_bet_return_if_placed = stake.saturating_mul(place_odds_decimal);
    let place_bet_profit_if_placed = place_bet_return_if_placed.saturating_sub(stake);
    let total_return_if_placed = place_bet_return_if_placed;
    let total_profit_if_placed = total_return_if_placed.saturating_sub(total_stake);

    let total_loss = total_stake;

    let (actual_return, actual_profit, win_part_return, place_part_return) = match bet.outcome {
        BetOutcome::Won => (
            total_return_if_won,
            total_profit_if_won,
            win_bet_return,
            place_bet_return_if_won,
        ),
        BetOutcome::Placed => (
            total_return_if_placed,
            total_profit_if_placed,
            Decimal::ZERO,
            place_bet_return_if_placed,
        ),
        BetOutcome::Lost => (Decimal::ZERO, -total_loss, Decimal::ZERO, Decimal::ZERO),
    };

    log::debug!(
        "E/W {} @ {} ({} terms): won={}, placed={}, lost=-{}, outcome={:?}",
        stake,
        bet.odds,
        bet.each_way_terms,
        total_return_if_won,
        total_return_if_placed,
        total_loss,
        bet.outcome
    );

    EachWayResult {
        stake_per_part: stake,
        total_stake,
        win_part: PartBreakdown {
            stake,
            odds: win_odds_fractional.clone(),
            potential_return: win_bet_return,
            potential_profit: win_bet_profit,
            actual_return: win_part_return,
        },
        place_part: PartBreakdown {
            stake,
            odds: place_odds_fractional.clone(),
            potential_return: place_bet_return_if_won,
            potential_profit: place_bet_profit_if_won,
            actual_return: place_part_return,
        },
        win_odds_decimal,
        win_odds_fractional,
        place_odds_decimal,
        place_odds_fractional,
        win_bet_return,
        win_bet_profit,
        place_bet_return_if_won,
        place_bet_profit_if_won,
        total_return_if_won,
        total_profit_if_won,
        place_bet_return_if_placed,
        place_bet_profit_if_placed,
        total_return_if_placed,
        total_profit_if_placed,
        total_loss,
        outcome: bet.outcome,
        actual_return,
        actual_profit,
        each_way_fraction,
        places_paying_out: bet.number_of_places,
    }
}

/// Recommended number of places and terms for a field size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlaceTerms {
    pub places: u8,
    pub terms: EachWayTerms,
}

/// Standard UK place terms for a race with `runners` runners.
///
/// Four or fewer runners is effectively win only.
pub fn suggest_place_terms(runners: u32, is_handicap: bool) -> PlaceTerms {
    let (places, terms) = match runners {
        0..=4 => (1, EachWayTerms::Quarter),
        5..=7 => (2, EachWayTerms::Quarter),
        16.. if is_handicap => (4, EachWayTerms::Quarter),
        12..=15 if is_handicap => (3, EachWayTerms::Quarter),
        _ => (3, EachWayTerms::Fifth),
    };
    PlaceTerms { places, terms }
}

pub struct EachWayTermsInfo {
    pub terms: EachWayTerms,
    pub label: &'static str,
    pub typical_use: &'static str,
}

pub const EACH_WAY_TERMS: &[EachWayTermsInfo] = &[
    EachWayTermsInfo {
        terms: EachWayTerms::Quarter,
        label: "1/4 odds",
        typical_use: "Most horse racing (5-7 runners), golf",
    },
    EachWayTermsInfo {
        terms: EachWayTerms::Fifth,
        label: "1/5 odds",
        typical_use: "Horse racing (8+ runners), most sports",
    },
    EachWayTermsInfo {
        terms: EachWayTerms::Sixth,
        label: "1/6 odds",
        typical_use: "Some promotions, greyhounds",
    },
    EachWayTermsInfo {
        terms: EachWayTerms::Eighth,
        label: "1/8 odds",
        typical_use: "Some golf events, special offers",
    },
];

pub struct PlaceTermsRule {
    pub runners: &'static str,
    pub places: u8,
    pub terms: EachWayTerms,
    pub description: &'static str,
}

pub const HORSE_RACING_PLACE_RULES: &[PlaceTermsRule] = &[
    PlaceTermsRule {
        runners: "2-4",
        places: 1,
        terms: EachWayTerms::Quarter,
        description: "Win only (no each-way betting)",
    },
    PlaceTermsRule {
        runners: "5-7",
        places: 2,
        terms: EachWayTerms::Quarter,
        description: "1st & 2nd at 1/4 odds",
    },
    PlaceTermsRule {
        runners: "8+",
        places: 3,
        terms: EachWayTerms::Fifth,
        description: "1st, 2nd & 3rd at 1/5 odds",
    },
    PlaceTermsRule {
        runners: "12-15 (handicap)",
        places: 3,
        terms: EachWayTerms::Quarter,
        description: "1st, 2nd & 3rd at 1/4 odds",
    },
    PlaceTermsRule {
        runners: "16+ (handicap)",
        places: 4,
        terms: EachWayTerms::Quarter,
        description: "1st, 2nd, 3rd & 4th at 1/4 odds",
    },
];

/// Headline figures for one staking scenario.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioComparison {
    pub scenario: String,
    pub stake: Decimal,
    pub total_stake: Decimal,
    pub return_if_won: Decimal,
    pub profit_if_won: Decimal,
    pub return_if_placed: Decimal,
    pub profit_if_placed: Decimal,
    pub loss: Decimal,
}

impl ScenarioComparison {
    fn from_result(scenario: String, result: &EachWayResult) -> Self {
        ScenarioComparison {
            scenario,
            stake: result.stake_per_part,
            total_stake: result.total_stake,
            return_if_won: result.total_return_if_won,
            profit_if_won: result.total_profit_if_won,
            return_if_placed: result.total_return_if_placed,
            profit_if_placed: result.total_profit_if_placed,
            loss: result.total_loss,
        }
    }
}

fn winning_bet(stake: Decimal, odds: OddsInput, terms: EachWayTerms, places: u8) -> BetDetails {
    BetDetails {
        stake,
        odds,
        each_way_terms: terms,
        number_of_places: places,
        outcome: BetOutcome::Won,
        race_type: RaceType::HorseRacing,
        number_of_runners: None,
    }
}

/// Each-way figures for the same selection at several stakes.
pub fn compare_stakes(
    odds: OddsInput,
    stakes: &[Decimal],
    terms: EachWayTerms,
    places: u8,
) -> Vec<ScenarioComparison> {
    stakes
        .iter()
        .map(|&stake| {
            let result = calculate_each_way(&winning_bet(stake, odds, terms, places));
            ScenarioComparison::from_result(format!("£{} E/W", stake.normalize()), &result)
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EachWayVsWinOnly {
    pub each_way: ScenarioComparison,
    pub win_only: ScenarioComparison,
}

/// Compare an each-way bet with a win single costing the same total stake.
pub fn compare_each_way_vs_win_only(
    stake: Decimal,
    odds: OddsInput,
    terms: EachWayTerms,
    places: u8,
) -> EachWayVsWinOnly {
    let result = calculate_each_way(&winning_bet(stake, odds, terms, places));

    let win_only_stake = stake.saturating_mul(dec!(2));
    let win_only_return = win_only_stake.saturating_mul(odds.to_decimal());

    EachWayVsWinOnly {
        each_way: ScenarioComparison::from_result("Each Way".to_string(), &result),
        win_only: ScenarioComparison {
            scenario: "Win Only".to_string(),
            stake: win_only_stake,
            total_stake: win_only_stake,
            return_if_won: win_only_return,
            profit_if_won: win_only_return.saturating_sub(win_only_stake),
            return_if_placed: Decimal::ZERO,
            profit_if_placed: -win_only_stake,
            loss: win_only_stake,
        },
    }
}
