pub mod each_way;
pub mod format;
pub mod odds;
pub mod stamp_duty;

// Flat public surface for domain types and functions.
pub use each_way::{
    calculate_each_way, compare_each_way_vs_win_only, compare_stakes, suggest_place_terms,
    BetDetails, BetOutcome, EachWayResult, EachWayTerms, RaceType, ScenarioComparison,
    EACH_WAY_TERMS, HORSE_RACING_PLACE_RULES,
};
pub use format::{format_currency, format_currency_whole, format_percentage};
pub use odds::{parse_odds, OddsInput};
pub use stamp_duty::{
    calculate_stamp_duty, BuyerType, PropertyDetails, PropertyType, Region, StampDutyResult,
};
