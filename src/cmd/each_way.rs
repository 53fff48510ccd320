//! Each-way command - settle a single each-way bet

use super::{print_json, read_odds, OutcomeArg, RaceTypeArg, TermsArg};
use crate::calc::{
    calculate_each_way, format_currency, BetDetails, BetOutcome, EachWayResult,
};
use clap::Args;
use rust_decimal::Decimal;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct EachWayCommand {
    /// Stake per part in GBP (the bet costs twice this)
    #[arg(short, long)]
    stake: Decimal,

    /// Win odds: fractional (5/1, Evens), decimal (6.0) or American (+500)
    #[arg(short, long, allow_hyphen_values = true)]
    odds: String,

    /// Each-way terms: fraction of the win odds paid on the place part
    #[arg(short, long, value_enum, default_value_t = TermsArg::Quarter)]
    terms: TermsArg,

    /// Number of places paying
    #[arg(short, long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(1..=5))]
    places: u8,

    /// How the selection finished
    #[arg(long, value_enum, default_value_t = OutcomeArg::Won)]
    outcome: OutcomeArg,

    /// Type of race (informational)
    #[arg(long, value_enum, default_value_t = RaceTypeArg::HorseRacing)]
    race_type: RaceTypeArg,

    /// Number of runners (informational)
    #[arg(long)]
    runners: Option<u32>,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Tabled)]
struct PartRow {
    #[tabled(rename = "Part")]
    part: String,
    #[tabled(rename = "Stake")]
    stake: String,
    #[tabled(rename = "Odds")]
    odds: String,
    #[tabled(rename = "Potential Return")]
    potential_return: String,
    #[tabled(rename = "Potential Profit")]
    potential_profit: String,
    #[tabled(rename = "Actual Return")]
    actual_return: String,
}

impl EachWayCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let bet = BetDetails {
            stake: self.stake,
            odds: read_odds(&self.odds)?,
            each_way_terms: self.terms.into(),
            number_of_places: self.places,
            outcome: self.outcome.into(),
            race_type: self.race_type.into(),
            number_of_runners: self.runners,
        };
        if bet.stake <= Decimal::ZERO {
            log::warn!("Stake {} is not positive", bet.stake);
        }

        let result = calculate_each_way(&bet);

        if self.json {
            print_json(&result)
        } else {
            print_result(&bet, &result);
            Ok(())
        }
    }
}

fn print_result(bet: &BetDetails, result: &EachWayResult) {
    println!();
    println!(
        "EACH WAY: {} E/W at {} ({} odds, {} places)",
        format_currency(bet.stake),
        result.win_odds_fractional,
        bet.each_way_terms,
        result.places_paying_out
    );
    println!();

    let rows = vec![
        PartRow {
            part: "Win".to_string(),
            stake: format_currency(result.win_part.stake),
            odds: format!("{} ({:.2})", result.win_part.odds, result.win_odds_decimal.round_dp(2)),
            potential_return: format_currency(result.win_part.potential_return),
            potential_profit: format_currency(result.win_part.potential_profit),
            actual_return: format_currency(result.win_part.actual_return),
        },
        PartRow {
            part: "Place".to_string(),
            stake: format_currency(result.place_part.stake),
            odds: format!("{} ({:.2})", result.place_part.odds, result.place_odds_decimal.round_dp(2)),
            potential_return: format_currency(result.place_part.potential_return),
            potential_profit: format_currency(result.place_part.potential_profit),
            actual_return: format_currency(result.place_part.actual_return),
        },
    ];
    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
        .to_string();
    println!("{}", table);
    println!();

    println!("Total Stake:        {:>12}", format_currency(result.total_stake));
    println!(
        "If Won:             {:>12} return, {:>12} profit",
        format_currency(result.total_return_if_won),
        format_currency(result.total_profit_if_won)
    );
    println!(
        "If Placed:          {:>12} return, {:>12} profit",
        format_currency(result.total_return_if_placed),
        format_currency(result.total_profit_if_placed)
    );
    println!("If Lost:            {:>12}", format_currency(-result.total_loss));
    println!();

    let outcome = match result.outcome {
        BetOutcome::Won => "WON",
        BetOutcome::Placed => "PLACED",
        BetOutcome::Lost => "LOST",
    };
    println!(
        "RESULT ({}): Return {}, Profit {}",
        outcome,
        format_currency(result.actual_return),
        format_currency(result.actual_profit)
    );
    println!();
}
