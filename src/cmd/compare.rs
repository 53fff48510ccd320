//! Compare command - each-way figures across stakes, and against a win single

use super::{print_json, read_odds, TermsArg};
use crate::calc::{
    compare_each_way_vs_win_only, compare_stakes, format_currency, ScenarioComparison,
};
use crate::calc::each_way::EachWayVsWinOnly;
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct CompareCommand {
    /// Stakes per part to compare (repeat or comma separate)
    #[arg(short, long, required = true, value_delimiter = ',')]
    stake: Vec<Decimal>,

    /// Win odds: fractional (5/1, Evens), decimal (6.0) or American (+500)
    #[arg(short, long, allow_hyphen_values = true)]
    odds: String,

    /// Each-way terms
    #[arg(short, long, value_enum, default_value_t = TermsArg::Quarter)]
    terms: TermsArg,

    /// Number of places paying
    #[arg(short, long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(1..=5))]
    places: u8,

    /// Output as JSON instead of formatted tables
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Tabled)]
struct ScenarioRow {
    #[tabled(rename = "Scenario")]
    scenario: String,
    #[tabled(rename = "Total Stake")]
    total_stake: String,
    #[tabled(rename = "Return if Won")]
    return_if_won: String,
    #[tabled(rename = "Profit if Won")]
    profit_if_won: String,
    #[tabled(rename = "Return if Placed")]
    return_if_placed: String,
    #[tabled(rename = "Profit if Placed")]
    profit_if_placed: String,
    #[tabled(rename = "Loss")]
    loss: String,
}

impl From<&ScenarioComparison> for ScenarioRow {
    fn from(s: &ScenarioComparison) -> Self {
        ScenarioRow {
            scenario: s.scenario.clone(),
            total_stake: format_currency(s.total_stake),
            return_if_won: format_currency(s.return_if_won),
            profit_if_won: format_currency(s.profit_if_won),
            return_if_placed: format_currency(s.return_if_placed),
            profit_if_placed: format_currency(s.profit_if_placed),
            loss: format_currency(-s.loss),
        }
    }
}

#[derive(Debug, Serialize)]
struct CompareOutput {
    stakes: Vec<ScenarioComparison>,
    each_way_vs_win_only: EachWayVsWinOnly,
}

impl CompareCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let odds = read_odds(&self.odds)?;
        let terms = self.terms.into();

        let stakes = compare_stakes(odds, &self.stake, terms, self.places);
        // the first stake is the reference bet for the win-only comparison
        let versus = compare_each_way_vs_win_only(self.stake[0], odds, terms, self.places);

        if self.json {
            return print_json(&CompareOutput {
                stakes,
                each_way_vs_win_only: versus,
            });
        }

        println!();
        println!("STAKE COMPARISON ({} at {} odds, {} places)", odds, terms, self.places);
        println!();
        print_table(&stakes);
        println!();
        println!(
            "EACH WAY vs WIN ONLY ({} total stake)",
            format_currency(versus.each_way.total_stake)
        );
        println!();
        print_table(&[versus.each_way, versus.win_only]);
        println!();
        Ok(())
    }
}

fn print_table(scenarios: &[ScenarioComparison]) {
    let rows: Vec<ScenarioRow> = scenarios.iter().map(ScenarioRow::from).collect();
    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
        .to_string();
    println!("{}", table);
}
