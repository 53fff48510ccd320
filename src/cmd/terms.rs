//! Terms command - standard each-way terms and place rules

use super::print_json;
use crate::calc::{format_percentage, suggest_place_terms, EACH_WAY_TERMS, HORSE_RACING_PLACE_RULES};
use clap::Args;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

#[derive(Args, Debug)]
pub struct TermsCommand {
    /// Suggest place terms for a race with this many runners
    #[arg(short, long)]
    runners: Option<u32>,

    /// The race is a handicap
    #[arg(long, requires = "runners")]
    handicap: bool,

    /// Output as JSON instead of formatted tables
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Tabled, Serialize)]
struct TermsRow {
    #[tabled(rename = "Terms")]
    terms: String,
    #[tabled(rename = "Fraction")]
    fraction: String,
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Typical Use")]
    typical_use: String,
}

#[derive(Debug, Clone, Tabled, Serialize)]
struct PlaceRuleRow {
    #[tabled(rename = "Runners")]
    runners: String,
    #[tabled(rename = "Places")]
    places: u8,
    #[tabled(rename = "Terms")]
    terms: String,
    #[tabled(rename = "Description")]
    description: String,
}

#[derive(Debug, Serialize)]
struct Suggestion {
    runners: u32,
    handicap: bool,
    places: u8,
    terms: String,
}

#[derive(Debug, Serialize)]
struct TermsOutput {
    each_way_terms: Vec<TermsRow>,
    place_rules: Vec<PlaceRuleRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    suggestion: Option<Suggestion>,
}

impl TermsCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let terms: Vec<TermsRow> = EACH_WAY_TERMS
            .iter()
            .map(|t| TermsRow {
                terms: t.terms.to_string(),
                fraction: format_percentage(t.terms.fraction()),
                label: t.label.to_string(),
                typical_use: t.typical_use.to_string(),
            })
            .collect();
        let rules: Vec<PlaceRuleRow> = HORSE_RACING_PLACE_RULES
            .iter()
            .map(|r| PlaceRuleRow {
                runners: r.runners.to_string(),
                places: r.places,
                terms: r.terms.to_string(),
                description: r.description.to_string(),
            })
            .collect();
        let suggestion = self.runners.map(|runners| {
            let suggested = suggest_place_terms(runners, self.handicap);
            Suggestion {
                runners,
                handicap: self.handicap,
                places: suggested.places,
                terms: suggested.terms.to_string(),
            }
        });

        if self.json {
            return print_json(&TermsOutput {
                each_way_terms: terms,
                place_rules: rules,
                suggestion,
            });
        }

        if let Some(s) = suggestion {
            let race = if s.handicap { "handicap" } else { "race" };
            if s.places == 1 {
                println!("{} runner {}: win only", s.runners, race);
            } else {
                println!(
                    "{} runner {}: {} places at {} odds",
                    s.runners, race, s.places, s.terms
                );
            }
            return Ok(());
        }

        println!();
        println!("EACH WAY TERMS");
        println!("{}", Table::new(terms).with(Style::rounded()));
        println!();
        println!("HORSE RACING PLACE TERMS");
        println!("{}", Table::new(rules).with(Style::rounded()));
        println!();
        Ok(())
    }
}
