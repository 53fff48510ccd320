//! Batch command - settle bets or price purchases from a CSV file

use super::{open_input, print_json, write_csv};
use crate::calc::odds::parse_odds;
use crate::calc::{
    calculate_each_way, calculate_stamp_duty, BetDetails, BetOutcome, BuyerType, EachWayResult,
    EachWayTerms, PropertyDetails, PropertyType, RaceType, Region, StampDutyResult,
};
use anyhow::Context;
use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::io::{self, Read};
use std::path::PathBuf;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};
use ukcalc_derive::CsvSchema;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BatchError {
    #[error("line {line}: unrecognised odds '{odds}'")]
    InvalidOdds { line: usize, odds: String },
    #[error("line {line}: unknown each-way terms '{terms}' (expected 1/4, 1/5, 1/6 or 1/8)")]
    UnknownTerms { line: usize, terms: String },
    #[error("line {line}: places must be between 1 and 5, got {places}")]
    InvalidPlaces { line: usize, places: u8 },
    #[error("line {line}: unknown outcome '{outcome}' (expected won, placed or lost)")]
    UnknownOutcome { line: usize, outcome: String },
    #[error("line {line}: unknown race type '{race_type}'")]
    UnknownRaceType { line: usize, race_type: String },
    #[error("line {line}: unknown buyer type '{buyer}' (expected standard, first-time or additional)")]
    UnknownBuyerType { line: usize, buyer: String },
    #[error("line {line}: unknown property type '{property_type}'")]
    UnknownPropertyType { line: usize, property_type: String },
}

#[derive(Args, Debug)]
pub struct BatchCommand {
    /// What the file contains
    #[arg(value_enum)]
    kind: BatchKind,

    /// CSV file, or "-" to read stdin
    #[arg(default_value = "-")]
    file: PathBuf,

    /// Output full results as JSON
    #[arg(long, conflicts_with = "csv")]
    json: bool,

    /// Output the summary as CSV instead of a formatted table
    #[arg(long)]
    csv: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum BatchKind {
    /// Each-way bets (see `schema csv-fields --kind each-way`)
    Bets,
    /// Property purchases (see `schema csv-fields --kind stamp-duty`)
    Properties,
}

/// One each-way bet in a batch file
#[derive(Debug, Clone, Deserialize, CsvSchema)]
pub struct BetRecord {
    /// Reference echoed in the output
    #[serde(default)]
    pub id: Option<String>,
    /// Stake per part in GBP
    pub stake: Decimal,
    /// Win odds: 5/1, Evens, 6.0 or +500
    pub odds: String,
    /// Each-way terms: 1/4, 1/5, 1/6 or 1/8 (default 1/4)
    #[serde(default)]
    pub terms: Option<String>,
    /// Places paying, 1 to 5 (default 3)
    #[serde(default)]
    pub places: Option<u8>,
    /// won, placed or lost (default won)
    #[serde(default)]
    pub outcome: Option<String>,
    /// horse-racing, greyhound, golf or other
    #[serde(default)]
    pub race_type: Option<String>,
    /// Number of runners
    #[serde(default)]
    pub runners: Option<u32>,
}

/// One property purchase in a batch file
#[derive(Debug, Clone, Deserialize, CsvSchema)]
pub struct PropertyRecord {
    /// Reference echoed in the output
    #[serde(default)]
    pub id: Option<String>,
    /// Purchase price in GBP
    pub price: Decimal,
    /// england, scotland or wales (unknown regions are taxed as england)
    #[serde(default)]
    pub region: Option<String>,
    /// standard, first-time or additional (default standard)
    #[serde(default)]
    pub buyer: Option<String>,
    /// residential, non-residential or mixed
    #[serde(default)]
    pub property_type: Option<String>,
}

fn parse_optional<T>(
    value: Option<&str>,
    default: T,
    parse: impl Fn(&str) -> Option<T>,
    err: impl FnOnce(String) -> BatchError,
) -> Result<T, BatchError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(default),
        Some(v) => parse(v).ok_or_else(|| err(v.to_string())),
    }
}

impl BetRecord {
    pub fn to_bet(&self, line: usize) -> Result<BetDetails, BatchError> {
        let odds = parse_odds(&self.odds).ok_or_else(|| BatchError::InvalidOdds {
            line,
            odds: self.odds.clone(),
        })?;
        if let Err(e) = odds.validate() {
            log::warn!("line {}: {}", line, e);
        }

        let places = self.places.unwrap_or(3);
        if !(1..=5).contains(&places) {
            return Err(BatchError::InvalidPlaces { line, places });
        }

        Ok(BetDetails {
            stake: self.stake,
            odds,
            each_way_terms: parse_optional(
                self.terms.as_deref(),
                EachWayTerms::Quarter,
                EachWayTerms::from_str,
                |terms| BatchError::UnknownTerms { line, terms },
            )?,
            number_of_places: places,
            outcome: parse_optional(
                self.outcome.as_deref(),
                BetOutcome::Won,
                BetOutcome::from_str,
                |outcome| BatchError::UnknownOutcome { line, outcome },
            )?,
            race_type: parse_optional(
                self.race_type.as_deref(),
                RaceType::HorseRacing,
                RaceType::from_str,
                |race_type| BatchError::UnknownRaceType { line, race_type },
            )?,
            number_of_runners: self.runners,
        })
    }
}

impl PropertyRecord {
    pub fn to_details(&self, line: usize) -> Result<PropertyDetails, BatchError> {
        let region = self
            .region
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map_or(Region::England, Region::parse_or_default);

        Ok(PropertyDetails {
            purchase_price: self.price,
            region,
            property_type: parse_optional(
                self.property_type.as_deref(),
                PropertyType::Residential,
                PropertyType::from_str,
                |property_type| BatchError::UnknownPropertyType {
                    line,
                    property_type,
                },
            )?,
            buyer_type: parse_optional(
                self.buyer.as_deref(),
                BuyerType::Standard,
                BuyerType::from_str,
                |buyer| BatchError::UnknownBuyerType { line, buyer },
            )?,
        })
    }
}

/// Deserialize every record, reporting failures by the file line the record
/// starts on (the header is line 1).
fn read_records<R, T>(reader: R) -> anyhow::Result<Vec<(usize, T)>>
where
    R: Read,
    T: serde::de::DeserializeOwned,
{
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = rdr.headers().context("Failed to read CSV header")?.clone();

    let mut records = Vec::new();
    let mut raw = csv::StringRecord::new();
    while rdr.read_record(&mut raw).context("Failed to read CSV record")? {
        let line = raw.position().map_or(0, |p| p.line() as usize);
        let record = raw
            .deserialize(Some(&headers))
            .with_context(|| format!("line {}: invalid record", line))?;
        records.push((line, record));
    }
    Ok(records)
}

const BET_CSV_HEADER: &[&str] = &[
    "id",
    "stake",
    "odds",
    "terms",
    "outcome",
    "total_stake",
    "return_if_won",
    "return_if_placed",
    "actual_return",
    "actual_profit",
];

#[derive(Debug, Clone, Tabled, Serialize)]
struct BetRow {
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Stake")]
    stake: String,
    #[tabled(rename = "Odds")]
    odds: String,
    #[tabled(rename = "Terms")]
    terms: String,
    #[tabled(rename = "Outcome")]
    outcome: String,
    #[tabled(rename = "Total Stake")]
    total_stake: String,
    #[tabled(rename = "Return if Won")]
    return_if_won: String,
    #[tabled(rename = "Return if Placed")]
    return_if_placed: String,
    #[tabled(rename = "Return")]
    actual_return: String,
    #[tabled(rename = "Profit")]
    actual_profit: String,
}

const PROPERTY_CSV_HEADER: &[&str] =
    &["id", "region", "buyer", "price", "total_tax", "effective_rate"];

#[derive(Debug, Clone, Tabled, Serialize)]
struct PropertyRow {
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Region")]
    region: String,
    #[tabled(rename = "Buyer")]
    buyer: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Total Tax")]
    total_tax: String,
    #[tabled(rename = "Effective Rate")]
    effective_rate: String,
}

#[derive(Debug, Serialize)]
struct BetOutput {
    id: Option<String>,
    #[serde(flatten)]
    result: EachWayResult,
}

#[derive(Debug, Serialize)]
struct PropertyOutput {
    id: Option<String>,
    #[serde(flatten)]
    result: StampDutyResult,
}

fn money(amount: Decimal) -> String {
    format!("{:.2}", crate::calc::stamp_duty::round_gbp(amount))
}

impl BatchCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let input = open_input(&self.file)?;
        match self.kind {
            BatchKind::Bets => self.exec_bets(input),
            BatchKind::Properties => self.exec_properties(input),
        }
    }

    fn exec_bets(&self, input: impl Read) -> anyhow::Result<()> {
        let records: Vec<(usize, BetRecord)> = read_records(input)?;
        let mut settled = Vec::with_capacity(records.len());
        for (line, record) in records {
            let bet = record.to_bet(line)?;
            settled.push((record.id, bet.clone(), calculate_each_way(&bet)));
        }
        log::info!("Settled {} bets", settled.len());

        if self.json {
            let output: Vec<_> = settled
                .into_iter()
                .map(|(id, _, result)| BetOutput { id, result })
                .collect();
            return print_json(&output);
        }

        let rows: Vec<BetRow> = settled
            .iter()
            .enumerate()
            .map(|(i, (id, bet, result))| BetRow {
                id: id.clone().unwrap_or_else(|| (i + 1).to_string()),
                stake: money(bet.stake),
                odds: result.win_odds_fractional.clone(),
                terms: bet.each_way_terms.to_string(),
                outcome: format!("{:?}", bet.outcome),
                total_stake: money(result.total_stake),
                return_if_won: money(result.total_return_if_won),
                return_if_placed: money(result.total_return_if_placed),
                actual_return: money(result.actual_return),
                actual_profit: money(result.actual_profit),
            })
            .collect();
        self.print_rows(BET_CSV_HEADER, rows)
    }

    fn exec_properties(&self, input: impl Read) -> anyhow::Result<()> {
        let records: Vec<(usize, PropertyRecord)> = read_records(input)?;
        let mut priced = Vec::with_capacity(records.len());
        for (line, record) in records {
            let details = record.to_details(line)?;
            priced.push((record.id, calculate_stamp_duty(&details)));
        }
        log::info!("Calculated {} purchases", priced.len());

        if self.json {
            let output: Vec<_> = priced
                .into_iter()
                .map(|(id, result)| PropertyOutput { id, result })
                .collect();
            return print_json(&output);
        }

        let rows: Vec<PropertyRow> = priced
            .iter()
            .enumerate()
            .map(|(i, (id, result))| PropertyRow {
                id: id.clone().unwrap_or_else(|| (i + 1).to_string()),
                region: format!("{:?}", result.region),
                buyer: result.buyer_type.display_name().to_string(),
                price: money(result.purchase_price),
                total_tax: money(result.total_tax),
                effective_rate: format!("{:.2}%", result.effective_rate),
            })
            .collect();
        self.print_rows(PROPERTY_CSV_HEADER, rows)
    }

    fn print_rows<T: Tabled + Serialize>(
        &self,
        csv_header: &[&str],
        rows: Vec<T>,
    ) -> anyhow::Result<()> {
        if self.csv {
            return write_csv(csv_header, rows, io::stdout());
        }
        if rows.is_empty() {
            println!("No records found");
            return Ok(());
        }
        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::OddsInput;
    use rust_decimal_macros::dec;

    const BETS: &str = "\
id,stake,odds,terms,places,outcome,race_type,runners
a,10,5/1,1/4,3,won,horse-racing,12
b,5,+300,,,placed,,
c,2.50,Evens,1/5,2,lost,greyhound,6
";

    #[test]
    fn reads_bet_records_with_defaults() {
        let records: Vec<(usize, BetRecord)> = read_records(BETS.as_bytes()).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].0, 2);

        let bet = records[1].1.to_bet(records[1].0).unwrap();
        assert_eq!(bet.stake, dec!(5));
        assert_eq!(bet.odds, OddsInput::american(300));
        assert_eq!(bet.each_way_terms, EachWayTerms::Quarter);
        assert_eq!(bet.number_of_places, 3);
        assert_eq!(bet.outcome, BetOutcome::Placed);
        assert_eq!(bet.race_type, RaceType::HorseRacing);
        assert_eq!(bet.number_of_runners, None);

        let bet = records[2].1.to_bet(records[2].0).unwrap();
        assert_eq!(bet.odds, OddsInput::fractional(1, 1));
        assert_eq!(bet.each_way_terms, EachWayTerms::Fifth);
        assert_eq!(bet.outcome, BetOutcome::Lost);
        assert_eq!(bet.race_type, RaceType::Greyhound);
    }

    #[test]
    fn settles_batch_bets() {
        let records: Vec<(usize, BetRecord)> = read_records(BETS.as_bytes()).unwrap();
        let bet = records[0].1.to_bet(records[0].0).unwrap();
        let result = calculate_each_way(&bet);
        assert_eq!(result.actual_return, dec!(82.50));
    }

    #[test]
    fn huge_stake_saturates() {
        let csv = "stake,odds\n50000000000000000000000000000,5/1\n";
        let records: Vec<(usize, BetRecord)> = read_records(csv.as_bytes()).unwrap();
        let bet = records[0].1.to_bet(records[0].0).unwrap();
        assert_eq!(calculate_each_way(&bet).actual_return, Decimal::MAX);
    }

    #[test]
    fn line_numbers_follow_the_file_not_the_record_count() {
        let csv = "id,stake,odds\n\"two\nlines\",10,5/1\nnext,10,banana\n";
        let records: Vec<(usize, BetRecord)> = read_records(csv.as_bytes()).unwrap();
        assert_eq!(records[0].0, 2);
        assert_eq!(records[0].1.id.as_deref(), Some("two\nlines"));
        assert_eq!(
            records[1].1.to_bet(records[1].0),
            Err(BatchError::InvalidOdds {
                line: 4,
                odds: "banana".to_string()
            })
        );
    }

    #[test]
    fn bad_bet_fields_report_the_line() {
        let csv = "stake,odds,terms\n10,5/1,1/3\n";
        let records: Vec<(usize, BetRecord)> = read_records(csv.as_bytes()).unwrap();
        assert_eq!(
            records[0].1.to_bet(records[0].0),
            Err(BatchError::UnknownTerms {
                line: 2,
                terms: "1/3".to_string()
            })
        );

        let csv = "stake,odds\n10,5/1\n10,banana\n";
        let records: Vec<(usize, BetRecord)> = read_records(csv.as_bytes()).unwrap();
        assert!(records[0].1.to_bet(records[0].0).is_ok());
        assert_eq!(
            records[1].1.to_bet(records[1].0),
            Err(BatchError::InvalidOdds {
                line: 3,
                odds: "banana".to_string()
            })
        );

        let csv = "stake,odds,places\n10,5/1,6\n";
        let records: Vec<(usize, BetRecord)> = read_records(csv.as_bytes()).unwrap();
        assert_eq!(
            records[0].1.to_bet(records[0].0),
            Err(BatchError::InvalidPlaces { line: 2, places: 6 })
        );
    }

    #[test]
    fn missing_stake_is_a_read_error() {
        let csv = "stake,odds\n,5/1\n";
        let result: anyhow::Result<Vec<(usize, BetRecord)>> = read_records(csv.as_bytes());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    fn serialized_header<T: Serialize>(row: T) -> String {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        wtr.serialize(row).unwrap();
        let out = String::from_utf8(wtr.into_inner().unwrap()).unwrap();
        out.lines().next().unwrap().to_string()
    }

    #[test]
    fn csv_headers_match_row_fields() {
        let s = || "x".to_string();
        let bet = BetRow {
            id: s(),
            stake: s(),
            odds: s(),
            terms: s(),
            outcome: s(),
            total_stake: s(),
            return_if_won: s(),
            return_if_placed: s(),
            actual_return: s(),
            actual_profit: s(),
        };
        assert_eq!(serialized_header(bet), BET_CSV_HEADER.join(","));

        let property = PropertyRow {
            id: s(),
            region: s(),
            buyer: s(),
            price: s(),
            total_tax: s(),
            effective_rate: s(),
        };
        assert_eq!(serialized_header(property), PROPERTY_CSV_HEADER.join(","));
    }

    #[test]
    fn empty_batch_still_writes_csv_header() {
        let mut out = Vec::new();
        write_csv(PROPERTY_CSV_HEADER, Vec::<PropertyRow>::new(), &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "id,region,buyer,price,total_tax,effective_rate\n"
        );
    }

    #[test]
    fn reads_property_records() {
        let csv = "\
id,price,region,buyer,property_type
home,300000,england,standard,residential
croft,300000,Scotland,additional,
cottage,500000,wales,first-time,
";
        let records: Vec<(usize, PropertyRecord)> = read_records(csv.as_bytes()).unwrap();
        let results: Vec<_> = records
            .iter()
            .map(|(line, r)| calculate_stamp_duty(&r.to_details(*line).unwrap()))
            .collect();

        assert_eq!(results[0].total_tax, dec!(2500));
        assert_eq!(results[1].region, Region::Scotland);
        assert_eq!(results[1].total_tax, dec!(22600));
        assert_eq!(results[2].region, Region::Wales);
        assert_eq!(results[2].buyer_type, BuyerType::Standard);
        assert_eq!(results[2].total_tax, dec!(18000));
    }

    #[test]
    fn unknown_region_is_taxed_as_england() {
        let csv = "price,region\n300000,narnia\n300000,\n";
        let records: Vec<(usize, PropertyRecord)> = read_records(csv.as_bytes()).unwrap();
        for (line, record) in &records {
            let details = record.to_details(*line).unwrap();
            assert_eq!(details.region, Region::England);
            assert_eq!(details.buyer_type, BuyerType::Standard);
        }
    }

    #[test]
    fn unknown_buyer_type_is_an_error() {
        let csv = "price,buyer\n300000,landlord\n";
        let records: Vec<(usize, PropertyRecord)> = read_records(csv.as_bytes()).unwrap();
        assert_eq!(
            records[0].1.to_details(records[0].0),
            Err(BatchError::UnknownBuyerType {
                line: 2,
                buyer: "landlord".to_string()
            })
        );
    }
}
