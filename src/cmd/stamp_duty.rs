//! Stamp duty command - property transfer tax band breakdown

use super::{print_json, write_csv, BuyerArg, PropertyTypeArg, RegionArg};
use crate::calc::stamp_duty::CalculationBand;
use crate::calc::{
    calculate_stamp_duty, format_currency, format_currency_whole, format_percentage,
    PropertyDetails, StampDutyResult,
};
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct StampDutyCommand {
    /// Purchase price in GBP
    #[arg(short, long)]
    price: Decimal,

    /// Where the property is
    #[arg(short, long, value_enum, default_value_t = RegionArg::England)]
    region: RegionArg,

    /// Buyer circumstances
    #[arg(short, long, value_enum, default_value_t = BuyerArg::Standard)]
    buyer: BuyerArg,

    /// Type of property (informational)
    #[arg(long, value_enum, default_value_t = PropertyTypeArg::Residential)]
    property_type: PropertyTypeArg,

    /// Output as JSON instead of formatted table
    #[arg(long, conflicts_with = "csv")]
    json: bool,

    /// Output the band breakdown as CSV
    #[arg(long)]
    csv: bool,
}

const BAND_CSV_HEADER: &[&str] = &["band", "from", "to", "rate", "taxable", "tax_due"];

#[derive(Debug, Clone, Tabled, Serialize)]
struct BandRow {
    #[tabled(rename = "Band")]
    band: String,
    #[tabled(rename = "From")]
    from: String,
    #[tabled(rename = "To")]
    to: String,
    #[tabled(rename = "Rate")]
    rate: String,
    #[tabled(rename = "Taxable")]
    taxable: String,
    #[tabled(rename = "Tax Due")]
    tax_due: String,
}

impl From<&CalculationBand> for BandRow {
    fn from(band: &CalculationBand) -> Self {
        BandRow {
            band: band.band_name.clone(),
            from: format_currency_whole(band.from),
            to: format_currency_whole(band.to),
            rate: format_percentage(band.rate),
            taxable: format_currency(band.taxable_amount),
            tax_due: format_currency(band.tax_due),
        }
    }
}

impl StampDutyCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let details = PropertyDetails {
            purchase_price: self.price,
            region: self.region.into(),
            property_type: self.property_type.into(),
            buyer_type: self.buyer.into(),
        };
        if details.purchase_price < Decimal::ZERO {
            log::warn!("Purchase price {} is negative", details.purchase_price);
        }

        let result = calculate_stamp_duty(&details);

        if self.json {
            print_json(&result)
        } else if self.csv {
            let rows: Vec<BandRow> = result.breakdown.iter().map(BandRow::from).collect();
            write_csv(BAND_CSV_HEADER, rows, io::stdout())
        } else {
            print_result(&result);
            Ok(())
        }
    }
}

fn print_result(result: &StampDutyResult) {
    println!();
    println!("{}", result.region.display_name());
    println!(
        "{} at {}",
        result.buyer_type.display_name(),
        format_currency(result.purchase_price)
    );
    println!();

    if result.breakdown.is_empty() {
        println!("No tax bands apply");
    } else {
        let rows: Vec<BandRow> = result.breakdown.iter().map(BandRow::from).collect();
        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);
    }
    println!();

    println!("TOTAL TAX:      {}", format_currency(result.total_tax));
    println!("EFFECTIVE RATE: {:.2}%", result.effective_rate);
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::{BuyerType, PropertyType, Region};
    use rust_decimal_macros::dec;

    fn csv_output(price: Decimal) -> String {
        let result = calculate_stamp_duty(&PropertyDetails {
            purchase_price: price,
            region: Region::England,
            property_type: PropertyType::Residential,
            buyer_type: BuyerType::Standard,
        });
        let rows: Vec<BandRow> = result.breakdown.iter().map(BandRow::from).collect();
        let mut out = Vec::new();
        write_csv(BAND_CSV_HEADER, rows, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn csv_header_written_without_bands() {
        assert_eq!(csv_output(Decimal::ZERO), "band,from,to,rate,taxable,tax_due\n");
    }

    #[test]
    fn csv_header_matches_row_fields() {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        let result = calculate_stamp_duty(&PropertyDetails {
            purchase_price: dec!(300000),
            region: Region::England,
            property_type: PropertyType::Residential,
            buyer_type: BuyerType::Standard,
        });
        wtr.serialize(BandRow::from(&result.breakdown[0])).unwrap();
        let derived = String::from_utf8(wtr.into_inner().unwrap()).unwrap();
        let explicit = csv_output(dec!(300000));
        assert_eq!(derived.lines().next(), explicit.lines().next());
        assert_eq!(explicit.lines().count(), 3);
    }
}
