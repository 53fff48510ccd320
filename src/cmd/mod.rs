pub mod batch;
pub mod compare;
pub mod each_way;
pub mod schema;
pub mod stamp_duty;
pub mod terms;

use crate::calc::{BetOutcome, BuyerType, EachWayTerms, OddsInput, PropertyType, RaceType, Region};
use anyhow::Context;
use clap::ValueEnum;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum TermsArg {
    #[default]
    #[value(name = "1/4")]
    Quarter,
    #[value(name = "1/5")]
    Fifth,
    #[value(name = "1/6")]
    Sixth,
    #[value(name = "1/8")]
    Eighth,
}

impl From<TermsArg> for EachWayTerms {
    fn from(arg: TermsArg) -> Self {
        match arg {
            TermsArg::Quarter => EachWayTerms::Quarter,
            TermsArg::Fifth => EachWayTerms::Fifth,
            TermsArg::Sixth => EachWayTerms::Sixth,
            TermsArg::Eighth => EachWayTerms::Eighth,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutcomeArg {
    #[default]
    Won,
    Placed,
    Lost,
}

impl From<OutcomeArg> for BetOutcome {
    fn from(arg: OutcomeArg) -> Self {
        match arg {
            OutcomeArg::Won => BetOutcome::Won,
            OutcomeArg::Placed => BetOutcome::Placed,
            OutcomeArg::Lost => BetOutcome::Lost,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum RaceTypeArg {
    #[default]
    HorseRacing,
    Greyhound,
    Golf,
    Other,
}

impl From<RaceTypeArg> for RaceType {
    fn from(arg: RaceTypeArg) -> Self {
        match arg {
            RaceTypeArg::HorseRacing => RaceType::HorseRacing,
            RaceTypeArg::Greyhound => RaceType::Greyhound,
            RaceTypeArg::Golf => RaceType::Golf,
            RaceTypeArg::Other => RaceType::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum RegionArg {
    /// England & Northern Ireland (SDLT)
    #[default]
    England,
    /// Scotland (LBTT)
    Scotland,
    /// Wales (LTT)
    Wales,
}

impl From<RegionArg> for Region {
    fn from(arg: RegionArg) -> Self {
        match arg {
            RegionArg::England => Region::England,
            RegionArg::Scotland => Region::Scotland,
            RegionArg::Wales => Region::Wales,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum BuyerArg {
    #[default]
    Standard,
    FirstTime,
    Additional,
}

impl From<BuyerArg> for BuyerType {
    fn from(arg: BuyerArg) -> Self {
        match arg {
            BuyerArg::Standard => BuyerType::Standard,
            BuyerArg::FirstTime => BuyerType::FirstTime,
            BuyerArg::Additional => BuyerType::Additional,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum PropertyTypeArg {
    #[default]
    Residential,
    NonResidential,
    Mixed,
}

impl From<PropertyTypeArg> for PropertyType {
    fn from(arg: PropertyTypeArg) -> Self {
        match arg {
            PropertyTypeArg::Residential => PropertyType::Residential,
            PropertyTypeArg::NonResidential => PropertyType::NonResidential,
            PropertyTypeArg::Mixed => PropertyType::Mixed,
        }
    }
}

/// Parse odds from the command line, warning about prices that settle at 1.
pub fn read_odds(s: &str) -> anyhow::Result<OddsInput> {
    let odds = crate::calc::parse_odds(s).with_context(|| {
        format!("Unrecognised odds '{s}': expected fractional (5/1, Evens), decimal (6.0) or American (+500)")
    })?;
    if let Err(e) = odds.validate() {
        log::warn!("{}; settling at decimal odds of {}", e, odds.to_decimal());
    }
    Ok(odds)
}

/// Open a file for reading, or stdin with "-"
pub fn open_input(path: &Path) -> anyhow::Result<Box<dyn Read>> {
    if path.as_os_str() == "-" {
        let mut buffer = Vec::new();
        io::stdin().lock().read_to_end(&mut buffer)?;
        if buffer.is_empty() {
            anyhow::bail!("No input received. Provide a file or pipe data to stdin.");
        }
        Ok(Box::new(io::Cursor::new(buffer)))
    } else {
        let file = File::open(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Write `header` then one row per record. The header is written even when
/// there are no records.
pub fn write_csv<I, R, W>(header: &[&str], records: I, writer: W) -> anyhow::Result<()>
where
    I: IntoIterator<Item = R>,
    R: serde::Serialize,
    W: io::Write,
{
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(header)?;
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
