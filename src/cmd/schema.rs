//! Schema command - print batch input formats and JSON output schemas

use super::batch::{BetRecord, PropertyRecord};
use crate::calc::{EachWayResult, StampDutyResult};
use clap::{Args, ValueEnum};
use schemars::schema_for;

/// One column of a batch CSV input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvField {
    pub name: &'static str,
    pub required: bool,
    pub description: &'static str,
}

/// Column layout of a CSV record, generated by `#[derive(CsvSchema)]`.
pub trait CsvSchema {
    fn csv_fields() -> &'static [CsvField];

    fn csv_header() -> String {
        Self::csv_fields()
            .iter()
            .map(|f| f.name)
            .collect::<Vec<_>>()
            .join(",")
    }
}

#[derive(Args, Debug)]
pub struct SchemaCommand {
    /// Output format
    #[arg(value_enum, default_value = "json-schema")]
    format: SchemaFormat,

    /// Which calculator the schema describes
    #[arg(short, long, value_enum, default_value = "each-way")]
    kind: SchemaKind,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SchemaFormat {
    /// JSON Schema of the --json output
    JsonSchema,
    /// CSV header row for batch input
    CsvHeader,
    /// CSV column descriptions for batch input
    CsvFields,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SchemaKind {
    EachWay,
    StampDuty,
}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        match (self.format, self.kind) {
            (SchemaFormat::JsonSchema, SchemaKind::EachWay) => {
                println!("{}", serde_json::to_string_pretty(&schema_for!(EachWayResult))?)
            }
            (SchemaFormat::JsonSchema, SchemaKind::StampDuty) => {
                println!("{}", serde_json::to_string_pretty(&schema_for!(StampDutyResult))?)
            }
            (SchemaFormat::CsvHeader, SchemaKind::EachWay) => println!("{}", BetRecord::csv_header()),
            (SchemaFormat::CsvHeader, SchemaKind::StampDuty) => {
                println!("{}", PropertyRecord::csv_header())
            }
            (SchemaFormat::CsvFields, SchemaKind::EachWay) => {
                print_csv_fields("Each-way batch input", BetRecord::csv_fields())
            }
            (SchemaFormat::CsvFields, SchemaKind::StampDuty) => {
                print_csv_fields("Stamp duty batch input", PropertyRecord::csv_fields())
            }
        }
        Ok(())
    }
}

fn print_csv_fields(title: &str, fields: &[CsvField]) {
    println!("{}", title);
    println!("{}", "=".repeat(title.len()));
    println!();
    for field in fields {
        let req = if field.required { "required" } else { "optional" };
        println!("{:12} ({:8})  {}", field.name, req, field.description);
    }
}
