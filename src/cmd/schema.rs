//! Schema command - print expected input formats

use crate::rates::RateFeed;
use crate::valuation::{Basket, HoldingList};
use clap::Args;
use schemars::schema_for;

#[derive(Args, Debug)]
pub struct SchemaCommand {
    /// Which input format to describe
    #[arg(value_enum)]
    input: InputKind,

    /// Output format: json-schema, csv-header or csv-fields
    #[arg(value_enum, default_value = "json-schema")]
    format: SchemaFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum InputKind {
    /// The JSON rate feed
    Rates,
    /// Basket line items
    Basket,
    /// Holdings / wishlist entries
    Holdings,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SchemaFormat {
    /// JSON Schema for the input format
    JsonSchema,
    /// CSV header row with column names
    CsvHeader,
    /// CSV column descriptions
    CsvFields,
}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        match self.format {
            SchemaFormat::JsonSchema => self.print_json_schema(),
            SchemaFormat::CsvHeader => self.print_csv_header(),
            SchemaFormat::CsvFields => self.print_csv_fields(),
        }
    }

    fn print_json_schema(&self) -> anyhow::Result<()> {
        let schema = match self.input {
            InputKind::Rates => schema_for!(RateFeed),
            InputKind::Basket => schema_for!(Basket),
            InputKind::Holdings => schema_for!(HoldingList),
        };
        println!("{}", serde_json::to_string_pretty(&schema)?);
        Ok(())
    }

    fn print_csv_header(&self) -> anyhow::Result<()> {
        let columns = self.csv_columns()?;
        println!("{}", columns.join(","));
        Ok(())
    }

    fn print_csv_fields(&self) -> anyhow::Result<()> {
        let fields = match self.input {
            InputKind::Rates => anyhow::bail!("the rate feed is JSON only"),
            InputKind::Basket => BASKET_FIELD_DESCRIPTIONS,
            InputKind::Holdings => HOLDING_FIELD_DESCRIPTIONS,
        };

        println!("CSV Input Format");
        println!("================");
        println!();
        for (name, required, description) in fields {
            let req = if *required { "required" } else { "optional" };
            println!("{:12} ({:8})  {}", name, req, description);
        }
        println!();
        println!("Currency names must match the marketplace titles exactly (e.g. 神聖石)");
        Ok(())
    }

    fn csv_columns(&self) -> anyhow::Result<&'static [&'static str]> {
        match self.input {
            InputKind::Rates => anyhow::bail!("the rate feed is JSON only"),
            InputKind::Basket => Ok(BASKET_COLUMNS),
            InputKind::Holdings => Ok(HOLDING_COLUMNS),
        }
    }
}

const BASKET_COLUMNS: &[&str] = &["title", "unit_price", "unit", "quantity"];

const HOLDING_COLUMNS: &[&str] = &["title", "amount", "unit"];

const BASKET_FIELD_DESCRIPTIONS: &[(&str, bool, &str)] = &[
    ("title", false, "Display label for the line item"),
    ("unit_price", true, "Price per unit, non-negative"),
    ("unit", true, "Currency the price is quoted in"),
    ("quantity", true, "Number of units, at least 1"),
];

const HOLDING_FIELD_DESCRIPTIONS: &[(&str, bool, &str)] = &[
    ("title", false, "Display label for the holding"),
    ("amount", true, "Amount held, non-negative"),
    ("unit", true, "Currency the amount is held in"),
];
