//! Schema command - print expected input formats

use auction_fees::batch::TransactionRecord;
use auction_fees::FeeSchedule;
use clap::Args;
use schemars::schema_for;

#[derive(Args, Debug)]
pub struct SchemaCommand {
    /// Output format
    #[arg(value_enum, default_value = "json-schema")]
    format: SchemaFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SchemaFormat {
    /// JSON Schema for a fee schedule file (--schedule)
    JsonSchema,
    /// CSV header row for batch input
    CsvHeader,
    /// CSV column descriptions for batch input
    CsvFields,
}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        match self.format {
            SchemaFormat::JsonSchema => {
                let schema = schema_for!(FeeSchedule);
                println!("{}", serde_json::to_string_pretty(&schema)?);
            }
            SchemaFormat::CsvHeader => {
                let names: Vec<_> = TransactionRecord::csv_schema()
                    .iter()
                    .map(|field| field.name)
                    .collect();
                println!("{}", names.join(","));
            }
            SchemaFormat::CsvFields => {
                println!("Batch CSV Format");
                println!("================");
                println!();
                for field in TransactionRecord::csv_schema() {
                    let req = if field.required { "required" } else { "optional" };
                    println!("{:20} ({:8})  {}", field.name, req, field.description);
                }
                println!();
                println!("Amounts are in the sale currency; rates come from the active fee schedule");
            }
        }
        Ok(())
    }
}
