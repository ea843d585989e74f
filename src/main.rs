mod cmd;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "auction-fees",
    version,
    about = "Buyer premiums, seller commissions and sales tax for auction sales"
)]
struct Cli {
    /// JSON fee schedule to use instead of the built-in rates
    #[arg(long, global = true)]
    schedule: Option<PathBuf>,

    /// Reject unknown tiers and regions instead of falling back to free/QC
    #[arg(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// What the buyer pays: hammer price, premium and tax
    Buyer(cmd::buyer::BuyerCommand),
    /// What the seller receives after commission
    Seller(cmd::seller::SellerCommand),
    /// Both sides of a sale and the platform's revenue
    Transaction(cmd::transaction::TransactionCommand),
    /// Quote every sale in a CSV file
    Batch(cmd::batch::BatchCommand),
    /// Show the fee and tax rates in use
    Rates(cmd::rates::RatesCommand),
    /// Print expected input formats
    Schema(cmd::schema::SchemaCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    if let Command::Schema(schema) = &cli.command {
        return schema.exec();
    }

    let ctx = cmd::Context::load(cli.schedule.as_deref(), cli.strict)?;
    match &cli.command {
        Command::Buyer(buyer) => buyer.exec(&ctx),
        Command::Seller(seller) => seller.exec(&ctx),
        Command::Transaction(tx) => tx.exec(&ctx),
        Command::Batch(batch) => batch.exec(&ctx),
        Command::Rates(rates) => rates.exec(&ctx),
        Command::Schema(schema) => schema.exec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["auction-fees", "buyer", "-a", "100", "--strict"]).unwrap();
        assert!(cli.strict);
        assert!(matches!(cli.command, Command::Buyer(_)));
    }
}
