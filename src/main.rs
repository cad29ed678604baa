use clap::{Parser, Subcommand};
use orbex::cmd;

#[derive(Parser, Debug)]
#[command(name = "orbex", version, about = "Marketplace currency valuation calculator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the settled exchange-rate snapshot
    Rates(cmd::rates::RatesCommand),
    /// Value a basket of line items in a target currency
    Value(cmd::value::ValueCommand),
    /// Allocate a budget against a wishlist
    Budget(cmd::budget::BudgetCommand),
    /// Consolidate mixed holdings into one currency
    Consolidate(cmd::consolidate::ConsolidateCommand),
    /// Print expected input formats
    Schema(cmd::schema::SchemaCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Rates(cmd) => cmd.exec(),
        Commands::Value(cmd) => cmd.exec(),
        Commands::Budget(cmd) => cmd.exec(),
        Commands::Consolidate(cmd) => cmd.exec(),
        Commands::Schema(cmd) => cmd.exec(),
    }
}
