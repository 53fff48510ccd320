mod calc;
mod cmd;

use clap::{Parser, Subcommand};

/// UK each-way betting and stamp duty calculator
#[derive(Parser, Debug)]
#[command(name = "ukcalc", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Settle an each-way bet
    EachWay(cmd::each_way::EachWayCommand),
    /// Calculate SDLT, LBTT or LTT on a property purchase
    StampDuty(cmd::stamp_duty::StampDutyCommand),
    /// Compare each-way stakes, and each-way against win only
    Compare(cmd::compare::CompareCommand),
    /// Show standard each-way terms and place rules
    Terms(cmd::terms::TermsCommand),
    /// Settle bets or price purchases from a CSV file
    Batch(cmd::batch::BatchCommand),
    /// Print batch input formats and JSON output schemas
    Schema(cmd::schema::SchemaCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::EachWay(cmd) => cmd.exec(),
        Command::StampDuty(cmd) => cmd.exec(),
        Command::Compare(cmd) => cmd.exec(),
        Command::Terms(cmd) => cmd.exec(),
        Command::Batch(cmd) => cmd.exec(),
        Command::Schema(cmd) => cmd.exec(),
    }
}
