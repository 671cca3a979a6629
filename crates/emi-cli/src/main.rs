mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::repayment::CalculateArgs;
use output::Presentation;

/// Loan repayment (EMI) calculations
#[derive(Parser)]
#[command(
    name = "emi",
    version,
    about = "Loan repayment (EMI) calculations",
    long_about = "Computes the equated monthly installment, total interest and total \
                  amount repaid for a level-payment loan, with decimal precision. \
                  Inputs come from flags, a JSON/YAML file, or JSON piped on stdin."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Currency symbol for table output
    #[arg(long, default_value = "₹", global = true)]
    currency_symbol: String,

    /// Log computation details to stderr (overrides RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate monthly installment, total interest and total amount
    #[command(alias = "emi")]
    Calculate(CalculateArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Calculate(args) => commands::repayment::run_calculate(args),
        Commands::Version => {
            println!("emi {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    let presentation = Presentation {
        currency_symbol: cli.currency_symbol,
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value, &presentation);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
