mod commands;
mod input;
mod output;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use log::LevelFilter;
use simple_logger::SimpleLogger;
use std::process;

use commands::export::{ExportCsvArgs, PrintArgs};
use commands::loan::{LoanArgs, ScheduleArgs};

/// Loan amortization schedules and monthly PITI breakdowns
#[derive(Parser)]
#[command(
    name = "amortize",
    version,
    about = "Loan amortization schedules and monthly PITI breakdowns",
    long_about = "Compute the level payment, yearly amortization schedule and \
                  monthly principal/interest/tax/insurance breakdown of a \
                  fixed-rate loan, with optional extra principal every period. \
                  Loan terms come from --input <file.json>, piped JSON, or flags."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Periodic payment and derived loan scalars
    Payment(LoanArgs),
    /// Yearly amortization schedule (or per-payment rows with --detail)
    Schedule(ScheduleArgs),
    /// Monthly PITI breakdown
    Breakdown(LoanArgs),
    /// Full analysis: payment, schedule, breakdown and totals
    Analyze(LoanArgs),
    /// Export the yearly schedule as CSV
    ExportCsv(ExportCsvArgs),
    /// Render a printable schedule document
    Print(PrintArgs),
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

/// What a command hands back to `main` for display.
pub enum CommandOutput {
    /// Structured result, rendered with the selected `--output` format.
    Structured(serde_json::Value),
    /// Finished document written verbatim to stdout.
    Document(String),
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if let Err(e) = SimpleLogger::new().with_level(level).init() {
        eprintln!("{}: logger unavailable: {}", "warning".yellow().bold(), e);
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result: Result<CommandOutput, Box<dyn std::error::Error>> = match cli.command {
        Commands::Payment(args) => commands::loan::run_payment(args),
        Commands::Schedule(args) => commands::loan::run_schedule(args),
        Commands::Breakdown(args) => commands::loan::run_breakdown(args),
        Commands::Analyze(args) => commands::loan::run_analyze(args),
        Commands::ExportCsv(args) => commands::export::run_export_csv(args),
        Commands::Print(args) => commands::export::run_print(args),
        Commands::Version => {
            println!("amortize {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(CommandOutput::Structured(value)) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Ok(CommandOutput::Document(text)) => {
            print!("{}", text);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
