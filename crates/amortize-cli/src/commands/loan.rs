use clap::Args;
use rust_decimal::Decimal;

use amortize_core::analysis::{
    analyze_loan, breakdown_report, period_schedule_report, quote_payment, schedule_report,
};
use amortize_core::{LoanParameters, PaymentFrequency};

use crate::input;
use crate::CommandOutput;

/// Loan terms shared by every command.
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct LoanArgs {
    /// Amount borrowed
    #[arg(long, alias = "principal")]
    pub loan_amount: Option<Decimal>,

    /// Annual interest rate in percent (e.g. 5 for 5%)
    #[arg(long, alias = "rate")]
    pub interest_rate: Option<Decimal>,

    /// Loan term in years
    #[arg(long, alias = "years")]
    pub term_years: Option<u32>,

    /// Payment frequency: monthly, biweekly, weekly or semimonthly
    #[arg(long, default_value = "monthly")]
    pub frequency: PaymentFrequency,

    /// Extra principal paid with every payment
    #[arg(long, default_value = "0")]
    pub extra_payment: Decimal,

    /// Home value, used for property tax
    #[arg(long, default_value = "0")]
    pub home_value: Decimal,

    /// Annual property tax in percent of home value
    #[arg(long, default_value = "0")]
    pub property_tax_rate: Decimal,

    /// Homeowner's insurance per year
    #[arg(long, default_value = "0")]
    pub yearly_insurance: Decimal,

    /// HOA dues per month
    #[arg(long, default_value = "0")]
    pub monthly_hoa: Decimal,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the schedule command
#[derive(Args)]
pub struct ScheduleArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// List every payment instead of yearly totals
    #[arg(long)]
    pub detail: bool,
}

/// Loan parameters from --input, individual flags, or stdin, in that order.
pub fn resolve_params(args: &LoanArgs) -> Result<LoanParameters, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        return input::file::read_loan_file(path);
    }

    if let Some(loan_amount) = args.loan_amount {
        return Ok(LoanParameters {
            loan_amount,
            interest_rate: args
                .interest_rate
                .ok_or("--interest-rate is required (or provide --input)")?,
            loan_term_years: args
                .term_years
                .ok_or("--term-years is required (or provide --input)")?,
            payment_frequency: args.frequency,
            extra_payment_per_period: args.extra_payment,
            home_value: args.home_value,
            property_tax_rate: args.property_tax_rate,
            yearly_insurance: args.yearly_insurance,
            monthly_hoa: args.monthly_hoa,
        });
    }

    if let Some(params) = input::stdin::read_loan_stdin()? {
        return Ok(params);
    }

    Err("--loan-amount, --input <file.json> or stdin required".into())
}

pub fn run_payment(args: LoanArgs) -> Result<CommandOutput, Box<dyn std::error::Error>> {
    let params = resolve_params(&args)?;
    let result = quote_payment(&params);
    Ok(CommandOutput::Structured(serde_json::to_value(result)?))
}

pub fn run_schedule(args: ScheduleArgs) -> Result<CommandOutput, Box<dyn std::error::Error>> {
    let params = resolve_params(&args.loan)?;
    let value = if args.detail {
        serde_json::to_value(period_schedule_report(&params))?
    } else {
        serde_json::to_value(schedule_report(&params))?
    };
    Ok(CommandOutput::Structured(value))
}

pub fn run_breakdown(args: LoanArgs) -> Result<CommandOutput, Box<dyn std::error::Error>> {
    let params = resolve_params(&args)?;
    let result = breakdown_report(&params);
    Ok(CommandOutput::Structured(serde_json::to_value(result)?))
}

pub fn run_analyze(args: LoanArgs) -> Result<CommandOutput, Box<dyn std::error::Error>> {
    let params = resolve_params(&args)?;
    let result = analyze_loan(&params);
    Ok(CommandOutput::Structured(serde_json::to_value(result)?))
}
