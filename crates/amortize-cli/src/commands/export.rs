use clap::Args;
use serde_json::json;
use std::fs::File;
use std::io::BufWriter;
use tabled::builder::Builder;
use tabled::settings::Style;
use tabled::Table;

use amortize_core::analysis::{analyze_loan, LoanAnalysis};
use amortize_core::export::{schedule_to_csv, write_schedule_csv, SCHEDULE_CSV_HEADER};
use amortize_core::format::format_money;
use amortize_core::LoanParameters;

use super::loan::{resolve_params, LoanArgs};
use crate::CommandOutput;

/// Arguments for CSV export
#[derive(Args)]
pub struct ExportCsvArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Write to this file instead of stdout
    #[arg(long)]
    pub out: Option<String>,
}

/// Arguments for the printable document
#[derive(Args)]
pub struct PrintArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Write to this file instead of stdout
    #[arg(long)]
    pub out: Option<String>,
}

pub fn run_export_csv(args: ExportCsvArgs) -> Result<CommandOutput, Box<dyn std::error::Error>> {
    let params = resolve_params(&args.loan)?;
    let analysis = analyze_loan(&params);
    let rows = &analysis.result.schedule;

    match args.out {
        Some(path) => {
            let file = File::create(&path)
                .map_err(|e| format!("Failed to create '{}': {}", path, e))?;
            write_schedule_csv(rows, BufWriter::new(file))?;
            Ok(CommandOutput::Structured(json!({
                "file": path,
                "rows": rows.len(),
            })))
        }
        None => Ok(CommandOutput::Document(schedule_to_csv(rows)?)),
    }
}

pub fn run_print(args: PrintArgs) -> Result<CommandOutput, Box<dyn std::error::Error>> {
    let params = resolve_params(&args.loan)?;
    let analysis = analyze_loan(&params);
    let document = render_document(&params, &analysis.result, &analysis.warnings);

    match args.out {
        Some(path) => {
            std::fs::write(&path, &document)
                .map_err(|e| format!("Failed to write '{}': {}", path, e))?;
            Ok(CommandOutput::Structured(json!({
                "file": path,
                "rows": analysis.result.schedule.len(),
            })))
        }
        None => Ok(CommandOutput::Document(document)),
    }
}

fn key_value_table(rows: &[(&str, String)]) -> Table {
    let mut builder = Builder::default();
    for (label, value) in rows {
        builder.push_record([label.to_string(), value.clone()]);
    }
    let mut table = builder.build();
    table.with(Style::blank());
    table
}

/// Printable amortization document: loan terms, yearly table, totals and
/// the monthly cost breakdown.
fn render_document(params: &LoanParameters, analysis: &LoanAnalysis, warnings: &[String]) -> String {
    let mut doc = String::new();
    doc.push_str("LOAN AMORTIZATION SCHEDULE\n\n");

    let terms = key_value_table(&[
        ("Loan amount", format_money(params.loan_amount)),
        ("Interest rate", format!("{}% per year", params.interest_rate)),
        (
            "Term",
            format!(
                "{} years ({} {} payments)",
                params.loan_term_years, analysis.total_periods, params.payment_frequency
            ),
        ),
        ("Payment", format_money(analysis.periodic_payment)),
        ("Extra per payment", format_money(params.extra_payment_per_period)),
    ]);
    doc.push_str(&format!("{}\n\n", terms));

    if analysis.schedule.is_empty() {
        doc.push_str("(no payments scheduled)\n\n");
    } else {
        let mut builder = Builder::default();
        builder.push_record(SCHEDULE_CSV_HEADER);
        for row in &analysis.schedule {
            builder.push_record([
                row.year.to_string(),
                format_money(row.principal),
                format_money(row.interest),
                format_money(row.cumulative_principal),
                format_money(row.cumulative_interest),
                format_money(row.remaining),
            ]);
        }
        let mut table = builder.build();
        table.with(Style::psql());
        doc.push_str(&format!("{}\n\n", table));
    }

    let summary = &analysis.summary;
    let mut totals = vec![
        ("Total principal", format_money(summary.total_principal)),
        ("Total interest", format_money(summary.total_interest)),
        ("Total of payments", format_money(summary.total_payment)),
        ("Number of payments", summary.number_of_payments.to_string()),
    ];
    if let Some(savings) = &summary.extra_payment_savings {
        totals.push(("Interest saved", format_money(savings.interest_saved)));
        totals.push(("Payments saved", savings.payments_saved.to_string()));
    }
    doc.push_str("TOTALS\n");
    doc.push_str(&format!("{}\n\n", key_value_table(&totals)));

    let b = &analysis.monthly_breakdown;
    doc.push_str("MONTHLY COST (PITI)\n");
    let breakdown = key_value_table(&[
        ("Principal & interest", format_money(b.principal_and_interest)),
        ("Extra principal", format_money(b.extra_payment)),
        ("Property tax", format_money(b.property_tax)),
        ("Insurance", format_money(b.insurance)),
        ("HOA", format_money(b.hoa)),
        ("Total", format_money(b.total)),
    ]);
    doc.push_str(&format!("{}\n", breakdown));

    if !warnings.is_empty() {
        doc.push_str("\nWarnings:\n");
        for w in warnings {
            doc.push_str(&format!("  - {}\n", w));
        }
    }

    doc
}
