//! CSV serialization of yearly amortization rows.

use std::io;

use crate::error::AmortizeError;
use crate::format::format_plain;
use crate::types::AmortizationRow;
use crate::AmortizeResult;

/// Column headers of the schedule CSV, in output order.
pub const SCHEDULE_CSV_HEADER: [&str; 6] = [
    "Year",
    "Principal Paid",
    "Interest Paid",
    "Cumulative Principal",
    "Cumulative Interest",
    "Remaining Balance",
];

/// Write the schedule as CSV: header line, then one `\n`-terminated line per
/// row with amounts rounded to cents.
pub fn write_schedule_csv<W: io::Write>(rows: &[AmortizationRow], writer: W) -> AmortizeResult<()> {
    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    wtr.write_record(SCHEDULE_CSV_HEADER)?;
    for row in rows {
        wtr.write_record([
            row.year.to_string(),
            format_plain(row.principal),
            format_plain(row.interest),
            format_plain(row.cumulative_principal),
            format_plain(row.cumulative_interest),
            format_plain(row.remaining),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Render the schedule CSV into a string.
pub fn schedule_to_csv(rows: &[AmortizationRow]) -> AmortizeResult<String> {
    let mut buf = Vec::new();
    write_schedule_csv(rows, &mut buf)?;
    String::from_utf8(buf).map_err(|e| AmortizeError::ExportError(e.to_string()))
}
