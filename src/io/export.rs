//! CSV export for range tables and savings timelines.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::payback::PaybackResult;
use crate::range::RangeReport;
use crate::rounding::round_half_up;

/// Column header for the range table export.
pub const RANGES_HEADER: &str = "scenario,consumption_wh_km,range_km,range_calibrated_km";

/// Column header for the savings timeline export.
pub const TIMELINE_HEADER: &str = "year,annual_savings_eur,cumulative_savings_eur";

/// Exports a range table to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_ranges_csv(report: &RangeReport, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    write_ranges_csv(report, io::BufWriter::new(file))
}

/// Writes one row per scenario, in catalog order.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_ranges_csv(report: &RangeReport, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(RANGES_HEADER.split(','))?;

    for (name, r) in report.iter() {
        wtr.write_record(&[
            name.as_str().to_string(),
            format!("{:.1}", r.consumption_wh_km),
            format!("{:.0}", r.range_km),
            format!("{:.0}", r.range_calibrated_km),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Exports a savings timeline to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_timeline_csv(result: &PaybackResult, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    write_timeline_csv(result, io::BufWriter::new(file))
}

/// Writes the year-0 investment row followed by one row per projected year.
/// Euro amounts are rounded to whole euros.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_timeline_csv(result: &PaybackResult, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(TIMELINE_HEADER.split(','))?;

    wtr.write_record(&[
        "0".to_string(),
        "0".to_string(),
        format!("{:.0}", round_half_up(-result.total_investment_eur)),
    ])?;
    for e in &result.savings_timeline {
        wtr.write_record(&[
            e.year.to_string(),
            format!("{:.0}", round_half_up(e.annual_savings_eur)),
            format!("{:.0}", round_half_up(e.cumulative_savings_eur)),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
