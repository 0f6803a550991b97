//! CSV export of ledger rows

use super::ledger::LedgerRow;
use csv::Writer;
use std::io::Write;
use std::path::Path;

/// Write rows with a header line to any writer
pub fn write_ledger_csv<W: Write>(writer: W, rows: &[LedgerRow]) -> Result<(), csv::Error> {
    let mut csv_writer = Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write rows to a CSV file at `path`, replacing any existing file
pub fn write_ledger_csv_path<P: AsRef<Path>>(path: P, rows: &[LedgerRow]) -> Result<(), csv::Error> {
    let mut csv_writer = Writer::from_path(path)?;
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}
