//! CSV export of the reservation book
//!
//! One header row, then one row per reservation in book order. An unassigned
//! table is an empty cell. Fields containing a comma, quote or line break are
//! wrapped in double quotes with inner quotes doubled.

use shared::models::{CREATED_AT_FORMAT, Reservation};
use std::borrow::Cow;
use std::io::{self, Write};

/// Column names of the export header
pub const CSV_HEADER: [&str; 9] = [
    "id",
    "name",
    "phone",
    "jumlah_orang",
    "date",
    "time",
    "type",
    "table",
    "created_at",
];

/// Result of an export request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// `rows` reservations written
    Written { rows: usize },
    /// Nothing to export; no file was written
    Empty,
}

fn escape(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

fn write_row<W: Write>(out: &mut W, fields: &[&str]) -> io::Result<()> {
    let line = fields
        .iter()
        .map(|f| escape(f))
        .collect::<Vec<_>>()
        .join(",");
    writeln!(out, "{line}")
}

/// Write `reservations` as CSV, returning the number of data rows
pub fn write_csv<W: Write>(reservations: &[Reservation], mut out: W) -> io::Result<usize> {
    write_row(&mut out, &CSV_HEADER)?;

    for r in reservations {
        let party_size = r.party_size.to_string();
        let date = r.date.to_string();
        let table = r.table_number().map(|t| t.to_string()).unwrap_or_default();
        let created_at = r.created_at.format(CREATED_AT_FORMAT).to_string();

        write_row(
            &mut out,
            &[
                r.id.as_str(),
                r.name.as_str(),
                r.phone.as_str(),
                party_size.as_str(),
                date.as_str(),
                r.time.as_str(),
                r.reservation_type.as_str(),
                table.as_str(),
                created_at.as_str(),
            ],
        )?;
    }

    out.flush()?;
    Ok(reservations.len())
}
