//! CSV export of the request grid
//!
//! Produces the sheet coordinators import into their spreadsheet tool.
//! Fields are quoted following RFC 4180 when they contain the delimiter, a
//! quote or a line break, so free text never shifts the columns.

use crate::types::BlockRequest;
use chrono::{NaiveDate, TimeZone};
use std::fmt::Display;

/// Column headers, in output order
pub const HEADERS: [&str; 11] = [
    "ID",
    "Fecha Solicitud",
    "Solicitante",
    "Profesional",
    "Profesión",
    "Tipo Bloqueo",
    "Inicio",
    "Fin",
    "Hora Inicio",
    "Hora Fin",
    "Estado",
];

const DELIMITER: char = ',';

/// Short date format of the es-CL locale
const LOCAL_DATE_FORMAT: &str = "%d-%m-%Y";

/// Render a snapshot as CSV text
///
/// `Fecha Solicitud` is the creation day as seen from `tz`. Rows are joined
/// with `\n` and there is no trailing newline.
#[must_use]
pub fn to_csv<Tz>(snapshot: &[BlockRequest], tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut lines = Vec::with_capacity(snapshot.len() + 1);
    lines.push(join_row(HEADERS.iter().copied()));
    lines.extend(snapshot.iter().map(|r| {
        let requested_on = r
            .created_at_utc()
            .map(|utc| utc.with_timezone(tz).format(LOCAL_DATE_FORMAT).to_string())
            .unwrap_or_default();
        let start_date = r.start_date.to_string();
        let end_date = r.end_date.to_string();
        let start_time = r.start_time.format("%H:%M").to_string();
        let end_time = r.end_time.format("%H:%M").to_string();

        let fields: [&str; 11] = [
            r.id.as_str(),
            &requested_on,
            &r.solicitante,
            &r.professional_name,
            &r.profession,
            &r.block_type,
            &start_date,
            &end_date,
            &start_time,
            &end_time,
            r.status.label(),
        ];
        join_row(fields.into_iter())
    }));
    lines.join("\n")
}

/// Download name for an export made on `date`
#[must_use]
pub fn export_filename(date: NaiveDate) -> String {
    format!("cesfam_solicitudes_{}.csv", date.format("%Y-%m-%d"))
}

fn join_row<'a>(fields: impl Iterator<Item = &'a str>) -> String {
    let mut row = String::new();
    for (i, field) in fields.enumerate() {
        if i > 0 {
            row.push(DELIMITER);
        }
        push_field(&mut row, field);
    }
    row
}

fn push_field(row: &mut String, field: &str) {
    let needs_quotes = field
        .chars()
        .any(|c| c == DELIMITER || c == '"' || c == '\n' || c == '\r');
    if !needs_quotes {
        row.push_str(field);
        return;
    }
    row.push('"');
    for c in field.chars() {
        if c == '"' {
            row.push('"');
        }
        row.push(c);
    }
    row.push('"');
}
