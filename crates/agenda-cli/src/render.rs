//! Plain-text views for the terminal

use agenda_core::{BlockRequest, Directory, StatusCounts, WEEKDAY_HEADERS};
use agenda_store::CalendarMonth;
use chrono::Datelike;
use std::fmt::Write as _;

const DATE_FORMAT: &str = "%d-%m-%Y";

/// One grid line per request, newest first
#[must_use]
pub fn request_grid(rows: &[BlockRequest], counts: &StatusCounts) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Pendientes: {}  |  Total: {}",
        counts.pending,
        counts.total()
    );

    if rows.is_empty() {
        out.push_str("Sin solicitudes.\n");
        return out;
    }

    for request in rows {
        let _ = writeln!(
            out,
            "{:<11} {:<36} {} ({}) | {} | {} a {} | {}",
            request.status.label(),
            request.id.as_str(),
            request.professional_name,
            request.profession,
            request.block_type,
            request.start_date.format(DATE_FORMAT),
            request.end_date.format(DATE_FORMAT),
            request.solicitante,
        );
    }
    out
}

/// Full record
#[must_use]
pub fn request_detail(request: &BlockRequest) -> String {
    let created = request
        .created_at_utc()
        .map_or_else(|| request.created_at.to_string(), |t| t.to_rfc3339());

    let mut out = String::new();
    let _ = writeln!(out, "Id:           {}", request.id);
    let _ = writeln!(out, "Estado:       {}", request.status);
    let _ = writeln!(out, "Creada:       {created}");
    let _ = writeln!(out, "Solicitante:  {}", request.solicitante);
    let _ = writeln!(
        out,
        "Profesional:  {} ({})",
        request.professional_name, request.profession
    );
    let _ = writeln!(out, "Tipo:         {}", request.block_type);
    let _ = writeln!(
        out,
        "Fechas:       {} a {} ({} días)",
        request.start_date.format(DATE_FORMAT),
        request.end_date.format(DATE_FORMAT),
        request.span_days()
    );
    let _ = writeln!(
        out,
        "Horario:      {} - {}",
        request.start_time.format("%H:%M"),
        request.end_time.format("%H:%M")
    );
    if let Some(comments) = request.comments.as_deref().filter(|c| !c.is_empty()) {
        let _ = writeln!(out, "Comentarios:  {comments}");
    }
    out
}

/// Monday-first month grid; days with blocks are starred, then listed
#[must_use]
pub fn calendar(view: &CalendarMonth) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", view.month.label());

    for header in WEEKDAY_HEADERS {
        let _ = write!(out, "{header:>5}");
    }
    out.push('\n');

    let mut column = view.month.leading_blanks() as usize;
    out.push_str(&" ".repeat(column * 5));
    for (date, events) in &view.days {
        let marker = if events.is_empty() { ' ' } else { '*' };
        let _ = write!(out, "{:>4}{marker}", date.day());
        column += 1;
        if column % 7 == 0 {
            out.push('\n');
        }
    }
    if column % 7 != 0 {
        out.push('\n');
    }

    for (date, events) in view.days.iter().filter(|(_, events)| !events.is_empty()) {
        let _ = writeln!(out, "\n{}", date.format(DATE_FORMAT));
        for event in events {
            let _ = writeln!(
                out,
                "  {} ({}) - {}",
                event.professional_name, event.profession, event.block_type
            );
        }
    }
    out
}

/// Catalog listing, optionally one profession's roster only
#[must_use]
pub fn catalog(directory: &Directory, profession: Option<&str>) -> String {
    let mut out = String::new();

    if let Some(profession) = profession {
        let _ = writeln!(out, "{profession}:");
        for name in directory.roster(profession) {
            let _ = writeln!(out, "  {name}");
        }
        return out;
    }

    out.push_str("Solicitantes:\n");
    for name in &directory.coordinators {
        let _ = writeln!(out, "  {name}");
    }
    out.push_str("Tipos de bloqueo:\n");
    for label in &directory.block_types {
        let _ = writeln!(out, "  {label}");
    }
    out.push_str("Profesiones:\n");
    for profession in directory.professions() {
        let _ = writeln!(
            out,
            "  {profession} ({})",
            directory.roster(profession).len()
        );
    }
    out
}
