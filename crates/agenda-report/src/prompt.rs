//! Prompt construction
//!
//! The prompt carries the pending/authorized totals of the whole snapshot
//! and one line per record of a capped sample of the most recent requests.

use agenda_core::{status_counts, BlockRequest};

/// Records included in the prompt by default
pub const DEFAULT_SAMPLE_LIMIT: usize = 50;

/// One prompt line per sampled record, newest first
#[must_use]
pub fn sample_lines(snapshot: &[BlockRequest], limit: usize) -> Vec<String> {
    snapshot
        .iter()
        .take(limit)
        .map(|r| {
            format!(
                "- {} ({}): {} desde {} hasta {} [{}]",
                r.professional_name, r.profession, r.block_type, r.start_date, r.end_date, r.status
            )
        })
        .collect()
}

/// Full executive-summary prompt
#[must_use]
pub fn build_prompt(snapshot: &[BlockRequest], limit: usize) -> String {
    let counts = status_counts(snapshot);
    let sample = sample_lines(snapshot, limit).join("\n");

    format!(
        "Actúa como un asistente administrativo experto para un CESFAM (Centro de Salud Familiar).
Analiza los siguientes datos de solicitudes de bloqueo de agenda (vacaciones, permisos, capacitaciones, etc.).

Resumen actual:
- Pendientes: {pending}
- Autorizados: {authorized}

Lista de solicitudes recientes (muestra):
{sample}

Genera un breve reporte ejecutivo (máximo 2 párrafos) en formato HTML simple (usando <p>, <strong>, <ul>, <li>) sobre el estado de la dotación.
Identifica si hay muchas solicitudes pendientes de un tipo específico o de una profesión específica que puedan poner en riesgo la atención.
Sé profesional y directo.",
        pending = counts.pending,
        authorized = counts.authorized,
    )
}
