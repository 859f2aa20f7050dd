//! Testing utilities for the agenda workspace
//!
//! Shared fixtures: drafts that pass catalog validation, stored requests
//! with a chosen status, and ready-made services.

#![allow(missing_docs)]

use agenda_core::{BlockDraft, BlockRequest, RequestId, RequestStatus};
use agenda_store::{Agenda, FileStore, MemoryStore};
use chrono::NaiveDate;
use std::path::Path;

pub fn date(s: &str) -> NaiveDate {
    s.parse().expect("fixture date must be YYYY-MM-DD")
}

/// Draft for a catalog professional, 2024-03-04 to 2024-03-08
pub fn sample_draft() -> BlockDraft {
    draft_for("Médico", "JOSEFA LOPEZ", "2024-03-04", "2024-03-08")
}

pub fn draft_for(profession: &str, professional: &str, start: &str, end: &str) -> BlockDraft {
    BlockDraft {
        solicitante: "Coordinador Sector 1".to_string(),
        professional_name: professional.to_string(),
        profession: profession.to_string(),
        block_type: "Feriado Legal".to_string(),
        start_date: date(start),
        end_date: date(end),
        start_time: BlockDraft::default_start_time(),
        end_time: BlockDraft::default_end_time(),
        comments: None,
    }
}

/// Stored request with a fixed id and status
pub fn request_with_status(id: &str, status: RequestStatus, start: &str, end: &str) -> BlockRequest {
    let draft = draft_for("Médico", "JOSEFA LOPEZ", start, end);
    let mut request = BlockRequest::from_draft(draft, RequestId::from(id), 1_709_251_200_000);
    request.status = status;
    request
}

pub fn memory_agenda() -> Agenda<MemoryStore> {
    Agenda::new(MemoryStore::new())
}

pub fn file_agenda(dir: &Path) -> Agenda<FileStore> {
    Agenda::new(FileStore::new(dir))
}
