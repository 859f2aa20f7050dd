//! Request workflow rules and derived views
//!
//! Everything here is a pure function over a repository snapshot. The status
//! lifecycle has no guards: any status may be set from any other, and
//! nothing is terminal.

use crate::catalog::Directory;
use crate::error::ValidationError;
use crate::types::{BlockDraft, BlockRequest, RequestStatus, StatusFilter};
use chrono::NaiveDate;
use serde::Serialize;

/// Per-status totals for badges and report headers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    /// Awaiting review
    pub pending: usize,
    /// Approved
    pub authorized: usize,
    /// Declined
    pub rejected: usize,
}

impl StatusCounts {
    /// Total number of records
    #[inline]
    #[must_use]
    pub fn total(&self) -> usize {
        self.pending + self.authorized + self.rejected
    }

    /// Count for a single status
    #[must_use]
    pub fn get(&self, status: RequestStatus) -> usize {
        match status {
            RequestStatus::Pending => self.pending,
            RequestStatus::Authorized => self.authorized,
            RequestStatus::Rejected => self.rejected,
        }
    }
}

/// Statuses reachable from `from`
///
/// Every status is reachable from every status, including itself.
#[must_use]
pub fn allowed_transitions(_from: RequestStatus) -> Vec<RequestStatus> {
    RequestStatus::ALL.to_vec()
}

/// Number of records awaiting review
#[must_use]
pub fn pending_count(snapshot: &[BlockRequest]) -> usize {
    snapshot
        .iter()
        .filter(|r| r.status == RequestStatus::Pending)
        .count()
}

/// Totals by status
#[must_use]
pub fn status_counts(snapshot: &[BlockRequest]) -> StatusCounts {
    snapshot
        .iter()
        .fold(StatusCounts::default(), |mut counts, r| {
            match r.status {
                RequestStatus::Pending => counts.pending += 1,
                RequestStatus::Authorized => counts.authorized += 1,
                RequestStatus::Rejected => counts.rejected += 1,
            }
            counts
        })
}

/// Records passing a status filter, in snapshot order
#[must_use]
pub fn filter_by_status(snapshot: &[BlockRequest], filter: StatusFilter) -> Vec<&BlockRequest> {
    snapshot.iter().filter(|r| filter.matches(r.status)).collect()
}

/// Records that belong on the calendar
#[must_use]
pub fn authorized(snapshot: &[BlockRequest]) -> Vec<&BlockRequest> {
    filter_by_status(snapshot, StatusFilter::Only(RequestStatus::Authorized))
}

/// Authorized records whose range covers `date`, both ends inclusive
#[must_use]
pub fn events_on_date(snapshot: &[BlockRequest], date: NaiveDate) -> Vec<&BlockRequest> {
    snapshot
        .iter()
        .filter(|r| r.status == RequestStatus::Authorized && r.covers(date))
        .collect()
}

/// Check a draft before it is stored
///
/// # Errors
/// The first failing rule, checked in form order: required fields,
/// catalog membership, roster membership, then date order.
pub fn validate_draft(draft: &BlockDraft, directory: &Directory) -> Result<(), ValidationError> {
    let required = [
        ("solicitante", &draft.solicitante),
        ("profession", &draft.profession),
        ("professionalName", &draft.professional_name),
        ("blockType", &draft.block_type),
    ];
    if let Some((field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
        return Err(ValidationError::MissingField(*field));
    }

    if !directory.has_coordinator(&draft.solicitante) {
        return Err(ValidationError::UnknownCoordinator(draft.solicitante.clone()));
    }
    if !directory.has_profession(&draft.profession) {
        return Err(ValidationError::UnknownProfession(draft.profession.clone()));
    }
    if !directory.is_on_roster(&draft.profession, &draft.professional_name) {
        return Err(ValidationError::not_on_roster(
            &draft.professional_name,
            &draft.profession,
        ));
    }
    if !directory.has_block_type(&draft.block_type) {
        return Err(ValidationError::UnknownBlockType(draft.block_type.clone()));
    }

    if draft.start_date > draft.end_date {
        return Err(ValidationError::InvertedRange {
            start: draft.start_date,
            end: draft.end_date,
        });
    }

    Ok(())
}
