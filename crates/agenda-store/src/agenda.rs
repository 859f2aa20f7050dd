//! Request workflow service
//!
//! Ties the repository to the directory catalog: drafts are validated
//! before they are stored, and the derived views are computed over a fresh
//! snapshot on every call.

use crate::error::AgendaError;
use crate::repository::Repository;
use crate::storage::KeyValueStore;
use agenda_core::workflow::{self, StatusCounts};
use agenda_core::{
    validate_draft, BlockDraft, BlockRequest, Directory, MonthView, RequestId, RequestStatus,
    StatusFilter,
};
use chrono::NaiveDate;

/// Submission and review entry point
#[derive(Debug)]
pub struct Agenda<S> {
    repository: Repository<S>,
    directory: Directory,
}

/// Calendar month with its authorized blocks, detached from the snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarMonth {
    /// Displayed month
    pub month: MonthView,
    /// One entry per day, in order, with the covering authorized blocks
    pub days: Vec<(NaiveDate, Vec<BlockRequest>)>,
}

impl<S: KeyValueStore> Agenda<S> {
    /// Create service over a store with the built-in catalog
    #[inline]
    #[must_use]
    pub fn new(store: S) -> Self {
        Self::with_directory(store, Directory::cesfam())
    }

    /// Create service with a custom catalog
    #[must_use]
    pub fn with_directory(store: S, directory: Directory) -> Self {
        Self {
            repository: Repository::new(store),
            directory,
        }
    }

    /// Underlying repository
    #[inline]
    #[must_use]
    pub fn repository(&self) -> &Repository<S> {
        &self.repository
    }

    /// Directory catalog
    #[inline]
    #[must_use]
    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    /// Validate and store a new request; always starts pending
    ///
    /// # Errors
    /// - `AgendaError::Validation` if the draft breaks a form rule
    /// - `AgendaError::Repository` if it cannot be stored
    pub fn submit(&self, draft: BlockDraft) -> Result<BlockRequest, AgendaError> {
        if let Err(e) = validate_draft(&draft, &self.directory) {
            tracing::warn!(error = %e, "draft rejected");
            return Err(e.into());
        }
        Ok(self.repository.create(draft)?)
    }

    /// Set a request's status; any status may follow any other
    ///
    /// # Errors
    /// `AgendaError::Repository` wrapping `NotFound` for unknown ids, or a
    /// storage failure.
    pub fn set_status(
        &self,
        id: &RequestId,
        status: RequestStatus,
    ) -> Result<Vec<BlockRequest>, AgendaError> {
        Ok(self.repository.set_status(id, status)?)
    }

    /// Mark a request authorized
    ///
    /// # Errors
    /// Same as [`Agenda::set_status`].
    pub fn authorize(&self, id: &RequestId) -> Result<Vec<BlockRequest>, AgendaError> {
        self.set_status(id, RequestStatus::Authorized)
    }

    /// Mark a request rejected
    ///
    /// # Errors
    /// Same as [`Agenda::set_status`].
    pub fn reject(&self, id: &RequestId) -> Result<Vec<BlockRequest>, AgendaError> {
        self.set_status(id, RequestStatus::Rejected)
    }

    /// Put a request back to pending
    ///
    /// # Errors
    /// Same as [`Agenda::set_status`].
    pub fn reopen(&self, id: &RequestId) -> Result<Vec<BlockRequest>, AgendaError> {
        self.set_status(id, RequestStatus::Pending)
    }

    /// Current snapshot, newest first
    #[inline]
    #[must_use]
    pub fn snapshot(&self) -> Vec<BlockRequest> {
        self.repository.list_all()
    }

    /// Look up one request
    #[inline]
    #[must_use]
    pub fn get(&self, id: &RequestId) -> Option<BlockRequest> {
        self.repository.get(id)
    }

    /// Pending badge value
    #[must_use]
    pub fn pending_count(&self) -> usize {
        workflow::pending_count(&self.snapshot())
    }

    /// Totals by status
    #[must_use]
    pub fn status_counts(&self) -> StatusCounts {
        workflow::status_counts(&self.snapshot())
    }

    /// Grid rows for a filter
    #[must_use]
    pub fn filtered(&self, filter: StatusFilter) -> Vec<BlockRequest> {
        workflow::filter_by_status(&self.snapshot(), filter)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Authorized blocks covering a day
    #[must_use]
    pub fn events_on(&self, date: NaiveDate) -> Vec<BlockRequest> {
        workflow::events_on_date(&self.snapshot(), date)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Calendar grid for a month
    #[must_use]
    pub fn calendar(&self, month: MonthView) -> CalendarMonth {
        let snapshot = self.snapshot();
        let days = month
            .cells(&snapshot)
            .into_iter()
            .map(|cell| (cell.date, cell.events.into_iter().cloned().collect()))
            .collect();
        CalendarMonth { month, days }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use agenda_core::ValidationError;
    use agenda_test_utils::sample_draft;

    #[test]
    fn submit_validates_before_storing() {
        let agenda = Agenda::new(MemoryStore::new());
        let mut draft = sample_draft();
        draft.end_date = draft.start_date.pred_opt().unwrap();

        let err = agenda.submit(draft).unwrap_err();
        assert!(matches!(
            err,
            AgendaError::Validation(ValidationError::InvertedRange { .. })
        ));
        assert!(agenda.snapshot().is_empty());
    }

    #[test]
    fn review_cycle() {
        let agenda = Agenda::new(MemoryStore::new());
        let request = agenda.submit(sample_draft()).unwrap();
        assert_eq!(agenda.pending_count(), 1);

        agenda.authorize(&request.id).unwrap();
        assert_eq!(agenda.pending_count(), 0);
        assert_eq!(agenda.events_on(request.start_date).len(), 1);

        agenda.reject(&request.id).unwrap();
        assert!(agenda.events_on(request.start_date).is_empty());

        agenda.reopen(&request.id).unwrap();
        assert_eq!(agenda.status_counts().pending, 1);
    }

    #[test]
    fn unknown_id_surfaces_not_found() {
        let agenda = Agenda::new(MemoryStore::new());
        let err = agenda.authorize(&RequestId::from("ghost")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn calendar_month_detaches_events() {
        let agenda = Agenda::new(MemoryStore::new());
        let request = agenda.submit(sample_draft()).unwrap();
        agenda.authorize(&request.id).unwrap();

        let month = MonthView::containing(request.start_date);
        let calendar = agenda.calendar(month);
        assert_eq!(calendar.days.len() as u32, month.days_in_month());

        let covered = calendar.days.iter().filter(|(_, events)| !events.is_empty()).count();
        assert_eq!(covered as i64, request.span_days());
    }
}
