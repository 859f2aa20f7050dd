//! Agenda Core - block request model and workflow views
//!
//! The domain side of the clinic agenda tracker:
//! - Block request records and their review status
//! - The directory catalog used by the request form
//! - Derived views over a repository snapshot (filters, badges, calendar)
//! - CSV export of the request grid
//!
//! # Example
//!
//! ```rust
//! use agenda_core::prelude::*;
//!
//! let directory = Directory::cesfam();
//! let profession = directory.default_profession().unwrap_or_default();
//! assert_eq!(directory.default_professional(profession), Some("MATIAS PERALTA"));
//!
//! let snapshot: Vec<BlockRequest> = Vec::new();
//! assert_eq!(pending_count(&snapshot), 0);
//! ```

#![warn(unreachable_pub)]

pub mod calendar;
pub mod catalog;
pub mod csv;
pub mod error;
pub mod types;
pub mod workflow;

// Re-exports for convenience
pub use calendar::{DayCell, MonthView, WEEKDAY_HEADERS};
pub use catalog::Directory;
pub use error::{CalendarError, CatalogError, ValidationError};
pub use types::{BlockDraft, BlockRequest, RequestId, RequestStatus, StatusFilter, UnknownStatus};
pub use workflow::{
    allowed_transitions, authorized, events_on_date, filter_by_status, pending_count,
    status_counts, validate_draft, StatusCounts,
};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with agenda core
    pub use crate::{
        events_on_date, filter_by_status, pending_count, BlockDraft, BlockRequest, Directory,
        MonthView, RequestId, RequestStatus, StatusFilter,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
