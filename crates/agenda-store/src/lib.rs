//! Agenda Store - persistence for block requests
//!
//! Provides:
//! - The [`KeyValueStore`] seam with in-memory and file-backed backends
//! - The [`Repository`] owning the canonical request list
//! - The [`Agenda`] service that validates submissions and serves views
//!
//! # Example
//!
//! ```rust
//! use agenda_store::{Agenda, MemoryStore};
//!
//! let agenda = Agenda::new(MemoryStore::new());
//! assert_eq!(agenda.pending_count(), 0);
//! ```

#![warn(unreachable_pub)]

pub mod agenda;
pub mod error;
pub mod repository;
pub mod storage;

pub use agenda::{Agenda, CalendarMonth};
pub use error::{AgendaError, RepositoryError, StorageError};
pub use repository::{Repository, STORAGE_KEY};
pub use storage::{FileStore, KeyValueStore, MemoryStore};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
