//! Agenda Report - executive summaries of block requests
//!
//! Sends a capped sample of the most recent requests to a language model
//! and returns HTML prose. Failures never propagate: callers always get a
//! [`ReportOutcome`], either a summary or a fallback message.
//!
//! # Example
//!
//! ```rust,ignore
//! use agenda_report::{GeminiConfig, GeminiModel, ReportGenerator};
//! use std::sync::Arc;
//!
//! # async fn example(snapshot: Vec<agenda_core::BlockRequest>) {
//! let model = GeminiModel::new(GeminiConfig::new("api-key")).ok();
//! let generator = ReportGenerator::new(model.map(|m| Arc::new(m) as _));
//! let outcome = generator.generate(&snapshot).await;
//! println!("{}", outcome.text());
//! # }
//! ```

#![warn(unreachable_pub)]

pub mod error;
pub mod generator;
pub mod model;
pub mod prompt;

pub use error::ReportError;
pub use generator::{ReportGenerator, ReportOutcome, UnavailableReason};
pub use model::{GeminiConfig, GeminiModel, SummaryModel, DEFAULT_ENDPOINT, DEFAULT_MODEL};
pub use prompt::{build_prompt, DEFAULT_SAMPLE_LIMIT};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
