//! Executive summary generator
//!
//! Best effort: every failure becomes a typed [`ReportOutcome::Unavailable`]
//! carrying the message shown to the reviewer. The generator works on an
//! owned snapshot and never touches the repository.

use crate::error::ReportError;
use crate::model::SummaryModel;
use crate::prompt::{build_prompt, DEFAULT_SAMPLE_LIMIT};
use agenda_core::BlockRequest;
use std::sync::Arc;

/// Why no summary is available
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnavailableReason {
    /// No credential configured
    MissingCredential,
    /// Model answered without text
    EmptyResponse,
    /// Transport or service failure
    ServiceError,
}

impl UnavailableReason {
    /// Message shown in place of the summary
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Self::MissingCredential => "API Key no configurada.",
            Self::EmptyResponse => "No se pudo generar el resumen.",
            Self::ServiceError => "Error al contactar con el servicio de IA.",
        }
    }
}

impl From<&ReportError> for UnavailableReason {
    fn from(err: &ReportError) -> Self {
        match err {
            ReportError::MissingCredential => Self::MissingCredential,
            ReportError::EmptyResponse => Self::EmptyResponse,
            ReportError::Http(_) | ReportError::Status { .. } => Self::ServiceError,
        }
    }
}

/// Result of a summary request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    /// HTML summary from the model
    Summary(String),
    /// No summary; `message` is the fallback text
    Unavailable {
        /// Failure class
        reason: UnavailableReason,
        /// Fallback text for display
        message: String,
    },
}

impl ReportOutcome {
    /// Unavailable outcome with the standard message
    #[must_use]
    pub fn unavailable(reason: UnavailableReason) -> Self {
        Self::Unavailable {
            reason,
            message: reason.message().to_string(),
        }
    }

    /// Text to display, summary or fallback
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Summary(html) => html,
            Self::Unavailable { message, .. } => message,
        }
    }

    /// Check whether a summary was produced
    #[inline]
    #[must_use]
    pub fn is_summary(&self) -> bool {
        matches!(self, Self::Summary(_))
    }
}

/// Summary generator over an optional model
#[derive(Debug, Clone)]
pub struct ReportGenerator {
    model: Option<Arc<dyn SummaryModel>>,
    sample_limit: usize,
}

impl ReportGenerator {
    /// Create generator; `None` means no credential was configured
    #[must_use]
    pub fn new(model: Option<Arc<dyn SummaryModel>>) -> Self {
        Self {
            model,
            sample_limit: DEFAULT_SAMPLE_LIMIT,
        }
    }

    /// Generator that always reports a missing credential
    #[inline]
    #[must_use]
    pub fn disabled() -> Self {
        Self::new(None)
    }

    /// With sample cap
    #[inline]
    #[must_use]
    pub fn with_sample_limit(mut self, limit: usize) -> Self {
        self.sample_limit = limit;
        self
    }

    /// Records included in the prompt
    #[inline]
    #[must_use]
    pub fn sample_limit(&self) -> usize {
        self.sample_limit
    }

    /// Summarize a snapshot
    pub async fn generate(&self, snapshot: &[BlockRequest]) -> ReportOutcome {
        let Some(model) = &self.model else {
            tracing::warn!("summary requested without API credential");
            return ReportOutcome::unavailable(UnavailableReason::MissingCredential);
        };

        let prompt = build_prompt(snapshot, self.sample_limit);
        match model.generate(&prompt).await {
            Ok(html) if !html.trim().is_empty() => {
                tracing::info!(records = snapshot.len(), "summary generated");
                ReportOutcome::Summary(html)
            }
            Ok(_) => {
                tracing::warn!("model returned an empty summary");
                ReportOutcome::unavailable(UnavailableReason::EmptyResponse)
            }
            Err(e) => {
                tracing::warn!(error = %e, "summary generation failed");
                ReportOutcome::unavailable(UnavailableReason::from(&e))
            }
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::disabled()
    }
}
