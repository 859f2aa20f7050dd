//! Error types for summary generation
//!
//! These never reach callers of [`crate::ReportGenerator`]; they are folded
//! into [`crate::ReportOutcome::Unavailable`] and logged.

/// Language-model call failures
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// No credential configured
    #[error("missing API credential")]
    MissingCredential,

    /// Transport or decoding failure
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Service answered with a non-success status
    #[error("service error ({status}): {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, possibly truncated
        body: String,
    },

    /// Service answered without any text
    #[error("empty response from model")]
    EmptyResponse,
}

impl ReportError {
    /// Create status error, keeping at most 512 bytes of the body
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        let mut body = body.into();
        if body.len() > 512 {
            let mut cut = 512;
            while !body.is_char_boundary(cut) {
                cut -= 1;
            }
            body.truncate(cut);
        }
        Self::Status { status, body }
    }
}
