//! Core types for agenda block requests
//!
//! Defines the fundamental records of the tracker:
//! - Request identifiers
//! - Request status and status filters
//! - Drafts (submitted form data) and stored block requests

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Unique request identifier
///
/// Opaque string so records written by earlier versions keep their ids.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(pub String);

impl RequestId {
    /// Generate a fresh random identifier
    #[inline]
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Borrow the identifier as a string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RequestId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RequestId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Review status of a block request
///
/// Serialized with the Spanish labels used by stored data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RequestStatus {
    /// Awaiting review
    #[default]
    #[serde(rename = "Pendiente")]
    Pending,
    /// Approved; shown on the calendar
    #[serde(rename = "Autorizado")]
    Authorized,
    /// Declined
    #[serde(rename = "Rechazado")]
    Rejected,
}

impl RequestStatus {
    /// All statuses in display order
    pub const ALL: [RequestStatus; 3] = [Self::Pending, Self::Authorized, Self::Rejected];

    /// Persisted label
    #[inline]
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pendiente",
            Self::Authorized => "Autorizado",
            Self::Rejected => "Rechazado",
        }
    }

    /// Plural label used by the grid filter
    #[inline]
    #[must_use]
    pub fn plural_label(&self) -> &'static str {
        match self {
            Self::Pending => "Pendientes",
            Self::Authorized => "Autorizados",
            Self::Rejected => "Rechazados",
        }
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Error parsing a status or filter label
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown status: '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for RequestStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pendiente" | "pending" => Ok(Self::Pending),
            "autorizado" | "authorized" => Ok(Self::Authorized),
            "rechazado" | "rejected" => Ok(Self::Rejected),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}

/// Grid filter: everything, or a single status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StatusFilter {
    /// Pass every record through
    #[default]
    All,
    /// Keep only records with this status
    Only(RequestStatus),
}

impl StatusFilter {
    /// Check whether a status passes the filter
    #[inline]
    #[must_use]
    pub fn matches(&self, status: RequestStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => *wanted == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" | "todos" => Ok(Self::All),
            _ => s.parse().map(Self::Only),
        }
    }
}

impl From<RequestStatus> for StatusFilter {
    fn from(status: RequestStatus) -> Self {
        Self::Only(status)
    }
}

/// Form data for a new block request
///
/// Everything a request carries except the fields assigned at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockDraft {
    /// Requesting coordinator
    pub solicitante: String,
    /// Staff member being blocked
    pub professional_name: String,
    /// Staff member's discipline
    pub profession: String,
    /// Block category label
    pub block_type: String,
    /// First blocked day (inclusive)
    pub start_date: NaiveDate,
    /// Last blocked day (inclusive)
    pub end_date: NaiveDate,
    /// Advisory start time
    #[serde(with = "clock")]
    pub start_time: NaiveTime,
    /// Advisory end time
    #[serde(with = "clock")]
    pub end_time: NaiveTime,
    /// Optional free text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

impl BlockDraft {
    /// Default start of the working day
    #[must_use]
    pub fn default_start_time() -> NaiveTime {
        NaiveTime::from_hms_opt(8, 0, 0).unwrap_or(NaiveTime::MIN)
    }

    /// Default end of the working day
    #[must_use]
    pub fn default_end_time() -> NaiveTime {
        NaiveTime::from_hms_opt(17, 0, 0).unwrap_or(NaiveTime::MIN)
    }

    /// With comments
    #[inline]
    #[must_use]
    pub fn with_comments(mut self, comments: impl Into<String>) -> Self {
        self.comments = Some(comments.into());
        self
    }
}

/// A stored block request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockRequest {
    /// Unique identifier
    pub id: RequestId,
    /// Creation time, epoch milliseconds
    pub created_at: i64,
    /// Requesting coordinator
    pub solicitante: String,
    /// Staff member being blocked
    pub professional_name: String,
    /// Staff member's discipline
    pub profession: String,
    /// Block category label
    pub block_type: String,
    /// First blocked day (inclusive)
    pub start_date: NaiveDate,
    /// Last blocked day (inclusive)
    pub end_date: NaiveDate,
    /// Advisory start time
    #[serde(with = "clock")]
    pub start_time: NaiveTime,
    /// Advisory end time
    #[serde(with = "clock")]
    pub end_time: NaiveTime,
    /// Review status
    pub status: RequestStatus,
    /// Optional free text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

impl BlockRequest {
    /// Materialize a draft as a new pending request
    #[must_use]
    pub fn from_draft(draft: BlockDraft, id: RequestId, created_at: i64) -> Self {
        Self {
            id,
            created_at,
            solicitante: draft.solicitante,
            professional_name: draft.professional_name,
            profession: draft.profession,
            block_type: draft.block_type,
            start_date: draft.start_date,
            end_date: draft.end_date,
            start_time: draft.start_time,
            end_time: draft.end_time,
            status: RequestStatus::Pending,
            comments: draft.comments,
        }
    }

    /// Creation time as a UTC timestamp
    #[must_use]
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.created_at).single()
    }

    /// Check whether the block covers a day (both ends inclusive)
    #[inline]
    #[must_use]
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Number of calendar days covered; zero for an inverted range
    #[must_use]
    pub fn span_days(&self) -> i64 {
        let days = (self.end_date - self.start_date).num_days();
        if days < 0 {
            0
        } else {
            days + 1
        }
    }
}

/// `HH:MM` clock serialization, accepting a trailing `:SS` on input
mod clock {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub(super) fn serialize<S: Serializer>(time: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&time.format(FORMAT))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveTime::parse_from_str(&raw, FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M:%S"))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn draft() -> BlockDraft {
        BlockDraft {
            solicitante: "Directora".to_string(),
            professional_name: "HUGO OLAVE".to_string(),
            profession: "Odontólogo".to_string(),
            block_type: "Feriado Legal".to_string(),
            start_date: date("2024-03-01"),
            end_date: date("2024-03-03"),
            start_time: BlockDraft::default_start_time(),
            end_time: BlockDraft::default_end_time(),
            comments: None,
        }
    }

    #[test]
    fn status_labels_round_trip() {
        for status in RequestStatus::ALL {
            assert_eq!(status.label().parse::<RequestStatus>().unwrap(), status);
        }
        assert!("maybe".parse::<RequestStatus>().is_err());
    }

    #[test]
    fn status_serializes_with_spanish_labels() {
        let json = serde_json::to_string(&RequestStatus::Authorized).unwrap();
        assert_eq!(json, "\"Autorizado\"");
    }

    #[test]
    fn filter_parsing() {
        assert_eq!("All".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!(
            "rechazado".parse::<StatusFilter>().unwrap(),
            StatusFilter::Only(RequestStatus::Rejected)
        );
        assert!(StatusFilter::All.matches(RequestStatus::Pending));
        assert!(!StatusFilter::Only(RequestStatus::Pending).matches(RequestStatus::Rejected));
    }

    #[test]
    fn request_json_matches_stored_layout() {
        let request = BlockRequest::from_draft(draft(), RequestId::from("abc"), 1_709_251_200_000);
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["id"], "abc");
        assert_eq!(value["createdAt"], 1_709_251_200_000_i64);
        assert_eq!(value["professionalName"], "HUGO OLAVE");
        assert_eq!(value["startDate"], "2024-03-01");
        assert_eq!(value["startTime"], "08:00");
        assert_eq!(value["endTime"], "17:00");
        assert_eq!(value["status"], "Pendiente");
        assert!(value.get("comments").is_none());
    }

    #[test]
    fn request_reads_seconds_in_clock_fields() {
        let json = r#"{
            "id": "x", "createdAt": 0, "solicitante": "Directora",
            "professionalName": "HUGO OLAVE", "profession": "Odontólogo",
            "blockType": "Feriado Legal", "startDate": "2024-03-01",
            "endDate": "2024-03-01", "startTime": "08:30:00", "endTime": "12:00",
            "status": "Rechazado", "comments": "medio día"
        }"#;
        let request: BlockRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.start_time, NaiveTime::from_hms_opt(8, 30, 0).unwrap());
        assert_eq!(request.status, RequestStatus::Rejected);
        assert_eq!(request.comments.as_deref(), Some("medio día"));
    }

    #[test]
    fn covers_is_inclusive() {
        let request = BlockRequest::from_draft(draft(), RequestId::generate(), 0);
        assert!(request.covers(date("2024-03-01")));
        assert!(request.covers(date("2024-03-03")));
        assert!(!request.covers(date("2024-03-04")));
        assert_eq!(request.span_days(), 3);
    }

    #[test]
    fn generated_ids_differ() {
        assert_ne!(RequestId::generate(), RequestId::generate());
    }
}
