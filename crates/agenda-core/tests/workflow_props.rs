//! Property tests for the derived workflow views and CSV export

use agenda_core::csv::{to_csv, HEADERS};
use agenda_core::prelude::*;
use chrono::{Duration, NaiveDate, Utc};
use proptest::prelude::*;

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn status_strategy() -> impl Strategy<Value = RequestStatus> {
    prop_oneof![
        Just(RequestStatus::Pending),
        Just(RequestStatus::Authorized),
        Just(RequestStatus::Rejected),
    ]
}

fn request_strategy() -> impl Strategy<Value = BlockRequest> {
    (
        0i64..365,
        0i64..15,
        status_strategy(),
        "[A-Za-z ,\"]{1,20}",
        "[A-Za-z ,\"]{0,20}",
    )
        .prop_map(|(offset, len, status, solicitante, professional)| {
            let start = base_date() + Duration::days(offset);
            let draft = BlockDraft {
                solicitante,
                professional_name: professional,
                profession: "Médico".to_string(),
                block_type: "Feriado Legal".to_string(),
                start_date: start,
                end_date: start + Duration::days(len),
                start_time: BlockDraft::default_start_time(),
                end_time: BlockDraft::default_end_time(),
                comments: None,
            };
            let mut request = BlockRequest::from_draft(draft, RequestId::generate(), 0);
            request.status = status;
            request
        })
}

/// Split one CSV line (no embedded line breaks) honoring quotes
fn split_quoted(line: &str) -> Vec<String> {
    let mut fields = vec![String::new()];
    let mut quoted = false;
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        match (c, quoted) {
            ('"', true) if chars.peek() == Some(&'"') => {
                chars.next();
                fields.last_mut().unwrap().push('"');
            }
            ('"', _) => quoted = !quoted,
            (',', false) => fields.push(String::new()),
            (c, _) => fields.last_mut().unwrap().push(c),
        }
    }
    fields
}

proptest! {
    #[test]
    fn prop_filter_all_is_identity(snapshot in prop::collection::vec(request_strategy(), 0..20)) {
        let filtered: Vec<BlockRequest> = filter_by_status(&snapshot, StatusFilter::All)
            .into_iter()
            .cloned()
            .collect();
        prop_assert_eq!(filtered, snapshot);
    }

    #[test]
    fn prop_filter_only_keeps_matching(
        snapshot in prop::collection::vec(request_strategy(), 0..20),
        status in status_strategy(),
    ) {
        let filtered = filter_by_status(&snapshot, StatusFilter::Only(status));
        prop_assert!(filtered.iter().all(|r| r.status == status));
        prop_assert_eq!(
            filtered.len(),
            snapshot.iter().filter(|r| r.status == status).count()
        );
    }

    #[test]
    fn prop_events_are_authorized_and_covering(
        snapshot in prop::collection::vec(request_strategy(), 0..20),
        offset in 0i64..380,
    ) {
        let date = base_date() + Duration::days(offset);
        let events = events_on_date(&snapshot, date);
        for event in &events {
            prop_assert_eq!(event.status, RequestStatus::Authorized);
            prop_assert!(event.start_date <= date && date <= event.end_date);
        }
        let expected = snapshot
            .iter()
            .filter(|r| r.status == RequestStatus::Authorized && r.covers(date))
            .count();
        prop_assert_eq!(events.len(), expected);
    }

    #[test]
    fn prop_csv_columns_are_stable(snapshot in prop::collection::vec(request_strategy(), 0..20)) {
        let csv = to_csv(&snapshot, &Utc);
        let lines: Vec<&str> = csv.lines().collect();
        prop_assert_eq!(lines.len(), snapshot.len() + 1);

        for (line, request) in lines.iter().skip(1).zip(&snapshot) {
            let fields = split_quoted(line);
            prop_assert_eq!(fields.len(), HEADERS.len());
            prop_assert_eq!(&fields[0], request.id.as_str());
            prop_assert_eq!(&fields[2], &request.solicitante);
            prop_assert_eq!(&fields[3], &request.professional_name);
            prop_assert_eq!(&fields[10], request.status.label());
        }
    }
}

#[test]
fn inclusive_range_membership() {
    let draft = BlockDraft {
        solicitante: "Directora".to_string(),
        professional_name: "ANA TORRES".to_string(),
        profession: "Enfermero/a".to_string(),
        block_type: "Feriado Legal".to_string(),
        start_date: "2024-03-01".parse().unwrap(),
        end_date: "2024-03-03".parse().unwrap(),
        start_time: BlockDraft::default_start_time(),
        end_time: BlockDraft::default_end_time(),
        comments: None,
    };
    let mut request = BlockRequest::from_draft(draft, RequestId::generate(), 0);
    request.status = RequestStatus::Authorized;
    let snapshot = vec![request];

    for day in ["2024-03-01", "2024-03-02", "2024-03-03"] {
        assert_eq!(events_on_date(&snapshot, day.parse().unwrap()).len(), 1, "{day}");
    }
    for day in ["2024-02-29", "2024-03-04"] {
        assert!(events_on_date(&snapshot, day.parse().unwrap()).is_empty(), "{day}");
    }
}
