//! Monthly calendar of authorized blocks
//!
//! Weeks start on Monday. Each day cell is computed independently through
//! [`events_on_date`], so multi-day blocks appear on every covered day of
//! the displayed month.

use crate::error::CalendarError;
use crate::types::BlockRequest;
use crate::workflow::events_on_date;
use chrono::{Datelike, Months, NaiveDate};
use std::str::FromStr;

/// Column headers, Monday first
pub const WEEKDAY_HEADERS: [&str; 7] = ["Lun", "Mar", "Mié", "Jue", "Vie", "Sáb", "Dom"];

const MONTH_NAMES: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// A displayed month
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthView {
    first: NaiveDate,
}

/// One day of the grid with the blocks covering it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell<'a> {
    /// Calendar day
    pub date: NaiveDate,
    /// Authorized blocks covering the day, in snapshot order
    pub events: Vec<&'a BlockRequest>,
}

impl MonthView {
    /// Create view for `year`/`month` (1-based month)
    ///
    /// # Errors
    /// `CalendarError::InvalidMonth` when the month does not exist.
    pub fn new(year: i32, month: u32) -> Result<Self, CalendarError> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|first| Self { first })
            .ok_or(CalendarError::InvalidMonth { year, month })
    }

    /// Month containing `date`
    #[must_use]
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first: date.with_day(1).unwrap_or(date),
        }
    }

    /// Year
    #[inline]
    #[must_use]
    pub fn year(&self) -> i32 {
        self.first.year()
    }

    /// Month, 1-based
    #[inline]
    #[must_use]
    pub fn month(&self) -> u32 {
        self.first.month()
    }

    /// First day of the month
    #[inline]
    #[must_use]
    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    /// Previous month; saturates at the earliest representable month
    #[must_use]
    pub fn previous(&self) -> Self {
        Self {
            first: self.first.checked_sub_months(Months::new(1)).unwrap_or(self.first),
        }
    }

    /// Next month; saturates at the latest representable month
    #[must_use]
    pub fn next(&self) -> Self {
        Self {
            first: self.first.checked_add_months(Months::new(1)).unwrap_or(self.first),
        }
    }

    /// Number of days in the month
    #[must_use]
    pub fn days_in_month(&self) -> u32 {
        match self.first.checked_add_months(Months::new(1)) {
            Some(next) => u32::try_from((next - self.first).num_days()).unwrap_or(31),
            // December of the last representable year
            None => 31,
        }
    }

    /// Empty cells before day 1 in a Monday-first grid
    #[inline]
    #[must_use]
    pub fn leading_blanks(&self) -> u32 {
        self.first.weekday().num_days_from_monday()
    }

    /// Every day of the month in order
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.first.iter_days().take(self.days_in_month() as usize)
    }

    /// Spanish label, e.g. `marzo de 2024`
    #[must_use]
    pub fn label(&self) -> String {
        let name = MONTH_NAMES[self.first.month0() as usize];
        format!("{name} de {}", self.year())
    }

    /// Day cells for the month over a snapshot
    #[must_use]
    pub fn cells<'a>(&self, snapshot: &'a [BlockRequest]) -> Vec<DayCell<'a>> {
        self.days()
            .map(|date| DayCell {
                date,
                events: events_on_date(snapshot, date),
            })
            .collect()
    }
}

impl std::fmt::Display for MonthView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for MonthView {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CalendarError::InvalidLabel(s.to_string());
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BlockDraft, RequestId, RequestStatus};
    use pretty_assertions::assert_eq;

    fn authorized(start: &str, end: &str) -> BlockRequest {
        let draft = BlockDraft {
            solicitante: "Directora".to_string(),
            professional_name: "EDUARDO BRAVO".to_string(),
            profession: "Químico Farmacéutico".to_string(),
            block_type: "Feriado Legal".to_string(),
            start_date: start.parse().unwrap(),
            end_date: end.parse().unwrap(),
            start_time: BlockDraft::default_start_time(),
            end_time: BlockDraft::default_end_time(),
            comments: None,
        };
        let mut r = BlockRequest::from_draft(draft, RequestId::generate(), 0);
        r.status = RequestStatus::Authorized;
        r
    }

    #[test]
    fn month_geometry() {
        // March 2024 starts on a Friday
        let march = MonthView::new(2024, 3).unwrap();
        assert_eq!(march.days_in_month(), 31);
        assert_eq!(march.leading_blanks(), 4);
        assert_eq!(MonthView::new(2024, 2).unwrap().days_in_month(), 29);
        assert_eq!(MonthView::new(2023, 2).unwrap().days_in_month(), 28);
        // September 2024 starts on a Sunday
        assert_eq!(MonthView::new(2024, 9).unwrap().leading_blanks(), 6);
        // April 2024 starts on a Monday
        assert_eq!(MonthView::new(2024, 4).unwrap().leading_blanks(), 0);
    }

    #[test]
    fn navigation_crosses_years() {
        let january = MonthView::new(2024, 1).unwrap();
        assert_eq!(january.previous(), MonthView::new(2023, 12).unwrap());
        assert_eq!(january.previous().next(), january);
        assert_eq!(MonthView::new(2024, 12).unwrap().next().to_string(), "2025-01");
    }

    #[test]
    fn labels_and_parsing() {
        let view: MonthView = "2024-03".parse().unwrap();
        assert_eq!(view.label(), "marzo de 2024");
        assert_eq!(view.to_string(), "2024-03");
        assert!("2024-13".parse::<MonthView>().is_err());
        assert!("marzo".parse::<MonthView>().is_err());
        assert_eq!(
            MonthView::containing("2024-09-17".parse().unwrap()),
            MonthView::new(2024, 9).unwrap()
        );
    }

    #[test]
    fn cells_fill_each_covered_day() {
        let snapshot = vec![authorized("2024-02-28", "2024-03-02")];
        let cells = MonthView::new(2024, 3).unwrap().cells(&snapshot);

        assert_eq!(cells.len(), 31);
        assert_eq!(cells[0].events.len(), 1);
        assert_eq!(cells[1].events.len(), 1);
        assert!(cells[2].events.is_empty());
        assert_eq!(cells[0].date.to_string(), "2024-03-01");
    }
}
