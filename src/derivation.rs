//! Urgency derivation for service tickets.
//!
//! A ticket's classification is a pure function of its estimated-completion
//! date, its status, and the reference day. Both operands are calendar dates
//! (`chrono::NaiveDate`), so the subtraction is in whole days and cannot be
//! skewed by time of day. `today` is always passed in by the caller; nothing
//! here reads the clock.

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use crate::domain::ticket::TicketStatus;

/// Tickets due within this many days are flagged urgent.
pub const URGENT_WINDOW_DAYS: i64 = 3;

/// Raised when a date field cannot be parsed instead of letting a garbage
/// value silently classify as normal.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid date: {0:?}")]
pub struct InvalidDate(pub String);

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Done,
    Overdue,
    Urgent,
    Normal,
}

impl Classification {
    pub fn as_str(self) -> &'static str {
        match self {
            Classification::Done => "done",
            Classification::Overdue => "overdue",
            Classification::Urgent => "urgent",
            Classification::Normal => "normal",
        }
    }
}

/// Derived display state of a ticket.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub struct Urgency {
    /// Whole days until the estimated date; negative when overdue, `None`
    /// for completed tickets.
    pub days: Option<i64>,
    pub class: Classification,
}

impl Urgency {
    /// Cell text for the days-remaining column.
    pub fn summary(&self) -> String {
        match (self.class, self.days) {
            (Classification::Done, _) => "Done".to_string(),
            (_, Some(days)) if days < 0 => format!("Overdue ({} days)", -days),
            (_, Some(days)) => format!("{days} days"),
            // Unreachable for values built by `classify`, but total anyway.
            (_, None) => "-".to_string(),
        }
    }
}

/// Classifies a ticket by its estimated-completion date.
///
/// Completed tickets never show urgency, whatever their dates say. Everything
/// else is bucketed by the signed day count: negative is overdue, within
/// [`URGENT_WINDOW_DAYS`] is urgent, beyond that is normal.
pub fn classify(estimated_date: NaiveDate, status: TicketStatus, today: NaiveDate) -> Urgency {
    if status == TicketStatus::Done {
        return Urgency {
            days: None,
            class: Classification::Done,
        };
    }

    let days = (estimated_date - today).num_days();
    let class = if days < 0 {
        Classification::Overdue
    } else if days <= URGENT_WINDOW_DAYS {
        Classification::Urgent
    } else {
        Classification::Normal
    };

    Urgency {
        days: Some(days),
        class,
    }
}

/// Parses a `YYYY-MM-DD` date field.
pub fn parse_date(value: &str) -> Result<NaiveDate, InvalidDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| InvalidDate(value.to_string()))
}

/// Parses an optional date field; an empty string is `None`, not an error.
pub fn parse_optional_date(value: &str) -> Result<Option<NaiveDate>, InvalidDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    parse_date(trimmed).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 20).unwrap()
    }

    #[test]
    fn done_tickets_never_show_urgency() {
        for offset in [-30, -1, 0, 3, 30] {
            let date = today() + Duration::days(offset);
            let urgency = classify(date, TicketStatus::Done, today());
            assert_eq!(urgency.days, None);
            assert_eq!(urgency.class, Classification::Done);
        }
    }

    #[test]
    fn three_days_out_is_urgent_four_is_normal() {
        let urgent = classify(today() + Duration::days(3), TicketStatus::Pending, today());
        assert_eq!(urgent.class, Classification::Urgent);
        assert_eq!(urgent.days, Some(3));

        let normal = classify(today() + Duration::days(4), TicketStatus::Pending, today());
        assert_eq!(normal.class, Classification::Normal);
        assert_eq!(normal.days, Some(4));
    }

    #[test]
    fn yesterday_is_overdue() {
        let urgency = classify(today() - Duration::days(1), TicketStatus::InProgress, today());
        assert_eq!(urgency.class, Classification::Overdue);
        assert_eq!(urgency.days, Some(-1));
    }

    #[test]
    fn due_today_is_urgent_not_overdue() {
        // The day-boundary case: a ticket due today reports zero days,
        // never a negative count.
        let urgency = classify(today(), TicketStatus::Pending, today());
        assert_eq!(urgency.days, Some(0));
        assert_eq!(urgency.class, Classification::Urgent);
    }

    #[test]
    fn summary_formats_each_bucket() {
        assert_eq!(
            classify(today(), TicketStatus::Done, today()).summary(),
            "Done"
        );
        assert_eq!(
            classify(today() - Duration::days(2), TicketStatus::Pending, today()).summary(),
            "Overdue (2 days)"
        );
        assert_eq!(
            classify(today() + Duration::days(5), TicketStatus::Pending, today()).summary(),
            "5 days"
        );
    }

    #[test]
    fn malformed_dates_are_rejected_not_classified() {
        assert!(parse_date("not-a-date").is_err());
        assert!(parse_date("2026-13-40").is_err());
        assert_eq!(parse_date("2026-08-20").unwrap(), today());
    }

    #[test]
    fn optional_date_treats_empty_as_none() {
        assert_eq!(parse_optional_date("").unwrap(), None);
        assert_eq!(parse_optional_date("  ").unwrap(), None);
        assert_eq!(parse_optional_date("2026-08-20").unwrap(), Some(today()));
        assert!(parse_optional_date("garbage").is_err());
    }
}
