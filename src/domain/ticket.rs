use std::fmt::Display;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    ClientId, TicketCost, TicketDetail, TicketId, TypeConstraintError,
};

/// Workflow state of a service ticket.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Pending,
    InProgress,
    Done,
}

impl TicketStatus {
    /// Stable string stored in the database.
    pub fn as_str(self) -> &'static str {
        match self {
            TicketStatus::Pending => "pending",
            TicketStatus::InProgress => "in_progress",
            TicketStatus::Done => "done",
        }
    }

    /// Human-readable label shown in tables; also a searchable field.
    pub fn label(self) -> &'static str {
        match self {
            TicketStatus::Pending => "Pending",
            TicketStatus::InProgress => "In progress",
            TicketStatus::Done => "Done",
        }
    }

    /// The status the toggle button moves to: done tickets reopen as
    /// pending, anything else completes.
    pub fn toggled(self) -> Self {
        match self {
            TicketStatus::Done => TicketStatus::Pending,
            _ => TicketStatus::Done,
        }
    }

    pub fn parse(s: &str) -> Result<Self, TypeConstraintError> {
        match s {
            "pending" => Ok(TicketStatus::Pending),
            "in_progress" => Ok(TicketStatus::InProgress),
            "done" => Ok(TicketStatus::Done),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown ticket status: {other}"
            ))),
        }
    }
}

impl Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A repair job tied to one client. Soft-deleted via `is_deleted`, same
/// convention as [`crate::domain::client::Client`].
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ServiceTicket {
    pub id: TicketId,
    pub client_id: ClientId,
    pub intake_date: NaiveDate,
    pub estimated_date: Option<NaiveDate>,
    pub detail: TicketDetail,
    pub cost: TicketCost,
    pub invoice_number: Option<String>,
    pub status: TicketStatus,
    pub is_deleted: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewTicket {
    pub client_id: ClientId,
    /// Fixed at creation time; not editable afterwards.
    pub intake_date: NaiveDate,
    pub estimated_date: Option<NaiveDate>,
    pub detail: TicketDetail,
    pub cost: TicketCost,
    pub invoice_number: Option<String>,
    pub status: TicketStatus,
}

impl NewTicket {
    pub fn try_new(
        client_id: ClientId,
        intake_date: NaiveDate,
        estimated_date: Option<NaiveDate>,
        detail: &str,
        cost: &str,
        invoice_number: Option<String>,
    ) -> Result<Self, TypeConstraintError> {
        Ok(Self {
            client_id,
            intake_date,
            estimated_date,
            detail: TicketDetail::new(detail)?,
            cost: TicketCost::new(cost)?,
            invoice_number: invoice_number
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            status: TicketStatus::Pending,
        })
    }
}

/// Editable fields of an existing ticket. The intake date is deliberately
/// absent.
#[derive(Clone, Debug)]
pub struct UpdateTicket {
    pub estimated_date: Option<NaiveDate>,
    pub detail: TicketDetail,
    pub cost: TicketCost,
    pub invoice_number: Option<String>,
    pub status: TicketStatus,
}

impl UpdateTicket {
    pub fn try_new(
        estimated_date: Option<NaiveDate>,
        detail: &str,
        cost: &str,
        invoice_number: Option<String>,
        status: TicketStatus,
    ) -> Result<Self, TypeConstraintError> {
        Ok(Self {
            estimated_date,
            detail: TicketDetail::new(detail)?,
            cost: TicketCost::new(cost)?,
            invoice_number: invoice_number
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            status,
        })
    }
}
