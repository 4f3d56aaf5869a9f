//! Flattened ticket rows for the workshop board.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::Serialize;

use crate::derivation::{Classification, Urgency, classify};
use crate::domain::client::Client;
use crate::domain::ticket::ServiceTicket;
use crate::projection::{Projectable, contains_ci};

/// Columns the ticket board can be sorted by.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TicketSortKey {
    IntakeDate,
    EstimatedDate,
}

impl TicketSortKey {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "intake_date" => Some(TicketSortKey::IntakeDate),
            "estimated_date" => Some(TicketSortKey::EstimatedDate),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TicketSortKey::IntakeDate => "intake_date",
            TicketSortKey::EstimatedDate => "estimated_date",
        }
    }
}

/// One board row: the ticket joined with its client plus the derived urgency
/// for the reference day it was built on.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct TicketRow {
    pub id: i32,
    pub client_id: i32,
    pub client_name: String,
    pub national_id: String,
    pub phone: String,
    pub intake_date: NaiveDate,
    pub estimated_date: Option<NaiveDate>,
    pub detail: String,
    pub cost: String,
    pub invoice_number: Option<String>,
    pub status: String,
    pub status_label: String,
    /// `None` when the ticket has no estimated date and is not done.
    pub urgency: Option<Urgency>,
    /// Cell text for the days-remaining column.
    pub days_label: String,
    pub whatsapp_url: String,
}

impl TicketRow {
    pub fn new(ticket: ServiceTicket, client: Client, today: NaiveDate, whatsapp_url: String) -> Self {
        let urgency = match ticket.estimated_date {
            Some(date) => Some(classify(date, ticket.status, today)),
            // A completed ticket shows as done even without an estimate.
            None if ticket.status == crate::domain::ticket::TicketStatus::Done => Some(Urgency {
                days: None,
                class: Classification::Done,
            }),
            None => None,
        };
        let days_label = urgency
            .as_ref()
            .map(Urgency::summary)
            .unwrap_or_else(|| "-".to_string());

        Self {
            id: ticket.id.get(),
            client_id: client.id.get(),
            client_name: client.full_name(),
            national_id: client.national_id.into_inner(),
            phone: client.phone.into_inner(),
            intake_date: ticket.intake_date,
            estimated_date: ticket.estimated_date,
            detail: ticket.detail.into_inner(),
            cost: ticket.cost.into_inner(),
            invoice_number: ticket.invoice_number,
            status: ticket.status.as_str().to_string(),
            status_label: ticket.status.label().to_string(),
            urgency,
            days_label,
            whatsapp_url,
        }
    }
}

impl Projectable for TicketRow {
    type SortKey = TicketSortKey;

    fn matches(&self, needle: &str) -> bool {
        contains_ci(&self.detail, needle)
            || contains_ci(&self.client_name, needle)
            || contains_ci(&self.national_id, needle)
            || contains_ci(&self.status_label, needle)
    }

    fn cmp_by(&self, other: &Self, key: TicketSortKey) -> Ordering {
        match key {
            TicketSortKey::IntakeDate => self.intake_date.cmp(&other.intake_date),
            // Tickets without an estimate sort before every dated one.
            TicketSortKey::EstimatedDate => self.estimated_date.cmp(&other.estimated_date),
        }
    }
}
