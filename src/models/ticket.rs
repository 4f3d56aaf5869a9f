//! Diesel models for service tickets.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::ticket::{
    NewTicket as DomainNewTicket, ServiceTicket as DomainTicket, TicketStatus,
    UpdateTicket as DomainUpdateTicket,
};
use crate::domain::types::{ClientId, TicketCost, TicketDetail, TicketId, TypeConstraintError};
use crate::models::client::Client;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(belongs_to(Client, foreign_key = client_id))]
#[diesel(table_name = crate::schema::service_tickets)]
pub struct ServiceTicket {
    pub id: i32,
    pub client_id: i32,
    pub intake_date: NaiveDate,
    pub estimated_date: Option<NaiveDate>,
    pub detail: String,
    pub cost: String,
    pub invoice_number: Option<String>,
    pub status: String,
    pub is_deleted: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::service_tickets)]
pub struct NewTicket<'a> {
    pub client_id: i32,
    pub intake_date: NaiveDate,
    pub estimated_date: Option<NaiveDate>,
    pub detail: &'a str,
    pub cost: &'a str,
    pub invoice_number: Option<&'a str>,
    pub status: &'a str,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::service_tickets)]
// Clearing the estimated date or the invoice number writes NULL instead of
// skipping the column.
#[diesel(treat_none_as_null = true)]
pub struct UpdateTicket<'a> {
    pub estimated_date: Option<NaiveDate>,
    pub detail: &'a str,
    pub cost: &'a str,
    pub invoice_number: Option<&'a str>,
    pub status: &'a str,
}

impl TryFrom<ServiceTicket> for DomainTicket {
    type Error = TypeConstraintError;

    fn try_from(ticket: ServiceTicket) -> Result<Self, Self::Error> {
        Ok(Self {
            id: TicketId::new(ticket.id)?,
            client_id: ClientId::new(ticket.client_id)?,
            intake_date: ticket.intake_date,
            estimated_date: ticket.estimated_date,
            detail: TicketDetail::new(ticket.detail)?,
            cost: TicketCost::new(ticket.cost)?,
            invoice_number: ticket.invoice_number,
            status: TicketStatus::parse(&ticket.status)?,
            is_deleted: ticket.is_deleted,
            created_at: ticket.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewTicket> for NewTicket<'a> {
    fn from(ticket: &'a DomainNewTicket) -> Self {
        Self {
            client_id: ticket.client_id.get(),
            intake_date: ticket.intake_date,
            estimated_date: ticket.estimated_date,
            detail: ticket.detail.as_str(),
            cost: ticket.cost.as_str(),
            invoice_number: ticket.invoice_number.as_deref(),
            status: ticket.status.as_str(),
        }
    }
}

impl<'a> From<&'a DomainUpdateTicket> for UpdateTicket<'a> {
    fn from(ticket: &'a DomainUpdateTicket) -> Self {
        Self {
            estimated_date: ticket.estimated_date,
            detail: ticket.detail.as_str(),
            cost: ticket.cost.as_str(),
            invoice_number: ticket.invoice_number.as_deref(),
            status: ticket.status.as_str(),
        }
    }
}
