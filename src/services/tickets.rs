//! Ticket board operations.

use chrono::NaiveDate;

use crate::domain::client::Client;
use crate::domain::ticket::{NewTicket, ServiceTicket, TicketStatus, UpdateTicket};
use crate::domain::types::TicketId;
use crate::dto::tickets::{TicketRow, TicketSortKey};
use crate::projection::{DEFAULT_PAGE_SIZE, Projection, SortSpec, project};
use crate::repository::{ClientReader, TicketReader, TicketWriter};
use crate::services::export::{ticket_summary, whatsapp_link};
use crate::services::{ServiceError, ServiceResult};

/// Listing parameters taken from the board view's query string.
#[derive(Clone, Debug, Default)]
pub struct TicketBoardQuery {
    pub q: String,
    pub status: Option<TicketStatus>,
    /// Matched against the `YYYY-MM-DD` intake date, so "2026-08" narrows
    /// to a month and a full date to a single day.
    pub date_prefix: String,
    pub sort: Option<SortSpec<TicketSortKey>>,
    pub page: usize,
}

/// Fetches the visible tickets once, narrows by the structured filters, then
/// projects the remainder in memory. `today` anchors the urgency derivation.
pub fn list_tickets<R>(
    repo: &R,
    query: &TicketBoardQuery,
    today: NaiveDate,
) -> ServiceResult<Projection<TicketRow>>
where
    R: TicketReader + ?Sized,
{
    let rows: Vec<TicketRow> = repo
        .list_tickets()?
        .into_iter()
        .filter(|(ticket, _)| query.status.is_none_or(|status| ticket.status == status))
        .filter(|(ticket, _)| {
            query.date_prefix.is_empty()
                || ticket
                    .intake_date
                    .format("%Y-%m-%d")
                    .to_string()
                    .starts_with(&query.date_prefix)
        })
        .map(|(ticket, client)| {
            let link = whatsapp_link(&client.phone, &ticket_summary(&ticket, &client));
            TicketRow::new(ticket, client, today, link)
        })
        .collect();

    Ok(project(
        &rows,
        &query.q,
        query.sort,
        query.page,
        DEFAULT_PAGE_SIZE,
    ))
}

pub fn get_ticket_by_id<R>(
    repo: &R,
    ticket_id: TicketId,
) -> ServiceResult<Option<(ServiceTicket, Client)>>
where
    R: TicketReader + ?Sized,
{
    Ok(repo.get_ticket_by_id(ticket_id)?)
}

/// Creates a ticket for an existing, non-deleted client.
pub fn create_ticket<C, T>(
    clients: &C,
    tickets: &T,
    new_ticket: &NewTicket,
) -> ServiceResult<ServiceTicket>
where
    C: ClientReader + ?Sized,
    T: TicketWriter + ?Sized,
{
    match clients.get_client_by_id(new_ticket.client_id)? {
        Some(client) if !client.is_deleted => {}
        _ => {
            return Err(ServiceError::Validation(
                "ticket must belong to an existing client".to_string(),
            ));
        }
    }

    Ok(tickets.create_ticket(new_ticket)?)
}

pub fn update_ticket<R>(
    repo: &R,
    ticket_id: TicketId,
    updates: &UpdateTicket,
) -> ServiceResult<ServiceTicket>
where
    R: TicketWriter + ?Sized,
{
    Ok(repo.update_ticket(ticket_id, updates)?)
}

/// Flips the status: done reopens as pending, anything else completes.
pub fn toggle_ticket_status<R>(repo: &R, ticket_id: TicketId) -> ServiceResult<ServiceTicket>
where
    R: TicketReader + TicketWriter + ?Sized,
{
    let (ticket, _) = repo
        .get_ticket_by_id(ticket_id)?
        .ok_or(ServiceError::NotFound)?;

    Ok(repo.set_ticket_status(ticket_id, ticket.status.toggled())?)
}

pub fn delete_ticket<R>(repo: &R, ticket_id: TicketId) -> ServiceResult<()>
where
    R: TicketWriter + ?Sized,
{
    Ok(repo.soft_delete_ticket(ticket_id)?)
}
