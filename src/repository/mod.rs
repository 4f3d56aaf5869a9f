//! Persistence seams consumed by the service layer.
//!
//! Listing operations return full snapshots of the rows that are still
//! visible (`is_deleted = false`); filtering, sorting, and pagination happen
//! in memory afterwards. Deletion is always the soft kind: the exclusion
//! flag is set and the row stays addressable by id.

use crate::domain::client::{Client, NewClient, UpdateClient};
use crate::domain::ticket::{NewTicket, ServiceTicket, TicketStatus, UpdateTicket};
use crate::domain::types::{ClientId, NationalId, TicketId};
use crate::repository::errors::RepositoryResult;

pub mod client;
pub mod errors;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod ticket;

/// A ticket joined with its owning client, the shape every listing view
/// works with.
pub type TicketWithClient = (ServiceTicket, Client);

pub trait ClientReader {
    /// Fetch by id, including soft-deleted rows; they stay addressable.
    fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>>;
    /// Lookup among visible rows only; backs the duplicate national-ID check.
    fn get_client_by_national_id(&self, national_id: &NationalId)
    -> RepositoryResult<Option<Client>>;
    /// Snapshot of every visible client, newest first.
    fn list_clients(&self) -> RepositoryResult<Vec<Client>>;
}

pub trait ClientWriter {
    fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client>;
    fn update_client(&self, client_id: ClientId, updates: &UpdateClient)
    -> RepositoryResult<Client>;
    fn soft_delete_client(&self, client_id: ClientId) -> RepositoryResult<()>;
}

pub trait TicketReader {
    fn get_ticket_by_id(&self, id: TicketId) -> RepositoryResult<Option<TicketWithClient>>;
    /// Snapshot of every visible ticket with its owning client.
    fn list_tickets(&self) -> RepositoryResult<Vec<TicketWithClient>>;
}

pub trait TicketWriter {
    fn create_ticket(&self, new_ticket: &NewTicket) -> RepositoryResult<ServiceTicket>;
    fn update_ticket(
        &self,
        ticket_id: TicketId,
        updates: &UpdateTicket,
    ) -> RepositoryResult<ServiceTicket>;
    fn set_ticket_status(
        &self,
        ticket_id: TicketId,
        status: TicketStatus,
    ) -> RepositoryResult<ServiceTicket>;
    fn soft_delete_ticket(&self, ticket_id: TicketId) -> RepositoryResult<()>;
}
