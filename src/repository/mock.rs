//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::client::{Client, NewClient, UpdateClient};
use crate::domain::ticket::{NewTicket, ServiceTicket, TicketStatus, UpdateTicket};
use crate::domain::types::{ClientId, NationalId, TicketId};
use crate::repository::errors::RepositoryResult;
use crate::repository::{ClientReader, ClientWriter, TicketReader, TicketWithClient, TicketWriter};

mock! {
    pub Repository {}

    impl ClientReader for Repository {
        fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>>;
        fn get_client_by_national_id(
            &self,
            national_id: &NationalId,
        ) -> RepositoryResult<Option<Client>>;
        fn list_clients(&self) -> RepositoryResult<Vec<Client>>;
    }

    impl ClientWriter for Repository {
        fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client>;
        fn update_client(
            &self,
            client_id: ClientId,
            updates: &UpdateClient,
        ) -> RepositoryResult<Client>;
        fn soft_delete_client(&self, client_id: ClientId) -> RepositoryResult<()>;
    }

    impl TicketReader for Repository {
        fn get_ticket_by_id(&self, id: TicketId) -> RepositoryResult<Option<TicketWithClient>>;
        fn list_tickets(&self) -> RepositoryResult<Vec<TicketWithClient>>;
    }

    impl TicketWriter for Repository {
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
}
