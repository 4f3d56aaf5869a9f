use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::client::Client;
use crate::domain::ticket::{NewTicket, ServiceTicket, TicketStatus, UpdateTicket};
use crate::domain::types::TicketId;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{TicketReader, TicketWithClient, TicketWriter};

/// Diesel implementation of [`TicketReader`] and [`TicketWriter`].
pub struct DieselTicketRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> DieselTicketRepository<'a> {
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }
}

fn into_domain_pair(
    ticket: crate::models::ticket::ServiceTicket,
    client: crate::models::client::Client,
) -> RepositoryResult<TicketWithClient> {
    let ticket = ServiceTicket::try_from(ticket).map_err(RepositoryError::from)?;
    let client = Client::try_from(client).map_err(RepositoryError::from)?;
    Ok((ticket, client))
}

impl TicketReader for DieselTicketRepository<'_> {
    fn get_ticket_by_id(&self, id: TicketId) -> RepositoryResult<Option<TicketWithClient>> {
        use crate::models::client::Client as DbClient;
        use crate::models::ticket::ServiceTicket as DbTicket;
        use crate::schema::{clients, service_tickets};

        let mut conn = self.pool.get()?;
        let row = service_tickets::table
            .inner_join(clients::table)
            .filter(service_tickets::id.eq(id.get()))
            .select((DbTicket::as_select(), DbClient::as_select()))
            .first::<(DbTicket, DbClient)>(&mut conn)
            .optional()?;

        row.map(|(ticket, client)| into_domain_pair(ticket, client))
            .transpose()
    }

    fn list_tickets(&self) -> RepositoryResult<Vec<TicketWithClient>> {
        use crate::models::client::Client as DbClient;
        use crate::models::ticket::ServiceTicket as DbTicket;
        use crate::schema::{clients, service_tickets};

        let mut conn = self.pool.get()?;
        service_tickets::table
            .inner_join(clients::table)
            .filter(service_tickets::is_deleted.eq(false))
            .order(service_tickets::intake_date.desc())
            .select((DbTicket::as_select(), DbClient::as_select()))
            .load::<(DbTicket, DbClient)>(&mut conn)?
            .into_iter()
            .map(|(ticket, client)| into_domain_pair(ticket, client))
            .collect()
    }
}

impl TicketWriter for DieselTicketRepository<'_> {
    fn create_ticket(&self, new_ticket: &NewTicket) -> RepositoryResult<ServiceTicket> {
        use crate::models::ticket::{NewTicket as DbNewTicket, ServiceTicket as DbTicket};
        use crate::schema::service_tickets;

        let mut conn = self.pool.get()?;
        let insertable: DbNewTicket = new_ticket.into();
        let created = diesel::insert_into(service_tickets::table)
            .values(&insertable)
            .get_result::<DbTicket>(&mut conn)?;

        ServiceTicket::try_from(created).map_err(RepositoryError::from)
    }

    fn update_ticket(
        &self,
        ticket_id: TicketId,
        updates: &UpdateTicket,
    ) -> RepositoryResult<ServiceTicket> {
        use crate::models::ticket::{ServiceTicket as DbTicket, UpdateTicket as DbUpdateTicket};
        use crate::schema::service_tickets;

        let mut conn = self.pool.get()?;
        let db_updates: DbUpdateTicket = updates.into();
        let updated = diesel::update(service_tickets::table.find(ticket_id.get()))
            .set(&db_updates)
            .get_result::<DbTicket>(&mut conn)?;

        ServiceTicket::try_from(updated).map_err(RepositoryError::from)
    }

    fn set_ticket_status(
        &self,
        ticket_id: TicketId,
        status: TicketStatus,
    ) -> RepositoryResult<ServiceTicket> {
        use crate::models::ticket::ServiceTicket as DbTicket;
        use crate::schema::service_tickets;

        let mut conn = self.pool.get()?;
        let updated = diesel::update(service_tickets::table.find(ticket_id.get()))
            .set(service_tickets::status.eq(status.as_str()))
            .get_result::<DbTicket>(&mut conn)?;

        ServiceTicket::try_from(updated).map_err(RepositoryError::from)
    }

    fn soft_delete_ticket(&self, ticket_id: TicketId) -> RepositoryResult<()> {
        use crate::schema::service_tickets;

        let mut conn = self.pool.get()?;
        let affected = diesel::update(service_tickets::table.find(ticket_id.get()))
            .set(service_tickets::is_deleted.eq(true))
            .execute(&mut conn)?;

        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
