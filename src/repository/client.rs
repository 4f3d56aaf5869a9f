use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::client::{Client, NewClient, UpdateClient};
use crate::domain::types::{ClientId, NationalId};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{ClientReader, ClientWriter};

/// Diesel implementation of [`ClientReader`] and [`ClientWriter`].
pub struct DieselClientRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> DieselClientRepository<'a> {
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }
}

impl ClientReader for DieselClientRepository<'_> {
    fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>> {
        use crate::models::client::Client as DbClient;
        use crate::schema::clients;

        let mut conn = self.pool.get()?;
        let client = clients::table
            .find(id.get())
            .first::<DbClient>(&mut conn)
            .optional()?;

        client
            .map(|c| Client::try_from(c).map_err(RepositoryError::from))
            .transpose()
    }

    fn get_client_by_national_id(
        &self,
        national_id: &NationalId,
    ) -> RepositoryResult<Option<Client>> {
        use crate::models::client::Client as DbClient;
        use crate::schema::clients;

        let mut conn = self.pool.get()?;
        let client = clients::table
            .filter(clients::national_id.eq(national_id.as_str()))
            .filter(clients::is_deleted.eq(false))
            .first::<DbClient>(&mut conn)
            .optional()?;

        client
            .map(|c| Client::try_from(c).map_err(RepositoryError::from))
            .transpose()
    }

    fn list_clients(&self) -> RepositoryResult<Vec<Client>> {
        use crate::models::client::Client as DbClient;
        use crate::schema::clients;

        let mut conn = self.pool.get()?;
        clients::table
            .filter(clients::is_deleted.eq(false))
            .order(clients::created_at.desc())
            .load::<DbClient>(&mut conn)?
            .into_iter()
            .map(|c| Client::try_from(c).map_err(RepositoryError::from))
            .collect()
    }
}

impl ClientWriter for DieselClientRepository<'_> {
    fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client> {
        use crate::models::client::NewClient as DbNewClient;
        use crate::schema::clients;

        let mut conn = self.pool.get()?;
        let insertable: DbNewClient = new_client.into();
        let created = diesel::insert_into(clients::table)
            .values(&insertable)
            .get_result::<crate::models::client::Client>(&mut conn)?;

        Client::try_from(created).map_err(RepositoryError::from)
    }

    fn update_client(&self, client_id: ClientId, updates: &UpdateClient) -> RepositoryResult<Client> {
        use crate::models::client::{Client as DbClient, UpdateClient as DbUpdateClient};
        use crate::schema::clients;

        let mut conn = self.pool.get()?;
        let db_updates: DbUpdateClient = updates.into();
        let updated = diesel::update(clients::table.find(client_id.get()))
            .set(&db_updates)
            .get_result::<DbClient>(&mut conn)?;

        Client::try_from(updated).map_err(RepositoryError::from)
    }

    fn soft_delete_client(&self, client_id: ClientId) -> RepositoryResult<()> {
        use crate::schema::clients;

        let mut conn = self.pool.get()?;
        let affected = diesel::update(clients::table.find(client_id.get()))
            .set(clients::is_deleted.eq(true))
            .execute(&mut conn)?;

        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
