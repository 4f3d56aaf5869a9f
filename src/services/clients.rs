//! Roster operations: listing projection and duplicate-aware writes.

use crate::domain::client::{Client, NewClient, UpdateClient};
use crate::domain::types::ClientId;
use crate::dto::clients::{ClientRow, ClientSortKey};
use crate::projection::{DEFAULT_PAGE_SIZE, Projection, SortSpec, project};
use crate::repository::{ClientReader, ClientWriter};
use crate::services::{ServiceError, ServiceResult};

/// Listing parameters taken from the roster view's query string.
#[derive(Clone, Debug, Default)]
pub struct ClientListQuery {
    pub q: String,
    pub sort: Option<SortSpec<ClientSortKey>>,
    pub page: usize,
}

/// Fetches the visible roster once and projects it in memory.
pub fn list_clients<R>(repo: &R, query: &ClientListQuery) -> ServiceResult<Projection<ClientRow>>
where
    R: ClientReader + ?Sized,
{
    let rows: Vec<ClientRow> = repo
        .list_clients()?
        .into_iter()
        .map(ClientRow::from)
        .collect();

    Ok(project(
        &rows,
        &query.q,
        query.sort,
        query.page,
        DEFAULT_PAGE_SIZE,
    ))
}

/// The full visible roster, unprojected; feeds select inputs.
pub fn roster<R>(repo: &R) -> ServiceResult<Vec<ClientRow>>
where
    R: ClientReader + ?Sized,
{
    Ok(repo
        .list_clients()?
        .into_iter()
        .map(ClientRow::from)
        .collect())
}

pub fn get_client_by_id<R>(repo: &R, client_id: ClientId) -> ServiceResult<Option<Client>>
where
    R: ClientReader + ?Sized,
{
    Ok(repo.get_client_by_id(client_id)?)
}

/// Creates a client unless another visible client already holds the national
/// id. The partial unique index backs this check up against races.
pub fn create_client<R>(repo: &R, new_client: &NewClient) -> ServiceResult<Client>
where
    R: ClientReader + ClientWriter + ?Sized,
{
    if repo
        .get_client_by_national_id(&new_client.national_id)?
        .is_some()
    {
        return Err(ServiceError::Validation(
            "a client with this national id already exists".to_string(),
        ));
    }

    Ok(repo.create_client(new_client)?)
}

/// Applies updates, rejecting a national id held by a different client.
pub fn update_client<R>(
    repo: &R,
    client_id: ClientId,
    updates: &UpdateClient,
) -> ServiceResult<Client>
where
    R: ClientReader + ClientWriter + ?Sized,
{
    if let Some(existing) = repo.get_client_by_national_id(&updates.national_id)?
        && existing.id != client_id
    {
        return Err(ServiceError::Validation(
            "a client with this national id already exists".to_string(),
        ));
    }

    Ok(repo.update_client(client_id, updates)?)
}

/// Marks the client as deleted; its tickets stay addressable by id.
pub fn delete_client<R>(repo: &R, client_id: ClientId) -> ServiceResult<()>
where
    R: ClientWriter + ?Sized,
{
    Ok(repo.soft_delete_client(client_id)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{NationalId, PersonName, PhoneNumber};
    use crate::repository::mock::MockRepository;

    fn stored_client(id: i32, national_id: &str) -> Client {
        Client {
            id: ClientId::new(id).unwrap(),
            first_name: PersonName::new("Ana").unwrap(),
            last_name: PersonName::new("Perez").unwrap(),
            national_id: NationalId::new(national_id).unwrap(),
            phone: PhoneNumber::new("1122334455").unwrap(),
            is_deleted: false,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }

    #[test]
    fn create_rejects_duplicate_national_id() {
        let mut repo = MockRepository::new();
        repo.expect_get_client_by_national_id()
            .returning(|_| Ok(Some(stored_client(1, "12345678"))));
        repo.expect_create_client().never();

        let new_client = NewClient::try_new("Ana", "Perez", "12345678", "1122334455").unwrap();
        let result = create_client(&repo, &new_client);
        assert!(matches!(result, Err(ServiceError::Validation(_))));
    }

    #[test]
    fn create_passes_when_national_id_is_free() {
        let mut repo = MockRepository::new();
        repo.expect_get_client_by_national_id().returning(|_| Ok(None));
        repo.expect_create_client()
            .times(1)
            .returning(|_| Ok(stored_client(1, "12345678")));

        let new_client = NewClient::try_new("Ana", "Perez", "12345678", "1122334455").unwrap();
        assert!(create_client(&repo, &new_client).is_ok());
    }

    #[test]
    fn update_allows_keeping_own_national_id() {
        let mut repo = MockRepository::new();
        repo.expect_get_client_by_national_id()
            .returning(|_| Ok(Some(stored_client(1, "12345678"))));
        repo.expect_update_client()
            .times(1)
            .returning(|_, _| Ok(stored_client(1, "12345678")));

        let updates = UpdateClient::try_new("Ana", "Perez", "12345678", "1122334455").unwrap();
        assert!(update_client(&repo, ClientId::new(1).unwrap(), &updates).is_ok());
    }

    #[test]
    fn update_rejects_national_id_of_another_client() {
        let mut repo = MockRepository::new();
        repo.expect_get_client_by_national_id()
            .returning(|_| Ok(Some(stored_client(2, "12345678"))));
        repo.expect_update_client().never();

        let updates = UpdateClient::try_new("Ana", "Perez", "12345678", "1122334455").unwrap();
        let result = update_client(&repo, ClientId::new(1).unwrap(), &updates);
        assert!(matches!(result, Err(ServiceError::Validation(_))));
    }

    #[test]
    fn list_projects_the_visible_roster() {
        let mut repo = MockRepository::new();
        repo.expect_list_clients().returning(|| {
            Ok(vec![
                stored_client(1, "12345678"),
                stored_client(2, "87654321"),
            ])
        });

        let query = ClientListQuery {
            q: "8765".to_string(),
            ..Default::default()
        };
        let projection = list_clients(&repo, &query).unwrap();
        assert_eq!(projection.page_items.len(), 1);
        assert_eq!(projection.page_items[0].national_id, "87654321");
    }
}
