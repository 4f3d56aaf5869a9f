use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::client::{
    Client as DomainClient, NewClient as DomainNewClient, UpdateClient as DomainUpdateClient,
};
use crate::domain::types::{ClientId, NationalId, PersonName, PhoneNumber, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::clients)]
/// Diesel model for [`crate::domain::client::Client`].
pub struct Client {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub national_id: String,
    pub phone: String,
    pub is_deleted: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::clients)]
/// Insertable form of [`Client`].
pub struct NewClient<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub national_id: &'a str,
    pub phone: &'a str,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::clients)]
/// Data used when updating a [`Client`] record.
pub struct UpdateClient<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub national_id: &'a str,
    pub phone: &'a str,
}

impl TryFrom<Client> for DomainClient {
    type Error = TypeConstraintError;

    fn try_from(client: Client) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ClientId::new(client.id)?,
            first_name: PersonName::new(client.first_name)?,
            last_name: PersonName::new(client.last_name)?,
            national_id: NationalId::new(client.national_id)?,
            phone: PhoneNumber::new(client.phone)?,
            is_deleted: client.is_deleted,
            created_at: client.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewClient> for NewClient<'a> {
    fn from(client: &'a DomainNewClient) -> Self {
        Self {
            first_name: client.first_name.as_str(),
            last_name: client.last_name.as_str(),
            national_id: client.national_id.as_str(),
            phone: client.phone.as_str(),
        }
    }
}

impl<'a> From<&'a DomainUpdateClient> for UpdateClient<'a> {
    fn from(client: &'a DomainUpdateClient) -> Self {
        Self {
            first_name: client.first_name.as_str(),
            last_name: client.last_name.as_str(),
            national_id: client.national_id.as_str(),
            phone: client.phone.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn from_domain_new_creates_newclient() {
        let domain = DomainNewClient::try_new("Ana", "Perez", "12345678", "1122334455").unwrap();
        let new: NewClient = (&domain).into();
        assert_eq!(new.first_name, "Ana");
        assert_eq!(new.last_name, "Perez");
        assert_eq!(new.national_id, "12345678");
        assert_eq!(new.phone, "1122334455");
    }

    #[test]
    fn db_client_into_domain() {
        let db_client = Client {
            id: 1,
            first_name: "Ana".to_string(),
            last_name: "Perez".to_string(),
            national_id: "12345678".to_string(),
            phone: "1122334455".to_string(),
            is_deleted: false,
            created_at: Utc::now().naive_utc(),
        };
        let domain = DomainClient::try_from(db_client).unwrap();
        assert_eq!(domain.id.get(), 1);
        assert_eq!(domain.full_name(), "Ana Perez");
        assert!(!domain.is_deleted);
    }

    #[test]
    fn corrupt_rows_fail_conversion() {
        let db_client = Client {
            id: 1,
            first_name: "Ana".to_string(),
            last_name: "Perez".to_string(),
            national_id: "not-digits".to_string(),
            phone: "1122334455".to_string(),
            is_deleted: false,
            created_at: Utc::now().naive_utc(),
        };
        assert!(DomainClient::try_from(db_client).is_err());
    }
}
