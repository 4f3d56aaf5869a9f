//! Flattened client rows for the roster listing.

use std::cmp::Ordering;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::client::Client;
use crate::projection::{Projectable, contains_ci};

/// Columns the roster table can be sorted by.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ClientSortKey {
    FirstName,
    LastName,
    NationalId,
}

impl ClientSortKey {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "first_name" => Some(ClientSortKey::FirstName),
            "last_name" => Some(ClientSortKey::LastName),
            "national_id" => Some(ClientSortKey::NationalId),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ClientSortKey::FirstName => "first_name",
            ClientSortKey::LastName => "last_name",
            ClientSortKey::NationalId => "national_id",
        }
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ClientRow {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub national_id: String,
    pub phone: String,
    pub created_at: NaiveDateTime,
}

impl From<Client> for ClientRow {
    fn from(client: Client) -> Self {
        let full_name = client.full_name();
        Self {
            id: client.id.get(),
            first_name: client.first_name.into_inner(),
            last_name: client.last_name.into_inner(),
            full_name,
            national_id: client.national_id.into_inner(),
            phone: client.phone.into_inner(),
            created_at: client.created_at,
        }
    }
}

impl Projectable for ClientRow {
    type SortKey = ClientSortKey;

    fn matches(&self, needle: &str) -> bool {
        contains_ci(&self.first_name, needle)
            || contains_ci(&self.last_name, needle)
            || contains_ci(&self.national_id, needle)
            || contains_ci(&self.phone, needle)
    }

    fn cmp_by(&self, other: &Self, key: ClientSortKey) -> Ordering {
        match key {
            ClientSortKey::FirstName => self.first_name.cmp(&other.first_name),
            ClientSortKey::LastName => self.last_name.cmp(&other.last_name),
            ClientSortKey::NationalId => self.national_id.cmp(&other.national_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{ClientId, NationalId, PersonName, PhoneNumber};

    fn row(first: &str, last: &str, national_id: &str) -> ClientRow {
        Client {
            id: ClientId::new(1).unwrap(),
            first_name: PersonName::new(first).unwrap(),
            last_name: PersonName::new(last).unwrap(),
            national_id: NationalId::new(national_id).unwrap(),
            phone: PhoneNumber::new("1122334455").unwrap(),
            is_deleted: false,
            created_at: chrono::Utc::now().naive_utc(),
        }
        .into()
    }

    #[test]
    fn matches_name_and_national_id_case_insensitively() {
        let row = row("Ana", "Perez", "12345678");
        assert!(row.matches("perez"));
        assert!(row.matches("234"));
        assert!(!row.matches("gomez"));
    }

    #[test]
    fn sort_key_strings_round_trip() {
        for key in [
            ClientSortKey::FirstName,
            ClientSortKey::LastName,
            ClientSortKey::NationalId,
        ] {
            assert_eq!(ClientSortKey::parse(key.as_str()), Some(key));
        }
        assert_eq!(ClientSortKey::parse("phone"), None);
    }
}
