use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{ClientId, NationalId, PersonName, PhoneNumber, TypeConstraintError};

/// A person on the shop's roster. Rows are never physically removed;
/// `is_deleted` marks them as excluded from every listing.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Client {
    pub id: ClientId,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub national_id: NationalId,
    pub phone: PhoneNumber,
    pub is_deleted: bool,
    pub created_at: NaiveDateTime,
}

impl Client {
    /// Full display name used in listings and reports.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewClient {
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub national_id: NationalId,
    pub phone: PhoneNumber,
}

impl NewClient {
    /// Validates every field at the boundary; an invalid record cannot be
    /// constructed.
    pub fn try_new(
        first_name: &str,
        last_name: &str,
        national_id: &str,
        phone: &str,
    ) -> Result<Self, TypeConstraintError> {
        Ok(Self {
            first_name: PersonName::new(first_name)?,
            last_name: PersonName::new(last_name)?,
            national_id: NationalId::new(national_id)?,
            phone: PhoneNumber::new(phone)?,
        })
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct UpdateClient {
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub national_id: NationalId,
    pub phone: PhoneNumber,
}

impl UpdateClient {
    pub fn try_new(
        first_name: &str,
        last_name: &str,
        national_id: &str,
        phone: &str,
    ) -> Result<Self, TypeConstraintError> {
        Ok(Self {
            first_name: PersonName::new(first_name)?,
            last_name: PersonName::new(last_name)?,
            national_id: NationalId::new(national_id)?,
            phone: PhoneNumber::new(phone)?,
        })
    }
}
