use serde::Deserialize;
use validator::Validate;

use crate::domain::client::{NewClient, UpdateClient};
use crate::domain::types::TypeConstraintError;

#[derive(Deserialize, Validate)]
/// Form data for adding a client to the roster.
pub struct AddClientForm {
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
    /// National identity document number, digits only.
    #[validate(length(min = 7, max = 10))]
    pub national_id: String,
    /// Contact phone, digits only.
    #[validate(length(min = 8, max = 15))]
    pub phone: String,
}

impl TryFrom<&AddClientForm> for NewClient {
    type Error = TypeConstraintError;

    fn try_from(form: &AddClientForm) -> Result<Self, Self::Error> {
        NewClient::try_new(
            &form.first_name,
            &form.last_name,
            &form.national_id,
            &form.phone,
        )
    }
}

#[derive(Deserialize, Validate)]
/// Form data for updating an existing client.
pub struct SaveClientForm {
    pub id: i32,
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
    #[validate(length(min = 7, max = 10))]
    pub national_id: String,
    #[validate(length(min = 8, max = 15))]
    pub phone: String,
}

impl TryFrom<&SaveClientForm> for UpdateClient {
    type Error = TypeConstraintError;

    fn try_from(form: &SaveClientForm) -> Result<Self, Self::Error> {
        UpdateClient::try_new(
            &form.first_name,
            &form.last_name,
            &form.national_id,
            &form.phone,
        )
    }
}

#[derive(Deserialize)]
/// Form data for soft-deleting a client.
pub struct DeleteClientForm {
    pub id: i32,
}
