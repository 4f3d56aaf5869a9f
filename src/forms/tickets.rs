use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::derivation::{parse_date, parse_optional_date};
use crate::domain::ticket::{NewTicket, TicketStatus, UpdateTicket};
use crate::domain::types::ClientId;
use crate::services::{ServiceError, ServiceResult};

#[derive(Deserialize, Validate)]
/// Form data for opening a new service ticket.
pub struct AddTicketForm {
    pub client_id: i32,
    /// `YYYY-MM-DD`; blank means today.
    #[serde(default)]
    pub intake_date: String,
    /// `YYYY-MM-DD`, may be left blank.
    #[serde(default)]
    pub estimated_date: String,
    #[validate(length(min = 1))]
    pub detail: String,
    #[validate(length(min = 1))]
    pub cost: String,
    #[serde(default)]
    pub invoice_number: String,
}

impl AddTicketForm {
    pub fn into_new_ticket(&self, today: NaiveDate) -> ServiceResult<NewTicket> {
        let client_id = ClientId::new(self.client_id)?;
        let intake_date = match self.intake_date.trim() {
            "" => today,
            value => parse_date(value)?,
        };
        let estimated_date = parse_optional_date(&self.estimated_date)?;
        let invoice = Some(self.invoice_number.clone()).filter(|s| !s.trim().is_empty());

        Ok(NewTicket::try_new(
            client_id,
            intake_date,
            estimated_date,
            &self.detail,
            &self.cost,
            invoice,
        )?)
    }
}

#[derive(Deserialize, Validate)]
/// Form data for editing a ticket. The intake date is not editable.
pub struct SaveTicketForm {
    pub id: i32,
    #[serde(default)]
    pub estimated_date: String,
    #[validate(length(min = 1))]
    pub detail: String,
    #[validate(length(min = 1))]
    pub cost: String,
    #[serde(default)]
    pub invoice_number: String,
    pub status: String,
}

impl SaveTicketForm {
    pub fn into_update_ticket(&self) -> ServiceResult<UpdateTicket> {
        let estimated_date = parse_optional_date(&self.estimated_date)?;
        let status = TicketStatus::parse(&self.status)
            .map_err(|e| ServiceError::Validation(e.to_string()))?;
        let invoice = Some(self.invoice_number.clone()).filter(|s| !s.trim().is_empty());

        Ok(UpdateTicket::try_new(
            estimated_date,
            &self.detail,
            &self.cost,
            invoice,
            status,
        )?)
    }
}

#[derive(Deserialize)]
/// Form data for the status toggle button.
pub struct ToggleTicketForm {
    pub id: i32,
}

#[derive(Deserialize)]
/// Form data for soft-deleting a ticket.
pub struct DeleteTicketForm {
    pub id: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 22).unwrap()
    }

    fn add_form() -> AddTicketForm {
        AddTicketForm {
            client_id: 1,
            intake_date: "2026-08-20".to_string(),
            estimated_date: String::new(),
            detail: "broken hinge".to_string(),
            cost: "1500".to_string(),
            invoice_number: String::new(),
        }
    }

    #[test]
    fn add_form_parses_dates_and_starts_pending() {
        let ticket = add_form().into_new_ticket(today()).unwrap();
        assert_eq!(
            ticket.intake_date,
            NaiveDate::from_ymd_opt(2026, 8, 20).unwrap()
        );
        assert_eq!(ticket.estimated_date, None);
        assert_eq!(ticket.status, TicketStatus::Pending);
        assert_eq!(ticket.invoice_number, None);
    }

    #[test]
    fn blank_intake_date_defaults_to_today() {
        let mut form = add_form();
        form.intake_date = String::new();
        let ticket = form.into_new_ticket(today()).unwrap();
        assert_eq!(ticket.intake_date, today());
    }

    #[test]
    fn add_form_rejects_malformed_dates() {
        let mut form = add_form();
        form.intake_date = "20/08/2026".to_string();
        assert!(matches!(
            form.into_new_ticket(today()),
            Err(ServiceError::Validation(_))
        ));
    }

    #[test]
    fn save_form_rejects_unknown_status() {
        let form = SaveTicketForm {
            id: 1,
            estimated_date: String::new(),
            detail: "broken hinge".to_string(),
            cost: "1500".to_string(),
            invoice_number: String::new(),
            status: "archived".to_string(),
        };
        assert!(form.into_update_ticket().is_err());
    }

    #[test]
    fn save_form_keeps_blank_estimate_as_none() {
        let form = SaveTicketForm {
            id: 1,
            estimated_date: "  ".to_string(),
            detail: "broken hinge".to_string(),
            cost: "1500".to_string(),
            invoice_number: "F-001".to_string(),
            status: "in_progress".to_string(),
        };
        let updates = form.into_update_ticket().unwrap();
        assert_eq!(updates.estimated_date, None);
        assert_eq!(updates.invoice_number, Some("F-001".to_string()));
        assert_eq!(updates.status, TicketStatus::InProgress);
    }
}
