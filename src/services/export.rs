//! Ticket export: shareable summary text, WhatsApp link, and PDF rendering.

use genpdf::{Element, elements, style};

use crate::domain::client::Client;
use crate::domain::ticket::ServiceTicket;
use crate::services::{ServiceError, ServiceResult};

/// Plain-text summary shared with the client.
pub fn ticket_summary(ticket: &ServiceTicket, client: &Client) -> String {
    let estimated = ticket
        .estimated_date
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string());
    let invoice = ticket.invoice_number.as_deref().unwrap_or("-");

    format!(
        "Service ticket #{id}\n\
         Client: {name}\n\
         Received: {intake}\n\
         Estimated: {estimated}\n\
         Detail: {detail}\n\
         Cost: {cost}\n\
         Invoice: {invoice}\n\
         Status: {status}",
        id = ticket.id,
        name = client.full_name(),
        intake = ticket.intake_date.format("%Y-%m-%d"),
        estimated = estimated,
        detail = ticket.detail,
        cost = ticket.cost,
        invoice = invoice,
        status = ticket.status.label(),
    )
}

/// `wa.me` link opening a chat with the client, the summary pre-filled.
pub fn whatsapp_link(phone: &crate::domain::types::PhoneNumber, text: &str) -> String {
    format!("https://wa.me/{}?text={}", phone.as_str(), percent_encode(text))
}

/// Percent-encodes everything outside the RFC 3986 unreserved set, which is
/// what `wa.me` expects in the `text` parameter.
fn percent_encode(text: &str) -> String {
    let mut encoded = String::with_capacity(text.len() * 3);
    for byte in text.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                encoded.push(byte as char)
            }
            other => {
                encoded.push('%');
                encoded.push_str(&format!("{other:02X}"));
            }
        }
    }
    encoded
}

/// Renders the ticket as a one-page PDF receipt.
///
/// `fonts_dir` must contain the four `LiberationSans-*.ttf` faces.
pub fn ticket_pdf(
    ticket: &ServiceTicket,
    client: &Client,
    fonts_dir: &str,
) -> ServiceResult<Vec<u8>> {
    let font_family = genpdf::fonts::from_files(fonts_dir, "LiberationSans", None)
        .map_err(|e| ServiceError::Rendering(format!("failed to load fonts: {e}")))?;

    let mut doc = genpdf::Document::new(font_family);
    doc.set_title(format!("Service ticket #{}", ticket.id));
    let mut decorator = genpdf::SimplePageDecorator::new();
    decorator.set_margins(10);
    doc.set_page_decorator(decorator);

    doc.push(
        elements::Paragraph::new(format!("Service ticket #{}", ticket.id))
            .styled(style::Style::new().bold().with_font_size(18)),
    );
    doc.push(elements::Break::new(1.5));

    let label_style = style::Style::new().bold();
    let mut table = elements::TableLayout::new(vec![1, 3]);
    table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

    let rows: Vec<(&str, String)> = vec![
        ("Client", client.full_name()),
        ("National id", client.national_id.to_string()),
        ("Phone", client.phone.to_string()),
        ("Received", ticket.intake_date.format("%Y-%m-%d").to_string()),
        (
            "Estimated",
            ticket
                .estimated_date
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "-".to_string()),
        ),
        ("Detail", ticket.detail.to_string()),
        ("Cost", ticket.cost.to_string()),
        (
            "Invoice",
            ticket
                .invoice_number
                .clone()
                .unwrap_or_else(|| "-".to_string()),
        ),
        ("Status", ticket.status.label().to_string()),
    ];

    for (label, value) in rows {
        table
            .row()
            .element(elements::Paragraph::new(label).styled(label_style))
            .element(elements::Paragraph::new(value))
            .push()
            .map_err(|e| ServiceError::Rendering(format!("failed to build table: {e}")))?;
    }

    doc.push(table);

    let mut buffer = Vec::new();
    doc.render(&mut buffer)
        .map_err(|e| ServiceError::Rendering(format!("failed to render pdf: {e}")))?;

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ticket::TicketStatus;
    use crate::domain::types::{
        ClientId, NationalId, PersonName, PhoneNumber, TicketCost, TicketDetail, TicketId,
    };
    use chrono::NaiveDate;

    fn client() -> Client {
        Client {
            id: ClientId::new(7).unwrap(),
            first_name: PersonName::new("Ana").unwrap(),
            last_name: PersonName::new("Perez").unwrap(),
            national_id: NationalId::new("12345678").unwrap(),
            phone: PhoneNumber::new("1122334455").unwrap(),
            is_deleted: false,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }

    fn ticket() -> ServiceTicket {
        ServiceTicket {
            id: TicketId::new(3).unwrap(),
            client_id: ClientId::new(7).unwrap(),
            intake_date: NaiveDate::from_ymd_opt(2026, 8, 20).unwrap(),
            estimated_date: None,
            detail: TicketDetail::new("broken hinge").unwrap(),
            cost: TicketCost::new("1500").unwrap(),
            invoice_number: Some("F-001".to_string()),
            status: TicketStatus::Pending,
            is_deleted: false,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }

    #[test]
    fn summary_lists_every_field() {
        let summary = ticket_summary(&ticket(), &client());
        assert!(summary.contains("Service ticket #3"));
        assert!(summary.contains("Ana Perez"));
        assert!(summary.contains("Received: 2026-08-20"));
        assert!(summary.contains("Estimated: -"));
        assert!(summary.contains("F-001"));
        assert!(summary.contains("Pending"));
    }

    #[test]
    fn whatsapp_link_targets_the_client_phone() {
        let link = whatsapp_link(&client().phone, "hello world");
        assert_eq!(link, "https://wa.me/1122334455?text=hello%20world");
    }

    #[test]
    fn percent_encoding_keeps_unreserved_characters() {
        assert_eq!(percent_encode("abc-123_~."), "abc-123_~.");
        assert_eq!(percent_encode("a b\nc"), "a%20b%0Ac");
        assert_eq!(percent_encode("#Ñ"), "%23%C3%91");
    }
}
