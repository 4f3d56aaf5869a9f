use actix_web::http::header::ContentDisposition;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use chrono::Local;
use log::error;
use serde::Deserialize;
use tera::Tera;
use validator::Validate;

use crate::db::DbPool;
use crate::domain::ticket::TicketStatus;
use crate::domain::types::TicketId;
use crate::dto::tickets::TicketSortKey;
use crate::forms::tickets::{AddTicketForm, DeleteTicketForm, SaveTicketForm, ToggleTicketForm};
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::pagination::Paginated;
use crate::repository::client::DieselClientRepository;
use crate::repository::ticket::DieselTicketRepository;
use crate::routes::{base_context, next_dir, redirect, render_template, sort_spec};
use crate::services::tickets::TicketBoardQuery;
use crate::services::{ServiceError, clients as client_services, export, tickets as services};

#[derive(Deserialize)]
struct BoardQueryParams {
    q: Option<String>,
    page: Option<usize>,
    sort: Option<String>,
    dir: Option<String>,
    status: Option<String>,
    date: Option<String>,
}

#[get("/")]
pub async fn show_board(
    params: web::Query<BoardQueryParams>,
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let q = params.q.as_deref().unwrap_or("").trim().to_string();
    let status = params
        .status
        .as_deref()
        .and_then(|s| TicketStatus::parse(s).ok());
    let date_prefix = params.date.as_deref().unwrap_or("").trim().to_string();
    let sort = sort_spec(
        params.sort.as_deref(),
        params.dir.as_deref(),
        TicketSortKey::parse,
    );

    let query = TicketBoardQuery {
        q: q.clone(),
        status,
        date_prefix: date_prefix.clone(),
        sort,
        page: params.page.unwrap_or(1),
    };

    let repo = DieselTicketRepository::new(&pool);
    let today = Local::now().date_naive();
    let tickets = match services::list_tickets(&repo, &query, today) {
        Ok(projection) => Paginated::from(projection),
        Err(e) => {
            error!("Failed to list tickets: {e}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    // The add-ticket form needs the full visible roster for its client select.
    let client_repo = DieselClientRepository::new(&pool);
    let roster = match client_services::roster(&client_repo) {
        Ok(roster) => roster,
        Err(e) => {
            error!("Failed to list clients: {e}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let mut context = base_context(
        &flash_messages,
        &user,
        "index",
        &server_config.auth_service_url,
    );
    context.insert("tickets", &tickets);
    context.insert("search_query", &q);
    context.insert("status_filter", &params.status.as_deref().unwrap_or(""));
    context.insert("date_filter", &date_prefix);
    context.insert("sort", &params.sort.as_deref().unwrap_or(""));
    context.insert("dir", &params.dir.as_deref().unwrap_or(""));
    context.insert(
        "next_dir_intake",
        next_dir(sort, TicketSortKey::IntakeDate),
    );
    context.insert(
        "next_dir_estimated",
        next_dir(sort, TicketSortKey::EstimatedDate),
    );
    context.insert("clients", &roster);

    render_template(&tera, "tickets/index.html", &context)
}

#[post("/ticket/add")]
pub async fn add_ticket(
    _user: AuthenticatedUser,
    pool: web::Data<DbPool>,
    web::Form(form): web::Form<AddTicketForm>,
) -> impl Responder {
    if let Err(e) = form.validate() {
        error!("Failed to validate form: {e}");
        FlashMessage::error("Invalid ticket form").send();
        return redirect("/");
    }

    let new_ticket = match form.into_new_ticket(Local::now().date_naive()) {
        Ok(new_ticket) => new_ticket,
        Err(e) => {
            FlashMessage::error(format!("Invalid ticket: {e}")).send();
            return redirect("/");
        }
    };

    let client_repo = DieselClientRepository::new(&pool);
    let ticket_repo = DieselTicketRepository::new(&pool);
    match services::create_ticket(&client_repo, &ticket_repo, &new_ticket) {
        Ok(_) => {
            FlashMessage::success("Ticket created.".to_string()).send();
        }
        Err(ServiceError::Validation(e)) => {
            FlashMessage::error(e).send();
        }
        Err(e) => {
            error!("Failed to create ticket: {e}");
            FlashMessage::error("Failed to create ticket").send();
        }
    }

    redirect("/")
}

#[post("/ticket/save")]
pub async fn save_ticket(
    _user: AuthenticatedUser,
    pool: web::Data<DbPool>,
    web::Form(form): web::Form<SaveTicketForm>,
) -> impl Responder {
    if let Err(e) = form.validate() {
        error!("Failed to validate form: {e}");
        FlashMessage::error("Invalid ticket form").send();
        return redirect("/");
    }

    let ticket_id = match TicketId::new(form.id) {
        Ok(id) => id,
        Err(e) => {
            FlashMessage::error(format!("Invalid ticket: {e}")).send();
            return redirect("/");
        }
    };
    let updates = match form.into_update_ticket() {
        Ok(updates) => updates,
        Err(e) => {
            FlashMessage::error(format!("Invalid ticket: {e}")).send();
            return redirect("/");
        }
    };

    let repo = DieselTicketRepository::new(&pool);
    match services::update_ticket(&repo, ticket_id, &updates) {
        Ok(_) => {
            FlashMessage::success("Ticket updated.".to_string()).send();
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Ticket not found.").send();
        }
        Err(e) => {
            error!("Failed to update ticket: {e}");
            FlashMessage::error("Failed to update ticket").send();
        }
    }

    redirect("/")
}

#[post("/ticket/status")]
pub async fn toggle_ticket_status(
    _user: AuthenticatedUser,
    pool: web::Data<DbPool>,
    web::Form(form): web::Form<ToggleTicketForm>,
) -> impl Responder {
    let ticket_id = match TicketId::new(form.id) {
        Ok(id) => id,
        Err(e) => {
            FlashMessage::error(format!("Invalid ticket: {e}")).send();
            return redirect("/");
        }
    };

    let repo = DieselTicketRepository::new(&pool);
    match services::toggle_ticket_status(&repo, ticket_id) {
        Ok(ticket) => {
            FlashMessage::success(format!("Ticket marked {}.", ticket.status.label())).send();
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Ticket not found.").send();
        }
        Err(e) => {
            error!("Failed to toggle ticket status: {e}");
            FlashMessage::error("Failed to update ticket").send();
        }
    }

    redirect("/")
}

#[post("/ticket/delete")]
pub async fn delete_ticket(
    _user: AuthenticatedUser,
    pool: web::Data<DbPool>,
    web::Form(form): web::Form<DeleteTicketForm>,
) -> impl Responder {
    let ticket_id = match TicketId::new(form.id) {
        Ok(id) => id,
        Err(e) => {
            FlashMessage::error(format!("Invalid ticket: {e}")).send();
            return redirect("/");
        }
    };

    let repo = DieselTicketRepository::new(&pool);
    match services::delete_ticket(&repo, ticket_id) {
        Ok(()) => {
            FlashMessage::success("Ticket removed.".to_string()).send();
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Ticket not found.").send();
        }
        Err(e) => {
            error!("Failed to delete ticket: {e}");
            FlashMessage::error("Failed to remove ticket").send();
        }
    }

    redirect("/")
}

#[get("/ticket/{ticket_id}/export")]
pub async fn export_ticket(
    ticket_id: web::Path<i32>,
    _user: AuthenticatedUser,
    pool: web::Data<DbPool>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let ticket_id = match TicketId::new(ticket_id.into_inner()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::NotFound().finish(),
    };

    let repo = DieselTicketRepository::new(&pool);
    let (ticket, client) = match services::get_ticket_by_id(&repo, ticket_id) {
        Ok(Some(pair)) => pair,
        Ok(None) => return HttpResponse::NotFound().finish(),
        Err(e) => {
            error!("Failed to load ticket: {e}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    match export::ticket_pdf(&ticket, &client, &server_config.pdf_fonts_dir) {
        Ok(bytes) => HttpResponse::Ok()
            .content_type("application/pdf")
            .insert_header(ContentDisposition::attachment(format!(
                "ticket-{}.pdf",
                ticket.id
            )))
            .body(bytes),
        Err(e) => {
            error!("Failed to render ticket pdf: {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
