use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use log::error;
use serde::Deserialize;
use tera::Tera;
use validator::Validate;

use crate::db::DbPool;
use crate::domain::client::{NewClient, UpdateClient};
use crate::domain::types::ClientId;
use crate::dto::clients::ClientSortKey;
use crate::forms::clients::{AddClientForm, DeleteClientForm, SaveClientForm};
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::pagination::Paginated;
use crate::repository::client::DieselClientRepository;
use crate::routes::{base_context, next_dir, redirect, render_template, sort_spec};
use crate::services::clients::ClientListQuery;
use crate::services::{ServiceError, clients as services};

#[derive(Deserialize)]
struct RosterQueryParams {
    q: Option<String>,
    page: Option<usize>,
    sort: Option<String>,
    dir: Option<String>,
}

#[get("/clients")]
pub async fn show_clients(
    params: web::Query<RosterQueryParams>,
    user: AuthenticatedUser,
    pool: web::Data<DbPool>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let q = params.q.as_deref().unwrap_or("").trim().to_string();
    let sort = sort_spec(
        params.sort.as_deref(),
        params.dir.as_deref(),
        ClientSortKey::parse,
    );

    let query = ClientListQuery {
        q: q.clone(),
        sort,
        page: params.page.unwrap_or(1),
    };

    let repo = DieselClientRepository::new(&pool);
    let clients = match services::list_clients(&repo, &query) {
        Ok(projection) => Paginated::from(projection),
        Err(e) => {
            error!("Failed to list clients: {e}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let mut context = base_context(
        &flash_messages,
        &user,
        "clients",
        &server_config.auth_service_url,
    );
    context.insert("clients", &clients);
    context.insert("search_query", &q);
    context.insert("sort", &params.sort.as_deref().unwrap_or(""));
    context.insert("dir", &params.dir.as_deref().unwrap_or(""));
    context.insert("next_dir_first_name", next_dir(sort, ClientSortKey::FirstName));
    context.insert("next_dir_last_name", next_dir(sort, ClientSortKey::LastName));
    context.insert(
        "next_dir_national_id",
        next_dir(sort, ClientSortKey::NationalId),
    );

    render_template(&tera, "clients/index.html", &context)
}

#[post("/client/add")]
pub async fn add_client(
    _user: AuthenticatedUser,
    pool: web::Data<DbPool>,
    web::Form(form): web::Form<AddClientForm>,
) -> impl Responder {
    if let Err(e) = form.validate() {
        error!("Failed to validate form: {e}");
        FlashMessage::error("Invalid client form").send();
        return redirect("/clients");
    }

    let new_client = match NewClient::try_from(&form) {
        Ok(new_client) => new_client,
        Err(e) => {
            FlashMessage::error(format!("Invalid client: {e}")).send();
            return redirect("/clients");
        }
    };

    let repo = DieselClientRepository::new(&pool);
    match services::create_client(&repo, &new_client) {
        Ok(_) => {
            FlashMessage::success("Client added.".to_string()).send();
        }
        Err(ServiceError::Validation(e)) => {
            FlashMessage::error(e).send();
        }
        Err(e) => {
            error!("Failed to add client: {e}");
            FlashMessage::error("Failed to add client").send();
        }
    }

    redirect("/clients")
}

#[post("/client/save")]
pub async fn save_client(
    _user: AuthenticatedUser,
    pool: web::Data<DbPool>,
    web::Form(form): web::Form<SaveClientForm>,
) -> impl Responder {
    if let Err(e) = form.validate() {
        error!("Failed to validate form: {e}");
        FlashMessage::error("Invalid client form").send();
        return redirect("/clients");
    }

    let client_id = match ClientId::new(form.id) {
        Ok(id) => id,
        Err(e) => {
            FlashMessage::error(format!("Invalid client: {e}")).send();
            return redirect("/clients");
        }
    };
    let updates = match UpdateClient::try_from(&form) {
        Ok(updates) => updates,
        Err(e) => {
            FlashMessage::error(format!("Invalid client: {e}")).send();
            return redirect("/clients");
        }
    };

    let repo = DieselClientRepository::new(&pool);
    match services::update_client(&repo, client_id, &updates) {
        Ok(_) => {
            FlashMessage::success("Client updated.".to_string()).send();
        }
        Err(ServiceError::Validation(e)) => {
            FlashMessage::error(e).send();
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Client not found.").send();
        }
        Err(e) => {
            error!("Failed to update client: {e}");
            FlashMessage::error("Failed to update client").send();
        }
    }

    redirect("/clients")
}

#[post("/client/delete")]
pub async fn delete_client(
    _user: AuthenticatedUser,
    pool: web::Data<DbPool>,
    web::Form(form): web::Form<DeleteClientForm>,
) -> impl Responder {
    let client_id = match ClientId::new(form.id) {
        Ok(id) => id,
        Err(e) => {
            FlashMessage::error(format!("Invalid client: {e}")).send();
            return redirect("/clients");
        }
    };

    let repo = DieselClientRepository::new(&pool);
    match services::delete_client(&repo, client_id) {
        Ok(()) => {
            FlashMessage::success("Client removed.".to_string()).send();
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Client not found.").send();
        }
        Err(e) => {
            error!("Failed to delete client: {e}");
            FlashMessage::error("Failed to remove client").send();
        }
    }

    redirect("/clients")
}
