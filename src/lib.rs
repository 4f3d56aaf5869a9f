use actix_cors::Cors;
use actix_files::Files;
use actix_identity::IdentityMiddleware;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::{App, HttpServer, middleware as actix_middleware, web};
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
use tera::Tera;

use crate::db::establish_connection_pool;
use crate::middleware::RedirectUnauthorized;
use crate::models::config::ServerConfig;
use crate::routes::auth::{logout, signin};
use crate::routes::clients::{add_client, delete_client, save_client, show_clients};
use crate::routes::tickets::{
    add_ticket, delete_ticket, export_ticket, save_ticket, show_board, toggle_ticket_status,
};

pub mod db;
pub mod derivation;
pub mod domain;
pub mod dto;
pub mod forms;
pub mod middleware;
pub mod models;
pub mod pagination;
pub mod projection;
pub mod repository;
pub mod routes;
pub mod schema;
pub mod services;

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    // Establish Diesel connection pool for the SQLite database.
    let pool = establish_connection_pool(&server_config.database_url).map_err(|e| {
        std::io::Error::other(format!("Failed to establish database connection: {e}"))
    })?;

    // Keys and stores for identity, sessions, and flash messages.
    let secret_key = Key::from(server_config.secret.as_bytes());

    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let tera = Tera::new(&server_config.templates_dir)
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

    let bind_address = (server_config.address.clone(), server_config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(message_framework.clone())
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .cookie_domain(Some(format!(".{}", server_config.domain)))
                    .build(),
            )
            .wrap(actix_middleware::Compress::default())
            .wrap(actix_middleware::Logger::default())
            .service(Files::new("/assets", "./assets"))
            .service(signin)
            .service(
                web::scope("")
                    .wrap(RedirectUnauthorized)
                    .service(show_board)
                    .service(add_ticket)
                    .service(save_ticket)
                    .service(toggle_ticket_status)
                    .service(delete_ticket)
                    .service(export_ticket)
                    .service(show_clients)
                    .service(add_client)
                    .service(save_client)
                    .service(delete_client)
                    .service(logout),
            )
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
