//! Sign-in hand-off and logout. Credentials are handled entirely by the
//! external auth service; this app only consumes the identity cookie it sets.

use actix_identity::Identity;
use actix_web::{Responder, get, post, web};

use crate::models::config::ServerConfig;
use crate::routes::redirect;

#[get("/auth/signin")]
pub async fn signin(server_config: web::Data<ServerConfig>) -> impl Responder {
    redirect(&server_config.auth_service_url)
}

#[post("/logout")]
pub async fn logout(user: Identity) -> impl Responder {
    user.logout();
    redirect("/")
}
