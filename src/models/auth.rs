//! Authenticated user claims carried in the identity cookie.

use actix_identity::Identity;
use actix_web::dev::Payload;
use actix_web::error::ErrorUnauthorized;
use actix_web::{Error, FromRequest, HttpRequest, web};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::domain::session::SessionStatus;
use crate::models::config::ServerConfig;

/// JWT claims issued by the external auth service. Extracting this type in a
/// handler is what makes the route require a signed-in user.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Subject, the auth service's user id.
    pub sub: String,
    pub email: String,
    pub name: String,
    /// Expiration timestamp (seconds since epoch), checked on decode.
    pub exp: usize,
}

impl AuthenticatedUser {
    pub fn from_jwt(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        let decoded = decode::<AuthenticatedUser>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(decoded.claims)
    }

    pub fn to_jwt(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }
}

/// Resolves the per-request session state from the identity cookie.
///
/// A missing cookie is a plain "no session". A cookie that cannot be read or
/// whose token does not verify resolves to unauthenticated as well, via the
/// fail-closed folding in [`SessionStatus::resolve`].
fn resolve_session(req: &HttpRequest, payload: &mut Payload) -> SessionStatus<AuthenticatedUser> {
    let Some(config) = req.app_data::<web::Data<ServerConfig>>() else {
        return SessionStatus::resolve(Err::<Option<AuthenticatedUser>, _>(
            "server config is not registered",
        ));
    };

    let check = match Identity::from_request(req, payload).into_inner() {
        Ok(identity) => identity
            .id()
            .map_err(|e| e.to_string())
            .and_then(|token| {
                AuthenticatedUser::from_jwt(&token, &config.secret).map_err(|e| e.to_string())
            })
            .map(Some),
        // No identity attached to the session.
        Err(_) => Ok(None),
    };

    SessionStatus::resolve(check)
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = std::future::Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let result = match resolve_session(req, payload) {
            SessionStatus::Authenticated(user) => Ok(user),
            _ => Err(ErrorUnauthorized("Unauthorized")),
        };
        std::future::ready(result)
    }
}
