//! HTTP handlers and the template/flash helpers they share.

use actix_web::HttpResponse;
use actix_web::http::header;
use actix_web_flash_messages::{IncomingFlashMessages, Level};
use tera::{Context, Tera};

use crate::models::auth::AuthenticatedUser;
use crate::projection::{SortDir, SortSpec};

pub mod auth;
pub mod clients;
pub mod tickets;

/// Maps a flash level onto the CSS alert class used by the templates.
pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

/// `303 See Other` to the given location.
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .append_header((header::LOCATION, location.to_string()))
        .finish()
}

/// Context fields every page shares: alerts, the signed-in user, the active
/// nav entry, and the auth-service home link.
pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    user: &AuthenticatedUser,
    current_page: &str,
    home_url: &str,
) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_user", user);
    context.insert("current_page", current_page);
    context.insert("home_url", home_url);
    context
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok().content_type("text/html").body(body),
        Err(e) => {
            log::error!("Failed to render template {template}: {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Builds a sort spec from the `sort`/`dir` query parameters.
pub(crate) fn sort_spec<K: Copy + PartialEq>(
    sort: Option<&str>,
    dir: Option<&str>,
    parse: impl Fn(&str) -> Option<K>,
) -> Option<SortSpec<K>> {
    let key = parse(sort?)?;
    let dir = match dir {
        Some("desc") => SortDir::Desc,
        _ => SortDir::Asc,
    };
    Some(SortSpec { key, dir })
}

/// Direction a column-header link should request next.
pub(crate) fn next_dir<K: Copy + PartialEq>(
    current: Option<SortSpec<K>>,
    key: K,
) -> &'static str {
    match SortSpec::select(current, key).dir {
        SortDir::Asc => "asc",
        SortDir::Desc => "desc",
    }
}
