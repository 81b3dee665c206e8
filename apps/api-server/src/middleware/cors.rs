//! CORS layer for the configured origin.

use actix_cors::Cors;
use actix_web::http::header;

const ALLOWED_METHODS: [&str; 5] = ["GET", "POST", "PUT", "DELETE", "OPTIONS"];
const PREFLIGHT_MAX_AGE_SECS: usize = 86400;

/// Build the CORS middleware. `*` allows any origin and answers with a wildcard.
///
/// Called once per worker; `origin` is checked by `AppConfig`.
pub fn cors(origin: &str) -> Cors {
    let cors = Cors::default()
        .allowed_methods(ALLOWED_METHODS)
        .allowed_header(header::CONTENT_TYPE)
        .max_age(PREFLIGHT_MAX_AGE_SECS);

    if origin == "*" {
        cors.allow_any_origin().send_wildcard()
    } else {
        cors.allowed_origin(origin)
    }
}
