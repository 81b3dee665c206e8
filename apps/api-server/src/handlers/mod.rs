//! HTTP handlers and route configuration.

mod health;
mod posts;

use actix_web::{HttpRequest, error, web};

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::QueryConfig::default().error_handler(query_error))
        .app_data(web::PathConfig::default().error_handler(path_error))
        .service(
            web::scope("/api")
                .route("/health", web::get().to(health::health_check))
                .service(
                    web::scope("/posts")
                        .route("", web::get().to(posts::list))
                        .route("", web::post().to(posts::create))
                        // Registered before `/{id}` so "search" is never read as an id.
                        .route("/search", web::get().to(posts::search))
                        .route("/{id}", web::get().to(posts::get_post))
                        .route("/{id}", web::put().to(posts::update))
                        .route("/{id}", web::delete().to(posts::delete)),
                ),
        );
}

fn json_error(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(format!("Invalid JSON body: {err}")).into()
}

fn query_error(err: error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(format!("Invalid query string: {err}")).into()
}

fn path_error(_err: error::PathError, req: &HttpRequest) -> actix_web::Error {
    AppError::NotFound(format!("No post found at {}.", req.path())).into()
}
