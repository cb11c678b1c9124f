//! HTTP handlers and route configuration.

mod comments;
mod health;
mod movies;
mod posts;

use actix_web::web;

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // Malformed bodies get the same problem-details shape as every other error
    let json = web::JsonConfig::default().error_handler(|err, _req| {
        AppError::BadRequest(err.to_string()).into()
    });

    cfg.app_data(json).service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/movies")
                    .route("/search", web::get().to(movies::search))
                    .route("/{id}", web::get().to(movies::details)),
            )
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::list))
                    .route("", web::post().to(posts::create))
                    .route("/{id}", web::get().to(posts::detail))
                    .route("/{id}", web::put().to(posts::update))
                    .route("/{id}", web::delete().to(posts::delete))
                    .route("/{id}/upvote", web::post().to(posts::upvote))
                    .route("/{id}/unlock", web::post().to(posts::unlock))
                    .route("/{id}/comments", web::post().to(comments::add_comment)),
            ),
    );
}
