//! HTTP handlers and route configuration.

mod health;
mod posts;

use actix_web::web;

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // Extractor failures answer with problem details like every other error
    let json_config = web::JsonConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into());
    let query_config = web::QueryConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into());

    cfg.app_data(json_config).app_data(query_config).service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/posts")
                    .service(
                        web::resource("")
                            .route(web::get().to(posts::list_posts))
                            .route(web::post().to(posts::create_post)),
                    )
                    .service(
                        web::resource("/{id}")
                            .name(posts::POST_RESOURCE)
                            .route(web::get().to(posts::get_post))
                            .route(web::put().to(posts::replace_post))
                            .route(web::delete().to(posts::delete_post)),
                    ),
            ),
    );
}
