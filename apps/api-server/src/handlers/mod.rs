//! HTTP handlers and route configuration.

mod health;
mod posts;

use actix_web::web;

use crate::middleware::error::json_error_handler;

/// JSON body extractor settings shared by all routes.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .service(
                web::resource("/posts/")
                    .route(web::get().to(posts::list))
                    .route(web::post().to(posts::create)),
            )
            .service(
                web::resource("/posts/{slug}/")
                    .route(web::get().to(posts::retrieve))
                    .route(web::put().to(posts::replace))
                    .route(web::patch().to(posts::partial_update))
                    .route(web::delete().to(posts::destroy)),
            ),
    );
}
