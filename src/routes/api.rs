use crate::handlers;
use actix_web::{web, Scope};

pub fn config() -> Scope {
    web::scope("/api")
        .route("/health", web::get().to(handlers::health_check))
        .route("/panel", web::get().to(handlers::panel_snapshot))
        .route("/panel/html", web::get().to(handlers::panel_html))
        .route("/panel/open", web::post().to(handlers::open_panel))
        .route("/panel/close", web::post().to(handlers::close_panel))
        .route("/panel/submit", web::post().to(handlers::submit_query))
        .route("/panel/key", web::post().to(handlers::press_key))
}
