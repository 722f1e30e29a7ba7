//! Administrative backend for external system configurations, scheduled
//! planners, and the dropdown reference data that feeds the admin client.
//!
//! The HTTP surface is JSON over actix-web with no authentication. List
//! endpoints answer `{ "data": [...] }` (plus pagination metadata where
//! paginated), single-record writes answer `{ "data": {...} }` or
//! `{ "data": null }` for deletes, and every failure is a
//! `{ "error": "<message>" }` envelope with a 4xx/5xx status.

pub mod config;
pub mod db;
pub mod pagination;
pub mod services;
pub mod validation;

use crate::db::Database;
use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

/// Registers every route on the application. Shared between the binary
/// and the integration tests.
pub fn configure_app(cfg: &mut web::ServiceConfig) {
    cfg.service(services::systems::configure_routes())
        .service(services::planners::configure_routes())
        .service(services::dropdown::configure_routes())
        .route("/health", web::get().to(health))
        .default_service(web::route().to(not_found));
}

/// Liveness probe.
async fn health(db: web::Data<Database>) -> impl Responder {
    let database = if db.is_open() {
        "connected"
    } else {
        "disconnected"
    };

    HttpResponse::Ok().json(json!({
        "status": "OK",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "database": database,
    }))
}

async fn not_found() -> impl Responder {
    HttpResponse::NotFound().json(json!({ "error": "Endpoint not found" }))
}
