//! # Dropdown Reference Data Module
//!
//! Serves the five fixed lookup categories (`sources`, `runs`, `reports`,
//! `funds`, `fundAliases`) that populate the admin client's dropdowns.
//! Each category maps to its own table; the category path segment is
//! validated against the fixed enumeration before any SQL is built.
//!
//! ## Registered Routes:
//!
//! *   **`GET /api/dropdown/{category}`**:
//!     - **Handler**: `list::process`
//!     - **Description**: Lists every row of the category, optionally
//!       filtered by a `search` substring over name and value, always
//!       ordered alphabetically by name.
//!
//! *   **`POST /api/dropdown/{category}`**:
//!     - **Handler**: `save::process`
//!     - **Description**: Full-replace save. Inside one transaction the
//!       category table is emptied and the supplied `items` are inserted;
//!       an empty array commits the delete and leaves the table empty.
//!       Any insert failure rolls back the entire batch.

mod list;
mod save;

use actix_web::web;
use actix_web::Scope;

const API_PATH: &str = "/api/dropdown";

/// Configures and returns the Actix `Scope` for the dropdown routes.
pub fn configure_routes() -> Scope {
    web::scope(API_PATH)
        .route("/{category}", web::get().to(list::process))
        .route("/{category}", web::post().to(save::process))
}
