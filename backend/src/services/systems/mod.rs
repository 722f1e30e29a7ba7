//! # External System Service Module
//!
//! Groups the CRUD endpoints for external system configurations (API
//! connection records) under the `/api/systems` path.
//!
//! ## Registered Routes:
//!
//! *   **`GET /api/systems`**:
//!     - **Handler**: `list::process`
//!     - **Description**: Paginated list ordered by creation time,
//!       newest first, with an optional `search` substring filter.
//!
//! *   **`POST /api/systems`**:
//!     - **Handler**: `create::process`
//!     - **Description**: Creates a record from `{ "data": {...} }` and
//!       answers 201. The public `documentId` is backfilled to the
//!       generated primary key in a second statement.
//!
//! *   **`PUT /api/systems/{document_id}`**:
//!     - **Handler**: `update::process`
//!     - **Description**: Updates the record keyed by its `documentId`;
//!       404 when no row matches.
//!
//! *   **`DELETE /api/systems/{document_id}`**:
//!     - **Handler**: `delete::process`
//!     - **Description**: Deletes by `documentId`; 404 when no row
//!       matches, otherwise `{ "data": null }`.

mod create;
mod delete;
mod list;
mod update;

use actix_web::web;
use actix_web::Scope;

const API_PATH: &str = "/api/systems";

/// Configures and returns the Actix `Scope` for all system routes.
pub fn configure_routes() -> Scope {
    web::scope(API_PATH)
        .route("", web::get().to(list::process))
        .route("", web::post().to(create::process))
        .route("/{document_id}", web::put().to(update::process))
        .route("/{document_id}", web::delete().to(delete::process))
}
