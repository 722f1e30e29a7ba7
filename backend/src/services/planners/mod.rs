//! # Planner Service Module
//!
//! CRUD endpoints for planners (scheduled report/aggregation jobs) under
//! `/api/planners`, mirroring the systems module.
//!
//! Planners carry five structured fields (`externalSystemConfig`,
//! `funds`, `trigger`, `sources`, `runs`, `reports`) that are serialized
//! to JSON text for storage and parsed back on read. Missing fields take
//! their defaults on write (`null` config, empty arrays, all-false
//! trigger); stored text that fails to parse degrades to the same
//! defaults on read instead of surfacing an error.
//!
//! ## Registered Routes:
//!
//! *   **`GET /api/planners`** — paginated list ordered by creation time
//!     descending, searchable over name, description, and planner type.
//! *   **`POST /api/planners`** — create with documentId backfill, 201.
//! *   **`PUT /api/planners/{document_id}`** — update by documentId,
//!     404 when no row matches.
//! *   **`DELETE /api/planners/{document_id}`** — delete by documentId.

mod create;
mod delete;
mod list;
mod update;

use actix_web::web;
use actix_web::Scope;
use common::model::planner::{Planner, PlannerData, Trigger};
use serde_json::Value;

const API_PATH: &str = "/api/planners";

/// Configures and returns the Actix `Scope` for all planner routes.
pub fn configure_routes() -> Scope {
    web::scope(API_PATH)
        .route("", web::get().to(list::process))
        .route("", web::post().to(create::process))
        .route("/{document_id}", web::put().to(update::process))
        .route("/{document_id}", web::delete().to(delete::process))
}

/// A planner payload with write-time defaults applied, plus the
/// serialized text forms destined for the five JSON columns.
pub(super) struct PlannerWrite {
    pub external_system_config: Value,
    pub funds: Value,
    pub trigger: Trigger,
    pub sources: Value,
    pub runs: Value,
    pub reports: Value,
    pub config_text: String,
    pub funds_text: String,
    pub trigger_text: String,
    pub sources_text: String,
    pub runs_text: String,
    pub reports_text: String,
}

impl PlannerWrite {
    pub fn from_data(data: &PlannerData) -> Result<PlannerWrite, String> {
        let external_system_config = data.external_system_config.clone();
        let funds = Value::Array(data.funds.clone().unwrap_or_default());
        let trigger = data.trigger.unwrap_or_default();
        let sources = Value::Array(data.sources.clone().unwrap_or_default());
        let runs = Value::Array(data.runs.clone().unwrap_or_default());
        let reports = Value::Array(data.reports.clone().unwrap_or_default());

        Ok(PlannerWrite {
            config_text: encode(&external_system_config)?,
            funds_text: encode(&funds)?,
            trigger_text: encode(&trigger)?,
            sources_text: encode(&sources)?,
            runs_text: encode(&runs)?,
            reports_text: encode(&reports)?,
            external_system_config,
            funds,
            trigger,
            sources,
            runs,
            reports,
        })
    }

    /// Assembles the response record from the validated input; writes do
    /// not re-read the row from storage.
    pub fn into_planner(self, id: Option<i64>, document_id: i64, data: &PlannerData) -> Planner {
        Planner {
            id,
            document_id,
            name: data.name.clone(),
            description: data.description.clone(),
            planner_type: data.planner_type.clone(),
            external_system_config: self.external_system_config,
            funds: self.funds,
            trigger: self.trigger,
            sources: self.sources,
            runs: self.runs,
            reports: self.reports,
            created_at: None,
            updated_at: None,
            published_at: None,
        }
    }
}

fn encode<T: serde::Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| e.to_string())
}
