use super::PlannerWrite;
use crate::db::Database;
use crate::validation::validate_planner_data;
use actix_web::{web, HttpResponse, Responder};
use common::model::planner::{Planner, PlannerData};
use log::error;
use rusqlite::params;
use serde_json::{json, Value};

pub async fn process(db: web::Data<Database>, body: web::Json<Value>) -> impl Responder {
    let Some(data) = body.get("data") else {
        return HttpResponse::BadRequest().json(json!({ "error": "Data is required" }));
    };
    if let Err(message) = validate_planner_data(data) {
        return HttpResponse::BadRequest().json(json!({ "error": message }));
    }
    let payload: PlannerData = match serde_json::from_value(data.clone()) {
        Ok(payload) => payload,
        Err(_) => {
            return HttpResponse::BadRequest().json(json!({ "error": "Invalid data payload" }))
        }
    };

    match create_planner(&db, &payload) {
        Ok(planner) => HttpResponse::Created().json(json!({ "data": planner })),
        Err(e) => {
            error!("Error creating planner: {}", e);
            HttpResponse::InternalServerError().json(json!({ "error": "Failed to create planner" }))
        }
    }
}

/// Same two-step shape as system creation: insert with a null documentId,
/// then backfill it with the generated key.
fn create_planner(db: &Database, data: &PlannerData) -> Result<Planner, String> {
    let write = PlannerWrite::from_data(data)?;

    db.with_conn(|conn| {
        conn.execute(
            "INSERT INTO planners (name, description, plannerType, externalSystemConfig, \
             funds, \"trigger\", sources, runs, reports, documentId, createdAt, updatedAt, publishedAt) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, NULL, \
             datetime('now'), datetime('now'), datetime('now'))",
            params![
                data.name,
                data.description,
                data.planner_type,
                write.config_text,
                write.funds_text,
                write.trigger_text,
                write.sources_text,
                write.runs_text,
                write.reports_text
            ],
        )
        .map_err(|e| e.to_string())?;

        let id = conn.last_insert_rowid();
        conn.execute(
            "UPDATE planners SET documentId = ?1 WHERE id = ?2",
            params![id, id],
        )
        .map_err(|e| e.to_string())?;

        Ok(write.into_planner(Some(id), id, data))
    })
}
