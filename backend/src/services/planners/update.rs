use super::PlannerWrite;
use crate::db::Database;
use crate::validation::validate_planner_data;
use actix_web::{web, HttpResponse, Responder};
use common::model::planner::{Planner, PlannerData};
use log::error;
use rusqlite::params;
use serde_json::{json, Value};

pub async fn process(
    db: web::Data<Database>,
    path: web::Path<String>,
    body: web::Json<Value>,
) -> impl Responder {
    let Ok(document_id) = path.parse::<i64>() else {
        return HttpResponse::BadRequest().json(json!({ "error": "Valid documentId is required" }));
    };
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

    match update_planner(&db, document_id, &payload) {
        Ok(Some(planner)) => HttpResponse::Ok().json(json!({ "data": planner })),
        Ok(None) => HttpResponse::NotFound().json(json!({ "error": "Planner not found" })),
        Err(e) => {
            error!("Error updating planner: {}", e);
            HttpResponse::InternalServerError().json(json!({ "error": "Failed to update planner" }))
        }
    }
}

fn update_planner(
    db: &Database,
    document_id: i64,
    data: &PlannerData,
) -> Result<Option<Planner>, String> {
    let write = PlannerWrite::from_data(data)?;

    db.with_conn(|conn| {
        let changed = conn
            .execute(
                "UPDATE planners SET name = ?1, description = ?2, plannerType = ?3, \
                 externalSystemConfig = ?4, funds = ?5, \"trigger\" = ?6, sources = ?7, \
                 runs = ?8, reports = ?9, updatedAt = datetime('now') WHERE documentId = ?10",
                params![
                    data.name,
                    data.description,
                    data.planner_type,
                    write.config_text,
                    write.funds_text,
                    write.trigger_text,
                    write.sources_text,
                    write.runs_text,
                    write.reports_text,
                    document_id
                ],
            )
            .map_err(|e| e.to_string())?;

        if changed == 0 {
            return Ok(None);
        }

        Ok(Some(write.into_planner(None, document_id, data)))
    })
}
