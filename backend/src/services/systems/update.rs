use crate::db::Database;
use crate::validation::validate_system_data;
use actix_web::{web, HttpResponse, Responder};
use common::model::system::{System, SystemData};
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
    if let Err(message) = validate_system_data(data) {
        return HttpResponse::BadRequest().json(json!({ "error": message }));
    }
    let payload: SystemData = match serde_json::from_value(data.clone()) {
        Ok(payload) => payload,
        Err(_) => {
            return HttpResponse::BadRequest().json(json!({ "error": "Invalid data payload" }))
        }
    };

    match update_system(&db, document_id, &payload) {
        Ok(Some(system)) => HttpResponse::Ok().json(json!({ "data": system })),
        Ok(None) => HttpResponse::NotFound().json(json!({ "error": "System not found" })),
        Err(e) => {
            error!("Error updating system: {}", e);
            HttpResponse::InternalServerError().json(json!({ "error": "Failed to update system" }))
        }
    }
}

/// The response record is rebuilt from the input, not re-read from
/// storage. `Ok(None)` means no row matched the documentId.
fn update_system(
    db: &Database,
    document_id: i64,
    data: &SystemData,
) -> Result<Option<System>, String> {
    db.with_conn(|conn| {
        let changed = conn
            .execute(
                "UPDATE systems SET name = ?1, baseUrl = ?2, authenticationMethod = ?3, \
                 authenticationPlace = ?4, key = ?5, value = ?6, updatedAt = datetime('now') \
                 WHERE documentId = ?7",
                params![
                    data.name,
                    data.base_url,
                    data.authentication_method,
                    data.authentication_place,
                    data.key,
                    data.value,
                    document_id
                ],
            )
            .map_err(|e| e.to_string())?;

        if changed == 0 {
            return Ok(None);
        }

        Ok(Some(System {
            id: None,
            document_id,
            name: data.name.clone(),
            base_url: data.base_url.clone(),
            authentication_method: data.authentication_method.clone(),
            authentication_place: data.authentication_place.clone(),
            key: data.key.clone(),
            value: data.value.clone(),
            created_at: None,
            updated_at: None,
            published_at: None,
        }))
    })
}
