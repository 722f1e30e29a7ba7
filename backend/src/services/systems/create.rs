use crate::db::Database;
use crate::validation::validate_system_data;
use actix_web::{web, HttpResponse, Responder};
use common::model::system::{System, SystemData};
use log::error;
use rusqlite::params;
use serde_json::{json, Value};

pub async fn process(db: web::Data<Database>, body: web::Json<Value>) -> impl Responder {
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

    match create_system(&db, &payload) {
        Ok(system) => HttpResponse::Created().json(json!({ "data": system })),
        Err(e) => {
            error!("Error creating system: {}", e);
            HttpResponse::InternalServerError().json(json!({ "error": "Failed to create system" }))
        }
    }
}

/// Two-step create: insert with a null documentId, then backfill it with
/// the generated primary key. The public identifier is not known until
/// after the insert, so the two statements run back to back without a
/// wrapping transaction.
fn create_system(db: &Database, data: &SystemData) -> Result<System, String> {
    db.with_conn(|conn| {
        conn.execute(
            "INSERT INTO systems (name, baseUrl, authenticationMethod, authenticationPlace, \
             key, value, documentId, createdAt, updatedAt, publishedAt) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, NULL, datetime('now'), datetime('now'), datetime('now'))",
            params![
                data.name,
                data.base_url,
                data.authentication_method,
                data.authentication_place,
                data.key,
                data.value
            ],
        )
        .map_err(|e| e.to_string())?;

        let id = conn.last_insert_rowid();
        conn.execute(
            "UPDATE systems SET documentId = ?1 WHERE id = ?2",
            params![id, id],
        )
        .map_err(|e| e.to_string())?;

        Ok(System {
            id: Some(id),
            document_id: id,
            name: data.name.clone(),
            base_url: data.base_url.clone(),
            authentication_method: data.authentication_method.clone(),
            authentication_place: data.authentication_place.clone(),
            key: data.key.clone(),
            value: data.value.clone(),
            created_at: None,
            updated_at: None,
            published_at: None,
        })
    })
}
