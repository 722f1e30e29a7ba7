use crate::db::Database;
use actix_web::{web, HttpResponse, Responder};
use log::error;
use rusqlite::params;
use serde_json::json;

pub async fn process(db: web::Data<Database>, path: web::Path<String>) -> impl Responder {
    let Ok(document_id) = path.parse::<i64>() else {
        return HttpResponse::BadRequest().json(json!({ "error": "Valid documentId is required" }));
    };

    match delete_system(&db, document_id) {
        Ok(true) => HttpResponse::Ok().json(json!({ "data": null })),
        Ok(false) => HttpResponse::NotFound().json(json!({ "error": "System not found" })),
        Err(e) => {
            error!("Error deleting system: {}", e);
            HttpResponse::InternalServerError().json(json!({ "error": "Failed to delete system" }))
        }
    }
}

fn delete_system(db: &Database, document_id: i64) -> Result<bool, String> {
    db.with_conn(|conn| {
        let changed = conn
            .execute(
                "DELETE FROM systems WHERE documentId = ?1",
                params![document_id],
            )
            .map_err(|e| e.to_string())?;
        Ok(changed > 0)
    })
}
