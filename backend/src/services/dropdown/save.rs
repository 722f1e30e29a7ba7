use crate::db::Database;
use crate::validation::{sanitize_string, validate_dropdown_items};
use actix_web::{web, HttpResponse, Responder};
use common::model::dropdown::{Category, DropdownItem};
use log::error;
use rusqlite::params;
use serde_json::{json, Value};

pub async fn process(
    db: web::Data<Database>,
    path: web::Path<String>,
    body: web::Json<Value>,
) -> impl Responder {
    let Some(category) = Category::from_name(&path) else {
        return HttpResponse::BadRequest().json(json!({ "error": "Invalid category" }));
    };
    let Some(items) = body.get("items") else {
        return HttpResponse::BadRequest().json(json!({ "error": "Items are required" }));
    };
    if let Err(message) = validate_dropdown_items(items, category.has_type()) {
        return HttpResponse::BadRequest().json(json!({ "error": message }));
    }
    let items: Vec<DropdownItem> = match serde_json::from_value(items.clone()) {
        Ok(items) => items,
        Err(_) => {
            return HttpResponse::BadRequest().json(json!({ "error": "Invalid items payload" }))
        }
    };

    match replace_items(&db, category, &items) {
        Ok(()) if items.is_empty() => HttpResponse::Ok().json(json!({
            "data": [],
            "message": format!("{} cleared successfully", path.as_str()),
        })),
        Ok(()) => HttpResponse::Ok().json(json!({
            "data": items,
            "message": format!("{} {} saved successfully", items.len(), path.as_str()),
        })),
        Err(e) => {
            error!("Error saving {}: {}", path.as_str(), e);
            HttpResponse::InternalServerError().json(json!({ "error": "Failed to save items" }))
        }
    }
}

/// Full-replace: delete everything in the category table, then insert the
/// supplied set, all inside one transaction. An insert failure rolls the
/// delete back too, so there is never a partial commit.
fn replace_items(db: &Database, category: Category, items: &[DropdownItem]) -> Result<(), String> {
    db.with_conn(|conn| {
        let table = category.table_name();
        let tx = conn.transaction().map_err(|e| e.to_string())?;

        tx.execute(&format!("DELETE FROM {}", table), [])
            .map_err(|e| e.to_string())?;

        for item in items {
            let name = sanitize_string(&item.name);
            let value = sanitize_string(&item.value);
            let result = match category {
                Category::Reports => tx.execute(
                    &format!("INSERT INTO {} (name, value, type) VALUES (?1, ?2, ?3)", table),
                    params![
                        name,
                        value,
                        sanitize_string(item.item_type.as_deref().unwrap_or_default())
                    ],
                ),
                Category::FundAliases => tx.execute(
                    &format!(
                        "INSERT INTO {} (name, value, fundId) VALUES (?1, ?2, ?3)",
                        table
                    ),
                    params![name, value, item.fund_id],
                ),
                _ => tx.execute(
                    &format!("INSERT INTO {} (name, value) VALUES (?1, ?2)", table),
                    params![name, value],
                ),
            };
            result.map_err(|e| e.to_string())?;
        }

        tx.commit().map_err(|e| e.to_string())
    })
}
