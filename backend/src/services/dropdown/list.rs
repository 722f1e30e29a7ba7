use crate::db::Database;
use crate::validation::sanitize_string;
use actix_web::{web, HttpResponse, Responder};
use common::model::dropdown::{Category, DropdownRow};
use log::error;
use rusqlite::{Row, ToSql};
use serde_json::json;
use std::collections::HashMap;

pub async fn process(
    db: web::Data<Database>,
    path: web::Path<String>,
    query: web::Query<HashMap<String, String>>,
) -> impl Responder {
    let Some(category) = Category::from_name(&path) else {
        return HttpResponse::BadRequest().json(json!({ "error": "Invalid category" }));
    };
    let search = sanitize_string(query.get("search").map(String::as_str).unwrap_or(""));

    match list_items(&db, category, &search) {
        Ok(rows) => HttpResponse::Ok().json(json!({ "data": rows })),
        Err(e) => {
            error!("Error fetching {}: {}", path, e);
            HttpResponse::InternalServerError().json(json!({ "error": "Internal server error" }))
        }
    }
}

/// The categories differ in their extra columns; missing ones are
/// selected as NULL so a single row mapper covers all five tables.
fn select_clause(category: Category) -> String {
    let type_column = if category.has_type() {
        "type"
    } else {
        "NULL AS type"
    };
    let fund_column = if category == Category::FundAliases {
        "fundId"
    } else {
        "NULL AS fundId"
    };
    format!(
        "SELECT id, name, value, {}, {}, createdAt, updatedAt FROM {}",
        type_column,
        fund_column,
        category.table_name()
    )
}

fn list_items(db: &Database, category: Category, search: &str) -> Result<Vec<DropdownRow>, String> {
    db.with_conn(|conn| {
        let mut sql = select_clause(category);
        let mut bind: Vec<String> = Vec::new();
        if !search.is_empty() {
            sql.push_str(" WHERE name LIKE ?1 OR value LIKE ?2");
            let pattern = format!("%{}%", search);
            bind.push(pattern.clone());
            bind.push(pattern);
        }
        sql.push_str(" ORDER BY name ASC");

        let params: Vec<&dyn ToSql> = bind.iter().map(|p| p as &dyn ToSql).collect();
        let mut stmt = conn.prepare(&sql).map_err(|e| e.to_string())?;
        let rows = stmt
            .query_map(params.as_slice(), row_to_item)
            .map_err(|e| e.to_string())?
            .collect::<rusqlite::Result<Vec<DropdownRow>>>()
            .map_err(|e| e.to_string())?;
        Ok(rows)
    })
}

fn row_to_item(row: &Row<'_>) -> rusqlite::Result<DropdownRow> {
    Ok(DropdownRow {
        id: row.get(0)?,
        name: row.get(1)?,
        value: row.get(2)?,
        item_type: row.get(3)?,
        fund_id: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}
