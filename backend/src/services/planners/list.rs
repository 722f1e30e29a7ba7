use crate::db::Database;
use crate::pagination::{self, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use actix_web::{web, HttpResponse, Responder};
use common::model::pagination::Paginated;
use common::model::planner::Planner;
use log::error;
use rusqlite::{Row, ToSql};
use serde_json::{json, Value};
use std::collections::HashMap;

const SELECT_COLUMNS: &str = "id, documentId, name, description, plannerType, \
     externalSystemConfig, funds, \"trigger\", sources, runs, reports, \
     createdAt, updatedAt, publishedAt";

pub async fn process(
    db: web::Data<Database>,
    query: web::Query<HashMap<String, String>>,
) -> impl Responder {
    let page = pagination::page_param(&query, "page", 1);
    let page_size = pagination::page_param(&query, "pageSize", DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE);
    let search = query
        .get("search")
        .map(|s| s.trim().to_owned())
        .unwrap_or_default();

    match list_planners(&db, page, page_size, &search) {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => {
            error!("Error fetching planners: {}", e);
            HttpResponse::InternalServerError().json(json!({ "error": "Internal server error" }))
        }
    }
}

fn list_planners(
    db: &Database,
    page: u32,
    page_size: u32,
    search: &str,
) -> Result<Paginated<Planner>, String> {
    db.with_conn(|conn| {
        let mut sql = format!("SELECT {} FROM planners", SELECT_COLUMNS);
        let mut bind: Vec<String> = Vec::new();
        if !search.is_empty() {
            sql.push_str(" WHERE name LIKE ?1 OR description LIKE ?2 OR plannerType LIKE ?3");
            let pattern = format!("%{}%", search);
            bind.push(pattern.clone());
            bind.push(pattern.clone());
            bind.push(pattern);
        }
        sql.push_str(" ORDER BY createdAt DESC");

        let params: Vec<&dyn ToSql> = bind.iter().map(|p| p as &dyn ToSql).collect();
        pagination::paginate(conn, &sql, &params, page, page_size, planner_from_row)
    })
}

fn planner_from_row(row: &Row<'_>) -> rusqlite::Result<Planner> {
    let id: i64 = row.get(0)?;
    Ok(Planner {
        id: Some(id),
        document_id: row.get::<_, Option<i64>>(1)?.unwrap_or(id),
        name: row.get(2)?,
        description: row.get(3)?,
        planner_type: row.get(4)?,
        external_system_config: parse_json_or(row.get(5)?, Value::Null),
        funds: parse_json_or(row.get(6)?, empty_array()),
        trigger: row
            .get::<_, Option<String>>(7)?
            .as_deref()
            .and_then(|text| serde_json::from_str(text).ok())
            .unwrap_or_default(),
        sources: parse_json_or(row.get(8)?, empty_array()),
        runs: parse_json_or(row.get(9)?, empty_array()),
        reports: parse_json_or(row.get(10)?, empty_array()),
        created_at: row.get(11)?,
        updated_at: row.get(12)?,
        published_at: row.get(13)?,
    })
}

/// Stored JSON that is null or fails to parse degrades to the field's
/// default instead of failing the row or the whole list.
fn parse_json_or(text: Option<String>, default: Value) -> Value {
    text.as_deref()
        .and_then(|t| serde_json::from_str(t).ok())
        .unwrap_or(default)
}

fn empty_array() -> Value {
    Value::Array(Vec::new())
}
