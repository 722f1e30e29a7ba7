use crate::db::Database;
use crate::pagination::{self, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use actix_web::{web, HttpResponse, Responder};
use common::model::pagination::Paginated;
use common::model::system::System;
use log::error;
use rusqlite::{Row, ToSql};
use serde_json::json;
use std::collections::HashMap;

const SELECT_COLUMNS: &str = "id, documentId, name, baseUrl, authenticationMethod, \
     authenticationPlace, key, value, createdAt, updatedAt, publishedAt";

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

    match list_systems(&db, page, page_size, &search) {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => {
            error!("Error fetching systems: {}", e);
            HttpResponse::InternalServerError().json(json!({ "error": "Internal server error" }))
        }
    }
}

fn list_systems(
    db: &Database,
    page: u32,
    page_size: u32,
    search: &str,
) -> Result<Paginated<System>, String> {
    db.with_conn(|conn| {
        let mut sql = format!("SELECT {} FROM systems", SELECT_COLUMNS);
        let mut bind: Vec<String> = Vec::new();
        if !search.is_empty() {
            sql.push_str(" WHERE name LIKE ?1 OR baseUrl LIKE ?2");
            let pattern = format!("%{}%", search);
            bind.push(pattern.clone());
            bind.push(pattern);
        }
        sql.push_str(" ORDER BY createdAt DESC");

        let params: Vec<&dyn ToSql> = bind.iter().map(|p| p as &dyn ToSql).collect();
        pagination::paginate(conn, &sql, &params, page, page_size, system_from_row)
    })
}

/// Rows written before the documentId backfill completed carry a null
/// documentId; it defaults to the primary key on the way out.
fn system_from_row(row: &Row<'_>) -> rusqlite::Result<System> {
    let id: i64 = row.get(0)?;
    Ok(System {
        id: Some(id),
        document_id: row.get::<_, Option<i64>>(1)?.unwrap_or(id),
        name: row.get(2)?,
        base_url: row.get(3)?,
        authentication_method: row.get(4)?,
        authentication_place: row.get(5)?,
        key: row.get(6)?,
        value: row.get(7)?,
        created_at: row.get(8)?,
        updated_at: row.get(9)?,
        published_at: row.get(10)?,
    })
}
