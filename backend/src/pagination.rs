//! # Pagination Engine
//!
//! Windows an arbitrary ordered base query into pages and derives the
//! matching row count. The count query is produced textually from the
//! base query: the `ORDER BY` clause is stripped and the select list is
//! swapped for `COUNT(*)`. This naive substitution assumes the base query
//! carries no `GROUP BY` or subquery complexity, which holds for every
//! query in this server and is an accepted limitation.
//!
//! The count and window queries are two separate statements with no
//! transaction around them; a write landing between the two can leave
//! `total` slightly out of step with the returned page. Accepted race.

use crate::validation::sanitize_number;
use common::model::pagination::{Meta, Paginated, Pagination};
use regex::Regex;
use rusqlite::{Connection, Row, ToSql};
use std::collections::HashMap;

pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Hard cap on `pageSize` to bound result size.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Reads a pagination parameter from the query string, accepting both the
/// bracketed form (`pagination[page]`) and the flat form (`page`), and
/// sanitizes it to a positive integer.
pub fn page_param(query: &HashMap<String, String>, name: &str, default: u32) -> u32 {
    let bracketed = format!("pagination[{}]", name);
    let raw = query.get(&bracketed).or_else(|| query.get(name));
    sanitize_number(raw.map(String::as_str), default).max(1)
}

/// Executes `base_query` as one page of results plus pagination metadata.
///
/// `page` and `page_size` must already be sanitized; the window is
/// `LIMIT page_size OFFSET (page - 1) * page_size` appended to the
/// (ordered) base query. Errors from either statement short-circuit with
/// no partial result.
pub fn paginate<T, F>(
    conn: &Connection,
    base_query: &str,
    params: &[&dyn ToSql],
    page: u32,
    page_size: u32,
    map_row: F,
) -> Result<Paginated<T>, String>
where
    F: Fn(&Row<'_>) -> rusqlite::Result<T>,
{
    let count_query = derive_count_query(base_query)?;
    let total = conn
        .query_row(&count_query, params, |row| row.get::<_, i64>(0))
        .map_err(|e| e.to_string())? as u64;

    let offset = u64::from(page - 1) * u64::from(page_size);
    let window_query = format!("{} LIMIT {} OFFSET {}", base_query, page_size, offset);
    let mut stmt = conn.prepare(&window_query).map_err(|e| e.to_string())?;
    let data = stmt
        .query_map(params, map_row)
        .map_err(|e| e.to_string())?
        .collect::<rusqlite::Result<Vec<T>>>()
        .map_err(|e| e.to_string())?;

    let page_count = total.div_ceil(u64::from(page_size));

    Ok(Paginated {
        data,
        meta: Meta {
            pagination: Pagination {
                page,
                page_size,
                page_count,
                total,
            },
        },
    })
}

fn derive_count_query(base_query: &str) -> Result<String, String> {
    let order_by = Regex::new(r"(?i)ORDER BY .*").map_err(|e| format!("Regex error: {}", e))?;
    let select_list =
        Regex::new(r"(?i)^SELECT .*? FROM").map_err(|e| format!("Regex error: {}", e))?;

    let stripped = order_by.replace(base_query, "");
    Ok(select_list
        .replace(stripped.trim_end(), "SELECT COUNT(*) FROM")
        .into_owned())
}
