use serde::{Deserialize, Serialize};

/// Pagination metadata attached to list responses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
    pub page_count: u64,
    pub total: u64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Meta {
    pub pagination: Pagination,
}

/// A windowed list result: one page of rows plus the derived metadata.
#[derive(Debug, Clone, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: Meta,
}
