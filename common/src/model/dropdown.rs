use serde::{Deserialize, Serialize};

/// The five dropdown lookup categories and their backing tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Sources,
    Runs,
    Reports,
    Funds,
    FundAliases,
}

impl Category {
    /// Resolves a URL path segment to a category. Anything outside the
    /// fixed five names is rejected by the caller as an invalid category.
    pub fn from_name(name: &str) -> Option<Category> {
        match name {
            "sources" => Some(Category::Sources),
            "runs" => Some(Category::Runs),
            "reports" => Some(Category::Reports),
            "funds" => Some(Category::Funds),
            "fundAliases" => Some(Category::FundAliases),
            _ => None,
        }
    }

    pub fn table_name(self) -> &'static str {
        match self {
            Category::Sources => "dropdown_sources",
            Category::Runs => "dropdown_runs",
            Category::Reports => "dropdown_reports",
            Category::Funds => "dropdown_funds",
            Category::FundAliases => "dropdown_fund_aliases",
        }
    }

    /// Reports carry a mandatory `type` column on top of name/value.
    pub fn has_type(self) -> bool {
        matches!(self, Category::Reports)
    }
}

/// One element of a dropdown bulk-save payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropdownItem {
    pub name: String,
    pub value: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fund_id: Option<i64>,
}

/// A stored dropdown row as returned by list queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropdownRow {
    pub id: i64,
    pub name: String,
    pub value: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fund_id: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
}
