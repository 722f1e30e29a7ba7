use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Which dropdown collections a planner reacts to.
///
/// Every flag defaults to `false`, so a missing or partial `trigger`
/// object in a request (or in a stored row) degrades to all-off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trigger {
    #[serde(default)]
    pub sources: bool,
    #[serde(default)]
    pub runs: bool,
    #[serde(default)]
    pub reports: bool,
}

/// A stored planner record as returned by the API.
///
/// The five structured fields (`external_system_config`, `funds`,
/// `sources`, `runs`, `reports`) are persisted as JSON text and kept
/// freeform on the wire; only `trigger` has a fixed shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Planner {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub document_id: i64,
    pub name: String,
    pub description: String,
    pub planner_type: String,
    pub external_system_config: Value,
    pub funds: Value,
    pub trigger: Trigger,
    pub sources: Value,
    pub runs: Value,
    pub reports: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
}

/// The client-supplied payload for creating or updating a planner.
///
/// Array fields accept any element shape; element structure is not
/// validated server-side. Absent or null fields fall back to their
/// defaults (`null` config, empty arrays, all-false trigger) on write.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannerData {
    pub name: String,
    pub description: String,
    pub planner_type: String,
    #[serde(default)]
    pub external_system_config: Value,
    #[serde(default)]
    pub funds: Option<Vec<Value>>,
    #[serde(default)]
    pub trigger: Option<Trigger>,
    #[serde(default)]
    pub sources: Option<Vec<Value>>,
    #[serde(default)]
    pub runs: Option<Vec<Value>>,
    #[serde(default)]
    pub reports: Option<Vec<Value>>,
}
