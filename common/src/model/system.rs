use serde::{Deserialize, Serialize};

/// A stored external system record as returned by the API.
///
/// `document_id` is the public-facing identifier; it is backfilled to the
/// generated primary key right after insert and is what update/delete key on.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct System {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub document_id: i64,
    pub name: String,
    pub base_url: String,
    pub authentication_method: String,
    pub authentication_place: String,
    pub key: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
}

/// The client-supplied payload for creating or updating a system
/// (the `data` member of the request body).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemData {
    pub name: String,
    pub base_url: String,
    pub authentication_method: String,
    pub authentication_place: String,
    pub key: String,
    pub value: String,
}
