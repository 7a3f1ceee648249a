use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored post. `author` holds the creating user's id and never changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub author: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Everything a caller supplies when creating a post. The store assigns
/// `id` and `created_at`.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub body: String,
    pub tags: Vec<String>,
    pub image_url: Option<String>,
    pub author: Uuid,
}

/// Splits a comma-separated tag field and trims each token.
///
/// Empty tokens are kept, so `""` becomes `[""]`. Only a missing field
/// yields no tags.
pub fn split_tags(csv: Option<&str>) -> Vec<String> {
    match csv {
        Some(csv) => csv.split(',').map(|t| t.trim().to_string()).collect(),
        None => Vec::new(),
    }
}
