//! Blog model and related payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Blog entity as stored
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Blog {
    pub id: Uuid,
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: i32,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Blog creation payload
///
/// Required fields are optional here so that missing values surface as
/// validation failures rather than deserialization rejections.
#[derive(Debug, Clone, Deserialize)]
pub struct NewBlog {
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub likes: Option<i32>,
}

/// Blog update payload; omitted fields keep their current values
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateBlog {
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub likes: Option<i32>,
}

/// Summary of the user that created a blog
#[derive(Debug, Clone, Serialize)]
pub struct CreatorSummary {
    pub id: Uuid,
    pub username: String,
    pub name: Option<String>,
}

/// Blog with its creator resolved to a summary
#[derive(Debug, Clone, Serialize)]
pub struct BlogResponse {
    pub id: Uuid,
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: i32,
    pub user: CreatorSummary,
    pub created_at: DateTime<Utc>,
}

/// Summary of a blog as listed under its owner
#[derive(Debug, Clone, Serialize)]
pub struct BlogSummary {
    pub id: Uuid,
    pub title: String,
    pub author: Option<String>,
    pub url: String,
}
