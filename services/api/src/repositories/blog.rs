//! Blog repository for database operations

use anyhow::Result;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::models::{Blog, BlogResponse, CreatorSummary, NewBlog, UpdateBlog};

/// Blog repository
#[derive(Clone)]
pub struct BlogRepository {
    pool: PgPool,
}

impl BlogRepository {
    /// Create a new blog repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get all blogs with their creators resolved to summaries
    pub async fn find_all(&self) -> Result<Vec<BlogResponse>> {
        let rows = sqlx::query(
            r#"
            SELECT b.id, b.title, b.author, b.url, b.likes, b.created_at,
                   u.id AS creator_id, u.username, u.name
            FROM blogs b
            JOIN users u ON b.user_id = u.id
            ORDER BY b.created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let blogs = rows.into_iter().map(|row| row_to_response(&row)).collect();

        Ok(blogs)
    }

    /// Find a blog by ID, with its creator resolved to a summary
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<BlogResponse>> {
        let row = sqlx::query(
            r#"
            SELECT b.id, b.title, b.author, b.url, b.likes, b.created_at,
                   u.id AS creator_id, u.username, u.name
            FROM blogs b
            JOIN users u ON b.user_id = u.id
            WHERE b.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| row_to_response(&row)))
    }

    /// Create a new blog owned by the given user
    pub async fn create(&self, new_blog: &NewBlog, user_id: Uuid) -> Result<Blog> {
        let row = sqlx::query(
            r#"
            INSERT INTO blogs (title, author, url, likes, user_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, title, author, url, likes, user_id, created_at
            "#,
        )
        .bind(new_blog.title.as_deref().unwrap_or_default())
        .bind(&new_blog.author)
        .bind(new_blog.url.as_deref().unwrap_or_default())
        .bind(new_blog.likes.unwrap_or(0))
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        let blog = Blog {
            id: row.get("id"),
            title: row.get("title"),
            author: row.get("author"),
            url: row.get("url"),
            likes: row.get("likes"),
            user_id: row.get("user_id"),
            created_at: row.get("created_at"),
        };

        Ok(blog)
    }

    /// Replace a blog's mutable fields, keeping current values for omitted
    /// ones; returns None when the id does not exist
    pub async fn update(&self, id: Uuid, changes: &UpdateBlog) -> Result<Option<BlogResponse>> {
        let row = sqlx::query(
            r#"
            UPDATE blogs b
            SET title = COALESCE($2, b.title),
                author = COALESCE($3, b.author),
                url = COALESCE($4, b.url),
                likes = COALESCE($5, b.likes)
            FROM users u
            WHERE b.id = $1 AND u.id = b.user_id
            RETURNING b.id, b.title, b.author, b.url, b.likes, b.created_at,
                      u.id AS creator_id, u.username, u.name
            "#,
        )
        .bind(id)
        .bind(&changes.title)
        .bind(&changes.author)
        .bind(&changes.url)
        .bind(changes.likes)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| row_to_response(&row)))
    }

    /// Find the creator of a blog; returns None when the id does not exist
    pub async fn find_creator(&self, id: Uuid) -> Result<Option<Uuid>> {
        let row = sqlx::query("SELECT user_id FROM blogs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|row| row.get("user_id")))
    }

    /// Delete a blog by ID; returns false when the id does not exist
    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM blogs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_response(row: &sqlx::postgres::PgRow) -> BlogResponse {
    BlogResponse {
        id: row.get("id"),
        title: row.get("title"),
        author: row.get("author"),
        url: row.get("url"),
        likes: row.get("likes"),
        created_at: row.get("created_at"),
        user: CreatorSummary {
            id: row.get("creator_id"),
            username: row.get("username"),
            name: row.get("name"),
        },
    }
}
