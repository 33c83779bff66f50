//! End-to-end tests for the bloglist HTTP API
//!
//! These tests drive a running instance of the service over HTTP and reset
//! the blogs table directly between tests. They expect the service to be
//! reachable at `API_BASE_URL` (default http://localhost:3003) and the
//! database at `DATABASE_URL`.

use common::database::{DatabaseConfig, init_pool};
use serde_json::{Value, json};
use serial_test::serial;
use sqlx::{PgPool, Row};
use uuid::Uuid;

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn base_url() -> String {
    std::env::var("API_BASE_URL").unwrap_or_else(|_| "http://localhost:3003".to_string())
}

async fn connect() -> Result<PgPool, Box<dyn std::error::Error>> {
    let config = DatabaseConfig::from_env()?;
    let pool = init_pool(&config).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    Ok(pool)
}

/// Create the user through the API if needed and return (id, token)
async fn login_user(
    client: &reqwest::Client,
    pool: &PgPool,
    username: &str,
    password: &str,
) -> Result<(Uuid, String), Box<dyn std::error::Error>> {
    // Already-existing users fail with a uniqueness error, which is fine here
    client
        .post(format!("{}/api/users", base_url()))
        .json(&json!({ "username": username, "name": username, "password": password }))
        .send()
        .await?;

    let login: Value = client
        .post(format!("{}/api/login", base_url()))
        .json(&json!({ "username": username, "password": password }))
        .send()
        .await?
        .json()
        .await?;

    let token = login["token"]
        .as_str()
        .ok_or("login response missing token")?
        .to_string();

    let row = sqlx::query("SELECT id FROM users WHERE username = $1")
        .bind(username)
        .fetch_one(pool)
        .await?;

    Ok((row.get("id"), token))
}

/// Clear the blogs table and seed the two well-known entries
async fn seed_blogs(pool: &PgPool, user_id: Uuid) -> Result<Vec<Uuid>, Box<dyn std::error::Error>> {
    sqlx::query("DELETE FROM blogs").execute(pool).await?;

    let initial = [
        (
            "Go To Statement Considered Harmful",
            "Edsger W. Dijkstra",
            "http://www.u.arizona.edu/~rubinson/copyright_violations/Go_To_Considered_Harmful.html",
            5,
        ),
        (
            "Type wars",
            "Robert C. Martin",
            "http://blog.cleancoder.com/uncle-bob/2016/05/01/TypeWars.html",
            2,
        ),
    ];

    let mut ids = Vec::new();
    for (title, author, url, likes) in initial {
        let row = sqlx::query(
            "INSERT INTO blogs (title, author, url, likes, user_id)
             VALUES ($1, $2, $3, $4, $5) RETURNING id",
        )
        .bind(title)
        .bind(author)
        .bind(url)
        .bind(likes)
        .bind(user_id)
        .fetch_one(pool)
        .await?;
        ids.push(row.get("id"));
    }

    Ok(ids)
}

async fn list_blogs(client: &reqwest::Client) -> Result<Vec<Value>, Box<dyn std::error::Error>> {
    let blogs: Vec<Value> = client
        .get(format!("{}/api/blogs", base_url()))
        .send()
        .await?
        .json()
        .await?;
    Ok(blogs)
}

#[tokio::test]
#[serial]
#[ignore = "requires a running bloglist service and PostgreSQL"]
async fn blogs_are_returned_as_json() -> TestResult {
    let pool = connect().await?;
    let client = reqwest::Client::new();
    let (user_id, _token) = login_user(&client, &pool, "root", "sekret").await?;
    seed_blogs(&pool, user_id).await?;

    let response = client
        .get(format!("{}/api/blogs", base_url()))
        .send()
        .await?;

    assert_eq!(response.status(), 200);
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.contains("application/json"));

    let blogs: Vec<Value> = response.json().await?;
    assert_eq!(blogs.len(), 2);

    let titles: Vec<&str> = blogs.iter().filter_map(|b| b["title"].as_str()).collect();
    assert!(titles.contains(&"Type wars"));

    // Every listed blog carries a generated id and a creator summary
    for blog in &blogs {
        assert!(blog["id"].as_str().is_some());
        assert_eq!(blog["user"]["username"].as_str(), Some("root"));
    }

    Ok(())
}

#[tokio::test]
#[serial]
#[ignore = "requires a running bloglist service and PostgreSQL"]
async fn post_then_delete_roundtrip() -> TestResult {
    let pool = connect().await?;
    let client = reqwest::Client::new();
    let (user_id, token) = login_user(&client, &pool, "root", "sekret").await?;
    seed_blogs(&pool, user_id).await?;

    let response = client
        .post(format!("{}/api/blogs", base_url()))
        .bearer_auth(&token)
        .json(&json!({
            "title": "Testytest Blog, Coding Love",
            "author": "Lucasio",
            "url": "http://www.google.com",
            "likes": 66
        }))
        .send()
        .await?;
    assert_eq!(response.status(), 201);

    let created: Value = response.json().await?;
    let created_id = created["id"].as_str().ok_or("missing id")?.to_string();
    assert_eq!(created["likes"].as_i64(), Some(66));

    let blogs = list_blogs(&client).await?;
    assert_eq!(blogs.len(), 3);

    let response = client
        .delete(format!("{}/api/blogs/{}", base_url(), created_id))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(response.status(), 204);

    let blogs = list_blogs(&client).await?;
    assert_eq!(blogs.len(), 2);

    Ok(())
}

#[tokio::test]
#[serial]
#[ignore = "requires a running bloglist service and PostgreSQL"]
async fn post_without_token_is_rejected() -> TestResult {
    let pool = connect().await?;
    let client = reqwest::Client::new();
    let (user_id, _token) = login_user(&client, &pool, "root", "sekret").await?;
    seed_blogs(&pool, user_id).await?;

    let response = client
        .post(format!("{}/api/blogs", base_url()))
        .json(&json!({ "title": "No token", "url": "http://example.com" }))
        .send()
        .await?;
    assert_eq!(response.status(), 401);

    assert_eq!(list_blogs(&client).await?.len(), 2);

    Ok(())
}

#[tokio::test]
#[serial]
#[ignore = "requires a running bloglist service and PostgreSQL"]
async fn post_without_title_or_url_is_rejected() -> TestResult {
    let pool = connect().await?;
    let client = reqwest::Client::new();
    let (user_id, token) = login_user(&client, &pool, "root", "sekret").await?;
    seed_blogs(&pool, user_id).await?;

    let response = client
        .post(format!("{}/api/blogs", base_url()))
        .bearer_auth(&token)
        .json(&json!({ "author": "Nobody", "likes": 1 }))
        .send()
        .await?;
    assert_eq!(response.status(), 400);

    assert_eq!(list_blogs(&client).await?.len(), 2);

    Ok(())
}

#[tokio::test]
#[serial]
#[ignore = "requires a running bloglist service and PostgreSQL"]
async fn likes_default_to_zero() -> TestResult {
    let pool = connect().await?;
    let client = reqwest::Client::new();
    let (user_id, token) = login_user(&client, &pool, "root", "sekret").await?;
    seed_blogs(&pool, user_id).await?;

    let created: Value = client
        .post(format!("{}/api/blogs", base_url()))
        .bearer_auth(&token)
        .json(&json!({ "title": "Likeless", "url": "http://example.com/likeless" }))
        .send()
        .await?
        .json()
        .await?;

    assert_eq!(created["likes"].as_i64(), Some(0));

    Ok(())
}

#[tokio::test]
#[serial]
#[ignore = "requires a running bloglist service and PostgreSQL"]
async fn put_updates_likes() -> TestResult {
    let pool = connect().await?;
    let client = reqwest::Client::new();
    let (user_id, _token) = login_user(&client, &pool, "root", "sekret").await?;
    let ids = seed_blogs(&pool, user_id).await?;

    let response = client
        .put(format!("{}/api/blogs/{}", base_url(), ids[0]))
        .json(&json!({ "likes": 77 }))
        .send()
        .await?;
    assert_eq!(response.status(), 200);

    let fetched: Value = client
        .get(format!("{}/api/blogs/{}", base_url(), ids[0]))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(fetched["likes"].as_i64(), Some(77));
    assert_eq!(
        fetched["title"].as_str(),
        Some("Go To Statement Considered Harmful")
    );

    Ok(())
}

#[tokio::test]
#[serial]
#[ignore = "requires a running bloglist service and PostgreSQL"]
async fn update_of_missing_blog_is_not_found() -> TestResult {
    let pool = connect().await?;
    let client = reqwest::Client::new();
    let (user_id, _token) = login_user(&client, &pool, "root", "sekret").await?;
    seed_blogs(&pool, user_id).await?;

    let response = client
        .put(format!("{}/api/blogs/{}", base_url(), Uuid::new_v4()))
        .json(&json!({ "likes": 1 }))
        .send()
        .await?;
    assert_eq!(response.status(), 404);

    Ok(())
}

#[tokio::test]
#[serial]
#[ignore = "requires a running bloglist service and PostgreSQL"]
async fn only_the_creator_may_delete() -> TestResult {
    let pool = connect().await?;
    let client = reqwest::Client::new();
    let (user_id, _token) = login_user(&client, &pool, "root", "sekret").await?;
    let (_other_id, other_token) = login_user(&client, &pool, "intruder", "sekret2").await?;
    let ids = seed_blogs(&pool, user_id).await?;

    let response = client
        .delete(format!("{}/api/blogs/{}", base_url(), ids[1]))
        .bearer_auth(&other_token)
        .send()
        .await?;
    assert_eq!(response.status(), 403);

    // The record is left intact
    assert_eq!(list_blogs(&client).await?.len(), 2);

    Ok(())
}

#[tokio::test]
#[serial]
#[ignore = "requires a running bloglist service and PostgreSQL"]
async fn short_username_is_rejected_and_not_persisted() -> TestResult {
    let pool = connect().await?;
    let client = reqwest::Client::new();

    let before: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await?;

    let response = client
        .post(format!("{}/api/users", base_url()))
        .json(&json!({ "username": "ab", "name": "Too Short", "password": "sekret" }))
        .send()
        .await?;
    assert_eq!(response.status(), 400);

    let after: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await?;
    assert_eq!(before, after);

    Ok(())
}

#[tokio::test]
#[serial]
#[ignore = "requires a running bloglist service and PostgreSQL"]
async fn login_with_wrong_password_is_rejected() -> TestResult {
    let pool = connect().await?;
    let client = reqwest::Client::new();
    let (_user_id, _token) = login_user(&client, &pool, "root", "sekret").await?;

    let response = client
        .post(format!("{}/api/login", base_url()))
        .json(&json!({ "username": "root", "password": "wrong" }))
        .send()
        .await?;
    assert_eq!(response.status(), 401);

    Ok(())
}

#[tokio::test]
#[serial]
#[ignore = "requires a running bloglist service and PostgreSQL"]
async fn users_are_listed_with_blog_summaries() -> TestResult {
    let pool = connect().await?;
    let client = reqwest::Client::new();
    let (user_id, _token) = login_user(&client, &pool, "root", "sekret").await?;
    seed_blogs(&pool, user_id).await?;

    let users: Vec<Value> = client
        .get(format!("{}/api/users", base_url()))
        .send()
        .await?
        .json()
        .await?;

    let root = users
        .iter()
        .find(|u| u["username"].as_str() == Some("root"))
        .ok_or("root user missing from listing")?;

    assert_eq!(root["blogs"].as_array().map(|b| b.len()), Some(2));
    assert!(root.get("password_hash").is_none());

    Ok(())
}

#[tokio::test]
#[serial]
#[ignore = "requires a running bloglist service and PostgreSQL"]
async fn unknown_endpoint_returns_404() -> TestResult {
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/api/nonsense", base_url()))
        .send()
        .await?;
    assert_eq!(response.status(), 404);

    let body: Value = response.json().await?;
    assert_eq!(body["error"].as_str(), Some("unknown endpoint"));

    Ok(())
}
