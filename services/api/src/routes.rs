//! Bloglist service routes

use std::collections::HashMap;

use axum::{
    Extension, Json, Router,
    extract::{Path, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::{
    error::ApiError,
    middleware::{AuthUser, auth_middleware, request_logger},
    models::{
        BlogSummary, LoginRequest, LoginResponse, NewBlog, NewUser, UpdateBlog, UserResponse,
    },
    state::AppState,
    validation,
};

/// Create the router for the bloglist service
pub fn create_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/api/blogs", post(create_blog))
        .route("/api/blogs/:id", delete(delete_blog))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/api/blogs", get(list_blogs))
        .route("/api/blogs/:id", get(get_blog))
        .route("/api/blogs/:id", put(update_blog))
        .route("/api/users", get(list_users))
        .route("/api/users", post(create_user))
        .route("/api/login", post(login))
        .merge(protected_routes)
        .fallback(unknown_endpoint)
        .layer(middleware::from_fn(request_logger))
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "bloglist-api"
    }))
}

/// Fallback for routes no handler matches
pub async fn unknown_endpoint() -> ApiError {
    ApiError::UnknownEndpoint
}

/// Get all blogs with their creators resolved to summaries
pub async fn list_blogs(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let blogs = state.blog_repository.find_all().await.map_err(|e| {
        error!("Failed to list blogs: {}", e);
        ApiError::InternalServerError
    })?;

    Ok(Json(blogs))
}

/// Get a blog by ID
pub async fn get_blog(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let blog = state
        .blog_repository
        .find_by_id(id)
        .await
        .map_err(|e| {
            error!("Failed to get blog: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or(ApiError::NotFound("blog"))?;

    Ok(Json(blog))
}

/// Create a new blog owned by the authenticated user
pub async fn create_blog(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<NewBlog>,
) -> Result<impl IntoResponse, ApiError> {
    validation::validate_new_blog(&payload).map_err(ApiError::Validation)?;

    let blog = state
        .blog_repository
        .create(&payload, user.id)
        .await
        .map_err(|e| {
            error!("Failed to create blog: {}", e);
            ApiError::InternalServerError
        })?;

    Ok((StatusCode::CREATED, Json(blog)))
}

/// Replace a blog's mutable fields by ID
pub async fn update_blog(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBlog>,
) -> Result<impl IntoResponse, ApiError> {
    let blog = state
        .blog_repository
        .update(id, &payload)
        .await
        .map_err(|e| {
            error!("Failed to update blog: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or(ApiError::NotFound("blog"))?;

    Ok(Json(blog))
}

/// Delete a blog by ID; only its creator may do so
pub async fn delete_blog(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let creator = state
        .blog_repository
        .find_creator(id)
        .await
        .map_err(|e| {
            error!("Failed to look up blog creator: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or(ApiError::NotFound("blog"))?;

    if creator != user.id {
        return Err(ApiError::Forbidden);
    }

    state.blog_repository.delete(id).await.map_err(|e| {
        error!("Failed to delete blog: {}", e);
        ApiError::InternalServerError
    })?;

    Ok(StatusCode::NO_CONTENT)
}

/// Get all users with their blogs resolved to summaries
pub async fn list_users(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let users = state.user_repository.find_all().await.map_err(|e| {
        error!("Failed to list users: {}", e);
        ApiError::InternalServerError
    })?;

    let blogs = state.blog_repository.find_all().await.map_err(|e| {
        error!("Failed to list blogs: {}", e);
        ApiError::InternalServerError
    })?;

    let mut blogs_by_creator: HashMap<Uuid, Vec<BlogSummary>> = HashMap::new();
    for blog in blogs {
        blogs_by_creator
            .entry(blog.user.id)
            .or_default()
            .push(BlogSummary {
                id: blog.id,
                title: blog.title,
                author: blog.author,
                url: blog.url,
            });
    }

    let response: Vec<UserResponse> = users
        .into_iter()
        .map(|user| UserResponse {
            blogs: blogs_by_creator.remove(&user.id).unwrap_or_default(),
            id: user.id,
            username: user.username,
            name: user.name,
        })
        .collect();

    Ok(Json(response))
}

/// Create a new user account
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<NewUser>,
) -> Result<impl IntoResponse, ApiError> {
    validation::validate_username(payload.username.as_deref()).map_err(ApiError::Validation)?;
    validation::validate_password(payload.password.as_deref()).map_err(ApiError::Validation)?;

    let username = payload.username.as_deref().unwrap_or_default();

    // Uniqueness violations are reported as validation failures
    let existing = state
        .user_repository
        .find_by_username(username)
        .await
        .map_err(|e| {
            error!("Failed to check username uniqueness: {}", e);
            ApiError::InternalServerError
        })?;

    if existing.is_some() {
        return Err(ApiError::Validation("username must be unique".to_string()));
    }

    let user = state
        .user_repository
        .create(
            username,
            payload.name.as_deref(),
            payload.password.as_deref().unwrap_or_default(),
        )
        .await
        .map_err(|e| {
            error!("Failed to create user: {}", e);
            ApiError::InternalServerError
        })?;

    let response = UserResponse {
        id: user.id,
        username: user.username,
        name: user.name,
        blogs: vec![],
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// Exchange credentials for a signed session token
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Login attempt for user: {}", payload.username);

    let user = state
        .user_repository
        .find_by_username(&payload.username)
        .await
        .map_err(|e| {
            error!("Failed to look up user: {}", e);
            ApiError::InternalServerError
        })?
        .ok_or(ApiError::InvalidCredentials)?;

    let password_ok = state
        .user_repository
        .verify_password(&user, &payload.password)
        .await
        .map_err(|e| {
            error!("Failed to verify password: {}", e);
            ApiError::InternalServerError
        })?;

    if !password_ok {
        return Err(ApiError::InvalidCredentials);
    }

    let token = state.jwt_service.generate_token(&user).map_err(|e| {
        error!("Failed to generate token: {}", e);
        ApiError::InternalServerError
    })?;

    let response = LoginResponse {
        token,
        username: user.username,
        name: user.name,
    };

    Ok(Json(response))
}
