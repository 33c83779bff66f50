//! Middleware for request logging and session-token authentication

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use tracing::{error, info};
use uuid::Uuid;

use crate::{error::ApiError, state::AppState};

/// Authenticated user information attached to the request
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub username: String,
}

/// Extract and validate the session token from the Authorization header
///
/// On success the resolved identity is inserted into the request extensions
/// for downstream handlers.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    // Extract the Authorization header
    let auth_header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or(ApiError::Unauthorized)?;

    // Check if it's a Bearer token
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(ApiError::Unauthorized)?;

    // Validate the token
    let claims = state.jwt_service.validate_token(token).map_err(|e| {
        error!("Failed to validate token: {}", e);
        ApiError::Unauthorized
    })?;

    // Insert the resolved identity into the request extensions
    let user = AuthUser {
        id: claims.id,
        username: claims.username,
    };
    req.extensions_mut().insert(user);

    // Continue with the request
    Ok(next.run(req).await)
}

/// Log method, path, and body for every incoming request
///
/// The body is buffered so it can be logged and then replayed into the
/// handler chain. Observability only, no behavioral effect.
pub async fn request_logger(req: Request<Body>, next: Next) -> Result<Response, ApiError> {
    let (parts, body) = req.into_parts();

    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .map_err(|_| ApiError::Validation("malformed request body".to_string()))?;

    info!(
        "{} {} body: {}",
        parts.method,
        parts.uri.path(),
        String::from_utf8_lossy(&bytes)
    );

    let req = Request::from_parts(parts, Body::from(bytes));
    Ok(next.run(req).await)
}
