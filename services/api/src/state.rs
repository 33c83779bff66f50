//! Application state shared across handlers

use sqlx::PgPool;

use crate::{
    jwt::JwtService,
    repositories::{BlogRepository, UserRepository},
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_service: JwtService,
    pub blog_repository: BlogRepository,
    pub user_repository: UserRepository,
}
