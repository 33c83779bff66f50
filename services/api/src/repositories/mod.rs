//! Repositories for database operations

pub mod blog;
pub mod user;

// Re-export for convenience
pub use blog::BlogRepository;
pub use user::UserRepository;
