//! Bloglist service models

pub mod blog;
pub mod user;

// Re-export for convenience
pub use blog::{Blog, BlogResponse, BlogSummary, CreatorSummary, NewBlog, UpdateBlog};
pub use user::{LoginRequest, LoginResponse, NewUser, User, UserResponse};
