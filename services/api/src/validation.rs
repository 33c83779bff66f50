//! Input validation utilities

use regex::Regex;
use std::sync::OnceLock;

use crate::models::NewBlog;

/// Validate username
pub fn validate_username(username: Option<&str>) -> Result<(), String> {
    let username = match username {
        Some(u) if !u.is_empty() => u,
        _ => return Err("username is required".to_string()),
    };

    if username.len() < 3 {
        return Err("username must be at least 3 characters long".to_string());
    }

    static USERNAME_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = USERNAME_REGEX
        .get_or_init(|| Regex::new(r"^[a-zA-Z0-9_]+$").expect("Failed to compile username regex"));

    if !regex.is_match(username) {
        return Err("username can only contain letters, numbers, and underscores".to_string());
    }

    Ok(())
}

/// Validate password
pub fn validate_password(password: Option<&str>) -> Result<(), String> {
    let password = match password {
        Some(p) if !p.is_empty() => p,
        _ => return Err("password is required".to_string()),
    };

    if password.len() < 3 {
        return Err("password must be at least 3 characters long".to_string());
    }

    Ok(())
}

/// Validate a blog creation payload
pub fn validate_new_blog(blog: &NewBlog) -> Result<(), String> {
    match blog.title.as_deref() {
        Some(title) if !title.is_empty() => {}
        _ => return Err("title is required".to_string()),
    }

    match blog.url.as_deref() {
        Some(url) if !url.is_empty() => {}
        _ => return Err("url is required".to_string()),
    }

    Ok(())
}
