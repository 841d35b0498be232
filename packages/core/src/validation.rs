// ABOUTME: Input validation applied at the gateway boundary
// ABOUTME: Rejects empty titles, empty category names and malformed colors

use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

use crate::types::{CategoryCreateInput, CategoryUpdateInput, TaskCreateInput, TaskUpdateInput};

/// A single rejected field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }
}

fn color_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("color pattern is valid")
    })
}

/// True for `#rgb` and `#rrggbb` hex colors
pub fn is_valid_color(color: &str) -> bool {
    color_pattern().is_match(color)
}

pub fn validate_task_create(input: &TaskCreateInput) -> Result<(), ValidationError> {
    if input.title.trim().is_empty() {
        return Err(ValidationError::new("title", "Title is required"));
    }
    if input.due_date.is_none() {
        return Err(ValidationError::new("dueDate", "Due date is required"));
    }
    if let Some(user_id) = &input.user_id {
        if user_id.trim().is_empty() {
            return Err(ValidationError::new("userId", "Owner cannot be empty"));
        }
    }
    Ok(())
}

pub fn validate_task_update(input: &TaskUpdateInput) -> Result<(), ValidationError> {
    if let Some(title) = &input.title {
        if title.trim().is_empty() {
            return Err(ValidationError::new("title", "Title cannot be empty"));
        }
    }
    Ok(())
}

pub fn validate_category_create(input: &CategoryCreateInput) -> Result<(), ValidationError> {
    if input.name.trim().is_empty() {
        return Err(ValidationError::new("name", "Category name is required"));
    }
    if input.color.trim().is_empty() {
        return Err(ValidationError::new("color", "Color is required"));
    }
    if !is_valid_color(&input.color) {
        return Err(ValidationError::new(
            "color",
            format!("'{}' is not a hex color", input.color),
        ));
    }
    if let Some(user_id) = &input.user_id {
        if user_id.trim().is_empty() {
            return Err(ValidationError::new("userId", "Owner cannot be empty"));
        }
    }
    Ok(())
}

pub fn validate_category_update(input: &CategoryUpdateInput) -> Result<(), ValidationError> {
    if let Some(name) = &input.name {
        if name.trim().is_empty() {
            return Err(ValidationError::new("name", "Category name cannot be empty"));
        }
    }
    if let Some(color) = &input.color {
        if !is_valid_color(color) {
            return Err(ValidationError::new(
                "color",
                format!("'{}' is not a hex color", color),
            ));
        }
    }
    Ok(())
}
