// ABOUTME: Shared utility functions for TaskFlow
// ABOUTME: Identity generation for tasks and categories

use crate::constants::CATEGORY_ID_PREFIX;

/// Generate an opaque task id
pub fn generate_task_id() -> String {
    nanoid::nanoid!()
}

/// Generate an opaque category id (`cat-` prefixed)
pub fn generate_category_id() -> String {
    format!("{}{}", CATEGORY_ID_PREFIX, nanoid::nanoid!())
}
