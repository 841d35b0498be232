// ABOUTME: Core entity types, merge rules and validation for TaskFlow
// ABOUTME: Foundational package shared by the storage, API, client and CLI packages

pub mod constants;
pub mod dates;
pub mod types;
pub mod utils;
pub mod validation;

// Re-export main types
pub use types::{
    Category, CategoryCreateInput, CategoryUpdateInput, ParseEnumError, Task, TaskCreateInput,
    TaskPriority, TaskStatus, TaskUpdateInput, User,
};

// Re-export constants
pub use constants::{database_file, session_file, taskflow_dir, DEFAULT_USER_ID};

// Re-export utilities
pub use dates::{parse_due_date, DateParseError};
pub use utils::{generate_category_id, generate_task_id};
pub use validation::{is_valid_color, ValidationError};
