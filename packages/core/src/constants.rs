use std::env;
use std::path::PathBuf;

/// Name of the SQLite database file inside the TaskFlow directory
pub const DATABASE_FILE: &str = "taskflow.db";

/// Name of the persisted login session inside the TaskFlow directory
pub const SESSION_FILE: &str = "session.json";

/// Prefix for server-assigned category ids
pub const CATEGORY_ID_PREFIX: &str = "cat-";

/// Owner assigned to records created without an explicit user
pub const DEFAULT_USER_ID: &str = "1";

/// Get the path to the TaskFlow directory (~/.taskflow)
pub fn taskflow_dir() -> PathBuf {
    // First try HOME environment variable (useful for tests)
    if let Ok(home) = env::var("HOME") {
        PathBuf::from(home).join(".taskflow")
    } else {
        dirs::home_dir()
            .unwrap_or_else(env::temp_dir)
            .join(".taskflow")
    }
}

/// Get the default database path (~/.taskflow/taskflow.db)
pub fn database_file() -> PathBuf {
    taskflow_dir().join(DATABASE_FILE)
}

/// Get the default session path (~/.taskflow/session.json)
pub fn session_file() -> PathBuf {
    taskflow_dir().join(SESSION_FILE)
}
