// ABOUTME: Mock authentication store holding the current principal
// ABOUTME: Persists the signed-in user to a session file and restores it on start

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use taskflow_core::{User, DEFAULT_USER_ID};
use tokio::sync::watch;
use tracing::{debug, info, warn};

pub const DEMO_AVATAR: &str = "https://i.pravatar.cc/150?u=demo";
const DEMO_NAME: &str = "Demo User";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuthState {
    pub user: Option<User>,
    pub is_authenticated: bool,
    pub loading: bool,
    pub error: Option<String>,
}

/// Signed-in user for the CLI session.
///
/// There is no credential check: any non-empty email and password sign in
/// as the demo principal.
pub struct AuthStore {
    session_path: Option<PathBuf>,
    state: watch::Sender<AuthState>,
}

impl AuthStore {
    /// Store without persistence
    pub fn in_memory() -> Self {
        Self::build(None, AuthState::default())
    }

    /// Store persisted at `path`, restoring a previous session if one exists
    pub fn with_session_file(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let initial = match load_session(&path) {
            Some(user) => AuthState {
                user: Some(user),
                is_authenticated: true,
                ..Default::default()
            },
            None => AuthState::default(),
        };
        Self::build(Some(path), initial)
    }

    fn build(session_path: Option<PathBuf>, initial: AuthState) -> Self {
        let (state, _) = watch::channel(initial);
        Self {
            session_path,
            state,
        }
    }

    pub fn snapshot(&self) -> AuthState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    pub fn current_user(&self) -> Option<User> {
        self.state.borrow().user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated
    }

    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    /// Id to act as: the signed-in user, else the default owner
    pub fn principal_id(&self) -> String {
        self.current_user()
            .map(|u| u.id)
            .unwrap_or_else(|| DEFAULT_USER_ID.to_string())
    }

    pub fn login(&self, email: &str, password: &str) -> Option<User> {
        self.begin();
        if email.trim().is_empty() || password.is_empty() {
            self.fail("Invalid credentials");
            return None;
        }

        let user = User {
            id: DEFAULT_USER_ID.to_string(),
            name: DEMO_NAME.to_string(),
            email: email.trim().to_string(),
            avatar: Some(DEMO_AVATAR.to_string()),
        };
        info!("Signed in as {}", user.email);
        self.sign_in(user.clone());
        Some(user)
    }

    pub fn register(&self, name: &str, email: &str, password: &str) -> Option<User> {
        self.begin();
        if name.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
            self.fail("Registration failed");
            return None;
        }

        let user = User {
            id: DEFAULT_USER_ID.to_string(),
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            avatar: Some(DEMO_AVATAR.to_string()),
        };
        info!("Registered {}", user.email);
        self.sign_in(user.clone());
        Some(user)
    }

    pub fn logout(&self) {
        if let Some(path) = &self.session_path {
            match fs::remove_file(path) {
                Ok(()) => debug!("Removed session file {}", path.display()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => warn!("Failed to remove session file {}: {}", path.display(), e),
            }
        }
        self.state.send_modify(|s| {
            s.user = None;
            s.is_authenticated = false;
        });
    }

    fn begin(&self) {
        self.state.send_modify(|s| {
            s.loading = true;
            s.error = None;
        });
    }

    fn fail(&self, message: &str) {
        warn!("{}", message);
        self.state.send_modify(|s| {
            s.loading = false;
            s.error = Some(message.to_string());
        });
    }

    fn sign_in(&self, user: User) {
        if let Some(path) = &self.session_path {
            if let Err(e) = save_session(path, &user) {
                warn!("Failed to persist session to {}: {}", path.display(), e);
            }
        }
        self.state.send_modify(|s| {
            s.user = Some(user);
            s.is_authenticated = true;
            s.loading = false;
        });
    }
}

fn load_session(path: &Path) -> Option<User> {
    let content = fs::read_to_string(path).ok()?;
    match serde_json::from_str(&content) {
        Ok(user) => Some(user),
        Err(e) => {
            warn!("Ignoring unreadable session file {}: {}", path.display(), e);
            None
        }
    }
}

fn save_session(path: &Path, user: &User) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(user)?;
    fs::write(path, json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_login_sets_demo_principal() {
        let store = AuthStore::in_memory();

        let user = store.login("demo@example.com", "secret").unwrap();

        assert_eq!(user.id, "1");
        assert_eq!(user.avatar.as_deref(), Some(DEMO_AVATAR));
        assert!(store.is_authenticated());
        assert!(!store.snapshot().loading);
    }

    #[test]
    fn test_login_rejects_empty_credentials() {
        let store = AuthStore::in_memory();

        assert!(store.login("", "secret").is_none());

        assert_eq!(store.error().as_deref(), Some("Invalid credentials"));
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_register_rejects_missing_name() {
        let store = AuthStore::in_memory();

        assert!(store.register(" ", "a@b.c", "pw").is_none());

        assert_eq!(store.error().as_deref(), Some("Registration failed"));
    }

    #[test]
    fn test_session_survives_restart() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let store = AuthStore::with_session_file(&path);
        store.register("Ada", "ada@example.com", "pw").unwrap();

        let restored = AuthStore::with_session_file(&path);
        assert!(restored.is_authenticated());
        assert_eq!(restored.current_user().unwrap().name, "Ada");

        restored.logout();
        assert!(!path.exists());
        assert!(!AuthStore::with_session_file(&path).is_authenticated());
    }

    #[test]
    fn test_corrupt_session_is_ignored() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "not json").unwrap();

        let store = AuthStore::with_session_file(&path);

        assert!(!store.is_authenticated());
        assert_eq!(store.principal_id(), DEFAULT_USER_ID);
    }
}
