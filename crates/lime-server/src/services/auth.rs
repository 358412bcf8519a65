//! Authentication service

use crate::storage::{RosterStore, SessionTable};
use lime_types::User;
use std::sync::Arc;
use tracing::{info, warn};

pub struct AuthService {
    roster: Arc<RosterStore>,
    sessions: Arc<SessionTable>,
}

impl AuthService {
    pub fn new(roster: Arc<RosterStore>, sessions: Arc<SessionTable>) -> Self {
        Self { roster, sessions }
    }

    /// Check credentials and open a session, returning its token.
    ///
    /// Passwords are compared as stored (plaintext).
    pub async fn login(&self, email: &str, password: &str) -> Option<String> {
        match self.roster.find_by_email(email).await {
            Some(user) if user.password == password => {
                let token = self.sessions.create(&user.email);
                info!(
                    "Login successful for: {} ({} active sessions)",
                    email,
                    self.sessions.len()
                );
                Some(token)
            }
            _ => {
                warn!("Login failed for: {}", email);
                None
            }
        }
    }

    pub fn logout(&self, token: &str) {
        self.sessions.destroy(token);
    }

    /// Resolve the caller from a session token.
    ///
    /// A live session whose user has been removed from the roster resolves
    /// to nobody.
    pub async fn current_user(&self, token: Option<&str>) -> Option<User> {
        let email = self.sessions.resolve(token?)?;
        self.roster.find_by_email(&email).await
    }
}

/// True iff there is a user and that user is an admin
pub fn require_admin(user: Option<&User>) -> bool {
    user.map(User::is_admin).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lime_types::Role;

    fn user(email: &str, role: Role) -> User {
        User {
            name: "Test".to_string(),
            surname: "User".to_string(),
            email: email.to_string(),
            password: "secret".to_string(),
            role,
        }
    }

    async fn service(users: &[User]) -> (AuthService, Arc<SessionTable>, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let roster = Arc::new(RosterStore::new(dir.path().join("users.json")));
        roster.save(users).await.unwrap();
        let sessions = Arc::new(SessionTable::new());
        (AuthService::new(roster, sessions.clone()), sessions, dir)
    }

    #[test]
    fn test_require_admin() {
        assert!(!require_admin(None));
        assert!(!require_admin(Some(&user("u@x.com", Role::User))));
        assert!(require_admin(Some(&user("a@x.com", Role::Admin))));
    }

    #[tokio::test]
    async fn test_login_and_current_user() {
        let (auth, sessions, _dir) = service(&[user("a@x.com", Role::Admin)]).await;

        let token = auth.login("a@x.com", "secret").await.unwrap();
        assert_eq!(sessions.len(), 1);

        let current = auth.current_user(Some(&token)).await.unwrap();
        assert_eq!(current.email, "a@x.com");

        auth.logout(&token);
        assert!(auth.current_user(Some(&token)).await.is_none());
    }

    #[tokio::test]
    async fn test_login_rejects_bad_credentials() {
        let (auth, sessions, _dir) = service(&[user("a@x.com", Role::Admin)]).await;

        assert!(auth.login("a@x.com", "wrong").await.is_none());
        assert!(auth.login("b@x.com", "secret").await.is_none());
        assert!(sessions.is_empty());
    }

    #[tokio::test]
    async fn test_no_token_is_nobody() {
        let (auth, _sessions, _dir) = service(&[user("a@x.com", Role::Admin)]).await;
        assert!(auth.current_user(None).await.is_none());
        assert!(auth.current_user(Some("deadbeef")).await.is_none());
    }

    #[tokio::test]
    async fn test_deleted_user_session_is_nobody() {
        let dir = tempfile::tempdir().unwrap();
        let roster = Arc::new(RosterStore::new(dir.path().join("users.json")));
        roster.save(&[user("a@x.com", Role::Admin)]).await.unwrap();
        let auth = AuthService::new(roster.clone(), Arc::new(SessionTable::new()));

        let token = auth.login("a@x.com", "secret").await.unwrap();
        roster.save(&[]).await.unwrap();

        assert!(auth.current_user(Some(&token)).await.is_none());
    }
}
