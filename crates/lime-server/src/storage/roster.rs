//! JSON file roster (the whole user list lives in one document)

use crate::error::Result;
use lime_types::User;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Record store backed by a single pretty-printed JSON array.
///
/// Every read reloads the full document and every write rewrites it. There
/// is no locking, so concurrent writers race and the last one wins.
pub struct RosterStore {
    path: PathBuf,
}

impl RosterStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the full roster. A missing or malformed file is an empty roster.
    pub async fn load(&self) -> Vec<User> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Roster file {} not found, using empty roster", self.path.display());
                return Vec::new();
            }
            Err(e) => {
                warn!("Cannot read roster file {}: {}", self.path.display(), e);
                return Vec::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(users) => users,
            Err(e) => {
                warn!("Roster file {} is malformed: {}", self.path.display(), e);
                Vec::new()
            }
        }
    }

    /// Overwrite the document with `users`. Not atomic.
    pub async fn save(&self, users: &[User]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let content = serde_json::to_string_pretty(users)?;
        tokio::fs::write(&self.path, content).await?;
        debug!("Saved {} users to {}", users.len(), self.path.display());
        Ok(())
    }

    pub async fn find_by_email(&self, email: &str) -> Option<User> {
        self.load().await.into_iter().find(|u| u.email == email)
    }
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

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = RosterStore::new(dir.path().join("users.json"));
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = RosterStore::new(path);
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_load_after_save_returns_same_roster() {
        let dir = tempfile::tempdir().unwrap();
        let store = RosterStore::new(dir.path().join("users.json"));

        let users = vec![user("a@x.com", Role::Admin), user("b@x.com", Role::User)];
        store.save(&users).await.unwrap();

        assert_eq!(store.load().await, users);
    }

    #[tokio::test]
    async fn test_save_is_pretty_printed_array() {
        let dir = tempfile::tempdir().unwrap();
        let store = RosterStore::new(dir.path().join("nested").join("users.json"));
        store.save(&[user("a@x.com", Role::User)]).await.unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.starts_with("[\n"));
        assert!(raw.contains("\"mail\": \"a@x.com\""));
    }

    #[tokio::test]
    async fn test_sparse_records_keep_roster() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");
        std::fs::write(
            &path,
            r#"[
  {"name":"Ada","surname":"Admin","mail":"admin@x.com","password":"secret","type":"admin"},
  {"name":"Bo","mail":"bo@x.com","password":"pw","type":"user"},
  {"name":"Cy","surname":"Ops","mail":"cy@x.com","password":"pw","type":"manager"}
]"#,
        )
        .unwrap();

        let store = RosterStore::new(path);
        let users = store.load().await;
        assert_eq!(users.len(), 3);
        assert_eq!(users[1].surname, "");
        assert_eq!(users[2].role, Role::User);

        let admin = store.find_by_email("admin@x.com").await.unwrap();
        assert_eq!(admin.role, Role::Admin);
    }

    #[tokio::test]
    async fn test_find_by_email() {
        let dir = tempfile::tempdir().unwrap();
        let store = RosterStore::new(dir.path().join("users.json"));
        store
            .save(&[user("a@x.com", Role::User), user("b@x.com", Role::Admin)])
            .await
            .unwrap();

        let found = store.find_by_email("b@x.com").await.unwrap();
        assert_eq!(found.role, Role::Admin);
        assert!(store.find_by_email("c@x.com").await.is_none());
    }
}
