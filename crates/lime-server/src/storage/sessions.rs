//! In-memory session table using DashMap

use dashmap::DashMap;
use rand::rngs::OsRng;
use rand::RngCore;

/// Token width in bytes (rendered as 32 hex characters)
const TOKEN_BYTES: usize = 16;

/// Maps opaque session tokens to user emails for the life of the process.
///
/// Nothing expires and nothing is persisted; a restart signs everyone out.
pub struct SessionTable {
    data: DashMap<String, String>,
}

impl SessionTable {
    pub fn new() -> Self {
        Self {
            data: DashMap::new(),
        }
    }

    /// Bind a fresh random token to `email` and return it
    pub fn create(&self, email: &str) -> String {
        let mut buf = [0u8; TOKEN_BYTES];
        OsRng.fill_bytes(&mut buf);
        let token = hex::encode(buf);

        self.data.insert(token.clone(), email.to_string());
        token
    }

    pub fn resolve(&self, token: &str) -> Option<String> {
        self.data.get(token).map(|entry| entry.value().clone())
    }

    /// Remove a binding; unknown tokens are ignored
    pub fn destroy(&self, token: &str) {
        self.data.remove(token);
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Paired with `len`; only tests call it today.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Default for SessionTable {
    fn default() -> Self {
        Self::new()
    }
}
