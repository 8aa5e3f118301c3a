use std::fmt;

use crate::error::{CanvasError, Result};

/// A per-user credential: either a known cache identity (e.g. "hermione")
/// or a live API token. The lowercased form is the cache partition key.
#[derive(Clone)]
pub struct Credential {
    token: String,
}

impl Credential {
    pub fn new(token: &str) -> Result<Self> {
        if token.is_empty() {
            return Err(CanvasError::InvalidArgument { what: "credential" });
        }
        Ok(Self {
            token: token.to_owned(),
        })
    }

    /// The token exactly as given, for live requests.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// The lowercased form used for cache lookups and identity checks.
    pub fn normalized(&self) -> String {
        self.token.to_lowercase()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("token", &"<hidden>")
            .finish()
    }
}
