use std::fmt;

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct UserId {
    id: u64,
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.id.fmt(f)
    }
}

/// A user profile, as returned by `users/self/profile`. Canvas omits
/// `title` and `bio` for users who never filled them in.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    id: UserId,
    name: String,
    primary_email: String,
    title: Option<String>,
    bio: Option<String>,
}

impl User {
    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn primary_email(&self) -> &str {
        &self.primary_email
    }

    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    pub fn bio(&self) -> &str {
        self.bio.as_deref().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_profile_without_optional_fields() {
        let user: User = serde_json::from_str(
            r#"{"id": 7, "name": "Ron Weasley", "primary_email": "ron@hogwarts.edu"}"#,
        )
        .unwrap();
        assert_eq!(user.name(), "Ron Weasley");
        assert_eq!(user.title(), "");
        assert_eq!(user.bio(), "");
    }
}
