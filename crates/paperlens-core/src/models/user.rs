use serde::{Deserialize, Serialize};

/// A signed-in user. Identity is established by the frontend's OAuth flow;
/// the email address is the lookup key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    pub created_at: jiff::Timestamp,
}

/// Profile fields supplied at sign-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInProfile {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
}

impl SignInProfile {
    /// Lowercased, trimmed email used as the lookup key.
    pub fn normalized_email(&self) -> String {
        self.email.trim().to_ascii_lowercase()
    }

    pub fn into_user(self, created_at: jiff::Timestamp) -> User {
        User {
            email: self.normalized_email(),
            name: self.name,
            picture: self.picture,
            created_at,
        }
    }
}
