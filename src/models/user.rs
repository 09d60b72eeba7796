use serde::{Deserialize, Serialize};

/// A registered account. `password` holds an Argon2 PHC string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub password: String,
    #[serde(default)]
    pub photo: String,
}

/// The logged-in user, stored under its own key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub name: String,
    pub email: String,
}

impl UserRecord {
    pub fn session(&self) -> Session {
        Session {
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

impl Session {
    /// First word of the display name, used for greetings.
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }
}
