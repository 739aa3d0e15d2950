use chrono::{DateTime, Utc};
use serde::Serialize;

/// A row of the `users` table.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow, Serialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub role: i16,
    pub created_at: DateTime<Utc>,
}

/// Fields a caller supplies to create a user, before validation.
#[derive(Clone, Default)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub password: String,
    pub password_confirm: String,
    pub role: i32,
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("email", &self.email)
            .field("name", &self.name)
            .field("password", &"<redacted>")
            .field("password_confirm", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}
