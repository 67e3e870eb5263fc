use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Band account as stored in the `users` table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub band_name: Option<String>,
    pub label: Option<String>,
    pub genre: Option<String>,
    pub location: Option<String>,
    pub contact_email: String,
    pub contact_phone: Option<String>,
    pub password_hash: String, // argon2 PHC string, never plaintext
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Insert payload; the password is already hashed.
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub band_name: Option<String>,
    pub label: Option<String>,
    pub genre: Option<String>,
    pub location: Option<String>,
    pub contact_email: String,
    pub contact_phone: Option<String>,
    pub password_hash: String,
}

/// Partial update. `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub band_name: Option<String>,
    pub label: Option<String>,
    pub genre: Option<String>,
    pub location: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub password_hash: Option<String>,
}
