use async_trait::async_trait;
use uuid::Uuid;

use super::repo_types::{NewUser, User, UserChanges};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("contact email already in use")]
    DuplicateEmail,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Persistence seam for the user collection.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
    async fn insert(&self, user: NewUser) -> Result<User, StoreError>;
    async fn list(&self) -> anyhow::Result<Vec<User>>;
    async fn get(&self, id: Uuid) -> anyhow::Result<Option<User>>;
    async fn update(&self, id: Uuid, changes: UserChanges) -> Result<Option<User>, StoreError>;
    /// Returns `false` when nothing matched.
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
}

#[cfg(test)]
pub mod memory {
    use time::OffsetDateTime;
    use tokio::sync::RwLock;

    use super::*;

    /// Vec-backed store enforcing the same email uniqueness as the unique index.
    #[derive(Default)]
    pub struct MemoryUserStore {
        rows: RwLock<Vec<User>>,
    }

    #[async_trait]
    impl UserStore for MemoryUserStore {
        async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
            let rows = self.rows.read().await;
            Ok(rows.iter().find(|u| u.contact_email == email).cloned())
        }

        async fn insert(&self, user: NewUser) -> Result<User, StoreError> {
            let mut rows = self.rows.write().await;
            if rows.iter().any(|u| u.contact_email == user.contact_email) {
                return Err(StoreError::DuplicateEmail);
            }
            let now = OffsetDateTime::now_utc();
            let row = User {
                id: Uuid::new_v4(),
                band_name: user.band_name,
                label: user.label,
                genre: user.genre,
                location: user.location,
                contact_email: user.contact_email,
                contact_phone: user.contact_phone,
                password_hash: user.password_hash,
                created_at: now,
                updated_at: now,
            };
            rows.push(row.clone());
            Ok(row)
        }

        async fn list(&self) -> anyhow::Result<Vec<User>> {
            Ok(self.rows.read().await.clone())
        }

        async fn get(&self, id: Uuid) -> anyhow::Result<Option<User>> {
            let rows = self.rows.read().await;
            Ok(rows.iter().find(|u| u.id == id).cloned())
        }

        async fn update(&self, id: Uuid, changes: UserChanges) -> Result<Option<User>, StoreError> {
            let mut rows = self.rows.write().await;
            if let Some(email) = &changes.contact_email {
                if rows.iter().any(|u| u.id != id && &u.contact_email == email) {
                    return Err(StoreError::DuplicateEmail);
                }
            }
            let Some(row) = rows.iter_mut().find(|u| u.id == id) else {
                return Ok(None);
            };
            if let Some(v) = changes.band_name {
                row.band_name = Some(v);
            }
            if let Some(v) = changes.label {
                row.label = Some(v);
            }
            if let Some(v) = changes.genre {
                row.genre = Some(v);
            }
            if let Some(v) = changes.location {
                row.location = Some(v);
            }
            if let Some(v) = changes.contact_email {
                row.contact_email = v;
            }
            if let Some(v) = changes.contact_phone {
                row.contact_phone = Some(v);
            }
            if let Some(v) = changes.password_hash {
                row.password_hash = v;
            }
            row.updated_at = OffsetDateTime::now_utc();
            Ok(Some(row.clone()))
        }

        async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
            let mut rows = self.rows.write().await;
            let before = rows.len();
            rows.retain(|u| u.id != id);
            Ok(rows.len() != before)
        }
    }
}
