use anyhow::Context;
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::repo_types::{NewUser, User, UserChanges};
use super::store::{StoreError, UserStore};

const USER_COLUMNS: &str = "id, band_name, label, genre, location, contact_email, \
                            contact_phone, password_hash, created_at, updated_at";

#[derive(Clone)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Insert many users with a single multi-row statement.
    pub async fn insert_many(&self, users: &[NewUser]) -> anyhow::Result<u64> {
        if users.is_empty() {
            return Ok(0);
        }
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(
            "INSERT INTO users (band_name, label, genre, location, contact_email, \
             contact_phone, password_hash) ",
        );
        qb.push_values(users, |mut row, u| {
            row.push_bind(&u.band_name)
                .push_bind(&u.label)
                .push_bind(&u.genre)
                .push_bind(&u.location)
                .push_bind(&u.contact_email)
                .push_bind(&u.contact_phone)
                .push_bind(&u.password_hash);
        });
        let res = qb
            .build()
            .execute(&self.db)
            .await
            .context("batch insert users")?;
        Ok(res.rows_affected())
    }
}

/// Unique index violations surface as a typed error, everything else as a fault.
fn map_write_err(e: sqlx::Error, what: &'static str) -> StoreError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::DuplicateEmail,
        _ => StoreError::Other(anyhow::Error::new(e).context(what)),
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE contact_email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.db)
        .await
        .context("find user by email")?;
        Ok(user)
    }

    async fn insert(&self, user: NewUser) -> Result<User, StoreError> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (band_name, label, genre, location, contact_email,
                               contact_phone, password_hash)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user.band_name)
        .bind(user.label)
        .bind(user.genre)
        .bind(user.location)
        .bind(user.contact_email)
        .bind(user.contact_phone)
        .bind(user.password_hash)
        .fetch_one(&self.db)
        .await
        .map_err(|e| map_write_err(e, "insert user"))
    }

    async fn list(&self) -> anyhow::Result<Vec<User>> {
        let rows = sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users"))
            .fetch_all(&self.db)
            .await
            .context("list users")?;
        Ok(rows)
    }

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .context("get user by id")?;
        Ok(user)
    }

    async fn update(&self, id: Uuid, changes: UserChanges) -> Result<Option<User>, StoreError> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
               SET band_name     = COALESCE($2, band_name),
                   label         = COALESCE($3, label),
                   genre         = COALESCE($4, genre),
                   location      = COALESCE($5, location),
                   contact_email = COALESCE($6, contact_email),
                   contact_phone = COALESCE($7, contact_phone),
                   password_hash = COALESCE($8, password_hash),
                   updated_at    = now()
             WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(changes.band_name)
        .bind(changes.label)
        .bind(changes.genre)
        .bind(changes.location)
        .bind(changes.contact_email)
        .bind(changes.contact_phone)
        .bind(changes.password_hash)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| map_write_err(e, "update user"))
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .context("delete user")?;
        Ok(res.rows_affected() > 0)
    }
}
