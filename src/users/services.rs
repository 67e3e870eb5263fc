use tracing::{info, warn};
use uuid::Uuid;

use super::dto::{CreateUserRequest, UpdateUserRequest};
use super::error::UserError;
use super::password::hash_password;
use super::repo_types::{NewUser, User, UserChanges};
use super::store::UserStore;

const USER_NOT_FOUND: &str = "User not found";

/// Trimmed value, or `None` when absent or blank.
fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub async fn create_user(store: &dyn UserStore, req: CreateUserRequest) -> Result<User, UserError> {
    let contact_email =
        present(req.contact_email).ok_or(UserError::MissingField("Contact email"))?;

    if store.find_by_email(&contact_email).await?.is_some() {
        warn!(email = %contact_email, "email already in use");
        return Err(UserError::DuplicateEmail);
    }

    let password = req
        .password
        .filter(|p| !p.is_empty())
        .ok_or(UserError::MissingField("Password"))?;
    let password_hash = hash_password(&password)?;
    drop(password);

    let user = store
        .insert(NewUser {
            band_name: req.band_name,
            label: req.label,
            genre: req.genre,
            location: req.location,
            contact_email,
            contact_phone: req.contact_phone,
            password_hash,
        })
        .await?;

    info!(user_id = %user.id, email = %user.contact_email, "user created");
    Ok(user)
}

pub async fn list_users(store: &dyn UserStore) -> Result<Vec<User>, UserError> {
    let users = store.list().await?;
    if users.is_empty() {
        return Err(UserError::NotFound("No users found"));
    }
    Ok(users)
}

pub async fn get_user(store: &dyn UserStore, id: &str) -> Result<User, UserError> {
    let id = Uuid::parse_str(id).map_err(|_| UserError::InvalidId)?;
    store
        .get(id)
        .await?
        .ok_or(UserError::NotFound(USER_NOT_FOUND))
}

/// Partial update. An id that does not parse cannot match a record and is
/// reported as not found.
pub async fn update_user(
    store: &dyn UserStore,
    id: &str,
    req: UpdateUserRequest,
) -> Result<User, UserError> {
    let id = Uuid::parse_str(id).map_err(|_| UserError::NotFound(USER_NOT_FOUND))?;

    let contact_email = match req.contact_email {
        Some(email) => Some(present(Some(email)).ok_or(UserError::MissingField("Contact email"))?),
        None => None,
    };
    let password_hash = match req.password {
        Some(p) if p.is_empty() => return Err(UserError::MissingField("Password")),
        Some(p) => Some(hash_password(&p)?),
        None => None,
    };

    let changes = UserChanges {
        band_name: req.band_name,
        label: req.label,
        genre: req.genre,
        location: req.location,
        contact_email,
        contact_phone: req.contact_phone,
        password_hash,
    };

    let user = store
        .update(id, changes)
        .await?
        .ok_or(UserError::NotFound(USER_NOT_FOUND))?;
    info!(user_id = %user.id, "user updated");
    Ok(user)
}

pub async fn delete_user(store: &dyn UserStore, id: &str) -> Result<(), UserError> {
    let id = Uuid::parse_str(id).map_err(|_| UserError::NotFound(USER_NOT_FOUND))?;
    if !store.delete(id).await? {
        return Err(UserError::NotFound(USER_NOT_FOUND));
    }
    info!(user_id = %id, "user deleted");
    Ok(())
}
