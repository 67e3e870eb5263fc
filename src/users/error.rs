use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use super::dto::ErrorResponse;
use super::store::StoreError;

/// Outcome kinds of the user operations.
#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error("Email already in use")]
    DuplicateEmail,
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("Invalid user ID")]
    InvalidId,
    #[error("{0}")]
    NotFound(&'static str),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl UserError {
    pub fn status(&self) -> StatusCode {
        match self {
            UserError::DuplicateEmail | UserError::MissingField(_) | UserError::InvalidId => {
                StatusCode::BAD_REQUEST
            }
            UserError::NotFound(_) => StatusCode::NOT_FOUND,
            UserError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for UserError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::DuplicateEmail => UserError::DuplicateEmail,
            StoreError::Other(e) => UserError::Internal(e),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            UserError::Internal(e) => {
                error!(error = ?e, "unhandled error");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_4xx() {
        assert_eq!(UserError::DuplicateEmail.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            UserError::MissingField("password").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(UserError::InvalidId.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            UserError::NotFound("User not found").status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn messages_match_wire_format() {
        assert_eq!(
            UserError::MissingField("Password").to_string(),
            "Password is required"
        );
        assert_eq!(UserError::InvalidId.to_string(), "Invalid user ID");
    }

    #[test]
    fn store_duplicate_becomes_duplicate_email() {
        let err: UserError = StoreError::DuplicateEmail.into();
        assert!(matches!(err, UserError::DuplicateEmail));

        let err: UserError = StoreError::Other(anyhow::anyhow!("boom")).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
