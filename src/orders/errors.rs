//! Orders Errors

use reqwest::StatusCode;
use thiserror::Error;

use crate::client::ApiError;

/// Errors raised by the order endpoints.
#[derive(Debug, Error)]
pub enum OrdersError {
    /// The backend did not accept the credential.
    #[error("not signed in")]
    Unauthorized,

    /// The request to the backend failed.
    #[error(transparent)]
    Api(ApiError),
}

impl From<ApiError> for OrdersError {
    fn from(error: ApiError) -> Self {
        match error {
            ApiError::Rejected { status, .. }
                if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN =>
            {
                OrdersError::Unauthorized
            }
            error => OrdersError::Api(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_rejections_map_to_unauthorized() {
        let error = OrdersError::from(ApiError::Rejected {
            status: StatusCode::UNAUTHORIZED,
            message: Some("jwt expired".to_string()),
        });

        assert!(matches!(error, OrdersError::Unauthorized));
    }

    #[test]
    fn other_rejections_are_kept() {
        let error = OrdersError::from(ApiError::Rejected {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: Some("Invalid address".to_string()),
        });

        assert!(matches!(
            error,
            OrdersError::Api(ApiError::Rejected { status, .. }) if status == StatusCode::UNPROCESSABLE_ENTITY
        ));
    }
}
