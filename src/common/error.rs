use async_graphql::ErrorExtensions;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::error;

pub type ServiceResult<T> = Result<T, AppError>;

#[track_caller]
pub fn unexpected<T, E: Into<anyhow::Error>>(e: E) -> ServiceResult<T> {
    let caller = std::panic::Location::caller();
    error!("An unexpected error has occurred at {caller}: {}", e.into());
    Err(AppError::Unexpected)
}

/// Logs the store error and replaces it with `error`, so callers only ever
/// see the fixed message for the operation.
#[track_caller]
pub fn failed<T, E: Into<anyhow::Error>>(error: AppError, e: E) -> ServiceResult<T> {
    let caller = std::panic::Location::caller();
    error!(code = error.code(), "{} at {caller}: {}", error.message(), e.into());
    Err(error)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppError {
    Unexpected,
    DecodingRequestFailed,
    MethodNotAllowed,

    MessagesFetchFailed,
    MessagesFetchOneFailed,
    MessagesCreateFailed,
    MessagesUpdateFailed,
    MessagesDeleteFailed,
}

impl<E: Into<anyhow::Error>> From<E> for AppError {
    #[track_caller]
    fn from(e: E) -> Self {
        unexpected::<(), E>(e).unwrap_err()
    }
}

impl AppError {
    pub const fn code(&self) -> &'static str {
        match self {
            AppError::Unexpected => "unexpected",
            AppError::DecodingRequestFailed => "decoding_request_failed",
            AppError::MethodNotAllowed => "method_not_allowed",

            AppError::MessagesFetchFailed => "messages.fetch_failed",
            AppError::MessagesFetchOneFailed => "messages.fetch_one_failed",
            AppError::MessagesCreateFailed => "messages.create_failed",
            AppError::MessagesUpdateFailed => "messages.update_failed",
            AppError::MessagesDeleteFailed => "messages.delete_failed",
        }
    }

    pub const fn message(&self) -> &'static str {
        match self {
            AppError::Unexpected => "An unexpected error has occurred.",
            AppError::DecodingRequestFailed => "Failed to decode request",
            AppError::MethodNotAllowed => "Mutations must be sent with POST",

            AppError::MessagesFetchFailed => "Failed to fetch messages",
            AppError::MessagesFetchOneFailed => "Failed to fetch message by ID",
            AppError::MessagesCreateFailed => "Failed to create message",
            AppError::MessagesUpdateFailed => "Failed to update message",
            AppError::MessagesDeleteFailed => "Failed to delete message",
        }
    }

    pub const fn http_status_code(&self) -> StatusCode {
        match self {
            AppError::DecodingRequestFailed => StatusCode::BAD_REQUEST,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,

            AppError::Unexpected
            | AppError::MessagesFetchFailed
            | AppError::MessagesFetchOneFailed
            | AppError::MessagesCreateFailed
            | AppError::MessagesUpdateFailed
            | AppError::MessagesDeleteFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn response_parts(&self) -> (StatusCode, Json<ErrorResponse>) {
        let status = self.http_status_code();
        let response = ErrorResponse {
            errors: vec![ErrorBody {
                message: self.message(),
                extensions: ErrorCode { code: self.code() },
            }],
        };
        (status, Json(response))
    }
}

/// GraphQL-shaped error envelope, so HTTP-level rejections parse the same way
/// as field errors on the client.
#[derive(Serialize)]
pub struct ErrorResponse {
    pub errors: Vec<ErrorBody>,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub message: &'static str,
    pub extensions: ErrorCode,
}

#[derive(Serialize)]
pub struct ErrorCode {
    pub code: &'static str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.response_parts().into_response()
    }
}

impl ErrorExtensions for AppError {
    fn extend(&self) -> async_graphql::Error {
        let code = self.code();
        async_graphql::Error::new(self.message()).extend_with(|_, e| e.set("code", code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_are_hidden_behind_operation_message() {
        let err: ServiceResult<()> = failed(
            AppError::MessagesUpdateFailed,
            anyhow::anyhow!("no rows returned by a query that expected to return at least one row"),
        );
        let err = err.unwrap_err();
        assert_eq!(err, AppError::MessagesUpdateFailed);
        assert_eq!(err.message(), "Failed to update message");
    }

    #[test]
    fn foreign_errors_become_unexpected() {
        let err = AppError::from(std::io::Error::other("disk on fire"));
        assert_eq!(err, AppError::Unexpected);
        assert_eq!(err.http_status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn graphql_error_carries_code_extension() {
        let err = AppError::MessagesCreateFailed.extend();
        assert_eq!(err.message, "Failed to create message");
        let extensions = err.extensions.expect("extensions set");
        assert_eq!(
            extensions.get("code"),
            Some(&async_graphql::Value::from("messages.create_failed"))
        );
    }

    #[test]
    fn request_errors_map_to_client_statuses() {
        assert_eq!(
            AppError::DecodingRequestFailed.http_status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::MethodNotAllowed.http_status_code(),
            StatusCode::METHOD_NOT_ALLOWED
        );
    }
}
