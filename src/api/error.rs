use crate::application::booking::BookingApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::types::ErrorResponse;

/// API層のエラー型
///
/// アプリケーション層のエラーをラップし、HTTPレスポンスへのマッピングを提供する。
#[derive(Debug)]
pub struct ApiError(BookingApplicationError);

impl From<BookingApplicationError> for ApiError {
    fn from(err: BookingApplicationError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self.0 {
            // 404 Not Found - リクエストされたリソースが存在しない
            BookingApplicationError::BookingNotFound => (
                StatusCode::NOT_FOUND,
                "BOOKING_NOT_FOUND",
                "Booking not found".to_string(),
            ),

            // 400 Bad Request - 入力の形式不正
            BookingApplicationError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg)
            }

            // 409 Conflict - 承認済み予約との時間帯重複
            BookingApplicationError::BookingConflict => (
                StatusCode::CONFLICT,
                "BOOKING_CONFLICT",
                "This time slot is already booked. Please select a different time.".to_string(),
            ),

            // 422 Unprocessable Entity - ビジネスルール違反
            BookingApplicationError::UserNotFound => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "USER_NOT_FOUND",
                "User not found".to_string(),
            ),
            BookingApplicationError::InvalidBookingState(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "INVALID_BOOKING_STATE", msg)
            }
            BookingApplicationError::DomainError(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "DOMAIN_ERROR", msg)
            }

            // 500 Internal Server Error - システム障害
            // 内部エラーの詳細はログに記録し、クライアントには一般的なメッセージのみを返す
            BookingApplicationError::EventStoreError(ref e) => {
                tracing::error!("Event store error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "EVENT_STORE_ERROR",
                    "Failed to store event".to_string(),
                )
            }
            BookingApplicationError::ReadModelError(ref e) => {
                tracing::error!("Read model error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "READ_MODEL_ERROR",
                    "Failed to update read model".to_string(),
                )
            }
            BookingApplicationError::UserRepositoryError(ref e) => {
                tracing::error!("User repository error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "USER_REPOSITORY_ERROR",
                    "User repository error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse::new(error_type, message));
        (status, body).into_response()
    }
}

/// 認証まわりのエラー型
///
/// トークンの欠落・不正は401を返す。認可は行わないため403は存在しない。
#[derive(Debug)]
pub enum AuthError {
    InvalidCredentials,
    MissingToken,
    InvalidToken,
    Internal(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            AuthError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "INVALID_CREDENTIALS",
                "Invalid username or password".to_string(),
            ),
            AuthError::MissingToken => (
                StatusCode::UNAUTHORIZED,
                "MISSING_TOKEN",
                "Authorization bearer token is required".to_string(),
            ),
            AuthError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "INVALID_TOKEN",
                "Invalid or expired token".to_string(),
            ),
            AuthError::Internal(msg) => {
                tracing::error!("Internal error in auth: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "AUTH_SERVICE_ERROR",
                    "An unexpected error occurred".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse::new(error_type, message));
        (status, body).into_response()
    }
}
