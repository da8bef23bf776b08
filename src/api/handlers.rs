use crate::application::booking::{
    BookingApplicationError, ServiceDependencies, approve_booking as execute_approve_booking,
    cancel_booking as execute_cancel_booking, reject_booking as execute_reject_booking,
    submit_booking as execute_submit_booking,
};
use crate::domain::value_objects::{BookingId, UserId};
use crate::ports::auth_service::AuthService;
use crate::ports::booking_read_model::BookingReadModel;
use axum::{
    Extension, Json,
    extract::{Path, Query, Request, State},
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use uuid::Uuid;

use super::{
    error::{ApiError, AuthError},
    types::{
        BookingCreatedResponse, BookingResponse, BookingStatusResponse, ListBookingsQuery,
        LoginRequest, LoginResponse, SubmitBookingRequest,
    },
};

// ============================================================================
// State
// ============================================================================

/// ハンドラー間で共有されるアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub service_deps: ServiceDependencies,
    pub auth_service: Arc<dyn AuthService>,
}

/// 認証済み利用者
///
/// require_authミドルウェアがリクエスト拡張として挿入する。
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub UserId);

// ============================================================================
// Authentication
// ============================================================================

/// POST /auth/login - 資格情報を検証してトークンを発行
///
/// 資格情報が不正な場合は401を返す。
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AuthError> {
    let token = state
        .auth_service
        .issue_token(&req.username, &req.password)
        .await
        .map_err(|e| AuthError::Internal(e.to_string()))?
        .ok_or(AuthError::InvalidCredentials)?;

    Ok(Json(LoginResponse {
        access_token: token.value().to_string(),
    }))
}

/// 予約の変更系エンドポイントを保護するミドルウェア
///
/// Authorizationヘッダーのベアラートークンを検証し、
/// 認証済み利用者をリクエスト拡張として後続ハンドラーに渡す。
/// 「認証済みかどうか」のみを確認し、それ以上の認可は行わない。
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(AuthError::MissingToken)?;

    let user_id = state
        .auth_service
        .verify_token(token)
        .await
        .map_err(|e| AuthError::Internal(e.to_string()))?
        .ok_or(AuthError::InvalidToken)?;

    req.extensions_mut().insert(CurrentUser(user_id));
    Ok(next.run(req).await)
}

// ============================================================================
// Command handlers (POST)
// ============================================================================

/// POST /bookings - 新しい予約を申請
///
/// 認証済み利用者による会場予約の申請を作成する。
///
/// 強制されるビジネスルール:
/// - 申請者が存在すること
/// - 終了時刻が開始時刻より厳密に後であること
/// - 同一会場の承認済み予約と時間帯が重複しないこと
pub async fn submit_booking(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<CurrentUser>,
    Json(req): Json<SubmitBookingRequest>,
) -> Result<(StatusCode, Json<BookingCreatedResponse>), ApiError> {
    let cmd = req
        .to_command(current_user.0, chrono::Utc::now())
        .map_err(|msg| ApiError::from(BookingApplicationError::Validation(msg)))?;

    let booking_id = execute_submit_booking(&state.service_deps, cmd).await?;

    // 作成された予約を取得して完全な情報を返す
    let booking_view = state
        .service_deps
        .booking_read_model
        .get_by_id(booking_id)
        .await
        .map_err(|e| ApiError::from(BookingApplicationError::ReadModelError(e)))?
        .ok_or_else(|| ApiError::from(BookingApplicationError::BookingNotFound))?;

    let response = BookingCreatedResponse {
        booking_id: booking_id.value(),
        venue: booking_view.venue.as_str().to_string(),
        starts_at: booking_view.starts_at,
        ends_at: booking_view.ends_at,
        status: booking_view.status.as_str().to_string(),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// 状態変更後の予約を取得してレスポンスを構築するヘルパー関数
///
/// approve / reject / cancel で共通利用される。
async fn status_response(
    state: &Arc<AppState>,
    booking_id: BookingId,
) -> Result<Json<BookingStatusResponse>, ApiError> {
    let booking_view = state
        .service_deps
        .booking_read_model
        .get_by_id(booking_id)
        .await
        .map_err(|e| ApiError::from(BookingApplicationError::ReadModelError(e)))?
        .ok_or_else(|| ApiError::from(BookingApplicationError::BookingNotFound))?;

    Ok(Json(BookingStatusResponse {
        booking_id: booking_id.value(),
        status: booking_view.status.as_str().to_string(),
        updated_at: booking_view.updated_at,
    }))
}

/// POST /bookings/:id/approve - 予約を承認
///
/// 強制されるビジネスルール:
/// - 予約が存在すること
/// - 予約がPending状態であること
/// - 承認時点で承認済み予約と時間帯が重複しないこと
pub async fn approve_booking(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<Uuid>,
) -> Result<(StatusCode, Json<BookingStatusResponse>), ApiError> {
    let booking_id = BookingId::from_uuid(booking_id);

    let cmd = crate::domain::commands::ApproveBooking {
        booking_id,
        approved_at: chrono::Utc::now(),
    };

    execute_approve_booking(&state.service_deps, cmd).await?;

    let response = status_response(&state, booking_id).await?;
    Ok((StatusCode::OK, response))
}

/// POST /bookings/:id/reject - 予約を却下
///
/// 強制されるビジネスルール:
/// - 予約が存在すること
/// - 予約がPendingまたはApproved状態であること
pub async fn reject_booking(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<Uuid>,
) -> Result<(StatusCode, Json<BookingStatusResponse>), ApiError> {
    let booking_id = BookingId::from_uuid(booking_id);

    let cmd = crate::domain::commands::RejectBooking {
        booking_id,
        rejected_at: chrono::Utc::now(),
    };

    execute_reject_booking(&state.service_deps, cmd).await?;

    let response = status_response(&state, booking_id).await?;
    Ok((StatusCode::OK, response))
}

/// POST /bookings/:id/cancel - 承認済み予約を取り消す
///
/// 強制されるビジネスルール:
/// - 予約が存在すること
/// - 予約がApproved状態であること
/// - 取消は物理削除ではなくRejectedへの状態変更
pub async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<Uuid>,
) -> Result<(StatusCode, Json<BookingStatusResponse>), ApiError> {
    let booking_id = BookingId::from_uuid(booking_id);

    let cmd = crate::domain::commands::CancelBooking {
        booking_id,
        cancelled_at: chrono::Utc::now(),
    };

    execute_cancel_booking(&state.service_deps, cmd).await?;

    let response = status_response(&state, booking_id).await?;
    Ok((StatusCode::OK, response))
}

// ============================================================================
// Query handlers (GET)
// ============================================================================

/// GET /bookings/:id - 予約詳細をIDで取得
///
/// 見つかった場合は予約情報を返し、見つからない場合は404を返す。
pub async fn get_booking_by_id(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<BookingResponse>, QueryError> {
    let booking_id = BookingId::from_uuid(booking_id);

    match state
        .service_deps
        .booking_read_model
        .get_by_id(booking_id)
        .await
    {
        Ok(Some(booking_view)) => Ok(Json(BookingResponse::from(booking_view))),
        Ok(None) => Err(QueryError::NotFound(format!(
            "Booking {} not found",
            booking_id.value()
        ))),
        Err(e) => Err(QueryError::InternalError(e.to_string())),
    }
}

/// GET /bookings - オプションフィルタ付き予約一覧取得
///
/// クエリパラメータ:
/// - status: ステータスでフィルタリング（pending, approved, rejected）（オプション）
/// - venue: 会場でフィルタリング（オプション）
///
/// フィルタが指定されない場合は、すべての予約を返す（カレンダー表示用）。
pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListBookingsQuery>,
) -> Result<Json<Vec<BookingResponse>>, QueryError> {
    // ステータスフィルタが指定されている場合はRead Modelのクエリで絞り込む
    let bookings = if let Some(status_str) = &query.status {
        let status =
            super::types::parse_status_filter(status_str).map_err(QueryError::BadRequest)?;

        state
            .service_deps
            .booking_read_model
            .find_by_status(status)
            .await
            .map_err(|e| QueryError::InternalError(e.to_string()))?
    } else {
        state
            .service_deps
            .booking_read_model
            .list_all()
            .await
            .map_err(|e| QueryError::InternalError(e.to_string()))?
    };

    // 会場フィルタが指定されている場合は適用
    let filtered_bookings: Vec<BookingResponse> = if let Some(venue_str) = &query.venue {
        let venue = super::types::parse_venue_filter(venue_str).map_err(QueryError::BadRequest)?;

        bookings
            .into_iter()
            .filter(|booking| booking.venue == venue)
            .map(BookingResponse::from)
            .collect()
    } else {
        bookings.into_iter().map(BookingResponse::from).collect()
    };

    Ok(Json(filtered_bookings))
}

// ============================================================================
// Error types
// ============================================================================

/// クエリハンドラー用のエラー型
#[derive(Debug)]
pub enum QueryError {
    NotFound(String),
    BadRequest(String),
    InternalError(String),
}

impl IntoResponse for QueryError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            QueryError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            QueryError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            QueryError::InternalError(msg) => {
                // 内部エラーの詳細はログに記録し、クライアントには一般的なメッセージのみを返す
                tracing::error!("Internal error in query handler: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An unexpected error occurred".to_string(),
                )
            }
        };

        let body = Json(super::types::ErrorResponse::new(error_type, message));
        (status, body).into_response()
    }
}
