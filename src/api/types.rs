use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::commands::SubmitBooking;
use crate::domain::value_objects::{ContactNumber, Department, TimeRange, UserId, Venue};
use crate::ports::booking_read_model::{BookingStatus, BookingView};

/// ログインリクエスト（POST /auth/login）
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// ログインレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
}

/// 予約申請リクエスト（POST /bookings）
#[derive(Debug, Deserialize)]
pub struct SubmitBookingRequest {
    pub venue: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub organizer: String,
    pub department: String,
    pub contact: String,
    pub reason: String,
}

impl SubmitBookingRequest {
    /// バリデーションしてコマンドに変換する
    ///
    /// 会場・部署の列挙値、連絡先の形式、時間帯の前後関係、
    /// 必須文字列の非空をここで検証する。
    pub fn to_command(
        self,
        submitted_by: UserId,
        submitted_at: DateTime<Utc>,
    ) -> Result<SubmitBooking, String> {
        let venue = self.venue.parse::<Venue>()?;
        let department = self.department.parse::<Department>()?;

        let contact = ContactNumber::try_new(self.contact)
            .map_err(|_| "Contact must be a 10-digit number".to_string())?;

        let slot = TimeRange::new(self.starts_at, self.ends_at)
            .map_err(|_| "End time must be strictly after start time".to_string())?;

        if self.organizer.trim().is_empty() {
            return Err("Organizer must not be empty".to_string());
        }

        if self.reason.trim().is_empty() {
            return Err("Reason must not be empty".to_string());
        }

        Ok(SubmitBooking {
            venue,
            slot,
            organizer: self.organizer,
            department,
            contact,
            reason: self.reason,
            submitted_by,
            submitted_at,
        })
    }
}

/// 予約一覧取得のクエリパラメータ
#[derive(Debug, Deserialize)]
pub struct ListBookingsQuery {
    /// ステータスでフィルタリング（pending, approved, rejected）
    pub status: Option<String>,
    /// 会場でフィルタリング
    pub venue: Option<String>,
}

/// 予約作成レスポンス（POST /bookings）
#[derive(Debug, Serialize, Deserialize)]
pub struct BookingCreatedResponse {
    pub booking_id: Uuid,
    pub venue: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub status: String,
}

/// 予約状態変更レスポンス（approve / reject / cancel）
#[derive(Debug, Serialize, Deserialize)]
pub struct BookingStatusResponse {
    pub booking_id: Uuid,
    pub status: String,
    pub updated_at: DateTime<Utc>,
}

/// 予約レスポンス（GET /bookings/:id と GET /bookings）
#[derive(Debug, Serialize, Deserialize)]
pub struct BookingResponse {
    pub booking_id: Uuid,
    pub venue: String,
    pub organizer: String,
    pub department: String,
    pub contact: String,
    pub reason: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub status: String,
    pub submitted_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<BookingView> for BookingResponse {
    fn from(view: BookingView) -> Self {
        Self {
            booking_id: view.booking_id.value(),
            venue: view.venue.as_str().to_string(),
            organizer: view.organizer,
            department: view.department.as_str().to_string(),
            contact: view.contact,
            reason: view.reason,
            starts_at: view.starts_at,
            ends_at: view.ends_at,
            status: view.status.as_str().to_string(),
            submitted_by: view.submitted_by.value(),
            created_at: view.created_at,
            updated_at: view.updated_at,
        }
    }
}

/// エラーレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}

/// ステータスクエリパラメータのパースとバリデーション
pub fn parse_status_filter(status: &str) -> Result<BookingStatus, String> {
    status.parse::<BookingStatus>()
}

/// 会場クエリパラメータのパースとバリデーション
pub fn parse_venue_filter(venue: &str) -> Result<Venue, String> {
    venue.parse::<Venue>()
}
