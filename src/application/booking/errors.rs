use thiserror::Error;

/// 予約管理アプリケーション層のエラー
#[derive(Debug, Error)]
pub enum BookingApplicationError {
    /// 申請者が存在しない
    #[error("User not found")]
    UserNotFound,

    /// 同一会場の承認済み予約と時間帯が重複している
    #[error("Venue is already booked for the requested time slot")]
    BookingConflict,

    /// 予約が見つからない
    #[error("Booking not found")]
    BookingNotFound,

    /// 予約の状態が不正（例: Pendingを期待したがRejectedだった）
    #[error("Invalid booking state: {0}")]
    InvalidBookingState(String),

    /// 入力が不正（欠落・形式不正）
    #[error("Validation error: {0}")]
    Validation(String),

    /// ドメイン層のエラー
    #[error("Domain error: {0}")]
    DomainError(String),

    /// EventStoreのエラー
    #[error("Event store error")]
    EventStoreError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// ReadModelのエラー
    #[error("Read model error")]
    ReadModelError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// UserRepositoryのエラー
    #[error("User repository error")]
    UserRepositoryError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, BookingApplicationError>;
