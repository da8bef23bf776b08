#![allow(dead_code)]

/// 申請のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitBookingError {
    // 現時点では発生しないが、将来的にアプリケーション層で追加される可能性
    // 例: UserNotFound, BookingConflict など
}

/// 承認のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApproveBookingError {
    /// 既に承認済み
    AlreadyApproved,
    /// 既に却下済み
    AlreadyRejected,
}

/// 却下のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectBookingError {
    /// 既に却下済み
    AlreadyRejected,
}
