use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{BookingId, ContactNumber, Department, TimeRange, UserId, Venue};

/// イベント：予約が申請された
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingSubmitted {
    pub booking_id: BookingId,
    pub venue: Venue,
    pub slot: TimeRange,
    pub organizer: String,
    pub department: Department,
    pub contact: ContactNumber,
    pub reason: String,
    pub submitted_by: UserId,
    pub submitted_at: DateTime<Utc>,
}

/// イベント：予約が承認された
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingApproved {
    pub booking_id: BookingId,
    pub venue: Venue,
    pub slot: TimeRange,
    pub approved_at: DateTime<Utc>,
}

/// イベント：予約が却下された
///
/// 承認済み予約の取消も却下として記録される（was_approvedで区別）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRejected {
    pub booking_id: BookingId,
    pub rejected_at: DateTime<Utc>,
    pub was_approved: bool,
}

/// ドメインイベント統合型
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DomainEvent {
    BookingSubmitted(BookingSubmitted),
    BookingApproved(BookingApproved),
    BookingRejected(BookingRejected),
}
