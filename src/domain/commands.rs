use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{BookingId, ContactNumber, Department, TimeRange, UserId, Venue};

/// コマンド：予約を申請する
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitBooking {
    pub venue: Venue,
    pub slot: TimeRange,
    pub organizer: String,
    pub department: Department,
    pub contact: ContactNumber,
    pub reason: String,
    pub submitted_by: UserId,
    pub submitted_at: DateTime<Utc>,
}

/// コマンド：予約を承認する
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApproveBooking {
    pub booking_id: BookingId,
    pub approved_at: DateTime<Utc>,
}

/// コマンド：予約を却下する
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectBooking {
    pub booking_id: BookingId,
    pub rejected_at: DateTime<Utc>,
}

/// コマンド：承認済み予約を取り消す
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelBooking {
    pub booking_id: BookingId,
    pub cancelled_at: DateTime<Utc>,
}
