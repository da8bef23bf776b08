use crate::domain::value_objects::{BookingId, Department, UserId, Venue};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[allow(dead_code)]
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 予約ステータス（Read Model用）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStatus {
    /// 承認待ち
    Pending,
    /// 承認済み
    Approved,
    /// 却下済み（取消を含む）
    Rejected,
}

impl BookingStatus {
    /// 文字列表現を取得する
    #[allow(dead_code)]
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Approved => "approved",
            BookingStatus::Rejected => "rejected",
        }
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "pending" => Ok(BookingStatus::Pending),
            "approved" => Ok(BookingStatus::Approved),
            "rejected" => Ok(BookingStatus::Rejected),
            _ => Err(format!("Invalid booking status: {}", s)),
        }
    }
}

/// 予約ビュー（Read Model）
///
/// クエリに最適化された非正規化ビュー（CQRSパターン）。
/// イベント永続化時に更新される。
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct BookingView {
    pub booking_id: BookingId,
    pub venue: Venue,
    pub organizer: String,
    pub department: Department,
    pub contact: String,
    pub reason: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub status: BookingStatus,
    pub submitted_by: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 予約Read Modelポート
#[allow(dead_code)]
#[async_trait]
pub trait BookingReadModel: Send + Sync {
    /// 予約の現在状態をRead Modelに保存
    ///
    /// イベントストアから復元した集約の完全な状態を保存する。
    /// 新規の場合はINSERT、既存の場合はUPDATE（upsert）を実行する。
    ///
    /// Read Modelは常にイベントから復元した集約の完全な状態を
    /// 反映すべきであり、部分更新は行わない。
    async fn save(&self, booking_view: BookingView) -> Result<()>;

    /// IDで予約を取得する
    async fn get_by_id(&self, booking_id: BookingId) -> Result<Option<BookingView>>;

    /// 会場の承認済み予約を取得する
    ///
    /// 申請時・承認時の時間帯衝突判定に使用される。
    async fn find_approved_for_venue(&self, venue: Venue) -> Result<Vec<BookingView>>;

    /// ステータスで予約を検索する
    ///
    /// 承認待ち一覧（承認画面）の表示に使用される。
    async fn find_by_status(&self, status: BookingStatus) -> Result<Vec<BookingView>>;

    /// すべての予約を取得する
    ///
    /// カレンダー表示に使用される。
    async fn list_all(&self) -> Result<Vec<BookingView>>;
}
