use crate::domain::value_objects::{BookingId, Department, UserId, Venue};
use crate::ports::booking_read_model::{
    BookingReadModel as BookingReadModelTrait, BookingStatus, BookingView, Result,
};
use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};
use std::str::FromStr;

/// PostgreSQLの行データをBookingViewに変換する
///
/// データベースから取得した行を、ドメインの値オブジェクトとBookingViewに変換する。
/// venue, department, statusの文字列からの変換でエラーハンドリングを行う。
fn map_row_to_booking_view(row: &PgRow) -> Result<BookingView> {
    let venue_str: &str = row.get("venue");
    let venue = Venue::from_str(venue_str).map_err(|e| {
        Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
            as Box<dyn std::error::Error + Send + Sync>
    })?;

    let department_str: &str = row.get("department");
    let department = Department::from_str(department_str).map_err(|e| {
        Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
            as Box<dyn std::error::Error + Send + Sync>
    })?;

    let status_str: &str = row.get("status");
    let status = BookingStatus::from_str(status_str).map_err(|e| {
        Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
            as Box<dyn std::error::Error + Send + Sync>
    })?;

    Ok(BookingView {
        booking_id: BookingId::from_uuid(row.get("booking_id")),
        venue,
        organizer: row.get("organizer"),
        department,
        contact: row.get("contact"),
        reason: row.get("reason"),
        starts_at: row.get("starts_at"),
        ends_at: row.get("ends_at"),
        status,
        submitted_by: UserId::from_uuid(row.get("submitted_by")),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

/// BookingReadModelのPostgreSQL実装
///
/// CQRSパターンの読み取り側として、クエリに最適化された
/// 非正規化ビューを提供する。
#[allow(dead_code)]
pub struct BookingReadModel {
    pool: PgPool,
}

#[allow(dead_code)]
impl BookingReadModel {
    /// PostgreSQLコネクションプールから新しいBookingReadModelを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingReadModelTrait for BookingReadModel {
    /// 予約ビューをRead Modelに保存（upsert）
    ///
    /// INSERT ... ON CONFLICT UPDATEを使用して冪等性を保証する。
    /// これにより、Read Modelは常にイベントストリームから再構築された
    /// 完全な状態を反映する。
    async fn save(&self, booking_view: BookingView) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO bookings_view (
                booking_id,
                venue,
                organizer,
                department,
                contact,
                reason,
                starts_at,
                ends_at,
                status,
                submitted_by,
                created_at,
                updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ON CONFLICT (booking_id)
            DO UPDATE SET
                venue = EXCLUDED.venue,
                organizer = EXCLUDED.organizer,
                department = EXCLUDED.department,
                contact = EXCLUDED.contact,
                reason = EXCLUDED.reason,
                starts_at = EXCLUDED.starts_at,
                ends_at = EXCLUDED.ends_at,
                status = EXCLUDED.status,
                submitted_by = EXCLUDED.submitted_by,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(booking_view.booking_id.value())
        .bind(booking_view.venue.as_str())
        .bind(&booking_view.organizer)
        .bind(booking_view.department.as_str())
        .bind(&booking_view.contact)
        .bind(&booking_view.reason)
        .bind(booking_view.starts_at)
        .bind(booking_view.ends_at)
        .bind(booking_view.status.as_str())
        .bind(booking_view.submitted_by.value())
        .bind(booking_view.created_at)
        .bind(booking_view.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// IDで予約を取得
    async fn get_by_id(&self, booking_id: BookingId) -> Result<Option<BookingView>> {
        let row = sqlx::query(
            r#"
            SELECT
                booking_id,
                venue,
                organizer,
                department,
                contact,
                reason,
                starts_at,
                ends_at,
                status,
                submitted_by,
                created_at,
                updated_at
            FROM bookings_view
            WHERE booking_id = $1
            "#,
        )
        .bind(booking_id.value())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_row_to_booking_view).transpose()
    }

    /// 会場の承認済み予約を取得（衝突判定用）
    ///
    /// (venue, status)の部分インデックスを使用してパフォーマンスを最適化。
    async fn find_approved_for_venue(&self, venue: Venue) -> Result<Vec<BookingView>> {
        let rows = sqlx::query(
            r#"
            SELECT
                booking_id,
                venue,
                organizer,
                department,
                contact,
                reason,
                starts_at,
                ends_at,
                status,
                submitted_by,
                created_at,
                updated_at
            FROM bookings_view
            WHERE venue = $1 AND status = 'approved'
            ORDER BY starts_at ASC
            "#,
        )
        .bind(venue.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row_to_booking_view).collect()
    }

    /// ステータスで予約を検索（承認待ち一覧など）
    async fn find_by_status(&self, status: BookingStatus) -> Result<Vec<BookingView>> {
        let rows = sqlx::query(
            r#"
            SELECT
                booking_id,
                venue,
                organizer,
                department,
                contact,
                reason,
                starts_at,
                ends_at,
                status,
                submitted_by,
                created_at,
                updated_at
            FROM bookings_view
            WHERE status = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row_to_booking_view).collect()
    }

    /// すべての予約を取得（カレンダー表示用）
    async fn list_all(&self) -> Result<Vec<BookingView>> {
        let rows = sqlx::query(
            r#"
            SELECT
                booking_id,
                venue,
                organizer,
                department,
                contact,
                reason,
                starts_at,
                ends_at,
                status,
                submitted_by,
                created_at,
                updated_at
            FROM bookings_view
            ORDER BY starts_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row_to_booking_view).collect()
    }
}
