use crate::domain::{self, DomainEvent, commands::*, value_objects::*};
use crate::ports::*;
use std::sync::Arc;

use super::errors::{BookingApplicationError, Result};

/// サービスの依存関係
///
/// 関数型DDDの原則に従い、データ構造として定義。
/// 振る舞い（メソッド）は持たず、純粋な関数に依存関係を渡す。
///
/// このパターンにより：
/// - すべての依存が明示的
/// - データと振る舞いの分離
/// - 関数合成が容易
/// - テストが明確
#[derive(Clone)]
#[allow(dead_code)]
pub struct ServiceDependencies {
    pub event_store: Arc<dyn EventStore>,
    pub booking_read_model: Arc<dyn BookingReadModel>,
    pub user_repository: Arc<dyn UserRepository>,
}

/// イベントストアから予約集約を復元するヘルパー関数
///
/// approve_booking, reject_booking, cancel_bookingで共通利用される。
///
/// # 引数
/// * `event_store` - イベントストア
/// * `booking_id` - 予約ID
///
/// # 戻り値
/// 復元された予約集約
///
/// # エラー
/// - EventStoreError: イベント読み込み失敗
/// - BookingNotFound: イベントが存在しない、または復元に失敗
async fn load_booking(
    event_store: &Arc<dyn EventStore>,
    booking_id: BookingId,
) -> Result<domain::booking::Booking> {
    let events = event_store
        .load(booking_id)
        .await
        .map_err(BookingApplicationError::EventStoreError)?;

    domain::booking::replay_events(&events).ok_or(BookingApplicationError::BookingNotFound)
}

/// 会場の承認済み時間帯をRead Modelから取得するヘルパー関数
///
/// 衝突判定は申請時と承認時の両方で行われるため共通化する。
/// 会場・ステータスによる絞り込みはRead Modelのクエリが行い、
/// 時間帯の交差判定はドメイン層の純粋関数が行う。
async fn approved_slots_for_venue(
    booking_read_model: &Arc<dyn BookingReadModel>,
    venue: Venue,
) -> Result<Vec<TimeRange>> {
    let views = booking_read_model
        .find_approved_for_venue(venue)
        .await
        .map_err(BookingApplicationError::ReadModelError)?;

    views
        .into_iter()
        .map(|view| {
            TimeRange::new(view.starts_at, view.ends_at)
                .map_err(|e| BookingApplicationError::DomainError(format!("{:?}", e)))
        })
        .collect()
}

/// 予約集約からRead Model用のビューを構築するヘルパー関数
///
/// 集約の完全な状態をRead Modelのビューとして変換する。
///
/// # 引数
/// * `booking` - 予約集約（Pending/Approved/Rejected）
///
/// # 戻り値
/// Read Model用の完全な予約ビュー
pub(super) fn build_booking_view(booking: &domain::booking::Booking) -> BookingView {
    match booking {
        domain::booking::Booking::Pending(pending) => BookingView {
            booking_id: pending.booking_id,
            venue: pending.venue,
            organizer: pending.organizer.clone(),
            department: pending.department,
            contact: pending.contact.value().to_string(),
            reason: pending.reason.clone(),
            starts_at: pending.slot.starts_at(),
            ends_at: pending.slot.ends_at(),
            status: BookingStatus::Pending,
            submitted_by: pending.submitted_by,
            created_at: pending.created_at,
            updated_at: pending.updated_at,
        },
        domain::booking::Booking::Approved(approved) => BookingView {
            booking_id: approved.booking_id,
            venue: approved.venue,
            organizer: approved.organizer.clone(),
            department: approved.department,
            contact: approved.contact.value().to_string(),
            reason: approved.reason.clone(),
            starts_at: approved.slot.starts_at(),
            ends_at: approved.slot.ends_at(),
            status: BookingStatus::Approved,
            submitted_by: approved.submitted_by,
            created_at: approved.created_at,
            updated_at: approved.updated_at,
        },
        domain::booking::Booking::Rejected(rejected) => BookingView {
            booking_id: rejected.booking_id,
            venue: rejected.venue,
            organizer: rejected.organizer.clone(),
            department: rejected.department,
            contact: rejected.contact.value().to_string(),
            reason: rejected.reason.clone(),
            starts_at: rejected.slot.starts_at(),
            ends_at: rejected.slot.ends_at(),
            status: BookingStatus::Rejected,
            submitted_by: rejected.submitted_by,
            created_at: rejected.created_at,
            updated_at: rejected.updated_at,
        },
    }
}

/// 予約を申請する
///
/// ビジネスルール：
/// - 申請者が存在すること
/// - 同一会場の承認済み予約と時間帯が重複しないこと
/// - 作成された予約はPending状態
///
/// すべての依存が引数として明示的に渡される（関数型の原則）。
///
/// # 引数
/// * `deps` - サービスの依存関係
/// * `cmd` - 申請コマンド
///
/// # 戻り値
/// 成功時は作成された予約のID
#[allow(dead_code)]
pub async fn submit_booking(deps: &ServiceDependencies, cmd: SubmitBooking) -> Result<BookingId> {
    // 1. 申請者の存在確認
    let user_exists = deps
        .user_repository
        .exists(cmd.submitted_by)
        .await
        .map_err(BookingApplicationError::UserRepositoryError)?;

    if !user_exists {
        return Err(BookingApplicationError::UserNotFound);
    }

    // 2. 承認済み予約との時間帯衝突確認
    let approved_slots = approved_slots_for_venue(&deps.booking_read_model, cmd.venue).await?;

    if domain::booking::check_conflict(&cmd.slot, &approved_slots) {
        return Err(BookingApplicationError::BookingConflict);
    }

    // 3. ドメイン層の純粋関数を呼び出し
    let (pending, event) = domain::booking::submit_booking(cmd)
        .map_err(|e| BookingApplicationError::DomainError(format!("{:?}", e)))?;

    let booking_id = pending.booking_id;

    // 4. イベントストアに保存
    deps.event_store
        .append(booking_id, vec![DomainEvent::BookingSubmitted(event.clone())])
        .await
        .map_err(BookingApplicationError::EventStoreError)?;

    // 5. Read Modelを更新（完全な状態を保存）
    let booking_view = build_booking_view(&domain::booking::Booking::Pending(pending));
    deps.booking_read_model
        .save(booking_view)
        .await
        .map_err(BookingApplicationError::ReadModelError)?;

    Ok(booking_id)
}

/// 予約を承認する
///
/// ビジネスルール：
/// - 予約が存在すること
/// - 予約がPending状態であること（Approved, Rejectedは承認不可）
/// - 承認時点で承認済み予約と時間帯が重複しないこと
///
/// 衝突確認は申請時だけでなく承認時にも行う。申請後に別の予約が
/// 承認されている可能性があるため、この再確認によって
/// 「同一会場の承認済み予約は重複しない」という不変条件が
/// 承認の順序によらず保たれる。
///
/// # 引数
/// * `deps` - サービスの依存関係
/// * `cmd` - 承認コマンド
#[allow(dead_code)]
pub async fn approve_booking(deps: &ServiceDependencies, cmd: ApproveBooking) -> Result<()> {
    // 1. イベントストアから予約集約を復元
    let booking = load_booking(&deps.event_store, cmd.booking_id).await?;

    // 2. PendingBookingであることを確認
    let pending = match booking {
        domain::booking::Booking::Pending(pending) => pending,
        domain::booking::Booking::Approved(_) => {
            return Err(BookingApplicationError::InvalidBookingState(
                "Cannot approve already approved booking".to_string(),
            ));
        }
        domain::booking::Booking::Rejected(_) => {
            return Err(BookingApplicationError::InvalidBookingState(
                "Cannot approve rejected booking".to_string(),
            ));
        }
    };

    // 3. 承認時の時間帯衝突再確認
    let approved_slots = approved_slots_for_venue(&deps.booking_read_model, pending.venue).await?;

    if domain::booking::check_conflict(&pending.slot, &approved_slots) {
        return Err(BookingApplicationError::BookingConflict);
    }

    // 4. ドメイン層の純粋関数を呼び出し
    let (approved, event) = domain::booking::approve_booking(
        domain::booking::Booking::Pending(pending),
        cmd.approved_at,
    )
    .map_err(|e| BookingApplicationError::DomainError(format!("{:?}", e)))?;

    // 5. イベントストアに保存
    deps.event_store
        .append(cmd.booking_id, vec![DomainEvent::BookingApproved(event.clone())])
        .await
        .map_err(BookingApplicationError::EventStoreError)?;

    // 6. Read Modelを更新（完全な状態を保存）
    let booking_view = build_booking_view(&domain::booking::Booking::Approved(approved));
    deps.booking_read_model
        .save(booking_view)
        .await
        .map_err(BookingApplicationError::ReadModelError)?;

    Ok(())
}

/// 予約を却下する
///
/// ビジネスルール：
/// - 予約が存在すること
/// - 予約がPending, Approved状態であること（Rejectedは再却下不可）
/// - 承認済みからの却下は取消として記録される
///
/// # 引数
/// * `deps` - サービスの依存関係
/// * `cmd` - 却下コマンド
#[allow(dead_code)]
pub async fn reject_booking(deps: &ServiceDependencies, cmd: RejectBooking) -> Result<()> {
    // 1. イベントストアから予約集約を復元
    let booking = load_booking(&deps.event_store, cmd.booking_id).await?;

    // 2. ドメイン層の純粋関数を呼び出し
    let (rejected, event) = domain::booking::reject_booking(booking, cmd.rejected_at)
        .map_err(|e| BookingApplicationError::InvalidBookingState(format!("{:?}", e)))?;

    // 3. イベントストアに保存
    deps.event_store
        .append(cmd.booking_id, vec![DomainEvent::BookingRejected(event.clone())])
        .await
        .map_err(BookingApplicationError::EventStoreError)?;

    // 4. Read Modelを更新（完全な状態を保存）
    let booking_view = build_booking_view(&domain::booking::Booking::Rejected(rejected));
    deps.booking_read_model
        .save(booking_view)
        .await
        .map_err(BookingApplicationError::ReadModelError)?;

    Ok(())
}

/// 承認済み予約を取り消す
///
/// ビジネスルール：
/// - 予約が存在すること
/// - 予約がApproved状態であること
/// - 取消は物理削除ではなくRejectedへの状態変更
///
/// # 引数
/// * `deps` - サービスの依存関係
/// * `cmd` - 取消コマンド
#[allow(dead_code)]
pub async fn cancel_booking(deps: &ServiceDependencies, cmd: CancelBooking) -> Result<()> {
    // 1. イベントストアから予約集約を復元
    let booking = load_booking(&deps.event_store, cmd.booking_id).await?;

    // 2. ApprovedBookingであることを確認
    if !matches!(booking, domain::booking::Booking::Approved(_)) {
        return Err(BookingApplicationError::InvalidBookingState(
            "Only approved bookings can be cancelled".to_string(),
        ));
    }

    // 3. ドメイン層の純粋関数を呼び出し（取消は却下への遷移）
    let (rejected, event) = domain::booking::reject_booking(booking, cmd.cancelled_at)
        .map_err(|e| BookingApplicationError::InvalidBookingState(format!("{:?}", e)))?;

    // 4. イベントストアに保存
    deps.event_store
        .append(cmd.booking_id, vec![DomainEvent::BookingRejected(event.clone())])
        .await
        .map_err(BookingApplicationError::EventStoreError)?;

    // 5. Read Modelを更新（完全な状態を保存）
    let booking_view = build_booking_view(&domain::booking::Booking::Rejected(rejected));
    deps.booking_read_model
        .save(booking_view)
        .await
        .map_err(BookingApplicationError::ReadModelError)?;

    Ok(())
}
