#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 予約ID - 予約管理コンテキストの集約ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookingId(Uuid);

impl BookingId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl Default for BookingId {
    fn default() -> Self {
        Self::new()
    }
}

/// 利用者ID - 利用者管理コンテキストへの参照
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

/// 会場
///
/// 予約可能な会場の列挙。会場の追加は列挙子の追加で行う。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Venue {
    ConferenceRoom,
    Auditorium,
    SeminarHall,
    MeetingRoom,
    WorkshopRoom,
}

impl Venue {
    /// 文字列表現を取得する
    pub fn as_str(&self) -> &'static str {
        match self {
            Venue::ConferenceRoom => "conference_room",
            Venue::Auditorium => "auditorium",
            Venue::SeminarHall => "seminar_hall",
            Venue::MeetingRoom => "meeting_room",
            Venue::WorkshopRoom => "workshop_room",
        }
    }
}

impl std::str::FromStr for Venue {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "conference_room" => Ok(Venue::ConferenceRoom),
            "auditorium" => Ok(Venue::Auditorium),
            "seminar_hall" => Ok(Venue::SeminarHall),
            "meeting_room" => Ok(Venue::MeetingRoom),
            "workshop_room" => Ok(Venue::WorkshopRoom),
            _ => Err(format!("Invalid venue: {}", s)),
        }
    }
}

/// 部署
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Department {
    It,
    Hr,
    Finance,
    Marketing,
    Sales,
    Operations,
}

impl Department {
    /// 文字列表現を取得する
    pub fn as_str(&self) -> &'static str {
        match self {
            Department::It => "it",
            Department::Hr => "hr",
            Department::Finance => "finance",
            Department::Marketing => "marketing",
            Department::Sales => "sales",
            Department::Operations => "operations",
        }
    }
}

impl std::str::FromStr for Department {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "it" => Ok(Department::It),
            "hr" => Ok(Department::Hr),
            "finance" => Ok(Department::Finance),
            "marketing" => Ok(Department::Marketing),
            "sales" => Ok(Department::Sales),
            "operations" => Ok(Department::Operations),
            _ => Err(format!("Invalid department: {}", s)),
        }
    }
}

/// 連絡先エラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactNumberError {
    /// 10桁の数字でない
    InvalidFormat,
}

/// 連絡先番号
///
/// 不変条件：数字10桁であること。
/// 型システムでこの制約を強制し、不正な値を作成できないようにする。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactNumber(String);

impl ContactNumber {
    /// バリデーション付きで作成する
    ///
    /// # エラー
    /// 数字10桁でない場合は`ContactNumberError::InvalidFormat`を返す
    pub fn try_new(value: impl Into<String>) -> Result<Self, ContactNumberError> {
        let value = value.into();
        if value.len() != 10 || !value.chars().all(|c| c.is_ascii_digit()) {
            return Err(ContactNumberError::InvalidFormat);
        }
        Ok(Self(value))
    }

    /// 現在の値
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ContactNumber {
    type Error = ContactNumberError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

/// 時間帯エラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeRangeError {
    /// 終了時刻が開始時刻より後でない
    EndNotAfterStart,
}

/// 予約時間帯
///
/// 不変条件：ends_atはstarts_atより厳密に後であること。
/// 半開区間 [starts_at, ends_at) として扱う。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
}

impl TimeRange {
    /// バリデーション付きで作成する
    ///
    /// # エラー
    /// ends_at <= starts_at の場合は`TimeRangeError::EndNotAfterStart`を返す
    pub fn new(starts_at: DateTime<Utc>, ends_at: DateTime<Utc>) -> Result<Self, TimeRangeError> {
        if ends_at <= starts_at {
            return Err(TimeRangeError::EndNotAfterStart);
        }
        Ok(Self { starts_at, ends_at })
    }

    pub fn starts_at(&self) -> DateTime<Utc> {
        self.starts_at
    }

    pub fn ends_at(&self) -> DateTime<Utc> {
        self.ends_at
    }

    /// 2つの時間帯が重なるか判定する
    ///
    /// 半開区間 [s1, e1) と [s2, e2) の交差判定：s1 < e2 かつ s2 < e1。
    /// 一方の終了時刻と他方の開始時刻が一致する場合は重ならない。
    /// 対称：a.overlaps(b) == b.overlaps(a)。
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.starts_at < other.ends_at && other.starts_at < self.ends_at
    }
}
