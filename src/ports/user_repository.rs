use crate::domain::value_objects::UserId;
use async_trait::async_trait;

#[allow(dead_code)]
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 利用者の役割
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRole {
    Admin,
    User,
}

impl UserRole {
    /// 文字列表現を取得する
    #[allow(dead_code)]
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::User => "user",
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "admin" => Ok(UserRole::Admin),
            "user" => Ok(UserRole::User),
            _ => Err(format!("Invalid user role: {}", s)),
        }
    }
}

/// 利用者レコード
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub user_id: UserId,
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

/// 利用者作成の入力
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

/// 利用者リポジトリポート
///
/// 予約コンテキストと利用者コンテキストの境界を維持する。
/// 予約コンテキストはUserIdのみを知り、利用者詳細は知らない。
#[allow(dead_code)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// 利用者を作成する
    ///
    /// 起動時のシーディングに使用される。
    async fn create(&self, user: NewUser) -> Result<UserId>;

    /// メールアドレスで利用者を検索する
    ///
    /// 認証時の資格情報確認に使用される。
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>>;

    /// 利用者が存在するか確認する
    ///
    /// 予約申請前の申請者バリデーションに使用される。
    async fn exists(&self, user_id: UserId) -> Result<bool>;
}
