use crate::domain::value_objects::UserId;
use async_trait::async_trait;

#[allow(dead_code)]
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// アクセストークン
///
/// 認証プロバイダが発行する不透明なベアラートークン。
/// 中身の形式には依存しない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

/// 認証サービスポート
///
/// トークンの発行と検証を抽象化する。
/// 予約コンテキストは「認証済みかどうか」のみを関知し、
/// それ以上の認可は行わない。
#[allow(dead_code)]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// 資格情報を検証してトークンを発行する
    ///
    /// 資格情報が不正な場合は`None`を返す。
    async fn issue_token(&self, email: &str, password: &str) -> Result<Option<AccessToken>>;

    /// トークンを検証して利用者IDを返す
    ///
    /// 無効・期限切れのトークンは`None`を返す。
    async fn verify_token(&self, token: &str) -> Result<Option<UserId>>;
}
