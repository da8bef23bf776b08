use crate::domain::value_objects::UserId;
use crate::ports::auth_service::{AccessToken, AuthService as AuthServiceTrait, Result};
use crate::ports::user_repository::UserRepository;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// AuthServiceのモック実装
///
/// 利用者リポジトリで資格情報を照合し、不透明なトークンを
/// メモリ上で発行・管理する。トークンに有効期限はない。
#[allow(dead_code)]
pub struct AuthService {
    user_repository: Arc<dyn UserRepository>,
    tokens: Mutex<HashMap<String, UserId>>,
}

#[allow(dead_code)]
impl AuthService {
    pub fn new(user_repository: Arc<dyn UserRepository>) -> Self {
        Self {
            user_repository,
            tokens: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl AuthServiceTrait for AuthService {
    /// 資格情報を照合してトークンを発行する
    ///
    /// 利用者が存在しない、またはパスワードが一致しない場合はNoneを返す。
    async fn issue_token(&self, email: &str, password: &str) -> Result<Option<AccessToken>> {
        let user = match self.user_repository.find_by_email(email).await? {
            Some(user) if user.password == password => user,
            _ => return Ok(None),
        };

        let token = Uuid::new_v4().to_string();
        self.tokens
            .lock()
            .unwrap()
            .insert(token.clone(), user.user_id);

        Ok(Some(AccessToken::new(token)))
    }

    /// 発行済みトークンを検証する
    async fn verify_token(&self, token: &str) -> Result<Option<UserId>> {
        Ok(self.tokens.lock().unwrap().get(token).copied())
    }
}
