use crate::domain::value_objects::UserId;
use crate::ports::user_repository::{
    NewUser, Result, UserRecord, UserRepository as UserRepositoryTrait,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// Mock implementation of UserRepository
///
/// Stores user records in memory. Used both for tests and as the
/// seeded user store while the user context has no database of its own.
#[allow(dead_code)]
pub struct UserRepository {
    users: Mutex<HashMap<UserId, UserRecord>>,
}

#[allow(dead_code)]
impl UserRepository {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for UserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    /// Create a user and return its generated id
    async fn create(&self, user: NewUser) -> Result<UserId> {
        let user_id = UserId::new();
        let record = UserRecord {
            user_id,
            email: user.email,
            password: user.password,
            role: user.role,
        };
        self.users.lock().unwrap().insert(user_id, record);
        Ok(user_id)
    }

    /// Find a user by email address
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>> {
        let users = self.users.lock().unwrap();
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    /// Check if a user exists
    async fn exists(&self, user_id: UserId) -> Result<bool> {
        Ok(self.users.lock().unwrap().contains_key(&user_id))
    }
}
