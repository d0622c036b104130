use async_trait::async_trait;

use crate::contract::{
    error::UsersInfoError,
    model::{User, UserDraft},
};

/// Public API trait for the users_info module that other modules can use
#[async_trait]
pub trait UsersInfoApi: Send + Sync {
    /// List every user in insertion order
    async fn list_users(&self) -> Result<Vec<User>, UsersInfoError>;

    /// Get a user by ID
    async fn get_user(&self, id: u64) -> Result<User, UsersInfoError>;

    /// Validate and create a new user
    async fn create_user(&self, draft: UserDraft) -> Result<User, UsersInfoError>;

    /// Validate and replace every field of a user except its ID
    async fn update_user(&self, id: u64, draft: UserDraft) -> Result<User, UsersInfoError>;

    /// Delete a user by ID
    async fn delete_user(&self, id: u64) -> Result<(), UsersInfoError>;
}
