use crate::contract::model::{NewUser, User};
use async_trait::async_trait;

/// Port for the domain layer: persistence operations the domain needs.
/// Object-safe and async-friendly via `async_trait`.
///
/// Implementations store what they are given; validation is the service's job.
#[async_trait]
pub trait UsersRepository: Send + Sync {
    /// Snapshot of every stored user in insertion order.
    async fn list_all(&self) -> anyhow::Result<Vec<User>>;
    /// Load a user by id.
    async fn find_by_id(&self, id: u64) -> anyhow::Result<Option<User>>;
    /// Allocate the next id, append the user and return the stored record.
    async fn insert(&self, new_user: NewUser) -> anyhow::Result<User>;
    /// Replace every field but the id, in place. Returns false if `u.id` is unknown.
    async fn update(&self, u: User) -> anyhow::Result<bool>;
    /// Delete by id. Returns true if a record was removed.
    async fn delete(&self, id: u64) -> anyhow::Result<bool>;
}
