use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use crate::contract::model::{User, UserDraft};
use crate::domain::error::DomainError;
use crate::domain::repo::UsersRepository;
use crate::domain::validator;

/// Domain service with business rules for user management.
/// Depends only on the repository port, not on infra types.
///
/// Every mutation runs validate-then-write under one async mutex, so the
/// email uniqueness check and the write it guards cannot interleave with
/// another request.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn UsersRepository>,
    writes: Arc<Mutex<()>>,
}

impl Service {
    /// Create a service over the given repository.
    pub fn new(repo: Arc<dyn UsersRepository>) -> Self {
        Self {
            repo,
            writes: Arc::new(Mutex::new(())),
        }
    }

    #[instrument(name = "users_info.service.list_users", skip(self))]
    pub async fn list_users(&self) -> Result<Vec<User>, DomainError> {
        let users = self
            .repo
            .list_all()
            .await
            .map_err(DomainError::repository)?;
        debug!("Listed {} users", users.len());
        Ok(users)
    }

    #[instrument(name = "users_info.service.get_user", skip(self), fields(user_id = id))]
    pub async fn get_user(&self, id: u64) -> Result<User, DomainError> {
        debug!("Getting user by id");
        self.repo
            .find_by_id(id)
            .await
            .map_err(DomainError::repository)?
            .ok_or_else(|| DomainError::user_not_found(id))
    }

    #[instrument(name = "users_info.service.create_user", skip(self, draft))]
    pub async fn create_user(&self, draft: UserDraft) -> Result<User, DomainError> {
        info!("Creating new user");
        let _guard = self.writes.lock().await;

        let existing = self
            .repo
            .list_all()
            .await
            .map_err(DomainError::repository)?;
        let new_user = validator::validate(&draft, &existing, None)?;

        let user = self
            .repo
            .insert(new_user)
            .await
            .map_err(DomainError::repository)?;

        info!("Successfully created user with id={}", user.id);
        Ok(user)
    }

    /// Existence is checked before the draft is validated: an unknown id is
    /// reported as not found even when the payload is also invalid.
    #[instrument(
        name = "users_info.service.update_user",
        skip(self, draft),
        fields(user_id = id)
    )]
    pub async fn update_user(&self, id: u64, draft: UserDraft) -> Result<User, DomainError> {
        info!("Updating user");
        let _guard = self.writes.lock().await;

        if self
            .repo
            .find_by_id(id)
            .await
            .map_err(DomainError::repository)?
            .is_none()
        {
            return Err(DomainError::user_not_found(id));
        }

        let existing = self
            .repo
            .list_all()
            .await
            .map_err(DomainError::repository)?;
        let user = validator::validate(&draft, &existing, Some(id))?.into_user(id);

        let updated = self
            .repo
            .update(user.clone())
            .await
            .map_err(DomainError::repository)?;
        if !updated {
            return Err(DomainError::user_not_found(id));
        }

        info!("Successfully updated user");
        Ok(user)
    }

    #[instrument(name = "users_info.service.delete_user", skip(self), fields(user_id = id))]
    pub async fn delete_user(&self, id: u64) -> Result<(), DomainError> {
        info!("Deleting user");
        let _guard = self.writes.lock().await;

        let deleted = self
            .repo
            .delete(id)
            .await
            .map_err(DomainError::repository)?;
        if !deleted {
            return Err(DomainError::user_not_found(id));
        }

        info!("Successfully deleted user");
        Ok(())
    }
}
