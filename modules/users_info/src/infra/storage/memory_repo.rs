//! In-process repository implementation for the domain port.
//!
//! Records live in a `Vec` kept in insertion order next to a monotonic id
//! counter. Nothing survives a restart.

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::contract::model::{NewUser, User};
use crate::domain::repo::UsersRepository;

#[derive(Debug)]
struct State {
    users: Vec<User>,
    next_id: u64,
}

impl Default for State {
    fn default() -> Self {
        Self {
            users: Vec::new(),
            next_id: 1,
        }
    }
}

impl State {
    fn position(&self, id: u64) -> Option<usize> {
        self.users.iter().position(|u| u.id == id)
    }
}

/// Vec-backed repository. Ids start at 1 and are never reused, even after
/// the record holding them is deleted.
#[derive(Debug, Default)]
pub struct InMemoryUsersRepository {
    state: RwLock<State>,
}

impl InMemoryUsersRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UsersRepository for InMemoryUsersRepository {
    async fn list_all(&self) -> anyhow::Result<Vec<User>> {
        Ok(self.state.read().users.clone())
    }

    async fn find_by_id(&self, id: u64) -> anyhow::Result<Option<User>> {
        let state = self.state.read();
        Ok(state.users.iter().find(|u| u.id == id).cloned())
    }

    async fn insert(&self, new_user: NewUser) -> anyhow::Result<User> {
        let mut state = self.state.write();
        let id = state.next_id;
        state.next_id = id
            .checked_add(1)
            .ok_or_else(|| anyhow::anyhow!("user id space exhausted"))?;

        let user = new_user.into_user(id);
        state.users.push(user.clone());
        Ok(user)
    }

    async fn update(&self, u: User) -> anyhow::Result<bool> {
        let mut state = self.state.write();
        match state.position(u.id) {
            Some(idx) => {
                state.users[idx] = u;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: u64) -> anyhow::Result<bool> {
        let mut state = self.state.write();
        match state.position(id) {
            Some(idx) => {
                state.users.remove(idx);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
