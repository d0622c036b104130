use serde::{Deserialize, Serialize};
use serde_json::Number;
use utoipa::ToSchema;

use crate::contract::model::User;

/// REST DTO for user representation with serde/utoipa
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: u64,
    pub name: String,
    pub email: String,
    #[schema(value_type = f64)]
    pub age: Number,
}

/// Request body accepted by create and update.
///
/// Documentation only: bodies are decoded loosely into a `UserDraft` so the
/// validator can report missing or mistyped fields itself.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserReq {
    pub name: String,
    #[schema(example = "ann@example.com")]
    pub email: String,
    #[schema(minimum = 0)]
    pub age: f64,
}

/// Error body returned by every failing request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorDto {
    pub message: String,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            age: user.age,
        }
    }
}
