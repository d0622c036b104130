use serde_json::{Map, Number, Value};

/// Pure user model for inter-module communication.
///
/// `age` keeps the JSON number as submitted, so `30.5` is echoed back as
/// `30.5`; integral values (`30`, `30.0`) are held as integers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub age: Number,
}

/// Raw create/update input before validation. Every field may be absent or
/// carry any JSON type; the validator decides what is acceptable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserDraft {
    pub name: Option<Value>,
    pub email: Option<Value>,
    pub age: Option<Value>,
}

/// Validated user fields, ready to be stored under a freshly allocated id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub age: Number,
}

impl UserDraft {
    /// Draft with all three fields present.
    pub fn new(name: impl Into<Value>, email: impl Into<Value>, age: impl Into<Value>) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
            age: Some(age.into()),
        }
    }

    /// Pick the known fields out of a decoded request body.
    /// Anything that is not a JSON object carries no fields at all.
    pub fn from_json(body: Value) -> Self {
        match body {
            Value::Object(map) => Self::from_map(map),
            _ => Self::default(),
        }
    }

    fn from_map(mut map: Map<String, Value>) -> Self {
        Self {
            name: map.remove("name"),
            email: map.remove("email"),
            age: map.remove("age"),
        }
    }
}

impl NewUser {
    pub fn into_user(self, id: u64) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            age: self.age,
        }
    }
}
