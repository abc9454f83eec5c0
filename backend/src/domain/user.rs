//! Authenticated user identity.

use std::fmt;

use uuid::Uuid;

/// Validation errors returned by [`UserId::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserIdError {
    #[error("user id must not be empty")]
    Empty,
    #[error("user id must be a valid UUID")]
    Invalid,
}

/// Stable user identifier stored as a UUID.
///
/// # Examples
/// ```
/// use vehicle_catalogue::domain::UserId;
///
/// let id = UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("valid uuid");
/// assert_eq!(id.as_ref(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserId(Uuid, String);

impl UserId {
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserIdError> {
        let id = id.as_ref();
        if id.is_empty() {
            return Err(UserIdError::Empty);
        }
        if id.trim() != id {
            return Err(UserIdError::Invalid);
        }
        let parsed = Uuid::parse_str(id).map_err(|_| UserIdError::Invalid)?;
        Ok(Self(parsed, id.to_owned()))
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.1.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.1.as_str())
    }
}
