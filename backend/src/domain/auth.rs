//! Login credentials.
//!
//! Both fields are checked in one pass so a caller sees every problem with a
//! login payload at once.

use std::collections::BTreeMap;
use std::fmt;

use super::Error;

/// Field-level problem with a login payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    #[error("Email is required")]
    MissingEmail,
    #[error("Email should be valid")]
    InvalidEmail,
    #[error("Password is required")]
    MissingPassword,
}

impl LoginValidationError {
    /// Request field the problem belongs to.
    pub const fn field(self) -> &'static str {
        match self {
            Self::MissingEmail | Self::InvalidEmail => "email",
            Self::MissingPassword => "password",
        }
    }
}

impl From<Vec<LoginValidationError>> for Error {
    fn from(value: Vec<LoginValidationError>) -> Self {
        let errors: BTreeMap<String, String> = value
            .into_iter()
            .map(|problem| (problem.field().to_owned(), problem.to_string()))
            .collect();
        Error::validation_failed(errors)
    }
}

/// Validated login credentials.
///
/// ## Invariants
/// - `email` is trimmed and has a non-empty local part and domain around a
///   single `@`.
/// - `password` is non-blank; caller whitespace is preserved.
///
/// # Examples
/// ```
/// use vehicle_catalogue::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("admin@example.com", "password").unwrap();
/// assert_eq!(creds.email(), "admin@example.com");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: String,
}

impl LoginCredentials {
    /// Validate raw inputs, reporting every failing field.
    pub fn try_from_parts(
        email: &str,
        password: &str,
    ) -> Result<Self, Vec<LoginValidationError>> {
        let email = email.trim();
        let mut problems = Vec::new();
        if email.is_empty() {
            problems.push(LoginValidationError::MissingEmail);
        } else if !looks_like_email(email) {
            problems.push(LoginValidationError::InvalidEmail);
        }
        if password.trim().is_empty() {
            problems.push(LoginValidationError::MissingPassword);
        }
        if !problems.is_empty() {
            return Err(problems);
        }
        Ok(Self {
            email: email.to_owned(),
            password: password.to_owned(),
        })
    }

    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .finish()
    }
}

fn looks_like_email(candidate: &str) -> bool {
    let Some((local, domain)) = candidate.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !candidate.chars().any(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", vec![LoginValidationError::MissingEmail])]
    #[case("   ", "pw", vec![LoginValidationError::MissingEmail])]
    #[case("admin", "pw", vec![LoginValidationError::InvalidEmail])]
    #[case("a@b@c", "pw", vec![LoginValidationError::InvalidEmail])]
    #[case("admin@example.com", "", vec![LoginValidationError::MissingPassword])]
    #[case(
        "",
        "  ",
        vec![LoginValidationError::MissingEmail, LoginValidationError::MissingPassword]
    )]
    fn invalid_credentials(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: Vec<LoginValidationError>,
    ) {
        let err = LoginCredentials::try_from_parts(email, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn valid_credentials_trim_email() {
        let creds = LoginCredentials::try_from_parts("  admin@example.com ", " secret ")
            .expect("valid inputs should succeed");
        assert_eq!(creds.email(), "admin@example.com");
        assert_eq!(creds.password(), " secret ");
    }

    #[rstest]
    fn problems_become_one_validation_error() {
        let problems = LoginCredentials::try_from_parts("nope", "").expect_err("invalid");
        let error = Error::from(problems);
        assert_eq!(error.code(), ErrorCode::ValidationFailed);
        let fields = error.field_errors().expect("field errors");
        assert_eq!(fields.get("email").map(String::as_str), Some("Email should be valid"));
        assert_eq!(fields.get("password").map(String::as_str), Some("Password is required"));
    }

    #[rstest]
    fn debug_output_redacts_password() {
        let creds = LoginCredentials::try_from_parts("admin@example.com", "hunter2")
            .expect("valid inputs");
        assert!(!format!("{creds:?}").contains("hunter2"));
    }
}
