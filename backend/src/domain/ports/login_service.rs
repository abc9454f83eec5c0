//! Driving port for login.
//!
//! HTTP handlers call it to authenticate credentials without knowing where
//! the account is configured, so handler tests can substitute a double.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, UserId};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated user id.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error>;
}

/// Authenticates against a single configured account.
#[derive(Clone)]
pub struct ConfiguredLoginService {
    email: String,
    password: String,
    user_id: UserId,
}

impl ConfiguredLoginService {
    pub fn new(email: impl Into<String>, password: impl Into<String>, user_id: UserId) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            user_id,
        }
    }
}

impl std::fmt::Debug for ConfiguredLoginService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfiguredLoginService")
            .field("email", &self.email)
            .field("user_id", &self.user_id)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl LoginService for ConfiguredLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let email_matches = credentials.email().eq_ignore_ascii_case(&self.email);
        if email_matches && credentials.password() == self.password {
            Ok(self.user_id.clone())
        } else {
            Err(Error::unauthorized("Invalid credentials"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::{fixture, rstest};

    const USER_ID: &str = "123e4567-e89b-12d3-a456-426614174000";

    #[fixture]
    fn service() -> ConfiguredLoginService {
        ConfiguredLoginService::new(
            "admin@example.com",
            "password",
            UserId::new(USER_ID).expect("fixture user id"),
        )
    }

    #[rstest]
    #[case("admin@example.com", "password", true)]
    #[case("ADMIN@example.com", "password", true)]
    #[case("admin@example.com", "Password", false)]
    #[case("other@example.com", "password", false)]
    #[tokio::test]
    async fn authenticates_only_the_configured_account(
        service: ConfiguredLoginService,
        #[case] email: &str,
        #[case] password: &str,
        #[case] should_succeed: bool,
    ) {
        let creds = LoginCredentials::try_from_parts(email, password).expect("credentials shape");
        match (should_succeed, service.authenticate(&creds).await) {
            (true, Ok(id)) => assert_eq!(id.as_ref(), USER_ID),
            (false, Err(err)) => assert_eq!(err.code(), ErrorCode::Unauthorized),
            (true, Err(err)) => panic!("expected success, got error: {err:?}"),
            (false, Ok(id)) => panic!("expected failure, got success: {id}"),
        }
    }

    #[rstest]
    fn debug_output_omits_password(service: ConfiguredLoginService) {
        assert!(!format!("{service:?}").contains("password\""));
    }
}
