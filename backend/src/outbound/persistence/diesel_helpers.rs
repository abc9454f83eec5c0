//! Shared helpers for Diesel repository implementations.

use tracing::debug;

use crate::domain::ports::VehicleRepositoryError;

use super::pool::PoolError;

/// Map pool errors to vehicle repository errors.
pub fn map_pool_error(error: PoolError) -> VehicleRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            VehicleRepositoryError::connection(message)
        }
    }
}

/// Map Diesel errors to vehicle repository errors.
///
/// Database messages are logged at debug level and replaced with a generic
/// description.
pub fn map_diesel_error(error: diesel::result::Error) -> VehicleRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(error = %error, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => VehicleRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => VehicleRepositoryError::query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            VehicleRepositoryError::connection("database connection error")
        }
        DieselError::DeserializationError(_) => {
            VehicleRepositoryError::query("row deserialisation failed")
        }
        _ => VehicleRepositoryError::query("database error"),
    }
}

/// Escape `LIKE` metacharacters so user text always matches literally.
///
/// PostgreSQL treats `\` as the default escape character.
pub fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// `%value%` pattern for substring matching.
pub fn contains_pattern(value: &str) -> String {
    format!("%{}%", escape_like(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;

    struct StubInfo;

    impl DatabaseErrorInformation for StubInfo {
        fn message(&self) -> &str {
            "server closed the connection"
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            None
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            None
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    #[rstest]
    #[case("toy", "%toy%")]
    #[case("50%", "%50\\%%")]
    #[case("a_b", "%a\\_b%")]
    #[case("c:\\", "%c:\\\\%")]
    fn patterns_escape_metacharacters(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(contains_pattern(raw), expected);
    }

    #[rstest]
    fn closed_connections_map_to_connection_errors() {
        let error = map_diesel_error(DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new(StubInfo),
        ));
        assert_eq!(
            error,
            VehicleRepositoryError::connection("database connection error")
        );
    }

    #[rstest]
    fn other_failures_map_to_query_errors() {
        assert_eq!(
            map_diesel_error(DieselError::NotFound),
            VehicleRepositoryError::query("record not found")
        );
    }

    #[rstest]
    fn pool_errors_map_to_connection_errors() {
        assert_eq!(
            map_pool_error(PoolError::checkout("timed out")),
            VehicleRepositoryError::connection("timed out")
        );
    }
}
