//! Shared validation helpers for inbound HTTP adapters.
//!
//! Raw request values are collected into [`FieldErrors`] so a single response
//! can report every malformed field.

use std::collections::BTreeMap;

use crate::domain::Error;

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) const fn as_str(self) -> &'static str {
        self.0
    }
}

/// Accumulates per-field validation messages.
#[derive(Debug, Default)]
pub(crate) struct FieldErrors {
    errors: BTreeMap<String, String>,
}

impl FieldErrors {
    pub(crate) fn push(&mut self, field: FieldName, message: impl Into<String>) {
        self.errors
            .entry(field.as_str().to_owned())
            .or_insert_with(|| message.into());
    }

    /// Parse an optional integer, recording a message when it is malformed.
    ///
    /// Absent values yield `default`; malformed values also yield `default`
    /// so parsing can continue and report further fields.
    pub(crate) fn integer_or(&mut self, field: FieldName, raw: Option<&str>, default: i64) -> i64 {
        let Some(raw) = raw else {
            return default;
        };
        match raw.trim().parse::<i64>() {
            Ok(value) => value,
            Err(_) => {
                self.push(
                    field,
                    format!("{} must be an integer, got '{raw}'", field.as_str()),
                );
                default
            }
        }
    }

    /// Succeed when nothing was recorded.
    pub(crate) fn finish(self) -> Result<(), Error> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(Error::validation_failed(self.errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    const PAGE_NUMBER: FieldName = FieldName::new("pageNumber");
    const PAGE_SIZE: FieldName = FieldName::new("pageSize");

    #[rstest]
    #[case(None, 0)]
    #[case(Some("3"), 3)]
    #[case(Some(" -2 "), -2)]
    fn integers_parse_or_default(#[case] raw: Option<&str>, #[case] expected: i64) {
        let mut errors = FieldErrors::default();
        assert_eq!(errors.integer_or(PAGE_NUMBER, raw, 0), expected);
        assert!(errors.finish().is_ok());
    }

    #[rstest]
    fn malformed_integers_are_all_reported() {
        let mut errors = FieldErrors::default();
        errors.integer_or(PAGE_NUMBER, Some("first"), 0);
        errors.integer_or(PAGE_SIZE, Some("1.5"), 10);

        let error = errors.finish().expect_err("two malformed fields");
        assert_eq!(error.code(), ErrorCode::ValidationFailed);
        let fields = error.field_errors().expect("field errors");
        assert_eq!(
            fields.get("pageNumber").map(String::as_str),
            Some("pageNumber must be an integer, got 'first'")
        );
        assert_eq!(
            fields.get("pageSize").map(String::as_str),
            Some("pageSize must be an integer, got '1.5'")
        );
    }
}
