//! Conversions from external infrastructure errors into domain errors.

use dueline_domain::DuelineError;
use reqwest::Error as HttpError;
use rusqlite::Error as SqlError;

/// Error newtype that keeps conversions on the infrastructure side and can
/// be converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub DuelineError);

impl From<InfraError> for DuelineError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<DuelineError> for InfraError {
    fn from(value: DuelineError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoDuelineError {
    fn into_dueline(self) -> DuelineError;
}

/* -------------------------------------------------------------------------- */
/* rusqlite::Error → DuelineError */
/* -------------------------------------------------------------------------- */

impl IntoDuelineError for SqlError {
    fn into_dueline(self) -> DuelineError {
        use rusqlite::ffi::ErrorCode;
        use rusqlite::Error as RE;

        match self {
            RE::SqliteFailure(err, maybe_message) => {
                let message = maybe_message.unwrap_or_default();
                match (err.code, err.extended_code) {
                    (ErrorCode::DatabaseBusy, _) => {
                        DuelineError::Database("database is busy".into())
                    }
                    (ErrorCode::DatabaseLocked, _) => {
                        DuelineError::Database("database is locked".into())
                    }
                    (ErrorCode::ConstraintViolation, 2067) => {
                        DuelineError::Database("unique constraint violation".into())
                    }
                    (ErrorCode::ConstraintViolation, 787) => {
                        DuelineError::Database("foreign key constraint violation".into())
                    }
                    _ => DuelineError::Database(format!(
                        "sqlite failure {:?} (code {}): {}",
                        err.code, err.extended_code, message
                    )),
                }
            }
            RE::QueryReturnedNoRows => DuelineError::NotFound("no rows returned by query".into()),
            RE::FromSqlConversionFailure(_, _, cause) => {
                DuelineError::Database(format!("failed to convert sqlite value: {cause}"))
            }
            RE::InvalidColumnType(_, _, ty) => {
                DuelineError::Database(format!("invalid column type: {ty}"))
            }
            RE::Utf8Error(_) => DuelineError::Database("invalid UTF-8 returned from sqlite".into()),
            RE::InvalidParameterName(parameter_name) => {
                DuelineError::Database(format!("invalid parameter name: {parameter_name}"))
            }
            RE::InvalidPath(path) => {
                DuelineError::Database(format!("invalid database path: {}", path.to_string_lossy()))
            }
            RE::InvalidQuery => DuelineError::Database("invalid SQL query".into()),
            other => DuelineError::Database(other.to_string()),
        }
    }
}

impl From<SqlError> for InfraError {
    fn from(value: SqlError) -> Self {
        InfraError(value.into_dueline())
    }
}

/* -------------------------------------------------------------------------- */
/* r2d2::Error → DuelineError */
/* -------------------------------------------------------------------------- */

impl From<r2d2::Error> for InfraError {
    fn from(value: r2d2::Error) -> Self {
        InfraError(DuelineError::Database(format!("connection pool error: {value}")))
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → DuelineError */
/* -------------------------------------------------------------------------- */

impl IntoDuelineError for HttpError {
    fn into_dueline(self) -> DuelineError {
        if self.is_timeout() {
            return DuelineError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return DuelineError::Network("HTTP connection failure".into());
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return match code {
                404 => DuelineError::NotFound(message),
                400..=499 => DuelineError::InvalidInput(message),
                _ => DuelineError::Network(message),
            };
        }

        DuelineError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_dueline())
    }
}

#[cfg(test)]
mod tests {
    use rusqlite::ffi::{Error as FfiError, ErrorCode};
    use rusqlite::Error as SqlError;

    use super::*;

    #[test]
    fn sqlite_busy_maps_to_database_error() {
        let err = SqlError::SqliteFailure(
            FfiError { code: ErrorCode::DatabaseBusy, extended_code: 5 },
            Some("database is locked".into()),
        );

        let mapped: DuelineError = InfraError::from(err).into();
        match mapped {
            DuelineError::Database(msg) => {
                assert!(msg.contains("busy") || msg.contains("locked"));
            }
            other => panic!("expected database error, got {other:?}"),
        }
    }

    #[test]
    fn sqlite_no_rows_maps_to_not_found() {
        let mapped: DuelineError = InfraError::from(SqlError::QueryReturnedNoRows).into();
        assert!(matches!(mapped, DuelineError::NotFound(_)));
    }

    #[test]
    fn sqlite_unique_violation_is_named() {
        let err = SqlError::SqliteFailure(
            FfiError { code: ErrorCode::ConstraintViolation, extended_code: 2067 },
            None,
        );

        let mapped: DuelineError = InfraError::from(err).into();
        match mapped {
            DuelineError::Database(msg) => assert!(msg.contains("unique constraint")),
            other => panic!("expected database error, got {other:?}"),
        }
    }
}
