// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use site_ledger::CoreError;
use site_ledger_domain::DomainError;

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Schema initialization failed.
    InitializationError(String),
    /// The requested resource was not found.
    NotFound(String),
    /// Foreign key enforcement is not enabled.
    ForeignKeyEnforcementNotEnabled,
    /// A stored value could not be interpreted.
    CorruptRow(String),
    /// A domain rule was violated.
    DomainViolation(DomainError),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
            Self::CorruptRow(msg) => write!(f, "Corrupt row: {msg}"),
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Self::NotFound(String::from("Record not found")),
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

impl From<DomainError> for PersistenceError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}

impl From<CoreError> for PersistenceError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::DomainViolation(inner) => Self::DomainViolation(inner),
        }
    }
}
