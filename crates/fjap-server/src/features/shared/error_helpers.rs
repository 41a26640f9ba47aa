//! Database constraint classification
//!
//! ```rust,ignore
//! .map_err(|e| match check_constraint_violation(e) {
//!     ConstraintViolation::Unique => CreateSubjectError::DuplicateCode(code),
//!     ConstraintViolation::ForeignKey => CreateSubjectError::UnknownReference,
//!     ConstraintViolation::Other(e) => CreateSubjectError::Database(e),
//! })?;
//! ```

use sqlx::Error as SqlxError;

/// What kind of constraint, if any, a failed statement tripped
#[derive(Debug)]
pub enum ConstraintViolation {
    Unique,
    ForeignKey,
    Other(SqlxError),
}

pub fn check_constraint_violation(error: SqlxError) -> ConstraintViolation {
    if let SqlxError::Database(ref db_err) = error {
        if db_err.is_unique_violation() {
            return ConstraintViolation::Unique;
        }
        if db_err.is_foreign_key_violation() {
            return ConstraintViolation::ForeignKey;
        }
    }
    ConstraintViolation::Other(error)
}

pub fn is_unique_violation(error: &SqlxError) -> bool {
    matches!(error, SqlxError::Database(db_err) if db_err.is_unique_violation())
}

pub fn is_foreign_key_violation(error: &SqlxError) -> bool {
    matches!(error, SqlxError::Database(db_err) if db_err.is_foreign_key_violation())
}
