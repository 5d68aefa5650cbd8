//! Failure modes of a settlement computation.
//!
//! All errors are recoverable by the caller: they are scoped to a single
//! report computation and never leave partial results behind. The engine
//! additionally emits non-fatal `tracing` warnings (rounding and
//! aggregation inconsistencies) that are logged rather than returned.
use thiserror::Error;
use uuid::Uuid;

/// Everything that can go wrong while turning expenses into a report.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Malformed or inconsistent share data for one expense.
    ///
    /// The caller should reject the offending expense and exclude it from
    /// the report; the error names the expense so it can be surfaced as
    /// "expense X has an invalid split".
    #[error("invalid split for expense {expense_id}: {reason}")]
    InvalidSplit { expense_id: Uuid, reason: String },
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Currency mismatch: {0}")]
    CurrencyMismatch(String),
}

impl EngineError {
    /// Attach an expense id to a split validation failure.
    pub(crate) fn invalid_split(expense_id: Uuid, reason: impl Into<String>) -> Self {
        EngineError::InvalidSplit {
            expense_id,
            reason: reason.into(),
        }
    }
}
