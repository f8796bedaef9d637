//! Storage-level failure vocabulary shared by every store port.
//!
//! Adapters translate backend-native errors (driver, pool, timeout) into
//! these kinds before returning. Services translate them again into
//! [`crate::domain::DomainError`]; a `StoreError` never reaches a caller.

use super::define_port_error;

define_port_error! {
    /// Errors raised by entity store adapters.
    pub enum StoreError {
        /// A unique column or composite key already holds the value.
        ConstraintUnique { constraint: String } =>
            "unique constraint violated: {constraint}",
        /// A referenced row does not exist.
        ConstraintForeignKey { constraint: String } =>
            "foreign key constraint violated: {constraint}",
        /// An update or delete matched nothing.
        NoRowsAffected => "no rows affected",
        /// A read matched nothing.
        EmptySelection => "selection returned no rows",
        /// Anything else: connection loss, timeouts, unexpected driver errors.
        Unknown { message: String } => "store failure: {message}",
    }
}

impl StoreError {
    /// Name of the violated constraint, when the backend reported one.
    pub fn constraint(&self) -> Option<&str> {
        match self {
            Self::ConstraintUnique { constraint } | Self::ConstraintForeignKey { constraint } => {
                Some(constraint.as_str())
            }
            _ => None,
        }
    }
}
