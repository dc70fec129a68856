//! Common error infrastructure for skirmish-core.
//!
//! Domain-specific errors (e.g. `MoveError`, `WorldError`) live next to the
//! code that produces them. This module only provides the shared severity
//! classification so callers can decide between degrading a turn and aborting
//! the run without matching on every variant.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the current turn degrades to a skip, the run continues
/// - **Validation**: invalid input or usage, rejected without retry
/// - **Internal**: unexpected state inconsistency (a bug)
/// - **Fatal**: the run cannot continue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorSeverity {
    /// Recoverable error - the turn is skipped and the game goes on.
    ///
    /// Examples: destination occupied, no creature in the attack direction
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: adding children to a leaf attack component
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// Examples: two creatures found on one cell after a move
    Internal,

    /// Fatal error - configuration or structural invariant violated.
    ///
    /// Examples: position out of bounds on placement, unknown creature id
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates a bug or a broken invariant.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all skirmish-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Useful for audit details, metrics and tests. Defaults to the type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
