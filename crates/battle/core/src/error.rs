//! Common error infrastructure for battle-core.
//!
//! Resolution itself never fails: status lookups, mood transitions and strategy
//! selection all degrade to "no change" or a baseline fallback. The errors in
//! this module are raised while static tables are being built (configuration,
//! ability definitions, strategy graphs) or while a saved snapshot is applied.
//!
//! Domain-specific error enums live next to the types they validate; this
//! module only defines the shared classification trait.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Invalid input that should be rejected without retry.
    ///
    /// Examples: an ability without a name, a snapshot whose health exceeds
    /// the entity's maximum.
    Validation,

    /// Malformed static configuration, the battle cannot be set up.
    ///
    /// Examples: hit/miss probabilities that do not partition the roll,
    /// a strategy graph edge pointing at an unknown move.
    Fatal,
}

impl ErrorSeverity {
    /// Returns true if the error must abort battle setup.
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal)
    }
}

/// Common trait for all battle-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on whether battle setup can continue
pub trait CombatError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
