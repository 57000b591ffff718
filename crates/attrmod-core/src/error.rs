//! Error types for attribute modifier events
//!
//! Two families of failure exist:
//! - Precondition violations while constructing an event
//! - Mutation attempts through a read-only modifier view
//!
//! Removing an absent association or clearing an empty collection is not an
//! error; those operations report `false` or an empty result instead.

/// Main attrmod error type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModifierError {
    /// No initial modifier collection was supplied
    #[error("modifier event requires an initial modifier collection")]
    MissingModifiers,

    /// No subject item was supplied
    #[error("modifier event requires an item")]
    MissingItem,

    /// No equipment slot was supplied
    #[error("modifier event requires an equipment slot")]
    MissingSlot,

    /// Mutation attempted through a read-only view
    #[error("unsupported operation '{operation}' on a read-only modifier view")]
    UnsupportedOperation {
        /// Name of the rejected operation
        operation: &'static str,
    },
}

impl ModifierError {
    /// Check if error is a construction precondition violation
    #[inline]
    #[must_use]
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::MissingModifiers | Self::MissingItem | Self::MissingSlot
        )
    }

    /// Check if error came from a read-only view
    #[inline]
    #[must_use]
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::UnsupportedOperation { .. })
    }

    #[inline]
    pub(crate) fn unsupported(operation: &'static str) -> Self {
        Self::UnsupportedOperation { operation }
    }
}

/// Result alias using [`ModifierError`]
pub type Result<T, E = ModifierError> = std::result::Result<T, E>;
