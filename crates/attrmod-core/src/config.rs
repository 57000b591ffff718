//! Event configuration

use crate::multimap::DuplicatePolicy;

/// Configuration for attribute modifier events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventConfig {
    /// Policy of the owned copy created on the first mutation
    pub duplicate_policy: DuplicatePolicy,
}

impl EventConfig {
    /// Create default configuration (bag semantics)
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With duplicate policy
    #[inline]
    #[must_use]
    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_bag() {
        assert_eq!(EventConfig::new().duplicate_policy, DuplicatePolicy::Bag);
    }

    #[test]
    fn with_duplicate_policy() {
        let config = EventConfig::new().with_duplicate_policy(DuplicatePolicy::Set);
        assert_eq!(config.duplicate_policy, DuplicatePolicy::Set);
    }
}
