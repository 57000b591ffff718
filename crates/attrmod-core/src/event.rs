//! Attribute modifier event
//!
//! Provides [`AttributeModifierEvent`], the payload handed to every listener
//! while the modifiers of an item in an equipment slot are being computed.
//!
//! # Lifecycle
//! 1. The dispatcher builds the event from the item's intrinsic modifiers
//! 2. Each listener reads and optionally edits the modifiers
//! 3. The dispatcher takes the final collection with
//!    [`AttributeModifierEvent::into_modifiers`]
//!
//! The intrinsic modifiers are shared, not copied, until a listener asks for
//! a mutation. The first mutation copies them into storage owned by the event;
//! later mutations reuse that storage.

use crate::config::EventConfig;
use crate::error::{ModifierError, Result};
use crate::multimap::{ModifiersView, Multimap};
use crate::types::EquipmentSlot;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

/// Mutable payload for computing an item's attribute modifiers
///
/// # Type Parameters
/// - `I`: Subject item, borrowed for the duration of the pass
/// - `K`: Attribute key (`Eq + Hash`)
/// - `V`: Modifier value (`PartialEq`)
///
/// # Invariants
/// - The original collection is never mutated
/// - Before any mutation, current and original have equal content
/// - After the first mutation, current lives in storage owned by the event,
///   allocated exactly once
/// - Current is only ever exposed through a read-only [`ModifiersView`]
///
/// Reading [`modifiers`](Self::modifiers) and then adding modifiers based on
/// what is there makes the result depend on listener order. Reading
/// [`original_modifiers`](Self::original_modifiers) instead gives the same
/// answer no matter where the listener runs.
pub struct AttributeModifierEvent<'a, I, K, V> {
    item: &'a I,
    slot: EquipmentSlot,
    original: Arc<Multimap<K, V>>,
    /// `None` while current reads through to `original`
    owned: Option<Box<Multimap<K, V>>>,
    config: EventConfig,
}

impl<'a, I, K, V> AttributeModifierEvent<'a, I, K, V> {
    /// Create event with default configuration
    #[must_use]
    pub fn new(
        item: &'a I,
        slot: EquipmentSlot,
        modifiers: impl Into<Arc<Multimap<K, V>>>,
    ) -> Self {
        Self::with_config(item, slot, modifiers, EventConfig::default())
    }

    /// Create event with explicit configuration
    #[must_use]
    pub fn with_config(
        item: &'a I,
        slot: EquipmentSlot,
        modifiers: impl Into<Arc<Multimap<K, V>>>,
        config: EventConfig,
    ) -> Self {
        Self {
            item,
            slot,
            original: modifiers.into(),
            owned: None,
            config,
        }
    }

    /// Start building an event field by field
    #[inline]
    #[must_use]
    pub fn builder() -> ModifierEventBuilder<'a, I, K, V> {
        ModifierEventBuilder::new()
    }

    /// Subject item
    #[inline]
    #[must_use]
    pub fn item(&self) -> &'a I {
        self.item
    }

    /// Equipment slot the item is evaluated in
    #[inline]
    #[must_use]
    pub fn slot(&self) -> EquipmentSlot {
        self.slot
    }

    /// Configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &EventConfig {
        &self.config
    }

    /// Current modifiers, including edits made by earlier listeners
    ///
    /// Use the mutation methods on the event to change them.
    #[inline]
    #[must_use]
    pub fn modifiers(&self) -> ModifiersView<'_, K, V> {
        ModifiersView::new(self.current())
    }

    /// Modifiers as they were before any listener ran
    #[inline]
    #[must_use]
    pub fn original_modifiers(&self) -> ModifiersView<'_, K, V> {
        ModifiersView::new(&self.original)
    }

    /// Check if a mutation has been requested
    #[inline]
    #[must_use]
    pub fn is_modified(&self) -> bool {
        self.owned.is_some()
    }

    /// Consume the event and return the final modifiers
    ///
    /// Hands back the original `Arc` when nothing was modified.
    #[must_use]
    pub fn into_modifiers(self) -> Arc<Multimap<K, V>> {
        match self.owned {
            Some(owned) => Arc::new(*owned),
            None => self.original,
        }
    }

    fn current(&self) -> &Multimap<K, V> {
        self.owned.as_deref().unwrap_or(Arc::as_ref(&self.original))
    }
}

impl<I, K, V> AttributeModifierEvent<'_, I, K, V>
where
    K: Eq + Hash + Clone,
    V: PartialEq + Clone,
{
    /// Owned storage, copying the original on first use
    fn ensure_mutable(&mut self) -> &mut Multimap<K, V> {
        let Self {
            slot,
            original,
            owned,
            config,
            ..
        } = self;
        owned.get_or_insert_with(|| {
            let copy = original.copy_with_policy(config.duplicate_policy);
            tracing::debug!(
                slot = %slot,
                associations = copy.len(),
                "copying modifiers on first mutation"
            );
            Box::new(copy)
        })
    }

    /// Add a modifier to an attribute
    ///
    /// Returns `false` only when the set policy finds the exact pair already
    /// present.
    pub fn add_modifier(&mut self, attribute: K, modifier: V) -> bool {
        let added = self.ensure_mutable().insert(attribute, modifier);
        tracing::trace!(added, "add_modifier");
        added
    }

    /// Remove a single modifier from an attribute
    ///
    /// Returns `true` if a matching modifier was removed.
    pub fn remove_modifier(&mut self, attribute: &K, modifier: &V) -> bool {
        let removed = self.ensure_mutable().remove(attribute, modifier);
        tracing::trace!(removed, "remove_modifier");
        removed
    }

    /// Remove every modifier of an attribute
    ///
    /// Returns the removed modifiers in no particular order.
    pub fn remove_attribute(&mut self, attribute: &K) -> Vec<V> {
        let removed = self.ensure_mutable().remove_all(attribute);
        tracing::trace!(removed = removed.len(), "remove_attribute");
        removed
    }

    /// Remove every modifier of every attribute
    pub fn clear_modifiers(&mut self) {
        self.ensure_mutable().clear();
        tracing::trace!("clear_modifiers");
    }
}

impl<I, K: fmt::Debug, V: fmt::Debug> fmt::Debug for AttributeModifierEvent<'_, I, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttributeModifierEvent")
            .field("slot", &self.slot)
            .field("modified", &self.is_modified())
            .field("original", &self.original)
            .field("current", self.current())
            .finish_non_exhaustive()
    }
}

/// Builder for [`AttributeModifierEvent`]
///
/// Usage:
/// ```rust
/// use attrmod_core::{AttributeModifierEvent, EquipmentSlot, Multimap};
///
/// let item = "iron_sword";
/// let base: Multimap<&str, i32> = [("attack_damage", 6)].into_iter().collect();
/// let event = AttributeModifierEvent::builder()
///     .item(&item)
///     .slot(EquipmentSlot::MainHand)
///     .modifiers(base)
///     .build()?;
/// assert_eq!(event.modifiers().len(), 1);
/// # Ok::<(), attrmod_core::ModifierError>(())
/// ```
pub struct ModifierEventBuilder<'a, I, K, V> {
    item: Option<&'a I>,
    slot: Option<EquipmentSlot>,
    modifiers: Option<Arc<Multimap<K, V>>>,
    config: EventConfig,
}

impl<I, K, V> Default for ModifierEventBuilder<'_, I, K, V> {
    fn default() -> Self {
        Self {
            item: None,
            slot: None,
            modifiers: None,
            config: EventConfig::default(),
        }
    }
}

impl<'a, I, K, V> ModifierEventBuilder<'a, I, K, V> {
    /// Create empty builder
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set subject item
    #[inline]
    #[must_use]
    pub fn item(mut self, item: &'a I) -> Self {
        self.item = Some(item);
        self
    }

    /// Set equipment slot
    #[inline]
    #[must_use]
    pub fn slot(mut self, slot: EquipmentSlot) -> Self {
        self.slot = Some(slot);
        self
    }

    /// Set initial modifiers
    #[inline]
    #[must_use]
    pub fn modifiers(mut self, modifiers: impl Into<Arc<Multimap<K, V>>>) -> Self {
        self.modifiers = Some(modifiers.into());
        self
    }

    /// Set configuration
    #[inline]
    #[must_use]
    pub fn config(mut self, config: EventConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the event
    ///
    /// # Errors
    /// Returns a precondition error naming the first missing field:
    /// [`ModifierError::MissingModifiers`], [`ModifierError::MissingItem`]
    /// or [`ModifierError::MissingSlot`]
    pub fn build(self) -> Result<AttributeModifierEvent<'a, I, K, V>> {
        let modifiers = self.modifiers.ok_or(ModifierError::MissingModifiers)?;
        let item = self.item.ok_or(ModifierError::MissingItem)?;
        let slot = self.slot.ok_or(ModifierError::MissingSlot)?;
        Ok(AttributeModifierEvent::with_config(
            item,
            slot,
            modifiers,
            self.config,
        ))
    }
}
