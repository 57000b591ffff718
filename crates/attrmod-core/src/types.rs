//! Domain types for attribute modifiers
//!
//! The event itself is generic over its key and value types. These are the
//! concrete ones used by the equipment code paths and the test fixtures.

use std::fmt;
use uuid::Uuid;

/// Equipment slot an item is evaluated in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EquipmentSlot {
    /// Primary hand
    MainHand,
    /// Secondary hand
    OffHand,
    /// Boots
    Feet,
    /// Leggings
    Legs,
    /// Chestplate
    Chest,
    /// Helmet
    Head,
    /// Body armor for mounts and pets
    Body,
}

/// Coarse grouping of equipment slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotGroup {
    /// Held in a hand
    Hand,
    /// Worn as armor
    Armor,
}

impl EquipmentSlot {
    /// Every slot, hands first
    pub const ALL: [Self; 7] = [
        Self::MainHand,
        Self::OffHand,
        Self::Feet,
        Self::Legs,
        Self::Chest,
        Self::Head,
        Self::Body,
    ];

    /// Stable lowercase name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::MainHand => "mainhand",
            Self::OffHand => "offhand",
            Self::Feet => "feet",
            Self::Legs => "legs",
            Self::Chest => "chest",
            Self::Head => "head",
            Self::Body => "body",
        }
    }

    /// Slot group
    #[must_use]
    pub const fn group(self) -> SlotGroup {
        match self {
            Self::MainHand | Self::OffHand => SlotGroup::Hand,
            Self::Feet | Self::Legs | Self::Chest | Self::Head | Self::Body => SlotGroup::Armor,
        }
    }

    /// Check if slot is worn rather than held
    #[inline]
    #[must_use]
    pub const fn is_armor(self) -> bool {
        matches!(self.group(), SlotGroup::Armor)
    }
}

impl fmt::Display for EquipmentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Attribute identifier (e.g. `generic.attack_damage`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AttributeId(String);

impl AttributeId {
    /// Create new attribute id
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Id as string
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AttributeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for AttributeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How a modifier's amount combines with the attribute value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModifierOperation {
    /// Added to the base value
    AddValue,
    /// Base value multiplied by `amount`, then added
    AddMultipliedBase,
    /// Running total multiplied by `1 + amount`
    AddMultipliedTotal,
}

/// Single modifier applied to an attribute
///
/// The id must stay the same between equipping and unequipping an item, or
/// the unequip pass cannot find the modifier again.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeModifier {
    id: Uuid,
    name: String,
    amount: f64,
    operation: ModifierOperation,
}

impl AttributeModifier {
    /// Create modifier with a fresh random id
    #[must_use]
    pub fn new(name: impl Into<String>, amount: f64, operation: ModifierOperation) -> Self {
        Self::with_id(Uuid::new_v4(), name, amount, operation)
    }

    /// Create modifier with a caller-supplied stable id
    #[must_use]
    pub fn with_id(
        id: Uuid,
        name: impl Into<String>,
        amount: f64,
        operation: ModifierOperation,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            amount,
            operation,
        }
    }

    /// Modifier id
    #[inline]
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Human-readable name, should identify whoever added it
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Amount
    #[inline]
    #[must_use]
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// Operation
    #[inline]
    #[must_use]
    pub fn operation(&self) -> ModifierOperation {
        self.operation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_groups() {
        assert_eq!(EquipmentSlot::MainHand.group(), SlotGroup::Hand);
        assert_eq!(EquipmentSlot::OffHand.group(), SlotGroup::Hand);
        assert!(EquipmentSlot::Chest.is_armor());
        assert!(!EquipmentSlot::MainHand.is_armor());
        assert_eq!(
            EquipmentSlot::ALL.iter().filter(|s| s.is_armor()).count(),
            5
        );
    }

    #[test]
    fn slot_display() {
        assert_eq!(EquipmentSlot::MainHand.to_string(), "mainhand");
        assert_eq!(EquipmentSlot::Body.to_string(), "body");
    }

    #[test]
    fn attribute_id_from_str() {
        let id = AttributeId::from("generic.armor");
        assert_eq!(id.as_str(), "generic.armor");
        assert_eq!(id, AttributeId::new("generic.armor"));
    }

    #[test]
    fn modifier_equality_includes_id() {
        let a = AttributeModifier::new("sharpness", 1.5, ModifierOperation::AddValue);
        let b = AttributeModifier::new("sharpness", 1.5, ModifierOperation::AddValue);
        assert_ne!(a, b);

        let c = AttributeModifier::with_id(a.id(), "sharpness", 1.5, ModifierOperation::AddValue);
        assert_eq!(a, c);
    }
}
