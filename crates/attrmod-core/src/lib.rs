//! attrmod Core
//!
//! Copy-on-write attribute modifier events for items in equipment slots.
//!
//! # Core Concepts
//!
//! - [`AttributeModifierEvent`]: Payload listeners edit during one pass
//! - [`Multimap`]: Unordered key → several values mapping
//! - [`ModifiersView`]: Read-only projection handed out by the event
//! - [`ModifierStore`]: Mutation surface that read-only views refuse
//! - [`ModifierBus`]: Synchronous, priority-ordered listener list
//!
//! # Example
//!
//! ```rust
//! use attrmod_core::{
//!     AttributeId, AttributeModifier, EquipmentSlot, ModifierBus, ModifierOperation, Multimap,
//! };
//!
//! let damage = AttributeId::new("generic.attack_damage");
//! let base: Multimap<AttributeId, AttributeModifier> = [(
//!     damage.clone(),
//!     AttributeModifier::new("base", 6.0, ModifierOperation::AddValue),
//! )]
//! .into_iter()
//! .collect();
//!
//! let mut bus: ModifierBus<&str, AttributeId, AttributeModifier> = ModifierBus::new();
//! bus.register(move |event| {
//!     if event.slot() == EquipmentSlot::MainHand {
//!         let bonus = AttributeModifier::new("sharpness", 1.5, ModifierOperation::AddValue);
//!         event.add_modifier(damage.clone(), bonus);
//!     }
//! });
//!
//! let item = "iron_sword";
//! let finished = bus.post(&item, EquipmentSlot::MainHand, base);
//! assert_eq!(finished.len(), 2);
//! ```

mod bus;
mod config;
mod error;
mod event;
mod multimap;
mod types;

// Re-exports
pub use bus::{EventPriority, ModifierBus, ModifierListener};
pub use config::EventConfig;
pub use error::{ModifierError, Result};
pub use event::{AttributeModifierEvent, ModifierEventBuilder};
pub use multimap::{DuplicatePolicy, Iter, ModifierStore, ModifiersView, Multimap, StorageId};
pub use types::{AttributeId, AttributeModifier, EquipmentSlot, ModifierOperation, SlotGroup};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
