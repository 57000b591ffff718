//! Testing utilities for attrmod workspace
//!
//! Shared fixtures and tracing setup.

#![allow(missing_docs)]

use attrmod_core::{
    AttributeId, AttributeModifier, AttributeModifierEvent, EquipmentSlot, ModifierOperation,
    Multimap,
};
use std::cell::RefCell;
use std::rc::Rc;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

pub type TestModifiers = Multimap<AttributeId, AttributeModifier>;

pub type TestEvent<'a> = AttributeModifierEvent<'a, TestItem, AttributeId, AttributeModifier>;

pub const ATTACK_DAMAGE: &str = "generic.attack_damage";
pub const ATTACK_SPEED: &str = "generic.attack_speed";
pub const ARMOR: &str = "generic.armor";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestItem {
    pub name: String,
}

pub fn item(name: &str) -> TestItem {
    TestItem {
        name: name.to_string(),
    }
}

/// Install a test-writer subscriber, honouring `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn attr(id: &str) -> AttributeId {
    AttributeId::new(id)
}

/// Modifier with an id derived from `seed`, so equal seeds give equal modifiers
pub fn modifier(seed: u16, name: &str, amount: f64) -> AttributeModifier {
    AttributeModifier::with_id(
        Uuid::from_u128(u128::from(seed)),
        name,
        amount,
        ModifierOperation::AddValue,
    )
}

pub fn modifiers(entries: &[(&str, AttributeModifier)]) -> TestModifiers {
    entries
        .iter()
        .map(|(id, modifier)| (attr(id), modifier.clone()))
        .collect()
}

pub fn sword_modifiers() -> TestModifiers {
    modifiers(&[
        (ATTACK_DAMAGE, modifier(1, "base damage", 6.0)),
        (ATTACK_SPEED, modifier(2, "base speed", -2.4)),
    ])
}

pub fn create_test_event<'a>(item: &'a TestItem, base: TestModifiers) -> TestEvent<'a> {
    AttributeModifierEvent::new(item, EquipmentSlot::MainHand, base)
}

/// Shared call log for observing listener order
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Rc<RefCell<Vec<String>>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, call: impl Into<String>) {
        self.calls.borrow_mut().push(call.into());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}
