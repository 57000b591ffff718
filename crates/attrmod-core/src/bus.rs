//! Synchronous listener bus for attribute modifier events
//!
//! Provides [`ModifierBus`] for running one notification pass: build an event,
//! hand it to every listener in priority order, return the final modifiers.

use crate::config::EventConfig;
use crate::event::AttributeModifierEvent;
use crate::multimap::Multimap;
use crate::types::EquipmentSlot;
use std::fmt;
use std::sync::Arc;

/// Listener invoked once per notification pass
///
/// Closures of the form `Fn(&mut AttributeModifierEvent<'_, I, K, V>)`
/// implement this automatically.
pub trait ModifierListener<I, K, V> {
    /// Inspect and optionally edit the event
    fn on_modifiers(&self, event: &mut AttributeModifierEvent<'_, I, K, V>);
}

impl<I, K, V, F> ModifierListener<I, K, V> for F
where
    F: Fn(&mut AttributeModifierEvent<'_, I, K, V>),
{
    fn on_modifiers(&self, event: &mut AttributeModifierEvent<'_, I, K, V>) {
        self(event);
    }
}

/// Listener ordering within a pass
///
/// Declared from first to run to last to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum EventPriority {
    /// Runs first
    Highest,
    /// Runs before normal listeners
    High,
    /// Default priority
    #[default]
    Normal,
    /// Runs after normal listeners
    Low,
    /// Runs last
    Lowest,
}

struct Registered<I, K, V> {
    priority: EventPriority,
    listener: Box<dyn ModifierListener<I, K, V>>,
}

/// Ordered set of listeners for attribute modifier events
///
/// Listeners run by priority, then by registration order. Each runs to
/// completion before the next starts; later listeners see earlier edits.
pub struct ModifierBus<I, K, V> {
    listeners: Vec<Registered<I, K, V>>,
    config: EventConfig,
}

impl<I, K, V> Default for ModifierBus<I, K, V> {
    fn default() -> Self {
        Self::with_config(EventConfig::default())
    }
}

impl<I, K, V> ModifierBus<I, K, V> {
    /// Create new empty bus
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create new empty bus whose events use `config`
    #[inline]
    #[must_use]
    pub fn with_config(config: EventConfig) -> Self {
        Self {
            listeners: Vec::new(),
            config,
        }
    }

    /// Configuration handed to every event
    #[inline]
    #[must_use]
    pub fn config(&self) -> &EventConfig {
        &self.config
    }

    /// Register a closure at normal priority
    pub fn register<F>(&mut self, listener: F)
    where
        F: Fn(&mut AttributeModifierEvent<'_, I, K, V>) + 'static,
    {
        self.register_with_priority(EventPriority::Normal, listener);
    }

    /// Register a closure at the given priority
    pub fn register_with_priority<F>(&mut self, priority: EventPriority, listener: F)
    where
        F: Fn(&mut AttributeModifierEvent<'_, I, K, V>) + 'static,
    {
        self.register_listener(priority, listener);
    }

    /// Register any [`ModifierListener`] implementation
    pub fn register_listener<L>(&mut self, priority: EventPriority, listener: L)
    where
        L: ModifierListener<I, K, V> + 'static,
    {
        let pos = self
            .listeners
            .partition_point(|registered| registered.priority <= priority);
        self.listeners.insert(
            pos,
            Registered {
                priority,
                listener: Box::new(listener),
            },
        );
    }

    /// Number of registered listeners
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Check if no listener is registered
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Run every listener against an existing event
    pub fn dispatch(&self, event: &mut AttributeModifierEvent<'_, I, K, V>) {
        tracing::debug!(
            slot = %event.slot(),
            listeners = self.listeners.len(),
            "dispatching attribute modifier event"
        );
        for (index, registered) in self.listeners.iter().enumerate() {
            tracing::trace!(index, priority = ?registered.priority, "invoking listener");
            registered.listener.on_modifiers(event);
        }
        tracing::debug!(modified = event.is_modified(), "dispatch complete");
    }

    /// Run one notification pass and return the final modifiers
    ///
    /// When no listener mutates anything, the returned `Arc` is the one that
    /// was passed in.
    pub fn post(
        &self,
        item: &I,
        slot: EquipmentSlot,
        modifiers: impl Into<Arc<Multimap<K, V>>>,
    ) -> Arc<Multimap<K, V>> {
        let mut event = AttributeModifierEvent::with_config(item, slot, modifiers, self.config);
        self.dispatch(&mut event);
        event.into_modifiers()
    }
}

impl<I, K, V> fmt::Debug for ModifierBus<I, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let priorities: Vec<EventPriority> = self.listeners.iter().map(|r| r.priority).collect();
        f.debug_struct("ModifierBus")
            .field("listeners", &priorities)
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Bus = ModifierBus<&'static str, &'static str, i32>;

    const ITEM: &str = "iron_sword";

    fn base() -> Multimap<&'static str, i32> {
        [("damage", 6)].into_iter().collect()
    }

    #[test]
    fn empty_bus_returns_input() {
        let bus = Bus::new();
        assert!(bus.is_empty());
        let input = Arc::new(base());
        let output = bus.post(&ITEM, EquipmentSlot::MainHand, Arc::clone(&input));
        assert!(Arc::ptr_eq(&input, &output));
    }

    #[test]
    fn read_only_listeners_do_not_copy() {
        let mut bus = Bus::new();
        bus.register(|event| {
            assert_eq!(event.modifiers().len(), 1);
        });
        let input = Arc::new(base());
        let output = bus.post(&ITEM, EquipmentSlot::MainHand, Arc::clone(&input));
        assert!(Arc::ptr_eq(&input, &output));
    }

    #[test]
    fn listeners_run_by_priority_then_registration() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut bus = Bus::new();

        for (name, priority) in [
            ("normal-1", EventPriority::Normal),
            ("lowest", EventPriority::Lowest),
            ("highest", EventPriority::Highest),
            ("normal-2", EventPriority::Normal),
        ] {
            let order = Rc::clone(&order);
            bus.register_with_priority(priority, move |_event| order.borrow_mut().push(name));
        }

        bus.post(&ITEM, EquipmentSlot::MainHand, base());
        assert_eq!(
            *order.borrow(),
            vec!["highest", "normal-1", "normal-2", "lowest"]
        );
    }

    #[test]
    fn later_listeners_see_earlier_edits() {
        let mut bus = Bus::new();
        bus.register_with_priority(EventPriority::High, |event| {
            event.add_modifier("damage", 2);
        });
        bus.register(|event| {
            assert_eq!(event.modifiers().get(&"damage").len(), 2);
            assert_eq!(event.original_modifiers().get(&"damage"), &[6]);
            event.remove_modifier(&"damage", &6);
        });

        let output = bus.post(&ITEM, EquipmentSlot::MainHand, base());
        assert_eq!(output.get(&"damage"), &[2]);
    }

    struct Doubler;

    impl ModifierListener<&'static str, &'static str, i32> for Doubler {
        fn on_modifiers(
            &self,
            event: &mut AttributeModifierEvent<'_, &'static str, &'static str, i32>,
        ) {
            let doubled: Vec<i32> = event
                .original_modifiers()
                .get(&"damage")
                .iter()
                .map(|v| v * 2)
                .collect();
            event.remove_attribute(&"damage");
            for value in doubled {
                event.add_modifier("damage", value);
            }
        }
    }

    #[test]
    fn trait_listener() {
        let mut bus = Bus::new();
        bus.register_listener(EventPriority::Normal, Doubler);
        assert_eq!(bus.len(), 1);
        let output = bus.post(&ITEM, EquipmentSlot::MainHand, base());
        assert_eq!(output.get(&"damage"), &[12]);
    }
}
