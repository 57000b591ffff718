use attrmod_core::{AttributeModifierEvent, EquipmentSlot, Multimap};
use proptest::prelude::*;

type Event<'a> = AttributeModifierEvent<'a, (), u8, u8>;

#[derive(Debug, Clone)]
enum Op {
    Add(u8, u8),
    Remove(u8, u8),
    RemoveAttribute(u8),
    Clear,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0..6u8, 0..6u8).prop_map(|(k, v)| Op::Add(k, v)),
        3 => (0..6u8, 0..6u8).prop_map(|(k, v)| Op::Remove(k, v)),
        2 => (0..6u8).prop_map(Op::RemoveAttribute),
        1 => Just(Op::Clear),
    ]
}

fn base_strategy() -> impl Strategy<Value = Vec<(u8, u8)>> {
    proptest::collection::vec((0..6u8, 0..6u8), 0..20)
}

fn apply(event: &mut Event<'_>, op: &Op) {
    match *op {
        Op::Add(k, v) => {
            event.add_modifier(k, v);
        }
        Op::Remove(k, v) => {
            event.remove_modifier(&k, &v);
        }
        Op::RemoveAttribute(k) => {
            event.remove_attribute(&k);
        }
        Op::Clear => event.clear_modifiers(),
    }
}

fn sorted(mut pairs: Vec<(u8, u8)>) -> Vec<(u8, u8)> {
    pairs.sort_unstable();
    pairs
}

fn sorted_pairs(event: &Event<'_>) -> Vec<(u8, u8)> {
    sorted(event.modifiers().iter().map(|(k, v)| (*k, *v)).collect())
}

proptest! {
    #[test]
    fn prop_unmodified_views_match(base in base_strategy()) {
        let base: Multimap<u8, u8> = base.into_iter().collect();
        let event: Event<'_> = AttributeModifierEvent::new(&(), EquipmentSlot::MainHand, base.clone());

        prop_assert!(!event.is_modified());
        prop_assert_eq!(event.modifiers(), event.original_modifiers());
        prop_assert_eq!(event.modifiers(), base);
    }

    #[test]
    fn prop_original_never_changes(
        base in base_strategy(),
        ops in proptest::collection::vec(op_strategy(), 0..40)
    ) {
        let base: Multimap<u8, u8> = base.into_iter().collect();
        let mut event: Event<'_> = AttributeModifierEvent::new(&(), EquipmentSlot::MainHand, base.clone());

        for op in &ops {
            apply(&mut event, op);
            prop_assert_eq!(event.original_modifiers(), base.clone());
        }
    }

    #[test]
    fn prop_current_tracks_association_list(
        base in base_strategy(),
        ops in proptest::collection::vec(op_strategy(), 0..40)
    ) {
        let mut model = base.clone();
        let base: Multimap<u8, u8> = base.into_iter().collect();
        let mut event: Event<'_> = AttributeModifierEvent::new(&(), EquipmentSlot::MainHand, base);

        for op in &ops {
            apply(&mut event, op);
            match *op {
                Op::Add(k, v) => model.push((k, v)),
                Op::Remove(k, v) => {
                    if let Some(pos) = model.iter().position(|pair| *pair == (k, v)) {
                        model.remove(pos);
                    }
                }
                Op::RemoveAttribute(k) => model.retain(|(key, _)| *key != k),
                Op::Clear => model.clear(),
            }
            prop_assert_eq!(sorted_pairs(&event), sorted(model.clone()));
        }
    }

    #[test]
    fn prop_single_copy_per_event(
        base in base_strategy(),
        ops in proptest::collection::vec(op_strategy(), 1..40)
    ) {
        let base: Multimap<u8, u8> = base.into_iter().collect();
        let mut event: Event<'_> = AttributeModifierEvent::new(&(), EquipmentSlot::MainHand, base);
        let original_id = event.original_modifiers().storage_id();

        apply(&mut event, &ops[0]);
        let owned_id = event.modifiers().storage_id();
        prop_assert!(event.is_modified());
        prop_assert_ne!(owned_id, original_id);

        for op in &ops[1..] {
            apply(&mut event, op);
            prop_assert_eq!(event.modifiers().storage_id(), owned_id);
        }
    }
}
