//! Multi-valued mapping and its read-only view
//!
//! Provides [`Multimap`] (owned, mutable), [`ModifiersView`] (borrowed,
//! read-only) and the [`ModifierStore`] trait that gives both a single
//! mutation surface. The view implements the trait by refusing every call.

use crate::error::{ModifierError, Result};
use std::collections::hash_map::{self, HashMap};
use std::fmt::{self, Debug};
use std::hash::Hash;

/// How an exact duplicate `(key, value)` insert is handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DuplicatePolicy {
    /// Duplicates are stored as separate associations
    #[default]
    Bag,

    /// Duplicates are rejected and the insert reports no change
    Set,
}

/// Unordered mapping from a key to several values
///
/// Keys need `Eq + Hash`; values only need `PartialEq`. Iteration order is
/// unspecified. A key with no remaining values is dropped from the key set.
///
/// # Invariants
/// - `len` equals the total number of stored associations
/// - No key maps to an empty value list
#[derive(Clone)]
pub struct Multimap<K, V> {
    entries: HashMap<K, Vec<V>>,
    len: usize,
    policy: DuplicatePolicy,
}

impl<K, V> Default for Multimap<K, V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            len: 0,
            policy: DuplicatePolicy::default(),
        }
    }
}

impl<K, V> Multimap<K, V> {
    /// Create new empty multimap with bag semantics
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create new empty multimap with the given duplicate policy
    #[inline]
    #[must_use]
    pub fn with_policy(policy: DuplicatePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Duplicate policy
    #[inline]
    #[must_use]
    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Total number of associations
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Number of distinct keys
    #[inline]
    #[must_use]
    pub fn key_count(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no associations
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterate over every association
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            outer: self.entries.iter(),
            current: None,
        }
    }

    /// Iterate over distinct keys
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.keys()
    }

    /// Remove every association
    pub fn clear(&mut self) {
        self.entries.clear();
        self.len = 0;
    }
}

impl<K: Eq + Hash, V: PartialEq> Multimap<K, V> {
    /// Values associated with `key`, empty when there are none
    #[must_use]
    pub fn get(&self, key: &K) -> &[V] {
        self.entries.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Check if `key` has at least one value
    #[inline]
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Check if the exact association is present
    #[must_use]
    pub fn contains_entry(&self, key: &K, value: &V) -> bool {
        self.get(key).contains(value)
    }

    /// Insert an association
    ///
    /// Returns `false` only when the set policy rejects an exact duplicate.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        let values = self.entries.entry(key).or_default();
        if self.policy == DuplicatePolicy::Set && values.contains(&value) {
            return false;
        }
        values.push(value);
        self.len += 1;
        true
    }

    /// Remove one association matching both key and value
    ///
    /// Returns `true` if something was removed.
    pub fn remove(&mut self, key: &K, value: &V) -> bool {
        let Some(values) = self.entries.get_mut(key) else {
            return false;
        };
        let Some(pos) = values.iter().position(|v| v == value) else {
            return false;
        };
        values.remove(pos);
        self.len -= 1;
        if values.is_empty() {
            self.entries.remove(key);
        }
        true
    }

    /// Remove every value for `key` and return them
    pub fn remove_all(&mut self, key: &K) -> Vec<V> {
        let removed = self.entries.remove(key).unwrap_or_default();
        self.len -= removed.len();
        removed
    }

    /// Read-only view over this multimap
    #[inline]
    #[must_use]
    pub fn view(&self) -> ModifiersView<'_, K, V> {
        ModifiersView::new(self)
    }
}

impl<K: Eq + Hash + Clone, V: PartialEq + Clone> Multimap<K, V> {
    /// Independent copy of every association under a new policy
    ///
    /// A `Set` copy keeps one of each exact duplicate already present in
    /// `self`; a `Bag` copy keeps them all.
    pub(crate) fn copy_with_policy(&self, policy: DuplicatePolicy) -> Self {
        match policy {
            DuplicatePolicy::Bag => Self {
                entries: self.entries.clone(),
                len: self.len,
                policy,
            },
            DuplicatePolicy::Set => {
                let mut copy = Self::with_policy(policy);
                for (key, value) in self {
                    copy.insert(key.clone(), value.clone());
                }
                copy
            }
        }
    }
}

impl<K: Debug, V: Debug> Debug for Multimap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter()).finish()
    }
}

impl<K: Eq + Hash, V: PartialEq> PartialEq for Multimap<K, V> {
    /// Content equality, ignoring order and duplicate policy
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len
            && self.entries.len() == other.entries.len()
            && self.entries.iter().all(|(key, values)| {
                other
                    .entries
                    .get(key)
                    .is_some_and(|others| same_values(values, others))
            })
    }
}

/// Multiset equality over unordered value lists
fn same_values<V: PartialEq>(left: &[V], right: &[V]) -> bool {
    if left.len() != right.len() {
        return false;
    }
    let mut matched = vec![false; right.len()];
    left.iter().all(|value| {
        let hit = right
            .iter()
            .enumerate()
            .position(|(i, other)| !matched[i] && other == value);
        match hit {
            Some(i) => {
                matched[i] = true;
                true
            }
            None => false,
        }
    })
}

impl<K: Eq + Hash, V: PartialEq> FromIterator<(K, V)> for Multimap<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K: Eq + Hash, V: PartialEq> Extend<(K, V)> for Multimap<K, V> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<'a, K, V> IntoIterator for &'a Multimap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over `(key, value)` associations of a [`Multimap`]
pub struct Iter<'a, K, V> {
    outer: hash_map::Iter<'a, K, Vec<V>>,
    current: Option<(&'a K, std::slice::Iter<'a, V>)>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((key, values)) = &mut self.current {
                if let Some(value) = values.next() {
                    return Some((*key, value));
                }
            }
            let (key, values) = self.outer.next()?;
            self.current = Some((key, values.iter()));
        }
    }
}

/// Opaque identity of the storage behind a view
///
/// Two views with the same `StorageId` read the same container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StorageId(usize);

/// Read-only projection over a [`Multimap`]
///
/// Handed to observers by the event. It only exposes reads; nothing on it
/// yields `&mut Multimap`. The [`ModifierStore`] mutation methods are
/// implemented and always fail with [`ModifierError::UnsupportedOperation`].
///
/// ```compile_fail
/// use attrmod_core::{AttributeModifierEvent, EquipmentSlot, Multimap};
///
/// let base: Multimap<&str, i32> = Multimap::new();
/// let event = AttributeModifierEvent::new(&(), EquipmentSlot::MainHand, base);
/// event.modifiers().insert("armor", 1);
/// ```
pub struct ModifiersView<'a, K, V> {
    inner: &'a Multimap<K, V>,
}

impl<K, V> Clone for ModifiersView<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for ModifiersView<'_, K, V> {}

impl<'a, K, V> ModifiersView<'a, K, V> {
    #[inline]
    pub(crate) fn new(inner: &'a Multimap<K, V>) -> Self {
        Self { inner }
    }

    /// Total number of associations
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Number of distinct keys
    #[inline]
    #[must_use]
    pub fn key_count(&self) -> usize {
        self.inner.key_count()
    }

    /// Check if there are no associations
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Duplicate policy of the backing storage
    #[inline]
    #[must_use]
    pub fn policy(&self) -> DuplicatePolicy {
        self.inner.policy()
    }

    /// Iterate over every association
    pub fn iter(&self) -> Iter<'a, K, V> {
        self.inner.iter()
    }

    /// Iterate over distinct keys
    pub fn keys(&self) -> impl Iterator<Item = &'a K> {
        self.inner.keys()
    }

    /// Identity of the backing storage
    #[inline]
    #[must_use]
    pub fn storage_id(&self) -> StorageId {
        StorageId(self.inner as *const Multimap<K, V> as usize)
    }
}

impl<'a, K: Eq + Hash, V: PartialEq> ModifiersView<'a, K, V> {
    /// Values associated with `key`, empty when there are none
    #[must_use]
    pub fn get(&self, key: &K) -> &'a [V] {
        self.inner.get(key)
    }

    /// Check if `key` has at least one value
    #[inline]
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.inner.contains_key(key)
    }

    /// Check if the exact association is present
    #[inline]
    #[must_use]
    pub fn contains_entry(&self, key: &K, value: &V) -> bool {
        self.inner.contains_entry(key, value)
    }
}

impl<K: Clone, V: Clone> ModifiersView<'_, K, V> {
    /// Owned snapshot of the viewed associations
    #[must_use]
    pub fn to_multimap(&self) -> Multimap<K, V> {
        self.inner.clone()
    }
}

impl<K: Debug, V: Debug> Debug for ModifiersView<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner.fmt(f)
    }
}

impl<K: Eq + Hash, V: PartialEq> PartialEq for ModifiersView<'_, K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<K: Eq + Hash, V: PartialEq> PartialEq<Multimap<K, V>> for ModifiersView<'_, K, V> {
    fn eq(&self, other: &Multimap<K, V>) -> bool {
        self.inner == other
    }
}

impl<'a, K, V> IntoIterator for ModifiersView<'a, K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

/// Mutation surface shared by owned storage and read-only views
///
/// Lets code that holds "some modifier collection" attempt an edit and learn
/// whether the collection accepts edits at all.
pub trait ModifierStore<K, V> {
    /// Insert an association
    ///
    /// # Errors
    /// Returns [`ModifierError::UnsupportedOperation`] on read-only storage
    fn try_insert(&mut self, key: K, value: V) -> Result<bool>;

    /// Remove one matching association
    ///
    /// # Errors
    /// Returns [`ModifierError::UnsupportedOperation`] on read-only storage
    fn try_remove(&mut self, key: &K, value: &V) -> Result<bool>;

    /// Remove every value for a key
    ///
    /// # Errors
    /// Returns [`ModifierError::UnsupportedOperation`] on read-only storage
    fn try_remove_all(&mut self, key: &K) -> Result<Vec<V>>;

    /// Remove every association
    ///
    /// # Errors
    /// Returns [`ModifierError::UnsupportedOperation`] on read-only storage
    fn try_clear(&mut self) -> Result<()>;
}

impl<K: Eq + Hash, V: PartialEq> ModifierStore<K, V> for Multimap<K, V> {
    fn try_insert(&mut self, key: K, value: V) -> Result<bool> {
        Ok(self.insert(key, value))
    }

    fn try_remove(&mut self, key: &K, value: &V) -> Result<bool> {
        Ok(self.remove(key, value))
    }

    fn try_remove_all(&mut self, key: &K) -> Result<Vec<V>> {
        Ok(self.remove_all(key))
    }

    fn try_clear(&mut self) -> Result<()> {
        self.clear();
        Ok(())
    }
}

impl<K, V> ModifierStore<K, V> for ModifiersView<'_, K, V> {
    fn try_insert(&mut self, _key: K, _value: V) -> Result<bool> {
        Err(ModifierError::unsupported("insert"))
    }

    fn try_remove(&mut self, _key: &K, _value: &V) -> Result<bool> {
        Err(ModifierError::unsupported("remove"))
    }

    fn try_remove_all(&mut self, _key: &K) -> Result<Vec<V>> {
        Err(ModifierError::unsupported("remove_all"))
    }

    fn try_clear(&mut self) -> Result<()> {
        Err(ModifierError::unsupported("clear"))
    }
}
