//! The parrot registry: one arena of entries indexed two ways.
//!
//! Every entry lives in a single slot of the arena. A [`Layout`] decides which
//! indices point into it:
//!
//! * `HashWithInsertionOrder`: a hash index plus an insertion-ordered index.
//! * `HashWithKeyOrder`: a hash index plus an index sorted by the store's
//!   [`OrderingPolicy`].
//! * `Tree`: a single policy-sorted tree serving both lookup and order.
//!
//! Both indices are updated inside the same `&mut self` call, so after any
//! public method returns they reference exactly the same set of slots.

use crate::error::{AviaryError, Result};
use crate::key::Parrot;
use crate::policy::{OrderingPolicy, SortKey, SortKeyRef};
use crate::search::{self, ValueProjection};
use crate::value::{Entry, Value};
use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

type SlotId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    HashWithInsertionOrder,
    HashWithKeyOrder,
    Tree,
}

impl Layout {
    pub const ALL: [Layout; 3] = [
        Layout::HashWithInsertionOrder,
        Layout::HashWithKeyOrder,
        Layout::Tree,
    ];

    pub fn has_hash_index(&self) -> bool {
        !matches!(self, Layout::Tree)
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Layout::HashWithInsertionOrder => "hash + insertion order",
            Layout::HashWithKeyOrder => "hash + key order",
            Layout::Tree => "ordered tree",
        };
        f.write_str(name)
    }
}

/// Which index an iteration walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// The hash index; order is unspecified. Falls back to key order for
    /// [`Layout::Tree`], which has no hash index.
    Hashed,
    /// Insertion order or key order, depending on the layout.
    Ordered,
}

#[derive(Debug, Clone)]
struct Slot {
    key: Parrot,
    value: Value,
    seq: u64,
}

#[derive(Debug, Clone)]
enum OrderIndex {
    Insertion(BTreeMap<u64, SlotId>),
    Keyed(BTreeMap<SortKey, SlotId>),
}

impl OrderIndex {
    fn len(&self) -> usize {
        match self {
            OrderIndex::Insertion(by_seq) => by_seq.len(),
            OrderIndex::Keyed(by_key) => by_key.len(),
        }
    }

    fn slot_ids(&self) -> Vec<SlotId> {
        match self {
            OrderIndex::Insertion(by_seq) => by_seq.values().copied().collect(),
            OrderIndex::Keyed(by_key) => by_key.values().copied().collect(),
        }
    }
}

#[derive(Debug, Clone)]
enum Index {
    Hashed {
        hash: FxHashMap<Parrot, SlotId>,
        order: OrderIndex,
    },
    Tree(BTreeMap<SortKey, SlotId>),
}

#[derive(Debug, Clone)]
pub struct ParrotStore {
    layout: Layout,
    policy: OrderingPolicy,
    slots: Vec<Option<Slot>>,
    free: Vec<SlotId>,
    next_seq: u64,
    index: Index,
}

impl ParrotStore {
    pub fn new(layout: Layout, policy: OrderingPolicy) -> Self {
        let index = match layout {
            Layout::HashWithInsertionOrder => Index::Hashed {
                hash: FxHashMap::default(),
                order: OrderIndex::Insertion(BTreeMap::new()),
            },
            Layout::HashWithKeyOrder => Index::Hashed {
                hash: FxHashMap::default(),
                order: OrderIndex::Keyed(BTreeMap::new()),
            },
            Layout::Tree => Index::Tree(BTreeMap::new()),
        };
        ParrotStore {
            layout,
            policy,
            slots: Vec::new(),
            free: Vec::new(),
            next_seq: 0,
            index,
        }
    }

    /// Builds a store from initial pairs; later duplicates overwrite earlier ones.
    pub fn from_entries<I, V>(layout: Layout, policy: OrderingPolicy, entries: I) -> Self
    where
        I: IntoIterator<Item = (Parrot, V)>,
        V: Into<Value>,
    {
        let mut store = Self::new(layout, policy);
        for (key, value) in entries {
            store.put(key, value);
        }
        store
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn policy(&self) -> &OrderingPolicy {
        &self.policy
    }

    pub fn len(&self) -> usize {
        match &self.index {
            Index::Hashed { hash, .. } => hash.len(),
            Index::Tree(tree) => tree.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains_key(&self, key: &Parrot) -> bool {
        self.slot_of(key).is_some()
    }

    pub fn get(&self, key: &Parrot) -> Option<&Value> {
        self.slot_of(key).map(|id| &self.slot(id).value)
    }

    /// Inserts or overwrites. Returns the previous value for an existing key;
    /// an overwritten key keeps its place in the ordered view.
    pub fn put(&mut self, key: Parrot, value: impl Into<Value>) -> Option<Value> {
        let value = value.into();

        if let Some(id) = self.slot_of(&key) {
            debug!(key = %key, value = %value, "overwriting entry");
            let previous = std::mem::replace(&mut self.slot_mut(id).value, value);
            return Some(previous);
        }

        debug!(key = %key, value = %value, "inserting entry");
        let seq = self.next_seq;
        self.next_seq += 1;
        let id = self.allocate(Slot {
            key: key.clone(),
            value,
            seq,
        });

        let policy = self.policy;
        match &mut self.index {
            Index::Hashed { hash, order } => {
                hash.insert(key.clone(), id);
                match order {
                    OrderIndex::Insertion(by_seq) => {
                        by_seq.insert(seq, id);
                    }
                    OrderIndex::Keyed(by_key) => {
                        by_key.insert(SortKey::new(key, policy), id);
                    }
                }
            }
            Index::Tree(tree) => {
                tree.insert(SortKey::new(key, policy), id);
            }
        }

        self.debug_check();
        None
    }

    /// Removes `key` from both views. A missing key yields `None`.
    pub fn remove_by_key(&mut self, key: &Parrot) -> Option<Value> {
        let id = self.slot_of(key)?;
        let slot = self.slots[id].take()?;
        self.free.push(id);

        let policy = self.policy;
        match &mut self.index {
            Index::Hashed { hash, order } => {
                hash.remove(key);
                match order {
                    OrderIndex::Insertion(by_seq) => {
                        by_seq.remove(&slot.seq);
                    }
                    OrderIndex::Keyed(by_key) => {
                        by_key.remove(SortKeyRef::new(key, policy).as_lookup());
                    }
                }
            }
            Index::Tree(tree) => {
                tree.remove(SortKeyRef::new(key, policy).as_lookup());
            }
        }

        debug!(key = %key, value = %slot.value, "removed entry");
        self.debug_check();
        Some(slot.value)
    }

    /// Removes every entry whose value equals `value` (null included) and
    /// returns how many were removed.
    pub fn remove_all_by_value(&mut self, value: &Value) -> usize {
        // Collect first: the indices must not change while they are scanned.
        let doomed: Vec<Parrot> = self
            .live_slots()
            .filter(|slot| &slot.value == value)
            .map(|slot| slot.key.clone())
            .collect();

        let mut removed = 0;
        for key in &doomed {
            if self.remove_by_key(key).is_some() {
                removed += 1;
            }
        }
        debug!(value = %value, removed, "removed entries by value");
        removed
    }

    /// Finds an entry holding `value` by sorting a by-value copy of the entries
    /// and binary-searching it. O(n log n) on every call.
    pub fn find_by_value(&self, value: &Value) -> Option<(Parrot, Value)> {
        let (key, value) = search::find_by_value(self.snapshot(View::Ordered), value)?.into_parts();
        key.map(|key| (key, value))
    }

    /// Snapshot of all entries ordered by value (null first).
    pub fn sorted_by_value(&self) -> Vec<(Parrot, Value)> {
        ValueProjection::new(self.snapshot(View::Ordered))
            .into_entries()
            .into_iter()
            .filter_map(|entry| {
                let (key, value) = entry.into_parts();
                key.map(|key| (key, value))
            })
            .collect()
    }

    /// Rebuilds the hash index from a key-sorted snapshot.
    ///
    /// The keys are sorted by the store's policy, re-inserted into a fresh
    /// insertion-ordered map and the hash index is replaced from it. The hash
    /// index keeps no order of its own afterwards; the insertion-ordered view
    /// is re-sequenced so that it now walks in key order. Key-ordered layouts
    /// are already sorted and only get the rebuild.
    pub fn sort_by_key_in_place(&mut self) {
        let policy = self.policy;
        let ParrotStore {
            slots,
            next_seq,
            index,
            ..
        } = &mut *self;

        let Index::Hashed { hash, order } = index else {
            debug!("tree layout is already in key order");
            return;
        };

        let mut keys: Vec<Parrot> = hash.keys().cloned().collect();
        policy.sort(&mut keys);

        let sorted: IndexMap<Parrot, SlotId> = keys
            .into_iter()
            .filter_map(|key| hash.get(&key).copied().map(|id| (key, id)))
            .collect();

        if let OrderIndex::Insertion(by_seq) = order {
            by_seq.clear();
            for &id in sorted.values() {
                if let Some(slot) = slots[id].as_mut() {
                    slot.seq = *next_seq;
                    by_seq.insert(*next_seq, id);
                    *next_seq += 1;
                }
            }
        }

        *hash = sorted.into_iter().collect();
        debug!(entries = hash.len(), "rebuilt hash index in key order");
        self.debug_check();
    }

    /// Iterates a snapshot of the chosen view. Later mutations of the store do
    /// not affect an iterator already handed out.
    pub fn entries(&self, view: View) -> Entries {
        let ids = self.view_ids(view);
        let items: Vec<(Parrot, Value)> = ids
            .into_iter()
            .map(|id| {
                let slot = self.slot(id);
                (slot.key.clone(), slot.value.clone())
            })
            .collect();
        Entries {
            inner: items.into_iter(),
        }
    }

    pub fn keys(&self, view: View) -> Vec<Parrot> {
        self.entries(view).map(|(key, _)| key).collect()
    }

    /// Verifies that both views index exactly the live slots.
    pub fn check_invariants(&self) -> Result<()> {
        let live: FxHashSet<SlotId> = self
            .slots
            .iter()
            .enumerate()
            .filter_map(|(id, slot)| slot.as_ref().map(|_| id))
            .collect();

        if live.len() + self.free.len() != self.slots.len() {
            return Err(AviaryError::InvariantViolation(format!(
                "{} live slots and {} free slots in an arena of {}",
                live.len(),
                self.free.len(),
                self.slots.len()
            )));
        }

        match &self.index {
            Index::Hashed { hash, order } => {
                if hash.len() != live.len() || order.len() != live.len() {
                    return Err(AviaryError::InvariantViolation(format!(
                        "hash view has {} entries, ordered view {}, arena {}",
                        hash.len(),
                        order.len(),
                        live.len()
                    )));
                }
                for (key, &id) in hash {
                    self.check_slot_key(id, key, "hash view")?;
                }
                match order {
                    OrderIndex::Insertion(by_seq) => {
                        for (&seq, &id) in by_seq {
                            let slot = self.checked_slot(id, "ordered view")?;
                            if slot.seq != seq {
                                return Err(AviaryError::InvariantViolation(format!(
                                    "slot {} has sequence {} but is indexed at {}",
                                    id, slot.seq, seq
                                )));
                            }
                        }
                    }
                    OrderIndex::Keyed(by_key) => {
                        for (sort_key, &id) in by_key {
                            self.check_slot_key(id, sort_key.key(), "ordered view")?;
                        }
                    }
                }
                let ordered: FxHashSet<SlotId> = order.slot_ids().into_iter().collect();
                if ordered != live {
                    return Err(AviaryError::InvariantViolation(
                        "hash view and ordered view reference different entries".to_string(),
                    ));
                }
            }
            Index::Tree(tree) => {
                if tree.len() != live.len() {
                    return Err(AviaryError::InvariantViolation(format!(
                        "tree has {} entries, arena {}",
                        tree.len(),
                        live.len()
                    )));
                }
                for (sort_key, &id) in tree {
                    self.check_slot_key(id, sort_key.key(), "tree")?;
                }
            }
        }
        Ok(())
    }

    // Constant-time view agreement check for debug builds; the full walk is
    // `check_invariants`.
    fn debug_check(&self) {
        let live = self.slots.len() - self.free.len();
        let (primary, secondary) = match &self.index {
            Index::Hashed { hash, order } => (hash.len(), order.len()),
            Index::Tree(tree) => (tree.len(), tree.len()),
        };
        debug_assert!(
            primary == live && secondary == live,
            "views diverged: {primary} / {secondary} entries for {live} live slots"
        );
    }

    fn checked_slot(&self, id: SlotId, view: &str) -> Result<&Slot> {
        self.slots.get(id).and_then(Option::as_ref).ok_or_else(|| {
            AviaryError::InvariantViolation(format!("{view} references empty slot {id}"))
        })
    }

    fn check_slot_key(&self, id: SlotId, key: &Parrot, view: &str) -> Result<()> {
        let slot = self.checked_slot(id, view)?;
        if &slot.key != key {
            return Err(AviaryError::InvariantViolation(format!(
                "{view} maps {key} to slot {id} holding {}",
                slot.key
            )));
        }
        Ok(())
    }

    fn slot_of(&self, key: &Parrot) -> Option<SlotId> {
        match &self.index {
            Index::Hashed { hash, .. } => hash.get(key).copied(),
            Index::Tree(tree) => tree.get(SortKeyRef::new(key, self.policy).as_lookup()).copied(),
        }
    }

    // Indices only ever hold live slot ids.
    fn slot(&self, id: SlotId) -> &Slot {
        match &self.slots[id] {
            Some(slot) => slot,
            None => unreachable!("index references freed slot {id}"),
        }
    }

    fn slot_mut(&mut self, id: SlotId) -> &mut Slot {
        match &mut self.slots[id] {
            Some(slot) => slot,
            None => unreachable!("index references freed slot {id}"),
        }
    }

    fn allocate(&mut self, slot: Slot) -> SlotId {
        match self.free.pop() {
            Some(id) => {
                self.slots[id] = Some(slot);
                id
            }
            None => {
                self.slots.push(Some(slot));
                self.slots.len() - 1
            }
        }
    }

    fn live_slots(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter().filter_map(Option::as_ref)
    }

    fn view_ids(&self, view: View) -> Vec<SlotId> {
        match (&self.index, view) {
            (Index::Hashed { hash, .. }, View::Hashed) => hash.values().copied().collect(),
            (Index::Hashed { order, .. }, View::Ordered) => order.slot_ids(),
            (Index::Tree(tree), _) => tree.values().copied().collect(),
        }
    }

    fn snapshot(&self, view: View) -> Vec<Entry> {
        self.entries(view)
            .map(|(key, value)| Entry::new(key, value))
            .collect()
    }
}

/// Snapshot iterator returned by [`ParrotStore::entries`].
#[derive(Debug)]
pub struct Entries {
    inner: std::vec::IntoIter<(Parrot, Value)>,
}

impl Iterator for Entries {
    type Item = (Parrot, Value);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Entries {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::FieldOrder;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::HashMap;

    fn p(nickname: &str, species: Option<&str>) -> Parrot {
        Parrot::from_parts(Some(nickname.to_string()), species.map(String::from))
    }

    fn scenario_store(layout: Layout) -> ParrotStore {
        ParrotStore::from_entries(
            layout,
            OrderingPolicy::ascending(),
            vec![
                (p("B", None), "p"),
                (p("A", Some("y")), "q"),
                (p("A", Some("x")), "p"),
            ],
        )
    }

    fn as_set(entries: Entries) -> HashMap<Parrot, Value> {
        entries.collect()
    }

    #[test]
    fn test_put_then_get() {
        for layout in Layout::ALL {
            let mut store = ParrotStore::new(layout, OrderingPolicy::ascending());
            assert!(store.is_empty());
            assert_eq!(store.put(p("Kiwi", Some("Macaw")), "Ann"), None);
            assert_eq!(store.get(&p("Kiwi", Some("Macaw"))), Some(&Value::from("Ann")));
            assert!(store.contains_key(&p("Kiwi", Some("Macaw"))));
            assert_eq!(store.len(), 1);
        }
    }

    #[test]
    fn test_missing_key_is_absent() {
        for layout in Layout::ALL {
            let mut store = scenario_store(layout);
            let missing = p("Z", Some("none"));
            assert!(!store.contains_key(&missing));
            assert_eq!(store.get(&missing), None);
            assert_eq!(store.remove_by_key(&missing), None);
            assert_eq!(store.len(), 3);
        }
    }

    #[test]
    fn test_overwrite_returns_previous_and_keeps_position() {
        let mut store = scenario_store(Layout::HashWithInsertionOrder);
        let previous = store.put(p("B", None), "r");
        assert_eq!(previous, Some(Value::from("p")));
        assert_eq!(store.len(), 3);
        assert_eq!(store.keys(View::Ordered)[0], p("B", None));
        assert_eq!(store.get(&p("B", None)), Some(&Value::from("r")));
    }

    #[test]
    fn test_insertion_order_view() {
        let store = scenario_store(Layout::HashWithInsertionOrder);
        assert_eq!(
            store.keys(View::Ordered),
            vec![p("B", None), p("A", Some("y")), p("A", Some("x"))]
        );
    }

    #[test]
    fn test_key_order_view_is_maintained_on_put() {
        for layout in [Layout::HashWithKeyOrder, Layout::Tree] {
            let store = scenario_store(layout);
            assert_eq!(
                store.keys(View::Ordered),
                vec![p("A", Some("x")), p("A", Some("y")), p("B", None)]
            );
        }
    }

    #[test]
    fn test_concrete_scenario() {
        for layout in Layout::ALL {
            let mut store = scenario_store(layout);
            store.sort_by_key_in_place();
            assert_eq!(
                store.keys(View::Ordered),
                vec![p("A", Some("x")), p("A", Some("y")), p("B", None)]
            );

            let (key, value) = store.find_by_value(&Value::from("q")).unwrap();
            assert_eq!(key, p("A", Some("y")));
            assert_eq!(value, Value::from("q"));

            assert_eq!(store.remove_all_by_value(&Value::from("p")), 2);
            assert_eq!(store.len(), 1);
            assert!(!store.contains_key(&p("A", Some("x"))));
            assert!(!store.contains_key(&p("B", None)));
            assert!(store.contains_key(&p("A", Some("y"))));
        }
    }

    #[test]
    fn test_descending_policy_scenario() {
        let policy = OrderingPolicy::new(FieldOrder::descending(), FieldOrder::ascending().nulls_first());
        for layout in Layout::ALL {
            let mut store = ParrotStore::from_entries(
                layout,
                policy,
                vec![
                    (p("A", Some("x")), "1"),
                    (p("B", Some("y")), "2"),
                    (p("B", None), "3"),
                    (p("C", Some("z")), "4"),
                ],
            );
            store.sort_by_key_in_place();
            assert_eq!(
                store.keys(View::Ordered),
                vec![p("C", Some("z")), p("B", None), p("B", Some("y")), p("A", Some("x"))]
            );
        }
    }

    #[test]
    fn test_sort_rebuild_keeps_contents() {
        let mut store = scenario_store(Layout::HashWithInsertionOrder);
        let before = as_set(store.entries(View::Hashed));
        store.sort_by_key_in_place();
        let after = as_set(store.entries(View::Hashed));
        assert_eq!(before, after);
        assert!(store.policy().is_sorted(&store.keys(View::Ordered)));
        assert!(store.check_invariants().is_ok());

        // New entries go after the re-sequenced ones.
        store.put(p("0", None), "z");
        assert_eq!(store.keys(View::Ordered).last(), Some(&p("0", None)));
    }

    #[test]
    fn test_find_by_value_misses() {
        for layout in Layout::ALL {
            let store = scenario_store(layout);
            assert!(store.find_by_value(&Value::from("nobody")).is_none());
            assert!(store.find_by_value(&Value::null()).is_none());
        }
    }

    #[test]
    fn test_null_values_are_matched_exactly() {
        let mut store = ParrotStore::new(Layout::HashWithKeyOrder, OrderingPolicy::ascending());
        store.put(p("A", None), Value::null());
        store.put(p("B", None), "null");
        let (key, _) = store.find_by_value(&Value::null()).unwrap();
        assert_eq!(key, p("A", None));
        assert_eq!(store.remove_all_by_value(&Value::null()), 1);
        assert_eq!(store.get(&p("B", None)), Some(&Value::from("null")));
    }

    #[test]
    fn test_remove_all_by_value_leaves_others() {
        let mut store = scenario_store(Layout::Tree);
        assert_eq!(store.remove_all_by_value(&Value::from("absent")), 0);
        assert_eq!(store.len(), 3);
        assert_eq!(store.remove_all_by_value(&Value::from("q")), 1);
        assert_eq!(store.get(&p("A", Some("x"))), Some(&Value::from("p")));
        assert_eq!(store.get(&p("B", None)), Some(&Value::from("p")));
    }

    #[test]
    fn test_sorted_by_value() {
        let mut store = scenario_store(Layout::HashWithInsertionOrder);
        store.put(p("C", None), Value::null());
        let values: Vec<String> = store
            .sorted_by_value()
            .into_iter()
            .map(|(_, v)| v.to_string())
            .collect();
        assert_eq!(values, vec!["null", "p", "p", "q"]);
    }

    #[test]
    fn test_hash_collisions_are_tolerated() {
        // "Aa" and "BB" share a polynomial hash.
        let a = Parrot::with_nickname("Aa");
        let b = Parrot::with_nickname("BB");
        assert_eq!(a.hash_code(), b.hash_code());

        let mut store = ParrotStore::new(Layout::HashWithInsertionOrder, OrderingPolicy::ascending());
        store.put(a.clone(), "first");
        store.put(b.clone(), "second");
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(&a), Some(&Value::from("first")));
        assert_eq!(store.get(&b), Some(&Value::from("second")));
    }

    #[test]
    fn test_tree_lookup_and_removal_with_null_fields() {
        let policy = OrderingPolicy::new(FieldOrder::descending(), FieldOrder::ascending().nulls_first());
        for layout in [Layout::HashWithKeyOrder, Layout::Tree] {
            let mut store = ParrotStore::new(layout, policy);
            let nameless = Parrot::from_parts(None, Some("Kea".to_string()));
            let bare = Parrot::from_parts(None, None);
            store.put(nameless.clone(), "a");
            store.put(bare.clone(), "b");
            store.put(p("A", None), "c");

            assert!(store.contains_key(&nameless));
            assert_eq!(store.get(&bare), Some(&Value::from("b")));
            assert!(!store.contains_key(&Parrot::from_parts(None, Some("Lory".to_string()))));

            assert_eq!(store.remove_by_key(&nameless), Some(Value::from("a")));
            assert!(!store.contains_key(&nameless));
            assert_eq!(store.keys(View::Ordered), vec![p("A", None), bare.clone()]);
            assert!(store.check_invariants().is_ok());
        }
    }

    #[test]
    fn test_entries_is_a_snapshot() {
        let mut store = scenario_store(Layout::HashWithKeyOrder);
        let entries = store.entries(View::Ordered);
        store.remove_all_by_value(&Value::from("p"));
        assert_eq!(entries.len(), 3);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_slots_are_reused() {
        let mut store = scenario_store(Layout::HashWithInsertionOrder);
        store.remove_by_key(&p("B", None));
        store.put(p("D", None), "d");
        assert_eq!(store.slots.len(), 3);
        assert_eq!(store.keys(View::Ordered).last(), Some(&p("D", None)));
        assert!(store.check_invariants().is_ok());
    }

    #[test]
    fn test_views_agree_under_random_operations() {
        let mut rng = StdRng::seed_from_u64(42);
        let nicknames = ["A", "B", "C", "D", "E"];
        let species = [None, Some("x"), Some("y")];
        let owners = ["p", "q", "r"];

        for layout in Layout::ALL {
            let mut store = ParrotStore::new(
                layout,
                OrderingPolicy::new(FieldOrder::descending(), FieldOrder::ascending().nulls_first()),
            );
            let mut model: HashMap<Parrot, Value> = HashMap::new();

            for _ in 0..500 {
                let key = p(
                    nicknames[rng.gen_range(0..nicknames.len())],
                    species[rng.gen_range(0..species.len())],
                );
                let owner = Value::from(owners[rng.gen_range(0..owners.len())]);
                match rng.gen_range(0..10) {
                    0..=4 => {
                        assert_eq!(store.put(key.clone(), owner.clone()), model.insert(key, owner));
                    }
                    5..=7 => {
                        assert_eq!(store.remove_by_key(&key), model.remove(&key));
                    }
                    8 => {
                        let expected = model.values().filter(|v| **v == owner).count();
                        model.retain(|_, v| *v != owner);
                        assert_eq!(store.remove_all_by_value(&owner), expected);
                    }
                    _ => store.sort_by_key_in_place(),
                }

                assert!(store.check_invariants().is_ok());
                assert_eq!(store.len(), model.len());
                assert_eq!(as_set(store.entries(View::Hashed)), model);
                assert_eq!(as_set(store.entries(View::Ordered)), model);
                if layout != Layout::HashWithInsertionOrder {
                    assert!(store.policy().is_sorted(&store.keys(View::Ordered)));
                }
            }
        }
    }
}
