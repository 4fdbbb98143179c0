//! The scripted walk through every store operation, as printed by the binary.

use crate::config::Scenario;
use crate::store::{Layout, ParrotStore, View};
use crate::timing::PerformanceTracker;
use std::io::{self, Write};

pub fn build_store(scenario: &Scenario, layout: Layout) -> ParrotStore {
    ParrotStore::from_entries(layout, scenario.policy, scenario.seed())
}

pub fn print_view(store: &ParrotStore, view: View, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Entries ({:?} view):", view)?;
    for (key, value) in store.entries(view) {
        writeln!(out, "  {} -> {}", key, value)?;
    }
    Ok(())
}

pub fn find_by_key(
    store: &ParrotStore,
    scenario: &Scenario,
    tracker: &PerformanceTracker,
    out: &mut impl Write,
) -> io::Result<()> {
    let key = &scenario.key_to_find;
    match tracker.measure("find by key", || store.get(key)) {
        Some(owner) => writeln!(out, "Key '{}' found, owner: {}", key, owner),
        None => writeln!(out, "Key '{}' is not in the store", key),
    }
}

pub fn find_by_value(
    store: &ParrotStore,
    scenario: &Scenario,
    tracker: &PerformanceTracker,
    out: &mut impl Write,
) -> io::Result<()> {
    let value = &scenario.value_to_find;
    match tracker.measure("binary search by value", || store.find_by_value(value)) {
        Some((key, _)) => writeln!(out, "Owner '{}' found: {}", value, key),
        None => writeln!(out, "Owner '{}' is not in the store", value),
    }
}

/// Runs the full sequence against `store`, leaving it mutated.
pub fn run_store_operations(
    store: &mut ParrotStore,
    scenario: &Scenario,
    tracker: &PerformanceTracker,
    out: &mut impl Write,
) -> io::Result<()> {
    writeln!(out, "========= {} =========", store.layout())?;
    writeln!(out, "Initial size: {}", store.len())?;

    find_by_key(store, scenario, tracker, out)?;
    find_by_value(store, scenario, tracker, out)?;

    if store.layout().has_hash_index() {
        tracker.measure("print hash view", || print_view(store, View::Hashed, out))?;
        tracker.measure("sort by key", || store.sort_by_key_in_place());
    }
    tracker.measure("print ordered view", || print_view(store, View::Ordered, out))?;

    find_by_key(store, scenario, tracker, out)?;
    find_by_value(store, scenario, tracker, out)?;

    writeln!(out, "Entries by owner:")?;
    for (key, value) in tracker.measure("sort by value", || store.sorted_by_value()) {
        writeln!(out, "  {} -> {}", value, key)?;
    }

    let (key, value) = (scenario.key_to_add.clone(), scenario.value_to_add.clone());
    tracker.measure("add entry", || store.put(key, value));
    writeln!(out, "Added: {} -> {}", scenario.key_to_add, scenario.value_to_add)?;

    let removed = tracker.measure("remove by key", || store.remove_by_key(&scenario.key_to_find));
    match removed {
        Some(owner) => writeln!(out, "Removed key '{}', owner was {}", scenario.key_to_find, owner)?,
        None => writeln!(out, "Key '{}' not found for removal", scenario.key_to_find)?,
    }

    let count = tracker.measure("remove by value", || store.remove_all_by_value(&scenario.value_to_find));
    writeln!(out, "Removed {} entries owned by '{}'", count, scenario.value_to_find)?;

    writeln!(out, "Final size: {}", store.len())?;
    Ok(())
}
