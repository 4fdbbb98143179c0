//! Side-by-side timing of insert, lookup and removal for every [`Layout`].

use crate::key::Parrot;
use crate::policy::OrderingPolicy;
use crate::store::{Layout, ParrotStore};
use crate::value::Value;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::info;

const LOOKUP_STRIDE: usize = 100;

#[derive(Debug, Clone)]
pub struct LayoutTiming {
    pub layout: Layout,
    pub insert: Duration,
    pub search: Duration,
    pub remove: Duration,
    pub hits: usize,
    pub probes: usize,
}

impl fmt::Display for LayoutTiming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<24} insert={:>8} µs  search={:>6} µs ({}/{} found)  remove={:>8} µs",
            self.layout.to_string(),
            self.insert.as_micros(),
            self.search.as_micros(),
            self.hits,
            self.probes,
            self.remove.as_micros()
        )
    }
}

/// `size` distinct keys in shuffled order, with their owners.
pub fn generate_entries(size: usize, seed: u64) -> Vec<(Parrot, Value)> {
    let mut entries: Vec<(Parrot, Value)> = (0..size)
        .map(|i| {
            (
                Parrot::new(format!("nick-{i}"), format!("species-{}", i % 100)),
                Value::new(format!("owner-{i}")),
            )
        })
        .collect();
    let mut rng = StdRng::seed_from_u64(seed);
    entries.shuffle(&mut rng);
    entries
}

pub fn time_layout(layout: Layout, policy: OrderingPolicy, entries: &[(Parrot, Value)]) -> LayoutTiming {
    let mut store = ParrotStore::new(layout, policy);

    let start = Instant::now();
    for (key, value) in entries {
        store.put(key.clone(), value.clone());
    }
    let insert = start.elapsed();

    let start = Instant::now();
    let mut hits = 0;
    let mut probes = 0;
    for (key, _) in entries.iter().step_by(LOOKUP_STRIDE) {
        probes += 1;
        if store.contains_key(key) {
            hits += 1;
        }
    }
    let search = start.elapsed();

    let start = Instant::now();
    for (key, _) in entries {
        store.remove_by_key(key);
    }
    let remove = start.elapsed();

    let timing = LayoutTiming {
        layout,
        insert,
        search,
        remove,
        hits,
        probes,
    };
    info!(layout = %layout, size = entries.len(), "{}", timing);
    timing
}

pub fn compare_layouts(size: usize, policy: OrderingPolicy) -> Vec<LayoutTiming> {
    let entries = generate_entries(size, 0x5EED);
    Layout::ALL
        .iter()
        .map(|&layout| time_layout(layout, policy, &entries))
        .collect()
}
