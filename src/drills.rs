//! Sort, search and min/max drills over one numeric sample held as an array,
//! a list and a set.

use crate::timing::PerformanceTracker;
use rustc_hash::FxHashSet;
use std::collections::VecDeque;
use std::io::{self, Write};

// f64 is not `Hash`; the set stores bit patterns with -0.0 folded into 0.0.
fn set_key(value: f64) -> u64 {
    if value == 0.0 {
        0.0f64.to_bits()
    } else {
        value.to_bits()
    }
}

fn min_max<'a>(values: impl IntoIterator<Item = &'a f64>) -> Option<(f64, f64)> {
    values.into_iter().fold(None, |acc, &v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

#[derive(Debug, Clone)]
pub struct NumericDrill {
    target: f64,
    array: Vec<f64>,
    list: VecDeque<f64>,
    set: FxHashSet<u64>,
}

impl NumericDrill {
    pub fn new(target: f64, values: &[f64]) -> Self {
        NumericDrill {
            target,
            array: values.to_vec(),
            list: values.iter().copied().collect(),
            set: values.iter().copied().map(set_key).collect(),
        }
    }

    pub fn array(&self) -> &[f64] {
        &self.array
    }

    pub fn sort_array(&mut self) {
        self.array.sort_by(f64::total_cmp);
    }

    pub fn sort_list(&mut self) {
        self.list.make_contiguous().sort_by(f64::total_cmp);
    }

    /// Binary search; the answer is only reliable once the array is sorted.
    pub fn find_in_array(&self) -> Option<usize> {
        self.array
            .binary_search_by(|v| v.total_cmp(&self.target))
            .ok()
    }

    pub fn find_in_list(&self) -> Option<usize> {
        self.list
            .binary_search_by(|v| v.total_cmp(&self.target))
            .ok()
    }

    pub fn contains_in_set(&self) -> bool {
        self.set.contains(&set_key(self.target))
    }

    pub fn min_max_array(&self) -> Option<(f64, f64)> {
        min_max(&self.array)
    }

    pub fn min_max_list(&self) -> Option<(f64, f64)> {
        min_max(&self.list)
    }

    pub fn min_max_set(&self) -> Option<(f64, f64)> {
        let values: Vec<f64> = self.set.iter().map(|&bits| f64::from_bits(bits)).collect();
        min_max(&values)
    }

    pub fn set_len(&self) -> usize {
        self.set.len()
    }

    pub fn set_covers_array(&self) -> bool {
        self.array.iter().all(|&v| self.set.contains(&set_key(v)))
    }

    /// Runs the full drill: list, then set, then array, before and after
    /// sorting. Returns the sorted array for the caller to persist.
    pub fn run(mut self, tracker: &PerformanceTracker, out: &mut impl Write) -> io::Result<Vec<f64>> {
        writeln!(out, "--- list ---")?;
        self.report_position(out, "list", tracker.measure("search list", || self.find_in_list()))?;
        self.report_min_max(out, "list", tracker.measure("min/max in list", || self.min_max_list()))?;
        tracker.measure("sort list", || self.sort_list());
        self.report_position(out, "list", tracker.measure("search list", || self.find_in_list()))?;
        self.report_min_max(out, "list", tracker.measure("min/max in list", || self.min_max_list()))?;

        writeln!(out, "--- set ---")?;
        let found = tracker.measure("search set", || self.contains_in_set());
        if found {
            writeln!(out, "Value {} found in set", self.target)?;
        } else {
            writeln!(out, "Value {} not found in set", self.target)?;
        }
        self.report_min_max(out, "set", tracker.measure("min/max in set", || self.min_max_set()))?;
        writeln!(out, "Array holds {} values, set holds {}", self.array.len(), self.set_len())?;
        if self.set_covers_array() {
            writeln!(out, "Every array value is present in the set")?;
        } else {
            writeln!(out, "Some array values are missing from the set")?;
        }

        writeln!(out, "--- array ---")?;
        self.report_position(out, "array", tracker.measure("search array", || self.find_in_array()))?;
        self.report_min_max(out, "array", tracker.measure("min/max in array", || self.min_max_array()))?;
        tracker.measure("sort array", || self.sort_array());
        self.report_position(out, "array", tracker.measure("search array", || self.find_in_array()))?;
        self.report_min_max(out, "array", tracker.measure("min/max in array", || self.min_max_array()))?;

        Ok(self.array)
    }

    fn report_position(&self, out: &mut impl Write, name: &str, position: Option<usize>) -> io::Result<()> {
        match position {
            Some(idx) => writeln!(out, "Value {} found in {} at position {}", self.target, name, idx),
            None => writeln!(out, "Value {} not found in {}", self.target, name),
        }
    }

    fn report_min_max(&self, out: &mut impl Write, name: &str, bounds: Option<(f64, f64)>) -> io::Result<()> {
        match bounds {
            Some((lo, hi)) => writeln!(out, "Min in {}: {}, max: {}", name, lo, hi),
            None => writeln!(out, "The {} is empty", name),
        }
    }
}
