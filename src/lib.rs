//! A parrot registry keyed by (nickname, species).
//!
//! The registry keeps every entry in one arena and indexes it twice: by hash
//! for lookups and by insertion or key order for iteration. Searching by
//! owner sorts a by-value copy and binary-searches it.

pub mod bench;
pub mod config;
pub mod datafile;
pub mod demo;
pub mod drills;
pub mod error;
pub mod key;
pub mod policy;
pub mod search;
pub mod store;
pub mod timing;
pub mod value;

pub use config::Scenario;
pub use error::{AviaryError, Result};
pub use key::Parrot;
pub use policy::{Direction, FieldOrder, NullPlacement, OrderingPolicy};
pub use store::{Entries, Layout, ParrotStore, View};
pub use timing::PerformanceTracker;
pub use value::{Entry, Value, ValueComparator};
