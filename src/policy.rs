//! Ordering policies for [`Parrot`] keys.
//!
//! A policy is four named parameters: direction and null placement for the
//! nickname field, and the same pair for the species field. The two null
//! placements are independent; a store may put missing nicknames last while
//! putting missing species first.

use crate::key::Parrot;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Ascending,
    Descending,
}

/// Where a missing field value sorts. Absolute: not flipped by [`Direction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NullPlacement {
    First,
    Last,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOrder {
    pub direction: Direction,
    pub nulls: NullPlacement,
}

impl FieldOrder {
    pub const fn new(direction: Direction, nulls: NullPlacement) -> Self {
        FieldOrder { direction, nulls }
    }

    pub const fn ascending() -> Self {
        Self::new(Direction::Ascending, NullPlacement::Last)
    }

    pub const fn descending() -> Self {
        Self::new(Direction::Descending, NullPlacement::Last)
    }

    pub const fn nulls_first(self) -> Self {
        Self::new(self.direction, NullPlacement::First)
    }

    pub const fn nulls_last(self) -> Self {
        Self::new(self.direction, NullPlacement::Last)
    }

    pub fn compare(&self, a: Option<&str>, b: Option<&str>) -> Ordering {
        match (a, b) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => match self.nulls {
                NullPlacement::First => Ordering::Less,
                NullPlacement::Last => Ordering::Greater,
            },
            (Some(_), None) => match self.nulls {
                NullPlacement::First => Ordering::Greater,
                NullPlacement::Last => Ordering::Less,
            },
            (Some(a), Some(b)) => match self.direction {
                Direction::Ascending => a.cmp(b),
                Direction::Descending => b.cmp(a),
            },
        }
    }
}

/// Total order over [`Parrot`] keys: nickname first, species on a tie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderingPolicy {
    pub nickname: FieldOrder,
    pub species: FieldOrder,
}

impl OrderingPolicy {
    pub const fn new(nickname: FieldOrder, species: FieldOrder) -> Self {
        OrderingPolicy { nickname, species }
    }

    /// Both fields ascending, missing values last.
    pub const fn ascending() -> Self {
        Self::new(FieldOrder::ascending(), FieldOrder::ascending())
    }

    pub fn compare(&self, a: &Parrot, b: &Parrot) -> Ordering {
        self.nickname
            .compare(a.nickname(), b.nickname())
            .then_with(|| self.species.compare(a.species(), b.species()))
    }

    /// Like [`compare`](Self::compare), but also accepts a missing key. A
    /// present key is always greater than a missing one.
    pub fn compare_optional(&self, a: Option<&Parrot>, b: Option<&Parrot>) -> Ordering {
        match (a, b) {
            (Some(a), Some(b)) => self.compare(a, b),
            (Some(_), None) => Ordering::Greater,
            (None, Some(_)) => Ordering::Less,
            (None, None) => Ordering::Equal,
        }
    }

    pub fn sort(&self, keys: &mut [Parrot]) {
        keys.sort_by(|a, b| self.compare(a, b));
    }

    pub fn is_sorted(&self, keys: &[Parrot]) -> bool {
        keys.windows(2)
            .all(|w| self.compare(&w[0], &w[1]) != Ordering::Greater)
    }
}

/// A key paired with the policy that orders it, so it can live in a
/// `BTreeMap`. Every `SortKey` inside one map must carry the same policy.
///
/// Lookups go through [`SortKeyRef`], which borrows the key instead of
/// cloning it.
#[derive(Debug, Clone)]
pub struct SortKey {
    key: Parrot,
    policy: OrderingPolicy,
}

impl SortKey {
    pub fn new(key: Parrot, policy: OrderingPolicy) -> Self {
        SortKey { key, policy }
    }

    pub fn key(&self) -> &Parrot {
        &self.key
    }
}

/// Borrowed form of [`SortKey`] for map lookups.
#[derive(Debug, Clone, Copy)]
pub struct SortKeyRef<'a> {
    key: &'a Parrot,
    policy: OrderingPolicy,
}

impl<'a> SortKeyRef<'a> {
    pub fn new(key: &'a Parrot, policy: OrderingPolicy) -> Self {
        SortKeyRef { key, policy }
    }

    /// Erased form accepted by `BTreeMap<SortKey, _>::get` and `remove`.
    pub fn as_lookup(&self) -> &(dyn PolicyKey + 'a) {
        self
    }
}

/// What owned and borrowed sort keys share: a key and its policy.
///
/// `SortKey` borrows as `dyn PolicyKey`, and both forms order through the same
/// `OrderingPolicy::compare`, so `Borrow`'s equivalence requirement holds.
pub trait PolicyKey {
    fn parrot(&self) -> &Parrot;
    fn policy(&self) -> OrderingPolicy;
}

impl PolicyKey for SortKey {
    fn parrot(&self) -> &Parrot {
        &self.key
    }

    fn policy(&self) -> OrderingPolicy {
        self.policy
    }
}

impl PolicyKey for SortKeyRef<'_> {
    fn parrot(&self) -> &Parrot {
        self.key
    }

    fn policy(&self) -> OrderingPolicy {
        self.policy
    }
}

impl<'a> Borrow<dyn PolicyKey + 'a> for SortKey {
    fn borrow(&self) -> &(dyn PolicyKey + 'a) {
        self
    }
}

impl PartialEq for dyn PolicyKey + '_ {
    fn eq(&self, other: &Self) -> bool {
        self.parrot() == other.parrot()
    }
}

impl Eq for dyn PolicyKey + '_ {}

impl Ord for dyn PolicyKey + '_ {
    fn cmp(&self, other: &Self) -> Ordering {
        debug_assert_eq!(self.policy(), other.policy(), "mixed ordering policies");
        self.policy().compare(self.parrot(), other.parrot())
    }
}

impl PartialOrd for dyn PolicyKey + '_ {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SortKey {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for SortKey {}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        debug_assert_eq!(self.policy, other.policy, "mixed ordering policies");
        self.policy.compare(&self.key, &other.key)
    }
}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
