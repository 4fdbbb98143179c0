//! The composite key: a parrot identified by nickname and species.
//!
//! Equality and hashing are fixed. Ordering is not intrinsic to the key; it is
//! supplied by an [`OrderingPolicy`](crate::policy::OrderingPolicy) owned by the
//! store, because different stores sort the same keys differently.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct Parrot {
    nickname: Option<String>,
    species: Option<String>,
}

impl Parrot {
    pub fn new(nickname: impl Into<String>, species: impl Into<String>) -> Self {
        Parrot {
            nickname: Some(nickname.into()),
            species: Some(species.into()),
        }
    }

    /// A parrot whose species is unknown.
    pub fn with_nickname(nickname: impl Into<String>) -> Self {
        Parrot {
            nickname: Some(nickname.into()),
            species: None,
        }
    }

    pub fn from_parts(nickname: Option<String>, species: Option<String>) -> Self {
        Parrot { nickname, species }
    }

    pub fn nickname(&self) -> Option<&str> {
        self.nickname.as_deref()
    }

    pub fn species(&self) -> Option<&str> {
        self.species.as_deref()
    }

    /// Stable 32-bit hash: `31 * h(nickname) + h(species)`, where `h` is the
    /// polynomial hash over UTF-16 code units and a missing field hashes to 0.
    ///
    /// Unlike [`Hash`], this value does not depend on the hasher in use, so it
    /// can be printed and compared across runs.
    pub fn hash_code(&self) -> i32 {
        let nickname = self.nickname.as_deref().map_or(0, string_hash);
        let species = self.species.as_deref().map_or(0, string_hash);
        nickname.wrapping_mul(31).wrapping_add(species)
    }
}

fn string_hash(s: &str) -> i32 {
    s.encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(unit as i32))
}

impl PartialEq for Parrot {
    fn eq(&self, other: &Self) -> bool {
        self.nickname == other.nickname && self.species == other.species
    }
}

impl Hash for Parrot {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Must stay in step with `eq`: both fields, absence included.
        self.nickname.hash(state);
        self.species.hash(state);
    }
}

impl fmt::Display for Parrot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nickname = self.nickname.as_deref().unwrap_or("null");
        match &self.species {
            Some(species) => write!(
                f,
                "Parrot{{nickname='{}', species='{}', hashCode={}}}",
                nickname,
                species,
                self.hash_code()
            ),
            None => write!(
                f,
                "Parrot{{nickname='{}', hashCode={}}}",
                nickname,
                self.hash_code()
            ),
        }
    }
}
