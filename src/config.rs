//! Scenario files: the ordering policy, the layouts to exercise, the probe keys
//! and values, and the seed entries for a demonstration run.
//!
//! Scenarios are read from TOML or JSON. A missing owner in a seed entry means
//! a null value.

use crate::error::{AviaryError, Result};
use crate::key::Parrot;
use crate::policy::{FieldOrder, OrderingPolicy};
use crate::store::Layout;
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedEntry {
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub species: Option<String>,
    #[serde(default)]
    pub owner: Value,
}

impl SeedEntry {
    pub fn new(nickname: &str, species: &str, owner: &str) -> Self {
        SeedEntry {
            nickname: Some(nickname.to_string()),
            species: Some(species.to_string()),
            owner: Value::from(owner),
        }
    }

    pub fn key(&self) -> Parrot {
        Parrot::from_parts(self.nickname.clone(), self.species.clone())
    }

    pub fn into_pair(self) -> (Parrot, Value) {
        (Parrot::from_parts(self.nickname, self.species), self.owner)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub policy: OrderingPolicy,
    #[serde(default = "default_layouts")]
    pub layouts: Vec<Layout>,
    pub key_to_find: Parrot,
    pub value_to_find: Value,
    pub key_to_add: Parrot,
    pub value_to_add: Value,
    #[serde(default)]
    pub entries: Vec<SeedEntry>,
    /// Number of generated keys for the layout comparison; 0 skips it.
    #[serde(default = "default_benchmark_size")]
    pub benchmark_size: usize,
    /// Value searched for by the numeric drill.
    #[serde(default)]
    pub numeric_target: f64,
}

fn default_layouts() -> Vec<Layout> {
    Layout::ALL.to_vec()
}

fn default_benchmark_size() -> usize {
    50_000
}

// 1-based line holding byte `offset`.
fn line_of(content: &str, offset: usize) -> usize {
    let offset = offset.min(content.len());
    content.as_bytes()[..offset].iter().filter(|&&b| b == b'\n').count() + 1
}

impl Default for Scenario {
    /// The built-in parrot registry: nicknames descending, species ascending
    /// with unknown species first.
    fn default() -> Self {
        Scenario {
            policy: OrderingPolicy::new(
                FieldOrder::descending(),
                FieldOrder::ascending().nulls_first(),
            ),
            layouts: default_layouts(),
            key_to_find: Parrot::new("Luna", "Snowy Owl"),
            value_to_find: Value::from("Eva"),
            key_to_add: Parrot::new("Kir", "Long-eared Owl"),
            value_to_add: Value::from("Bohdan"),
            entries: vec![
                SeedEntry::new("Shuryk", "Macaw", "Artem"),
                SeedEntry::new("Chyzhyk", "Grey", "Iryna"),
                SeedEntry::new("Tsizar", "Cockatiel", "Diana"),
                SeedEntry::new("Chyzhyk", "Lory", "Eva"),
                SeedEntry::new("Feniks", "Amazon", "Zakhar"),
                SeedEntry::new("Umka", "Cockatoo", "Inna"),
                SeedEntry::new("Tima", "Eclectus", "Eva"),
                SeedEntry::new("Sonia", "Kea", "Kostia"),
                SeedEntry::new("Romka", "Macaw", "Liliia"),
                SeedEntry::new("Pirat", "Budgerigar", "Inna"),
            ],
            benchmark_size: default_benchmark_size(),
            numeric_target: 0.0,
        }
    }
}

impl Scenario {
    pub fn from_toml_str(content: &str, source_name: &str) -> Result<Self> {
        let scenario: Scenario = toml::from_str(content).map_err(|err| {
            let line = err.span().map_or(0, |span| line_of(content, span.start));
            AviaryError::malformed(source_name, line, err.message())
        })?;
        scenario.validate(source_name)
    }

    pub fn from_json_str(content: &str, source_name: &str) -> Result<Self> {
        let scenario: Scenario = serde_json::from_str(content).map_err(|err| {
            AviaryError::malformed(source_name, err.line(), err.to_string())
        })?;
        scenario.validate(source_name)
    }

    /// Reads a scenario, picking the format from the extension and falling
    /// back to sniffing the content.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let source_name = path.display().to_string();

        let format = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match format.as_deref() {
            Some("json") => Self::from_json_str(&content, &source_name),
            Some("toml") => Self::from_toml_str(&content, &source_name),
            _ => {
                if content.trim_start().starts_with('{') {
                    Self::from_json_str(&content, &source_name)
                } else {
                    Self::from_toml_str(&content, &source_name)
                }
            }
        }
    }

    pub fn seed(&self) -> impl Iterator<Item = (Parrot, Value)> + '_ {
        self.entries.iter().cloned().map(SeedEntry::into_pair)
    }

    fn validate(self, source_name: &str) -> Result<Self> {
        if self.layouts.is_empty() {
            return Err(AviaryError::config(source_name, "at least one layout is required"));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{Direction, NullPlacement};
    use std::io::Write;
    use tempfile::Builder;

    const SAMPLE_TOML: &str = r#"
layouts = ["hash_with_key_order", "tree"]
value_to_find = "q"
value_to_add = "r"
benchmark_size = 0

[policy]
nickname = { direction = "ascending", nulls = "last" }
species = { direction = "ascending", nulls = "last" }

[key_to_find]
nickname = "A"
species = "y"

[key_to_add]
nickname = "C"

[[entries]]
nickname = "A"
species = "x"
owner = "p"

[[entries]]
nickname = "B"
"#;

    #[test]
    fn test_parse_toml() {
        let scenario = Scenario::from_toml_str(SAMPLE_TOML, "sample.toml").unwrap();
        assert_eq!(scenario.layouts, vec![Layout::HashWithKeyOrder, Layout::Tree]);
        assert_eq!(scenario.policy, OrderingPolicy::ascending());
        assert_eq!(scenario.key_to_find, Parrot::new("A", "y"));
        assert_eq!(scenario.key_to_add, Parrot::with_nickname("C"));
        assert_eq!(scenario.benchmark_size, 0);

        let seed: Vec<_> = scenario.seed().collect();
        assert_eq!(seed[0], (Parrot::new("A", "x"), Value::from("p")));
        assert_eq!(seed[1], (Parrot::with_nickname("B"), Value::null()));
    }

    #[test]
    fn test_parse_json_with_defaults() {
        let json = r#"{
            "policy": {
                "nickname": { "direction": "descending", "nulls": "first" },
                "species": { "direction": "ascending", "nulls": "last" }
            },
            "key_to_find": { "nickname": "A", "species": null },
            "value_to_find": null,
            "key_to_add": { "nickname": "B", "species": "x" },
            "value_to_add": "q"
        }"#;
        let scenario = Scenario::from_json_str(json, "inline.json").unwrap();
        assert_eq!(scenario.layouts, Layout::ALL.to_vec());
        assert_eq!(scenario.policy.nickname.direction, Direction::Descending);
        assert_eq!(scenario.policy.nickname.nulls, NullPlacement::First);
        assert!(scenario.value_to_find.is_null());
        assert!(scenario.entries.is_empty());
        assert_eq!(scenario.benchmark_size, 50_000);
    }

    #[test]
    fn test_malformed_json_reports_line() {
        let err = Scenario::from_json_str("{\n  \"policy\": [\n", "broken.json").unwrap_err();
        assert!(err.is_malformed_input());
    }

    #[test]
    fn test_malformed_toml_reports_line() {
        let content = "value_to_find = \"q\"\n\n[policy\nnickname = 1\n";
        match Scenario::from_toml_str(content, "broken.toml").unwrap_err() {
            AviaryError::MalformedInput { source_name, line, .. } => {
                assert_eq!(source_name, "broken.toml");
                assert_eq!(line, 3);
            }
            other => panic!("unexpected error: {other}"),
        }

        // Well-formed TOML with a field of the wrong type is malformed too.
        let wrong_type = SAMPLE_TOML.replace("benchmark_size = 0", "benchmark_size = \"many\"");
        let err = Scenario::from_toml_str(&wrong_type, "sample.toml").unwrap_err();
        assert!(err.is_malformed_input());
    }

    #[test]
    fn test_empty_layouts_rejected() {
        let content = SAMPLE_TOML.replace(r#"layouts = ["hash_with_key_order", "tree"]"#, "layouts = []");
        let err = Scenario::from_toml_str(&content, "sample.toml").unwrap_err();
        assert!(matches!(err, AviaryError::Config { .. }));
    }

    #[test]
    fn test_from_path_sniffs_format() {
        let mut file = Builder::new().suffix(".scenario").tempfile().unwrap();
        write!(file, "{}", SAMPLE_TOML).unwrap();
        let scenario = Scenario::from_path(file.path()).unwrap();
        assert_eq!(scenario.entries.len(), 2);
    }

    #[test]
    fn test_shipped_scenario_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("scenarios/ascending.toml");
        let scenario = Scenario::from_path(&path).unwrap();
        assert_eq!(scenario.entries.len(), 5);
        assert_eq!(scenario.policy.species.nulls, NullPlacement::First);
        assert!(scenario.entries.iter().any(|e| e.nickname.is_none()));
        assert!(scenario.entries.iter().any(|e| e.owner.is_null()));
    }

    #[test]
    fn test_default_fixture() {
        let scenario = Scenario::default();
        assert_eq!(scenario.entries.len(), 10);
        assert_eq!(
            scenario
                .entries
                .iter()
                .filter(|e| e.owner == scenario.value_to_find)
                .count(),
            2
        );
        assert!(!scenario.entries.iter().any(|e| e.key() == scenario.key_to_find));
    }
}
