//! The compatibility table: (domain, feature id) -> support record.
//!
//! The bundled data lives in `data/baseline.json` and is embedded at build
//! time. Callers can load a replacement table from disk at startup.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::domain::Domain;
use crate::error::{BaselineError, Result};


const BUNDLED_JSON: &str = include_str!("../data/baseline.json");

static BUNDLED: Lazy<Arc<CompatTable>> = Lazy::new(|| {
    Arc::new(CompatTable::from_json_str(BUNDLED_JSON).expect("bundled baseline.json is valid"))
});

/// Support metadata for one feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportRecord {
    #[serde(rename = "baseline")]
    pub is_baseline: bool,
    /// "Browser N+" strings, in display order
    #[serde(rename = "supported", default)]
    pub supported_in: Vec<String>,
    /// Path below the documentation base URL
    #[serde(rename = "mdn")]
    pub doc_ref: String,
    #[serde(rename = "fallback", default, skip_serializing_if = "Option::is_none")]
    pub fallback_hint: Option<String>,
}

/// A table entry: canonical id plus its record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub id: String,
    #[serde(flatten)]
    pub record: SupportRecord,
}

#[derive(Debug, Default)]
struct DomainTable {
    features: Vec<Feature>,
    index: HashMap<String, usize>,
}

/// Read-only feature table, keyed by domain then exact feature id.
#[derive(Debug, Default)]
pub struct CompatTable {
    domains: HashMap<Domain, DomainTable>,
}

impl CompatTable {
    /// The table shipped with the crate, parsed once per process.
    pub fn bundled() -> Arc<CompatTable> {
        Arc::clone(&BUNDLED)
    }

    /// Parse a table from its JSON form (`{"css": [...], "html": [...], ...}`).
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: BTreeMap<Domain, Vec<Feature>> = serde_json::from_str(json)?;
        let mut table = CompatTable::default();

        for (domain, features) in raw {
            let entry = table.domains.entry(domain).or_default();
            for feature in features {
                if entry.index.contains_key(&feature.id) {
                    return Err(BaselineError::DuplicateFeature {
                        domain,
                        id: feature.id,
                    });
                }
                entry.index.insert(feature.id.clone(), entry.features.len());
                entry.features.push(feature);
            }
        }

        Ok(table)
    }

    /// Load a table from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Exact, case-sensitive lookup.
    pub fn lookup(&self, domain: Domain, id: &str) -> Option<&SupportRecord> {
        let table = self.domains.get(&domain)?;
        table.index.get(id).map(|&i| &table.features[i].record)
    }

    pub fn contains(&self, domain: Domain, id: &str) -> bool {
        self.domains
            .get(&domain)
            .is_some_and(|t| t.index.contains_key(id))
    }

    /// All features of a domain in the order they were defined.
    pub fn features(&self, domain: Domain) -> &[Feature] {
        self.domains
            .get(&domain)
            .map(|t| t.features.as_slice())
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.domains.values().map(|t| t.features.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
