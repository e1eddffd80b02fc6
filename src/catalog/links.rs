use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::warn;

use super::books::CatalogError;
use crate::core::types::{GroupCode, LinkType};
use crate::core::verse_key::{PassageRange, VerseKey};

/// Link data version for compatibility checking
pub const LINKS_VERSION: &str = "1.0.0";

/// A typed link from a verse to a related passage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedPassage {
    pub link_type: LinkType,
    pub passage: PassageRange,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrossReferenceEntry {
    pub from: VerseKey,
    pub to: VerseKey,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParallelEntry {
    pub from: VerseKey,
    pub groups: BTreeMap<GroupCode, VerseKey>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelatedPassageEntry {
    pub from: VerseKey,
    pub link_type: LinkType,
    pub passage: PassageRange,
}

/// Serializable link data format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceLinksData {
    pub version: String,
    #[serde(default)]
    pub cross_references: Vec<CrossReferenceEntry>,
    #[serde(default)]
    pub parallels: Vec<ParallelEntry>,
    #[serde(default)]
    pub related_passages: Vec<RelatedPassageEntry>,
}

/// Read-only link tables for "related passage" navigation.
///
/// Built once when the application starts and handed to whatever needs it.
/// Most verses have no recorded relation, so every lookup returns an
/// `Option` or a possibly empty slice.
#[derive(Debug, Default)]
pub struct ReferenceLinks {
    /// Index: verse -> single cross-referenced verse
    cross_references: HashMap<VerseKey, VerseKey>,

    /// Index: verse -> parallel verse per navigation group slot
    parallels: HashMap<VerseKey, [Option<VerseKey>; 4]>,

    /// Index: verse -> related passages in data order
    related: HashMap<VerseKey, Vec<RelatedPassage>>,
}

impl ReferenceLinks {
    /// Create empty link tables
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the embedded link data
    pub fn load_embedded() -> Result<Self, CatalogError> {
        // Validated at compile time via build.rs
        const EMBEDDED_LINKS: &str = include_str!("../../data/reference_links.json");
        Self::from_json(EMBEDDED_LINKS)
    }

    /// Load link data from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse link data from JSON string
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let data: ReferenceLinksData = serde_json::from_str(json)?;

        if data.version != LINKS_VERSION {
            warn!(
                expected = LINKS_VERSION,
                found = %data.version,
                "Reference link data version mismatch"
            );
        }

        let mut links = Self::new();
        for entry in data.cross_references {
            links.add_cross_reference(entry.from, entry.to);
        }
        for entry in data.parallels {
            for (group, key) in entry.groups {
                links.add_parallel(entry.from, group, key);
            }
        }
        for entry in data.related_passages {
            links.add_related_passage(
                entry.from,
                RelatedPassage {
                    link_type: entry.link_type,
                    passage: entry.passage,
                },
            );
        }

        Ok(links)
    }

    pub fn add_cross_reference(&mut self, from: VerseKey, to: VerseKey) {
        if let Some(previous) = self.cross_references.insert(from, to) {
            warn!(%from, %previous, replacement = %to, "Cross reference listed twice");
        }
    }

    pub fn add_parallel(&mut self, from: VerseKey, group: GroupCode, to: VerseKey) {
        let slots = self.parallels.entry(from).or_default();
        if let Some(previous) = slots[group.slot()].replace(to) {
            warn!(%from, %group, %previous, replacement = %to, "Parallel listed twice");
        }
    }

    pub fn add_related_passage(&mut self, from: VerseKey, passage: RelatedPassage) {
        self.related.entry(from).or_default().push(passage);
    }

    /// The single cross-referenced verse, e.g. an Old Testament quotation
    pub fn related_verse(&self, key: &VerseKey) -> Option<VerseKey> {
        self.cross_references.get(key).copied()
    }

    /// The synoptic parallel shown in windows of the given group
    pub fn parallel_verse(&self, group: GroupCode, key: &VerseKey) -> Option<VerseKey> {
        self.parallels
            .get(key)
            .and_then(|slots| slots[group.slot()])
    }

    /// All typed links recorded for a verse
    pub fn related_passages(&self, key: &VerseKey) -> &[RelatedPassage] {
        self.related.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Number of verses that have at least one link of any kind
    pub fn len(&self) -> usize {
        let mut keys: Vec<&VerseKey> = self
            .cross_references
            .keys()
            .chain(self.parallels.keys())
            .chain(self.related.keys())
            .collect();
        keys.sort_unstable();
        keys.dedup();
        keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cross_references.is_empty() && self.parallels.is_empty() && self.related.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> VerseKey {
        s.parse().unwrap()
    }

    #[test]
    fn test_related_verse() {
        let links = ReferenceLinks::load_embedded().unwrap();
        assert_eq!(links.related_verse(&key("MAT 2:18")), Some(key("JER 31:15")));
        assert_eq!(links.related_verse(&key("MAT 3:3")), Some(key("ISA 40:3")));
        assert_eq!(links.related_verse(&key("MAT 3:4")), None);
        assert_eq!(links.related_verse(&key("GEN 1:1")), None);
    }

    #[test]
    fn test_parallel_verse_per_group() {
        let links = ReferenceLinks::load_embedded().unwrap();
        let baptism = key("MAT 3:13");
        assert_eq!(links.parallel_verse(GroupCode::B, &baptism), Some(key("MRK 1:9")));
        assert_eq!(links.parallel_verse(GroupCode::C, &baptism), Some(key("LUK 3:21")));
        assert_eq!(links.parallel_verse(GroupCode::D, &baptism), Some(key("JHN 1:31")));
        assert_eq!(links.parallel_verse(GroupCode::A, &baptism), None);
        assert_eq!(links.parallel_verse(GroupCode::B, &key("MAT 3:14")), None);
    }

    #[test]
    fn test_related_passages() {
        let links = ReferenceLinks::load_embedded().unwrap();
        let found = links.related_passages(&key("LUK 4:18"));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].link_type, LinkType::QuotedOtReference);
        assert_eq!(found[0].passage.to_string(), "ISA 61:1-2");

        assert!(links.related_passages(&key("LUK 4:19")).is_empty());
    }

    #[test]
    fn test_from_json_minimal() {
        let json = r#"{
            "version": "1.0.0",
            "cross_references": [{ "from": "JHN 3:16", "to": "ROM 5:8" }]
        }"#;
        let links = ReferenceLinks::from_json(json).unwrap();
        assert_eq!(links.len(), 1);
        assert_eq!(links.related_verse(&key("JHN 3:16")), Some(key("ROM 5:8")));
        assert!(links.related_passages(&key("JHN 3:16")).is_empty());
    }

    #[test]
    fn test_from_json_rejects_bad_keys() {
        let json = r#"{
            "version": "1.0.0",
            "cross_references": [{ "from": "XYZ 3:16", "to": "ROM 5:8" }]
        }"#;
        assert!(matches!(
            ReferenceLinks::from_json(json),
            Err(CatalogError::ParseError(_))
        ));
    }

    #[test]
    fn test_duplicate_cross_reference_keeps_last() {
        let mut links = ReferenceLinks::new();
        links.add_cross_reference(key("MAT 1:1"), key("GEN 5:1"));
        links.add_cross_reference(key("MAT 1:1"), key("GEN 2:4"));
        assert_eq!(links.related_verse(&key("MAT 1:1")), Some(key("GEN 2:4")));
    }

    #[test]
    fn test_empty() {
        let links = ReferenceLinks::new();
        assert!(links.is_empty());
        assert_eq!(links.len(), 0);
    }
}
