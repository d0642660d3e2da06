//! Reference Data Layer
//!
//! Champion and rune records supplied by the static data provider. The
//! recommendation engine only reads these; fetching and caching live in
//! [`ddragon`].

pub mod ddragon;
pub mod runes;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strsim::normalized_levenshtein;

pub use ddragon::DataDragon;
pub use runes::{RuneData, RuneTree};

/// Minimum similarity for a fuzzy champion name match
const FUZZY_MATCH_THRESHOLD: f64 = 0.75;

/// Role tag attached to a champion by the static data provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tag {
    Mage,
    Tank,
    Fighter,
    Assassin,
    Marksman,
    Support,
    /// Any tag outside the known vocabulary
    #[serde(other)]
    Other,
}

/// Simplified damage profile of a champion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageType {
    Physical,
    Magic,
    Mixed,
}

/// Offense ratings from the static data (`info` block)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ChampionInfo {
    #[serde(default)]
    pub attack: u32,
    #[serde(default)]
    pub magic: u32,
}

/// A playable character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Champion {
    /// Stable slug, e.g. "TahmKench"
    pub id: String,
    /// Numeric key in string form, e.g. "223"
    pub key: String,
    /// Display name
    pub name: String,
    /// Role tags in provider order
    pub tags: Vec<Tag>,
    #[serde(default, rename = "damageType", skip_serializing_if = "Option::is_none")]
    pub damage_type: Option<DamageType>,
}

impl PartialEq for Champion {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Champion {}

impl Champion {
    /// Create a champion without a damage classification
    pub fn new(id: impl Into<String>, key: impl Into<String>, name: impl Into<String>, tags: &[Tag]) -> Self {
        Self {
            id: id.into(),
            key: key.into(),
            name: name.into(),
            tags: tags.to_vec(),
            damage_type: None,
        }
    }

    /// Attach a damage classification
    pub fn with_damage_type(mut self, damage_type: DamageType) -> Self {
        self.damage_type = Some(damage_type);
        self
    }

    pub fn has_tag(&self, tag: Tag) -> bool {
        self.tags.contains(&tag)
    }

    pub fn has_any_tag(&self, tags: &[Tag]) -> bool {
        tags.iter().any(|t| self.has_tag(*t))
    }
}

/// Derive a damage classification from tags, falling back to the offense ratings
pub fn determine_damage_type(tags: &[Tag], info: Option<ChampionInfo>) -> DamageType {
    if tags.contains(&Tag::Mage) || tags.contains(&Tag::Support) {
        return DamageType::Magic;
    }
    if tags.contains(&Tag::Marksman) || tags.contains(&Tag::Assassin) {
        return DamageType::Physical;
    }
    if let Some(info) = info {
        if info.magic > 5 && info.attack > 5 {
            return DamageType::Mixed;
        }
        if info.magic > info.attack {
            return DamageType::Magic;
        }
    }
    DamageType::Physical
}

/// Everything the static data provider supplies for one patch version
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReferenceData {
    /// Patch version the data was fetched for
    pub version: String,
    /// All playable characters
    pub champions: Vec<Champion>,
    /// Rune metadata keyed by perk id
    pub runes: BTreeMap<u32, RuneData>,
}

impl ReferenceData {
    pub fn is_empty(&self) -> bool {
        self.champions.is_empty()
    }

    /// Look up a champion by its numeric key
    pub fn champion_by_key(&self, key: &str) -> Option<&Champion> {
        self.champions.iter().find(|c| c.key == key)
    }

    /// Resolve user input to a champion.
    ///
    /// Exact id or display name matches win (case-insensitive); otherwise the
    /// closest display name above the similarity threshold is returned.
    pub fn find_champion(&self, query: &str) -> Option<&Champion> {
        let needle = normalize_name(query);
        if needle.is_empty() {
            return None;
        }

        if let Some(exact) = self
            .champions
            .iter()
            .find(|c| normalize_name(&c.id) == needle || normalize_name(&c.name) == needle)
        {
            return Some(exact);
        }

        self.champions
            .iter()
            .map(|c| (c, normalized_levenshtein(&normalize_name(&c.name), &needle)))
            .filter(|(_, score)| *score >= FUZZY_MATCH_THRESHOLD)
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(c, _)| c)
    }

    /// Champions whose display name contains the query (case-insensitive)
    pub fn search(&self, query: &str) -> Vec<&Champion> {
        let needle = normalize_name(query);
        let mut found: Vec<&Champion> = self
            .champions
            .iter()
            .filter(|c| needle.is_empty() || normalize_name(&c.name).contains(&needle))
            .collect();
        found.sort_by(|a, b| a.name.cmp(&b.name));
        found
    }

    /// Display name for a perk id, if the rune catalog knows it
    pub fn rune_name(&self, perk_id: u32) -> Option<&str> {
        self.runes.get(&perk_id).map(|r| r.name.as_str())
    }
}

/// Lowercase and strip everything but letters and digits ("Kog'Maw" -> "kogmaw")
fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(|c| c.to_lowercase())
        .collect()
}
