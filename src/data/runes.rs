//! Rune metadata from the static data provider

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single rune as described by `runesReforged.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuneData {
    pub id: u32,
    pub key: String,
    pub icon: String,
    pub name: String,
    #[serde(default)]
    pub short_desc: String,
    #[serde(default)]
    pub long_desc: String,
}

/// One row of runes inside a tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuneSlot {
    pub runes: Vec<RuneData>,
}

/// A rune tree (style) such as Domination or Precision
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuneTree {
    pub id: u32,
    pub key: String,
    pub icon: String,
    pub name: String,
    pub slots: Vec<RuneSlot>,
}

/// Flatten all runes from all trees into a map keyed by perk id
pub fn flatten_trees(trees: Vec<RuneTree>) -> BTreeMap<u32, RuneData> {
    trees
        .into_iter()
        .flat_map(|tree| tree.slots.into_iter())
        .flat_map(|slot| slot.runes.into_iter())
        .map(|rune| (rune.id, rune))
        .collect()
}
