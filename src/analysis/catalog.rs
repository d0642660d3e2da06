//! Static item and rune catalog
//!
//! Read-only lookup tables. Selections copy an entry into an owned [`Item`] and
//! overwrite its justification; the catalog itself is never mutated.

use serde::{Deserialize, Serialize};

/// Catalog record for an item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogItem {
    /// Numeric item id used for icon resolution
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    /// Default justification
    pub reason: &'static str,
}

/// An item selected into a build, with its justification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl CatalogItem {
    /// Copy with the default justification
    pub fn item(&self) -> Item {
        Item {
            id: self.id.to_string(),
            name: self.name.to_string(),
            icon: self.icon.to_string(),
            description: None,
            reason: Some(self.reason.to_string()),
        }
    }

    /// Copy with a selection-specific justification
    pub fn with_reason(&self, reason: impl Into<String>) -> Item {
        Item {
            reason: Some(reason.into()),
            ..self.item()
        }
    }
}

impl Item {
    /// Re-label for a build path step: `"<PREFIX>: <reason or fallback>"`
    pub fn relabeled(&self, prefix: &str, fallback: &str) -> Item {
        let reason = self.reason.as_deref().unwrap_or(fallback);
        Item {
            reason: Some(format!("{}: {}", prefix, reason)),
            ..self.clone()
        }
    }

    pub fn is(&self, catalog: &CatalogItem) -> bool {
        self.id == catalog.id
    }
}

// Starters
pub const WORLD_ATLAS: CatalogItem = CatalogItem {
    id: "3867",
    name: "World Atlas",
    icon: "World_Atlas",
    reason: "Standard support starter for gold generation.",
};
pub const HEALTH_POTION: CatalogItem = CatalogItem {
    id: "2003",
    name: "Health Potion",
    icon: "Health_Potion",
    reason: "Sustain in lane.",
};

// Boots
pub const BOOTS_OF_MOBILITY: CatalogItem = CatalogItem {
    id: "3117",
    name: "Boots of Mobility",
    icon: "Boots_of_Mobility",
    reason: "Maximum roaming potential to impact other lanes.",
};
pub const MERCURYS_TREADS: CatalogItem = CatalogItem {
    id: "3111",
    name: "Mercury's Treads",
    icon: "Mercury_s_Treads",
    reason: "Essential against heavy CC or magic damage threats.",
};
pub const PLATED_STEELCAPS: CatalogItem = CatalogItem {
    id: "3047",
    name: "Plated Steelcaps",
    icon: "Plated_Steelcaps",
    reason: "Reduces damage from auto-attack heavy compositions.",
};
pub const IONIAN_BOOTS: CatalogItem = CatalogItem {
    id: "3158",
    name: "Ionian Boots of Lucidity",
    icon: "Ionian_Boots_of_Lucidity",
    reason: "Cheap ability haste for more frequent hooks and stuns.",
};

// Core / lethality
pub const VOLTAIC_CYCLOSWORD: CatalogItem = CatalogItem {
    id: "6699",
    name: "Voltaic Cyclosword",
    icon: "Voltaic_Cyclosword",
    reason: "Burst damage and slow on energized attacks, perfect for Pyke's engage.",
};
pub const YOUMUUS_GHOSTBLADE: CatalogItem = CatalogItem {
    id: "3142",
    name: "Youmuu's Ghostblade",
    icon: "Youmuu_s_Ghostblade",
    reason: "High mobility for roaming and escaping.",
};
pub const OPPORTUNITY: CatalogItem = CatalogItem {
    id: "6701",
    name: "Opportunity",
    icon: "Opportunity",
    reason: "Grants lethality and movement speed after kills, snowballing leads.",
};
pub const HUBRIS: CatalogItem = CatalogItem {
    id: "6697",
    name: "Hubris",
    icon: "Hubris",
    reason: "Snowball item: gain massive AD bonuses from takedowns.",
};
pub const AXIOM_ARC: CatalogItem = CatalogItem {
    id: "6696",
    name: "Axiom Arc",
    icon: "Axiom_Arc",
    reason: "Ultimate cooldown refund allows for multi-kill resets in teamfights.",
};

// Situational / defensive / counter
pub const EDGE_OF_NIGHT: CatalogItem = CatalogItem {
    id: "3814",
    name: "Edge of Night",
    icon: "Edge_of_Night",
    reason: "Spell shield blocks critical CC (e.g., hooks, stuns) allowing safer engages.",
};
pub const MAW_OF_MALMORTIUS: CatalogItem = CatalogItem {
    id: "3156",
    name: "Maw of Malmortius",
    icon: "Maw_of_Malmortius",
    reason: "Lifeline shield prevents being one-shot by heavy magic burst.",
};
pub const SERYLDAS_GRUDGE: CatalogItem = CatalogItem {
    id: "6694",
    name: "Serylda's Grudge",
    icon: "Serylda_s_Grudge",
    reason: "Armor penetration and slow to deal with tankier enemies.",
};
pub const GUARDIAN_ANGEL: CatalogItem = CatalogItem {
    id: "3026",
    name: "Guardian Angel",
    icon: "Guardian_Angel",
    reason: "Revive passive allows for aggressive plays without giving up shutdowns.",
};
pub const MERCURIAL_SCIMITAR: CatalogItem = CatalogItem {
    id: "3139",
    name: "Mercurial Scimitar",
    icon: "Mercurial_Scimitar",
    reason: "Cleanse active is mandatory against suppression (Malzahar/Warwick/Skarner).",
};
pub const DEATHS_DANCE: CatalogItem = CatalogItem {
    id: "6333",
    name: "Death's Dance",
    icon: "Death_s_Dance",
    reason: "Delays incoming damage, preventing instant burst from physical assassins.",
};
pub const UMBRAL_GLAIVE: CatalogItem = CatalogItem {
    id: "3179",
    name: "Umbral Glaive",
    icon: "Umbral_Glaive",
    reason: "Vision control dominance; clear wards instantly.",
};
pub const SERPENTS_FANG: CatalogItem = CatalogItem {
    id: "6695",
    name: "Serpent's Fang",
    icon: "Serpents_Fang",
    reason: "Shield Reaver passive destroys enemy shields (Lulu, Sett, Tahm Kench).",
};
pub const CHEMPUNK_CHAINSWORD: CatalogItem = CatalogItem {
    id: "6609",
    name: "Chempunk Chainsword",
    icon: "Chempunk_Chainsword",
    reason: "Applies Grievous Wounds to counter heavy healing (Soraka, Aatrox, Sylas).",
};

/// Every catalog item, for id lookup
pub const ALL_ITEMS: &[CatalogItem] = &[
    WORLD_ATLAS,
    HEALTH_POTION,
    BOOTS_OF_MOBILITY,
    MERCURYS_TREADS,
    PLATED_STEELCAPS,
    IONIAN_BOOTS,
    VOLTAIC_CYCLOSWORD,
    YOUMUUS_GHOSTBLADE,
    OPPORTUNITY,
    HUBRIS,
    AXIOM_ARC,
    EDGE_OF_NIGHT,
    MAW_OF_MALMORTIUS,
    SERYLDAS_GRUDGE,
    GUARDIAN_ANGEL,
    MERCURIAL_SCIMITAR,
    DEATHS_DANCE,
    UMBRAL_GLAIVE,
    SERPENTS_FANG,
    CHEMPUNK_CHAINSWORD,
];

/// Look up a catalog item by id
pub fn item_by_id(id: &str) -> Option<&'static CatalogItem> {
    ALL_ITEMS.iter().find(|item| item.id == id)
}

/// Summoner spells are fixed for this champion
pub const SUMMONER_SPELLS: [&str; 2] = ["Flash", "Ignite"];

/// The protagonist's numeric champion key
pub const PYKE_CHAMPION_KEY: u32 = 555;

/// Rune page name used for export
pub const RUNE_PAGE_NAME: &str = "Pyke Dominator";

/// Rune tree (style) ids
pub mod styles {
    pub const DOMINATION: u32 = 8100;
    pub const PRECISION: u32 = 8000;
    pub const RESOLVE: u32 = 8400;
}

/// Catalog record for a rune perk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogRune {
    pub id: u32,
    pub name: &'static str,
    /// Default justification, if the rune carries one
    pub reason: Option<&'static str>,
}

pub const HAIL_OF_BLADES: CatalogRune = CatalogRune {
    id: 9923,
    name: "Hail of Blades",
    reason: Some("Hail of Blades: Essential for Pyke. Allows 3 quick autos to proc passive/execute range."),
};
pub const SUDDEN_IMPACT: CatalogRune = CatalogRune {
    id: 8143,
    name: "Sudden Impact",
    reason: Some("Sudden Impact: Grants lethality after using E (dash) or W (stealth)."),
};
pub const SIXTH_SENSE: CatalogRune = CatalogRune {
    id: 8137,
    name: "Sixth Sense",
    reason: Some(
        "Sixth Sense: Automatically senses nearby untracked and unseen wards, tracking them for your team. \
         At level 11, reveals wards for 10 seconds. Perfect synergy with vision control.",
    ),
};
pub const ULTIMATE_HUNTER: CatalogRune = CatalogRune {
    id: 8106,
    name: "Ultimate Hunter",
    reason: Some("Ultimate Hunter: Reduces R cooldown. More R's = More Gold."),
};
pub const SECOND_WIND: CatalogRune = CatalogRune {
    id: 8444,
    name: "Second Wind",
    reason: None,
};
pub const UNFLINCHING: CatalogRune = CatalogRune {
    id: 8242,
    name: "Unflinching",
    reason: Some("Unflinching: Grants tenacity when your summoner spells are down."),
};
pub const PRESENCE_OF_MIND: CatalogRune = CatalogRune {
    id: 8009,
    name: "Presence of Mind",
    reason: Some(
        "Presence of Mind: MANA SUSTAIN. Restores mana on takedowns, ensuring you never run dry during reset chains.",
    ),
};
pub const COUP_DE_GRACE: CatalogRune = CatalogRune {
    id: 8014,
    name: "Coup de Grace",
    reason: Some("Coup de Grace: Deal more damage to low health enemies. Synergizes with Pyke's R execute threshold."),
};
pub const SHARD_ADAPTIVE_FORCE: CatalogRune = CatalogRune {
    id: 5008,
    name: "Adaptive Force",
    reason: None,
};
pub const SHARD_HEALTH_SCALING: CatalogRune = CatalogRune {
    id: 5001,
    name: "Health Scaling",
    reason: None,
};

/// Every catalog rune, for id lookup
pub const ALL_RUNES: &[CatalogRune] = &[
    HAIL_OF_BLADES,
    SUDDEN_IMPACT,
    SIXTH_SENSE,
    ULTIMATE_HUNTER,
    SECOND_WIND,
    UNFLINCHING,
    PRESENCE_OF_MIND,
    COUP_DE_GRACE,
    SHARD_ADAPTIVE_FORCE,
    SHARD_HEALTH_SCALING,
];

/// Look up a catalog rune by perk id
pub fn rune_by_id(id: u32) -> Option<&'static CatalogRune> {
    ALL_RUNES.iter().find(|rune| rune.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_item_ids_unique() {
        let ids: HashSet<&str> = ALL_ITEMS.iter().map(|i| i.id).collect();
        assert_eq!(ids.len(), ALL_ITEMS.len());
    }

    #[test]
    fn test_rune_ids_unique() {
        let ids: HashSet<u32> = ALL_RUNES.iter().map(|r| r.id).collect();
        assert_eq!(ids.len(), ALL_RUNES.len());
    }

    #[test]
    fn test_with_reason_leaves_catalog_untouched() {
        let item = UMBRAL_GLAIVE.with_reason("Picked for vision.");
        assert_eq!(item.reason.as_deref(), Some("Picked for vision."));
        assert_eq!(UMBRAL_GLAIVE.reason, "Vision control dominance; clear wards instantly.");
        assert_eq!(UMBRAL_GLAIVE.item().reason.as_deref(), Some(UMBRAL_GLAIVE.reason));
    }

    #[test]
    fn test_relabeled_uses_fallback() {
        let mut item = OPPORTUNITY.item();
        item.reason = None;
        let relabeled = item.relabeled("SECOND CORE", "Follow up damage.");
        assert_eq!(relabeled.reason.as_deref(), Some("SECOND CORE: Follow up damage."));

        let relabeled = OPPORTUNITY.with_reason("Snowball.").relabeled("RUSH ITEM", "Core power spike.");
        assert_eq!(relabeled.reason.as_deref(), Some("RUSH ITEM: Snowball."));
    }

    #[test]
    fn test_lookups() {
        assert_eq!(item_by_id("3179").map(|i| i.name), Some("Umbral Glaive"));
        assert!(item_by_id("0000").is_none());
        assert_eq!(rune_by_id(9923).map(|r| r.name), Some("Hail of Blades"));
        assert!(rune_by_id(1).is_none());
    }
}
