//! Threat classification of an enemy roster
//!
//! Produces the named counters every composer reads. Champion-specific name
//! lists are consulted before tag heuristics wherever both apply.

use serde::Serialize;

use crate::data::{Champion, DamageType, Tag};

/// Champions whose kits revolve around shielding
pub const SHIELD_CHAMPIONS: &[&str] = &["Lulu", "Janna", "Karma", "Sett", "TahmKench", "Shen", "Sion", "Nautilus"];

/// Champions with heavy self or team healing
pub const HEALING_CHAMPIONS: &[&str] = &["Soraka", "Yuumi", "Aatrox", "Sylas", "Vladimir", "DrMundo", "Warwick"];

/// Champions with a suppression ultimate
pub const SUPPRESSION_CHAMPIONS: &[&str] = &["Malzahar", "Warwick", "Skarner"];

/// Supports that shield and heal rather than engage
pub const ENCHANTER_SUPPORTS: &[&str] = &["Lulu", "Janna", "Karma", "Nami", "Soraka", "Yuumi"];

/// Counters and lookups derived from an enemy roster
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ThreatSignals {
    /// Mage-tagged or magic-damage champions
    pub magic_threats: usize,
    /// Tank- or Support-tagged champions
    pub cc_threats: usize,
    /// Tank- or Fighter-tagged champions
    pub tank_threats: usize,
    /// Marksman/Assassin/Mage without the Tank tag
    pub squishy_threats: usize,
    pub healing_threats: usize,
    pub shield_threats: usize,
    pub suppression_threats: usize,
    /// Mage- or Marksman-tagged champions
    pub poke_threats: usize,
    /// Display names of squishy champions, roster order
    pub squishies: Vec<String>,
    /// Display names of Tank-tagged champions
    pub tanks: Vec<String>,
    /// Supports tagged Tank or Mage
    pub cc_heavy: Vec<String>,
    /// Champions tagged both Mage and Support
    pub poke_heavy: Vec<String>,
    /// A Marksman dealing physical damage is present
    pub physical_marksman: bool,
    /// First Marksman on the roster
    pub enemy_marksman: Option<Champion>,
    /// First Support on the roster
    pub enemy_support: Option<Champion>,
}

impl ThreatSignals {
    /// Whether the enemy support is an enchanter (by name) or a tank (by tag)
    pub fn has_enchanter_or_tank_support(&self) -> bool {
        self.enemy_support
            .as_ref()
            .map(|s| ENCHANTER_SUPPORTS.contains(&s.id.as_str()) || s.has_tag(Tag::Tank))
            .unwrap_or(false)
    }
}

/// A Marksman/Assassin/Mage that is not also a Tank
pub fn is_squishy(champion: &Champion) -> bool {
    champion.has_any_tag(&[Tag::Marksman, Tag::Assassin, Tag::Mage]) && !champion.has_tag(Tag::Tank)
}

/// Scan the enemy roster into threat counters
pub fn classify_threats(enemies: &[Champion]) -> ThreatSignals {
    let mut signals = ThreatSignals::default();

    for champ in enemies {
        let id = champ.id.as_str();

        if champ.has_tag(Tag::Mage) || champ.damage_type == Some(DamageType::Magic) {
            signals.magic_threats += 1;
        }
        if champ.has_any_tag(&[Tag::Tank, Tag::Fighter]) {
            signals.tank_threats += 1;
        }
        if champ.has_any_tag(&[Tag::Tank, Tag::Support]) {
            signals.cc_threats += 1;
        }
        if champ.has_any_tag(&[Tag::Mage, Tag::Marksman]) {
            signals.poke_threats += 1;
        }
        if is_squishy(champ) {
            signals.squishy_threats += 1;
            signals.squishies.push(champ.name.clone());
        }
        if champ.has_tag(Tag::Tank) {
            signals.tanks.push(champ.name.clone());
        }
        if champ.has_tag(Tag::Support) && champ.has_any_tag(&[Tag::Tank, Tag::Mage]) {
            signals.cc_heavy.push(champ.name.clone());
        }
        if champ.has_tag(Tag::Mage) && champ.has_tag(Tag::Support) {
            signals.poke_heavy.push(champ.name.clone());
        }

        if SHIELD_CHAMPIONS.contains(&id) {
            signals.shield_threats += 1;
        }
        if HEALING_CHAMPIONS.contains(&id) {
            signals.healing_threats += 1;
        }
        if SUPPRESSION_CHAMPIONS.contains(&id) {
            signals.suppression_threats += 1;
        }

        if champ.has_tag(Tag::Marksman) && champ.damage_type == Some(DamageType::Physical) {
            signals.physical_marksman = true;
        }
        if signals.enemy_marksman.is_none() && champ.has_tag(Tag::Marksman) {
            signals.enemy_marksman = Some(champ.clone());
        }
        if signals.enemy_support.is_none() && champ.has_tag(Tag::Support) {
            signals.enemy_support = Some(champ.clone());
        }
    }

    signals
}
