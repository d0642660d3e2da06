//! Build composition
//!
//! Turns threat signals into boots, two core items, up to three situational
//! items and a linear purchase order. Every slot carries a justification.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::catalog::{self, Item};
use crate::analysis::threats::{classify_threats, ThreatSignals};
use crate::data::Champion;

/// Situational items beyond this count are dropped
pub const MAX_SITUATIONAL: usize = 3;

/// Squishy count at which the build switches to snowball mode
const SNOWBALL_SQUISHY_THRESHOLD: usize = 3;

/// Win condition the core items are built around
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BuildMode {
    /// Burst and resets against fragile teams
    Snowball,
    /// Vision and mobility against durable teams
    Control,
}

/// A complete item recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Build {
    pub mode: BuildMode,
    pub starter: Vec<Item>,
    pub boots: Item,
    pub core: [Item; 2],
    pub situational: Vec<Item>,
    pub build_path: Vec<Item>,
    pub spells: Vec<String>,
}

impl Build {
    /// Whether the item appears as a core or situational pick
    pub fn contains(&self, item: &catalog::CatalogItem) -> bool {
        self.core.iter().chain(self.situational.iter()).any(|i| i.is(item))
    }

    /// Whether the item appears anywhere, including the build path
    pub fn contains_anywhere(&self, item: &catalog::CatalogItem) -> bool {
        self.contains(item) || self.build_path.iter().any(|i| i.is(item))
    }
}

fn select_boots(signals: &ThreatSignals) -> Item {
    if signals.cc_threats >= 3 {
        catalog::MERCURYS_TREADS.with_reason(format!(
            "Chosen due to {} heavy CC threats on the enemy team.",
            signals.cc_threats
        ))
    } else if signals.physical_marksman && signals.tank_threats >= 2 {
        catalog::PLATED_STEELCAPS.with_reason(format!(
            "Chosen to mitigate heavy auto-attack damage from the enemy Marksman and {} Tanks/Fighters.",
            signals.tank_threats
        ))
    } else {
        catalog::IONIAN_BOOTS.with_reason("Default choice for ability haste to maximize hook frequency.")
    }
}

/// Core pair plus any items the chosen mode pushes into the situational pool
fn select_core(signals: &ThreatSignals) -> (BuildMode, [Item; 2], Vec<Item>) {
    if signals.squishy_threats >= SNOWBALL_SQUISHY_THRESHOLD {
        let core = [
            catalog::VOLTAIC_CYCLOSWORD.with_reason(
                "PRO PLAY: Voltaic Cyclosword first for maximum burst. Energized slow sets up guaranteed Q hits.",
            ),
            catalog::AXIOM_ARC
                .with_reason("PRO PLAY: Axiom Arc 2nd ensures Ultimate resets. Critical for snowballing teamfights."),
        ];
        let extra = vec![
            catalog::HUBRIS
                .with_reason("Snowball item: Gain massive AD from takedowns. Only if you can reliably get kills."),
            catalog::OPPORTUNITY.with_reason("Movement speed and lethality after kills. Great for cleanup and resets."),
        ];
        return (BuildMode::Snowball, core, extra);
    }

    let rush_vision = signals.has_enchanter_or_tank_support() || signals.tank_threats >= 2;
    if rush_vision {
        let core = [
            catalog::UMBRAL_GLAIVE.with_reason(
                "PRO PLAY: Umbral Glaive first for vision control. Essential against tank/enchanter supports.",
            ),
            catalog::YOUMUUS_GHOSTBLADE
                .with_reason("PRO PLAY: Youmuu's 2nd for roaming potential. Mobility to impact other lanes."),
        ];
        (BuildMode::Control, core, Vec::new())
    } else {
        let core = [
            catalog::VOLTAIC_CYCLOSWORD.with_reason("Control Mode: Burst damage for picks. Slows help secure kills."),
            catalog::YOUMUUS_GHOSTBLADE
                .with_reason("Mobility to roam and impact other lanes since you cannot one-shot tanks."),
        ];
        let extra = vec![catalog::UMBRAL_GLAIVE
            .with_reason("Vision control dominance. Consider if enemy has good vision setup.")];
        (BuildMode::Control, core, extra)
    }
}

/// Counter items in priority order; the caller truncates
fn select_situational(signals: &ThreatSignals, core: &[Item; 2], mut pool: Vec<Item>) -> Vec<Item> {
    if signals.suppression_threats > 0 {
        pool.push(catalog::MERCURIAL_SCIMITAR.with_reason(
            "CRITICAL: Enemy has suppression (e.g., Malzahar/Warwick). You MUST buy this to cleanse it.",
        ));
    }
    if signals.shield_threats >= 2 {
        pool.push(catalog::SERPENTS_FANG.with_reason(format!(
            "Enemy has {} shield-heavy champions. This item reduces their shielding power significantly.",
            signals.shield_threats
        )));
    }
    if signals.healing_threats >= 2 {
        pool.push(catalog::CHEMPUNK_CHAINSWORD.with_reason(format!(
            "Enemy has {} heavy healers. Anti-heal is required to secure kills.",
            signals.healing_threats
        )));
    }
    if signals.magic_threats >= 2 {
        pool.push(catalog::MAW_OF_MALMORTIUS.with_reason(format!(
            "Enemy has {} magic damage threats. The magic shield will save your life.",
            signals.magic_threats
        )));
    }
    if signals.cc_threats >= 2 {
        pool.push(catalog::EDGE_OF_NIGHT.with_reason(format!(
            "Spell shield is vital to block engage tools from the {} CC threats on the enemy team.",
            signals.cc_threats
        )));
    }
    if signals.tank_threats >= 2 {
        pool.push(catalog::SERYLDAS_GRUDGE.with_reason(format!(
            "Armor penetration is needed to damage the {} tanks on the enemy team.",
            signals.tank_threats
        )));
    }

    if !core.iter().any(|i| i.is(&catalog::AXIOM_ARC)) {
        pool.push(catalog::AXIOM_ARC.with_reason("More ultimate resets = more gold for your team."));
    }
    pool.push(
        catalog::GUARDIAN_ANGEL.with_reason("Late game insurance. Allows you to make risky plays to end the game."),
    );

    if pool.len() > MAX_SITUATIONAL {
        debug!("Dropping {} lower-priority situational items", pool.len() - MAX_SITUATIONAL);
    }
    pool.truncate(MAX_SITUATIONAL);
    pool
}

/// Starter -> rushed core -> boots -> second core -> situational
fn build_path(boots: &Item, core: &[Item; 2], situational: &[Item]) -> Vec<Item> {
    let mut path = vec![
        catalog::WORLD_ATLAS.item(),
        core[0].relabeled("RUSH ITEM", "Core power spike."),
        boots.relabeled("TIER 2 BOOTS", "Mobility."),
        core[1].relabeled("SECOND CORE", "Follow up damage."),
    ];
    path.extend(situational.iter().cloned());
    path
}

/// Compose a build from precomputed threat signals
pub fn compose_build_from_signals(signals: &ThreatSignals) -> Build {
    let boots = select_boots(signals);
    let (mode, core, pool) = select_core(signals);
    let situational = select_situational(signals, &core, pool);
    let build_path = build_path(&boots, &core, &situational);

    debug!(
        "Composed {:?} build: boots={}, core=[{}, {}], situational={}",
        mode,
        boots.name,
        core[0].name,
        core[1].name,
        situational.len()
    );

    Build {
        mode,
        starter: vec![
            catalog::WORLD_ATLAS.item(),
            catalog::HEALTH_POTION.item(),
            catalog::HEALTH_POTION.item(),
        ],
        boots,
        core,
        situational,
        build_path,
        spells: catalog::SUMMONER_SPELLS.iter().map(|s| s.to_string()).collect(),
    }
}

/// Compose a build against the enemy roster
pub fn compose_build(enemies: &[Champion]) -> Build {
    compose_build_from_signals(&classify_threats(enemies))
}
