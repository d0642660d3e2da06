//! Matchup strategy
//!
//! Picks one archetype for the game from the enemy roster shape, then attaches
//! the combo simulation and, when a bot lane is known, the lane sub-analysis.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::botlane::{analyze_bot_lane, BotLaneMatchup};
use crate::analysis::build::Build;
use crate::analysis::catalog;
use crate::analysis::damage::{simulate_combo, DamageAnalysis};
use crate::analysis::threats::{classify_threats, ThreatSignals};
use crate::data::Champion;

const MAX_PRIMARY_TARGETS: usize = 3;
const MAX_MAJOR_THREATS: usize = 2;

/// Item scaling is not modeled yet; every combo assumes zero bonus AD
const BONUS_AD: f64 = 0.0;

/// How hard to play the game, ordered from most passive
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Aggression {
    Low,
    Moderate,
    High,
    Extreme,
}

/// Game plan archetype
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Archetype {
    Snowball,
    Control,
    SustainAndPunish,
    Balanced,
}

impl Archetype {
    pub fn aggression(&self) -> Aggression {
        match self {
            Archetype::Snowball => Aggression::Extreme,
            Archetype::Control => Aggression::Low,
            // Engage only on a guaranteed kill, but then commit fully
            Archetype::SustainAndPunish => Aggression::High,
            Archetype::Balanced => Aggression::Moderate,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchupAnalysis {
    pub archetype: Archetype,
    pub title: String,
    pub description: String,
    pub win_condition: String,
    pub aggression_level: Aggression,
    pub primary_targets: Vec<String>,
    pub major_threats: Vec<String>,
    pub tips: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot_lane_matchup: Option<BotLaneMatchup>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage_analysis: Option<DamageAnalysis>,
}

/// First matching archetype wins
pub fn select_archetype(signals: &ThreatSignals) -> Archetype {
    if signals.squishies.len() >= 3 && signals.tanks.len() <= 1 {
        Archetype::Snowball
    } else if signals.tanks.len() >= 2 || signals.cc_heavy.len() >= 2 {
        Archetype::Control
    } else if !signals.poke_heavy.is_empty() {
        Archetype::SustainAndPunish
    } else {
        Archetype::Balanced
    }
}

fn strings(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|s| s.to_string()).collect()
}

fn control_tips(build: Option<&Build>) -> Vec<String> {
    let has_umbral = build
        .map(|b| b.contains_anywhere(&catalog::UMBRAL_GLAIVE))
        .unwrap_or(false);

    let first = if has_umbral {
        "Rush Umbral Glaive to deny vision and control the map."
    } else {
        "Focus on roaming and vision control with your support item."
    };
    strings(&[
        first,
        "Use Q to peel divers off your ADC, not just to engage.",
        "Your R is for executing low targets, not starting fights.",
        "Look for roams mid when bot lane is pushed in.",
    ])
}

/// Analyze the matchup against an enemy roster
pub fn analyze_matchup(enemies: &[Champion], build: Option<&Build>, your_adc: Option<&Champion>) -> MatchupAnalysis {
    let signals = classify_threats(enemies);
    let archetype = select_archetype(&signals);
    debug!(
        "Matchup archetype {:?}: {} squishies, {} tanks, {} cc-heavy, {} poke-heavy",
        archetype,
        signals.squishies.len(),
        signals.tanks.len(),
        signals.cc_heavy.len(),
        signals.poke_heavy.len()
    );

    let (title, description, win_condition, tips) = match archetype {
        Archetype::Snowball => (
            "ASSASSIN MODE: KILL ON SIGHT",
            "The enemy team is extremely fragile. You are the main character. Look for aggressive Flash-E engages.",
            "Snowball early. End the game before 25 minutes.",
            strings(&[
                "Invade level 1 if possible.",
                "Look for a Level 2 All-in (Q -> E). They cannot survive your burst.",
                "Camp the enemy mid-laner if bot is safe.",
            ]),
        ),
        Archetype::Control => (
            "ROAMING DISRUPTOR",
            "You cannot kill their frontline. Do NOT force fights 2v2 bot lane against tanks.",
            "Abandon lane (roam) to get your Mid/Jungle ahead. Peel for your Carry in fights.",
            control_tips(build),
        ),
        Archetype::SustainAndPunish => (
            "SUSTAIN & PUNISH",
            "They will try to poke you out. Give up CS to stay healthy. Wait for them to miss a key spell.",
            "Survive lane with Second Wind. Flash-E when they overstep to poke.",
            strings(&[
                "Stay in bushes to regenerate Grey Health.",
                "If they miss their CC/Poke spell, ENGAGE IMMEDIATELY.",
                "Hexflash (if taken) is deadly here.",
            ]),
        ),
        Archetype::Balanced => (
            "Balanced Skirmisher",
            "Look for hooks on mispositioned carries. Play around your cooldowns.",
            "Catch enemies rotating through the jungle.",
            strings(&["Use W to scout for vision safely.", "Hold E for escape if you miss Q."]),
        ),
    };

    let damage = simulate_combo(true, BONUS_AD);
    let bot_lane = analyze_bot_lane(&signals, your_adc, Some(&damage));

    MatchupAnalysis {
        archetype,
        title: title.to_string(),
        description: description.to_string(),
        win_condition: win_condition.to_string(),
        aggression_level: archetype.aggression(),
        primary_targets: signals.squishies.iter().take(MAX_PRIMARY_TARGETS).cloned().collect(),
        major_threats: signals.tanks.iter().take(MAX_MAJOR_THREATS).cloned().collect(),
        tips,
        bot_lane_matchup: bot_lane,
        damage_analysis: Some(damage),
    }
}
