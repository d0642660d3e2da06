//! Bot lane sub-analysis
//!
//! Grades the 2v2 lane by the enemy marksman's escape tools, then adjusts for
//! the enemy support's archetype. `VeryHard` is a ceiling no support lowers.

use serde::{Deserialize, Serialize};

use crate::analysis::damage::{compare_bot_lane, BotLaneDamageComparison, DamageAnalysis};
use crate::analysis::threats::{ThreatSignals, ENCHANTER_SUPPORTS};
use crate::data::{Champion, Tag};

const IMMOBILE_ADCS: &[&str] = &["Ashe", "Jinx", "Varus", "KogMaw", "Twitch"];
const MOBILE_ADCS: &[&str] = &["Ezreal", "Lucian", "Caitlyn", "Vayne", "Tristana"];
const SELF_PEEL_ADCS: &[&str] = &["Xayah", "Sivir", "Samira"];

const LANE_ENCHANTERS_EXTRA: &[&str] = &["Sona", "Seraphine", "Renata"];
const HOOK_SUPPORTS: &[&str] = &["Thresh", "Blitzcrank", "Nautilus", "Pyke"];
const TANK_SUPPORTS: &[&str] = &["Leona", "Braum", "Taric", "Alistar", "Rell", "Shen"];

/// Lane difficulty, ordered from easiest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    VeryHard,
}

/// Guidance for the bot lane 2v2
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotLaneMatchup {
    pub enemy_adc: Option<Champion>,
    pub enemy_support: Option<Champion>,
    pub matchup_difficulty: Difficulty,
    pub lane_phase: String,
    pub all_in_potential: String,
    pub key_cooldowns: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage_comparison: Option<BotLaneDamageComparison>,
}

/// Support archetype as seen from lane
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SupportClass {
    Enchanter,
    Hook,
    Tank,
    Mage,
}

fn classify_support(support: &Champion) -> Option<SupportClass> {
    let id = support.id.as_str();
    // Name lists first; tags only break ties for unlisted champions
    if ENCHANTER_SUPPORTS.contains(&id) || LANE_ENCHANTERS_EXTRA.contains(&id) {
        Some(SupportClass::Enchanter)
    } else if HOOK_SUPPORTS.contains(&id) {
        Some(SupportClass::Hook)
    } else if TANK_SUPPORTS.contains(&id) || (support.has_tag(Tag::Tank) && !support.has_tag(Tag::Mage)) {
        Some(SupportClass::Tank)
    } else if support.has_tag(Tag::Mage) && support.has_tag(Tag::Support) {
        Some(SupportClass::Mage)
    } else {
        None
    }
}

impl Difficulty {
    /// Adjust for the enemy support without lowering a `VeryHard` lane
    fn refine(self, class: SupportClass) -> Difficulty {
        match (class, self) {
            (_, Difficulty::VeryHard) => Difficulty::VeryHard,
            (_, Difficulty::Easy) => Difficulty::Medium,
            (SupportClass::Hook, _) => Difficulty::Hard,
            (SupportClass::Tank, Difficulty::Medium) => Difficulty::Hard,
            (_, other) => other,
        }
    }
}

/// Analyze the bot lane; `None` when neither a marksman nor a support is known
pub fn analyze_bot_lane(
    signals: &ThreatSignals,
    your_adc: Option<&Champion>,
    pyke_damage: Option<&DamageAnalysis>,
) -> Option<BotLaneMatchup> {
    let enemy_adc = signals.enemy_marksman.as_ref();
    let enemy_support = signals.enemy_support.as_ref();
    if enemy_adc.is_none() && enemy_support.is_none() {
        return None;
    }

    let mut difficulty = Difficulty::Medium;
    let mut lane_phase: Vec<&str> = Vec::new();
    let mut all_in = None;
    let mut key_cooldowns = Vec::new();

    if let Some(adc) = enemy_adc {
        let id = adc.id.as_str();
        if IMMOBILE_ADCS.contains(&id) {
            difficulty = Difficulty::Easy;
            lane_phase.push("Favorable: These ADCs lack mobility. Look for Q hooks from bushes and Flash-E engages.");
            all_in = Some("HIGH: Can easily all-in at level 2-3. Their immobility makes them easy targets.");
        } else if MOBILE_ADCS.contains(&id) {
            difficulty = Difficulty::Hard;
            lane_phase.push("Difficult: High mobility makes hooks harder to land. Wait for them to use dashes.");
            all_in = Some("MODERATE: Only engage when their escape abilities are on cooldown.");
            key_cooldowns.push(format!("{} dash/escape: 15-20s", adc.name));
        } else if SELF_PEEL_ADCS.contains(&id) {
            difficulty = Difficulty::VeryHard;
            lane_phase.push(
                "Extremely Difficult: Spell shields and windwalls counter your Q. Bait their abilities first.",
            );
            all_in = Some("LOW: Must bait their defensive abilities before engaging.");
            key_cooldowns.push(format!("{} spell shield: 20-24s", adc.name));
        }
    }

    if let Some(support) = enemy_support {
        if let Some(class) = classify_support(support) {
            difficulty = difficulty.refine(class);
            let (phase, potential, cooldown) = match class {
                SupportClass::Enchanter => (
                    "Enchanter support - they will shield/heal. Burst is key.",
                    "MODERATE: Need to burst through shields. Consider Serpent's Fang.",
                    "shield/heal: 8-12s",
                ),
                SupportClass::Hook => (
                    "Hook vs Hook matchup - whoever lands hook first wins.",
                    "HIGH: Skill matchup. Bait their hook, then engage.",
                    "hook: 12-16s",
                ),
                SupportClass::Tank => (
                    "Enemy support is tanky - avoid extended trades.",
                    "Focus ADC, ignore tank support in all-ins.",
                    "engage tool: 12-18s",
                ),
                SupportClass::Mage => (
                    "Mage support - high damage but squishy. Look for all-ins.",
                    "HIGH: They are squishy. All-in when their key spells are down.",
                    "main spell: 8-12s",
                ),
            };
            lane_phase.push(phase);
            all_in = Some(potential);
            key_cooldowns.push(format!("{} {}", support.name, cooldown));
        }
    }

    let lane_phase = if lane_phase.is_empty() {
        "Standard lane phase. Look for opportunities.".to_string()
    } else {
        lane_phase.join(" ")
    };

    Some(BotLaneMatchup {
        enemy_adc: enemy_adc.cloned(),
        enemy_support: enemy_support.cloned(),
        matchup_difficulty: difficulty,
        lane_phase,
        all_in_potential: all_in.unwrap_or("MODERATE: Standard all-in potential.").to_string(),
        key_cooldowns,
        damage_comparison: pyke_damage.map(|dmg| compare_bot_lane(enemy_adc, enemy_support, your_adc, dmg)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::damage::simulate_combo;
    use crate::analysis::threats::classify_threats;

    fn champ(id: &str, tags: &[Tag]) -> Champion {
        Champion::new(id, "0", id, tags)
    }

    fn lane(adc: Option<&str>, support: Option<(&str, &[Tag])>) -> Option<BotLaneMatchup> {
        let mut roster = vec![champ("Garen", &[Tag::Fighter, Tag::Tank])];
        if let Some(id) = adc {
            roster.push(champ(id, &[Tag::Marksman]));
        }
        if let Some((id, tags)) = support {
            roster.push(champ(id, tags));
        }
        analyze_bot_lane(&classify_threats(&roster), None, None)
    }

    #[test]
    fn test_no_bot_lane_without_marksman_or_support() {
        assert!(lane(None, None).is_none());
    }

    #[test]
    fn test_adc_mobility_classes() {
        assert_eq!(lane(Some("Jinx"), None).unwrap().matchup_difficulty, Difficulty::Easy);
        assert_eq!(lane(Some("Ezreal"), None).unwrap().matchup_difficulty, Difficulty::Hard);
        assert_eq!(lane(Some("Samira"), None).unwrap().matchup_difficulty, Difficulty::VeryHard);
        assert_eq!(lane(Some("Aphelios"), None).unwrap().matchup_difficulty, Difficulty::Medium);
    }

    #[test]
    fn test_unlisted_marksman_uses_defaults() {
        let m = lane(Some("Aphelios"), None).unwrap();
        assert_eq!(m.lane_phase, "Standard lane phase. Look for opportunities.");
        assert_eq!(m.all_in_potential, "MODERATE: Standard all-in potential.");
        assert!(m.key_cooldowns.is_empty());
    }

    #[test]
    fn test_enchanter_lifts_easy_lane() {
        let m = lane(Some("Jinx"), Some(("Lulu", &[Tag::Support, Tag::Mage]))).unwrap();
        assert_eq!(m.matchup_difficulty, Difficulty::Medium);
        assert!(m.lane_phase.ends_with("Enchanter support - they will shield/heal. Burst is key."));
        assert!(m.all_in_potential.contains("Serpent's Fang"));
        assert_eq!(m.key_cooldowns, vec!["Lulu shield/heal: 8-12s"]);
    }

    #[test]
    fn test_hook_support_name_beats_tank_tag() {
        let m = lane(Some("Aphelios"), Some(("Nautilus", &[Tag::Tank, Tag::Support]))).unwrap();
        assert_eq!(m.matchup_difficulty, Difficulty::Hard);
        assert!(m.lane_phase.contains("Hook vs Hook"));
    }

    #[test]
    fn test_tank_support_by_name_and_tag() {
        let by_name = lane(Some("Aphelios"), Some(("Leona", &[Tag::Tank, Tag::Support]))).unwrap();
        assert_eq!(by_name.matchup_difficulty, Difficulty::Hard);
        assert!(by_name.lane_phase.contains("tanky"));

        let by_tag = lane(Some("Jinx"), Some(("Rakan", &[Tag::Support, Tag::Tank]))).unwrap();
        assert_eq!(by_tag.matchup_difficulty, Difficulty::Medium);
        assert_eq!(by_tag.key_cooldowns, vec!["Rakan engage tool: 12-18s"]);
    }

    #[test]
    fn test_mage_support() {
        let m = lane(Some("Ezreal"), Some(("Brand", &[Tag::Mage, Tag::Support]))).unwrap();
        assert_eq!(m.matchup_difficulty, Difficulty::Hard);
        assert_eq!(m.key_cooldowns, vec!["Ezreal dash/escape: 15-20s", "Brand main spell: 8-12s"]);
        assert!(m.all_in_potential.starts_with("HIGH"));
    }

    #[test]
    fn test_very_hard_is_a_ceiling() {
        for (id, tags) in [
            ("Lulu", &[Tag::Support, Tag::Mage][..]),
            ("Thresh", &[Tag::Support, Tag::Fighter][..]),
            ("Braum", &[Tag::Support, Tag::Tank][..]),
            ("Zyra", &[Tag::Mage, Tag::Support][..]),
        ] {
            let m = lane(Some("Xayah"), Some((id, tags))).unwrap();
            assert_eq!(m.matchup_difficulty, Difficulty::VeryHard, "{}", id);
        }
    }

    #[test]
    fn test_support_only_lane() {
        let m = lane(None, Some(("Thresh", &[Tag::Support, Tag::Fighter]))).unwrap();
        assert!(m.enemy_adc.is_none());
        assert_eq!(m.lane_phase, "Hook vs Hook matchup - whoever lands hook first wins.");
        assert_eq!(m.matchup_difficulty, Difficulty::Hard);
    }

    #[test]
    fn test_damage_comparison_only_with_simulation() {
        let roster = [champ("Jinx", &[Tag::Marksman]), champ("Lulu", &[Tag::Support, Tag::Mage])];
        let signals = classify_threats(&roster);

        assert!(analyze_bot_lane(&signals, None, None).unwrap().damage_comparison.is_none());

        let dmg = simulate_combo(true, 0.0);
        let m = analyze_bot_lane(&signals, None, Some(&dmg)).unwrap();
        let cmp = m.damage_comparison.unwrap();
        assert_eq!(cmp.enemy_combo.description, "Jinx + Lulu");
    }

    #[test]
    fn test_difficulty_ordering() {
        assert!(Difficulty::Easy < Difficulty::Medium);
        assert!(Difficulty::Hard < Difficulty::VeryHard);
    }
}
