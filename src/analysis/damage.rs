//! Combo damage simulation
//!
//! Flat-number estimates for the protagonist's all-in at level 3 and level 6,
//! and a 2v2 bot lane comparison against per-champion lookup tables.

use serde::{Deserialize, Serialize};

use crate::data::Champion;

/// Per-rank base damage of the abilities used in a combo
struct AbilityTable {
    q_base: [f64; 5],
    q_scaling: f64,
    e_base: [f64; 5],
    e_scaling: f64,
    r_base: [f64; 3],
    r_scaling: f64,
}

const PYKE: AbilityTable = AbilityTable {
    q_base: [85.0, 135.0, 185.0, 235.0, 285.0],
    q_scaling: 0.6,
    e_base: [95.0, 125.0, 155.0, 185.0, 215.0],
    e_scaling: 1.0,
    r_base: [250.0, 290.0, 330.0],
    r_scaling: 0.8,
};

/// Auto attack damage woven into the level 3 combo
const LEVEL3_AUTOS: f64 = 50.0;
/// Auto attack damage woven into the level 6 combo
const LEVEL6_AUTOS: f64 = 75.0;

/// R executes below this fraction of missing health at rank 1
const R_EXECUTE_MISSING_HP: f64 = 0.25;
/// Q threshold used when R is down, as a fraction of max health at rank 2
const Q_EXECUTE_MAX_HP: f64 = 0.175;

/// Damage a champion deals in a short trade at two level snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageEstimate {
    pub level3: u32,
    pub level6: u32,
}

impl DamageEstimate {
    const fn new(level3: u32, level6: u32) -> Self {
        Self { level3, level6 }
    }

    /// Estimate at the given level; anything past 3 uses the level 6 value
    pub fn at(&self, level: u32) -> u32 {
        if level <= 3 {
            self.level3
        } else {
            self.level6
        }
    }
}

const ADC_DAMAGE: &[(&str, DamageEstimate)] = &[
    ("Jinx", DamageEstimate::new(180, 320)),
    ("Caitlyn", DamageEstimate::new(200, 380)),
    ("Ezreal", DamageEstimate::new(220, 400)),
    ("Lucian", DamageEstimate::new(250, 450)),
    ("Vayne", DamageEstimate::new(200, 380)),
    ("Ashe", DamageEstimate::new(180, 320)),
    ("Varus", DamageEstimate::new(200, 360)),
    ("Tristana", DamageEstimate::new(240, 420)),
    ("KogMaw", DamageEstimate::new(190, 340)),
    ("Twitch", DamageEstimate::new(200, 360)),
];
const ADC_FALLBACK: DamageEstimate = DamageEstimate::new(200, 350);

const SUPPORT_DAMAGE: &[(&str, DamageEstimate)] = &[
    ("Lulu", DamageEstimate::new(120, 200)),
    ("Janna", DamageEstimate::new(100, 180)),
    ("Karma", DamageEstimate::new(180, 300)),
    ("Nami", DamageEstimate::new(150, 250)),
    ("Soraka", DamageEstimate::new(80, 140)),
    ("Thresh", DamageEstimate::new(200, 350)),
    ("Blitzcrank", DamageEstimate::new(220, 380)),
    ("Nautilus", DamageEstimate::new(200, 350)),
    ("Leona", DamageEstimate::new(180, 320)),
    ("Pyke", DamageEstimate::new(250, 450)),
];
const SUPPORT_FALLBACK: DamageEstimate = DamageEstimate::new(150, 250);

/// Used for the ally carry when none is selected
const UNSELECTED_ADC: DamageEstimate = DamageEstimate::new(180, 320);

fn lookup(table: &[(&str, DamageEstimate)], id: &str, fallback: DamageEstimate) -> DamageEstimate {
    table
        .iter()
        .find(|(name, _)| *name == id)
        .map(|(_, estimate)| *estimate)
        .unwrap_or(fallback)
}

/// Estimated trade damage of a marksman at a level
pub fn estimate_adc_damage(champion_id: &str, level: u32) -> u32 {
    lookup(ADC_DAMAGE, champion_id, ADC_FALLBACK).at(level)
}

/// Estimated trade damage of a support at a level
pub fn estimate_support_damage(champion_id: &str, level: u32) -> u32 {
    lookup(SUPPORT_DAMAGE, champion_id, SUPPORT_FALLBACK).at(level)
}

/// The protagonist's combo damage at fixed snapshots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DamageAnalysis {
    pub level3_combo: u32,
    pub level6_combo: u32,
    pub level6_with_ult: u32,
    pub kill_threshold: String,
    pub notes: Vec<String>,
}

fn round(value: f64) -> u32 {
    value.round().max(0.0) as u32
}

/// Simulate the all-in combo
///
/// Level 3 is Q1 + E1 + autos, level 6 is Q2 + E3 + autos, and the ultimate
/// snapshot adds R1 on top. `bonus_ad` scales every ability linearly.
pub fn simulate_combo(has_ult: bool, bonus_ad: f64) -> DamageAnalysis {
    let level3 = PYKE.q_base[0] + PYKE.q_scaling * bonus_ad + PYKE.e_base[0] + PYKE.e_scaling * bonus_ad + LEVEL3_AUTOS;
    let level6 = PYKE.q_base[1] + PYKE.q_scaling * bonus_ad + PYKE.e_base[2] + PYKE.e_scaling * bonus_ad + LEVEL6_AUTOS;
    let level6_ult = level6 + PYKE.r_base[0] + PYKE.r_scaling * bonus_ad;

    let kill_threshold = if has_ult {
        format!(
            "R execute threshold: ~{} HP (25% missing HP)",
            round(level6_ult * R_EXECUTE_MISSING_HP)
        )
    } else {
        format!("Q execute threshold: ~{} HP (17.5% max HP)", round(level6 * Q_EXECUTE_MAX_HP))
    };

    DamageAnalysis {
        level3_combo: round(level3),
        level6_combo: round(level6),
        level6_with_ult: round(level6_ult),
        kill_threshold,
        notes: vec![
            format!("Level 3 all-in: ~{} damage (Q + E + autos)", round(level3)),
            format!("Level 6 all-in: ~{} damage without ult", round(level6)),
            format!("Level 6 with R: ~{} damage + execute", round(level6_ult)),
            "Damage assumes Q is fully charged and E hits both targets".to_string(),
            "Hail of Blades adds ~150-200 extra damage from 3 quick autos".to_string(),
        ],
    }
}

/// Outcome of the 2v2 damage comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Advantage {
    Favorable,
    Even,
    Unfavorable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnemyCombo {
    pub level3: u32,
    pub level6: u32,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YourCombo {
    pub level3: u32,
    pub level6: u32,
    pub level6_with_ult: u32,
    pub description: String,
}

/// Enemy bot lane versus ally carry plus protagonist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotLaneDamageComparison {
    pub enemy_combo: EnemyCombo,
    pub your_combo: YourCombo,
    pub advantage: Advantage,
    pub notes: Vec<String>,
}

/// Favorable if the ult combo wins, even if the plain combo still wins
pub fn classify_advantage(your_level6: u32, your_level6_with_ult: u32, enemy_level6: u32) -> Advantage {
    if your_level6_with_ult > enemy_level6 {
        Advantage::Favorable
    } else if your_level6 > enemy_level6 {
        Advantage::Even
    } else {
        Advantage::Unfavorable
    }
}

/// Compare both bot lanes' burst at level 3 and level 6
pub fn compare_bot_lane(
    enemy_adc: Option<&Champion>,
    enemy_support: Option<&Champion>,
    your_adc: Option<&Champion>,
    pyke: &DamageAnalysis,
) -> BotLaneDamageComparison {
    let enemy_at = |level: u32| {
        enemy_adc.map(|c| estimate_adc_damage(&c.id, level)).unwrap_or(0)
            + enemy_support.map(|c| estimate_support_damage(&c.id, level)).unwrap_or(0)
    };
    let enemy_level3 = enemy_at(3);
    let enemy_level6 = enemy_at(6);

    let ally = your_adc
        .map(|c| lookup(ADC_DAMAGE, &c.id, ADC_FALLBACK))
        .unwrap_or(UNSELECTED_ADC);
    let your_level3 = pyke.level3_combo + ally.level3;
    let your_level6 = pyke.level6_combo + ally.level6;
    let your_level6_ult = pyke.level6_with_ult + ally.level6;

    let advantage = classify_advantage(your_level6, your_level6_ult, enemy_level6);
    let verdict = match advantage {
        Advantage::Favorable => "You win extended 2v2 trades",
        Advantage::Even => "2v2 trades are skill-dependent",
        Advantage::Unfavorable => "Avoid extended 2v2 trades, look for picks",
    };

    BotLaneDamageComparison {
        enemy_combo: EnemyCombo {
            level3: enemy_level3,
            level6: enemy_level6,
            description: format!(
                "{} + {}",
                enemy_adc.map(|c| c.name.as_str()).unwrap_or("Enemy ADC"),
                enemy_support.map(|c| c.name.as_str()).unwrap_or("Enemy Support")
            ),
        },
        your_combo: YourCombo {
            level3: your_level3,
            level6: your_level6,
            level6_with_ult: your_level6_ult,
            description: format!("{} + Pyke", your_adc.map(|c| c.name.as_str()).unwrap_or("Your ADC")),
        },
        advantage,
        notes: vec![
            format!("Enemy 2v2 damage at level 3: ~{}", enemy_level3),
            format!("Your 2v2 damage at level 3: ~{}", your_level3),
            format!("Enemy 2v2 damage at level 6: ~{}", enemy_level6),
            format!("Your 2v2 damage at level 6: ~{}", your_level6),
            format!("Your 2v2 damage at level 6 with ult: ~{}", your_level6_ult),
            verdict.to_string(),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Tag;

    #[test]
    fn test_combo_numbers_without_bonus_ad() {
        let dmg = simulate_combo(true, 0.0);
        assert_eq!(dmg.level3_combo, 230);
        assert_eq!(dmg.level6_combo, 365);
        assert_eq!(dmg.level6_with_ult, 615);
        assert_eq!(dmg.kill_threshold, "R execute threshold: ~154 HP (25% missing HP)");
    }

    #[test]
    fn test_threshold_without_ult_uses_max_hp() {
        let dmg = simulate_combo(false, 0.0);
        assert_eq!(dmg.kill_threshold, "Q execute threshold: ~64 HP (17.5% max HP)");
        assert_eq!(dmg.level6_with_ult, 615);
    }

    #[test]
    fn test_bonus_ad_scales_linearly() {
        let dmg = simulate_combo(true, 100.0);
        // +60 from Q and +100 from E
        assert_eq!(dmg.level3_combo, 390);
        assert_eq!(dmg.level6_with_ult, 615 + 160 + 80);
    }

    #[test]
    fn test_methodology_notes_present() {
        let dmg = simulate_combo(true, 0.0);
        assert_eq!(dmg.notes.len(), 5);
        assert_eq!(dmg.notes[0], "Level 3 all-in: ~230 damage (Q + E + autos)");
        assert_eq!(dmg.notes[1], "Level 6 all-in: ~365 damage without ult");
        assert_eq!(dmg.notes[2], "Level 6 with R: ~615 damage + execute");
        assert!(dmg.notes.iter().any(|n| n.contains("Q is fully charged")));
        assert!(dmg.notes.iter().any(|n| n.contains("Hail of Blades")));
    }

    #[test]
    fn test_lookup_tables_and_fallbacks() {
        assert_eq!(estimate_adc_damage("Lucian", 3), 250);
        assert_eq!(estimate_adc_damage("Lucian", 6), 450);
        assert_eq!(estimate_adc_damage("Aphelios", 3), 200);
        assert_eq!(estimate_adc_damage("Aphelios", 6), 350);
        assert_eq!(estimate_support_damage("Soraka", 6), 140);
        assert_eq!(estimate_support_damage("Rakan", 3), 150);
    }

    #[test]
    fn test_compare_defaults_ally_carry() {
        let jinx = Champion::new("Jinx", "222", "Jinx", &[Tag::Marksman]);
        let lulu = Champion::new("Lulu", "117", "Lulu", &[Tag::Support, Tag::Mage]);
        let pyke = simulate_combo(true, 0.0);

        let cmp = compare_bot_lane(Some(&jinx), Some(&lulu), None, &pyke);
        assert_eq!(cmp.enemy_combo.level3, 300);
        assert_eq!(cmp.enemy_combo.level6, 520);
        assert_eq!(cmp.enemy_combo.description, "Jinx + Lulu");
        assert_eq!(cmp.your_combo.level6, 365 + 320);
        assert_eq!(cmp.your_combo.description, "Your ADC + Pyke");
        assert_eq!(cmp.advantage, Advantage::Favorable);
        assert_eq!(cmp.notes.last().map(String::as_str), Some("You win extended 2v2 trades"));
    }

    #[test]
    fn test_compare_missing_enemy_support() {
        let cait = Champion::new("Caitlyn", "51", "Caitlyn", &[Tag::Marksman]);
        let pyke = simulate_combo(true, 0.0);

        let cmp = compare_bot_lane(Some(&cait), None, Some(&cait), &pyke);
        assert_eq!(cmp.enemy_combo.level6, 380);
        assert_eq!(cmp.enemy_combo.description, "Caitlyn + Enemy Support");
        assert_eq!(cmp.your_combo.level3, 230 + 200);
    }

    #[test]
    fn test_advantage_is_strict_three_way() {
        assert_eq!(classify_advantage(400, 600, 599), Advantage::Favorable);
        assert_eq!(classify_advantage(400, 600, 600), Advantage::Even);
        assert_eq!(classify_advantage(400, 600, 399), Advantage::Favorable);
        assert_eq!(classify_advantage(600, 600, 600), Advantage::Unfavorable);
        assert_eq!(classify_advantage(601, 500, 600), Advantage::Even);
    }

    #[test]
    fn test_favorable_iff_ult_combo_wins() {
        let pyke = simulate_combo(true, 0.0);
        let supports = ["Lulu", "Pyke", "Blitzcrank", "Soraka", "Unknown"];
        let adcs = ["Jinx", "Lucian", "Ezreal", "Unknown"];

        for adc in adcs {
            for supp in supports {
                let a = Champion::new(adc, "0", adc, &[Tag::Marksman]);
                let s = Champion::new(supp, "0", supp, &[Tag::Support]);
                let cmp = compare_bot_lane(Some(&a), Some(&s), None, &pyke);
                assert_eq!(
                    cmp.advantage == Advantage::Favorable,
                    cmp.your_combo.level6_with_ult > cmp.enemy_combo.level6
                );
            }
        }
    }
}
