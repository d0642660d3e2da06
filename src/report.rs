//! Terminal rendering of recommendations

use serde::Serialize;

use crate::analysis::botlane::BotLaneMatchup;
use crate::analysis::catalog::{self, Item};
use crate::analysis::{Recommendation, Selections};
use crate::data::ReferenceData;

/// SCREAMING_SNAKE serde name as words ("VERY_HARD" -> "VERY HARD")
fn label<T: Serialize>(value: &T) -> String {
    serde_json::to_value(value)
        .ok()
        .and_then(|v| v.as_str().map(|s| s.replace('_', " ")))
        .unwrap_or_default()
}

fn item_line(item: &Item) -> String {
    match &item.reason {
        Some(reason) => format!("  - {} ({})", item.name, reason),
        None => format!("  - {}", item.name),
    }
}

/// Perk name from the fetched catalog, then the static one, then the id
fn perk_name(reference: &ReferenceData, id: u32) -> String {
    reference
        .rune_name(id)
        .map(str::to_string)
        .or_else(|| catalog::rune_by_id(id).map(|r| r.name.to_string()))
        .unwrap_or_else(|| id.to_string())
}

fn render_bot_lane(bot: &BotLaneMatchup, lines: &mut Vec<String>) {
    let name = |c: &Option<crate::data::Champion>| c.as_ref().map(|c| c.name.clone()).unwrap_or_else(|| "?".to_string());
    lines.push(String::new());
    lines.push(format!(
        "Bot lane vs {} + {}: {}",
        name(&bot.enemy_adc),
        name(&bot.enemy_support),
        label(&bot.matchup_difficulty)
    ));
    lines.push(format!("  Lane phase: {}", bot.lane_phase));
    lines.push(format!("  All-in: {}", bot.all_in_potential));
    for cooldown in &bot.key_cooldowns {
        lines.push(format!("  * {}", cooldown));
    }
    if let Some(cmp) = &bot.damage_comparison {
        lines.push(format!(
            "  Damage at 6: you {} ({} with R) vs them {} -> {}",
            cmp.your_combo.level6,
            cmp.your_combo.level6_with_ult,
            cmp.enemy_combo.level6,
            label(&cmp.advantage)
        ));
        for note in &cmp.notes {
            lines.push(format!("  * {}", note));
        }
    }
}

/// Multi-line report for one recommendation
pub fn render(selections: &Selections, rec: &Recommendation, reference: &ReferenceData) -> String {
    let mut lines = Vec::new();

    let enemies: Vec<String> = selections.enemies().iter().map(|c| c.name.clone()).collect();
    lines.push(format!("Enemies: {}", enemies.join(", ")));
    if let Some(ally) = selections.ally_carry() {
        lines.push(format!("Ally carry: {}", ally.name));
    }

    let dominance = &rec.dominance;
    lines.push(String::new());
    lines.push(format!(
        "Dominance: {} ({}/100) - {}",
        dominance.grade, dominance.score, dominance.title
    ));
    lines.push(format!("  {}", dominance.summary));
    lines.push(format!(
        "  Early {} | Mid {} | Late {}",
        dominance.phases.early, dominance.phases.mid, dominance.phases.late
    ));

    let build = &rec.build;
    lines.push(String::new());
    lines.push(format!("Build ({}):", label(&build.mode)));
    lines.extend(build.build_path.iter().map(item_line));
    lines.push(format!("  Spells: {}", build.spells.join(" + ")));

    let page = &rec.runes;
    lines.push(String::new());
    lines.push(format!("Runes: {}", page.name));
    for id in &page.selected_perk_ids {
        match page.reasons.get(id) {
            Some(reason) => lines.push(format!("  - {}: {}", perk_name(reference, *id), reason)),
            None => lines.push(format!("  - {}", perk_name(reference, *id))),
        }
    }

    let matchup = &rec.matchup;
    lines.push(String::new());
    lines.push(format!("{} [{} aggression]", matchup.title, label(&matchup.aggression_level)));
    lines.push(format!("  {}", matchup.description));
    lines.push(format!("  Win condition: {}", matchup.win_condition));
    if !matchup.primary_targets.is_empty() {
        lines.push(format!("  Targets: {}", matchup.primary_targets.join(", ")));
    }
    if !matchup.major_threats.is_empty() {
        lines.push(format!("  Threats: {}", matchup.major_threats.join(", ")));
    }
    for tip in &matchup.tips {
        lines.push(format!("  * {}", tip));
    }

    if let Some(damage) = &matchup.damage_analysis {
        lines.push(String::new());
        lines.push(format!(
            "Combo damage: L3 {} | L6 {} | L6+R {}",
            damage.level3_combo, damage.level6_combo, damage.level6_with_ult
        ));
        lines.push(format!("  {}", damage.kill_threshold));
    }

    if let Some(bot) = &matchup.bot_lane_matchup {
        render_bot_lane(bot, &mut lines);
    }

    lines.join("\n")
}
