//! Recommendation Engine
//!
//! Pure functions from an enemy roster (plus an optional ally carry) to an
//! item build, a rune page, a matchup plan and a dominance score. Nothing in
//! here performs I/O or holds state between calls.

pub mod botlane;
pub mod build;
pub mod catalog;
pub mod damage;
pub mod dominance;
pub mod matchup;
pub mod roster;
pub mod runes;
pub mod threats;

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use build::{compose_build, Build};
pub use dominance::{score_dominance, DominanceMetrics, Grade};
pub use matchup::{analyze_matchup, MatchupAnalysis};
pub use roster::{apply_observed_roster, infer_role, ObservedMember, Role, Selections};
pub use runes::{compose_runes, RunePage};

/// Every engine output for one set of selections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub build: Build,
    pub runes: RunePage,
    pub matchup: MatchupAnalysis,
    pub dominance: DominanceMetrics,
}

/// Run every composer; `None` when no enemy is selected
pub fn recommend(selections: &Selections) -> Option<Recommendation> {
    if !selections.has_enemies() {
        return None;
    }

    let enemies = selections.enemies();
    debug!("Recomputing recommendation for {} enemies", enemies.len());

    let build = compose_build(&enemies);
    let runes = compose_runes(&enemies, Some(&build));
    let matchup = analyze_matchup(&enemies, Some(&build), selections.ally_carry());
    let dominance = score_dominance(&enemies, Some(&build));

    Some(Recommendation {
        build,
        runes,
        matchup,
        dominance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Champion, Tag};

    fn champ(id: &str, tags: &[Tag]) -> Champion {
        Champion::new(id, "0", id, tags)
    }

    fn tank_selections() -> Selections {
        Selections::new()
            .with_enemy(Role::Top, champ("Amumu", &[Tag::Tank, Tag::Mage]))
            .with_enemy(Role::Mid, champ("Zed", &[Tag::Assassin]))
            .with_enemy(Role::Bot, champ("Jinx", &[Tag::Marksman]))
            .with_enemy(Role::Support, champ("Nautilus", &[Tag::Tank, Tag::Support]))
            .with_enemy(Role::Jungle, champ("Leona", &[Tag::Tank, Tag::Support]))
    }

    #[test]
    fn test_no_enemies_no_recommendation() {
        assert!(recommend(&Selections::new()).is_none());

        let ally_only = Selections::new().with_ally_carry(Some(champ("Jinx", &[Tag::Marksman])));
        assert!(recommend(&ally_only).is_none());
    }

    #[test]
    fn test_tank_roster_scenario() {
        let rec = recommend(&tank_selections()).unwrap();

        assert!(rec.build.boots.is(&catalog::MERCURYS_TREADS));
        assert_eq!(rec.build.mode, build::BuildMode::Control);
        assert_eq!(rec.matchup.title, "ROAMING DISRUPTOR");
        assert_eq!(rec.runes.selected_perk_ids.len(), runes::PERK_COUNT);
        // Umbral Glaive is rushed, so the vision rune is reworded
        assert!(rec.runes.reasons[&catalog::SIXTH_SENSE.id].contains("SYNERGY"));
    }

    #[test]
    fn test_ally_carry_reaches_matchup() {
        let selections = tank_selections().with_ally_carry(Some(champ("Lucian", &[Tag::Marksman])));
        let rec = recommend(&selections).unwrap();

        let cmp = rec.matchup.bot_lane_matchup.unwrap().damage_comparison.unwrap();
        assert_eq!(cmp.your_combo.description, "Lucian + Pyke");
    }

    #[test]
    fn test_recompute_is_structurally_equal() {
        let selections = tank_selections();
        let first = recommend(&selections).unwrap();
        let second = recommend(&selections).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_composers_total_on_empty_roster() {
        let build = compose_build(&[]);
        let page = compose_runes(&[], Some(&build));
        let matchup = analyze_matchup(&[], Some(&build), None);
        let dominance = score_dominance(&[], Some(&build));

        assert_eq!(build.core.len(), 2);
        assert_eq!(page.selected_perk_ids.len(), runes::PERK_COUNT);
        assert!(matchup.primary_targets.is_empty());
        assert!(dominance.score <= 100);
    }
}
