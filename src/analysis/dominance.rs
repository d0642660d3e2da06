//! Dominance scoring
//!
//! A 0-100 summary of how well the protagonist plays into the enemy roster,
//! computed per game phase from the threat counters and blended into a grade.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::analysis::build::Build;
use crate::analysis::catalog;
use crate::analysis::threats::{classify_threats, ThreatSignals};
use crate::data::Champion;

const EARLY_WEIGHT: f64 = 0.40;
const MID_WEIGHT: f64 = 0.35;
const LATE_WEIGHT: f64 = 0.25;

/// Penalty per suppression champion; halved when the cleanse item is built
const SUPPRESSION_PENALTY: i32 = 10;

/// Letter grade, ordered from worst
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    D,
    C,
    B,
    A,
    S,
    #[serde(rename = "S+")]
    SPlus,
}

impl Grade {
    /// Map a score to its band; scores above 100 land in the top band
    pub fn from_score(score: u32) -> Grade {
        match score {
            90.. => Grade::SPlus,
            80..=89 => Grade::S,
            70..=79 => Grade::A,
            55..=69 => Grade::B,
            40..=54 => Grade::C,
            _ => Grade::D,
        }
    }

    fn headline(&self) -> (&'static str, &'static str) {
        match self {
            Grade::SPlus => (
                "Total Domination",
                "The enemy team is built to be hooked. Every fight you start should end in a reset.",
            ),
            Grade::S => (
                "Dominant",
                "You outclass this roster in most phases. Play proactively and snowball your lanes.",
            ),
            Grade::A => (
                "Favored",
                "Plenty of targets to punish. Pick your engages and the game leans your way.",
            ),
            Grade::B => (
                "Playable",
                "An even matchup. Trade on cooldowns and look for picks rather than forcing fights.",
            ),
            Grade::C => (
                "Uphill",
                "The enemy can absorb or escape your burst. Roam and set up vision instead of diving.",
            ),
            Grade::D => (
                "Counter-picked",
                "This roster shuts your kit down. Survive lane, peel for your carry and avoid coin flips.",
            ),
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Grade::SPlus => "S+",
            Grade::S => "S",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseScores {
    pub early: u32,
    pub mid: u32,
    pub late: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DominanceMetrics {
    pub score: u32,
    pub grade: Grade,
    pub phases: PhaseScores,
    pub title: String,
    pub summary: String,
}

fn clamp_phase(value: i32) -> u32 {
    value.clamp(0, 100) as u32
}

/// Phase scores from threat counters
pub fn phase_scores(signals: &ThreatSignals, has_cleanse: bool) -> PhaseScores {
    let squishy = signals.squishy_threats as i32;
    let cc = signals.cc_threats as i32;
    let tanks = signals.tank_threats as i32;
    let magic = signals.magic_threats as i32;
    let healing = signals.healing_threats as i32;
    let shield = signals.shield_threats as i32;

    let mut suppression = SUPPRESSION_PENALTY * signals.suppression_threats as i32;
    if has_cleanse {
        suppression /= 2;
    }

    PhaseScores {
        early: clamp_phase(55 + 9 * squishy - 7 * cc - 4 * shield - suppression),
        mid: clamp_phase(60 + 7 * squishy - 6 * tanks - 3 * magic - suppression),
        late: clamp_phase(45 + 5 * squishy - 8 * tanks - 4 * healing - 4 * shield),
    }
}

/// Weighted blend of the phases, rounded
pub fn composite_score(phases: &PhaseScores) -> u32 {
    let blended =
        EARLY_WEIGHT * phases.early as f64 + MID_WEIGHT * phases.mid as f64 + LATE_WEIGHT * phases.late as f64;
    (blended.round() as u32).min(100)
}

/// Score the matchup against an enemy roster
pub fn score_dominance(enemies: &[Champion], build: Option<&Build>) -> DominanceMetrics {
    let signals = classify_threats(enemies);
    let has_cleanse = build
        .map(|b| b.contains(&catalog::MERCURIAL_SCIMITAR))
        .unwrap_or(false);

    let phases = phase_scores(&signals, has_cleanse);
    let score = composite_score(&phases);
    let grade = Grade::from_score(score);
    debug!("Dominance {} ({}): {:?}", score, grade, phases);

    let (title, summary) = grade.headline();
    DominanceMetrics {
        score,
        grade,
        phases,
        title: title.to_string(),
        summary: summary.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::build::compose_build;
    use crate::data::Tag;

    fn champ(id: &str, tags: &[Tag]) -> Champion {
        Champion::new(id, "0", id, tags)
    }

    #[test]
    fn test_grade_total_and_monotonic() {
        let mut previous = Grade::D;
        for score in 0..=100 {
            let grade = Grade::from_score(score);
            assert!(grade >= previous, "grade dropped at {}", score);
            previous = grade;
        }
        assert_eq!(Grade::from_score(0), Grade::D);
        assert_eq!(Grade::from_score(100), Grade::SPlus);
    }

    #[test]
    fn test_grade_band_edges() {
        assert_eq!(Grade::from_score(90), Grade::SPlus);
        assert_eq!(Grade::from_score(89), Grade::S);
        assert_eq!(Grade::from_score(80), Grade::S);
        assert_eq!(Grade::from_score(79), Grade::A);
        assert_eq!(Grade::from_score(70), Grade::A);
        assert_eq!(Grade::from_score(69), Grade::B);
        assert_eq!(Grade::from_score(55), Grade::B);
        assert_eq!(Grade::from_score(54), Grade::C);
        assert_eq!(Grade::from_score(40), Grade::C);
        assert_eq!(Grade::from_score(39), Grade::D);
    }

    #[test]
    fn test_empty_roster_baseline() {
        let metrics = score_dominance(&[], None);
        assert_eq!(metrics.phases, PhaseScores { early: 55, mid: 60, late: 45 });
        // 22 + 21 + 11.25
        assert_eq!(metrics.score, 54);
        assert_eq!(metrics.grade, Grade::C);
    }

    #[test]
    fn test_squishy_roster_scores_higher_than_tanky() {
        let squishy = [
            champ("Jinx", &[Tag::Marksman]),
            champ("Lux", &[Tag::Mage, Tag::Support]),
            champ("Zed", &[Tag::Assassin]),
            champ("Xerath", &[Tag::Mage]),
            champ("Ezreal", &[Tag::Marksman]),
        ];
        let tanky = [
            champ("Nautilus", &[Tag::Tank, Tag::Support]),
            champ("Leona", &[Tag::Tank, Tag::Support]),
            champ("Sion", &[Tag::Tank, Tag::Fighter]),
            champ("Sett", &[Tag::Fighter, Tag::Tank]),
            champ("Jinx", &[Tag::Marksman]),
        ];

        let high = score_dominance(&squishy, None);
        let low = score_dominance(&tanky, None);
        assert!(high.score > low.score);
        assert!(high.grade > low.grade);
    }

    #[test]
    fn test_monotonic_in_squishies() {
        let mut signals = ThreatSignals::default();
        let mut last = composite_score(&phase_scores(&signals, false));
        for _ in 0..5 {
            signals.squishy_threats += 1;
            let next = composite_score(&phase_scores(&signals, false));
            assert!(next >= last);
            last = next;
        }
    }

    #[test]
    fn test_cleanse_halves_suppression_penalty() {
        let mut signals = ThreatSignals::default();
        signals.suppression_threats = 1;

        let bare = phase_scores(&signals, false);
        let cleansed = phase_scores(&signals, true);
        assert_eq!(bare.early, 45);
        assert_eq!(cleansed.early, 50);
        assert_eq!(bare.late, cleansed.late);
    }

    #[test]
    fn test_cleanse_read_from_build() {
        let roster = [champ("Malzahar", &[Tag::Mage, Tag::Assassin]), champ("Warwick", &[Tag::Fighter, Tag::Tank])];
        let build = compose_build(&roster);
        assert!(build.contains(&catalog::MERCURIAL_SCIMITAR));

        let with_build = score_dominance(&roster, Some(&build));
        let without = score_dominance(&roster, None);
        assert!(with_build.phases.early > without.phases.early);
    }

    #[test]
    fn test_grade_serializes_as_letter() {
        assert_eq!(serde_json::to_string(&Grade::SPlus).unwrap(), "\"S+\"");
        assert_eq!(Grade::SPlus.to_string(), "S+");
    }
}
