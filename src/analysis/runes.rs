//! Rune page composition

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::analysis::build::Build;
use crate::analysis::catalog::{self, styles, CatalogRune};
use crate::data::{Champion, Tag};

/// Number of perk slots in a complete rune page
pub const PERK_COUNT: usize = 9;

/// Poke threats at which the secondary tree switches to sustain
const POKE_THRESHOLD: usize = 3;

/// A rune page ready for export
///
/// `selected_perk_ids` is positional: keystone, three primary minors, two
/// secondary minors, then three stat shards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunePage {
    pub primary_style_id: u32,
    pub sub_style_id: u32,
    pub selected_perk_ids: Vec<u32>,
    pub name: String,
    pub reasons: BTreeMap<u32, String>,
}

impl RunePage {
    /// Whether the page has every slot filled
    pub fn is_complete(&self) -> bool {
        self.selected_perk_ids.len() == PERK_COUNT
    }
}

fn default_reason(rune: &CatalogRune) -> String {
    rune.reason.unwrap_or(rune.name).to_string()
}

/// Vision slot perk and its justification
fn select_vision_rune(build: Option<&Build>) -> (u32, String) {
    let has_umbral = build.map(|b| b.contains(&catalog::UMBRAL_GLAIVE)).unwrap_or(false);

    if has_umbral {
        // Same perk, reworded to call out the synergy
        (
            catalog::SIXTH_SENSE.id,
            "Sixth Sense: SYNERGY! With Umbral Glaive, you'll clear many wards. Sixth Sense tracks and reveals \
             them for your team, maximizing vision control."
                .to_string(),
        )
    } else {
        (catalog::SIXTH_SENSE.id, default_reason(&catalog::SIXTH_SENSE))
    }
}

/// Secondary style id and its two minor runes with justifications
fn select_secondary(poke_threats: usize) -> (u32, [(u32, String); 2]) {
    if poke_threats >= POKE_THRESHOLD {
        (
            styles::RESOLVE,
            [
                (
                    catalog::SECOND_WIND.id,
                    format!(
                        "Second Wind: Chosen because enemy has {} poke threats. Regenerates health after taking damage.",
                        poke_threats
                    ),
                ),
                (catalog::UNFLINCHING.id, default_reason(&catalog::UNFLINCHING)),
            ],
        )
    } else {
        (
            styles::PRECISION,
            [
                (catalog::PRESENCE_OF_MIND.id, default_reason(&catalog::PRESENCE_OF_MIND)),
                (catalog::COUP_DE_GRACE.id, default_reason(&catalog::COUP_DE_GRACE)),
            ],
        )
    }
}

/// Compose the rune page for an enemy roster and optional build
pub fn compose_runes(enemies: &[Champion], build: Option<&Build>) -> RunePage {
    let mut reasons = BTreeMap::new();
    for rune in [&catalog::HAIL_OF_BLADES, &catalog::SUDDEN_IMPACT, &catalog::ULTIMATE_HUNTER] {
        reasons.insert(rune.id, default_reason(rune));
    }

    let (vision_id, vision_reason) = select_vision_rune(build);
    reasons.insert(vision_id, vision_reason);

    let poke_threats = enemies
        .iter()
        .filter(|c| c.has_any_tag(&[Tag::Mage, Tag::Marksman]))
        .count();
    let (sub_style_id, secondary) = select_secondary(poke_threats);
    let [(first_id, first_reason), (second_id, second_reason)] = secondary;
    reasons.insert(first_id, first_reason);
    reasons.insert(second_id, second_reason);

    debug!("Composed rune page: secondary style {}, {} poke threats", sub_style_id, poke_threats);

    RunePage {
        primary_style_id: styles::DOMINATION,
        sub_style_id,
        selected_perk_ids: vec![
            catalog::HAIL_OF_BLADES.id,
            catalog::SUDDEN_IMPACT.id,
            vision_id,
            catalog::ULTIMATE_HUNTER.id,
            first_id,
            second_id,
            catalog::SHARD_ADAPTIVE_FORCE.id,
            catalog::SHARD_ADAPTIVE_FORCE.id,
            catalog::SHARD_HEALTH_SCALING.id,
        ],
        name: catalog::RUNE_PAGE_NAME.to_string(),
        reasons,
    }
}
