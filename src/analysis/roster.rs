//! Per-role champion selections
//!
//! Selections are immutable values. Each roster observation from the client
//! produces a new value plus a change flag, so repeated polls with unchanged
//! input never trigger a recomputation.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::data::{Champion, Tag};

/// Enemy lane role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    Top,
    Jungle,
    Mid,
    Bot,
    Support,
}

impl Role {
    /// Every role in slot order
    pub const ALL: [Role; 5] = [Role::Top, Role::Jungle, Role::Mid, Role::Bot, Role::Support];

    /// Map a client position string (`TOP`, `UTILITY`, ...) to a role
    pub fn from_client_position(position: &str) -> Option<Role> {
        match position {
            "TOP" => Some(Role::Top),
            "JUNGLE" => Some(Role::Jungle),
            "MIDDLE" => Some(Role::Mid),
            "BOTTOM" => Some(Role::Bot),
            "UTILITY" => Some(Role::Support),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Top => "Top",
            Role::Jungle => "Jungle",
            Role::Mid => "Mid",
            Role::Bot => "Bot",
            Role::Support => "Support",
        };
        f.write_str(name)
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "top" => Ok(Role::Top),
            "jungle" | "jg" => Ok(Role::Jungle),
            "mid" | "middle" => Ok(Role::Mid),
            "bot" | "bottom" | "adc" => Ok(Role::Bot),
            "support" | "sup" | "utility" => Ok(Role::Support),
            other => Err(format!("unknown role '{}'", other)),
        }
    }
}

/// Enemy champion per role plus the ally carry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selections {
    enemies: BTreeMap<Role, Champion>,
    ally_carry: Option<Champion>,
}

impl Selections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy with `role` set to `champion`
    pub fn with_enemy(&self, role: Role, champion: Champion) -> Self {
        let mut next = self.clone();
        next.enemies.insert(role, champion);
        next
    }

    /// Copy with the ally carry replaced
    pub fn with_ally_carry(&self, champion: Option<Champion>) -> Self {
        Self {
            enemies: self.enemies.clone(),
            ally_carry: champion,
        }
    }

    pub fn enemy(&self, role: Role) -> Option<&Champion> {
        self.enemies.get(&role)
    }

    pub fn ally_carry(&self) -> Option<&Champion> {
        self.ally_carry.as_ref()
    }

    /// Selected enemies in role order, gaps skipped
    pub fn enemies(&self) -> Vec<Champion> {
        Role::ALL
            .iter()
            .filter_map(|role| self.enemies.get(role).cloned())
            .collect()
    }

    /// Roles with an enemy assigned
    pub fn taken_roles(&self) -> BTreeSet<Role> {
        self.enemies.keys().copied().collect()
    }

    /// Whether the champion already fills any enemy role
    pub fn is_assigned(&self, champion: &Champion) -> bool {
        self.enemies.values().any(|c| c.id == champion.id)
    }

    pub fn has_enemies(&self) -> bool {
        !self.enemies.is_empty()
    }
}

/// A champion seen on the enemy team, with the role the client reported
#[derive(Debug, Clone, PartialEq)]
pub struct ObservedMember {
    pub champion: Champion,
    pub role: Option<Role>,
}

/// Guess a role from tags when the client reports none
///
/// Marksman goes bot, Support goes support, Tank or Fighter goes top,
/// Assassin or Mage goes mid, otherwise the first open slot.
pub fn infer_role(champion: &Champion, taken: &BTreeSet<Role>) -> Option<Role> {
    let open = |role: Role| !taken.contains(&role);

    let preferences = [
        (&[Tag::Marksman][..], Role::Bot),
        (&[Tag::Support][..], Role::Support),
        (&[Tag::Tank, Tag::Fighter][..], Role::Top),
        (&[Tag::Assassin, Tag::Mage][..], Role::Mid),
    ];
    for (tags, role) in preferences {
        if champion.has_any_tag(tags) && open(role) {
            return Some(role);
        }
    }

    Role::ALL.into_iter().find(|role| open(*role))
}

/// Fold one client observation into the selections
///
/// Reported roles overwrite their slot and clear any other slot the same
/// champion held, so a champion fills at most one role. Members without a role are inferred
/// only when the champion is not already assigned, otherwise every poll would
/// shift the same champion into the next open slot.
pub fn apply_observed_roster(current: &Selections, observed: &[ObservedMember]) -> (Selections, bool) {
    let mut next = current.clone();
    let mut changed = false;

    for member in observed {
        match member.role {
            Some(role) => {
                if next.enemy(role).map(|c| c.id.as_str()) != Some(member.champion.id.as_str()) {
                    debug!("{} reported in {}", member.champion.name, role);
                    next.enemies.retain(|r, c| *r == role || c.id != member.champion.id);
                    next.enemies.insert(role, member.champion.clone());
                    changed = true;
                }
            }
            None => {
                if next.is_assigned(&member.champion) {
                    continue;
                }
                if let Some(role) = infer_role(&member.champion, &next.taken_roles()) {
                    debug!("{} inferred as {}", member.champion.name, role);
                    next.enemies.insert(role, member.champion.clone());
                    changed = true;
                }
            }
        }
    }

    if changed {
        (next, true)
    } else {
        (current.clone(), false)
    }
}
