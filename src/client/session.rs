//! Champion select session

use reqwest::Method;
use serde::Deserialize;

use crate::analysis::{ObservedMember, Role};
use crate::client::{ClientError, Transport};
use crate::data::ReferenceData;

pub const SESSION_PATH: &str = "/lol-champ-select/v1/session";

/// One enemy slot as the client reports it
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    #[serde(default)]
    pub champion_id: Option<i64>,
    #[serde(default)]
    pub assigned_position: Option<String>,
    #[serde(default)]
    pub team_position: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
}

impl TeamMember {
    /// First non-empty position field, mapped to a role
    pub fn reported_role(&self) -> Option<Role> {
        [&self.assigned_position, &self.team_position, &self.position]
            .into_iter()
            .flatten()
            .find(|p| !p.is_empty())
            .and_then(|p| Role::from_client_position(p))
    }

    /// Champion id if one is hovered or locked
    pub fn picked_champion(&self) -> Option<i64> {
        self.champion_id.filter(|id| *id != 0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChampSelectSession {
    #[serde(default)]
    pub their_team: Vec<TeamMember>,
}

impl ChampSelectSession {
    /// Enemy picks resolved against the champion catalog
    ///
    /// Empty slots and keys missing from the catalog are skipped.
    pub fn observed_members(&self, reference: &ReferenceData) -> Vec<ObservedMember> {
        self.their_team
            .iter()
            .filter_map(|member| {
                let key = member.picked_champion()?.to_string();
                let champion = reference.champion_by_key(&key)?.clone();
                Some(ObservedMember {
                    champion,
                    role: member.reported_role(),
                })
            })
            .collect()
    }
}

/// Current session; `None` outside champion select
pub async fn fetch_session(transport: &dyn Transport) -> Result<Option<ChampSelectSession>, ClientError> {
    transport.request(Method::GET, SESSION_PATH, None).await.parse()
}
