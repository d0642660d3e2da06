//! Push recommendations into the client
//!
//! Rune pages replace any page with the same name and become the active page.
//! Item sets are written to the current summoner's set list; they are optional
//! and their failures never fail the rune export.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::analysis::build::Build;
use crate::analysis::catalog::{self, Item};
use crate::analysis::runes::{RunePage, PERK_COUNT};
use crate::client::{ClientError, Transport};

const PAGES_PATH: &str = "/lol-perks/v1/pages";
const CURRENT_SUMMONER_PATH: &str = "/lol-summoner/v1/current-summoner";

/// Item set title shown in the in-game shop
pub const ITEM_SET_TITLE: &str = catalog::RUNE_PAGE_NAME;

/// Summoner's Rift maps
const ITEM_SET_MAPS: [u32; 2] = [11, 12];

#[derive(Debug, Deserialize)]
struct ExistingPage {
    id: u64,
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CurrentSummoner {
    summoner_id: u64,
    #[serde(default)]
    account_id: u64,
}

/// Body accepted by the page creation endpoint
fn page_payload(page: &RunePage) -> Value {
    json!({
        "name": page.name,
        "primaryStyleId": page.primary_style_id,
        "subStyleId": page.sub_style_id,
        "selectedPerkIds": page.selected_perk_ids,
        "current": true,
    })
}

/// Create the rune page as current, replacing a same-named page
pub async fn export_rune_page(transport: &dyn Transport, page: &RunePage) -> Result<(), ClientError> {
    if !page.is_complete() {
        return Err(ClientError::InvalidRunePage {
            expected: PERK_COUNT,
            actual: page.selected_perk_ids.len(),
        });
    }

    let pages: Vec<ExistingPage> = transport
        .request(Method::GET, PAGES_PATH, None)
        .await
        .parse()?
        .unwrap_or_default();

    if let Some(existing) = pages.iter().find(|p| p.name == page.name) {
        let path = format!("{}/{}", PAGES_PATH, existing.id);
        if let Err(e) = transport.request(Method::DELETE, &path, None).await.into_optional() {
            warn!("Failed to delete existing page {}: {}", existing.id, e);
        }
    }

    transport
        .request(Method::POST, PAGES_PATH, Some(page_payload(page)))
        .await
        .into_value()?;

    info!("Exported rune page '{}'", page.name);
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSetItem {
    pub id: String,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSetBlock {
    #[serde(rename = "type")]
    pub title: String,
    pub items: Vec<ItemSetItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSet {
    pub uid: String,
    pub title: String,
    #[serde(rename = "type")]
    pub set_type: String,
    pub associated_champions: Vec<u32>,
    pub associated_maps: Vec<u32>,
    pub map: String,
    pub mode: String,
    pub sortrank: u32,
    pub started_from: String,
    pub preferred_item_slots: Vec<Value>,
    pub blocks: Vec<ItemSetBlock>,
}

/// Collapse repeated catalog items into counted entries
fn block(title: &str, items: &[Item]) -> ItemSetBlock {
    let mut entries: Vec<ItemSetItem> = Vec::new();
    for item in items.iter().filter(|i| catalog::item_by_id(&i.id).is_some()) {
        match entries.iter_mut().find(|e| e.id == item.id) {
            Some(entry) => entry.count += 1,
            None => entries.push(ItemSetItem {
                id: item.id.clone(),
                count: 1,
            }),
        }
    }
    ItemSetBlock {
        title: title.to_string(),
        items: entries,
    }
}

/// Shop item set for a build
pub fn build_item_set(build: &Build) -> ItemSet {
    let blocks = vec![
        block("Starter", &build.starter),
        block("Rush", &build.core[..1]),
        block("Boots", std::slice::from_ref(&build.boots)),
        block("Second Core", &build.core[1..]),
        block("Situational", &build.situational),
    ];

    ItemSet {
        uid: uuid::Uuid::new_v4().to_string(),
        title: ITEM_SET_TITLE.to_string(),
        set_type: "custom".to_string(),
        associated_champions: vec![catalog::PYKE_CHAMPION_KEY],
        associated_maps: ITEM_SET_MAPS.to_vec(),
        map: "any".to_string(),
        mode: "any".to_string(),
        sortrank: 0,
        started_from: "blank".to_string(),
        preferred_item_slots: Vec::new(),
        blocks: blocks.into_iter().filter(|b| !b.items.is_empty()).collect(),
    }
}

/// Replace the same-titled set in the summoner's item sets
pub async fn export_item_set(transport: &dyn Transport, build: &Build) -> Result<(), ClientError> {
    let summoner: CurrentSummoner = transport
        .request(Method::GET, CURRENT_SUMMONER_PATH, None)
        .await
        .parse()?
        .ok_or(ClientError::NotConnected)?;

    let sets_path = format!("/lol-item-sets/v1/item-sets/{}/sets", summoner.summoner_id);
    let existing = transport.request(Method::GET, &sets_path, None).await.into_optional()?;

    let mut item_sets: Vec<Value> = existing
        .as_ref()
        .and_then(|v| v.get("itemSets"))
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    item_sets.retain(|set| set.get("title").and_then(Value::as_str) != Some(ITEM_SET_TITLE));
    item_sets.push(serde_json::to_value(build_item_set(build))?);

    let account_id = existing
        .as_ref()
        .and_then(|v| v.get("accountId"))
        .and_then(Value::as_u64)
        .unwrap_or(summoner.account_id);
    let body = json!({
        "accountId": account_id,
        "itemSets": item_sets,
        "timestamp": 0,
    });

    transport
        .request(Method::PUT, &sets_path, Some(body))
        .await
        .into_optional()?;

    info!("Exported item set '{}'", ITEM_SET_TITLE);
    Ok(())
}

/// Export the rune page and, optionally, the item set
///
/// The item set goes first so a rejected rune page still leaves it in place.
pub async fn export_recommendation(
    transport: &dyn Transport,
    page: &RunePage,
    build: &Build,
    include_item_set: bool,
) -> Result<(), ClientError> {
    if include_item_set {
        if let Err(e) = export_item_set(transport, build).await {
            warn!("Item set export failed: {}", e);
        }
    }
    export_rune_page(transport, page).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::build::compose_build;
    use crate::analysis::runes::compose_runes;
    use crate::client::testing::{block_on, FakeTransport};
    use crate::client::LcuResponse;
    use crate::data::{Champion, Tag};

    fn roster() -> Vec<Champion> {
        vec![
            Champion::new("Nautilus", "111", "Nautilus", &[Tag::Tank, Tag::Support]),
            Champion::new("Jinx", "222", "Jinx", &[Tag::Marksman]),
        ]
    }

    fn ok(value: Value) -> LcuResponse {
        LcuResponse::Success(value)
    }

    #[test]
    fn test_rejects_incomplete_page_before_any_request() {
        let mut page = compose_runes(&roster(), None);
        page.selected_perk_ids.pop();
        let transport = FakeTransport::new();

        let err = block_on(export_rune_page(&transport, &page)).unwrap_err();
        assert!(matches!(err, ClientError::InvalidRunePage { expected: 9, actual: 8 }));
        assert!(transport.calls().is_empty());
    }

    #[test]
    fn test_replaces_same_named_page() {
        let page = compose_runes(&roster(), None);
        let transport = FakeTransport::new()
            .route(
                Method::GET,
                PAGES_PATH,
                ok(json!([{ "id": 1, "name": "Other" }, { "id": 42, "name": "Pyke Dominator" }])),
            )
            .route(Method::DELETE, "/lol-perks/v1/pages/42", ok(Value::Null))
            .route(Method::POST, PAGES_PATH, ok(json!({ "id": 43 })));

        block_on(export_rune_page(&transport, &page)).unwrap();

        let deletes = transport.calls_to(&Method::DELETE, PAGES_PATH);
        assert_eq!(deletes.len(), 1);
        assert_eq!(deletes[0].path, "/lol-perks/v1/pages/42");

        let posts = transport.calls_to(&Method::POST, PAGES_PATH);
        let body = posts[0].body.as_ref().unwrap();
        assert_eq!(body["current"], json!(true));
        assert_eq!(body["selectedPerkIds"].as_array().unwrap().len(), 9);
        assert_eq!(body["primaryStyleId"], json!(8100));
    }

    #[test]
    fn test_create_failure_is_an_error() {
        let page = compose_runes(&roster(), None);
        let transport = FakeTransport::new()
            .route(Method::GET, PAGES_PATH, ok(json!([])))
            .route(
                Method::POST,
                PAGES_PATH,
                LcuResponse::Error {
                    status: Some(400),
                    message: "Max pages reached".to_string(),
                },
            );

        let err = block_on(export_rune_page(&transport, &page)).unwrap_err();
        assert!(err.to_string().contains("Max pages reached"));
        assert!(transport.calls_to(&Method::DELETE, PAGES_PATH).is_empty());
    }

    #[test]
    fn test_item_set_blocks() {
        let build = compose_build(&roster());
        let set = build_item_set(&build);

        assert_eq!(set.associated_champions, vec![555]);
        assert_eq!(set.blocks[0].title, "Starter");
        // Two potions collapse into one entry
        assert_eq!(set.blocks[0].items[1], ItemSetItem { id: "2003".to_string(), count: 2 });
        assert_eq!(set.blocks[1].items[0].id, build.core[0].id);

        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(json["type"], json!("custom"));
        assert_eq!(json["blocks"][0]["type"], json!("Starter"));
    }

    #[test]
    fn test_item_set_replaces_previous_and_keeps_others() {
        let build = compose_build(&roster());
        let transport = FakeTransport::new()
            .route(
                Method::GET,
                CURRENT_SUMMONER_PATH,
                ok(json!({ "summonerId": 7, "accountId": 70 })),
            )
            .route(
                Method::GET,
                "/lol-item-sets/v1/item-sets/7/sets",
                ok(json!({ "accountId": 70, "itemSets": [{ "title": "Pyke Dominator" }, { "title": "Mine" }] })),
            )
            .route(Method::PUT, "/lol-item-sets/v1/item-sets/7/sets", ok(Value::Null));

        block_on(export_item_set(&transport, &build)).unwrap();

        let put = &transport.calls_to(&Method::PUT, "/lol-item-sets")[0];
        let sets = put.body.as_ref().unwrap()["itemSets"].as_array().unwrap().clone();
        assert_eq!(sets.len(), 2);
        assert_eq!(sets[0]["title"], json!("Mine"));
        assert_eq!(sets[1]["title"], json!("Pyke Dominator"));
    }

    #[test]
    fn test_item_set_failure_does_not_block_runes() {
        let build = compose_build(&roster());
        let page = compose_runes(&roster(), Some(&build));
        let transport = FakeTransport::new()
            .route(Method::GET, PAGES_PATH, ok(json!([])))
            .route(Method::POST, PAGES_PATH, ok(json!({ "id": 1 })));

        // No summoner route: the item set step fails with a 404
        block_on(export_recommendation(&transport, &page, &build, true)).unwrap();
        assert_eq!(transport.calls_to(&Method::POST, PAGES_PATH).len(), 1);
        assert!(transport.calls_to(&Method::PUT, "/lol-item-sets").is_empty());
    }
}
