//! Static data provider backed by the Data Dragon CDN
//!
//! Fetches the champion list and rune catalog for the latest patch. Results are
//! memoized for the lifetime of the provider and mirrored to an on-disk cache so
//! the tool keeps working offline. Every failure degrades to older or empty data
//! instead of erroring, since the recommendation engine accepts an empty catalog.

use anyhow::{Context, Result};
use parking_lot::RwLock;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::DataConfig;
use crate::data::runes::{flatten_trees, RuneData, RuneTree};
use crate::data::{determine_damage_type, Champion, ChampionInfo, ReferenceData, Tag};
use crate::storage::reference_cache;

/// Set this environment variable to skip all network requests
pub const OFFLINE_ENV: &str = "PYKE_DOMINATOR_OFFLINE";

/// Raw champion entry inside `champion.json`
#[derive(Debug, Deserialize)]
struct ChampionEntry {
    id: String,
    key: String,
    name: String,
    #[serde(default)]
    tags: Vec<Tag>,
    #[serde(default)]
    info: Option<ChampionInfo>,
}

/// Top level of `champion.json`
#[derive(Debug, Deserialize)]
struct ChampionFile {
    data: HashMap<String, ChampionEntry>,
}

/// Parse `champion.json` into champions sorted by display name
pub fn parse_champion_file(json: &str) -> Result<Vec<Champion>> {
    let file: ChampionFile = serde_json::from_str(json).context("Malformed champion.json")?;

    let mut champions: Vec<Champion> = file
        .data
        .into_values()
        .map(|entry| {
            let damage_type = determine_damage_type(&entry.tags, entry.info);
            Champion {
                id: entry.id,
                key: entry.key,
                name: entry.name,
                tags: entry.tags,
                damage_type: Some(damage_type),
            }
        })
        .collect();

    champions.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(champions)
}

/// Parse `runesReforged.json` into a perk id -> rune map
pub fn parse_rune_file(json: &str) -> Result<BTreeMap<u32, RuneData>> {
    let trees: Vec<RuneTree> = serde_json::from_str(json).context("Malformed runesReforged.json")?;
    Ok(flatten_trees(trees))
}

/// Data Dragon client with a per-process memo cache
pub struct DataDragon {
    client: reqwest::Client,
    config: DataConfig,
    cache_dir: Option<PathBuf>,
    memo: RwLock<Option<Arc<ReferenceData>>>,
}

impl DataDragon {
    /// Create a provider; `cache_dir` enables the on-disk mirror
    pub fn new(config: DataConfig, cache_dir: Option<PathBuf>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            config,
            cache_dir,
            memo: RwLock::new(None),
        })
    }

    fn is_offline() -> bool {
        std::env::var(OFFLINE_ENV).is_ok()
    }

    fn cdn_url(&self, path: &str) -> String {
        format!("{}{}", self.config.ddragon_base_url.trim_end_matches('/'), path)
    }

    /// Latest patch version, or the configured fallback if the lookup fails
    pub async fn latest_version(&self) -> String {
        if Self::is_offline() {
            return self.config.fallback_version.clone();
        }

        match self.fetch_latest_version().await {
            Ok(version) => version,
            Err(e) => {
                warn!("Failed to fetch latest version, using fallback: {:#}", e);
                self.config.fallback_version.clone()
            }
        }
    }

    async fn fetch_latest_version(&self) -> Result<String> {
        let versions: Vec<String> = self
            .client
            .get(self.cdn_url("/api/versions.json"))
            .send()
            .await
            .context("Failed to request version list")?
            .error_for_status()?
            .json()
            .await
            .context("Malformed version list")?;

        versions
            .into_iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("Version list is empty"))
    }

    async fn fetch_text(&self, path: &str) -> Result<String> {
        let url = self.cdn_url(path);
        debug!("GET {}", url);
        let body = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to request {}", url))?
            .error_for_status()?
            .text()
            .await?;
        Ok(body)
    }

    /// Fetch the champion list for a patch version
    pub async fn fetch_champions(&self, version: &str) -> Result<Vec<Champion>> {
        let body = self
            .fetch_text(&format!("/cdn/{}/data/{}/champion.json", version, self.config.locale))
            .await?;
        parse_champion_file(&body)
    }

    /// Fetch the rune catalog for a patch version
    pub async fn fetch_runes(&self, version: &str) -> Result<BTreeMap<u32, RuneData>> {
        let body = self
            .fetch_text(&format!("/cdn/{}/data/{}/runesReforged.json", version, self.config.locale))
            .await?;
        parse_rune_file(&body)
    }

    /// Load reference data, memoized after the first successful call
    pub async fn load(&self) -> Arc<ReferenceData> {
        if let Some(cached) = self.memo.read().as_ref() {
            return cached.clone();
        }

        let data = Arc::new(self.load_uncached().await);
        if !data.is_empty() {
            *self.memo.write() = Some(data.clone());
        }
        data
    }

    async fn load_uncached(&self) -> ReferenceData {
        let version = self.latest_version().await;

        if !Self::is_offline() {
            match self.fetch_all(&version).await {
                Ok(data) => {
                    info!(
                        "Loaded {} champions and {} runes for patch {}",
                        data.champions.len(),
                        data.runes.len(),
                        data.version
                    );
                    self.store_disk_cache(&data);
                    return data;
                }
                Err(e) => warn!("Failed to fetch reference data: {:#}", e),
            }
        }

        match self.read_disk_cache(&version) {
            Some(data) => {
                info!("Using cached reference data for patch {}", data.version);
                data
            }
            None => {
                warn!("No reference data available, continuing with an empty catalog");
                ReferenceData {
                    version,
                    ..ReferenceData::default()
                }
            }
        }
    }

    async fn fetch_all(&self, version: &str) -> Result<ReferenceData> {
        let champions = self.fetch_champions(version).await?;
        // Rune metadata is display-only
        let runes = match self.fetch_runes(version).await {
            Ok(runes) => runes,
            Err(e) => {
                warn!("Failed to fetch runes: {:#}", e);
                BTreeMap::new()
            }
        };

        Ok(ReferenceData {
            version: version.to_string(),
            champions,
            runes,
        })
    }

    fn store_disk_cache(&self, data: &ReferenceData) {
        if !self.config.use_disk_cache {
            return;
        }
        if let Some(dir) = &self.cache_dir {
            if let Err(e) = reference_cache::save(dir, data) {
                warn!("Failed to write reference cache: {:#}", e);
            }
        }
    }

    fn read_disk_cache(&self, version: &str) -> Option<ReferenceData> {
        if !self.config.use_disk_cache {
            return None;
        }
        let dir = self.cache_dir.as_ref()?;
        match reference_cache::load(dir, Some(version)) {
            Ok(Some(data)) => Some(data),
            Ok(None) => reference_cache::load(dir, None).ok().flatten(),
            Err(e) => {
                warn!("Failed to read reference cache: {:#}", e);
                None
            }
        }
    }
}
