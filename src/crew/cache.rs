use std::collections::HashMap;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use utoipa::ToSchema;

use crate::crew::error::CrewError;
use crate::timefmt::iso_utc_seconds;
use crate::web::config::CrewConfig;

const UNKNOWN: &str = "Unknown";

/// Upstream roster shape: {"people": [{"name": ..., "craft": ...}, ...]}
#[derive(Debug, Deserialize)]
struct Roster {
    #[serde(default)]
    people: Vec<RosterPerson>,
}

#[derive(Debug, Deserialize)]
struct RosterPerson {
    name: Option<String>,
    craft: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CrewMember {
    pub name: String,
    pub craft: String,
    pub photo: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CrewPayload {
    pub count: usize,
    pub people: Vec<CrewMember>,
    pub updated_at: String,
}

struct CachedCrew {
    payload: CrewPayload,
    expires_at: DateTime<Utc>,
}

/// TTL-bounded cache over the crew roster feed. Single process-wide slot,
/// replaced wholesale on refresh so readers never see a partial payload.
///
/// There is deliberately no single-flight guard: concurrent requests that
/// arrive while the slot is stale may each fetch upstream, and the last
/// write wins.
pub struct CrewCache {
    client: reqwest::Client,
    source_url: String,
    ttl: Duration,
    photos: HashMap<String, String>,
    default_photo: String,
    slot: RwLock<Option<CachedCrew>>,
}

impl CrewCache {
    pub fn new(config: &CrewConfig) -> Result<Self, CrewError> {
        let client = reqwest::Client::builder()
            .timeout(StdDuration::from_secs(config.fetch_timeout_s))
            .build()?;

        Ok(Self {
            client,
            source_url: config.source_url.clone(),
            ttl: Duration::minutes(config.cache_ttl_minutes),
            photos: config.photos.clone(),
            default_photo: config.default_photo.clone(),
            slot: RwLock::new(None),
        })
    }

    /// Return the cached payload if still fresh, refreshing it from the
    /// roster feed otherwise.
    pub async fn get(&self) -> Result<CrewPayload, CrewError> {
        let now = Utc::now();

        {
            let slot = self.slot.read().await;
            if let Some(cached) = slot.as_ref() {
                if cached.expires_at > now {
                    return Ok(cached.payload.clone());
                }
            }
        }

        let payload = self.fetch(now).await?;
        self.store(payload.clone(), now + self.ttl).await;
        Ok(payload)
    }

    async fn fetch(&self, now: DateTime<Utc>) -> Result<CrewPayload, CrewError> {
        log::info!("Refreshing crew roster from {}", self.source_url);
        let response = self.client.get(&self.source_url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CrewError::UpstreamStatus(status.as_u16()));
        }

        let roster: Roster = response.json().await?;
        Ok(build_payload(
            roster.people,
            &self.photos,
            &self.default_photo,
            now,
        ))
    }

    async fn store(&self, payload: CrewPayload, expires_at: DateTime<Utc>) {
        let mut slot = self.slot.write().await;
        *slot = Some(CachedCrew {
            payload,
            expires_at,
        });
    }
}

fn build_payload(
    people: Vec<RosterPerson>,
    photos: &HashMap<String, String>,
    default_photo: &str,
    now: DateTime<Utc>,
) -> CrewPayload {
    let people: Vec<CrewMember> = people
        .into_iter()
        .map(|person| {
            let name = person.name.unwrap_or_else(|| UNKNOWN.to_string());
            let photo = photos
                .get(&name)
                .cloned()
                .unwrap_or_else(|| default_photo.to_string());
            CrewMember {
                name,
                craft: person.craft.unwrap_or_else(|| UNKNOWN.to_string()),
                photo,
            }
        })
        .collect();

    CrewPayload {
        count: people.len(),
        people,
        updated_at: iso_utc_seconds(now),
    }
}
