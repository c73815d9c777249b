use crate::config::toml_config::ApiConfig;
use crate::domain::{FixtureClient, FixtureRequest, RawFixture, RawScore, RawTeam, RawVenue};
use crate::utils::error::{Result, SiteError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Fixture client for the api-football v3 REST API.
pub struct HttpFixtureClient {
    client: Client,
    base_url: String,
    api_key: String,
    team_cities: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    /// `[]` or `{}` when the call succeeded, otherwise a list or map of messages.
    #[serde(default)]
    errors: serde_json::Value,
    #[serde(default)]
    response: Vec<ApiFixture>,
}

#[derive(Debug, Deserialize)]
struct ApiFixture {
    fixture: FixtureInfo,
    teams: Teams,
    #[serde(default)]
    goals: Goals,
}

#[derive(Debug, Deserialize)]
struct FixtureInfo {
    date: Option<String>,
    #[serde(default)]
    venue: Venue,
}

#[derive(Debug, Default, Deserialize)]
struct Venue {
    name: Option<String>,
    city: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Teams {
    home: Team,
    away: Team,
}

#[derive(Debug, Deserialize)]
struct Team {
    name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Goals {
    home: Option<i32>,
    away: Option<i32>,
}

impl HttpFixtureClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let timeout = config.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS);
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            team_cities: config.team_cities.clone(),
        })
    }

    fn to_raw(&self, item: ApiFixture) -> RawFixture {
        let away_city = item
            .teams
            .away
            .name
            .as_ref()
            .and_then(|name| self.team_cities.get(name))
            .cloned();

        let score = match (item.goals.home, item.goals.away) {
            (None, None) => None,
            (home, away) => Some(RawScore { home, away }),
        };

        RawFixture {
            date: item.fixture.date,
            home_team: Some(RawTeam {
                name: item.teams.home.name,
                city: item.fixture.venue.city,
            }),
            away_team: Some(RawTeam {
                name: item.teams.away.name,
                city: away_city,
            }),
            score,
            venue: Some(RawVenue {
                name: item.fixture.venue.name,
            }),
        }
    }
}

fn has_errors(errors: &serde_json::Value) -> bool {
    match errors {
        serde_json::Value::Null => false,
        serde_json::Value::Array(items) => !items.is_empty(),
        serde_json::Value::Object(map) => !map.is_empty(),
        _ => true,
    }
}

#[async_trait]
impl FixtureClient for HttpFixtureClient {
    async fn fetch_fixtures(&self, request: &FixtureRequest) -> Result<Vec<RawFixture>> {
        let url = format!("{}/fixtures", self.base_url);
        let context = format!(
            "league {} season {} ({})",
            request.league_id, request.season, request.country_code
        );

        tracing::debug!("📡 GET {} for {}", url, context);
        let response = self
            .client
            .get(&url)
            .header("x-apisports-key", &self.api_key)
            .query(&[
                ("league", request.league_id.as_str()),
                ("season", request.season.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);
        if !status.is_success() {
            return Err(SiteError::api(context, format!("HTTP {}", status)));
        }

        let body = response.text().await?;
        let envelope: Envelope = serde_json::from_str(&body)
            .map_err(|e| SiteError::api(&context, format!("unexpected response body: {}", e)))?;

        if has_errors(&envelope.errors) {
            return Err(SiteError::api(context, envelope.errors.to_string()));
        }

        tracing::debug!("📊 {} fixture(s) for {}", envelope.response.len(), context);
        Ok(envelope
            .response
            .into_iter()
            .map(|item| self.to_raw(item))
            .collect())
    }
}
