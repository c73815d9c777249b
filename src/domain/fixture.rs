use serde::{Deserialize, Serialize};

/// One fixture as handed over by a data vendor, before normalization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawFixture {
    /// ISO-8601 date-time, e.g. `2026-02-15T15:30:00+00:00`.
    pub date: Option<String>,
    pub home_team: Option<RawTeam>,
    pub away_team: Option<RawTeam>,
    /// `None` while the match has not been played.
    pub score: Option<RawScore>,
    pub venue: Option<RawVenue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTeam {
    pub name: Option<String>,
    pub city: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawScore {
    pub home: Option<i32>,
    pub away: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawVenue {
    pub name: Option<String>,
}

impl RawTeam {
    pub fn new(name: &str, city: Option<&str>) -> Self {
        Self {
            name: Some(name.to_string()),
            city: city.map(str::to_string),
        }
    }
}

impl RawScore {
    pub fn new(home: i32, away: i32) -> Self {
        Self {
            home: Some(home),
            away: Some(away),
        }
    }
}

impl RawVenue {
    pub fn new(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
        }
    }
}

/// Parameters of a single vendor request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureRequest {
    pub country_code: String,
    pub league_id: String,
    /// Season start year as the vendor expects it, e.g. `"2025"`.
    pub season: String,
}
