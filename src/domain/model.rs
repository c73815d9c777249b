use serde::{Deserialize, Serialize};
use std::fmt;

/// Location of a node in the source document.
///
/// Only ever forwarded into diagnostics. Nodes built in memory (for example
/// by the fixture normalizer) carry the default position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SourcePos {
    pub line: u32,
    pub column: u32,
}

impl SourcePos {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourcePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub name: String,
    #[serde(default)]
    pub navigation: Navigation,
    #[serde(default)]
    pub countries: Vec<Country>,
    #[serde(default)]
    pub pos: SourcePos,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Navigation {
    #[serde(default)]
    pub items: Vec<NavItem>,
    #[serde(default)]
    pub pos: SourcePos,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavItem {
    pub name: String,
    #[serde(default)]
    pub pos: SourcePos,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub name: String,
    #[serde(default)]
    pub leagues: Vec<League>,
    #[serde(default)]
    pub pos: SourcePos,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct League {
    pub name: String,
    pub season: String,
    #[serde(default)]
    pub matches: Vec<Match>,
    #[serde(default)]
    pub pos: SourcePos,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub date: String,
    pub time: String,
    pub home_team: String,
    pub home_city: String,
    pub away_team: String,
    pub away_city: String,
    pub home_score: i32,
    pub away_score: i32,
    pub stadium: String,
    #[serde(default)]
    pub pos: SourcePos,
}

impl Site {
    pub fn new(name: impl Into<String>, navigation: Vec<String>, countries: Vec<Country>) -> Self {
        Self {
            name: name.into(),
            navigation: Navigation {
                items: navigation
                    .into_iter()
                    .map(|name| NavItem {
                        name,
                        pos: SourcePos::default(),
                    })
                    .collect(),
                pos: SourcePos::default(),
            },
            countries,
            pos: SourcePos::default(),
        }
    }

    /// Builds a site whose navigation lists every country in declaration order.
    pub fn with_navigation_from_countries(name: impl Into<String>, countries: Vec<Country>) -> Self {
        let navigation = countries.iter().map(|c| c.name.clone()).collect();
        Self::new(name, navigation, countries)
    }

    pub fn country_names(&self) -> impl Iterator<Item = &str> {
        self.countries.iter().map(|c| c.name.as_str())
    }

    pub fn total_matches(&self) -> usize {
        self.countries
            .iter()
            .flat_map(|c| c.leagues.iter())
            .map(|l| l.matches.len())
            .sum()
    }
}

impl Country {
    pub fn new(name: impl Into<String>, leagues: Vec<League>) -> Self {
        Self {
            name: name.into(),
            leagues,
            pos: SourcePos::default(),
        }
    }
}

impl League {
    pub fn new(name: impl Into<String>, season: impl Into<String>, matches: Vec<Match>) -> Self {
        Self {
            name: name.into(),
            season: season.into(),
            matches,
            pos: SourcePos::default(),
        }
    }
}

impl Match {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        date: impl Into<String>,
        time: impl Into<String>,
        home_team: impl Into<String>,
        home_city: impl Into<String>,
        away_team: impl Into<String>,
        away_city: impl Into<String>,
        home_score: i32,
        away_score: i32,
        stadium: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            time: time.into(),
            home_team: home_team.into(),
            home_city: home_city.into(),
            away_team: away_team.into(),
            away_city: away_city.into(),
            home_score,
            away_score,
            stadium: stadium.into(),
            pos: SourcePos::default(),
        }
    }

    pub fn at(mut self, pos: SourcePos) -> Self {
        self.pos = pos;
        self
    }
}
