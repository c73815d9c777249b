//! Compiles a validated fixture document into page descriptions.
//!
//! The compiler does not render anything. Each page is a path plus a
//! string-keyed data model that an external template renderer consumes:
//!
//! | Path | Kind | Keys |
//! |------|------|------|
//! | `/` | index | `siteName`, `countries` |
//! | `/{country}/` | country | `siteName`, `countryName`, `countrySlug`, `leagues`, `countries` |
//! | `/{country}/{league}/` | league | the country keys plus `leagueName`, `leagueSlug`, `season`, `matches` |
//!
//! `countries` is the site-wide navigation and is identical on every page.

mod writer;

pub use writer::{write_pages, WriteReport};

use crate::domain::{Country, League, Match, Site};
use crate::rules::{Diagnostic, RuleSet};
use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageKind {
    Index,
    Country,
    League,
}

impl PageKind {
    /// Template the renderer should apply to this page.
    pub fn template(&self) -> &'static str {
        match self {
            PageKind::Index => "index",
            PageKind::Country => "country",
            PageKind::League => "league",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageDescription {
    /// Site-root relative path, always with leading and trailing `/`.
    pub path: String,
    pub kind: PageKind,
    pub data: Map<String, Value>,
}

impl PageDescription {
    /// File the page's data model is persisted to, relative to the site root.
    pub fn output_file(&self) -> String {
        let dir = self.path.trim_matches('/');
        if dir.is_empty() {
            "index.json".to_string()
        } else {
            format!("{}/index.json", dir)
        }
    }
}

/// URL-safe form of a display name: a hyphen goes between a lowercase
/// letter and a directly following uppercase letter, then everything is
/// lowercased. `PremierLeague` becomes `premier-league`.
pub fn slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut previous_lower = false;
    for c in name.chars() {
        if previous_lower && c.is_ascii_uppercase() {
            out.push('-');
        }
        previous_lower = c.is_ascii_lowercase();
        out.push(c);
    }
    out.to_lowercase()
}

/// Work collected during the single tree walk, turned into pages once the
/// navigation is complete.
enum Pending<'a> {
    Country {
        country: &'a Country,
        slug: String,
        leagues: Vec<Value>,
    },
    League {
        country: &'a Country,
        country_slug: String,
        league: &'a League,
        slug: String,
    },
}

/// Produces `1 + countries + leagues` pages: the index first, then each
/// country page followed by the pages of its leagues.
///
/// Callers are expected to have validated `site`; see [`compile_checked`].
pub fn compile(site: &Site) -> Vec<PageDescription> {
    let mut navigation = Vec::with_capacity(site.countries.len());
    let mut pending = Vec::new();

    for country in &site.countries {
        let country_slug = slug(&country.name);
        let mut leagues = Vec::with_capacity(country.leagues.len());
        let mut league_pages = Vec::with_capacity(country.leagues.len());

        for league in &country.leagues {
            let league_slug = slug(&league.name);
            leagues.push(league_summary(league, &league_slug));
            league_pages.push(Pending::League {
                country,
                country_slug: country_slug.clone(),
                league,
                slug: league_slug,
            });
        }

        navigation.push(Value::Object(object([
            ("name", Value::from(country.name.as_str())),
            ("slug", Value::from(country_slug.as_str())),
            ("leagues", Value::Array(leagues.clone())),
        ])));
        pending.push(Pending::Country {
            country,
            slug: country_slug,
            leagues,
        });
        pending.extend(league_pages);
    }

    let navigation = Value::Array(navigation);
    let site_name = Value::from(site.name.as_str());

    let mut pages = Vec::with_capacity(pending.len() + 1);
    pages.push(PageDescription {
        path: "/".to_string(),
        kind: PageKind::Index,
        data: object([("siteName", site_name.clone()), ("countries", navigation.clone())]),
    });

    for item in pending {
        let page = match item {
            Pending::Country {
                country,
                slug,
                leagues,
            } => PageDescription {
                path: format!("/{}/", slug),
                kind: PageKind::Country,
                data: object([
                    ("siteName", site_name.clone()),
                    ("countryName", Value::from(country.name.as_str())),
                    ("countrySlug", Value::from(slug)),
                    ("leagues", Value::Array(leagues)),
                    ("countries", navigation.clone()),
                ]),
            },
            Pending::League {
                country,
                country_slug,
                league,
                slug,
            } => PageDescription {
                path: format!("/{}/{}/", country_slug, slug),
                kind: PageKind::League,
                data: object([
                    ("siteName", site_name.clone()),
                    ("countryName", Value::from(country.name.as_str())),
                    ("countrySlug", Value::from(country_slug)),
                    ("leagueName", Value::from(league.name.as_str())),
                    ("leagueSlug", Value::from(slug)),
                    ("season", Value::from(league.season.as_str())),
                    ("matches", league.matches.iter().map(match_model).collect()),
                    ("countries", navigation.clone()),
                ]),
            },
        };
        pages.push(page);
    }

    tracing::debug!("Compiled {} page(s) for site '{}'", pages.len(), site.name);
    pages
}

/// Compiles `site` only when `rules` report nothing; otherwise hands back
/// the diagnostics.
pub fn compile_checked(
    site: &Site,
    rules: &RuleSet,
) -> std::result::Result<Vec<PageDescription>, Vec<Diagnostic>> {
    let diagnostics = rules.evaluate(site);
    if diagnostics.is_empty() {
        Ok(compile(site))
    } else {
        Err(diagnostics)
    }
}

fn league_summary(league: &League, slug: &str) -> Value {
    Value::Object(object([
        ("name", Value::from(league.name.as_str())),
        ("slug", Value::from(slug)),
        ("season", Value::from(league.season.as_str())),
    ]))
}

fn match_model(m: &Match) -> Value {
    Value::Object(object([
        ("date", Value::from(m.date.as_str())),
        ("time", Value::from(m.time.as_str())),
        ("homeTeam", Value::from(m.home_team.as_str())),
        ("homeCity", Value::from(m.home_city.as_str())),
        ("awayTeam", Value::from(m.away_team.as_str())),
        ("awayCity", Value::from(m.away_city.as_str())),
        ("homeScore", Value::from(m.home_score)),
        ("awayScore", Value::from(m.away_score)),
        ("stadium", Value::from(m.stadium.as_str())),
    ]))
}

fn object<const N: usize>(entries: [(&str, Value); N]) -> Map<String, Value> {
    entries
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Country, League, Match, Site};
    use serde_json::json;

    fn fixture(home: &str, away: &str) -> Match {
        Match::new(
            "2026-02-15",
            "15:30",
            home,
            "Home City",
            away,
            "Away City",
            2,
            1,
            "Some Stadium",
        )
    }

    fn europe() -> Site {
        Site::with_navigation_from_countries(
            "AllEuropeResults",
            vec![
                Country::new(
                    "Germany",
                    vec![
                        League::new("Bundesliga", "2025-2026", vec![fixture("Bayern München", "Borussia Dortmund")]),
                        League::new("ZweiteBundesliga", "2025-2026", vec![fixture("Hertha BSC", "Schalke 04")]),
                    ],
                ),
                Country::new(
                    "England",
                    vec![League::new("PremierLeague", "2025-2026", vec![fixture("Arsenal", "Chelsea")])],
                ),
                Country::new(
                    "Spain",
                    vec![League::new("LaLiga", "2025-2026", vec![fixture("Real Madrid", "FC Barcelona")])],
                ),
            ],
        )
    }

    #[test]
    fn test_slug_examples() {
        assert_eq!(slug("PremierLeague"), "premier-league");
        assert_eq!(slug("LaLiga2"), "la-liga2");
        assert_eq!(slug("Germany"), "germany");
        assert_eq!(slug("SerieA"), "serie-a");
        assert_eq!(slug("ABC"), "abc");
        assert_eq!(slug("ÖsterreichBundesliga"), "österreich-bundesliga");
        assert_eq!(slug("éA"), "éa");
        assert_eq!(slug(""), "");
    }

    #[test]
    fn test_page_count_and_order() {
        let pages = compile(&europe());
        let paths: Vec<&str> = pages.iter().map(|p| p.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "/",
                "/germany/",
                "/germany/bundesliga/",
                "/germany/zweite-bundesliga/",
                "/england/",
                "/england/premier-league/",
                "/spain/",
                "/spain/la-liga/",
            ]
        );
        assert_eq!(pages.len(), 1 + 3 + 4);
    }

    #[test]
    fn test_navigation_identical_on_every_page() {
        let pages = compile(&europe());
        let navigation = &pages[0].data["countries"];
        let slugs: Vec<&str> = navigation
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["slug"].as_str().unwrap())
            .collect();
        assert_eq!(slugs, vec!["germany", "england", "spain"]);
        for page in &pages {
            assert_eq!(&page.data["countries"], navigation, "page {}", page.path);
        }
    }

    #[test]
    fn test_index_navigation_lists_leagues() {
        let pages = compile(&europe());
        assert_eq!(pages[0].kind, PageKind::Index);
        assert_eq!(pages[0].data["siteName"], json!("AllEuropeResults"));
        assert_eq!(
            pages[0].data["countries"][1],
            json!({
                "name": "England",
                "slug": "england",
                "leagues": [{ "name": "PremierLeague", "slug": "premier-league", "season": "2025-2026" }]
            })
        );
    }

    #[test]
    fn test_country_page_model() {
        let pages = compile(&europe());
        let germany = &pages[1];
        assert_eq!(germany.kind, PageKind::Country);
        assert_eq!(germany.kind.template(), "country");
        assert_eq!(germany.data["countryName"], json!("Germany"));
        assert_eq!(germany.data["countrySlug"], json!("germany"));
        assert_eq!(germany.data["leagues"].as_array().unwrap().len(), 2);
        assert_eq!(germany.data["leagues"][1]["slug"], json!("zweite-bundesliga"));
    }

    #[test]
    fn test_league_page_exposes_every_match_field() {
        let pages = compile(&europe());
        let premier = pages.iter().find(|p| p.path == "/england/premier-league/").unwrap();
        assert_eq!(premier.kind, PageKind::League);
        assert_eq!(premier.data["leagueName"], json!("PremierLeague"));
        assert_eq!(premier.data["season"], json!("2025-2026"));
        assert_eq!(premier.data["countrySlug"], json!("england"));
        assert_eq!(
            premier.data["matches"],
            json!([{
                "date": "2026-02-15",
                "time": "15:30",
                "homeTeam": "Arsenal",
                "homeCity": "Home City",
                "awayTeam": "Chelsea",
                "awayCity": "Away City",
                "homeScore": 2,
                "awayScore": 1,
                "stadium": "Some Stadium"
            }])
        );
    }

    #[test]
    fn test_output_file_mapping() {
        let pages = compile(&europe());
        assert_eq!(pages[0].output_file(), "index.json");
        assert_eq!(pages[1].output_file(), "germany/index.json");
        assert_eq!(pages[2].output_file(), "germany/bundesliga/index.json");
    }

    #[test]
    fn test_compile_checked_refuses_invalid_site() {
        let site = Site::new(
            "AllEuropeResults",
            vec!["Germany".to_string(), "England".to_string()],
            vec![
                Country::new(
                    "Germany",
                    vec![League::new("Bundesliga", "2025-2026", vec![fixture("Bayern München", "Borussia Dortmund")])],
                ),
                Country::new("England", vec![]),
            ],
        );
        let diagnostics = compile_checked(&site, &RuleSet::standard()).unwrap_err();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code.to_string(), "0xFC015");
    }

    #[test]
    fn test_compile_checked_accepts_valid_site() {
        let pages = compile_checked(&europe(), &RuleSet::standard()).unwrap();
        assert_eq!(pages.len(), 8);
    }
}
