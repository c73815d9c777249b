//! Semantic checks over a fixture document.
//!
//! Every rule inspects exactly one node kind and reads only raw fields, so
//! rules never depend on each other's outcome. A [`RuleSet`] keeps one bucket
//! of rules per node kind and runs all of them against every node of that
//! kind in a single walk of the tree. Nothing short-circuits: two rules may
//! report the same node, and both diagnostics are kept.

mod country;
mod league;
mod matches;
mod site;

pub use country::{
    ConsistentSeasonWithinCountry, CountryHasLeagues, CountryNameLength,
    CountryNameStartsUppercase, UniqueLeagueNames,
};
pub use league::{
    LeagueHasMatches, LeagueNameLength, LeagueNameStartsUppercase, MatchDateWithinSeason,
    MaxMatchesPerLeague, SeasonFormat, SeasonYearsConsecutive, UniqueMatchesPerLeague,
};
pub use matches::{
    CityNotBlank, DateFormat, DistinctTeams, FieldsNotEmpty, KickoffGranularity,
    ScoreNonNegative, ScoreUpperBound, StadiumMinLength, TimeFormat,
};
pub use site::{
    CountriesListedInNavigation, NavigationNotEmpty, NavigationTargetsExist,
    NoDuplicateNavigationItems, UniqueCountryNames,
};

use crate::domain::{Country, League, Match, Navigation, Site, SourcePos};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Stable identifier of a rule, rendered as `0xFCnnn`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RuleCode(pub u16);

impl fmt::Display for RuleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0xFC{:03}", self.0)
    }
}

/// One rule violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub code: RuleCode,
    pub message: String,
    pub pos: SourcePos,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code, self.message)
    }
}

/// Collector threaded through every rule during one evaluation.
#[derive(Debug, Default)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, code: RuleCode, pos: SourcePos, message: impl Into<String>) {
        self.items.push(Diagnostic {
            code,
            message: message.into(),
            pos,
        });
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}

/// A check over one node kind `N`.
pub trait Rule<N>: Send + Sync {
    fn code(&self) -> RuleCode;
    fn name(&self) -> &'static str;
    fn check(&self, node: &N, out: &mut Diagnostics);
}

type Bucket<N> = Vec<Box<dyn Rule<N>>>;

/// Registry of rules, bucketed by the node kind each rule inspects.
#[derive(Default)]
pub struct RuleSet {
    site: Bucket<Site>,
    navigation: Bucket<Navigation>,
    country: Bucket<Country>,
    league: Bucket<League>,
    matches: Bucket<Match>,
}

impl RuleSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// All 27 context conditions.
    pub fn standard() -> Self {
        Self::empty()
            .with_site_rule(UniqueCountryNames)
            .with_league_rule(LeagueNameStartsUppercase)
            .with_match_rule(DistinctTeams)
            .with_site_rule(NavigationTargetsExist)
            .with_country_rule(UniqueLeagueNames)
            .with_match_rule(DateFormat)
            .with_match_rule(TimeFormat)
            .with_match_rule(FieldsNotEmpty)
            .with_league_rule(SeasonFormat)
            .with_navigation_rule(NoDuplicateNavigationItems)
            .with_country_rule(CountryNameStartsUppercase)
            .with_site_rule(CountriesListedInNavigation)
            .with_league_rule(MatchDateWithinSeason)
            .with_match_rule(StadiumMinLength)
            .with_country_rule(CountryHasLeagues)
            .with_league_rule(LeagueHasMatches)
            .with_league_rule(UniqueMatchesPerLeague)
            .with_navigation_rule(NavigationNotEmpty)
            .with_match_rule(ScoreNonNegative)
            .with_match_rule(ScoreUpperBound)
            .with_country_rule(CountryNameLength)
            .with_league_rule(LeagueNameLength)
            .with_match_rule(CityNotBlank)
            .with_league_rule(SeasonYearsConsecutive)
            .with_match_rule(KickoffGranularity)
            .with_country_rule(ConsistentSeasonWithinCountry)
            .with_league_rule(MaxMatchesPerLeague)
    }

    pub fn with_site_rule(mut self, rule: impl Rule<Site> + 'static) -> Self {
        self.site.push(Box::new(rule));
        self
    }

    pub fn with_navigation_rule(mut self, rule: impl Rule<Navigation> + 'static) -> Self {
        self.navigation.push(Box::new(rule));
        self
    }

    pub fn with_country_rule(mut self, rule: impl Rule<Country> + 'static) -> Self {
        self.country.push(Box::new(rule));
        self
    }

    pub fn with_league_rule(mut self, rule: impl Rule<League> + 'static) -> Self {
        self.league.push(Box::new(rule));
        self
    }

    pub fn with_match_rule(mut self, rule: impl Rule<Match> + 'static) -> Self {
        self.matches.push(Box::new(rule));
        self
    }

    pub fn len(&self) -> usize {
        self.site.len()
            + self.navigation.len()
            + self.country.len()
            + self.league.len()
            + self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Code and name of every registered rule, ordered by code.
    pub fn registered(&self) -> Vec<(RuleCode, &'static str)> {
        fn describe<N>(bucket: &Bucket<N>) -> impl Iterator<Item = (RuleCode, &'static str)> + '_ {
            bucket.iter().map(|r| (r.code(), r.name()))
        }

        let mut all: Vec<_> = describe(&self.site)
            .chain(describe(&self.navigation))
            .chain(describe(&self.country))
            .chain(describe(&self.league))
            .chain(describe(&self.matches))
            .collect();
        all.sort();
        all
    }

    pub fn evaluate(&self, site: &Site) -> Vec<Diagnostic> {
        let mut out = Diagnostics::new();

        run(&self.site, site, &mut out);
        run(&self.navigation, &site.navigation, &mut out);
        for country in &site.countries {
            run(&self.country, country, &mut out);
            for league in &country.leagues {
                run(&self.league, league, &mut out);
                for m in &league.matches {
                    run(&self.matches, m, &mut out);
                }
            }
        }

        tracing::debug!(
            "Evaluated {} rules over site '{}': {} diagnostic(s)",
            self.len(),
            site.name,
            out.len()
        );
        out.into_vec()
    }
}

fn run<N>(rules: &Bucket<N>, node: &N, out: &mut Diagnostics) {
    for rule in rules {
        rule.check(node, out);
    }
}

/// Evaluates `site` against the standard rule set.
pub fn evaluate(site: &Site) -> Vec<Diagnostic> {
    RuleSet::standard().evaluate(site)
}

// Digit classes are spelled out because `\d` in `regex` matches any Unicode digit.
static SEASON_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{4})-([0-9]{4})$").expect("season pattern"));
static DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{4})-[0-9]{2}-[0-9]{2}$").expect("date pattern"));

/// Start and end year of a well-formed season string.
fn season_years(season: &str) -> Option<(i32, i32)> {
    let caps = SEASON_PATTERN.captures(season)?;
    Some((caps[1].parse().ok()?, caps[2].parse().ok()?))
}

fn date_year(date: &str) -> Option<i32> {
    DATE_PATTERN.captures(date)?[1].parse().ok()
}

fn starts_with_non_uppercase(name: &str) -> bool {
    name.chars().next().is_some_and(|c| !c.is_uppercase())
}

fn truncated(name: &str, max_chars: usize) -> String {
    name.chars().take(max_chars).collect()
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::domain::{Country, League, Match, Site};

    pub fn valid_match() -> Match {
        Match::new(
            "2026-02-15",
            "15:30",
            "Bayern München",
            "Munich",
            "Borussia Dortmund",
            "Dortmund",
            2,
            1,
            "Allianz Arena",
        )
    }

    pub fn valid_league() -> League {
        League::new("Bundesliga", "2025-2026", vec![valid_match()])
    }

    pub fn valid_country() -> Country {
        Country::new("Germany", vec![valid_league()])
    }

    pub fn site_with_match(m: Match) -> Site {
        Site::with_navigation_from_countries(
            "GermanyResults",
            vec![Country::new(
                "Germany",
                vec![League::new("Bundesliga", "2025-2026", vec![m])],
            )],
        )
    }
}
