use super::{starts_with_non_uppercase, truncated, Diagnostics, Rule, RuleCode};
use crate::domain::Country;
use std::collections::HashSet;

const MAX_NAME_LENGTH: usize = 40;

pub struct CountryNameStartsUppercase;

impl Rule<Country> for CountryNameStartsUppercase {
    fn code(&self) -> RuleCode {
        RuleCode(11)
    }

    fn name(&self) -> &'static str {
        "country-name-starts-uppercase"
    }

    fn check(&self, country: &Country, out: &mut Diagnostics) {
        if starts_with_non_uppercase(&country.name) {
            out.report(
                self.code(),
                country.pos,
                format!(
                    "Country name '{}' at {} does not start with an uppercase letter.",
                    country.name, country.pos
                ),
            );
        }
    }
}

pub struct CountryNameLength;

impl Rule<Country> for CountryNameLength {
    fn code(&self) -> RuleCode {
        RuleCode(21)
    }

    fn name(&self) -> &'static str {
        "country-name-length"
    }

    fn check(&self, country: &Country, out: &mut Diagnostics) {
        let length = country.name.chars().count();
        if length > MAX_NAME_LENGTH {
            out.report(
                self.code(),
                country.pos,
                format!(
                    "Country name '{}...' at {} is {} characters long (maximum {}).",
                    truncated(&country.name, 20),
                    country.pos,
                    length,
                    MAX_NAME_LENGTH
                ),
            );
        }
    }
}

pub struct CountryHasLeagues;

impl Rule<Country> for CountryHasLeagues {
    fn code(&self) -> RuleCode {
        RuleCode(15)
    }

    fn name(&self) -> &'static str {
        "country-has-leagues"
    }

    fn check(&self, country: &Country, out: &mut Diagnostics) {
        if country.leagues.is_empty() {
            out.report(
                self.code(),
                country.pos,
                format!(
                    "Country '{}' at {} has no leagues. Each country must contain at least one league.",
                    country.name, country.pos
                ),
            );
        }
    }
}

pub struct UniqueLeagueNames;

impl Rule<Country> for UniqueLeagueNames {
    fn code(&self) -> RuleCode {
        RuleCode(5)
    }

    fn name(&self) -> &'static str {
        "unique-league-names"
    }

    fn check(&self, country: &Country, out: &mut Diagnostics) {
        let mut seen = HashSet::new();
        for league in &country.leagues {
            if !seen.insert(league.name.as_str()) {
                out.report(
                    self.code(),
                    league.pos,
                    format!(
                        "Duplicate league name '{}' in country '{}' at {}.",
                        league.name, country.name, league.pos
                    ),
                );
            }
        }
    }
}

/// Every league of a country uses the season of its first league.
pub struct ConsistentSeasonWithinCountry;

impl Rule<Country> for ConsistentSeasonWithinCountry {
    fn code(&self) -> RuleCode {
        RuleCode(26)
    }

    fn name(&self) -> &'static str {
        "consistent-season-within-country"
    }

    fn check(&self, country: &Country, out: &mut Diagnostics) {
        let Some((first, rest)) = country.leagues.split_first() else {
            return;
        };
        for league in rest.iter().filter(|l| l.season != first.season) {
            out.report(
                self.code(),
                league.pos,
                format!(
                    "League '{}' at {} has season '{}' which differs from '{}' used by other leagues in country '{}'.",
                    league.name, league.pos, league.season, first.season, country.name
                ),
            );
        }
    }
}
