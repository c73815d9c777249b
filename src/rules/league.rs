use super::{
    date_year, season_years, starts_with_non_uppercase, truncated, Diagnostics, Rule, RuleCode,
    SEASON_PATTERN,
};
use crate::domain::League;
use std::collections::HashSet;

const MAX_NAME_LENGTH: usize = 40;
/// Twenty teams, 38 rounds of ten games.
const MAX_MATCHES: usize = 380;

pub struct LeagueNameStartsUppercase;

impl Rule<League> for LeagueNameStartsUppercase {
    fn code(&self) -> RuleCode {
        RuleCode(2)
    }

    fn name(&self) -> &'static str {
        "league-name-starts-uppercase"
    }

    fn check(&self, league: &League, out: &mut Diagnostics) {
        if starts_with_non_uppercase(&league.name) {
            out.report(
                self.code(),
                league.pos,
                format!(
                    "League name '{}' at {} does not start with an uppercase letter.",
                    league.name, league.pos
                ),
            );
        }
    }
}

pub struct LeagueNameLength;

impl Rule<League> for LeagueNameLength {
    fn code(&self) -> RuleCode {
        RuleCode(22)
    }

    fn name(&self) -> &'static str {
        "league-name-length"
    }

    fn check(&self, league: &League, out: &mut Diagnostics) {
        let length = league.name.chars().count();
        if length > MAX_NAME_LENGTH {
            out.report(
                self.code(),
                league.pos,
                format!(
                    "League name '{}...' at {} is {} characters long (maximum {}).",
                    truncated(&league.name, 20),
                    league.pos,
                    length,
                    MAX_NAME_LENGTH
                ),
            );
        }
    }
}

pub struct SeasonFormat;

impl Rule<League> for SeasonFormat {
    fn code(&self) -> RuleCode {
        RuleCode(9)
    }

    fn name(&self) -> &'static str {
        "season-format"
    }

    fn check(&self, league: &League, out: &mut Diagnostics) {
        if !SEASON_PATTERN.is_match(&league.season) {
            out.report(
                self.code(),
                league.pos,
                format!(
                    "Invalid season format '{}' in league '{}' at {}. Expected YYYY-YYYY.",
                    league.season, league.name, league.pos
                ),
            );
        }
    }
}

/// Season end year is the start year plus one. Malformed seasons belong to
/// [`SeasonFormat`].
pub struct SeasonYearsConsecutive;

impl Rule<League> for SeasonYearsConsecutive {
    fn code(&self) -> RuleCode {
        RuleCode(24)
    }

    fn name(&self) -> &'static str {
        "season-years-consecutive"
    }

    fn check(&self, league: &League, out: &mut Diagnostics) {
        let Some((start, end)) = season_years(&league.season) else {
            return;
        };
        if end != start + 1 {
            out.report(
                self.code(),
                league.pos,
                format!(
                    "Season '{}' in league '{}' at {} does not have consecutive years (expected {}-{}).",
                    league.season,
                    league.name,
                    league.pos,
                    start,
                    start + 1
                ),
            );
        }
    }
}

pub struct LeagueHasMatches;

impl Rule<League> for LeagueHasMatches {
    fn code(&self) -> RuleCode {
        RuleCode(16)
    }

    fn name(&self) -> &'static str {
        "league-has-matches"
    }

    fn check(&self, league: &League, out: &mut Diagnostics) {
        if league.matches.is_empty() {
            out.report(
                self.code(),
                league.pos,
                format!(
                    "League '{}' at {} has no matches. Each league must contain at least one match.",
                    league.name, league.pos
                ),
            );
        }
    }
}

pub struct MaxMatchesPerLeague;

impl Rule<League> for MaxMatchesPerLeague {
    fn code(&self) -> RuleCode {
        RuleCode(27)
    }

    fn name(&self) -> &'static str {
        "max-matches-per-league"
    }

    fn check(&self, league: &League, out: &mut Diagnostics) {
        let count = league.matches.len();
        if count > MAX_MATCHES {
            out.report(
                self.code(),
                league.pos,
                format!(
                    "League '{}' at {} has {} matches (maximum {}).",
                    league.name, league.pos, count, MAX_MATCHES
                ),
            );
        }
    }
}

/// A match is identified by (date, time, home team, away team).
pub struct UniqueMatchesPerLeague;

impl Rule<League> for UniqueMatchesPerLeague {
    fn code(&self) -> RuleCode {
        RuleCode(17)
    }

    fn name(&self) -> &'static str {
        "unique-matches-per-league"
    }

    fn check(&self, league: &League, out: &mut Diagnostics) {
        let mut seen = HashSet::new();
        for m in &league.matches {
            let key = (
                m.date.as_str(),
                m.time.as_str(),
                m.home_team.as_str(),
                m.away_team.as_str(),
            );
            if !seen.insert(key) {
                out.report(
                    self.code(),
                    m.pos,
                    format!(
                        "Duplicate match (date='{}', time='{}', home='{}', away='{}') in league '{}' at {}.",
                        m.date, m.time, m.home_team, m.away_team, league.name, m.pos
                    ),
                );
            }
        }
    }
}

/// Match date years fall inside the league's season. Matches with a
/// malformed date, or leagues with a malformed season, are skipped.
pub struct MatchDateWithinSeason;

impl Rule<League> for MatchDateWithinSeason {
    fn code(&self) -> RuleCode {
        RuleCode(13)
    }

    fn name(&self) -> &'static str {
        "match-date-within-season"
    }

    fn check(&self, league: &League, out: &mut Diagnostics) {
        let Some((start, end)) = season_years(&league.season) else {
            return;
        };
        for m in &league.matches {
            let Some(year) = date_year(&m.date) else {
                continue;
            };
            if year < start || year > end {
                out.report(
                    self.code(),
                    m.pos,
                    format!(
                        "Match date '{}' at {} is outside season '{}' in league '{}'.",
                        m.date, m.pos, league.season, league.name
                    ),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Match;
    use crate::rules::fixtures::{valid_league, valid_match};

    fn count<R: Rule<League>>(rule: R, league: &League) -> usize {
        let mut out = Diagnostics::new();
        rule.check(league, &mut out);
        out.len()
    }

    fn league_with_season(season: &str) -> League {
        League::new("Bundesliga", season, vec![valid_match()])
    }

    #[test]
    fn test_league_name_rules() {
        assert_eq!(count(LeagueNameStartsUppercase, &League::new("bundesliga", "2025-2026", vec![])), 1);
        assert_eq!(count(LeagueNameStartsUppercase, &valid_league()), 0);
        assert_eq!(count(LeagueNameLength, &League::new("L".repeat(41), "2025-2026", vec![])), 1);
        assert_eq!(count(LeagueNameLength, &League::new("L".repeat(40), "2025-2026", vec![])), 0);
    }

    #[test]
    fn test_season_format_and_consecutive_years() {
        for (season, format_errors, consecutive_errors) in [
            ("2025-2026", 0, 0),
            ("2025-2028", 0, 1),
            ("2026-2025", 0, 1),
            ("2025/2026", 1, 0),
            ("25-26", 1, 0),
            ("", 1, 0),
        ] {
            let league = league_with_season(season);
            assert_eq!(count(SeasonFormat, &league), format_errors, "season {:?}", season);
            assert_eq!(
                count(SeasonYearsConsecutive, &league),
                consecutive_errors,
                "season {:?}",
                season
            );
        }
    }

    #[test]
    fn test_empty_and_oversized_leagues() {
        assert_eq!(count(LeagueHasMatches, &League::new("Bundesliga", "2025-2026", vec![])), 1);
        assert_eq!(count(LeagueHasMatches, &valid_league()), 0);

        let full = League::new("Bundesliga", "2025-2026", vec![valid_match(); 380]);
        assert_eq!(count(MaxMatchesPerLeague, &full), 0);
        let over = League::new("Bundesliga", "2025-2026", vec![valid_match(); 381]);
        assert_eq!(count(MaxMatchesPerLeague, &over), 1);
    }

    #[test]
    fn test_duplicate_match_key() {
        let mut rematch = valid_match();
        rematch.home_score = 0;
        rematch.stadium = "Signal Iduna Park".to_string();
        let league = League::new("Bundesliga", "2025-2026", vec![valid_match(), rematch]);
        // score and stadium are not part of the key
        assert_eq!(count(UniqueMatchesPerLeague, &league), 1);

        let mut later = valid_match();
        later.time = "18:30".to_string();
        let league = League::new("Bundesliga", "2025-2026", vec![valid_match(), later]);
        assert_eq!(count(UniqueMatchesPerLeague, &league), 0);
    }

    #[test]
    fn test_date_within_season_skips_malformed_input() {
        let out_of_season = Match {
            date: "2024-05-01".to_string(),
            ..valid_match()
        };
        let malformed_date = Match {
            date: "2024/05/01".to_string(),
            ..valid_match()
        };

        let league = League::new("Bundesliga", "2025-2026", vec![out_of_season.clone(), malformed_date]);
        assert_eq!(count(MatchDateWithinSeason, &league), 1);

        let bad_season = League::new("Bundesliga", "2025", vec![out_of_season]);
        assert_eq!(count(MatchDateWithinSeason, &bad_season), 0);
    }
}
