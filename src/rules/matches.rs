use super::{Diagnostics, Rule, RuleCode, DATE_PATTERN};
use crate::domain::Match;
use regex::Regex;
use std::sync::LazyLock;

// 00:00 - 23:59
static TIME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([01][0-9]|2[0-3]):[0-5][0-9]$").expect("time pattern"));
// any two-digit clock, so granularity is still checked on out-of-range hours
static CLOCK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{2}:([0-9]{2})$").expect("clock pattern"));

const MIN_STADIUM_LENGTH: usize = 3;
const MAX_SCORE: i32 = 99;

/// Home and away team differ, ignoring case.
pub struct DistinctTeams;

impl Rule<Match> for DistinctTeams {
    fn code(&self) -> RuleCode {
        RuleCode(3)
    }

    fn name(&self) -> &'static str {
        "distinct-teams"
    }

    fn check(&self, m: &Match, out: &mut Diagnostics) {
        let home = m.home_team.chars().flat_map(char::to_lowercase);
        let away = m.away_team.chars().flat_map(char::to_lowercase);
        if home.eq(away) {
            out.report(
                self.code(),
                m.pos,
                format!(
                    "Match at {} has identical home and away team '{}'.",
                    m.pos, m.home_team
                ),
            );
        }
    }
}

pub struct DateFormat;

impl Rule<Match> for DateFormat {
    fn code(&self) -> RuleCode {
        RuleCode(6)
    }

    fn name(&self) -> &'static str {
        "date-format"
    }

    fn check(&self, m: &Match, out: &mut Diagnostics) {
        if !DATE_PATTERN.is_match(&m.date) {
            out.report(
                self.code(),
                m.pos,
                format!(
                    "Invalid date format '{}' in match at {}. Expected YYYY-MM-DD.",
                    m.date, m.pos
                ),
            );
        }
    }
}

pub struct TimeFormat;

impl Rule<Match> for TimeFormat {
    fn code(&self) -> RuleCode {
        RuleCode(7)
    }

    fn name(&self) -> &'static str {
        "time-format"
    }

    fn check(&self, m: &Match, out: &mut Diagnostics) {
        if !TIME_PATTERN.is_match(&m.time) {
            out.report(
                self.code(),
                m.pos,
                format!(
                    "Invalid time format '{}' in match at {}. Expected HH:MM (00:00 - 23:59).",
                    m.time, m.pos
                ),
            );
        }
    }
}

/// Kick-off minutes are 00, 15, 30 or 45.
///
/// Fires alongside [`TimeFormat`] for times like `25:10`, which are wrong on
/// both counts.
pub struct KickoffGranularity;

impl Rule<Match> for KickoffGranularity {
    fn code(&self) -> RuleCode {
        RuleCode(25)
    }

    fn name(&self) -> &'static str {
        "kickoff-granularity"
    }

    fn check(&self, m: &Match, out: &mut Diagnostics) {
        let Some(caps) = CLOCK_PATTERN.captures(&m.time) else {
            return;
        };
        if !matches!(&caps[1], "00" | "15" | "30" | "45") {
            out.report(
                self.code(),
                m.pos,
                format!(
                    "Match time '{}' at {} has non-standard minute granularity. Expected minutes to be 00, 15, 30, or 45.",
                    m.time, m.pos
                ),
            );
        }
    }
}

/// Team, city and stadium fields are not zero-length. Whitespace-only values
/// pass here; see [`CityNotBlank`] and [`StadiumMinLength`].
pub struct FieldsNotEmpty;

impl Rule<Match> for FieldsNotEmpty {
    fn code(&self) -> RuleCode {
        RuleCode(8)
    }

    fn name(&self) -> &'static str {
        "fields-not-empty"
    }

    fn check(&self, m: &Match, out: &mut Diagnostics) {
        let fields = [
            ("homeTeam", &m.home_team),
            ("awayTeam", &m.away_team),
            ("homeCity", &m.home_city),
            ("awayCity", &m.away_city),
            ("stadium", &m.stadium),
        ];
        for (field, value) in fields {
            if value.is_empty() {
                out.report(
                    self.code(),
                    m.pos,
                    format!(
                        "Empty '{}' in match at {}. All match fields must be non-empty.",
                        field, m.pos
                    ),
                );
            }
        }
    }
}

pub struct CityNotBlank;

impl Rule<Match> for CityNotBlank {
    fn code(&self) -> RuleCode {
        RuleCode(23)
    }

    fn name(&self) -> &'static str {
        "city-not-blank"
    }

    fn check(&self, m: &Match, out: &mut Diagnostics) {
        for (field, city) in [("homeCity", &m.home_city), ("awayCity", &m.away_city)] {
            if !city.is_empty() && city.trim().is_empty() {
                out.report(
                    self.code(),
                    m.pos,
                    format!(
                        "Field '{}' in match at {} contains only whitespace. City names must not be blank.",
                        field, m.pos
                    ),
                );
            }
        }
    }
}

pub struct StadiumMinLength;

impl Rule<Match> for StadiumMinLength {
    fn code(&self) -> RuleCode {
        RuleCode(14)
    }

    fn name(&self) -> &'static str {
        "stadium-min-length"
    }

    fn check(&self, m: &Match, out: &mut Diagnostics) {
        if m.stadium.trim().chars().count() < MIN_STADIUM_LENGTH {
            out.report(
                self.code(),
                m.pos,
                format!(
                    "Stadium name '{}' in match at {} is too short (minimum {} characters).",
                    m.stadium, m.pos, MIN_STADIUM_LENGTH
                ),
            );
        }
    }
}

pub struct ScoreNonNegative;

impl Rule<Match> for ScoreNonNegative {
    fn code(&self) -> RuleCode {
        RuleCode(19)
    }

    fn name(&self) -> &'static str {
        "score-non-negative"
    }

    fn check(&self, m: &Match, out: &mut Diagnostics) {
        for (side, score) in [("home", m.home_score), ("away", m.away_score)] {
            if score < 0 {
                out.report(
                    self.code(),
                    m.pos,
                    format!(
                        "Negative {} score ({}) in match at {}. Scores must be non-negative.",
                        side, score, m.pos
                    ),
                );
            }
        }
    }
}

pub struct ScoreUpperBound;

impl Rule<Match> for ScoreUpperBound {
    fn code(&self) -> RuleCode {
        RuleCode(20)
    }

    fn name(&self) -> &'static str {
        "score-upper-bound"
    }

    fn check(&self, m: &Match, out: &mut Diagnostics) {
        for (side, score) in [("Home", m.home_score), ("Away", m.away_score)] {
            if score > MAX_SCORE {
                out.report(
                    self.code(),
                    m.pos,
                    format!(
                        "{} score ({}) exceeds maximum {} in match at {}.",
                        side, score, MAX_SCORE, m.pos
                    ),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::fixtures::valid_match;

    fn count<R: Rule<Match>>(rule: R, m: &Match) -> usize {
        let mut out = Diagnostics::new();
        rule.check(m, &mut out);
        out.len()
    }

    #[test]
    fn test_distinct_teams_ignores_case() {
        let mut m = valid_match();
        assert_eq!(count(DistinctTeams, &m), 0);
        m.away_team = "bayern münchen".to_string();
        assert_eq!(count(DistinctTeams, &m), 1);
    }

    #[test]
    fn test_date_format() {
        for (date, expected) in [
            ("2026-02-15", 0),
            ("2026-2-15", 1),
            ("15-02-2026", 1),
            ("2026-02-15T15:30", 1),
            ("２０２６-02-15", 1),
        ] {
            let m = Match {
                date: date.to_string(),
                ..valid_match()
            };
            assert_eq!(count(DateFormat, &m), expected, "date {:?}", date);
        }
    }

    #[test]
    fn test_time_format_and_granularity_are_independent() {
        for (time, format_errors, granularity_errors) in [
            ("15:30", 0, 0),
            ("00:00", 0, 0),
            ("23:45", 0, 0),
            ("18:10", 0, 1),
            ("25:10", 1, 1),
            ("24:00", 1, 0),
            ("9:30", 1, 0),
            ("12:60", 1, 1),
        ] {
            let m = Match {
                time: time.to_string(),
                ..valid_match()
            };
            assert_eq!(count(TimeFormat, &m), format_errors, "time {:?}", time);
            assert_eq!(count(KickoffGranularity, &m), granularity_errors, "time {:?}", time);
        }
    }

    #[test]
    fn test_empty_fields_reported_per_field() {
        let m = Match {
            home_team: String::new(),
            away_city: String::new(),
            stadium: String::new(),
            ..valid_match()
        };
        let mut out = Diagnostics::new();
        FieldsNotEmpty.check(&m, &mut out);
        let messages: Vec<&str> = out.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(messages.len(), 3);
        assert!(messages[0].contains("'homeTeam'"));
        assert!(messages[1].contains("'awayCity'"));
        assert!(messages[2].contains("'stadium'"));
    }

    #[test]
    fn test_blank_city_is_not_empty_city() {
        let blank = Match {
            away_city: "   ".to_string(),
            ..valid_match()
        };
        assert_eq!(count(CityNotBlank, &blank), 1);
        assert_eq!(count(FieldsNotEmpty, &blank), 0);

        let empty = Match {
            away_city: String::new(),
            ..valid_match()
        };
        assert_eq!(count(CityNotBlank, &empty), 0);
        assert_eq!(count(FieldsNotEmpty, &empty), 1);
    }

    #[test]
    fn test_stadium_length_after_trim() {
        for (stadium, expected) in [("Allianz Arena", 0), ("Old", 0), ("  AB  ", 1), ("", 1), ("Ñúñ", 0)] {
            let m = Match {
                stadium: stadium.to_string(),
                ..valid_match()
            };
            assert_eq!(count(StadiumMinLength, &m), expected, "stadium {:?}", stadium);
        }
    }

    #[test]
    fn test_score_bounds_per_side() {
        let m = Match {
            home_score: -1,
            away_score: -3,
            ..valid_match()
        };
        assert_eq!(count(ScoreNonNegative, &m), 2);
        assert_eq!(count(ScoreUpperBound, &m), 0);

        let m = Match {
            home_score: 99,
            away_score: 100,
            ..valid_match()
        };
        assert_eq!(count(ScoreNonNegative, &m), 0);
        assert_eq!(count(ScoreUpperBound, &m), 1);
    }
}
