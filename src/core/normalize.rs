use crate::domain::{Match, RawFixture};

const DEFAULT_KICKOFF: &str = "00:00";

/// Turns vendor fixtures into matches, silently dropping any fixture that is
/// unplayed (a score side missing), lacks a team name, or has a date shorter
/// than `YYYY-MM-DD`.
pub fn normalize(fixtures: &[RawFixture]) -> Vec<Match> {
    fixtures.iter().filter_map(to_match).collect()
}

fn to_match(fixture: &RawFixture) -> Option<Match> {
    let score = fixture.score.as_ref()?;
    let (home_score, away_score) = (score.home?, score.away?);

    let home = fixture.home_team.as_ref()?;
    let away = fixture.away_team.as_ref()?;
    let home_team = home.name.as_deref()?;
    let away_team = away.name.as_deref()?;

    let stamp = fixture.date.as_deref()?;
    // `get` also rejects cuts that fall inside a multi-byte character
    let date = stamp.get(..10)?;
    let time = if stamp.len() >= 16 {
        stamp.get(11..16).unwrap_or(DEFAULT_KICKOFF)
    } else {
        DEFAULT_KICKOFF
    };

    let stadium = fixture
        .venue
        .as_ref()
        .and_then(|v| v.name.as_deref())
        .unwrap_or("");

    Some(Match::new(
        date,
        time,
        home_team,
        home.city.as_deref().unwrap_or(""),
        away_team,
        away.city.as_deref().unwrap_or(""),
        home_score,
        away_score,
        stadium,
    ))
}
