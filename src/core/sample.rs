use crate::domain::{Country, League, Match, Site};

const SEASON: &str = "2025-2026";

/// Small built-in site published when the vendor returns nothing and
/// `fetch.fallback_to_sample` is set. It passes every rule.
pub fn sample_site(name: &str) -> Site {
    Site::with_navigation_from_countries(name, vec![germany(), england(), spain()])
}

fn germany() -> Country {
    let m = Match::new(
        "2026-02-15",
        "15:30",
        "Bayern München",
        "Munich",
        "Borussia Dortmund",
        "Dortmund",
        2,
        1,
        "Allianz Arena",
    );
    Country::new("Germany", vec![League::new("Bundesliga", SEASON, vec![m])])
}

fn england() -> Country {
    let m = Match::new(
        "2026-02-15",
        "15:00",
        "Arsenal",
        "London",
        "Manchester City",
        "Manchester",
        1,
        1,
        "Emirates Stadium",
    );
    Country::new("England", vec![League::new("PremierLeague", SEASON, vec![m])])
}

fn spain() -> Country {
    let m = Match::new(
        "2026-02-15",
        "21:00",
        "Real Madrid",
        "Madrid",
        "FC Barcelona",
        "Barcelona",
        3,
        2,
        "Santiago Bernabéu",
    );
    Country::new("Spain", vec![League::new("LaLiga", SEASON, vec![m])])
}
