//! Writes a [`Site`] back out in the textual `.fb` document format read by
//! the fixture document parser.

use crate::domain::{Country, Match, Site};

pub fn to_model_string(site: &Site) -> String {
    let mut out = String::new();

    out.push_str(&format!("footballsite {} {{\n\n", site.name));

    out.push_str("  navigation {\n");
    for item in &site.navigation.items {
        out.push_str(&format!("    {};\n", item.name));
    }
    out.push_str("  }\n\n");

    for country in &site.countries {
        write_country(&mut out, country);
        out.push('\n');
    }

    out.push_str("}\n");
    out
}

fn write_country(out: &mut String, country: &Country) {
    out.push_str(&format!("  country {} {{\n", country.name));
    for league in &country.leagues {
        out.push_str(&format!(
            "    league {} season \"{}\" {{\n",
            league.name, league.season
        ));
        for m in &league.matches {
            write_match(out, m);
        }
        out.push_str("    }\n");
    }
    out.push_str("  }\n");
}

fn write_match(out: &mut String, m: &Match) {
    out.push_str(&format!(
        concat!(
            "      match {{\n",
            "        date    \"{}\"\n",
            "        time    \"{}\"\n",
            "        home    \"{}\"    (\"{}\")\n",
            "        away    \"{}\"    (\"{}\")\n",
            "        score   {} - {}\n",
            "        stadium \"{}\"\n",
            "      }}\n",
        ),
        m.date,
        m.time,
        m.home_team,
        m.home_city,
        m.away_team,
        m.away_city,
        m.home_score,
        m.away_score,
        m.stadium
    ));
}
