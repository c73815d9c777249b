use football_site::core::PipelineState;
use football_site::{
    HttpFixtureClient, LocalStorage, RefreshConfig, RefreshOutcome, RefreshPipeline,
};
use httpmock::prelude::*;
use tempfile::TempDir;

fn config_toml(base_url: &str, output: &str, min_success_rate: f64) -> String {
    format!(
        r#"
[site]
name = "AllEuropeResults"

[api]
base_url = "{base_url}"
api_key = "test-key"
timeout_seconds = 5

[api.team_cities]
"Borussia Dortmund" = "Dortmund"
"Chelsea" = "London"

[fetch]
season = 2025
min_success_rate = {min_success_rate}

[[fetch.countries]]
name = "Germany"
code = "DE"
leagues = [{{ name = "Bundesliga", id = "78" }}]

[[fetch.countries]]
name = "England"
code = "GB"
leagues = [{{ name = "PremierLeague", id = "39" }}]

[output]
path = "{output}"
model_file = "AllEurope.fb"
"#
    )
}

fn fixtures(home: &str, away: &str, city: &str, venue: &str) -> serde_json::Value {
    serde_json::json!({
        "errors": [],
        "response": [{
            "fixture": {
                "date": "2026-02-15T15:30:00+00:00",
                "venue": { "name": venue, "city": city }
            },
            "teams": { "home": { "name": home }, "away": { "name": away } },
            "goals": { "home": 2, "away": 1 }
        }]
    })
}

#[tokio::test]
async fn test_refresh_end_to_end_with_real_http() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let bundesliga = server.mock(|when, then| {
        when.method(GET)
            .path("/fixtures")
            .query_param("league", "78")
            .query_param("season", "2025")
            .header("x-apisports-key", "test-key");
        then.status(200).json_body(fixtures(
            "Bayern München",
            "Borussia Dortmund",
            "München",
            "Allianz Arena",
        ));
    });
    let premier_league = server.mock(|when, then| {
        when.method(GET).path("/fixtures").query_param("league", "39");
        then.status(200)
            .json_body(fixtures("Arsenal", "Chelsea", "London", "Emirates Stadium"));
    });

    let config = RefreshConfig::from_toml_str(&config_toml(&server.base_url(), &output_path, 1.0))?;
    let client = HttpFixtureClient::new(&config.api)?;
    let pipeline = RefreshPipeline::new(client, LocalStorage::new(output_path.clone()), config);

    let result = pipeline.run().await;

    bundesliga.assert();
    premier_league.assert();
    assert_eq!(result.outcome, RefreshOutcome::Success, "{}", result.summary());
    assert_eq!(result.pages_written, 5);
    assert!(result.model_written);

    let root = temp_dir.path();
    for page in [
        "site/index.json",
        "site/germany/index.json",
        "site/germany/bundesliga/index.json",
        "site/england/index.json",
        "site/england/premier-league/index.json",
    ] {
        assert!(root.join(page).exists(), "missing {}", page);
    }

    let league: serde_json::Value = serde_json::from_slice(&std::fs::read(
        root.join("site/germany/bundesliga/index.json"),
    )?)?;
    assert_eq!(league["matches"][0]["homeCity"], "München");
    assert_eq!(league["matches"][0]["awayCity"], "Dortmund");
    assert_eq!(league["matches"][0]["time"], "15:30");
    assert_eq!(league["countries"][1]["slug"], "england");

    let model = std::fs::read_to_string(root.join("AllEurope.fb"))?;
    assert!(model.contains("league Bundesliga season \"2025-2026\" {"));
    assert!(model.contains("away    \"Chelsea\"    (\"London\")"));

    let json = serde_json::to_value(&result)?;
    assert_eq!(json["outcome"], "SUCCESS");
    Ok(())
}

#[tokio::test]
async fn test_refresh_below_threshold_writes_nothing() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/fixtures").query_param("league", "78");
        then.status(200).json_body(fixtures(
            "Bayern München",
            "Borussia Dortmund",
            "München",
            "Allianz Arena",
        ));
    });
    server.mock(|when, then| {
        when.method(GET).path("/fixtures").query_param("league", "39");
        then.status(503);
    });

    let config = RefreshConfig::from_toml_str(&config_toml(&server.base_url(), &output_path, 0.75))?;
    let client = HttpFixtureClient::new(&config.api)?;
    let pipeline = RefreshPipeline::new(client, LocalStorage::new(output_path), config);

    let result = pipeline.run().await;

    assert_eq!(result.outcome, RefreshOutcome::FetchBelowThreshold);
    assert_eq!(
        result.stages,
        vec![
            PipelineState::Fetching,
            PipelineState::Done(RefreshOutcome::FetchBelowThreshold)
        ]
    );
    assert_eq!(result.success_rate, 0.5);
    assert_eq!(result.countries_failed, 1);
    assert_eq!(result.api_errors.len(), 1);
    assert!(result.api_errors[0].starts_with("England/PremierLeague: "));
    assert!(result.api_errors[0].contains("503"));
    assert!(!temp_dir.path().join("site").exists());
    assert_eq!(result.outcome.exit_code(), 2);
    Ok(())
}
