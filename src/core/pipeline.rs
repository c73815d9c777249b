use crate::adapters::model_writer::to_model_string;
use crate::config::toml_config::RefreshConfig;
use crate::core::normalize::normalize;
use crate::core::result::{PipelineState, RefreshOutcome, RefreshResult};
use crate::core::sample::sample_site;
use crate::domain::{Country, FixtureClient, FixtureRequest, League, Match, Site, Storage};
use crate::rules::RuleSet;
use crate::site::{compile, write_pages};
use crate::utils::monitor::SystemMonitor;
use chrono::Utc;

/// Fetch → normalize → validate → write, ending in exactly one
/// [`RefreshOutcome`].
///
/// Per-league fetch failures never abort the run; they are counted against
/// `fetch.min_success_rate` and reported in the result.
pub struct RefreshPipeline<C: FixtureClient, S: Storage> {
    client: C,
    storage: S,
    config: RefreshConfig,
    rules: RuleSet,
    monitor: SystemMonitor,
}

struct FetchedCountry {
    name: String,
    leagues: Vec<FetchedLeague>,
}

struct FetchedLeague {
    name: String,
    matches: Vec<Match>,
    /// Fetch returned without error and at least one fixture survived
    /// normalization.
    succeeded: bool,
}

/// Accounting collected while the run advances.
struct Run {
    stages: Vec<PipelineState>,
    countries_requested: usize,
    countries_succeeded: usize,
    leagues_requested: usize,
    leagues_succeeded: usize,
    success_rate: f64,
    used_sample: bool,
    total_matches: usize,
    api_errors: Vec<String>,
    diagnostics: Vec<String>,
    write_errors: Vec<String>,
    pages_written: usize,
    model_written: bool,
}

impl Run {
    fn enter(&mut self, state: PipelineState) {
        tracing::debug!("Pipeline state: {:?}", state);
        self.stages.push(state);
    }

    fn finish(mut self, outcome: RefreshOutcome) -> RefreshResult {
        self.enter(PipelineState::Done(outcome));
        RefreshResult {
            outcome,
            stages: self.stages,
            countries_requested: self.countries_requested,
            countries_succeeded: self.countries_succeeded,
            countries_failed: self.countries_requested - self.countries_succeeded,
            leagues_requested: self.leagues_requested,
            leagues_succeeded: self.leagues_succeeded,
            success_rate: self.success_rate,
            used_sample: self.used_sample,
            total_matches: self.total_matches,
            diagnostic_count: self.diagnostics.len(),
            api_errors: self.api_errors,
            diagnostics: self.diagnostics,
            write_errors: self.write_errors,
            pages_written: self.pages_written,
            model_written: self.model_written,
            finished_at: Utc::now(),
        }
    }
}

impl<C: FixtureClient, S: Storage> RefreshPipeline<C, S> {
    pub fn new(client: C, storage: S, config: RefreshConfig) -> Self {
        let monitor = SystemMonitor::new(config.monitoring_enabled());
        Self {
            client,
            storage,
            config,
            rules: RuleSet::standard(),
            monitor,
        }
    }

    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    pub fn config(&self) -> &RefreshConfig {
        &self.config
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub async fn run(&self) -> RefreshResult {
        let result = self.advance().await;
        self.monitor.finish();
        result
    }

    async fn advance(&self) -> RefreshResult {
        tracing::info!("🚀 Starting refresh for site '{}'", self.config.site.name);

        let mut run = Run {
            stages: Vec::with_capacity(5),
            countries_requested: self.config.fetch.countries.len(),
            countries_succeeded: 0,
            leagues_requested: self.config.leagues_requested(),
            leagues_succeeded: 0,
            success_rate: 0.0,
            used_sample: false,
            total_matches: 0,
            api_errors: Vec::new(),
            diagnostics: Vec::new(),
            write_errors: Vec::new(),
            pages_written: 0,
            model_written: false,
        };

        // Fetch
        run.enter(PipelineState::Fetching);
        self.monitor.enter_stage("fetch");
        let fetched = self.fetch(&mut run.api_errors).await;

        run.leagues_succeeded = fetched
            .iter()
            .flat_map(|c| c.leagues.iter())
            .filter(|l| l.succeeded)
            .count();
        run.countries_succeeded = fetched
            .iter()
            .filter(|c| c.leagues.iter().any(|l| l.succeeded))
            .count();
        if run.leagues_requested > 0 {
            run.success_rate = run.leagues_succeeded as f64 / run.leagues_requested as f64;
        }
        tracing::info!(
            "📡 Fetched {}/{} leagues ({:.0}%), {} error(s)",
            run.leagues_succeeded,
            run.leagues_requested,
            run.success_rate * 100.0,
            run.api_errors.len()
        );

        run.used_sample = self.config.fetch.fallback_to_sample && run.leagues_succeeded == 0;
        if run.used_sample {
            tracing::warn!("No league returned usable matches, publishing the built-in sample site");
        } else if run.success_rate < self.config.fetch.min_success_rate {
            tracing::error!(
                "❌ Success rate {:.2} is below the minimum {:.2}",
                run.success_rate,
                self.config.fetch.min_success_rate
            );
            run.total_matches = fetched
                .iter()
                .flat_map(|c| c.leagues.iter())
                .map(|l| l.matches.len())
                .sum();
            return run.finish(RefreshOutcome::FetchBelowThreshold);
        }

        // Normalize
        run.enter(PipelineState::Normalizing);
        self.monitor.enter_stage("normalize");
        let site = if run.used_sample {
            sample_site(&self.config.site.name)
        } else {
            self.assemble(fetched)
        };
        run.total_matches = site.total_matches();
        tracing::info!("📊 Assembled {} match(es)", run.total_matches);

        // Validate
        run.enter(PipelineState::Validating);
        self.monitor.enter_stage("validate");
        let diagnostics = self.rules.evaluate(&site);
        if !diagnostics.is_empty() {
            tracing::error!("❌ Validation failed with {} diagnostic(s)", diagnostics.len());
            for d in &diagnostics {
                tracing::debug!("{}", d);
            }
            run.diagnostics = diagnostics.iter().map(ToString::to_string).collect();
            return run.finish(RefreshOutcome::ValidationFailed);
        }

        // Write
        run.enter(PipelineState::Writing);
        self.monitor.enter_stage("write");
        let pages = compile(&site);
        let report = write_pages(&self.storage, &self.config.output.site_dir, &pages).await;
        run.pages_written = report.written.len();
        run.write_errors = report.failures;

        if let Some(model_file) = &self.config.output.model_file {
            let model = to_model_string(&site);
            match self.storage.write_file(model_file, model.as_bytes()).await {
                Ok(()) => run.model_written = true,
                Err(e) => run.write_errors.push(format!("{}: {}", model_file, e)),
            }
        }

        if run.write_errors.is_empty() {
            tracing::info!("✅ Wrote {} page(s)", run.pages_written);
            run.finish(RefreshOutcome::Success)
        } else {
            tracing::error!("❌ {} write failure(s)", run.write_errors.len());
            run.finish(RefreshOutcome::WriteError)
        }
    }

    async fn fetch(&self, api_errors: &mut Vec<String>) -> Vec<FetchedCountry> {
        let season = self.config.fetch.season.to_string();
        let mut countries = Vec::with_capacity(self.config.fetch.countries.len());

        for country in &self.config.fetch.countries {
            let mut leagues = Vec::with_capacity(country.leagues.len());

            for league in &country.leagues {
                let request = FixtureRequest {
                    country_code: country.code.clone(),
                    league_id: league.id.clone(),
                    season: season.clone(),
                };

                let (matches, succeeded) = match self.client.fetch_fixtures(&request).await {
                    Ok(fixtures) => {
                        let matches = normalize(&fixtures);
                        tracing::debug!(
                            "{}/{}: {} fixture(s), {} usable",
                            country.name,
                            league.name,
                            fixtures.len(),
                            matches.len()
                        );
                        let succeeded = !matches.is_empty();
                        (matches, succeeded)
                    }
                    Err(e) => {
                        tracing::warn!("{}/{} fetch failed: {}", country.name, league.name, e);
                        api_errors.push(format!("{}/{}: {}", country.name, league.name, e));
                        (Vec::new(), false)
                    }
                };

                leagues.push(FetchedLeague {
                    name: league.name.clone(),
                    matches,
                    succeeded,
                });
            }

            countries.push(FetchedCountry {
                name: country.name.clone(),
                leagues,
            });
        }

        countries
    }

    fn assemble(&self, fetched: Vec<FetchedCountry>) -> Site {
        let season = self.config.season_label();
        let countries = fetched
            .into_iter()
            .map(|country| {
                let leagues = country
                    .leagues
                    .into_iter()
                    .map(|league| League::new(league.name, season.as_str(), league.matches))
                    .collect();
                Country::new(country.name, leagues)
            })
            .collect();
        Site::with_navigation_from_countries(self.config.site.name.as_str(), countries)
    }
}
