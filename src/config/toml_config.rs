use crate::utils::error::{Result, SiteError};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_range, validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern"));

/// Settings of one refresh run, read from a TOML file.
///
/// ```toml
/// [site]
/// name = "AllEuropeResults"
///
/// [api]
/// base_url = "https://v3.football.api-sports.io"
/// api_key = "${API_FOOTBALL_KEY}"
///
/// [fetch]
/// season = 2025
/// min_success_rate = 0.5
///
/// [[fetch.countries]]
/// name = "Germany"
/// code = "DE"
/// leagues = [{ name = "Bundesliga", id = "78" }]
///
/// [output]
/// path = "./output"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshConfig {
    pub site: SiteConfig,
    pub api: ApiConfig,
    pub fetch: FetchConfig,
    pub output: OutputConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout_seconds: Option<u64>,
    /// The vendor only reports the venue city, which is the home side's.
    /// Away cities are looked up here by team name.
    #[serde(default)]
    pub team_cities: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Season start year, e.g. 2025 for the 2025-2026 season.
    pub season: i32,
    #[serde(default = "default_min_success_rate")]
    pub min_success_rate: f64,
    /// Publish the built-in sample site when no league returned fixtures.
    #[serde(default)]
    pub fallback_to_sample: bool,
    pub countries: Vec<CountrySpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountrySpec {
    pub name: String,
    pub code: String,
    pub leagues: Vec<LeagueSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueSpec {
    pub name: String,
    /// Vendor league id.
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
    #[serde(default = "default_site_dir")]
    pub site_dir: String,
    /// File name of the `.fb` model artifact; not written when absent.
    pub model_file: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

fn default_min_success_rate() -> f64 {
    0.5
}

fn default_site_dir() -> String {
    "site".to_string()
}

impl RefreshConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content =
            std::fs::read_to_string(&path).map_err(|e| SiteError::ConfigError {
                message: format!("cannot read {}: {}", path.as_ref().display(), e),
            })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);

        toml::from_str(&processed).map_err(|e| SiteError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the variable's value. Unset variables are left
    /// as written so validation can point at them.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_PATTERN
            .replace_all(content, |caps: &regex::Captures| {
                let name = &caps[1];
                std::env::var(name).unwrap_or_else(|_| format!("${{{}}}", name))
            })
            .into_owned()
    }

    /// Season string used on every generated league, e.g. `2025-2026`.
    pub fn season_label(&self) -> String {
        format!("{}-{}", self.fetch.season, self.fetch.season + 1)
    }

    pub fn leagues_requested(&self) -> usize {
        self.fetch.countries.iter().map(|c| c.leagues.len()).sum()
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("site.name", &self.site.name)?;
        validate_url("api.base_url", &self.api.base_url)?;
        validate_non_empty_string("api.api_key", &self.api.api_key)?;
        if ENV_VAR_PATTERN.is_match(&self.api.api_key) {
            return Err(SiteError::MissingConfigError {
                field: format!("api.api_key ({} is not set)", self.api.api_key),
            });
        }
        if let Some(timeout) = self.api.timeout_seconds {
            validate_range("api.timeout_seconds", timeout, 1, 600)?;
        }

        validate_range("fetch.season", self.fetch.season, 1900, 9998)?;
        validate_range("fetch.min_success_rate", self.fetch.min_success_rate, 0.0, 1.0)?;
        if self.fetch.countries.is_empty() {
            return Err(SiteError::MissingConfigError {
                field: "fetch.countries".to_string(),
            });
        }

        let mut names = HashSet::new();
        for (i, country) in self.fetch.countries.iter().enumerate() {
            validate_non_empty_string(&format!("fetch.countries[{}].name", i), &country.name)?;
            validate_non_empty_string(&format!("fetch.countries[{}].code", i), &country.code)?;
            if !names.insert(country.name.as_str()) {
                return Err(SiteError::ConfigValidationError {
                    field: format!("fetch.countries[{}].name", i),
                    message: format!("Country '{}' is configured twice", country.name),
                });
            }
            for (j, league) in country.leagues.iter().enumerate() {
                let field = format!("fetch.countries[{}].leagues[{}]", i, j);
                validate_non_empty_string(&format!("{}.name", field), &league.name)?;
                validate_non_empty_string(&format!("{}.id", field), &league.id)?;
            }
        }

        validate_path("output.path", &self.output.path)?;
        validate_path("output.site_dir", &self.output.site_dir)?;
        if let Some(model_file) = &self.output.model_file {
            validate_path("output.model_file", model_file)?;
        }

        Ok(())
    }
}

impl Validate for RefreshConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
