use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Terminal outcome of a refresh run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RefreshOutcome {
    Success,
    /// Too few leagues returned fixtures; nothing was validated or written.
    FetchBelowThreshold,
    /// The assembled site broke at least one rule; nothing was written.
    ValidationFailed,
    /// At least one page or the model file could not be persisted.
    WriteError,
}

impl RefreshOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RefreshOutcome::Success)
    }

    /// Process exit code for the refresh binary.
    pub fn exit_code(&self) -> i32 {
        match self {
            RefreshOutcome::Success => 0,
            RefreshOutcome::FetchBelowThreshold => 2,
            RefreshOutcome::ValidationFailed => 4,
            RefreshOutcome::WriteError => 5,
        }
    }
}

impl fmt::Display for RefreshOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RefreshOutcome::Success => "SUCCESS",
            RefreshOutcome::FetchBelowThreshold => "FETCH_BELOW_THRESHOLD",
            RefreshOutcome::ValidationFailed => "VALIDATION_FAILED",
            RefreshOutcome::WriteError => "WRITE_ERROR",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PipelineState {
    Fetching,
    Normalizing,
    Validating,
    Writing,
    Done(RefreshOutcome),
}

/// Everything a caller needs to tell "no data" from "bad data" from
/// "couldn't persist".
#[derive(Debug, Clone, Serialize)]
pub struct RefreshResult {
    pub outcome: RefreshOutcome,
    /// States visited, in order, ending with `Done`.
    pub stages: Vec<PipelineState>,
    pub countries_requested: usize,
    pub countries_succeeded: usize,
    pub countries_failed: usize,
    pub leagues_requested: usize,
    pub leagues_succeeded: usize,
    pub success_rate: f64,
    /// True when the built-in sample site replaced fetched data.
    pub used_sample: bool,
    pub total_matches: usize,
    pub diagnostic_count: usize,
    /// `"<Country>/<League>: <error>"` per failed fetch.
    pub api_errors: Vec<String>,
    pub diagnostics: Vec<String>,
    pub write_errors: Vec<String>,
    pub pages_written: usize,
    pub model_written: bool,
    pub finished_at: DateTime<Utc>,
}

impl RefreshResult {
    pub fn is_success(&self) -> bool {
        self.outcome.is_success()
    }

    /// Multi-line report for terminal output.
    pub fn summary(&self) -> String {
        let mut lines = vec![
            format!("Outcome: {}", self.outcome),
            format!(
                "Countries: {} requested, {} succeeded, {} failed",
                self.countries_requested, self.countries_succeeded, self.countries_failed
            ),
            format!(
                "Leagues: {}/{} succeeded ({:.0}%)",
                self.leagues_succeeded,
                self.leagues_requested,
                self.success_rate * 100.0
            ),
            format!("Matches: {}", self.total_matches),
        ];
        if self.used_sample {
            lines.push("Data: built-in sample site".to_string());
        }
        if self.outcome == RefreshOutcome::Success || self.outcome == RefreshOutcome::WriteError {
            lines.push(format!(
                "Pages written: {}, model written: {}",
                self.pages_written, self.model_written
            ));
        }

        let sections = [
            ("API errors", &self.api_errors),
            ("Diagnostics", &self.diagnostics),
            ("Write errors", &self.write_errors),
        ];
        for (title, items) in sections {
            if !items.is_empty() {
                lines.push(format!("{} ({}):", title, items.len()));
                lines.extend(items.iter().map(|item| format!("  - {}", item)));
            }
        }
        lines.join("\n")
    }
}
