pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod rules;
pub mod site;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::RefreshConfig;

pub use adapters::{HttpFixtureClient, LocalStorage, MemoryStorage};
pub use core::{RefreshOutcome, RefreshPipeline, RefreshResult};
pub use domain::{Country, League, Match, Site, SourcePos};
pub use rules::{Diagnostic, RuleSet};
pub use site::{compile, compile_checked, PageDescription, PageKind};
pub use utils::error::{Result, SiteError};
