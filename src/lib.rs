pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::CliConfig;
pub use core::enrich::Enricher;
pub use core::research::ClaudeCli;
pub use core::validate::HttpValidator;
pub use domain::model::{Dataset, Event, EventImpact, Feature, Service, ServiceLookup, Source};
pub use domain::ports::{ConfigProvider, Researcher, SourceValidator};
pub use utils::error::{EnrichError, Result};
