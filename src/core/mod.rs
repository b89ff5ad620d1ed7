pub mod enrich;
pub mod extract;
pub mod quality;
pub mod query;
pub mod research;
pub mod validate;

pub use crate::domain::model::{Dataset, Event, EventImpact, Service, ServiceLookup, Source};
pub use crate::domain::ports::{ConfigProvider, Researcher, SourceValidator};
pub use crate::utils::error::Result;
