//! # swagger-query
//!
//! Fetch a Swagger/OpenAPI document and query it for endpoint listings and
//! per-operation details.

mod types;
mod loader;
mod query;
mod report;
mod sink;
mod error;
pub mod runner;
pub mod settings;

pub use types::*;
pub use loader::{SpecLoader, SpecSource};
pub use query::{
    DetailReport, DetailView, EndpointQuery, ListingReport, Missing, NotFoundReport,
    OperationReport, DEFAULT_KEYWORDS, DEFAULT_NOT_FOUND_HINT,
};
pub use sink::OutputSink;
pub use error::{SpecError, SpecResult};
pub use runner::{Invocation, QueryKind, RunOutcome};
pub use settings::Settings;
