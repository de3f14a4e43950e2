//! One load, one query, one report
//!
//! [`RunOutcome::failed`] is the only place where typed errors become text.

use crate::error::{SpecError, SpecResult};
use crate::loader::{SpecLoader, SpecSource};
use crate::query::{DetailView, EndpointQuery};
use tracing::warn;

/// What to ask the document
#[derive(Debug, Clone, PartialEq)]
pub enum QueryKind {
    List { keywords: Vec<String> },
    Describe {
        path: String,
        method: String,
        view: DetailView,
    },
}

/// A single query against a single source
#[derive(Debug, Clone)]
pub struct Invocation {
    pub source: SpecSource,
    pub query: QueryKind,
    pub not_found_hint: String,
}

/// Text to hand to the sink
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The full report (a not-found report counts as a report)
    Report(String),
    /// A single `Error: ...` line
    Failed(String),
}

impl RunOutcome {
    /// The one-line report for `e`
    pub fn failed(e: &SpecError) -> Self {
        RunOutcome::Failed(format!("Error: {}\n", e))
    }

    pub fn text(&self) -> &str {
        match self {
            RunOutcome::Report(text) | RunOutcome::Failed(text) => text,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, RunOutcome::Failed(_))
    }
}

/// Load the document and render the requested report
pub async fn execute(loader: &SpecLoader, invocation: &Invocation) -> SpecResult<String> {
    let doc = loader.load(&invocation.source).await?;
    let query = EndpointQuery::new(&doc).with_not_found_hint(invocation.not_found_hint.as_str());

    let report = match &invocation.query {
        QueryKind::List { keywords } => query.listing(keywords.as_slice()).to_string(),
        QueryKind::Describe { path, method, view } => {
            query.describe_operation(path, method, *view).to_string()
        }
    };

    Ok(report)
}

/// Like [`execute`], but any failure becomes a one-line report
pub async fn run(loader: &SpecLoader, invocation: &Invocation) -> RunOutcome {
    match execute(loader, invocation).await {
        Ok(report) => RunOutcome::Report(report),
        Err(e) => {
            warn!("Query against {} failed: {}", invocation.source, e);
            RunOutcome::failed(&e)
        }
    }
}
