//! Endpoint listing and operation detail queries

use crate::types::*;
use indexmap::IndexMap;
use serde_json::Value;

/// Keywords used when the caller does not supply any
pub const DEFAULT_KEYWORDS: &[&str] = &["send", "message", "status", "connection", "check"];

/// Substring that selects the paths listed alongside a not-found report
pub const DEFAULT_NOT_FOUND_HINT: &str = "message";

/// Which parts of an operation a detail report carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailView {
    /// Parameters and request body
    Request,
    /// Responses and component schemas
    Response,
    /// Everything
    Full,
}

impl DetailView {
    fn includes_request(self) -> bool {
        matches!(self, DetailView::Request | DetailView::Full)
    }

    fn includes_response(self) -> bool {
        matches!(self, DetailView::Response | DetailView::Full)
    }
}

/// Result of a listing query
#[derive(Debug, Clone, PartialEq)]
pub struct ListingReport {
    pub base_path: String,
    /// `METHOD path` lines
    pub endpoints: Vec<String>,
}

/// Fields of one operation, as selected by a [`DetailView`]
#[derive(Debug, Clone)]
pub struct DetailReport {
    pub path: String,
    pub method: HttpMethod,
    pub view: DetailView,
    pub parameters: Vec<Parameter>,
    pub request_body: Option<Value>,
    pub responses: Option<IndexMap<String, Value>>,
    pub schemas: Option<IndexMap<String, Value>>,
}

/// What was missing when an operation lookup failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Missing {
    Path,
    Method,
}

/// A lookup for an operation the document does not have
#[derive(Debug, Clone, PartialEq)]
pub struct NotFoundReport {
    pub path: String,
    pub method: String,
    pub missing: Missing,
    /// Paths containing the hint substring, in document order
    pub candidates: Vec<String>,
}

/// Outcome of a detail query
#[derive(Debug, Clone)]
pub enum OperationReport {
    Detail(DetailReport),
    NotFound(NotFoundReport),
}

impl OperationReport {
    pub fn is_found(&self) -> bool {
        matches!(self, OperationReport::Detail(_))
    }
}

/// Read-only queries over a parsed document
pub struct EndpointQuery<'a> {
    doc: &'a SpecDocument,
    not_found_hint: String,
}

impl<'a> EndpointQuery<'a> {
    pub fn new(doc: &'a SpecDocument) -> Self {
        Self {
            doc,
            not_found_hint: DEFAULT_NOT_FOUND_HINT.to_string(),
        }
    }

    /// Override the substring used to pick paths for not-found reports
    pub fn with_not_found_hint(mut self, hint: impl Into<String>) -> Self {
        self.not_found_hint = hint.into();
        self
    }

    /// List `METHOD path` for every path containing any keyword.
    ///
    /// Paths are visited in sorted order, methods in document order.
    /// Matching lowercases both the path and the keywords.
    pub fn list_endpoints<S: AsRef<str>>(&self, keywords: &[S]) -> Vec<String> {
        let keywords: Vec<String> = keywords
            .iter()
            .map(|k| k.as_ref().to_lowercase())
            .collect();

        let mut paths: Vec<&String> = self.doc.paths.keys().collect();
        paths.sort();

        let mut lines = Vec::new();
        for path in paths {
            let lowered = path.to_lowercase();
            if !keywords.iter().any(|k| lowered.contains(k.as_str())) {
                continue;
            }
            for method in self.doc.paths[path].operations.keys() {
                lines.push(format!("{} {}", method, path));
            }
        }

        lines
    }

    /// Listing plus the document's base path
    pub fn listing<S: AsRef<str>>(&self, keywords: &[S]) -> ListingReport {
        ListingReport {
            base_path: self.doc.base_path.clone(),
            endpoints: self.list_endpoints(keywords),
        }
    }

    /// Describe one operation; `method` is matched case-insensitively
    pub fn describe_operation(&self, path: &str, method: &str, view: DetailView) -> OperationReport {
        let Some(item) = self.doc.paths.get(path) else {
            return self.not_found(path, method, Missing::Path);
        };

        let Some((method, operation)) = HttpMethod::from_key(method)
            .and_then(|m| item.operations.get(&m).map(|op| (m, op)))
        else {
            return self.not_found(path, method, Missing::Method);
        };

        let mut report = DetailReport {
            path: path.to_string(),
            method,
            view,
            parameters: Vec::new(),
            request_body: None,
            responses: None,
            schemas: None,
        };

        if view.includes_request() {
            report.parameters = Self::merge_parameters(&item.parameters, &operation.parameters);
            report.request_body = operation.request_body.clone();
        }
        if view.includes_response() {
            report.responses = operation.responses.clone();
            report.schemas = self.doc.schemas.clone();
        }

        OperationReport::Detail(report)
    }

    /// Path-level parameters first, replaced by operation parameters for the same slot
    fn merge_parameters(path_params: &[Parameter], op_params: &[Parameter]) -> Vec<Parameter> {
        let mut parameters: Vec<Parameter> = path_params
            .iter()
            .filter(|p| !op_params.iter().any(|op| op.same_slot(p)))
            .cloned()
            .collect();
        parameters.extend(op_params.iter().cloned());
        parameters
    }

    fn not_found(&self, path: &str, method: &str, missing: Missing) -> OperationReport {
        let candidates = self
            .doc
            .paths
            .keys()
            .filter(|p| p.contains(self.not_found_hint.as_str()))
            .cloned()
            .collect();

        OperationReport::NotFound(NotFoundReport {
            path: path.to_string(),
            method: method.to_uppercase(),
            missing,
            candidates,
        })
    }
}
