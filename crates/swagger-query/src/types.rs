//! Type definitions for parsed Swagger/OpenAPI documents

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// HTTP methods that can appear as path item keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
    Trace,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Trace => "TRACE",
        }
    }

    /// Match a path item key (or user input) case-insensitively
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_ascii_lowercase().as_str() {
            "get" => Some(HttpMethod::Get),
            "post" => Some(HttpMethod::Post),
            "put" => Some(HttpMethod::Put),
            "patch" => Some(HttpMethod::Patch),
            "delete" => Some(HttpMethod::Delete),
            "head" => Some(HttpMethod::Head),
            "options" => Some(HttpMethod::Options),
            "trace" => Some(HttpMethod::Trace),
            _ => None,
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parameter location in HTTP request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterLocation {
    Query,
    Path,
    Header,
    Cookie,
    /// Swagger 2.0 body parameter
    Body,
    /// Swagger 2.0 form parameter
    FormData,
    /// Any other `in` value, kept verbatim
    Other(String),
}

impl ParameterLocation {
    pub fn from_key(key: &str) -> Self {
        match key {
            "query" => ParameterLocation::Query,
            "path" => ParameterLocation::Path,
            "header" => ParameterLocation::Header,
            "cookie" => ParameterLocation::Cookie,
            "body" => ParameterLocation::Body,
            "formData" => ParameterLocation::FormData,
            other => ParameterLocation::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ParameterLocation::Query => "query",
            ParameterLocation::Path => "path",
            ParameterLocation::Header => "header",
            ParameterLocation::Cookie => "cookie",
            ParameterLocation::Body => "body",
            ParameterLocation::FormData => "formData",
            ParameterLocation::Other(key) => key,
        }
    }
}

impl std::fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parameter of an operation, or a `$ref` to one kept verbatim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Parameter {
    Inline {
        name: String,
        location: ParameterLocation,
        required: bool,
    },
    Reference(String),
}

impl Parameter {
    /// Whether `other` describes the same parameter slot (name + location)
    pub(crate) fn same_slot(&self, other: &Parameter) -> bool {
        match (self, other) {
            (
                Parameter::Inline { name, location, .. },
                Parameter::Inline {
                    name: other_name,
                    location: other_location,
                    ..
                },
            ) => name == other_name && location == other_location,
            (Parameter::Reference(a), Parameter::Reference(b)) => a == b,
            _ => false,
        }
    }
}

/// A single operation (path template + method)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Operation {
    pub operation_id: Option<String>,
    pub summary: Option<String>,
    pub parameters: Vec<Parameter>,
    /// Request body exactly as it appears in the document
    pub request_body: Option<Value>,
    /// Responses keyed by status code, verbatim
    pub responses: Option<IndexMap<String, Value>>,
}

/// All operations under one path template
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathItem {
    /// Operations in document order
    pub operations: IndexMap<HttpMethod, Operation>,
    /// Parameters shared by every operation of the path
    pub parameters: Vec<Parameter>,
}

/// A parsed specification document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpecDocument {
    pub title: Option<String>,
    pub version: Option<String>,
    /// `basePath`, empty when the document has none
    pub base_path: String,
    pub paths: IndexMap<String, PathItem>,
    /// `components.schemas`, or Swagger 2.0 `definitions`
    pub schemas: Option<IndexMap<String, Value>>,
}

// --- Raw Swagger 2.0 / OpenAPI 3.x structures for parsing ---

/// Raw document structure
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSpecDocument {
    pub swagger: Option<String>,
    pub openapi: Option<String>,
    pub info: Option<RawInfo>,
    pub base_path: Option<String>,
    #[serde(default)]
    pub paths: IndexMap<String, IndexMap<String, Value>>,
    pub components: Option<RawComponents>,
    pub definitions: Option<IndexMap<String, Value>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawInfo {
    pub title: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawComponents {
    pub schemas: Option<IndexMap<String, Value>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOperation {
    pub operation_id: Option<String>,
    pub summary: Option<String>,
    /// Kept raw so one odd entry cannot sink the whole operation
    #[serde(default)]
    pub parameters: Vec<Value>,
    pub request_body: Option<Value>,
    pub responses: Option<IndexMap<String, Value>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawParameter {
    /// Parameter name (absent when $ref is used)
    pub name: Option<String>,
    /// Parameter location (absent when $ref is used)
    #[serde(rename = "in")]
    pub location: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(rename = "$ref")]
    pub reference: Option<String>,
}
