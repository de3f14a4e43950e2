//! Spec loading from a URL or a local file

use crate::error::{SpecError, SpecResult};
use crate::types::*;
use indexmap::IndexMap;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Where a spec document comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecSource {
    Url(Url),
    File(PathBuf),
}

impl FromStr for SpecSource {
    type Err = SpecError;

    fn from_str(s: &str) -> SpecResult<Self> {
        match Url::parse(s) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(SpecSource::Url(url)),
            Ok(url) if url.scheme() == "file" => url
                .to_file_path()
                .map(SpecSource::File)
                .map_err(|_| SpecError::Config(format!("Invalid file URL: {}", s))),
            // Anything else (including `C:\...`, which parses with scheme `c`) is a path
            _ => Ok(SpecSource::File(PathBuf::from(s))),
        }
    }
}

impl std::fmt::Display for SpecSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpecSource::Url(url) => write!(f, "{}", url),
            SpecSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Serialization format of a spec document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpecFormat {
    Json,
    Yaml,
}

impl SpecFormat {
    fn from_name(name: &str) -> Self {
        if name.ends_with(".yaml") || name.ends_with(".yml") {
            SpecFormat::Yaml
        } else {
            SpecFormat::Json
        }
    }
}

/// Loads spec documents with a single read per call
pub struct SpecLoader {
    client: reqwest::Client,
}

impl SpecLoader {
    /// Create a loader whose network reads give up after `timeout`
    pub fn new(timeout: Duration) -> SpecResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SpecError::Config(e.to_string()))?;

        Ok(Self { client })
    }

    /// Load and parse a spec document
    pub async fn load(&self, source: &SpecSource) -> SpecResult<SpecDocument> {
        match source {
            SpecSource::Url(url) => self.fetch(url).await,
            SpecSource::File(path) => Self::read_file(path).await,
        }
    }

    async fn fetch(&self, url: &Url) -> SpecResult<SpecDocument> {
        info!("Fetching spec from: {}", url);

        let response = self
            .client
            .get(url.clone())
            .header("Accept", "application/json, application/yaml, text/yaml")
            .send()
            .await
            .map_err(|e| SpecError::Fetch(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SpecError::Fetch(format!(
                "HTTP {} from {}",
                response.status(),
                url
            )));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string())
            .unwrap_or_default();

        let body = response
            .bytes()
            .await
            .map_err(|e| SpecError::Fetch(e.to_string()))?;

        debug!("Received {} bytes ({})", body.len(), content_type);

        let format = if content_type.contains("yaml") {
            SpecFormat::Yaml
        } else {
            SpecFormat::from_name(url.path())
        };

        Self::parse_bytes(&body, format)
    }

    async fn read_file(path: &Path) -> SpecResult<SpecDocument> {
        info!("Reading spec from: {}", path.display());

        let body = tokio::fs::read(path)
            .await
            .map_err(|source| SpecError::FileAccess {
                path: path.to_path_buf(),
                source,
            })?;

        Self::parse_bytes(&body, SpecFormat::from_name(&path.to_string_lossy()))
    }

    fn parse_bytes(body: &[u8], format: SpecFormat) -> SpecResult<SpecDocument> {
        let raw: RawSpecDocument = match format {
            SpecFormat::Json => serde_json::from_slice(body)?,
            SpecFormat::Yaml => serde_yaml::from_slice(body)?,
        };
        Self::convert_spec(raw)
    }

    /// Parse a JSON spec document
    pub fn parse_json(content: &str) -> SpecResult<SpecDocument> {
        Self::parse_bytes(content.as_bytes(), SpecFormat::Json)
    }

    /// Parse a YAML spec document
    pub fn parse_yaml(content: &str) -> SpecResult<SpecDocument> {
        Self::parse_bytes(content.as_bytes(), SpecFormat::Yaml)
    }

    /// Convert a raw document to our internal format
    fn convert_spec(raw: RawSpecDocument) -> SpecResult<SpecDocument> {
        let version_tag = raw
            .openapi
            .as_deref()
            .or(raw.swagger.as_deref())
            .unwrap_or("unknown");
        debug!("Parsing spec (version {}) with {} paths", version_tag, raw.paths.len());

        let paths = raw
            .paths
            .into_iter()
            .map(|(path, item)| {
                let path_item = Self::convert_path_item(&path, item);
                (path, path_item)
            })
            .collect();

        let schemas = raw
            .components
            .and_then(|c| c.schemas)
            .or(raw.definitions);

        let (title, version) = raw
            .info
            .map(|info| (info.title, info.version))
            .unwrap_or_default();

        Ok(SpecDocument {
            title,
            version,
            base_path: raw.base_path.unwrap_or_default(),
            paths,
            schemas,
        })
    }

    /// Operations are keyed by verb; an operation body we cannot read still
    /// counts as an operation so listings never depend on its contents.
    fn convert_path_item(path: &str, raw: IndexMap<String, Value>) -> PathItem {
        let mut item = PathItem::default();

        for (key, value) in raw {
            if let Some(method) = HttpMethod::from_key(&key) {
                let operation = match serde_json::from_value::<RawOperation>(value) {
                    Ok(raw_op) => Self::convert_operation(path, raw_op),
                    Err(e) => {
                        debug!("Unreadable operation {} {}: {}", method, path, e);
                        Operation::default()
                    }
                };
                item.operations.insert(method, operation);
            } else if key == "parameters" {
                match serde_json::from_value::<Vec<Value>>(value) {
                    Ok(raw_params) => item.parameters = Self::convert_parameters(path, raw_params),
                    Err(e) => debug!("Unreadable parameters of {}: {}", path, e),
                }
            } else {
                debug!("Skipping non-operation key '{}' under {}", key, path);
            }
        }

        item
    }

    fn convert_operation(path: &str, raw: RawOperation) -> Operation {
        Operation {
            operation_id: raw.operation_id,
            summary: raw.summary,
            parameters: Self::convert_parameters(path, raw.parameters),
            request_body: raw.request_body,
            responses: raw.responses,
        }
    }

    fn convert_parameters(path: &str, raw: Vec<Value>) -> Vec<Parameter> {
        raw.into_iter()
            .filter_map(|value| match serde_json::from_value::<RawParameter>(value) {
                Ok(param) => Some(Self::convert_parameter(param)),
                Err(e) => {
                    debug!("Skipping unreadable parameter under {}: {}", path, e);
                    None
                }
            })
            .collect()
    }

    fn convert_parameter(raw: RawParameter) -> Parameter {
        // References are kept as-is, never resolved
        if let Some(reference) = raw.reference {
            return Parameter::Reference(reference);
        }

        Parameter::Inline {
            name: raw.name.unwrap_or_default(),
            location: ParameterLocation::from_key(raw.location.as_deref().unwrap_or_default()),
            required: raw.required,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::serve_once;
    use std::io::Write;

    const SWAGGER_SPEC: &str = r##"{
        "swagger": "2.0",
        "info": {"title": "Messaging API", "version": "1.0"},
        "basePath": "/v1",
        "paths": {
            "/{username}/messages": {
                "parameters": [
                    {"name": "username", "in": "path", "required": true}
                ],
                "post": {
                    "operationId": "sendMessage",
                    "parameters": [
                        {"name": "body", "in": "body", "required": true},
                        {"$ref": "#/parameters/Version"}
                    ],
                    "responses": {"200": {"description": "ok"}}
                },
                "get": {}
            }
        },
        "definitions": {
            "Message": {"type": "object"}
        }
    }"##;

    fn loader() -> SpecLoader {
        SpecLoader::new(Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_source_from_str() {
        assert!(matches!(
            "https://api.example.com/docs/swagger.json".parse::<SpecSource>().unwrap(),
            SpecSource::Url(_)
        ));
        assert_eq!(
            "specs/swagger.json".parse::<SpecSource>().unwrap(),
            SpecSource::File(PathBuf::from("specs/swagger.json"))
        );
    }

    #[test]
    fn test_parse_swagger_document() {
        let doc = SpecLoader::parse_json(SWAGGER_SPEC).unwrap();

        assert_eq!(doc.title.as_deref(), Some("Messaging API"));
        assert_eq!(doc.base_path, "/v1");
        assert_eq!(doc.paths.len(), 1);

        let item = &doc.paths["/{username}/messages"];
        let methods: Vec<_> = item.operations.keys().copied().collect();
        assert_eq!(methods, vec![HttpMethod::Post, HttpMethod::Get]);
        assert_eq!(item.parameters.len(), 1);

        let post = &item.operations[&HttpMethod::Post];
        assert_eq!(post.operation_id.as_deref(), Some("sendMessage"));
        assert_eq!(
            post.parameters[1],
            Parameter::Reference("#/parameters/Version".to_string())
        );
        assert!(post.request_body.is_none());
        assert!(doc.schemas.as_ref().unwrap().contains_key("Message"));
    }

    #[test]
    fn test_missing_paths_and_base_path_default() {
        let doc = SpecLoader::parse_json(r#"{"swagger": "2.0"}"#).unwrap();
        assert!(doc.paths.is_empty());
        assert_eq!(doc.base_path, "");
        assert!(doc.schemas.is_none());
    }

    #[test]
    fn test_components_schemas_preferred_over_definitions() {
        let doc = SpecLoader::parse_json(
            r#"{
                "openapi": "3.0.0",
                "paths": {},
                "components": {"schemas": {"User": {"type": "object"}}},
                "definitions": {"Legacy": {}}
            }"#,
        )
        .unwrap();
        let schemas = doc.schemas.unwrap();
        assert!(schemas.contains_key("User"));
        assert!(!schemas.contains_key("Legacy"));
    }

    #[test]
    fn test_unusual_parameters_do_not_fail_the_document() {
        let doc = SpecLoader::parse_json(
            r#"{"paths": {
                "/a/send": {"post": {"parameters": [
                    {"name": "q", "in": "querystring"},
                    {"in": "query"},
                    "not-a-parameter"
                ]}},
                "/b/status": {"get": {}, "put": null}
            }}"#,
        )
        .unwrap();

        let send = &doc.paths["/a/send"].operations[&HttpMethod::Post];
        assert_eq!(
            send.parameters,
            vec![
                Parameter::Inline {
                    name: "q".to_string(),
                    location: ParameterLocation::Other("querystring".to_string()),
                    required: false,
                },
                Parameter::Inline {
                    name: String::new(),
                    location: ParameterLocation::Query,
                    required: false,
                },
            ]
        );

        let status = &doc.paths["/b/status"];
        let methods: Vec<_> = status.operations.keys().copied().collect();
        assert_eq!(methods, vec![HttpMethod::Get, HttpMethod::Put]);
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = SpecLoader::parse_json("<html>nope</html>").unwrap_err();
        assert!(matches!(err, SpecError::Json(_)));
    }

    #[test]
    fn test_parse_yaml() {
        let doc = SpecLoader::parse_yaml(
            r#"
openapi: "3.0.0"
info:
  title: Test API
  version: "1.0.0"
paths:
  /users:
    get:
      operationId: listUsers
    post:
      requestBody:
        content:
          application/json:
            schema:
              $ref: '#/components/schemas/User'
"#,
        )
        .unwrap();

        let item = &doc.paths["/users"];
        assert_eq!(item.operations.len(), 2);
        let body = item.operations[&HttpMethod::Post].request_body.as_ref().unwrap();
        assert_eq!(
            body["content"]["application/json"]["schema"]["$ref"],
            "#/components/schemas/User"
        );
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(SWAGGER_SPEC.as_bytes()).unwrap();

        let source = SpecSource::File(file.path().to_path_buf());
        let doc = loader().load(&source).await.unwrap();
        assert_eq!(doc.base_path, "/v1");
    }

    #[tokio::test]
    async fn test_load_missing_file_is_fetch_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let source = SpecSource::File(dir.path().join("absent.json"));

        let err = loader().load(&source).await.unwrap_err();
        assert!(matches!(err, SpecError::FileAccess { .. }));
        assert!(err.is_fetch());
    }

    #[tokio::test]
    async fn test_fetch_from_url() {
        let url = serve_once(
            "200 OK",
            "application/json",
            r#"{"basePath": "/v1", "paths": {"/a/send": {"post": {}}}}"#,
        )
        .await;

        let doc = loader().load(&url.parse().unwrap()).await.unwrap();
        assert_eq!(doc.base_path, "/v1");
        assert!(doc.paths.contains_key("/a/send"));
    }

    #[tokio::test]
    async fn test_fetch_malformed_body_is_parse_error() {
        let url = serve_once("200 OK", "text/html", "<html>maintenance</html>").await;

        let err = loader().load(&url.parse().unwrap()).await.unwrap_err();
        assert!(err.is_parse(), "unexpected error: {:?}", err);
    }

    #[tokio::test]
    async fn test_fetch_non_success_status_is_fetch_error() {
        let url = serve_once("404 Not Found", "text/plain", "missing").await;

        let err = loader().load(&url.parse().unwrap()).await.unwrap_err();
        assert!(err.is_fetch(), "unexpected error: {:?}", err);
        assert!(err.to_string().contains("404"));
    }
}
