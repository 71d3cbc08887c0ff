// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Notion API forwarder.
//!
//! The browser cannot call Notion directly (no CORS, and the integration
//! secret must stay server-side), so requests are relayed through here.
//!
//! Handles:
//! - Repairing `databases/undefined` paths and parentless page bodies with the
//!   configured database ID
//! - Injecting the bearer credential and `Notion-Version` header
//! - Relaying upstream responses, normalizing unreadable error bodies

use crate::config::Config;
use crate::error::AppError;
use axum::http::{Method, StatusCode};
use serde_json::{json, Value};

/// Notion API version sent with every request.
pub const NOTION_VERSION: &str = "2022-06-28";

/// A request to relay, as received under the proxy prefix.
#[derive(Debug, Clone)]
pub struct ProxyRequest {
    pub method: Method,
    /// Path after the proxy prefix, without a leading slash (e.g. `pages`).
    pub path: String,
    /// Raw query string, forwarded unchanged.
    pub query: Option<String>,
    pub body: Option<Value>,
}

/// What goes back to the browser.
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyResponse {
    pub status: StatusCode,
    /// `Null` for a success without a JSON body; sent as an empty body.
    pub body: Value,
}

impl ProxyResponse {
    /// Generic body used when upstream gave nothing usable.
    pub fn generic_error() -> Value {
        json!({ "error": "Internal Server Error" })
    }
}

/// Relays requests to the Notion API.
#[derive(Clone)]
pub struct NotionProxy {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    default_database_id: Option<String>,
}

impl NotionProxy {
    /// Create a forwarder from the startup configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.notion_api_url.trim_end_matches('/').to_string(),
            api_key: config.notion_api_key.clone(),
            default_database_id: config.notion_database_id.clone(),
        }
    }

    /// Full upstream URL for a sub-path.
    pub fn target_url(&self, path: &str, query: Option<&str>) -> String {
        let mut url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        if let Some(q) = query.filter(|q| !q.is_empty()) {
            url.push('?');
            url.push_str(q);
        }
        url
    }

    /// Repair the request, then forward it once.
    ///
    /// Only a missing credential is an error; every upstream outcome,
    /// including network failure, becomes a [`ProxyResponse`].
    pub async fn forward(&self, mut request: ProxyRequest) -> Result<ProxyResponse, AppError> {
        let default_id = self.default_database_id.as_deref();

        if let Some(path) = repair_query_path(&request.path, default_id) {
            tracing::info!("Replacing placeholder database ID in path with configured ID");
            request.path = path;
        } else if has_placeholder_database_id(&request.path) {
            tracing::error!(
                path = %request.path,
                "Client sent placeholder database ID and no default is configured"
            );
        }

        if is_create_page(&request.method, &request.path) {
            if let Some(body) = request.body.as_mut() {
                if parent_lacks_database_id(body) {
                    if repair_create_body(body, default_id) {
                        tracing::info!("Injecting configured database ID into page parent");
                    } else {
                        tracing::error!(
                            "Page create is missing parent database_id and no default is configured"
                        );
                    }
                }
            }
        }

        let url = self.target_url(&request.path, request.query.as_deref());
        tracing::info!(method = %request.method, path = %request.path, target = %url, "Forwarding to Notion");

        let Some(api_key) = self.api_key.as_deref() else {
            tracing::error!("Notion API key is missing");
            return Err(AppError::Configuration(AppError::MISSING_API_KEY.to_string()));
        };

        let mut builder = self
            .http
            .request(request.method.clone(), &url)
            .bearer_auth(api_key)
            .header("Notion-Version", NOTION_VERSION)
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(error = %e, target = %url, "Notion request failed");
                return Ok(ProxyResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    body: ProxyResponse::generic_error(),
                });
            }
        };

        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        let parsed = serde_json::from_str::<Value>(&text).ok();

        if status.is_success() {
            tracing::info!(status = status.as_u16(), "Notion request succeeded");
            if parsed.is_none() && !text.is_empty() {
                tracing::warn!(status = status.as_u16(), "Notion returned a non-JSON success body");
            }
            return Ok(ProxyResponse {
                status,
                body: parsed.unwrap_or(Value::Null),
            });
        }

        let body = parsed.unwrap_or_else(ProxyResponse::generic_error);
        tracing::error!(status = status.as_u16(), body = %body, "Notion request failed");
        match status {
            StatusCode::NOT_FOUND => tracing::warn!(
                "Check that the database ID is correct and the integration has been added to the page or database"
            ),
            StatusCode::UNAUTHORIZED => tracing::warn!("Check that the Notion API key is correct"),
            _ => {}
        }

        Ok(ProxyResponse { status, body })
    }
}

/// Whether `path` has a `databases/undefined` or `databases/null` segment pair.
pub fn has_placeholder_database_id(path: &str) -> bool {
    placeholder_index(path).is_some()
}

fn placeholder_index(path: &str) -> Option<usize> {
    let segments: Vec<&str> = path.split('/').collect();
    segments
        .windows(2)
        .position(|w| w[0] == "databases" && matches!(w[1], "undefined" | "null"))
        .map(|i| i + 1)
}

/// Replace a placeholder database ID in a query path.
///
/// Returns `None` when there is nothing to repair or no default to repair with;
/// the caller then forwards the path unchanged.
pub fn repair_query_path(path: &str, default_id: Option<&str>) -> Option<String> {
    let default_id = default_id?;
    let index = placeholder_index(path)?;

    let mut segments: Vec<&str> = path.split('/').collect();
    segments[index] = default_id;
    Some(segments.join("/"))
}

/// Whether this is `POST pages` (create a page).
pub fn is_create_page(method: &Method, path: &str) -> bool {
    *method == Method::POST && matches!(path, "pages" | "pages/")
}

/// Whether the body has a `parent` object without a usable `database_id`.
pub fn parent_lacks_database_id(body: &Value) -> bool {
    match body.get("parent").and_then(Value::as_object) {
        Some(parent) => match parent.get("database_id") {
            None | Some(Value::Null) => true,
            Some(Value::String(id)) => id.is_empty(),
            Some(_) => false,
        },
        None => false,
    }
}

/// Inject `default_id` as the parent's `database_id` if it is missing.
///
/// Returns true if the body was modified. Bodies that already name a database
/// are left alone.
pub fn repair_create_body(body: &mut Value, default_id: Option<&str>) -> bool {
    let Some(default_id) = default_id else {
        return false;
    };
    if !parent_lacks_database_id(body) {
        return false;
    }

    match body.get_mut("parent").and_then(Value::as_object_mut) {
        Some(parent) => {
            parent.insert("database_id".to_string(), Value::String(default_id.to_string()));
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_proxy(base_url: &str, api_key: Option<&str>, db: Option<&str>) -> NotionProxy {
        NotionProxy::new(&Config {
            notion_api_url: base_url.to_string(),
            notion_api_key: api_key.map(str::to_string),
            notion_database_id: db.map(str::to_string),
            ..Config::default()
        })
    }

    #[test]
    fn test_repair_query_path_placeholders() {
        assert_eq!(
            repair_query_path("databases/undefined/query", Some("db-9")).as_deref(),
            Some("databases/db-9/query")
        );
        assert_eq!(
            repair_query_path("databases/null/query", Some("db-9")).as_deref(),
            Some("databases/db-9/query")
        );
        assert_eq!(repair_query_path("databases/undefined/query", None), None);
        assert_eq!(repair_query_path("databases/abc/query", Some("db-9")), None);
        assert_eq!(repair_query_path("databases/nullable/query", Some("db-9")), None);
    }

    #[test]
    fn test_repair_create_body_only_when_missing() {
        let mut missing = json!({ "parent": {}, "properties": {} });
        assert!(repair_create_body(&mut missing, Some("db-9")));
        assert_eq!(missing["parent"]["database_id"], "db-9");

        let mut null_id = json!({ "parent": { "database_id": null } });
        assert!(repair_create_body(&mut null_id, Some("db-9")));
        assert_eq!(null_id["parent"]["database_id"], "db-9");

        let mut explicit = json!({ "parent": { "database_id": "mine" } });
        let before = explicit.clone();
        assert!(!repair_create_body(&mut explicit, Some("db-9")));
        assert_eq!(explicit, before);

        let mut no_default = json!({ "parent": {} });
        assert!(!repair_create_body(&mut no_default, None));
        assert_eq!(no_default, json!({ "parent": {} }));

        let mut no_parent = json!({ "properties": {} });
        assert!(!repair_create_body(&mut no_parent, Some("db-9")));
    }

    #[test]
    fn test_is_create_page() {
        assert!(is_create_page(&Method::POST, "pages"));
        assert!(is_create_page(&Method::POST, "pages/"));
        assert!(!is_create_page(&Method::PATCH, "pages"));
        assert!(!is_create_page(&Method::POST, "pages/abc"));
    }

    #[tokio::test]
    async fn test_forward_attaches_credentials() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/databases/db-9/query"))
            .and(header("Authorization", "Bearer secret_abc"))
            .and(header("Notion-Version", NOTION_VERSION))
            .and(header("Content-Type", "application/json"))
            .and(body_json(json!({ "page_size": 100 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
            .expect(1)
            .mount(&server)
            .await;

        let proxy = test_proxy(&server.uri(), Some("secret_abc"), Some("db-9"));
        let response = proxy
            .forward(ProxyRequest {
                method: Method::POST,
                path: "databases/undefined/query".to_string(),
                query: None,
                body: Some(json!({ "page_size": 100 })),
            })
            .await
            .unwrap();

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, json!({ "results": [] }));
    }

    #[tokio::test]
    async fn test_forward_without_key_never_calls_upstream() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let proxy = test_proxy(&server.uri(), None, Some("db-9"));
        let err = proxy
            .forward(ProxyRequest {
                method: Method::POST,
                path: "pages".to_string(),
                query: None,
                body: Some(json!({ "parent": {} })),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_forward_relays_upstream_error() {
        let server = MockServer::start().await;
        let error_body = json!({ "object": "error", "status": 400, "message": "bad property" });

        Mock::given(method("POST"))
            .and(path("/pages"))
            .respond_with(ResponseTemplate::new(400).set_body_json(&error_body))
            .mount(&server)
            .await;

        let proxy = test_proxy(&server.uri(), Some("secret_abc"), None);
        let response = proxy
            .forward(ProxyRequest {
                method: Method::POST,
                path: "pages".to_string(),
                query: None,
                body: Some(json!({ "parent": { "database_id": "x" } })),
            })
            .await
            .unwrap();

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.body, error_body);
    }

    #[tokio::test]
    async fn test_forward_network_error_is_generic_500() {
        // Nothing listens on port 1.
        let proxy = test_proxy("http://127.0.0.1:1", Some("secret_abc"), None);
        let response = proxy
            .forward(ProxyRequest {
                method: Method::GET,
                path: "users/me".to_string(),
                query: None,
                body: None,
            })
            .await
            .unwrap();

        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.body, ProxyResponse::generic_error());
    }

    #[tokio::test]
    async fn test_forward_success_without_body_stays_success() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/blocks/b1"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let proxy = test_proxy(&server.uri(), Some("secret_abc"), None);
        let response = proxy
            .forward(ProxyRequest {
                method: Method::DELETE,
                path: "blocks/b1".to_string(),
                query: None,
                body: None,
            })
            .await
            .unwrap();

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, Value::Null);
    }

    #[test]
    fn test_target_url_keeps_query() {
        let proxy = test_proxy("https://api.notion.com/v1/", Some("k"), None);
        assert_eq!(
            proxy.target_url("/users", Some("page_size=10")),
            "https://api.notion.com/v1/users?page_size=10"
        );
        assert_eq!(proxy.target_url("pages", Some("")), "https://api.notion.com/v1/pages");
    }
}
