//! REST resource client for the club backend
//!
//! Wraps a cookie-carrying `reqwest` client. The session cookie travels in
//! the jar; every state-changing request also carries the anti-forgery
//! header whose value is read back from the CSRF cookie.

use std::sync::Arc;
use std::time::Duration;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use url::Url;
use crate::config::settings::{ApiConfig, Settings};
use crate::utils::errors::{ApiError, ApiResult, ClubPortalError, Result};
use crate::utils::helpers::truncate_text;
use crate::utils::logging;

/// `{"detail": "..."}` acknowledgement returned by action endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct Detail {
    #[serde(default)]
    pub detail: String,
}

/// Generic authenticated HTTP client for the club REST API
#[derive(Clone, Debug)]
pub struct ResourceClient {
    client: Client,
    jar: Arc<Jar>,
    root: Url,
    api: ApiConfig,
}

impl ResourceClient {
    /// Create a client with an empty cookie jar
    pub fn new(settings: &Settings) -> Result<Self> {
        Self::with_jar(settings, Arc::new(Jar::default()))
    }

    /// Create a client sharing an existing cookie jar
    pub fn with_jar(settings: &Settings, jar: Arc<Jar>) -> Result<Self> {
        let root = Url::parse(&settings.api_root())?;

        let client = Client::builder()
            .timeout(Duration::from_secs(settings.api.timeout_seconds))
            .user_agent(settings.api.user_agent.clone())
            .cookie_provider(jar.clone())
            .build()
            .map_err(ClubPortalError::Http)?;

        Ok(Self {
            client,
            jar,
            root,
            api: settings.api.clone(),
        })
    }

    /// Base URL all resource paths are joined onto
    pub fn root(&self) -> &Url {
        &self.root
    }

    /// Cookie jar backing the session
    pub fn jar(&self) -> &Arc<Jar> {
        &self.jar
    }

    /// Current anti-forgery token, URL-decoded from its cookie
    pub fn csrf_token(&self) -> Option<String> {
        let header = self.jar.cookies(&self.root)?;
        let cookies = header.to_str().ok()?;
        let prefix = format!("{}=", self.api.csrf_cookie_name);

        cookies
            .split(';')
            .map(str::trim)
            .find_map(|cookie| cookie.strip_prefix(prefix.as_str()))
            .map(|raw| {
                urlencoding::decode(raw)
                    .map(|decoded| decoded.into_owned())
                    .unwrap_or_else(|_| raw.to_string())
            })
    }

    /// GET a resource and decode it
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let request = self.request(Method::GET, path)?;
        let response = self.execute(path, request).await?;
        Self::decode(path, response).await
    }

    /// GET a resource with query parameters
    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> ApiResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let request = self.request(Method::GET, path)?.query(query);
        let response = self.execute(path, request).await?;
        Self::decode(path, response).await
    }

    /// POST a JSON body
    pub async fn post<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::POST, path)?.json(body);
        let response = self.execute(path, request).await?;
        Self::decode(path, response).await
    }

    /// PATCH a JSON body
    pub async fn patch<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::PATCH, path)?.json(body);
        let response = self.execute(path, request).await?;
        Self::decode(path, response).await
    }

    /// DELETE a resource; the response body is ignored
    pub async fn delete(&self, path: &str) -> ApiResult<()> {
        let request = self.request(Method::DELETE, path)?;
        self.execute(path, request).await?;
        Ok(())
    }

    fn request(&self, method: Method, path: &str) -> ApiResult<RequestBuilder> {
        let url = self
            .root
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::InvalidResponse {
                path: path.to_string(),
                message: format!("invalid resource path: {}", e),
            })?;

        logging::log_api_request(method.as_str(), path);

        let is_mutation = !matches!(method, Method::GET | Method::HEAD | Method::OPTIONS);
        let mut request = self.client.request(method, url);

        if is_mutation {
            match self.csrf_token() {
                Some(token) => {
                    request = request.header(self.api.csrf_header_name.as_str(), token);
                }
                None => debug!(path = path, "No CSRF cookie present for mutating request"),
            }
        }

        Ok(request)
    }

    async fn execute(&self, path: &str, request: RequestBuilder) -> ApiResult<Response> {
        let response = request.send().await.map_err(|e| {
            let err = if e.is_timeout() {
                ApiError::Timeout { path: path.to_string() }
            } else {
                ApiError::Unreachable {
                    path: path.to_string(),
                    message: e.to_string(),
                }
            };
            logging::log_api_error(path, &err.to_string(), Some("transport"));
            err
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = ApiError::Status {
                path: path.to_string(),
                status,
                detail: error_detail(&body),
            };
            debug!(path = path, status = %status, error = %err, "API request rejected");
            return Err(err);
        }

        debug!(path = path, status = %status, "API request succeeded");
        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(path: &str, response: Response) -> ApiResult<T> {
        let bytes = response.bytes().await.map_err(|e| ApiError::Unreachable {
            path: path.to_string(),
            message: e.to_string(),
        })?;

        // empty bodies (204) decode as JSON null
        let bytes: &[u8] = if bytes.is_empty() { b"null" } else { &bytes };

        serde_json::from_slice(bytes).map_err(|e| ApiError::InvalidResponse {
            path: path.to_string(),
            message: e.to_string(),
        })
    }
}

/// Extract a human readable message from an error body.
///
/// DRF answers with `{"detail": "..."}` or with per-field lists such as
/// `{"username": ["This field is required."]}`.
fn error_detail(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => {
            if let Some(detail) = map.get("detail").and_then(Value::as_str) {
                return detail.to_string();
            }

            map.iter()
                .map(|(field, messages)| {
                    let text = match messages {
                        Value::Array(items) => items
                            .iter()
                            .map(|item| item.as_str().map(str::to_string).unwrap_or_else(|| item.to_string()))
                            .collect::<Vec<_>>()
                            .join(" "),
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    format!("{}: {}", field, text)
                })
                .collect::<Vec<_>>()
                .join("; ")
        }
        Ok(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join("; "),
        _ => truncate_text(body.trim(), 200),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ResourceClient {
        let mut settings = Settings::default();
        settings.api.base_url = "http://club.test".to_string();
        ResourceClient::new(&settings).unwrap()
    }

    #[test]
    fn test_error_detail_shapes() {
        assert_eq!(error_detail(r#"{"detail": "Invalid credentials"}"#), "Invalid credentials");
        assert_eq!(
            error_detail(r#"{"username": ["This field is required."]}"#),
            "username: This field is required."
        );
        assert_eq!(error_detail(r#"["Passwords do not match"]"#), "Passwords do not match");
        assert_eq!(error_detail("<h1>Server Error</h1>"), "<h1>Server Error</h1>");
    }

    #[test]
    fn test_csrf_token_is_read_from_cookie() {
        let client = client();
        assert_eq!(client.csrf_token(), None);

        let url = client.root().clone();
        client.jar().add_cookie_str("sessionid=abc; Path=/", &url);
        client.jar().add_cookie_str("csrftoken=tok%2Fen; Path=/", &url);

        assert_eq!(client.csrf_token().as_deref(), Some("tok/en"));
    }

    #[test]
    fn test_root_url() {
        assert_eq!(client().root().as_str(), "http://club.test/api/");
    }
}
