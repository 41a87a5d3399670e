use crate::{
    envelope::ApiResponse,
    error::{self, ApiError},
    notify::{LogNotifier, Notifier},
};
use reqwest::{Method, RequestBuilder as ReqwestRequestBuilder, Response};
use serde::{Serialize, de::DeserializeOwned};
use std::{collections::HashMap, sync::Arc};

/// HTTP method for API endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl From<HttpMethod> for Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
        }
    }
}

/// Represents an API endpoint with its configuration
#[derive(Debug, Clone)]
pub struct Endpoint {
    pub path: String,
    pub method: HttpMethod,
    pub query_params: Option<Vec<(String, String)>>,
}

impl Endpoint {
    pub fn new(path: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            path: path.into(),
            method,
            query_params: None,
        }
    }

    pub fn with_query_params(mut self, params: Vec<(String, String)>) -> Self {
        self.query_params = Some(params);
        self
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params
            .get_or_insert_with(Vec::new)
            .push((key.into(), value.into()));
        self
    }
}

/// Configuration for request building
#[derive(Debug, Clone)]
pub struct RequestConfig {
    pub base_url: String,
    pub default_headers: HashMap<String, String>,
}

impl RequestConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            default_headers: HashMap::new(),
        }
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }
}

/// Single outbound channel to the accounts API.
///
/// Every request carries the cookie jar of the underlying `reqwest::Client`, the configured
/// base path and a JSON content type. Requests are sent once: there is no retry, backoff or
/// client-side timeout, and 401 responses are returned to the caller untouched.
#[derive(Clone)]
pub struct RequestBuilder {
    client: reqwest::Client,
    config: RequestConfig,
    notifier: Arc<dyn Notifier>,
}

impl RequestBuilder {
    pub fn new(client: reqwest::Client, config: RequestConfig) -> Self {
        Self {
            client,
            config,
            notifier: Arc::new(LogNotifier),
        }
    }

    /// Replace the sink used for validation-error notifications
    #[must_use]
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn config(&self) -> &RequestConfig {
        &self.config
    }

    /// Build a reqwest RequestBuilder for the given endpoint
    pub fn build_request(&self, endpoint: &Endpoint) -> ReqwestRequestBuilder {
        let url = format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint.path.trim_start_matches('/')
        );
        let method: Method = endpoint.method.into();

        let mut req = self
            .client
            .request(method, &url)
            .header("content-type", "application/json");

        if let Some(ref params) = endpoint.query_params {
            req = req.query(&params);
        }

        for (key, value) in &self.config.default_headers {
            req = req.header(key, value);
        }

        req
    }

    /// Execute a request with JSON body and return the decoded envelope
    pub async fn request_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        endpoint: &Endpoint,
        body: Option<&B>,
    ) -> Result<ApiResponse<T>, ApiError> {
        let mut req = self.build_request(endpoint);

        if let Some(body) = body {
            let val = serde_json::to_value(body)?;
            log::trace!("{:?} {} payload: {}", endpoint.method, endpoint.path, val);
            req = req.json(&val);
        }

        log::debug!("{:?} {}", endpoint.method, endpoint.path);
        let res = match req.send().await {
            Ok(res) => res,
            Err(e) => {
                log::warn!("{:?} {} failed: {e}", endpoint.method, endpoint.path);
                return Err(e.into());
            }
        };
        self.handle_response(endpoint, res).await
    }

    /// Execute a request without body and return the decoded envelope
    pub async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
    ) -> Result<ApiResponse<T>, ApiError> {
        self.request_json::<T, ()>(endpoint, None).await
    }

    /// Handle response, notify on validation failures and parse errors
    async fn handle_response<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        res: Response,
    ) -> Result<ApiResponse<T>, ApiError> {
        let status = res.status();
        let bytes = res.bytes().await?;

        if status.is_success() {
            return serde_json::from_slice::<ApiResponse<T>>(&bytes).map_err(|e| {
                let body_str = String::from_utf8_lossy(&bytes);
                ApiError::UnexpectedResponse(format!(
                    "HTTP {} but failed to decode JSON: {}; body: {}",
                    status.as_u16(),
                    e,
                    body_str
                ))
            });
        }

        let err = error::parse_error_response(status, &bytes);
        log::warn!(
            "{:?} {} returned {}: {err}",
            endpoint.method,
            endpoint.path,
            status.as_u16()
        );
        if let ApiError::Validation { ref message } = err {
            self.notifier.error(message);
        }
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_accumulates_query() {
        let endpoint = Endpoint::new("orgs/accept-invite", HttpMethod::Post).with_query("token", "abc");
        assert_eq!(
            endpoint.query_params,
            Some(vec![("token".to_string(), "abc".to_string())])
        );
    }

    #[test]
    fn http_method_conversion() {
        assert_eq!(Method::from(HttpMethod::Get), Method::GET);
        assert_eq!(Method::from(HttpMethod::Post), Method::POST);
        assert_eq!(Method::from(HttpMethod::Put), Method::PUT);
        assert_eq!(Method::from(HttpMethod::Delete), Method::DELETE);
    }

    #[test]
    fn url_joins_without_double_slash() {
        let builder = RequestBuilder::new(
            reqwest::Client::new(),
            RequestConfig::new("http://localhost:8080/api/"),
        );
        let req = builder
            .build_request(&Endpoint::new("/auth/ustatus", HttpMethod::Get))
            .build()
            .unwrap();
        assert_eq!(req.url().as_str(), "http://localhost:8080/api/auth/ustatus");
        assert_eq!(
            req.headers().get("content-type").unwrap(),
            "application/json"
        );
    }
}
