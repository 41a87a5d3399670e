use std::sync::Arc;

use accounts_ox_common::{
    ApiResponse, Notifier,
    request_builder::{Endpoint, HttpMethod, RequestBuilder, RequestConfig},
};
use serde::{Serialize, de::DeserializeOwned};

use crate::AccountsRequestError;

/// Accounts client helper methods using the common RequestBuilder
pub struct AccountsRequestHelper {
    request_builder: RequestBuilder,
}

impl AccountsRequestHelper {
    pub fn new(client: reqwest::Client, base_url: &str, notifier: Arc<dyn Notifier>) -> Self {
        let config = RequestConfig::new(base_url).with_header("accept", "application/json");
        let request_builder = RequestBuilder::new(client, config).with_notifier(notifier);

        Self { request_builder }
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
    ) -> Result<ApiResponse<T>, AccountsRequestError> {
        debug_assert_eq!(endpoint.method, HttpMethod::Get);
        self.request_builder.request(&endpoint).await
    }

    pub async fn send<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        endpoint: Endpoint,
        body: Option<&B>,
    ) -> Result<ApiResponse<T>, AccountsRequestError> {
        self.request_builder.request_json(&endpoint, body).await
    }

    /// Sends a request whose envelope carries no payload the caller needs.
    pub async fn send_unit<B: Serialize + ?Sized>(
        &self,
        endpoint: Endpoint,
        body: Option<&B>,
    ) -> Result<Option<String>, AccountsRequestError> {
        self.send::<serde_json::Value, B>(endpoint, body)
            .await?
            .into_message()
    }
}
