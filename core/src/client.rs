//! The products API client.
//!
//! # Design
//! `CatalogClient` holds the resolved base URL and a `Transport`, nothing
//! else. Every domain operation is split into a pure `build_*` method that
//! validates input and produces an `HttpRequest`, and a shared `execute`
//! step that performs the round trip and turns the outcome into either the
//! decoded JSON body or an `ApiError`. `invoke` is the generic entry point
//! the domain operations are written in terms of.

use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{ApiError, Error, ValidationError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::transport::UreqTransport;
use crate::types::{Confirmation, ListQuery, NewProduct, StockUpdate};

const PRODUCTS_PATH: &str = "/api/products/";

/// Synchronous client for the products API. One call, one round trip.
#[derive(Debug, Clone)]
pub struct CatalogClient<T = UreqTransport> {
    base_url: String,
    transport: T,
}

impl CatalogClient<UreqTransport> {
    /// Client using the blocking `ureq` transport with the configured timeout.
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_transport(config, UreqTransport::new(config.timeout))
    }
}

impl<T: Transport> CatalogClient<T> {
    pub fn with_transport(config: &ClientConfig, transport: T) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Perform `method` against `base + path`, sending `body` as JSON when
    /// present, and return the decoded response body.
    pub fn invoke(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        let request = self.build_request(method, path, body)?;
        self.execute(request)
    }

    /// Build the request `invoke` would send, without sending it.
    pub fn build_request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&Value>,
    ) -> Result<HttpRequest, ApiError> {
        let url = format!("{}{path}", self.base_url);
        let (headers, body) = match body {
            Some(value) => {
                let encoded = serde_json::to_string(value).map_err(|e| {
                    ApiError::new(method, url.clone(), None, format!("failed to encode body: {e}"))
                })?;
                (
                    vec![("content-type".to_string(), "application/json".to_string())],
                    Some(encoded),
                )
            }
            None => (Vec::new(), None),
        };
        Ok(HttpRequest {
            method,
            url,
            headers,
            body,
        })
    }

    /// Run a previously built request through the transport.
    pub fn execute(&self, request: HttpRequest) -> Result<Value, ApiError> {
        debug!(
            method = %request.method,
            url = %request.url,
            has_body = request.body.is_some(),
            "sending request"
        );
        let result = match self.transport.execute(&request) {
            Ok(response) => parse_response(request.method, &request.url, response),
            Err(e) => Err(ApiError::new(request.method, request.url, None, e.to_string())),
        };
        if let Err(err) = &result {
            warn!(
                method = %err.method,
                url = %err.url,
                status = ?err.status,
                diagnostic = %err.diagnostic,
                "request failed"
            );
        }
        result
    }

    pub fn build_create_product(&self, input: &NewProduct) -> Result<HttpRequest, Error> {
        let checked = input.validated()?;
        let body = to_body(HttpMethod::Post, &self.url(PRODUCTS_PATH), &checked)?;
        Ok(self.build_request(HttpMethod::Post, PRODUCTS_PATH, Some(&body))?)
    }

    pub fn build_set_stock(&self, id: u64, stock: i64) -> Result<HttpRequest, Error> {
        let update = StockUpdate::new(stock)?;
        let path = product_path(id);
        let body = to_body(HttpMethod::Patch, &self.url(&path), &update)?;
        Ok(self.build_request(HttpMethod::Patch, &path, Some(&body))?)
    }

    /// Fails closed: anything but `Confirmation::Granted` is refused.
    pub fn build_delete_product(
        &self,
        id: u64,
        confirmation: Confirmation,
    ) -> Result<HttpRequest, Error> {
        if confirmation != Confirmation::Granted {
            return Err(ValidationError::ConfirmationRequired {
                action: format!("delete product {id}"),
            }
            .into());
        }
        Ok(self.build_request(HttpMethod::Delete, &product_path(id), None)?)
    }

    pub fn build_list_products(&self, query: ListQuery) -> Result<HttpRequest, Error> {
        let query = query.validated()?;
        let path = format!("{PRODUCTS_PATH}{}", query.query_string());
        Ok(self.build_request(HttpMethod::Get, &path, None)?)
    }

    pub fn build_get_product(&self, id: u64) -> Result<HttpRequest, Error> {
        Ok(self.build_request(HttpMethod::Get, &product_path(id), None)?)
    }

    pub fn create_product(&self, input: &NewProduct) -> Result<Value, Error> {
        let request = self.build_create_product(input)?;
        Ok(self.execute(request)?)
    }

    pub fn set_stock(&self, id: u64, stock: i64) -> Result<Value, Error> {
        let request = self.build_set_stock(id, stock)?;
        Ok(self.execute(request)?)
    }

    pub fn delete_product(&self, id: u64, confirmation: Confirmation) -> Result<Value, Error> {
        let request = self.build_delete_product(id, confirmation)?;
        Ok(self.execute(request)?)
    }

    pub fn list_products(&self, query: ListQuery) -> Result<Value, Error> {
        let request = self.build_list_products(query)?;
        Ok(self.execute(request)?)
    }

    pub fn get_product(&self, id: u64) -> Result<Value, Error> {
        let request = self.build_get_product(id)?;
        Ok(self.execute(request)?)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

/// Turn a received response into the decoded body or an `ApiError`.
///
/// Non-2xx: the body is the diagnostic, or `HTTP <status>` when it is empty.
/// 2xx with an empty body decodes to `Value::Null`.
pub fn parse_response(
    method: HttpMethod,
    url: &str,
    response: HttpResponse,
) -> Result<Value, ApiError> {
    if !response.is_success() {
        return Err(ApiError::new(method, url, Some(response.status), response.body));
    }
    if response.body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&response.body).map_err(|e| {
        ApiError::new(
            method,
            url,
            Some(response.status),
            format!("invalid JSON in response: {e}"),
        )
    })
}

fn product_path(id: u64) -> String {
    format!("{PRODUCTS_PATH}{id}/")
}

fn to_body<S: serde::Serialize>(
    method: HttpMethod,
    url: &str,
    input: &S,
) -> Result<Value, ApiError> {
    serde_json::to_value(input)
        .map_err(|e| ApiError::new(method, url, None, format!("failed to encode body: {e}")))
}
