//! Synchronous client for a products REST API.
//!
//! # Overview
//! Creates products, updates stock, deletes products and lists pages of the
//! catalog against `/api/products/`. Every call is a single blocking round
//! trip; failures surface as `ApiError`, bad input as `ValidationError`
//! before anything is sent.
//!
//! # Design
//! - `ClientConfig` resolves the base URL once and is injected into
//!   `CatalogClient`; the client never reads the environment itself.
//! - Each operation is split into `build_*` (validates, produces an
//!   `HttpRequest`) and `execute` (runs it through a `Transport`), so request
//!   shapes are testable without a network.
//! - `UreqTransport` is the production transport; tests substitute their own.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use client::{parse_response, CatalogClient};
pub use config::{resolve_base_url, ClientConfig, DEFAULT_BASE_URL};
pub use error::{ApiError, Error, ValidationError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError};
pub use transport::UreqTransport;
pub use types::{Confirmation, ListQuery, NewProduct, Product, ProductPage, StockUpdate};
