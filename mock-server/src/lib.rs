use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub sku: String,
    pub name: String,
    pub description: String,
    pub price_cents: i64,
    pub stock: i64,
}

#[derive(Deserialize)]
pub struct CreateProduct {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub description: Option<String>,
    pub price_cents: Option<i64>,
    pub stock: Option<i64>,
}

#[derive(Deserialize)]
pub struct PatchProduct {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub description: Option<String>,
    pub price_cents: Option<i64>,
    pub stock: Option<i64>,
}

#[derive(Deserialize)]
pub struct Paging {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub page: u64,
    pub per_page: u64,
    pub pages: u64,
    pub total: u64,
}

/// Largest page the server will return regardless of what was asked for.
pub const MAX_PER_PAGE: i64 = 50;

#[derive(Default)]
pub struct Store {
    next_id: u64,
    products: BTreeMap<u64, Product>,
}

pub type Db = Arc<RwLock<Store>>;

type ApiResult<T> = Result<T, (StatusCode, Json<Value>)>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/api/health", get(health))
        .route("/api/products/", get(list_products).post(create_product))
        .route(
            "/api/products/{id}/",
            get(get_product).patch(patch_product).delete(delete_product),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn error(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "error": message })))
}

fn not_found() -> (StatusCode, Json<Value>) {
    error(StatusCode::NOT_FOUND, "not found")
}

fn trimmed(value: Option<String>) -> String {
    value.map(|s| s.trim().to_string()).unwrap_or_default()
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy", "service": "catalog mock" }))
}

async fn list_products(State(db): State<Db>, Query(paging): Query<Paging>) -> Json<ProductPage> {
    let page = paging.page.unwrap_or(1).max(1) as u64;
    let per_page = paging.per_page.unwrap_or(10).clamp(1, MAX_PER_PAGE) as u64;

    let store = db.read().await;
    let total = store.products.len() as u64;
    let products = store
        .products
        .values()
        .skip((page - 1).saturating_mul(per_page) as usize)
        .take(per_page as usize)
        .cloned()
        .collect();

    Json(ProductPage {
        products,
        page,
        per_page,
        pages: total.div_ceil(per_page),
        total,
    })
}

async fn create_product(
    State(db): State<Db>,
    Json(input): Json<CreateProduct>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    let name = trimmed(input.name);
    let sku = trimmed(input.sku);
    if name.is_empty() || sku.is_empty() {
        return Err(error(StatusCode::BAD_REQUEST, "name and sku are required"));
    }

    let mut store = db.write().await;
    if store.products.values().any(|p| p.sku == sku) {
        return Err(error(StatusCode::CONFLICT, "sku exists"));
    }
    store.next_id += 1;
    let product = Product {
        id: store.next_id,
        sku,
        name,
        description: trimmed(input.description),
        price_cents: input.price_cents.unwrap_or(0),
        stock: input.stock.unwrap_or(0),
    };
    store.products.insert(product.id, product.clone());
    info!(id = product.id, sku = %product.sku, "product created");
    Ok((StatusCode::CREATED, Json(product)))
}

async fn get_product(State(db): State<Db>, Path(id): Path<u64>) -> ApiResult<Json<Product>> {
    let store = db.read().await;
    store.products.get(&id).cloned().map(Json).ok_or_else(not_found)
}

async fn patch_product(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<PatchProduct>,
) -> ApiResult<Json<Product>> {
    let mut store = db.write().await;
    if let Some(sku) = input.sku.as_deref().map(str::trim) {
        if store.products.values().any(|p| p.sku == sku && p.id != id) {
            return Err(error(StatusCode::CONFLICT, "sku exists"));
        }
    }
    let product = store.products.get_mut(&id).ok_or_else(not_found)?;
    if let Some(name) = input.name {
        product.name = name.trim().to_string();
    }
    if let Some(sku) = input.sku {
        product.sku = sku.trim().to_string();
    }
    if let Some(description) = input.description {
        product.description = description.trim().to_string();
    }
    if let Some(price_cents) = input.price_cents {
        product.price_cents = price_cents;
    }
    if let Some(stock) = input.stock {
        product.stock = stock;
    }
    Ok(Json(product.clone()))
}

async fn delete_product(State(db): State<Db>, Path(id): Path<u64>) -> ApiResult<Json<Value>> {
    let mut store = db.write().await;
    store
        .products
        .remove(&id)
        .map(|_| Json(json!({ "deleted": id })))
        .ok_or_else(not_found)
}
