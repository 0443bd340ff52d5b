//! HTTP price lookup server.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/get-price` | Price a stored component by `type` and `name` |
//! | `GET`  | `/health` | Health check (returns version) |
//! | `GET`  | `{images.route}/{file}` | Static component images, when `[images]` is configured |
//!
//! # Price Contract
//!
//! Request:
//!
//! ```json
//! { "type": "GPU", "name": "RTX 4090" }
//! ```
//!
//! Response (200):
//!
//! ```json
//! { "status": 200, "component": "RTX 4090", "type": "GPU", "price": 4743.6, "currency": "PLN" }
//! ```
//!
//! Errors carry the status code and a message:
//!
//! ```json
//! { "status": 404, "error": "Component not found" }
//! ```
//!
//! `400` when the body is not JSON or lacks a string `name` or `type`,
//! `404` when no component matches, `500` on database failure.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::db;
use crate::lookup;
use crate::migrate;
use crate::seed;

/// Message returned for a request missing `name` or `type`.
pub const INVALID_REQUEST: &str = "Invalid request. 'name' and 'type' required.";

/// Message returned when no component matches the requested pair.
pub const NOT_FOUND: &str = "Component not found";

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub pool: SqlitePool,
}

/// Prepare the database and serve until the process is terminated.
///
/// Startup runs the migrations and, on first run, seeds the table from
/// `[seed].specs_dir`.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let pool = db::connect(config).await?;
    migrate::run_migrations(&pool).await?;
    let report = seed::seed_if_empty(&pool, config).await?;
    if report.seeded {
        tracing::info!(inserted = report.inserted, "seeded database on first run");
    }

    let state = AppState {
        config: Arc::new(config.clone()),
        pool,
    };
    let app = router(state);

    let bind_addr = &config.server.bind;
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!("price server listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the router for the given state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut app = Router::new()
        .route("/get-price", post(handle_get_price))
        .route("/health", get(handle_health));

    if let Some(images) = &state.config.images {
        if images.dir.is_dir() {
            app = app.nest_service(&images.route, ServeDir::new(&images.dir));
        } else {
            tracing::warn!(
                dir = %images.dir.display(),
                "images directory not found, image serving disabled"
            );
        }
    }

    app.layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    status: u16,
    error: String,
}

/// Failure that converts into a JSON error response.
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
}

impl AppError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            status: self.status.as_u16(),
            error: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============ POST /get-price ============

#[derive(Serialize)]
struct PriceResponse {
    status: u16,
    #[serde(flatten)]
    quote: crate::models::PriceQuote,
}

/// Pull the two required string fields out of a raw request body.
fn parse_price_request(body: &[u8]) -> Option<(String, String)> {
    let value: Value = serde_json::from_slice(body).ok()?;
    let component_type = value.get("type")?.as_str()?.to_string();
    let name = value.get("name")?.as_str()?.to_string();
    Some((component_type, name))
}

/// The body is read raw so malformed JSON gets the same 400 response as a
/// missing field.
async fn handle_get_price(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<PriceResponse>, AppError> {
    let (component_type, name) =
        parse_price_request(&body).ok_or_else(|| AppError::bad_request(INVALID_REQUEST))?;

    let quote = lookup::quote(&state.pool, &state.config.server.currency, &component_type, &name)
        .await
        .map_err(|e| {
            tracing::error!(error = %format!("{:#}", e), "price lookup failed");
            AppError::internal(format!("lookup failed: {}", e))
        })?
        .ok_or_else(|| {
            tracing::debug!(component_type = %component_type, name = %name, "component not found");
            AppError::not_found(NOT_FOUND)
        })?;

    tracing::info!(
        component_type = %quote.component_type,
        name = %quote.component,
        price = quote.price,
        "priced component"
    );

    Ok(Json(PriceResponse {
        status: StatusCode::OK.as_u16(),
        quote,
    }))
}
