//! SurfsUp REST API
//!
//! HTTP API layer for SurfsUp, built with Axum.
//!
//! # Endpoints
//!
//! ## Index
//! - `GET /` - HTML list of available routes
//!
//! ## Climate
//! - `GET /api/v1.0/precipitation` - Precipitation for the last 12 months
//! - `GET /api/v1.0/stations` - Station ids
//! - `GET /api/v1.0/tobs` - Temperature observations of the most active station
//! - `GET /api/v1.0/:start` - Temperature min/avg/max from `start` onward
//! - `GET /api/v1.0/:start/:end` - Temperature min/avg/max between `start` and `end`
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use surfsup::api::{serve, AppState};
//! use surfsup::config::ApiConfig;
//! use surfsup::store::SqliteStore;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(SqliteStore::open("Resources/hawaii.sqlite")?);
//!     let config = ApiConfig::default();
//!
//!     let state = AppState::new(store, config.clone());
//!     serve(state, &config).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ApiConfig;

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    // Static segments take priority over `:start`
    let api_routes = Router::new()
        .route("/precipitation", get(routes::climate::precipitation))
        .route("/stations", get(routes::climate::stations))
        .route("/tobs", get(routes::climate::observations))
        .route("/:start", get(routes::climate::temperature_from))
        .route("/:start/:end", get(routes::climate::temperature_between));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let timeout = state.config.request_timeout();
    let cors = cors_layer(&state.config.cors_origins);

    // Create shared state
    let shared_state = Arc::new(state);

    Router::new()
        .route("/", get(routes::home::index))
        .nest("/api/v1.0", api_routes)
        .nest("/health", health_routes)
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

/// Permissive CORS unless specific origins are configured
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods([Method::GET])
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("SurfsUp API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("SurfsUp API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::ActiveStation;
    use crate::store::fixtures::sample_dataset;
    use crate::store::SqliteStore;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::Response,
    };
    use serde_json::Value;
    use tempfile::tempdir;
    use tower::util::ServiceExt;

    fn create_test_app() -> (Router, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let store = Arc::new(SqliteStore::open(sample_dataset(dir.path())).unwrap());
        let state = AppState::new(store, ApiConfig::default());

        (build_router(state), dir)
    }

    async fn get(app: Router, uri: &str) -> Response {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_index_is_html() {
        let (app, _dir) = create_test_app();

        let response = get(app, "/").await;
        assert_eq!(response.status(), StatusCode::OK);

        let content_type = response.headers()["content-type"].to_str().unwrap();
        assert!(content_type.starts_with("text/html"));
    }

    #[tokio::test]
    async fn test_precipitation() {
        let (app, _dir) = create_test_app();

        let response = get(app, "/api/v1.0/precipitation").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        let rows = body.as_array().unwrap();
        assert_eq!(rows.len(), 6);
        for row in rows {
            assert!(row["date"].as_str().unwrap() >= "2016-08-23");
            assert!(row["precipitation"].is_number());
        }
    }

    #[tokio::test]
    async fn test_stations() {
        let (app, _dir) = create_test_app();

        let response = get(app, "/api/v1.0/stations").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(
            body,
            serde_json::json!(["USC00513117", "USC00519281", "USC00519397"])
        );
    }

    #[tokio::test]
    async fn test_tobs() {
        let (app, _dir) = create_test_app();

        let response = get(app, "/api/v1.0/tobs").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        let rows = body.as_array().unwrap();
        assert_eq!(rows.len(), 4);
        assert!(rows.iter().all(|r| r["temperature"].is_number()));
    }

    #[tokio::test]
    async fn test_tobs_unknown_station_is_empty() {
        let dir = tempdir().unwrap();
        let store = Arc::new(SqliteStore::open(sample_dataset(dir.path())).unwrap());
        let state = AppState::with_active_station(
            store,
            ApiConfig::default(),
            ActiveStation::Pinned("USC00000000".to_string()),
        );

        let response = get(build_router(state), "/api/v1.0/tobs").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_stats_from_start() {
        let (app, _dir) = create_test_app();

        let response = get(app, "/api/v1.0/2016-08-23").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(
            body,
            serde_json::json!({"tmin": 68.0, "tmax": 82.0, "tavg": 78.25})
        );
    }

    #[tokio::test]
    async fn test_stats_empty_range_is_null() {
        let (app, _dir) = create_test_app();

        let response = get(app, "/api/v1.0/2017-01-01/2017-01-02").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(
            body,
            serde_json::json!({"tmin": null, "tmax": null, "tavg": null})
        );
    }

    #[tokio::test]
    async fn test_invalid_start_is_bad_request() {
        let (app, _dir) = create_test_app();

        let response = get(app, "/api/v1.0/not-a-date").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "INVALID_DATE");
        assert_eq!(body["error"]["field"], "start");
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("YYYY-MM-DD"));
    }

    #[tokio::test]
    async fn test_invalid_end_is_bad_request() {
        let (app, _dir) = create_test_app();

        let response = get(app, "/api/v1.0/2016-08-23/2017-13-45").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_body(response).await;
        assert_eq!(body["error"]["field"], "end");
    }

    #[tokio::test]
    async fn test_undecodable_segment_uses_error_envelope() {
        let (app, _dir) = create_test_app();

        let response = get(app.clone(), "/api/v1.0/%FF").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let content_type = response.headers()["content-type"].to_str().unwrap();
        assert!(content_type.starts_with("application/json"));

        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "INVALID_DATE");
        assert_eq!(body["error"]["field"], "start");
        assert_eq!(
            body["error"]["message"],
            "Invalid start date '%FF'. Format should be YYYY-MM-DD."
        );
        assert!(body["request_id"].is_string());

        let response = get(app.clone(), "/api/v1.0/%FF/2017-01-01").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"]["field"], "start");
        assert!(body["error"]["message"].as_str().unwrap().contains("'%FF'"));

        let response = get(app, "/api/v1.0/2016-08-23/%FF").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "INVALID_DATE");
        assert_eq!(body["error"]["field"], "end");
    }

    #[tokio::test]
    async fn test_store_failure_is_server_error() {
        let dir = tempdir().unwrap();
        let path = sample_dataset(dir.path());
        let store = Arc::new(SqliteStore::open(&path).unwrap());
        std::fs::remove_file(&path).unwrap();

        let app = build_router(AppState::new(store, ApiConfig::default()));

        let response = get(app.clone(), "/api/v1.0/stations").await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(response).await["error"]["code"], "STORE_ERROR");

        let response = get(app, "/health/ready").await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _dir) = create_test_app();

        let response = get(app.clone(), "/health/live").await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = get(app.clone(), "/health/ready").await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = get(app, "/health").await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["dataset"]["measurements"], 12);
    }

    #[tokio::test]
    async fn test_too_many_segments_not_found() {
        let (app, _dir) = create_test_app();

        let response = get(app, "/api/v1.0/2016-01-01/2017-01-01/extra").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
