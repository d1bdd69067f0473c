//! Axum web server implementation for tourforge.

use std::net::SocketAddr;

use axum::{
    http::{header, Method},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::routes::api::api_routes;
use super::state::WebAppState;

/// Server configuration options.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Enable CORS for development (allows any origin).
    pub cors_permissive: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            cors_permissive: true,
        }
    }
}

/// Health check response.
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// Health check endpoint handler.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the Axum router with all routes.
fn build_router(state: WebAppState, cors_permissive: bool) -> Router {
    // Build CORS layer
    let cors = if cors_permissive {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
    } else {
        CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
    };

    let core_routes = Router::new().route("/health", get(health));

    Router::new()
        .nest("/api", core_routes.merge(api_routes()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the web server.
///
/// This starts the Axum server and blocks until shutdown.
pub async fn run_server(state: WebAppState, config: ServerConfig) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let app = build_router(state, config.cors_permissive);

    tracing::info!("Starting web server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::core::TourforgeCore;
    use crate::data::Database;
    use crate::web::auth::USER_ID_HEADER;
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn test_state() -> WebAppState {
        let dir = tempfile::Builder::new()
            .prefix("tourforge-test-data-")
            .tempdir()
            .expect("Failed to create test data dir");
        let db = Database::open(dir.path().join("test.db")).expect("Failed to open database");
        // Keep temp dir alive for test process lifetime.
        std::mem::forget(dir);
        WebAppState::new(TourforgeCore::with_database(Config::default(), db))
    }

    fn authed(builder: axum::http::request::Builder) -> axum::http::request::Builder {
        builder.header(USER_ID_HEADER, "mock-user-123")
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let state = test_state();
        let app = build_router(state, true);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_list_public_tours_endpoint() {
        let state = test_state();
        let app = build_router(state, true);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/tours")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        // Verify response body structure
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(json.get("tours").is_some());
    }

    #[tokio::test]
    async fn test_my_tours_requires_identity() {
        let state = test_state();
        let app = build_router(state, true);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/tours/my")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_create_tour_endpoint() {
        let state = test_state();
        let app = build_router(state, true);

        let body = serde_json::json!({
            "title": "Onboarding",
            "steps": [{"text": "Welcome", "image": "https://example.com/1.png"}]
        });

        let response = app
            .oneshot(
                authed(Request::builder().method(Method::POST).uri("/api/tours"))
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);

        // Verify response body structure
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            json.get("title").and_then(|v| v.as_str()),
            Some("Onboarding")
        );
        assert!(json.get("id").is_some());
        assert_eq!(
            json.pointer("/analytics/views").and_then(|v| v.as_u64()),
            Some(0)
        );
    }

    #[tokio::test]
    async fn test_create_tour_requires_identity() {
        let state = test_state();
        let app = build_router(state, true);

        let body = serde_json::json!({ "title": "Anonymous" });

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/tours")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_update_tour_not_found() {
        let state = test_state();
        let app = build_router(state, true);

        let body = serde_json::json!({ "title": "Ghost" });

        let response = app
            .oneshot(
                authed(
                    Request::builder()
                        .method(Method::PUT)
                        .uri("/api/tours/does-not-exist"),
                )
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_tour_not_found() {
        let state = test_state();
        let app = build_router(state, true);

        let response = app
            .oneshot(
                authed(
                    Request::builder()
                        .method(Method::DELETE)
                        .uri("/api/tours/does-not-exist"),
                )
                .body(Body::empty())
                .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_created_tours_show_up_for_their_owner_only() {
        let state = test_state();
        let app = build_router(state, true);

        let body = serde_json::json!({ "title": "Mine" });
        let response = app
            .clone()
            .oneshot(
                authed(Request::builder().method(Method::POST).uri("/api/tours"))
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .clone()
            .oneshot(
                authed(Request::builder().uri("/api/tours/my"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["tours"].as_array().unwrap().len(), 1);

        // A different identity sees nothing
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/tours/my")
                    .header(USER_ID_HEADER, "somebody-else")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["tours"].as_array().unwrap().len(), 0);
    }
}
