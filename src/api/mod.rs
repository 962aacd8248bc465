//! HTTP routes

pub mod admin;
pub mod contacts;
pub mod extract;
pub mod products;
pub mod upload;
pub mod users;
pub mod visitors;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::auth::require_auth;
use crate::state::AppState;

/// Limit for JSON request bodies (10MB)
pub const JSON_BODY_LIMIT: usize = 10 * 1024 * 1024;

pub fn router(state: AppState, allowed_origins: &[String]) -> Router {
    let protected = Router::new()
        .route("/api/products", post(products::create_product))
        .route("/api/products/:id", put(products::update_product).delete(products::delete_product))
        .route(
            "/api/upload/image",
            post(upload::upload_image).layer(DefaultBodyLimit::max(upload::UPLOAD_BODY_LIMIT)),
        )
        .route(
            "/api/upload/images",
            post(upload::upload_images).layer(DefaultBodyLimit::max(upload::UPLOAD_BODY_LIMIT)),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/", get(|| async { "Wholesale Backend with Google Sheets DB" }))
        .route("/health", get(|| async { Json(serde_json::json!({"status": "healthy", "service": "wholesale-catalog"})) }))
        .route("/api/products", get(products::list_products))
        .route("/api/admin/login", post(admin::login))
        .route("/api/visitors", get(visitors::visitor_count).post(visitors::record_visit))
        .route("/api/users", post(users::add_user))
        .route("/api/contacts", get(contacts::list_contacts).post(contacts::add_contact))
        .merge(protected)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors(allowed_origins))
                .layer(DefaultBodyLimit::max(JSON_BODY_LIMIT)),
        )
        .with_state(state)
}

fn cors(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}
