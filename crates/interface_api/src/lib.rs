//! HTTP API Layer
//!
//! This crate provides the REST API for the lost-and-found board using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for posts, claims, and health
//! - **Middleware**: Bearer-token authentication and audit logging
//! - **DTOs**: Request/response data transfer objects
//! - **Error Handling**: Taxonomy-to-status-code mapping
//!
//! Browsing (post listing, post detail, categories) is public; everything
//! that mutates state or exposes an owner/claimant view requires the
//! authenticated principal.
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let app = create_router(state);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;
pub mod auth;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use domain_claims::ClaimEngine;
use domain_posts::PostService;

use crate::config::ApiConfig;
use crate::handlers::{claims, health, posts};
use crate::middleware::{audit_middleware, auth_middleware};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<PostService>,
    pub claims: Arc<ClaimEngine>,
    pub pool: PgPool,
    pub config: ApiConfig,
}

/// Creates the main API router
///
/// # Arguments
///
/// * `state` - Shared application state (services, pool, configuration)
pub fn create_router(state: AppState) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Browsing is anonymous; an optional bearer token personalizes results
    let public_api = Router::new()
        .route("/posts", get(posts::list_posts))
        .route("/posts/:id", get(posts::get_post))
        .route("/categories", get(posts::list_categories));

    // Everything else requires the authenticated principal
    let protected_api = Router::new()
        .route("/posts", post(posts::create_post))
        .route("/posts/:id", put(posts::update_post))
        .route("/posts/:id", delete(posts::delete_post))
        .route("/posts/:id/claims", get(claims::list_post_claims))
        .route("/posts/:id/claims", post(claims::create_claim))
        .route("/posts/:id/claims/check", post(claims::check_claim))
        .route("/claims/:id/approve", post(claims::approve_claim))
        .route("/claims/:id/deny", post(claims::deny_claim))
        .route("/claims/:id", delete(claims::delete_claim_as_owner))
        .route("/my-claims", get(claims::my_claims))
        .route("/my-claims/:id", delete(claims::delete_own_claim))
        .layer(axum_middleware::from_fn_with_state(state.clone(), audit_middleware))
        .layer(axum_middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(public_routes)
        .nest("/api/v1", public_api.merge(protected_api))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
