//! Route definitions for the Nearmart platform

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes
///
/// The state is taken by value so the auth layer can verify tokens with the
/// loaded configuration.
pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Auth routes (public)
        .nest("/auth", auth_routes())
        // Protected routes - user profile
        .nest("/users", user_routes(state.clone()))
        // Protected routes - business management
        .nest("/businesses", business_routes(state.clone()))
        // Protected routes - offer management
        .nest("/offers", offer_routes(state.clone()))
        // Protected routes - discovery
        .nest("/discover", discovery_routes(state.clone()))
        // Protected routes - payments
        .nest("/payments", payment_routes(state.clone()))
        // Protected routes - notifications
        .nest("/notifications", notification_routes(state))
}

/// Authentication routes (public)
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/send-otp", post(handlers::send_otp))
        .route("/verify-otp", post(handlers::verify_otp))
}

/// User profile routes (protected)
fn user_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/profile", get(handlers::get_profile))
        .route("/preferences", put(handlers::update_preferences))
        .route("/location", put(handlers::update_location))
        .route("/push-token", put(handlers::update_push_token))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Business management routes
///
/// The category catalog is added after the auth layer and stays public.
fn business_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::create_business))
        .route("/my", get(handlers::my_businesses))
        .route(
            "/:business_id/services",
            get(handlers::business_services).post(handlers::create_service),
        )
        .route(
            "/:business_id/offers",
            get(handlers::business_offers).post(handlers::create_offer),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
        .route("/categories", get(handlers::list_categories))
}

/// Offer management routes (protected)
fn offer_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/my", get(handlers::my_offers))
        .route("/nearby", post(handlers::nearby_offers))
        .route("/:offer_id/deactivate", put(handlers::deactivate_offer))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Discovery routes (protected)
fn discovery_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/nearby", post(handlers::discover_nearby))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Payment routes (protected)
fn payment_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/orders", post(handlers::create_order).get(handlers::list_orders))
        .route("/orders/:order_id/complete", post(handlers::complete_order))
        .route("/purchases", get(handlers::list_purchases))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Notification routes (protected)
fn notification_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_notifications))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
