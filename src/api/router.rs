//! API router.
//!
//! Returns a composable `Router` with all routes nested under `/api/`.
//! Every route except the health probe sits behind the bearer auth
//! middleware.

use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;

/// Build the API router.
///
/// Middleware uses `Extension<ApiContext>` (injected as the outermost
/// layer). Endpoint handlers use `State<ApiContext>` via `with_state`.
pub fn api_router(ctx: ApiContext) -> Router {
    let protected = Router::new()
        .route(
            "/medications",
            get(endpoints::medications::list).post(endpoints::medications::create),
        )
        .route(
            "/medications/interactions",
            get(endpoints::medications::check_interactions),
        )
        .route(
            "/medications/reminders",
            get(endpoints::medications::reminders),
        )
        .route(
            "/medications/refill-alerts",
            get(endpoints::medications::refill_alerts),
        )
        .route(
            "/medications/side-effects",
            post(endpoints::medications::analyze_side_effects),
        )
        .route(
            "/medications/validate-dosage",
            post(endpoints::medications::validate_dosage),
        )
        .route("/medications/:id", get(endpoints::medications::detail))
        .route(
            "/medications/:id/status",
            put(endpoints::medications::update_status),
        )
        .route(
            "/medications/:id/doses",
            post(endpoints::medications::record_dose),
        )
        .route(
            "/medications/:id/adherence",
            get(endpoints::medications::adherence),
        )
        .route(
            "/vitals",
            get(endpoints::vitals::history).post(endpoints::vitals::record),
        )
        .route("/vitals/latest", get(endpoints::vitals::latest))
        .route("/vitals/simulate", post(endpoints::vitals::simulate_history))
        .route("/vitals/analysis", get(endpoints::vitals::analysis))
        .route(
            "/profile",
            get(endpoints::risk::get_profile).put(endpoints::risk::put_profile),
        )
        .route("/health/assessment", get(endpoints::risk::assessment))
        .with_state(ctx.clone())
        .layer(axum::middleware::from_fn(middleware::auth::require_auth))
        // Extension must be outermost so the middleware can extract ApiContext.
        .layer(axum::Extension(ctx.clone()));

    let unprotected = Router::new()
        .route("/health", get(endpoints::health::check))
        .with_state(ctx);

    Router::new()
        .nest("/api", protected)
        .nest("/api", unprotected)
        .layer(CorsLayer::permissive())
}
