use crate::{
    AppState, auth, cancel_broadcast, create_list, display_list, enqueue_mail, health,
    list_overview, subscribe, unsubscribe,
};

use axum::{
    Router,
    http::{StatusCode, header},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};

/// Build the application router with all endpoints
pub fn build_router(state: AppState) -> Router {
    let admin = Router::new()
        .route("/admin", get(list_overview))
        .route("/admin/list/display/{list}", get(display_list))
        .route("/admin/list/cancel/{list}", get(cancel_broadcast))
        .route("/admin/create-list", post(create_list))
        .route("/admin/enqueue-mail", post(enqueue_mail))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_admin,
        ));

    Router::new()
        .route("/", get(root_redirect))
        // Public subscription endpoints
        .route("/subscribe", post(subscribe))
        .route("/unsubscribe/{list}/{email}/{token}", get(unsubscribe))
        // Health check endpoints
        .route("/health", get(health::health))
        .route("/live", get(health::liveness))
        .route("/ready", get(health::readiness))
        .route("/metrics", get(health::metrics))
        .merge(admin)
        .with_state(state)
        // Subscribe forms are embedded on other sites
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

async fn root_redirect() -> Response {
    (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, "/admin")]).into_response()
}
