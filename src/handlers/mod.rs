pub mod car;
pub mod health;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::service::CarService;

/// Full HTTP surface: `/cars` routes plus `/health`.
pub fn app(service: CarService) -> Router {
    Router::new()
        .nest("/cars", car::router())
        .merge(health::router())
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}
