pub mod config;
pub mod controllers;
pub mod engine;
pub mod error;
pub mod models;
pub mod render;
pub mod services;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use engine::{Cell, Coordinate, SeatingEngine};
pub use error::{SeatingError, SeatingResult};

// Shared state для всего приложения
pub struct AppState {
    pub config: config::Config,
    pub booking: services::BookingService,
}

impl AppState {
    pub fn new(config: config::Config) -> Arc<Self> {
        let booking = services::BookingService::new(
            config.cinema.clone(),
            Arc::new(services::TracingObserver),
        );

        Arc::new(Self { config, booking })
    }
}

/// Главный роутер: служебные маршруты + API под `/api`.
pub fn router(state: Arc<AppState>) -> Router {
    let app = Router::new()
        .route("/", get(|| async { "Cinema API v1.0" }))
        .route("/health", get(|| async { "OK" }))
        // Mount the routes from the controllers module
        .nest("/api", controllers::routes())
        .with_state(state.clone())
        .layer(TraceLayer::new_for_http());

    if state.config.features.enable_cors {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}
