use poem::{Endpoint, EndpointExt, Route};
use poem_openapi::OpenApiService;

use crate::app_error::error_body;
use crate::state::AppState;

pub mod app_error;
pub mod config;
pub mod db;
pub mod models;
pub mod numerology;
pub mod repos;
pub mod routes;
pub mod services;
pub mod state;

/// Build the full route tree for the given state.
///
/// Also used by the integration tests, which mount it on a test client
/// instead of a listener.
pub fn build_app(state: AppState) -> impl Endpoint {
    let api_service = OpenApiService::new(
        (
            routes::ping::PingApi { state: state.clone() },
            routes::profile::ProfileApi { state: state.clone() },
            routes::numerology::NumerologyApi { state: state.clone() },
        ),
        "Arcana API",
        "1.0",
    )
    .server(format!("http://{}", state.config.bind_addr));

    // Swagger UI for testing & docs
    let swagger = api_service.swagger_ui();

    // Mount everything; every error leaves as {"error": msg}
    Route::new()
        .nest("/docs", swagger)
        .nest("/", api_service)
        .catch_all_error(|err| async move { error_body(err.status(), &err.to_string()) })
}
