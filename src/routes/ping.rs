use poem_openapi::{Object, OpenApi, payload::Json};
use serde::Serialize;

use crate::state::AppState;

#[derive(Clone)]
pub struct PingApi {
    pub state: AppState,
}

#[derive(Debug, Serialize, Object)]
struct PingResponse {
    message: String,
}

#[derive(Debug, Clone, Copy, Serialize, Object)]
struct HealthCheckResponse {
    db_ok: bool,
    server_ok: bool,
}

#[OpenApi]
impl PingApi {
    /// Liveness probe
    #[oai(path = "/ping", method = "get", operation_id = "ping")]
    async fn ping(&self) -> poem::Result<Json<PingResponse>> {
        Ok(Json(PingResponse {
            message: "pong".to_string(),
        }))
    }

    /// Health check endpoint
    #[oai(path = "/health_check", method = "get", operation_id = "health_check")]
    async fn health_check(&self) -> poem::Result<Json<HealthCheckResponse>> {
        let db_ok = sqlx::query("SELECT 1").execute(&self.state.db).await.is_ok();

        Ok(Json(HealthCheckResponse {
            db_ok,
            server_ok: true,
        }))
    }
}
