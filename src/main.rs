use dotenvy::dotenv;
use poem::{Server, listener::TcpListener};
use sqlx::postgres::PgPoolOptions;

use arcana_api::config::Config;
use arcana_api::state::AppState;
use arcana_api::{build_app, db};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // doesn't do anything in production, since env vars are included in the process
    let _ = dotenv();
    let config = Config::from_env()?;

    tracing_subscriber::fmt::init();

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;

    // tables must exist before we take traffic
    db::init_schema(&pool).await?;

    let bind_addr = config.bind_addr.clone();
    let state = AppState::new(pool, config);

    // Start the server
    Server::new(TcpListener::bind(bind_addr))
        .run(build_app(state))
        .await?;

    Ok(())
}
