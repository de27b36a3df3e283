use anyhow::Context;
use taskboard::TaskBoardBuilder;
use taskboard_server::{AppState, Config, HeaderIdentity, build_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = Config::from_env()?;

    let mut builder = TaskBoardBuilder::new(&config.database_url);
    if let Some(max) = config.max_connections {
        builder = builder.with_max_connections(max);
    }
    let board = builder
        .build()
        .await
        .context("failed to open the task database")?;
    let identity = HeaderIdentity::new(&config.principal_header)
        .context("invalid principal header")?;

    let app = build_router(AppState::new(board, identity));
    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    log::info!(
        "listening on {} (principal header `{}`)",
        config.bind,
        config.principal_header
    );

    axum::serve(listener, app).await?;
    Ok(())
}
