use chrono::Local;
use school_assistant::client::BackendClient;
use school_assistant::config::Config;
use school_assistant::store::Workspace;
use school_assistant::{AppState, router};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env();
    let client = BackendClient::new(&config)?;
    let addr = config.bind_addr();
    info!(backend = %config.backend_url, chat = %config.chat_url, "using backend");

    let state = AppState::new(config, client, Workspace::new(Local::now().date_naive()));
    let app = router(state);

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutting down"),
        Err(err) => {
            error!("failed to listen for ctrl-c: {err}");
            std::future::pending::<()>().await;
        }
    }
}
