use bs_pricer::state::AppState;
use bs_pricer::{config, errors, server};

#[tokio::main]
async fn main() {
    // Structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("bs_pricer starting");

    let cfg = match config::AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("config error: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = serve(cfg).await {
        tracing::error!("server error: {e}");
        std::process::exit(1);
    }
}

async fn serve(cfg: config::AppConfig) -> errors::PricerResult<()> {
    let port = cfg.server_port;
    tracing::info!(
        normal = ?cfg.normal_provider,
        heatmap_steps = cfg.heatmap_steps,
        curve_points = cfg.curve_points,
        "pricer configured"
    );

    let app = server::router(AppState::new(cfg));

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("server listening on {addr}");

    axum::serve(listener, app).await?;
    Ok(())
}
