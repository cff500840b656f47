// --- quickcluster: clustering de grafos - Archivo principal ---

use quickcluster::config::AppConfig;
use quickcluster::run_server;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // el subscriber va primero para que se vean los avisos de configuración
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env();

    tracing::info!("=== quickcluster (API) ===");
    run_server(config).await
}
