use anyhow::Result;
use lab_domain::LabRepository;
use std::net::SocketAddr;
use std::sync::Arc;

mod api;

/// Servidor de la API del laboratorio: expone las operaciones CRUD del
/// almacenamiento SQLite como JSON sobre HTTP.
///
/// Variables de entorno (se carga `.env` si existe):
/// - `PORT`: puerto TCP (default 3000)
/// - `LAB_DB_URL` / `DATABASE_URL`: ruta del archivo SQLite (default
///   `drug_discovery.db`)
/// - `RUST_LOG`: nivel de log (default `info`)
#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Inicializar repo (aplica migraciones embebidas si procede)
    let repo: Arc<dyn LabRepository> = Arc::new(lab_persistence::new_from_env()?);
    let app = api::router(repo);

    let port: u16 = std::env::var("PORT").ok().and_then(|p| p.parse().ok()).unwrap_or(3000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    log::info!("Server running on port {}", port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
