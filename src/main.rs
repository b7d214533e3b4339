use std::{net::TcpListener, time::Duration};

use env_logger::Env;
use geoscan::{configuration::get_configuration, services::job_worker_handler, startup::run};
use sqlx::postgres::PgPoolOptions;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let configuration = get_configuration().expect("Failed to read configuration.");

    let pool_options = PgPoolOptions::new()
        .max_connections(20)
        .min_connections(5)
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(15 * 60)) // 15 minutes
        .max_lifetime(None);

    let connection_pool = pool_options.connect_lazy_with(configuration.database.with_db());
    let address = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    );
    let listener = TcpListener::bind(address)?;

    // Spawn the pipeline worker alongside the HTTP server.
    let pool_clone = connection_pool.clone();
    let api_keys = configuration.api_keys.clone();
    let analysis = configuration.analysis.clone();
    tokio::spawn(async move { job_worker_handler(pool_clone, api_keys, analysis).await });

    run(listener, connection_pool, configuration.analysis)?.await
}
