use salvo::conn::TcpListener;
use salvo::logging::Logger;
use salvo::{Listener, Router};
use spooky_app::app::api::routes;
use spooky_app::config::ConfigHandler;
use spooky_app::geocode_handler::GeocodeHandler;
use spooky_app::store_handler::StoreHandler;
use spooky_core::config::load_config;
use spooky_db::db::connection::create_pool;
use spooky_db::db::migrations::run_migrations;
use spooky_geocode::NominatimClient;
use spooky_service::geocode::SearchGate;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    tracing::info!("Starting Spooky Route server");

    let config = load_config()?;

    tracing::info!(config = ?config, "Configuration loaded");

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping debug");
    }

    if config.uses_dev_secret() {
        tracing::warn!("auth.jwt_secret is the development default; set AUTH__JWT_SECRET");
    }

    run_migrations(&config.database.url).await?;

    tracing::info!("Database migrations applied.");

    let pool = create_pool(
        &config.database.url,
        u32::from(config.database.max_connections),
    )
    .await?;

    tracing::info!("Database connection pool created.");

    let provider = NominatimClient::from_config(&config.geocode)?;
    let gate = SearchGate::from_config(&config.geocode);

    let bind_addr = config.server.bind_addr();
    let acceptor = TcpListener::new(bind_addr.clone()).bind().await;

    let router = Router::new()
        .hoop(Logger::new())
        .hoop(StoreHandler::new(pool))
        .hoop(ConfigHandler {
            settings: config.clone(),
        })
        .hoop(GeocodeHandler::new(provider, gate))
        .push(routes());

    tracing::info!("Server listening on {bind_addr}");

    salvo::Server::new(acceptor).serve(router).await;

    Ok(())
}
