use gatehouse_lib::{
    config::Settings,
    router,
    store::{FlatFileUserStore, UserStore},
    AppState,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load()?;

    // RUST_LOG wins over the configured level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(settings.log_level.clone())),
        )
        .init();

    // Open the credential store and seed the default account on first start
    let store = FlatFileUserStore::open(&settings.data_dir)?;
    store.bootstrap_default_user().await?;

    let bind_addr = settings.bind_addr;
    let state = Arc::new(AppState::new(store, settings));
    let app = router::create_router(state);

    let listener = TcpListener::bind(bind_addr).await?;
    tracing::info!(%bind_addr, "gatehouse listening");

    axum::serve(listener, app).await?;

    Ok(())
}
