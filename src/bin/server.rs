use std::env::var;
use std::future::pending;
use std::net::SocketAddr;

use anyhow::{Context, Error};
use tokio::{net::TcpListener, signal::ctrl_c, task::spawn_blocking};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use portfolio_backend::{
    database_path_from_env,
    notify::Notifiers,
    portfolio::Portfolio,
    portfolio_path_from_env,
    server::{router, ServerState},
    store::ContactStore,
};

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let bind_addr = match var("BIND_ADDR") {
        Ok(bind_addr) => bind_addr
            .parse::<SocketAddr>()
            .context("Environment variable BIND_ADDR invalid")?,
        Err(_err) => SocketAddr::from(([127, 0, 0, 1], 8000)),
    };

    let portfolio = match portfolio_path_from_env() {
        Some(path) => Portfolio::read(path)?,
        None => Portfolio::builtin()?,
    };

    let database_path = database_path_from_env();
    tracing::info!("Storing contacts in {}", database_path.display());

    let store = spawn_blocking(move || ContactStore::open(database_path)).await??;

    let notifiers = Notifiers::from_env()?;

    let state = ServerState {
        portfolio: Box::leak(Box::new(portfolio)),
        store: Box::leak(Box::new(store)),
        notifiers: Box::leak(Box::new(notifiers)),
    };

    let listener = TcpListener::bind(bind_addr).await?;

    tracing::info!("Listening on {}", bind_addr);
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown())
        .await?;

    Ok(())
}

async fn shutdown() {
    if let Err(err) = ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", err);

        pending::<()>().await;
    }

    tracing::info!("Shutting down");
}
