//! Ride watcher entry-point: wires the REST adapter, push session, and store.
//!
//! `fetch` prints the current ride snapshot once; `watch` keeps a push
//! session open and logs every snapshot change until the server disconnects.

use std::ffi::OsString;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Context, Result};
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use client::config::ClientSettings;
use client::domain::RideStore;
use client::domain::ports::RideApi;
use client::inbound::push::{self, PushSession};
use client::outbound::rides::{RideHttpApi, RideHttpConfig};
use client::outbound::tokens::StaticAccessTokens;

#[derive(Parser)]
#[command(name = "ride-watch", about = "Watch ride availability and push updates")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch the current ride snapshot once and print it.
    Fetch,
    /// Stream push events, logging each snapshot change.
    Watch,
}

/// Application bootstrap.
#[actix_rt::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let cli = Cli::parse();
    // Settings merge environment and config file; CLI argv belongs to clap.
    let settings = ClientSettings::load_from_iter([OsString::from("ride-watch")])
        .wrap_err("failed to load client settings")?;

    let tokens = match settings.access_token.clone() {
        Some(token) => StaticAccessTokens::bearer(token),
        None => StaticAccessTokens::anonymous(),
    };
    let mut api_config =
        RideHttpConfig::new(settings.api_base_url().wrap_err("invalid API base URL")?);
    api_config.timeout = settings.request_timeout();
    let api =
        RideHttpApi::new(api_config, Arc::new(tokens)).wrap_err("failed to build ride client")?;
    let store = Arc::new(RideStore::new(Arc::new(api), Arc::new(DefaultClock)));

    match cli.command {
        Command::Fetch => fetch_once(&store).await,
        Command::Watch => watch(store, &settings).await,
    }
}

async fn fetch_once<A: RideApi>(store: &RideStore<A>) -> Result<()> {
    store.fetch_rides().await;
    let snapshot = store.snapshot();
    if let Some(error) = &snapshot.error {
        warn!(error = %error, "fetch reported an error");
    }
    println!(
        "{}",
        serde_json::to_string_pretty(&snapshot.rides).wrap_err("snapshot does not serialise")?
    );
    Ok(())
}

async fn watch<A>(store: Arc<RideStore<A>>, settings: &ClientSettings) -> Result<()>
where
    A: RideApi + 'static,
{
    let mut snapshots = store.subscribe();
    let sweeper = {
        let store = store.clone();
        tokio::spawn(async move { store.run_notification_sweeper().await })
    };
    let printer = tokio::spawn(async move {
        while snapshots.changed().await.is_ok() {
            let snapshot = snapshots.borrow_and_update().clone();
            info!(
                rides = snapshot.rides.len(),
                notifications = snapshot.notifications.len(),
                "snapshot updated"
            );
        }
    });

    store.fetch_rides().await;

    let ws_url = settings.ws_url().wrap_err("invalid push URL")?;
    let socket = push::connect(&ws_url)
        .await
        .wrap_err("push handshake failed")?;
    info!(url = %ws_url, "push session established");
    PushSession::new(store).run(socket).await;
    info!("push session ended");

    printer.abort();
    sweeper.abort();
    Ok(())
}
