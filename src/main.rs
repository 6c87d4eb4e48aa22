use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex as StdMutex};

use time::OffsetDateTime;
use tokio::sync::{broadcast, Mutex};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::events::Event;
use crate::remote::RemoteClient;
use crate::store::QuoteStore;

/// everything the command surface and the background tasks share.
#[derive(Clone)]
struct Data {
    store: Arc<Mutex<QuoteStore>>,
    remote: RemoteClient,
    events: broadcast::Sender<Event>,
    sync_running: Arc<AtomicBool>,
    last_sync: Arc<StdMutex<Option<OffsetDateTime>>>,
}

type Error = Box<dyn std::error::Error + Send + Sync>;

mod commands;
mod constants;
mod events;
mod init;
mod models;
mod remote;
mod store;
mod sync;
mod transfer;

#[cfg(test)]
mod test_utils;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let _ = &*constants::STARTUP_TIME;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let data = init::init().await?;

    tokio::select! {
        result = commands::run(&data) => {
            if let Err(e) = result {
                tracing::error!(err = ?e, "the command loop ended with an error");
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("received ctrl-c. shutting down.");
        }
    }

    Ok(())
}
