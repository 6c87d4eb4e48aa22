use std::str::FromStr;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex as StdMutex};

use futures::StreamExt;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Sqlite,
};
use tokio::sync::{broadcast, Mutex};
use tracing::Instrument;

use crate::constants::{DEFAULT_REMOTE_URL, DEFAULT_SYNC_INTERVAL_SECS};
use crate::events::Event;
use crate::remote::RemoteClient;
use crate::store::QuoteStore;
use crate::{sync, Data};

async fn init_database() -> anyhow::Result<Pool<Sqlite>> {
    let db_url = std::env::var("DATABASE_URL").expect("missing DATABASE_URL");

    tracing::info!("initializing database connection...");
    let opts = SqliteConnectOptions::from_str(&db_url)
        .expect("invalid DATABASE_URL")
        .create_if_missing(true)
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal);
    let db = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(opts)
        .await?;

    tracing::info!("running migrations...");
    sqlx::migrate!("./migrations").run(&db).await?;
    tracing::info!("finished running migrations!");

    Ok(db)
}

fn init_remote() -> RemoteClient {
    let endpoint = std::env::var("REMOTE_QUOTES_URL").unwrap_or_else(|_| {
        tracing::info!(
            "no remote endpoint configured. syncing against {}.",
            DEFAULT_REMOTE_URL
        );

        DEFAULT_REMOTE_URL.to_string()
    });

    RemoteClient::new(endpoint)
}

fn init_sync_interval() -> std::time::Duration {
    let secs = std::env::var("SYNC_INTERVAL_SECS")
        .ok()
        .and_then(|secs| secs.parse::<u64>().ok());

    if secs.is_none() {
        tracing::warn!(
            "no usable sync interval found. defaulting to {} seconds.",
            DEFAULT_SYNC_INTERVAL_SECS
        );
    }

    std::time::Duration::from_secs(secs.unwrap_or(DEFAULT_SYNC_INTERVAL_SECS))
}

fn spawn_background_tasks(data: &Data, sync_interval: std::time::Duration) {
    let sync_data = data.clone();
    let mut event_rx = data.events.subscribe();

    tracing::info!(
        "initialized quote sync! reconciling every {} seconds.",
        sync_interval.as_secs()
    );

    tokio::spawn(
        async move {
            let interval = tokio::time::interval(sync_interval);
            let task = futures::stream::unfold(interval, |mut interval| async {
                interval.tick().await;
                let _ = sync::sync_quotes(&sync_data).await;

                Some(((), interval))
            });

            task.for_each(|_| async {}).await;
        }
        .in_current_span(),
    );

    // outcome notifications for work nobody awaited directly: timer-triggered
    // sync runs and detached publishes
    tokio::spawn(
        async move {
            loop {
                match event_rx.recv().await {
                    Ok(Event::SyncCompleted { added }) if added > 0 => {
                        println!("sync: added {added} new quote(s) from the remote collection.");
                    }
                    Ok(Event::SyncCompleted { .. }) => {
                        println!("sync: nothing new from the remote collection.");
                    }
                    Ok(Event::SyncFailed { reason }) => {
                        println!("sync failed: {reason}");
                    }
                    Ok(Event::QuotePublished { text }) => {
                        tracing::info!(text = %text, "published the new quote to the remote side.");
                    }
                    Ok(Event::PublishFailed { text, reason }) => {
                        tracing::warn!(text = %text, reason = %reason, "could not publish the new quote. it stays local.");
                    }
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
        .in_current_span(),
    );
}

pub async fn init() -> anyhow::Result<Data> {
    tracing::info!("initializing... please wait warmly.");

    let db = init_database().await?;
    let remote = init_remote();
    let sync_interval = init_sync_interval();

    let store = QuoteStore::load(db).await?;
    let (events, _) = broadcast::channel(32);

    let data = Data {
        store: Arc::new(Mutex::new(store)),
        remote,
        events,
        sync_running: Arc::new(AtomicBool::new(false)),
        last_sync: Arc::new(StdMutex::new(None)),
    };

    spawn_background_tasks(&data, sync_interval);

    tracing::info!("finished initializing!");
    Ok(data)
}
