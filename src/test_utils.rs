use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex as StdMutex};

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};
use tokio::sync::{broadcast, Mutex};

use crate::models::quote::Quote;
use crate::remote::RemoteClient;
use crate::store::QuoteStore;
use crate::Data;

/// fresh single-connection in-memory database with the schema applied.
pub async fn memory_pool() -> Pool<Sqlite> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite should connect");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations should apply");

    pool
}

/// plant a durable snapshot so the next load starts from `quotes` instead of
/// the seed collection.
pub async fn seed_snapshot(pool: &Pool<Sqlite>, quotes: &[Quote]) {
    sqlx::query(
        r#"
            INSERT INTO
                storage (key, value)
            VALUES
                ('quotes', $1)
            ON CONFLICT (key)
            DO UPDATE SET
                value = excluded.value;
        "#,
    )
    .bind(serde_json::to_string(quotes).expect("quotes should serialize"))
    .execute(pool)
    .await
    .expect("snapshot should write");
}

pub async fn data_from_pool(pool: Pool<Sqlite>, endpoint: String) -> Data {
    let store = QuoteStore::load(pool).await.expect("store should load");
    let (events, _) = broadcast::channel(32);

    Data {
        store: Arc::new(Mutex::new(store)),
        remote: RemoteClient::new(endpoint),
        events,
        sync_running: Arc::new(AtomicBool::new(false)),
        last_sync: Arc::new(StdMutex::new(None)),
    }
}
