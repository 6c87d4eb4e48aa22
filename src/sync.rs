use std::sync::atomic::{AtomicBool, Ordering};

use time::OffsetDateTime;

use crate::events::Event;
use crate::Data;

/// counters from one reconciliation run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SyncReport {
    pub fetched: usize,
    pub added: usize,
}

/// what a trigger got: a finished run, or nothing because one was already in
/// flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyncOutcome {
    Completed(SyncReport),
    Skipped,
}

/// releases the run flag however the run ends.
struct RunGuard<'a>(&'a AtomicBool);

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// one reconciliation run: fetch the remote snapshot, append whatever is
/// missing locally, persist the whole collection, report.
///
/// the timer and the manual trigger both land here. a trigger arriving while
/// another run is in flight is dropped; the next tick retries anyway.
#[tracing::instrument(skip_all)]
pub async fn sync_quotes(data: &Data) -> anyhow::Result<SyncOutcome> {
    if data
        .sync_running
        .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
        .is_err()
    {
        tracing::info!("a sync run is already in flight. dropping this trigger.");

        return Ok(SyncOutcome::Skipped);
    }
    let _guard = RunGuard(&data.sync_running);

    tracing::info!("started syncing with the remote collection!");

    let remote_quotes = match data.remote.fetch_quotes().await {
        Ok(quotes) => quotes,
        Err(e) => {
            let _ = data.events.send(Event::SyncFailed {
                reason: e.to_string(),
            });

            return Err(e);
        }
    };

    let report = {
        let mut store = data.store.lock().await;

        let fetched = remote_quotes.len();
        let mut added = 0;

        for quote in remote_quotes {
            if store.contains(&quote) {
                continue;
            }

            store.append(quote);
            added += 1;
        }

        if let Err(e) = store.save().await {
            // the appended records stay in memory until the next successful
            // save
            let _ = data.events.send(Event::SyncFailed {
                reason: e.to_string(),
            });

            return Err(e);
        }

        SyncReport { fetched, added }
    };

    *data.last_sync.lock().expect("last sync lock poisoned") = Some(OffsetDateTime::now_utc());

    let _ = data.events.send(Event::SyncCompleted {
        added: report.added,
    });

    tracing::info!(
        fetched = report.fetched,
        added = report.added,
        "finished syncing with the remote collection!"
    );

    Ok(SyncOutcome::Completed(report))
}
