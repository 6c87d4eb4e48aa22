use std::path::Path;

use crate::models::quote::Quote;
use crate::store::QuoteStore;

/// what can go wrong moving the collection through a file.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    #[error("could not access the file")]
    Io(#[from] std::io::Error),
    #[error("the file is not a valid JSON collection")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Persist(#[from] anyhow::Error),
}

/// counters from one import.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransferReport {
    pub imported: usize,
    pub skipped: usize,
}

/// write the full collection to `path` as pretty-printed JSON.
#[tracing::instrument(skip_all)]
pub async fn export(store: &QuoteStore, path: &Path) -> Result<usize, TransferError> {
    let raw = serde_json::to_string_pretty(store.quotes())?;

    tokio::fs::write(path, raw).await.inspect_err(
        |e| tracing::error!(err = ?e, path = %path.display(), "an error occurred when writing the export file"),
    )?;

    tracing::info!(count = store.quotes().len(), path = %path.display(), "exported the collection.");

    Ok(store.quotes().len())
}

/// append the records in `path` to the collection and persist once.
///
/// the whole file is rejected when it is not valid JSON. individual blank
/// entries are skipped. duplicates are appended as-is; the sync path is the
/// only dedup boundary.
#[tracing::instrument(skip_all)]
pub async fn import(store: &mut QuoteStore, path: &Path) -> Result<TransferReport, TransferError> {
    let raw = tokio::fs::read_to_string(path).await.inspect_err(
        |e| tracing::error!(err = ?e, path = %path.display(), "an error occurred when reading the import file"),
    )?;

    let entries: Vec<Quote> = serde_json::from_str(&raw).inspect_err(
        |e| tracing::error!(err = ?e, path = %path.display(), "the import file is not a valid JSON collection"),
    )?;

    let total = entries.len();
    let mut imported = 0;

    for quote in entries {
        if !quote.is_well_formed() {
            continue;
        }

        store.append(quote);
        imported += 1;
    }

    let skipped = total - imported;
    if skipped > 0 {
        tracing::warn!(skipped, "skipped blank entries in the import file.");
    }

    store.save().await?;

    tracing::info!(imported, path = %path.display(), "imported quotes from file.");

    Ok(TransferReport { imported, skipped })
}
