use std::path::Path;

use crate::constants::DEFAULT_EXPORT_FILE;
use crate::transfer::{self, TransferError};
use crate::{Data, Error};

/// `export [path]`, defaulting to quotes.json in the working directory.
pub async fn export(data: &Data, rest: &str) -> Result<(), Error> {
    let path = if rest.is_empty() {
        DEFAULT_EXPORT_FILE
    } else {
        rest
    };

    let store = data.store.lock().await;
    match transfer::export(&store, Path::new(path)).await {
        Ok(count) => println!("exported {count} quote(s) to {path}."),
        Err(e) => println!("export failed: {e}."),
    }

    Ok(())
}

/// `import <path>`: append a JSON collection file and persist.
pub async fn import(data: &Data, rest: &str) -> Result<(), Error> {
    if rest.is_empty() {
        println!("usage: import <path>");
        return Ok(());
    }

    let mut store = data.store.lock().await;
    match transfer::import(&mut store, Path::new(rest)).await {
        Ok(report) if report.skipped > 0 => println!(
            "imported {} quote(s), skipped {} blank entries.",
            report.imported, report.skipped,
        ),
        Ok(report) => println!("imported {} quote(s).", report.imported),
        Err(TransferError::Parse(_)) => println!("invalid JSON file. nothing was imported."),
        Err(e) => println!("import failed: {e}."),
    }

    Ok(())
}
