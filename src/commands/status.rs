use time::format_description::well_known;

use crate::constants::{version::get_version, STARTUP_TIME};
use crate::{Data, Error};

/// print the manager's status.
pub async fn status(data: &Data) -> Result<(), Error> {
    let (quotes, categories) = {
        let store = data.store.lock().await;
        (store.quotes().len(), store.categories().len())
    };

    let uptime_secs = STARTUP_TIME
        .elapsed()
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default();

    let last_sync = data
        .last_sync
        .lock()
        .expect("last sync lock poisoned")
        .map(|at| {
            at.format(&well_known::Rfc3339)
                .unwrap_or_else(|_| "unknown".to_string())
        });

    println!("version:    {}", get_version());
    println!("rust:       {}", rustc_version_runtime::version());
    println!("uptime:     {uptime_secs}s");
    println!("quotes:     {quotes}");
    println!("categories: {categories}");
    match last_sync {
        Some(at) => println!("last sync:  {at}"),
        None => println!("last sync:  never"),
    }

    Ok(())
}
