use tokio::io::{AsyncBufReadExt, BufReader};

use crate::{sync, Data, Error};

pub mod help;
pub mod quote;
pub mod status;
pub mod transfer;

/// read line commands from stdin until `quit` or end of input.
pub async fn run(data: &Data) -> Result<(), Error> {
    quote::show_last(data).await?;
    println!("type `help` for the list of commands.");

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command {
            "show" | "next" => quote::show_random(data).await?,
            "add" => quote::add(data, rest).await?,
            "filter" => quote::set_filter(data, rest).await?,
            "categories" => quote::list_categories(data).await,
            "list" => quote::list_quotes(data).await,
            "sync" => {
                // completion and failure land on the event channel; only the
                // dropped-trigger case needs an answer right here
                if let Ok(sync::SyncOutcome::Skipped) = sync::sync_quotes(data).await {
                    println!("a sync run is already in flight. try again in a moment.");
                }
            }
            "export" => transfer::export(data, rest).await?,
            "import" => transfer::import(data, rest).await?,
            "status" => status::status(data).await?,
            "help" => help::help(),
            "quit" | "exit" => break,
            _ => println!("unknown command \"{command}\". type `help` for the list."),
        }
    }

    tracing::info!("input finished. shutting down.");
    Ok(())
}
