use crate::constants::ALL_CATEGORIES;
use crate::events::Event;
use crate::models::quote::Quote;
use crate::{Data, Error};

/// restore and display the last viewed quote, if any.
pub async fn show_last(data: &Data) -> Result<(), Error> {
    let store = data.store.lock().await;

    if let Some(quote) = store.last_quote().await? {
        println!("last time you were looking at:");
        println!("{quote}");
    }

    Ok(())
}

/// display a random quote from the active filter.
pub async fn show_random(data: &Data) -> Result<(), Error> {
    let store = data.store.lock().await;

    match store.random_quote() {
        Some(quote) => {
            let quote = quote.clone();
            println!("{quote}");
            store.set_last_quote(&quote).await?;
        }
        None => println!("no quotes in this category."),
    }

    Ok(())
}

/// the add-quote form: `add <category> <text>`.
///
/// both fields are trimmed and must be non-empty. the new quote is shown
/// immediately, persisted, recorded as last viewed, and handed to the
/// detached publish.
#[tracing::instrument(skip_all)]
pub async fn add(data: &Data, rest: &str) -> Result<(), Error> {
    let (category, text) = match rest.split_once(char::is_whitespace) {
        Some((category, text)) => (category.trim(), text.trim()),
        None => {
            println!("usage: add <category> <text>");
            return Ok(());
        }
    };

    if category.is_empty() || text.is_empty() {
        println!("both a category and a quote text are needed.");
        return Ok(());
    }

    let quote = Quote::new(text, category);

    {
        let mut store = data.store.lock().await;
        store.append(quote.clone());
        store.save().await?;
        store.set_last_quote(&quote).await?;
    }

    println!("{quote}");

    publish_detached(data, quote);

    Ok(())
}

/// fire-and-forget publish of a locally added quote. the outcome only
/// surfaces on the event channel.
fn publish_detached(data: &Data, quote: Quote) {
    let remote = data.remote.clone();
    let events = data.events.clone();

    tokio::spawn(async move {
        match remote.publish_quote(&quote).await {
            Ok(()) => {
                let _ = events.send(Event::QuotePublished { text: quote.text });
            }
            Err(e) => {
                let _ = events.send(Event::PublishFailed {
                    text: quote.text,
                    reason: e.to_string(),
                });
            }
        }
    });
}

/// set the active category filter. `all` matches everything.
pub async fn set_filter(data: &Data, rest: &str) -> Result<(), Error> {
    if rest.is_empty() {
        println!("usage: filter <category|all>");
        return Ok(());
    }

    let mut store = data.store.lock().await;
    store.set_filter(rest.to_string()).await?;

    if rest == ALL_CATEGORIES {
        println!("showing quotes from every category.");
    } else {
        println!("showing quotes from \"{rest}\".");
    }

    Ok(())
}

pub async fn list_categories(data: &Data) {
    let store = data.store.lock().await;
    let categories = store.categories();

    if categories.is_empty() {
        println!("no categories yet.");
        return;
    }

    for category in categories {
        println!("- {category}");
    }
}

pub async fn list_quotes(data: &Data) {
    let store = data.store.lock().await;

    let mut shown = 0;
    for quote in store.quotes() {
        if store.filter() != ALL_CATEGORIES && quote.category != store.filter() {
            continue;
        }

        shown += 1;
        println!("{shown}. {quote}");
    }

    if shown == 0 {
        println!("no quotes in this category.");
    }
}
