use std::sync::LazyLock;

use crate::models::quote::Quote;

pub mod version;

pub static STARTUP_TIME: LazyLock<std::time::SystemTime> =
    LazyLock::new(std::time::SystemTime::now);

/// durable snapshot key holding the full serialized collection.
pub static QUOTES_KEY: &str = "quotes";
/// last displayed quote, restored once at startup.
pub static LAST_QUOTE_KEY: &str = "last_quote";
/// last active category filter.
pub static LAST_FILTER_KEY: &str = "last_category_filter";

/// filter sentinel matching every category.
pub static ALL_CATEGORIES: &str = "all";

pub static DEFAULT_REMOTE_URL: &str = "https://jsonplaceholder.typicode.com/posts";
pub static DEFAULT_SYNC_INTERVAL_SECS: u64 = 30;
pub static DEFAULT_EXPORT_FILE: &str = "quotes.json";

/// built-in collection used until a snapshot exists.
pub static SEED_QUOTES: LazyLock<Vec<Quote>> = LazyLock::new(|| {
    vec![
        Quote::new(
            "The best way to get started is to quit talking and begin doing.",
            "Motivation",
        ),
        Quote::new(
            "Life is what happens when you're busy making other plans.",
            "Life",
        ),
        Quote::new(
            "Do what you can with what you have where you are.",
            "Inspiration",
        ),
    ]
});
