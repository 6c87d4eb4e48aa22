use rand::seq::SliceRandom;
use sqlx::{Pool, Sqlite};

use crate::constants::{ALL_CATEGORIES, LAST_FILTER_KEY, LAST_QUOTE_KEY, QUOTES_KEY, SEED_QUOTES};
use crate::models::quote::Quote;

/// owns the in-process collection and its durable snapshot.
///
/// the snapshot is a key-value blob table: the whole collection is
/// serialized under one key on every save. last writer wins, no deltas.
pub struct QuoteStore {
    db: Pool<Sqlite>,
    quotes: Vec<Quote>,
    filter: String,
}

impl QuoteStore {
    /// read the persisted snapshot, falling back to the seed collection when
    /// there is none or it does not parse. also restores the last filter.
    pub async fn load(db: Pool<Sqlite>) -> anyhow::Result<Self> {
        let quotes = match read_value(&db, QUOTES_KEY).await? {
            Some(raw) => match serde_json::from_str::<Vec<Quote>>(&raw) {
                Ok(quotes) => {
                    let total = quotes.len();
                    let quotes: Vec<Quote> = quotes
                        .into_iter()
                        .filter(Quote::is_well_formed)
                        .collect();

                    if quotes.len() < total {
                        tracing::warn!(
                            skipped = total - quotes.len(),
                            "skipped blank entries in the stored collection."
                        );
                    }

                    quotes
                }
                Err(e) => {
                    tracing::error!(
                        err = ?e,
                        "the stored collection is not valid JSON. starting from the seed collection."
                    );

                    SEED_QUOTES.clone()
                }
            },
            None => {
                tracing::info!("no stored collection found. starting from the seed collection.");

                SEED_QUOTES.clone()
            }
        };

        let filter = read_value(&db, LAST_FILTER_KEY)
            .await?
            .unwrap_or_else(|| ALL_CATEGORIES.to_string());

        Ok(QuoteStore { db, quotes, filter })
    }

    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    /// exact text+category membership test, linear scan.
    pub fn contains(&self, quote: &Quote) -> bool {
        self.quotes.contains(quote)
    }

    /// append one record to the in-memory tail. callers persist.
    pub fn append(&mut self, quote: Quote) {
        self.quotes.push(quote);
    }

    /// overwrite the durable snapshot with the full collection.
    pub async fn save(&self) -> anyhow::Result<()> {
        let raw = serde_json::to_string(&self.quotes)?;
        write_value(&self.db, QUOTES_KEY, &raw).await
    }

    /// distinct categories, sorted for display stability.
    pub fn categories(&self) -> Vec<String> {
        let set: std::collections::BTreeSet<&str> =
            self.quotes.iter().map(|quote| quote.category.as_str()).collect();

        set.into_iter().map(str::to_string).collect()
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub async fn set_filter(&mut self, filter: String) -> anyhow::Result<()> {
        write_value(&self.db, LAST_FILTER_KEY, &filter).await?;
        self.filter = filter;

        Ok(())
    }

    fn filtered(&self) -> Vec<&Quote> {
        self.quotes
            .iter()
            .filter(|quote| self.filter == ALL_CATEGORIES || quote.category == self.filter)
            .collect()
    }

    /// uniform pick over the active filter's matches. `None` is the defined
    /// empty state, not an error.
    pub fn random_quote(&self) -> Option<&Quote> {
        self.filtered().choose(&mut rand::thread_rng()).copied()
    }

    pub async fn last_quote(&self) -> anyhow::Result<Option<Quote>> {
        match read_value(&self.db, LAST_QUOTE_KEY).await? {
            Some(raw) => match serde_json::from_str::<Quote>(&raw) {
                Ok(quote) => Ok(Some(quote)),
                Err(e) => {
                    tracing::warn!(err = ?e, "the stored last quote is not valid JSON. ignoring it.");

                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    pub async fn set_last_quote(&self, quote: &Quote) -> anyhow::Result<()> {
        write_value(&self.db, LAST_QUOTE_KEY, &serde_json::to_string(quote)?).await
    }
}

async fn read_value(db: &Pool<Sqlite>, key: &str) -> anyhow::Result<Option<String>> {
    let value = sqlx::query_scalar::<_, String>(
        r#"
            SELECT value
            FROM storage
            WHERE key = $1;
        "#,
    )
    .bind(key)
    .fetch_optional(db)
    .await
    .inspect_err(
        |e| tracing::error!(err = ?e, key = %key, "an error occurred when reading from storage"),
    )?;

    Ok(value)
}

async fn write_value(db: &Pool<Sqlite>, key: &str, value: &str) -> anyhow::Result<()> {
    sqlx::query(
        r#"
            INSERT INTO
                storage (key, value)
            VALUES
                ($1, $2)
            ON CONFLICT (key)
            DO UPDATE SET
                value = excluded.value;
        "#,
    )
    .bind(key)
    .bind(value)
    .execute(db)
    .await
    .inspect_err(
        |e| tracing::error!(err = ?e, key = %key, "an error occurred when writing to storage"),
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{write_value, QuoteStore};
    use crate::constants::{ALL_CATEGORIES, QUOTES_KEY, SEED_QUOTES};
    use crate::models::quote::Quote;
    use crate::test_utils::memory_pool;

    #[tokio::test]
    async fn starts_from_the_seed_collection_without_a_snapshot() {
        let pool = memory_pool().await;

        let store = QuoteStore::load(pool).await.unwrap();

        assert_eq!(store.quotes(), SEED_QUOTES.as_slice());
        assert_eq!(store.filter(), ALL_CATEGORIES);
    }

    #[tokio::test]
    async fn survives_a_restart_through_the_snapshot() {
        let pool = memory_pool().await;

        let mut store = QuoteStore::load(pool.clone()).await.unwrap();
        store.append(Quote::new("Stay curious", "Life"));
        store.save().await.unwrap();

        let reloaded = QuoteStore::load(pool).await.unwrap();
        assert_eq!(reloaded.quotes().len(), SEED_QUOTES.len() + 1);
        assert!(reloaded.contains(&Quote::new("Stay curious", "Life")));
    }

    #[tokio::test]
    async fn falls_back_to_the_seed_collection_on_a_malformed_snapshot() {
        let pool = memory_pool().await;
        write_value(&pool, QUOTES_KEY, "not json").await.unwrap();

        let store = QuoteStore::load(pool).await.unwrap();

        assert_eq!(store.quotes(), SEED_QUOTES.as_slice());
    }

    #[tokio::test]
    async fn skips_blank_entries_in_the_snapshot() {
        let pool = memory_pool().await;
        let raw = r#"[
            {"text": "Stay curious", "category": "Life"},
            {"text": "", "category": "Life"},
            {"text": "Be bold", "category": "   "}
        ]"#;
        write_value(&pool, QUOTES_KEY, raw).await.unwrap();

        let store = QuoteStore::load(pool).await.unwrap();

        assert_eq!(store.quotes(), &[Quote::new("Stay curious", "Life")]);
    }

    #[tokio::test]
    async fn restores_the_last_filter() {
        let pool = memory_pool().await;

        let mut store = QuoteStore::load(pool.clone()).await.unwrap();
        store.set_filter("Life".to_string()).await.unwrap();

        let reloaded = QuoteStore::load(pool).await.unwrap();
        assert_eq!(reloaded.filter(), "Life");
    }

    #[tokio::test]
    async fn categories_are_distinct_and_sorted() {
        let pool = memory_pool().await;

        let mut store = QuoteStore::load(pool).await.unwrap();
        store.append(Quote::new("Stay curious", "Life"));
        store.append(Quote::new("Begin anywhere", "Motivation"));

        assert_eq!(store.categories(), vec!["Inspiration", "Life", "Motivation"]);
    }

    #[tokio::test]
    async fn an_empty_filtered_set_yields_no_quote() {
        let pool = memory_pool().await;

        let mut store = QuoteStore::load(pool).await.unwrap();
        let before = store.quotes().to_vec();
        store.set_filter("Cooking".to_string()).await.unwrap();

        assert_eq!(store.random_quote(), None);
        // the empty state is display-only; the collection is untouched
        assert_eq!(store.quotes(), before.as_slice());
    }

    #[tokio::test]
    async fn random_quote_honors_the_active_filter() {
        let pool = memory_pool().await;

        let mut store = QuoteStore::load(pool).await.unwrap();
        store.set_filter("Life".to_string()).await.unwrap();

        for _ in 0..16 {
            let quote = store.random_quote().expect("the Life category is seeded");
            assert_eq!(quote.category, "Life");
        }
    }

    #[tokio::test]
    async fn remembers_the_last_displayed_quote() {
        let pool = memory_pool().await;

        let store = QuoteStore::load(pool.clone()).await.unwrap();
        assert_eq!(store.last_quote().await.unwrap(), None);

        let quote = Quote::new("Stay curious", "Life");
        store.set_last_quote(&quote).await.unwrap();

        let reloaded = QuoteStore::load(pool).await.unwrap();
        assert_eq!(reloaded.last_quote().await.unwrap(), Some(quote));
    }
}
