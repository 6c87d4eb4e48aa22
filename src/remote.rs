use crate::models::quote::Quote;
use crate::models::remote::RemotePost;

/// boundary adapter to the remote quote collection.
#[derive(Clone)]
pub struct RemoteClient {
    pub client: reqwest::Client,
    endpoint: String,
}

impl RemoteClient {
    pub fn new(endpoint: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("reqwest client configuration is invalid");

        RemoteClient { client, endpoint }
    }

    /// fetch the remote snapshot, mapped onto local records.
    ///
    /// failures come back as `Err` with their cause. an empty remote
    /// collection and an unreachable remote are different results.
    pub async fn fetch_quotes(&self) -> anyhow::Result<Vec<Quote>> {
        let resp = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .inspect_err(
                |e| tracing::error!(err = ?e, "an error occurred when fetching the remote collection"),
            )?
            .error_for_status()
            .inspect_err(
                |e| tracing::error!(err = ?e, "the remote answered with an error status"),
            )?;

        let text = resp.text().await.inspect_err(
            |e| tracing::error!(err = ?e, "an error occurred when receiving response text"),
        )?;

        let posts: Vec<RemotePost> = serde_json::from_str(&text).inspect_err(
            |e| tracing::error!(err = ?e, text = %text, "an error occurred when parsing the remote collection"),
        )?;

        Ok(posts.into_iter().map(Quote::from).collect())
    }

    /// post one record to the remote side. the response body is logged and
    /// otherwise dropped; the remote may well not persist anything.
    pub async fn publish_quote(&self, quote: &Quote) -> anyhow::Result<()> {
        let resp = self
            .client
            .post(&self.endpoint)
            .json(&RemotePost::from(quote))
            .send()
            .await
            .inspect_err(
                |e| tracing::error!(err = ?e, "an error occurred when publishing a quote"),
            )?
            .error_for_status()
            .inspect_err(|e| tracing::error!(err = ?e, "the remote refused the published quote"))?;

        let body = resp.text().await.unwrap_or_default();
        tracing::debug!(body = %body, "the remote acknowledged the published quote.");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;

    use super::RemoteClient;
    use crate::models::quote::Quote;

    #[tokio::test]
    async fn fetch_maps_remote_posts_onto_quotes() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/posts");
                then.status(200).json_body(serde_json::json!([
                    {"userId": 1, "id": 1, "title": "Stay curious", "body": "Life"},
                    {"userId": 1, "id": 2, "title": "Be bold", "body": "Motivation"},
                ]));
            })
            .await;

        let remote = RemoteClient::new(server.url("/posts"));
        let quotes = remote.fetch_quotes().await.unwrap();

        assert_eq!(
            quotes,
            vec![
                Quote::new("Stay curious", "Life"),
                Quote::new("Be bold", "Motivation"),
            ]
        );
    }

    #[tokio::test]
    async fn fetch_reports_an_error_status_as_a_failure() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/posts");
                then.status(500);
            })
            .await;

        let remote = RemoteClient::new(server.url("/posts"));

        assert!(remote.fetch_quotes().await.is_err());
    }

    #[tokio::test]
    async fn fetch_reports_a_malformed_body_as_a_failure() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/posts");
                then.status(200).body("not json");
            })
            .await;

        let remote = RemoteClient::new(server.url("/posts"));

        assert!(remote.fetch_quotes().await.is_err());
    }

    #[tokio::test]
    async fn publish_sends_the_record_in_remote_shape() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/posts")
                    .header("content-type", "application/json")
                    .json_body(serde_json::json!({
                        "title": "Stay curious",
                        "body": "Life",
                    }));
                then.status(201).json_body(serde_json::json!({"id": 101}));
            })
            .await;

        let remote = RemoteClient::new(server.url("/posts"));
        remote
            .publish_quote(&Quote::new("Stay curious", "Life"))
            .await
            .unwrap();

        mock.assert_async().await;
    }
}
