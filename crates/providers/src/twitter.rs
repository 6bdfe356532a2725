//! Social-media provider client (recent-search mentions).
//!
//! The mentions query pairs a ticker (and its configured aliases) with the
//! sentiment keywords, e.g. `(BTC OR Bitcoin) (awesome OR amazing OR happy OR worst OR hate)`.

use crate::client::{build_http, extract_array, network_error, read_json};
use alpha_feed_core::{FeedError, Result, SentimentObservation, SentimentSource, TwitterConfig};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

const SEARCH_RECENT_PATH: &str = "/2/tweets/search/recent";
const TWEET_FIELDS: &str = "created_at,author_id,text";

/// Bounds the provider enforces on `max_results`.
const MIN_RESULTS: u32 = 10;
const MAX_RESULTS: u32 = 100;

/// One post returned by recent search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tweet {
    pub id: Option<String>,
    pub author_id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub text: String,
}

impl From<Tweet> for SentimentObservation {
    fn from(tweet: Tweet) -> Self {
        Self {
            id: tweet.id,
            author_id: tweet.author_id,
            created_at: tweet.created_at,
            text: tweet.text,
        }
    }
}

/// Social-media REST client.
pub struct TwitterClient {
    http: Client,
    base_url: String,
    bearer_token: Option<SecretString>,
    max_results: u32,
    aliases: BTreeMap<String, Vec<String>>,
    keywords: Vec<String>,
}

impl std::fmt::Debug for TwitterClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwitterClient")
            .field("base_url", &self.base_url)
            .field("has_bearer_token", &self.bearer_token.is_some())
            .field("max_results", &self.max_results)
            .finish_non_exhaustive()
    }
}

impl TwitterClient {
    /// Creates a client from configuration and an optional bearer token.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be built.
    pub fn new(config: &TwitterConfig, bearer_token: Option<SecretString>) -> Result<Self> {
        let keywords = config
            .positive_keywords
            .iter()
            .chain(&config.negative_keywords)
            .cloned()
            .collect();

        Ok(Self {
            http: build_http(config.timeout_secs)?,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            bearer_token,
            max_results: config.max_results.clamp(MIN_RESULTS, MAX_RESULTS),
            aliases: config.aliases.clone(),
            keywords,
        })
    }

    /// Sets a custom base URL (useful for testing).
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn max_results(&self) -> u32 {
        self.max_results
    }

    /// Builds the recent-search query for a ticker.
    #[must_use]
    pub fn mentions_query(&self, ticker: &str) -> String {
        let mut subjects = vec![ticker.to_string()];
        if let Some(aliases) = self.aliases.get(&ticker.to_uppercase()) {
            subjects.extend(aliases.iter().cloned());
        }

        let subjects = or_terms(&subjects);
        if self.keywords.is_empty() {
            return format!("({subjects})");
        }
        format!("({subjects}) ({})", or_terms(&self.keywords))
    }

    /// Runs a recent search with a raw query string.
    ///
    /// # Errors
    /// Returns a provider error on non-200, an empty-result error when no
    /// `data` is returned, and a decode error for malformed posts.
    pub async fn search_recent(&self, query: &str) -> Result<Vec<Tweet>> {
        let url = format!("{}{}", self.base_url, SEARCH_RECENT_PATH);
        tracing::debug!("GET {} query={}", url, query);

        let params = [
            ("query", query.to_string()),
            ("tweet.fields", TWEET_FIELDS.to_string()),
            ("max_results", self.max_results.to_string()),
        ];

        let mut request = self.http.get(&url).query(&params);
        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request.send().await.map_err(network_error)?;
        let body = read_json(response).await?;

        let items = extract_array(body, &["data"])?;
        let tweets: Vec<Tweet> = serde_json::from_value(Value::Array(items))
            .map_err(|e| FeedError::Decode(format!("malformed post in `data`: {e}")))?;

        tracing::info!("Fetched {} posts", tweets.len());
        Ok(tweets)
    }

    /// Fetches recent posts mentioning a ticker alongside sentiment keywords.
    ///
    /// # Errors
    /// Returns any error from [`Self::search_recent`].
    pub async fn get_mentions(&self, ticker: &str) -> Result<Vec<Tweet>> {
        self.search_recent(&self.mentions_query(ticker)).await
    }
}

#[async_trait]
impl SentimentSource for TwitterClient {
    /// Recent search only covers the last week; the date range is not forwarded.
    async fn fetch_observations(
        &self,
        ticker: &str,
        _start_date: Option<&str>,
        _end_date: Option<&str>,
    ) -> Result<Vec<SentimentObservation>> {
        let tweets = self.get_mentions(ticker).await?;
        Ok(tweets.into_iter().map(SentimentObservation::from).collect())
    }

    fn name(&self) -> &str {
        "twitter"
    }
}

/// Joins search terms with `OR`, quoting multi-word phrases so they match exactly.
fn or_terms(terms: &[String]) -> String {
    terms
        .iter()
        .map(|term| {
            if term.split_whitespace().nth(1).is_some() {
                format!("\"{term}\"")
            } else {
                term.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" OR ")
}
