use crate::error::Result;
use crate::signal::SentimentObservation;
use async_trait::async_trait;

/// Anything that can supply sentiment evidence for a ticker over a date range.
#[async_trait]
pub trait SentimentSource: Send + Sync {
    async fn fetch_observations(
        &self,
        ticker: &str,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<Vec<SentimentObservation>>;

    fn name(&self) -> &str;
}
