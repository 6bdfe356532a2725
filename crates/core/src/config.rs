use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Environment variable holding the financial-data provider API key.
pub const FINANCIAL_DATASETS_API_KEY_ENV: &str = "FINANCIAL_DATASETS_API_KEY";

/// Environment variable holding the crypto-market provider API key.
pub const COINMARKETCAP_API_KEY_ENV: &str = "COINMARKETCAP_API_KEY";

/// Environment variable holding the social-media bearer token.
pub const TWITTER_BEARER_TOKEN_ENV: &str = "TWITTER_BEARER_TOKEN";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub financial_datasets: FinancialDatasetsConfig,
    pub coinmarketcap: CoinMarketCapConfig,
    pub twitter: TwitterConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialDatasetsConfig {
    pub api_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoinMarketCapConfig {
    pub api_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwitterConfig {
    pub api_url: String,
    pub timeout_secs: u64,
    /// Page size for recent search (the API caps it at 100)
    pub max_results: u32,
    /// Alternative names searched next to the ticker, keyed by ticker
    #[serde(default)]
    pub aliases: std::collections::BTreeMap<String, Vec<String>>,
    pub positive_keywords: Vec<String>,
    pub negative_keywords: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            financial_datasets: FinancialDatasetsConfig {
                api_url: "https://api.financialdatasets.ai".to_string(),
                timeout_secs: 30,
            },
            coinmarketcap: CoinMarketCapConfig {
                api_url: "https://pro-api.coinmarketcap.com".to_string(),
                timeout_secs: 30,
            },
            twitter: TwitterConfig {
                api_url: "https://api.twitter.com".to_string(),
                timeout_secs: 30,
                max_results: 100,
                aliases: std::collections::BTreeMap::from([(
                    "BTC".to_string(),
                    vec!["Bitcoin".to_string()],
                )]),
                positive_keywords: vec![
                    "awesome".to_string(),
                    "amazing".to_string(),
                    "happy".to_string(),
                ],
                negative_keywords: vec!["worst".to_string(), "hate".to_string()],
            },
        }
    }
}

/// API credentials, resolved once at process start.
///
/// Absent keys are not an error here; the provider rejects the request instead.
#[derive(Debug, Default)]
pub struct Credentials {
    pub financial_datasets: Option<SecretString>,
    pub coinmarketcap: Option<SecretString>,
    pub twitter_bearer: Option<SecretString>,
}

impl Credentials {
    /// Reads every provider credential from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves credentials through an arbitrary lookup (environment, vault, test map).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = |name: &str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .map(SecretString::from)
        };

        let credentials = Self {
            financial_datasets: secret(FINANCIAL_DATASETS_API_KEY_ENV),
            coinmarketcap: secret(COINMARKETCAP_API_KEY_ENV),
            twitter_bearer: secret(TWITTER_BEARER_TOKEN_ENV),
        };

        tracing::debug!(
            financial_datasets = credentials.financial_datasets.is_some(),
            coinmarketcap = credentials.coinmarketcap.is_some(),
            twitter = credentials.twitter_bearer.is_some(),
            "resolved provider credentials"
        );

        credentials
    }
}
