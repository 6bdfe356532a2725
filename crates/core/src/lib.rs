pub mod config;
pub mod config_loader;
pub mod error;
pub mod reasoning;
pub mod signal;
pub mod state;
pub mod traits;

pub use config::{
    AppConfig, CoinMarketCapConfig, Credentials, FinancialDatasetsConfig, TwitterConfig,
};
pub use config_loader::{ConfigLoader, ResolvedConfig};
pub use error::{FeedError, Result};
pub use reasoning::{
    render_agent_reasoning, render_agent_text, show_agent_reasoning, Report, ToReport,
};
pub use signal::{AgentMessage, Direction, NamedMessage, SentimentObservation, SignalResult};
pub use state::{merge_dicts, AgentState, StateUpdate, ANALYST_SIGNALS_KEY};
pub use traits::SentimentSource;
