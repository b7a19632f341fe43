use std::time::Duration;

use anyhow::{Context, Result};
use sanad_core::AssistScope;
use std::env;

#[derive(Clone)]
pub struct Config {
    pub port: u16,
    /// Key for the draft-assist upstream. When absent the assist route
    /// rejects requests instead of the whole service refusing to start.
    pub openai_api_key: Option<String>,
    pub assist_scope: AssistScope,
    pub assist_model: String,
    /// Artificial processing delay before a submission is acknowledged.
    pub submit_delay: Duration,
    /// Probability in [0, 1] of answering a submission with a synthetic
    /// server error, for client resilience testing.
    pub submit_failure_rate: f64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .context("PORT must be a valid number")?;

        let openai_api_key = env::var("OPENAI_API_KEY")
            .ok()
            .filter(|s| !s.trim().is_empty());

        let assist_scope = env::var("ASSIST_SCOPE")
            .unwrap_or_else(|_| "financial".to_string())
            .parse::<AssistScope>()
            .context("ASSIST_SCOPE must be financial, hardship or open")?;

        let assist_model =
            env::var("ASSIST_MODEL").unwrap_or_else(|_| sanad_core::DEFAULT_ASSIST_MODEL.to_string());

        let submit_delay_ms = env::var("SUBMIT_DELAY_MS")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u64>()
            .context("SUBMIT_DELAY_MS must be a valid number")?;

        let submit_failure_rate = env::var("SUBMIT_FAILURE_RATE")
            .unwrap_or_else(|_| "0.05".to_string())
            .parse::<f64>()
            .context("SUBMIT_FAILURE_RATE must be a valid number")?;
        if !(0.0..=1.0).contains(&submit_failure_rate) {
            anyhow::bail!("SUBMIT_FAILURE_RATE must be between 0 and 1");
        }

        Ok(Config {
            port,
            openai_api_key,
            assist_scope,
            assist_model,
            submit_delay: Duration::from_millis(submit_delay_ms),
            submit_failure_rate,
        })
    }
}
