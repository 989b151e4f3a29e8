use std::time::Duration;

use clap::Parser;

use crate::connector::adapter::{DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT};
use crate::connector::api::ContainerConfig;

#[derive(Parser, Debug)]
#[command(name = "nudge")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[arg(short, long)]
    pub verbose: bool,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 3001)]
    pub port: u16,

    /// Address to bind to
    #[arg(long, env = "NUDGE_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Model provider API key
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long, env = "OPENAI_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    #[arg(long, env = "OPENAI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Seconds to wait for the model before giving up on a prediction
    #[arg(
        long,
        env = "NUDGE_PROVIDER_TIMEOUT_SECS",
        default_value_t = DEFAULT_TIMEOUT.as_secs(),
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub provider_timeout_secs: u64,

    /// Answer with canned risks instead of calling the model (local development)
    #[arg(long)]
    pub mock_provider: bool,
}

impl Cli {
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn container_config(&self) -> ContainerConfig {
        ContainerConfig {
            api_key: self.api_key.clone(),
            model: self.model.clone(),
            base_url: self.base_url.clone(),
            provider_timeout: Duration::from_secs(self.provider_timeout_secs),
            mock_provider: self.mock_provider,
        }
    }
}
