use std::time::Duration;

use reqwest::Client;

use crate::error::SourceError;

/// Builds the reqwest client shared by all provider adapters: request
/// timeout, 10 s connect timeout, and a stable `User-Agent`.
pub(crate) fn build_http_client(
    timeout_secs: u64,
    user_agent: &str,
) -> Result<Client, SourceError> {
    Ok(Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(user_agent)
        .build()?)
}
