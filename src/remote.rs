use crate::config::RemoteConfig;
use crate::error::Result;
use crate::log_entry::LogEntry;
use reqwest::header::CONTENT_TYPE;

/// Forwards entries to a remote collector, one POST per entry.
#[derive(Debug, Clone)]
pub struct RemoteSink {
    client: reqwest::Client,
    url: String,
    token: Option<String>,
}

impl RemoteSink {
    /// Returns `None` when no collector URL is configured.
    pub fn from_config(config: &RemoteConfig) -> Option<Self> {
        let url = config.server_url.clone()?;
        Some(Self {
            client: reqwest::Client::new(),
            url,
            token: config.server_token.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Only transport failures are errors; the response status is ignored.
    pub async fn send(&self, entry: &LogEntry) -> Result<()> {
        let mut request = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .json(entry);

        if let Some(ref token) = self.token {
            request = request.bearer_auth(token);
        }

        request.send().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_sink_without_url() {
        let config = RemoteConfig {
            server_url: None,
            server_token: Some("secret".to_string()),
        };
        assert!(RemoteSink::from_config(&config).is_none());
    }

    #[test]
    fn test_sink_from_url() {
        let config = RemoteConfig {
            server_url: Some("http://127.0.0.1:9/logs".to_string()),
            server_token: None,
        };
        let sink = RemoteSink::from_config(&config).unwrap();
        assert_eq!(sink.url(), "http://127.0.0.1:9/logs");
    }
}
