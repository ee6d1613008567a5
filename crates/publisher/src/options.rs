// ABOUTME: Configuration options for the Telegraph client: Options and the fluent ClientBuilder.
// ABOUTME: Holds API endpoint, account defaults, size limit, footer node and link settings.

use std::time::Duration;

use crate::client::Client;
use crate::error::Error;
use crate::node::Node;
use crate::pagination::{default_footer, LinkOptions};
use crate::partition::MAX_CONTENT_LIMIT;

/// Base URL of the public Telegraph API.
pub const DEFAULT_API_URL: &str = "https://api.telegra.ph";

/// Configuration options for the Telegraph client.
#[derive(Debug, Clone)]
pub struct Options {
    pub api_url: String,
    pub access_token: String,
    pub author_name: Option<String>,
    pub author_url: Option<String>,
    pub timeout: Duration,
    pub user_agent: String,
    pub size_limit: usize,
    pub footer: Node,
    pub link: LinkOptions,
    pub http_client: Option<reqwest::Client>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            access_token: String::new(),
            author_name: None,
            author_url: None,
            timeout: Duration::from_secs(30),
            user_agent: "telepage/0.1".to_string(),
            size_limit: MAX_CONTENT_LIMIT,
            footer: default_footer(),
            link: LinkOptions::default(),
            http_client: None,
        }
    }
}

/// Builder for constructing Client instances with custom configuration.
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    opts: Options,
}

impl ClientBuilder {
    /// Create a new ClientBuilder with default options.
    pub fn new() -> Self {
        Self {
            opts: Options::default(),
        }
    }

    /// Set the API base URL (useful for tests and self-hosted mirrors).
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.opts.api_url = url.into();
        self
    }

    /// Set the account access token used for every page.
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.opts.access_token = token.into();
        self
    }

    /// Set the default author name.
    pub fn author_name(mut self, name: impl Into<String>) -> Self {
        self.opts.author_name = Some(name.into());
        self
    }

    /// Set the default author URL.
    pub fn author_url(mut self, url: impl Into<String>) -> Self {
        self.opts.author_url = Some(url.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.opts.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.opts.user_agent = user_agent.into();
        self
    }

    /// Set the per-page content size limit in bytes.
    pub fn size_limit(mut self, limit: usize) -> Self {
        self.opts.size_limit = limit;
        self
    }

    /// Set the node appended to every page.
    pub fn footer(mut self, footer: Node) -> Self {
        self.opts.footer = footer;
        self
    }

    /// Log each page at info level.
    pub fn debug(mut self, debug: bool) -> Self {
        self.opts.link.debug = debug;
        self
    }

    /// Set the label of the "next page" link.
    pub fn next_label(mut self, label: impl Into<String>) -> Self {
        self.opts.link.next_label = label.into();
        self
    }

    /// Use a custom HTTP client.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.opts.http_client = Some(client);
        self
    }

    /// Build the Client with the configured options.
    pub fn build(self) -> Result<Client, Error> {
        Client::new(self.opts)
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let opts = Options::default();
        assert_eq!(opts.api_url, DEFAULT_API_URL);
        assert_eq!(opts.size_limit, 60_000);
        assert_eq!(opts.footer, default_footer());
        assert!(!opts.link.debug);
    }

    #[test]
    fn builder_sets_fields() {
        let client = ClientBuilder::new()
            .api_url("http://localhost:1")
            .access_token("tok")
            .author_name("Anon")
            .size_limit(1000)
            .debug(true)
            .next_label("more")
            .build()
            .unwrap();

        let opts = client.options();
        assert_eq!(opts.api_url, "http://localhost:1");
        assert_eq!(opts.access_token, "tok");
        assert_eq!(opts.author_name.as_deref(), Some("Anon"));
        assert_eq!(opts.size_limit, 1000);
        assert!(opts.link.debug);
        assert_eq!(opts.link.next_label, "more");
    }
}
