// ABOUTME: Request and response types for Telegraph's createPage method.
// ABOUTME: PageMeta carries per-document fields; PageRequest is built fresh for every partition.

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::node::Node;

const MAX_TITLE_CHARS: usize = 256;
const MAX_AUTHOR_NAME_CHARS: usize = 128;
const MAX_AUTHOR_URL_CHARS: usize = 512;

/// Metadata shared by every page of one published document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMeta {
    pub access_token: String,
    pub title: String,
    pub author_name: Option<String>,
    pub author_url: Option<String>,
    pub return_content: bool,
}

impl PageMeta {
    pub fn new(access_token: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn author_name(mut self, name: impl Into<String>) -> Self {
        self.author_name = Some(name.into());
        self
    }

    pub fn author_url(mut self, url: impl Into<String>) -> Self {
        self.author_url = Some(url.into());
        self
    }

    /// Check the fields against Telegraph's limits before anything is sent.
    pub fn validate(&self) -> Result<(), Error> {
        const OP: &str = "validate";

        if self.access_token.trim().is_empty() {
            return Err(Error::invalid_request(OP, "access token is required"));
        }

        let title_len = self.title.chars().count();
        if title_len == 0 || title_len > MAX_TITLE_CHARS {
            return Err(Error::invalid_request(
                OP,
                format!("title must be 1-{} characters", MAX_TITLE_CHARS),
            ));
        }

        if let Some(ref name) = self.author_name {
            if name.chars().count() > MAX_AUTHOR_NAME_CHARS {
                return Err(Error::invalid_request(
                    OP,
                    format!("author name exceeds {} characters", MAX_AUTHOR_NAME_CHARS),
                ));
            }
        }

        if let Some(ref author_url) = self.author_url {
            if author_url.chars().count() > MAX_AUTHOR_URL_CHARS {
                return Err(Error::invalid_request(
                    OP,
                    format!("author URL exceeds {} characters", MAX_AUTHOR_URL_CHARS),
                ));
            }
            if url::Url::parse(author_url).is_err() {
                return Err(Error::invalid_request(OP, "author URL is malformed"));
            }
        }

        Ok(())
    }

    /// Build the request for one page carrying `content`.
    pub fn request(&self, content: Vec<Node>) -> PageRequest {
        PageRequest {
            access_token: self.access_token.clone(),
            title: self.title.clone(),
            author_name: self.author_name.clone(),
            author_url: self.author_url.clone(),
            content,
            return_content: self.return_content,
        }
    }
}

/// JSON body for `createPage`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    pub access_token: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_url: Option<String>,
    pub content: Vec<Node>,
    pub return_content: bool,
}

/// A created page, as returned in `result`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Page {
    #[serde(default, alias = "Path")]
    pub path: String,
    #[serde(default, alias = "URL", alias = "Url")]
    pub url: String,
    #[serde(default, alias = "Title")]
    pub title: Option<String>,
    #[serde(default, alias = "Views")]
    pub views: Option<u64>,
}

/// Envelope returned by every Telegraph API method.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PageResponse {
    #[serde(default, alias = "OK", alias = "Ok")]
    pub ok: bool,
    #[serde(default, alias = "Result")]
    pub result: Option<Page>,
    #[serde(default, alias = "Error")]
    pub error: Option<String>,
}

impl PageResponse {
    /// Turn the envelope into the page URL or a Publish error.
    pub fn into_url(self, op: &str) -> Result<String, Error> {
        if !self.ok {
            let msg = self.error.unwrap_or_else(|| "unknown error".to_string());
            return Err(Error::publish(op, msg));
        }
        match self.result {
            Some(page) if !page.url.is_empty() => Ok(page.url),
            _ => Err(Error::transport(op, "response is missing result.url", None)),
        }
    }
}
