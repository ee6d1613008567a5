// ABOUTME: The Telegraph Client that sends createPage requests over HTTP.
// ABOUTME: Drives the convert, partition and link pipeline with create_page as the publish step.

use reqwest::header::CONTENT_TYPE;

use crate::content::content_format;
use crate::error::Error;
use crate::node::{Document, Node};
use crate::options::{ClientBuilder, Options};
use crate::page::{PageMeta, PageRequest, PageResponse};
use crate::pagination;

const CREATE_PAGE: &str = "createPage";

/// Map a reqwest failure to Timeout or Transport.
fn request_error(op: &str, err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::timeout(op, Some(anyhow::Error::new(err)))
    } else {
        Error::transport(op, "request failed", Some(anyhow::Error::new(err)))
    }
}

/// Client for the Telegraph API.
pub struct Client {
    opts: Options,
    http_client: reqwest::Client,
}

impl Client {
    /// Create a new ClientBuilder for configuring the client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a new Client with the given options.
    pub fn new(opts: Options) -> Result<Self, Error> {
        let http_client = match opts.http_client.clone() {
            Some(client) => client,
            None => reqwest::Client::builder()
                .user_agent(&opts.user_agent)
                .timeout(opts.timeout)
                .gzip(true)
                .build()
                .map_err(|e| {
                    Error::transport("Client::new", "failed to build HTTP client", Some(e.into()))
                })?,
        };

        Ok(Self { opts, http_client })
    }

    pub fn options(&self) -> &Options {
        &self.opts
    }

    /// Page metadata pre-filled with the client's token and author defaults.
    pub fn page_meta(&self, title: impl Into<String>) -> PageMeta {
        PageMeta {
            access_token: self.opts.access_token.clone(),
            title: title.into(),
            author_name: self.opts.author_name.clone(),
            author_url: self.opts.author_url.clone(),
            return_content: false,
        }
    }

    fn endpoint(&self, method: &str) -> String {
        format!("{}/{}", self.opts.api_url.trim_end_matches('/'), method)
    }

    /// Create one page and return its URL.
    ///
    /// No retries: a failure is returned as-is.
    pub async fn create_page(&self, request: PageRequest) -> Result<String, Error> {
        let body = serde_json::to_vec(&request)
            .map_err(|e| Error::serialization(CREATE_PAGE, Some(anyhow::Error::new(e))))?;

        let response = self
            .http_client
            .post(self.endpoint(CREATE_PAGE))
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| request_error(CREATE_PAGE, e))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| request_error(CREATE_PAGE, e))?;

        let parsed: PageResponse = serde_json::from_slice(&bytes).map_err(|e| {
            Error::transport(
                CREATE_PAGE,
                format!("unexpected response (HTTP {})", status.as_u16()),
                Some(anyhow::Error::new(e)),
            )
        })?;

        parsed.into_url(CREATE_PAGE)
    }

    /// Publish an already converted document, splitting it across as many
    /// linked pages as the size limit requires. Returns the first page's URL.
    pub async fn publish_document(&self, document: &[Node], meta: &PageMeta) -> Result<String, Error> {
        meta.validate()?;
        let client = self;
        pagination::publish_document(
            document,
            self.opts.size_limit,
            &self.opts.footer,
            meta,
            &self.opts.link,
            move |request| client.create_page(request),
        )
        .await
    }

    /// Convert `html` and publish it as one or more linked pages.
    pub async fn publish_html(&self, html: &str, meta: &PageMeta) -> Result<String, Error> {
        let document = content_format(html)?;
        self.publish_document(&document, meta).await
    }

    /// Convert `html` and publish it as a single page, without splitting,
    /// footer or navigation.
    pub async fn create_single_page(&self, html: &str, meta: &PageMeta) -> Result<String, Error> {
        let content = content_format(html)?;
        self.create_single_document(content, meta).await
    }

    /// Publish an already converted document as a single page.
    pub async fn create_single_document(
        &self,
        document: Document,
        meta: &PageMeta,
    ) -> Result<String, Error> {
        meta.validate()?;
        self.create_page(meta.request(document)).await
    }
}
