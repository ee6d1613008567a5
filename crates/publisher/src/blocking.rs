// ABOUTME: Synchronous adapter for the async publishing API.
// ABOUTME: Provides publish_html_blocking for callers without a tokio runtime.

use tokio::runtime::Runtime;

use crate::client::Client;
use crate::error::Error;
use crate::page::PageMeta;

/// Publish HTML synchronously by spinning up a local tokio runtime.
///
/// Must not be called from inside an async context.
///
/// # Returns
/// The URL of the first page, or an `Error` on failure.
pub fn publish_html_blocking(client: &Client, html: &str, meta: &PageMeta) -> Result<String, Error> {
    let rt = Runtime::new().map_err(|e| {
        Error::transport(
            "publish_html_blocking",
            "failed to create runtime",
            Some(anyhow::Error::new(e)),
        )
    })?;

    rt.block_on(client.publish_html(html, meta))
}
