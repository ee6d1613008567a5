// ABOUTME: Publishes partitions last-to-first so each page can link to the one after it.
// ABOUTME: Appends the footer to every page and a "next page" navigation node to all but the last.

//! Pagination linking.
//!
//! A page's URL is only known once it has been created, so the chain is
//! built backwards: the last partition is published first, and its URL is
//! threaded into the navigation node of the partition before it. The URL of
//! partition 0 is the entry point for the whole document.

use std::future::Future;

use log::Level;

use crate::error::Error;
use crate::node::{Element, Node};
use crate::page::{PageMeta, PageRequest};
use crate::partition::{partition, Partition};

const OP: &str = "publish_chain";

/// Default label of the navigation link.
pub const NEXT_PAGE_LABEL: &str = "next page";

/// Settings for one publish chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkOptions {
    /// Log every page at info level instead of debug.
    pub debug: bool,
    /// Text of the link to the next page.
    pub next_label: String,
}

impl Default for LinkOptions {
    fn default() -> Self {
        Self {
            debug: false,
            next_label: NEXT_PAGE_LABEL.to_string(),
        }
    }
}

/// The footer used when none is configured.
pub fn default_footer() -> Node {
    Element::new("p")
        .with_child(Element::new("em").with_child("Published with telepage"))
        .into()
}

/// A line break followed by a link to `href`.
pub fn navigation_node(href: &str, label: &str) -> Node {
    Element::new("p")
        .with_child(Element::new("br"))
        .with_child(Element::new("a").with_attr("href", href).with_child(label))
        .into()
}

/// Content of one page: the partition's nodes, the footer, then the
/// navigation node if a next page exists.
pub fn page_content(
    nodes: &[Node],
    footer: &Node,
    next_link: Option<&str>,
    next_label: &str,
) -> Vec<Node> {
    let mut content = Vec::with_capacity(nodes.len() + 2);
    content.extend_from_slice(nodes);
    content.push(footer.clone());
    if let Some(link) = next_link {
        content.push(navigation_node(link, next_label));
    }
    content
}

/// Publish `partitions` in reverse order and return the URL of the first one.
///
/// `publish` is called exactly once per partition, last partition first. The
/// first failure stops the chain: no earlier partition is submitted and no
/// URL is returned. Dropping the returned future between calls has the same
/// effect.
pub async fn publish_chain<F, Fut>(
    partitions: &[Partition<'_>],
    footer: &Node,
    meta: &PageMeta,
    opts: &LinkOptions,
    mut publish: F,
) -> Result<String, Error>
where
    F: FnMut(PageRequest) -> Fut,
    Fut: Future<Output = Result<String, Error>>,
{
    let level = if opts.debug { Level::Info } else { Level::Debug };
    let total = partitions.len();
    let mut next_link: Option<String> = None;

    for part in partitions.iter().rev() {
        if log::log_enabled!(level) {
            let size = part.approximate_size().map_err(|e| e.at_page(part.index))?;
            log::log!(
                level,
                "publishing page {}/{}: {} nodes, ~{} bytes, links to next: {}",
                part.index + 1,
                total,
                part.nodes.len(),
                size,
                next_link.is_some()
            );
        }

        let content = page_content(part.nodes, footer, next_link.as_deref(), &opts.next_label);
        let url = publish(meta.request(content))
            .await
            .map_err(|e| e.at_page(part.index))?;

        log::log!(level, "page {}/{} published at {}", part.index + 1, total, url);
        next_link = Some(url);
    }

    next_link.ok_or_else(|| Error::invalid_request(OP, "no partitions to publish"))
}

/// Partition `document` by `limit` and publish the chain.
pub async fn publish_document<F, Fut>(
    document: &[Node],
    limit: usize,
    footer: &Node,
    meta: &PageMeta,
    opts: &LinkOptions,
    publish: F,
) -> Result<String, Error>
where
    F: FnMut(PageRequest) -> Fut,
    Fut: Future<Output = Result<String, Error>>,
{
    let partitions = partition(document, limit)?;
    publish_chain(&partitions, footer, meta, opts, publish).await
}
