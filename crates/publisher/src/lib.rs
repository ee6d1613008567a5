// ABOUTME: Main library entry point for telepage, a Telegraph publisher for arbitrary HTML.
// ABOUTME: Re-exports the public API: conversion, partitioning, pagination linking and the Client.

//! telepage - publish arbitrary HTML to Telegraph.
//!
//! Telegraph only accepts a small set of tags and caps each page at about
//! 64 KiB. This crate converts HTML into Telegraph's node format, splits
//! long documents into several pages, and publishes them last-to-first so
//! every page can link to the next one.
//!
//! # Example
//!
//! ```no_run
//! use telepage_publisher::{Client, Error};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Error> {
//!     let client = Client::builder().access_token("my-token").build()?;
//!     let meta = client.page_meta("My article");
//!     let url = client.publish_html("<p>Hello</p>", &meta).await?;
//!     println!("{}", url);
//!     Ok(())
//! }
//! ```

pub mod blocking;
pub mod client;
pub mod content;
pub mod error;
pub mod node;
pub mod options;
pub mod page;
pub mod pagination;
pub mod partition;

pub use crate::blocking::publish_html_blocking;
pub use crate::client::Client;
pub use crate::content::{content_format, HtmlInput, NO_CONTENT_TEXT};
pub use crate::error::{Error, ErrorCode};
pub use crate::node::{nodes_to_html, Document, Element, Node};
pub use crate::options::{ClientBuilder, Options, DEFAULT_API_URL};
pub use crate::page::{Page, PageMeta, PageRequest, PageResponse};
pub use crate::pagination::{
    default_footer, navigation_node, publish_chain, publish_document, LinkOptions,
    NEXT_PAGE_LABEL,
};
pub use crate::partition::{partition, Partition, MAX_CONTENT_LIMIT};
